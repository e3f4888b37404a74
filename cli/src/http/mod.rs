//! Authenticated HTTP plumbing shared by both API clients

pub mod client;
