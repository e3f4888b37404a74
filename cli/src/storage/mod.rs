//! Local credential/config storage

pub mod credentials;
pub mod file;
pub mod layout;
