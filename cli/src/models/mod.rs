//! Wire and domain models

pub mod app;
pub mod backup;
pub mod deployment;
pub mod organization;
pub mod project;
pub mod task;
