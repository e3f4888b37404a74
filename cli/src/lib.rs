//! storectl library
//!
//! Core modules for the storectl operator CLI: commerce-cloud and
//! deployment-provider clients, the deployment orchestrator, and the
//! local credential store.

pub mod cloud;
pub mod commands;
pub mod deploy;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod poll;
pub mod provider;
pub mod storage;
