//! Deployment orchestration
//!
//! Sequences the dependent steps of a storefront deployment across the
//! commerce backend and the deployment provider, threading the resolved
//! environment bundle forward through each step.

pub mod bundle;
pub mod checkout;
pub mod orchestrator;
pub mod source;
