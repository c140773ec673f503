//! Azure facade for Skylift
//!
//! Implements the `skylift-cloud` management-surface traits on top of the
//! `az` CLI. Credential acquisition stays with `az login`; this crate only
//! issues management calls and parses their JSON output.
//!
//! # Requirements
//!
//! - The `az` CLI must be installed and logged in
//! - The subscription id passed to [`AzureCloud::new`] must be accessible
//!   to the logged-in account

pub mod azcli;
pub mod provider;

pub use azcli::AzCli;
pub use provider::AzureCloud;
