//! Skylift instance orchestration
//!
//! Provisions and tears down VM instances, wiring a resource group, storage
//! account, virtual network, public IP, network interface and virtual
//! machine into one unit per named instance. All provider access goes
//! through the `skylift-cloud` facade traits, so the orchestrator itself is
//! provider-agnostic.
//!
//! # Example
//!
//! ```ignore
//! use skylift::{CloudConfig, InstanceOrchestrator};
//!
//! let config = CloudConfig::load("skylift.yaml")?;
//! let orchestrator = InstanceOrchestrator::new(config, clients);
//!
//! orchestrator.ensure_environment().await?;
//! orchestrator
//!     .create_instance("worker-01", &key_data, &["batch".into()], true)
//!     .await?;
//! println!("{}", orchestrator.get_public_address("worker-01").await?);
//! ```
//!
//! Creation and deletion of *different* instances may run concurrently from
//! independent tasks; the steps within one instance's lifecycle are strictly
//! ordered. A failed lifecycle leaves its registry entry and any
//! already-created cloud resources in place; the bulk reaper
//! ([`InstanceOrchestrator::delete_all`]) sweeps leftovers by name match.

pub mod config;
pub mod error;
pub mod instance;
pub mod orchestrator;
pub mod reaper;

// Re-exports
pub use config::{CloudConfig, ImageSource};
pub use error::{Error, Result};
pub use instance::Instance;
pub use orchestrator::InstanceOrchestrator;
