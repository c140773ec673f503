//! Orchestrator configuration
//!
//! Loaded once by the caller and read-only afterwards. Credential
//! acquisition itself happens outside this crate; the config only carries
//! the identifiers a facade implementation needs.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base OS image for new instances
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Marketplace image descriptor
    Marketplace {
        publisher: String,
        offer: String,
        sku: String,
        version: String,
    },
    /// Pre-built template disk stored in the configured storage account
    TemplateVhd { vhd: String },
}

/// Cloud account and environment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub subscription_id: String,
    pub group_name: String,
    pub storage_name: String,
    pub virtual_network_name: String,
    pub subnet_name: String,
    pub region: String,
    pub vm_size: String,
    pub admin_username: String,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub image: ImageSource,
    /// Tags applied to every created VM, in addition to per-call tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CloudConfig {
    /// Load the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CloudConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
