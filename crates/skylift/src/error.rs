//! Orchestrator error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Instance not registered: {0}")]
    InstanceNotFound(String),

    #[error("Instance already registered: {0}")]
    InstanceAlreadyExists(String),

    #[error("Cloud error: {0}")]
    Cloud(#[from] skylift_cloud::CloudError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
