//! az CLI wrapper
//!
//! Runs `az` management commands with JSON output pinned to one
//! subscription. Non-zero exits surface the captured stderr.

use serde::de::DeserializeOwned;
use skylift_cloud::{CloudError, Result};
use std::process::Stdio;
use tokio::process::Command;

/// az CLI wrapper, cheap to clone into spawned operations
#[derive(Clone)]
pub struct AzCli {
    subscription_id: String,
}

impl AzCli {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
        }
    }

    /// Run an az command and return stdout.
    pub async fn run(&self, args: Vec<String>) -> Result<String> {
        let mut cmd = Command::new("az");
        cmd.args(&args);
        cmd.arg("--subscription").arg(&self.subscription_id);
        cmd.arg("--output").arg("json");
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: az {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CloudError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run an az command and deserialize its JSON output.
    pub async fn run_json<T: DeserializeOwned>(&self, args: Vec<String>) -> Result<T> {
        let output = self.run(args).await?;
        let value: T = serde_json::from_str(&output)?;
        Ok(value)
    }
}
