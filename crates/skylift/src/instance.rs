//! Instance records
//!
//! One record per live or in-flight instance. Immutable after creation:
//! the registry only ever inserts and removes whole records.

/// Description of one provisioned (or provisioning) instance.
///
/// The network interface, public IP, computer and VM names all share the
/// sanitized base name; only the OS disk name carries a timestamp token so
/// that re-creating the same logical name never reuses a disk blob.
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    base_name: String,
    os_disk_name: String,
    has_public_ip: bool,
}

impl Instance {
    pub fn new(name: impl Into<String>, has_public_ip: bool) -> Self {
        let name = name.into();
        let base_name: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '.' | ':' | ' '))
            .collect();
        let stamp = chrono::Utc::now().format("%y%m%d%H%M%S%3f").to_string();
        let os_disk_name = format!("{base_name}{stamp}");
        Self {
            name,
            base_name,
            os_disk_name,
            has_public_ip,
        }
    }

    /// Caller-supplied logical identifier, unique while the instance lives.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn vm_name(&self) -> &str {
        &self.base_name
    }

    pub fn network_interface_name(&self) -> &str {
        &self.base_name
    }

    pub fn public_ip_address_name(&self) -> &str {
        &self.base_name
    }

    pub fn computer_name(&self) -> &str {
        &self.base_name
    }

    pub fn os_disk_name(&self) -> &str {
        &self.os_disk_name
    }

    pub fn has_public_ip(&self) -> bool {
        self.has_public_ip
    }
}
