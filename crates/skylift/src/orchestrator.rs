//! Instance orchestrator
//!
//! Sequences the dependent provider operations that make up one instance's
//! lifecycle. Creation runs public IP → network interface → VM, each step
//! waited on before the next because each later step consumes an identifier
//! produced by an earlier one; deletion runs the strict reverse. The
//! orchestrator owns the registry of live instances; independent instances
//! may be driven concurrently from separate tasks.
//!
//! Partial failures are left as-is: no rollback of already-created
//! resources and no retry of remaining delete steps. The registry reflects
//! that an operation was attempted, and [`delete_all`] can sweep leftovers
//! later.
//!
//! [`delete_all`]: InstanceOrchestrator::delete_all

use crate::config::{CloudConfig, ImageSource};
use crate::error::{Error, Result};
use crate::instance::Instance;
use skylift_cloud::{
    CloudClients, DiskCaching, DiskCreateOption, HardwareProfile, ImageReference, IpAllocation,
    IpConfiguration, NetworkInterfaceSpec, NetworkProfile, OsDisk, OsProfile, OsType, PublicIpSpec,
    ResourceGroupSpec, SshPublicKey, StorageAccountSpec, StorageProfile, StorageSku, SubnetSpec,
    VirtualMachineSpec, VirtualNetworkSpec,
};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;

const IP_CONFIGURATION_NAME: &str = "default";
const PUBLIC_IP_IDLE_TIMEOUT_MINUTES: u32 = 4;
const VNET_ADDRESS_SPACE: &str = "10.0.0.0/16";
const SUBNET_ADDRESS_PREFIX: &str = "10.0.0.0/24";
const BLOB_ENDPOINT_SUFFIX: &str = "blob.core.windows.net";

/// Provisions and tears down instances against a set of cloud clients.
///
/// Owns the instance registry exclusively; construct one per configuration
/// rather than sharing process-wide state.
pub struct InstanceOrchestrator {
    config: CloudConfig,
    clients: CloudClients,
    registry: Mutex<HashMap<String, Instance>>,
}

impl InstanceOrchestrator {
    pub fn new(config: CloudConfig, clients: CloudClients) -> Self {
        Self {
            config,
            clients,
            registry: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Ensure the resource group, storage account and virtual network with
    /// its subnet exist. Safe to run repeatedly: every step is a provider
    /// create-or-update. No rollback on failure; the environment is meant
    /// to be long-lived.
    pub async fn ensure_environment(&self) -> Result<()> {
        let cfg = &self.config;
        tracing::info!("Ensuring environment in resource group {}", cfg.group_name);

        self.clients
            .resources
            .create_or_update(
                &cfg.group_name,
                &ResourceGroupSpec {
                    location: cfg.region.clone(),
                },
            )
            .await?
            .wait()
            .await?;

        self.clients
            .storage
            .create_or_update_account(
                &cfg.group_name,
                &cfg.storage_name,
                &StorageAccountSpec {
                    location: cfg.region.clone(),
                    sku: StorageSku::StandardLrs,
                },
            )
            .await?
            .wait()
            .await?;

        self.clients
            .network
            .create_or_update_virtual_network(
                &cfg.group_name,
                &cfg.virtual_network_name,
                &VirtualNetworkSpec {
                    location: cfg.region.clone(),
                    address_prefixes: vec![VNET_ADDRESS_SPACE.to_string()],
                    subnets: vec![SubnetSpec {
                        name: cfg.subnet_name.clone(),
                        address_prefix: SUBNET_ADDRESS_PREFIX.to_string(),
                    }],
                },
            )
            .await?
            .wait()
            .await?;

        Ok(())
    }

    /// Create one instance: public IP (optional) → network interface → VM.
    ///
    /// The registry entry is inserted before the first provider call, so a
    /// failure partway through leaves the record in place alongside the
    /// partially-created resources. A name already in the registry is
    /// rejected before anything is created.
    pub async fn create_instance(
        &self,
        name: &str,
        key_data: &str,
        tags: &[String],
        has_public_ip: bool,
    ) -> Result<()> {
        tracing::debug!("Preparing to create instance: {name}");
        let instance = Instance::new(name, has_public_ip);
        {
            let mut registry = self.registry.lock().await;
            if registry.contains_key(name) {
                return Err(Error::InstanceAlreadyExists(name.to_string()));
            }
            registry.insert(name.to_string(), instance.clone());
        }

        let cfg = &self.config;
        let group = &cfg.group_name;

        // 1. Public IP, then read back its provider-assigned id.
        let mut public_ip_id = None;
        if has_public_ip {
            self.clients
                .network
                .create_or_update_public_ip(
                    group,
                    instance.public_ip_address_name(),
                    &PublicIpSpec {
                        location: cfg.region.clone(),
                        allocation: IpAllocation::Dynamic,
                        idle_timeout_minutes: PUBLIC_IP_IDLE_TIMEOUT_MINUTES,
                    },
                )
                .await?
                .wait()
                .await?;

            let public_ip = self
                .clients
                .network
                .get_public_ip(group, instance.public_ip_address_name())
                .await?;
            public_ip_id = Some(public_ip.id);
        }

        // 2. IP configuration referencing the target subnet.
        let subnet = self
            .clients
            .network
            .get_subnet(group, &cfg.virtual_network_name, &cfg.subnet_name)
            .await?;

        // 3. Network interface, then read back its id.
        self.clients
            .network
            .create_or_update_interface(
                group,
                instance.network_interface_name(),
                &NetworkInterfaceSpec {
                    location: cfg.region.clone(),
                    ip_configuration: IpConfiguration {
                        name: IP_CONFIGURATION_NAME.to_string(),
                        private_allocation: IpAllocation::Dynamic,
                        subnet_id: subnet.id,
                        public_ip_id,
                    },
                },
            )
            .await?
            .wait()
            .await?;

        let interface = self
            .clients
            .network
            .get_interface(group, instance.network_interface_name())
            .await?;

        // 4. Virtual machine referencing the interface.
        tracing::debug!("Creating VM: {name}");
        let vm_spec = self.build_vm_spec(&instance, key_data, tags, &interface.id);
        self.clients
            .compute
            .create_or_update_virtual_machine(group, instance.vm_name(), &vm_spec)
            .await?
            .wait()
            .await?;
        tracing::debug!("VM created: {name}");

        Ok(())
    }

    /// [`create_instance`] with the public key read from a file.
    ///
    /// [`create_instance`]: InstanceOrchestrator::create_instance
    pub async fn create_instance_from_key_path(
        &self,
        name: &str,
        key_path: impl AsRef<Path>,
        tags: &[String],
        has_public_ip: bool,
    ) -> Result<()> {
        let key_data = tokio::fs::read_to_string(key_path).await?;
        self.create_instance(name, &key_data, tags, has_public_ip)
            .await
    }

    /// Register an instance that already exists in the cloud without
    /// provisioning anything, so a fresh registry can delete it or resolve
    /// its addresses. The record gets a fresh os-disk token, which is only
    /// consulted during creation. A name already in the registry is
    /// rejected, same as [`create_instance`].
    ///
    /// [`create_instance`]: InstanceOrchestrator::create_instance
    pub async fn adopt_instance(&self, name: &str, has_public_ip: bool) -> Result<()> {
        let mut registry = self.registry.lock().await;
        if registry.contains_key(name) {
            return Err(Error::InstanceAlreadyExists(name.to_string()));
        }
        registry.insert(name.to_string(), Instance::new(name, has_public_ip));
        Ok(())
    }

    /// Delete one instance in reverse dependency order: VM, then network
    /// interface, then public IP. The public IP delete is always attempted;
    /// the facade treats deleting an absent resource as a no-op. The
    /// registry entry is removed only after all three steps complete.
    pub async fn delete_instance(&self, name: &str) -> Result<()> {
        tracing::debug!("Deleting instance: {name}");
        let instance = {
            let registry = self.registry.lock().await;
            registry
                .get(name)
                .cloned()
                .ok_or_else(|| Error::InstanceNotFound(name.to_string()))?
        };
        let group = &self.config.group_name;

        self.clients
            .compute
            .delete_virtual_machine(group, instance.vm_name())
            .await?
            .wait()
            .await?;

        self.clients
            .network
            .delete_interface(group, instance.network_interface_name())
            .await?
            .wait()
            .await?;

        self.clients
            .network
            .delete_public_ip(group, instance.public_ip_address_name())
            .await?
            .wait()
            .await?;

        self.registry.lock().await.remove(name);
        tracing::debug!("Instance deleted: {name}");
        Ok(())
    }

    /// Read the private address of the instance's network interface from
    /// the provider. Never cached: dynamically allocated addresses are only
    /// stable once creation completes.
    pub async fn get_private_address(&self, name: &str) -> Result<String> {
        let instance = self.lookup(name).await?;
        let interface = self
            .clients
            .network
            .get_interface(&self.config.group_name, instance.network_interface_name())
            .await?;
        Ok(interface.private_ip_address.unwrap_or_default())
    }

    /// Read the instance's public address from the provider. Returns an
    /// empty string without a provider call when the instance was created
    /// without a public IP.
    pub async fn get_public_address(&self, name: &str) -> Result<String> {
        let instance = self.lookup(name).await?;
        if !instance.has_public_ip() {
            return Ok(String::new());
        }
        let public_ip = self
            .clients
            .network
            .get_public_ip(&self.config.group_name, instance.public_ip_address_name())
            .await?;
        Ok(public_ip.ip_address.unwrap_or_default())
    }

    /// Whether `name` is currently registered (live or in-flight).
    pub async fn is_registered(&self, name: &str) -> bool {
        self.registry.lock().await.contains_key(name)
    }

    /// Snapshot of all registered instances.
    pub async fn instances(&self) -> Vec<Instance> {
        self.registry.lock().await.values().cloned().collect()
    }

    pub(crate) fn clients(&self) -> &CloudClients {
        &self.clients
    }

    async fn lookup(&self, name: &str) -> Result<Instance> {
        self.registry
            .lock()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::InstanceNotFound(name.to_string()))
    }

    fn build_vm_spec(
        &self,
        instance: &Instance,
        key_data: &str,
        tags: &[String],
        interface_id: &str,
    ) -> VirtualMachineSpec {
        let cfg = &self.config;

        let tags = cfg
            .tags
            .iter()
            .chain(tags)
            .map(|t| (t.clone(), t.clone()))
            .collect();

        let (image_reference, os_disk) = match &cfg.image {
            ImageSource::Marketplace {
                publisher,
                offer,
                sku,
                version,
            } => (
                Some(ImageReference {
                    publisher: publisher.clone(),
                    offer: offer.clone(),
                    sku: sku.clone(),
                    version: version.clone(),
                }),
                OsDisk {
                    name: instance.os_disk_name().to_string(),
                    caching: DiskCaching::None,
                    create_option: DiskCreateOption::FromImage,
                    vhd_uri: self.os_disk_uri(instance),
                    image_uri: None,
                    os_type: None,
                },
            ),
            ImageSource::TemplateVhd { vhd } => (
                None,
                OsDisk {
                    name: vhd.clone(),
                    caching: DiskCaching::None,
                    create_option: DiskCreateOption::FromImage,
                    vhd_uri: self.os_disk_uri(instance),
                    image_uri: Some(format!(
                        "https://{}.{}/system/Microsoft.Compute/Images/vhds/{}",
                        cfg.storage_name, BLOB_ENDPOINT_SUFFIX, vhd
                    )),
                    os_type: Some(OsType::Linux),
                },
            ),
        };

        VirtualMachineSpec {
            location: cfg.region.clone(),
            tags,
            os_profile: OsProfile {
                computer_name: instance.computer_name().to_string(),
                admin_username: cfg.admin_username.clone(),
                disable_password_authentication: true,
                ssh_public_keys: vec![SshPublicKey {
                    path: format!("/home/{}/.ssh/authorized_keys", cfg.admin_username),
                    key_data: key_data.to_string(),
                }],
            },
            hardware_profile: HardwareProfile {
                vm_size: cfg.vm_size.clone(),
            },
            network_profile: NetworkProfile {
                network_interface_ids: vec![interface_id.to_string()],
            },
            storage_profile: StorageProfile {
                os_disk,
                image_reference,
            },
        }
    }

    /// Per-instance blob the new OS disk is written to.
    fn os_disk_uri(&self, instance: &Instance) -> String {
        format!(
            "https://{}.{}/vhds/{}.vhd",
            self.config.storage_name,
            BLOB_ENDPOINT_SUFFIX,
            instance.os_disk_name()
        )
    }
}
