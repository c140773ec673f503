//! Facade trait implementations over the az CLI
//!
//! Every create/delete call is spawned into an [`OperationHandle`], so a
//! batch of deletes issued by the reaper runs concurrently. `az` itself
//! blocks until the underlying long-running operation completes, which
//! gives the wait-for-completion semantics the orchestrator expects.
//! Deleting an absent network resource exits zero on the az side, matching
//! the facade contract.

use crate::azcli::AzCli;
use async_trait::async_trait;
use serde::Deserialize;
use skylift_cloud::{
    CloudClients, ComputeApi, NetworkApi, NetworkInterfaceDescriptor, NetworkInterfaceSpec,
    OperationHandle, PublicIpDescriptor, PublicIpSpec, ResourceDescriptor, ResourceGroupApi,
    ResourceGroupSpec, Result, StorageAccountSpec, StorageApi, SubnetDescriptor,
    VirtualMachineSpec, VirtualNetworkSpec,
};
use std::sync::Arc;

/// Azure implementation of the four management surfaces.
pub struct AzureCloud {
    az: AzCli,
}

impl AzureCloud {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            az: AzCli::new(subscription_id),
        }
    }

    /// Bundle this provider into the client set the orchestrator takes.
    pub fn into_clients(self) -> CloudClients {
        let this = Arc::new(self);
        CloudClients {
            resources: this.clone(),
            storage: this.clone(),
            network: this.clone(),
            compute: this,
        }
    }

    fn spawn(&self, args: Vec<String>) -> OperationHandle {
        let az = self.az.clone();
        OperationHandle::spawn(async move { az.run(args).await.map(|_| ()) })
    }
}

fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

fn group_create_args(name: &str, spec: &ResourceGroupSpec) -> Vec<String> {
    to_args(&["group", "create", "--name", name, "--location", &spec.location])
}

fn storage_create_args(group: &str, name: &str, spec: &StorageAccountSpec) -> Vec<String> {
    to_args(&[
        "storage",
        "account",
        "create",
        "--resource-group",
        group,
        "--name",
        name,
        "--location",
        &spec.location,
        "--sku",
        &spec.sku.to_string(),
    ])
}

fn vnet_create_args(group: &str, name: &str, spec: &VirtualNetworkSpec) -> Vec<String> {
    let mut args = to_args(&[
        "network",
        "vnet",
        "create",
        "--resource-group",
        group,
        "--name",
        name,
        "--location",
        &spec.location,
        "--address-prefixes",
    ]);
    args.extend(spec.address_prefixes.iter().cloned());
    if let Some(subnet) = spec.subnets.first() {
        args.extend(to_args(&[
            "--subnet-name",
            &subnet.name,
            "--subnet-prefixes",
            &subnet.address_prefix,
        ]));
    }
    args
}

fn public_ip_create_args(group: &str, name: &str, spec: &PublicIpSpec) -> Vec<String> {
    to_args(&[
        "network",
        "public-ip",
        "create",
        "--resource-group",
        group,
        "--name",
        name,
        "--location",
        &spec.location,
        "--allocation-method",
        &spec.allocation.to_string(),
        "--idle-timeout",
        &spec.idle_timeout_minutes.to_string(),
    ])
}

fn interface_create_args(group: &str, name: &str, spec: &NetworkInterfaceSpec) -> Vec<String> {
    let ipcfg = &spec.ip_configuration;
    let mut args = to_args(&[
        "network",
        "nic",
        "create",
        "--resource-group",
        group,
        "--name",
        name,
        "--location",
        &spec.location,
        "--subnet",
        &ipcfg.subnet_id,
        "--private-ip-address-allocation",
        &ipcfg.private_allocation.to_string(),
    ]);
    if let Some(public_ip_id) = &ipcfg.public_ip_id {
        args.extend(to_args(&["--public-ip-address", public_ip_id]));
    }
    args
}

fn vm_create_args(group: &str, name: &str, spec: &VirtualMachineSpec) -> Vec<String> {
    let os = &spec.os_profile;
    let disk = &spec.storage_profile.os_disk;
    let mut args = to_args(&[
        "vm",
        "create",
        "--resource-group",
        group,
        "--name",
        name,
        "--size",
        &spec.hardware_profile.vm_size,
        "--admin-username",
        &os.admin_username,
        "--computer-name",
        &os.computer_name,
        "--os-disk-name",
        &disk.name,
        "--use-unmanaged-disk",
    ]);
    if let Some(account) = storage_account_from_uri(&disk.vhd_uri) {
        args.extend(to_args(&["--storage-account", account]));
    }
    for key in &os.ssh_public_keys {
        args.extend(to_args(&["--ssh-key-values", &key.key_data]));
    }
    for nic_id in &spec.network_profile.network_interface_ids {
        args.extend(to_args(&["--nics", nic_id]));
    }
    match (&spec.storage_profile.image_reference, &disk.image_uri) {
        (Some(image), _) => {
            let urn = format!(
                "{}:{}:{}:{}",
                image.publisher, image.offer, image.sku, image.version
            );
            args.extend(to_args(&["--image", &urn]));
        }
        (None, Some(image_uri)) => {
            args.extend(to_args(&["--image", image_uri]));
        }
        (None, None) => {}
    }
    if !spec.tags.is_empty() {
        args.push("--tags".to_string());
        args.extend(spec.tags.iter().map(|(k, v)| format!("{k}={v}")));
    }
    args
}

/// Account name out of a blob URI like `https://acct.blob.core.windows.net/...`.
fn storage_account_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix("https://")?.split('.').next()
}

#[derive(Debug, Deserialize)]
struct AzResource {
    id: String,
    name: String,
}

impl From<AzResource> for ResourceDescriptor {
    fn from(r: AzResource) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AzSubnet {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AzPublicIp {
    id: String,
    #[serde(rename = "ipAddress")]
    ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzNic {
    id: String,
    #[serde(rename = "ipConfigurations", default)]
    ip_configurations: Vec<AzIpConfiguration>,
}

#[derive(Debug, Deserialize)]
struct AzIpConfiguration {
    #[serde(rename = "privateIpAddress")]
    private_ip_address: Option<String>,
}

#[async_trait]
impl ResourceGroupApi for AzureCloud {
    async fn create_or_update(
        &self,
        name: &str,
        spec: &ResourceGroupSpec,
    ) -> Result<OperationHandle> {
        Ok(self.spawn(group_create_args(name, spec)))
    }
}

#[async_trait]
impl StorageApi for AzureCloud {
    async fn create_or_update_account(
        &self,
        group: &str,
        name: &str,
        spec: &StorageAccountSpec,
    ) -> Result<OperationHandle> {
        Ok(self.spawn(storage_create_args(group, name, spec)))
    }
}

#[async_trait]
impl NetworkApi for AzureCloud {
    async fn create_or_update_virtual_network(
        &self,
        group: &str,
        name: &str,
        spec: &VirtualNetworkSpec,
    ) -> Result<OperationHandle> {
        Ok(self.spawn(vnet_create_args(group, name, spec)))
    }

    async fn get_subnet(&self, group: &str, vnet: &str, name: &str) -> Result<SubnetDescriptor> {
        let subnet: AzSubnet = self
            .az
            .run_json(to_args(&[
                "network",
                "vnet",
                "subnet",
                "show",
                "--resource-group",
                group,
                "--vnet-name",
                vnet,
                "--name",
                name,
            ]))
            .await?;
        Ok(SubnetDescriptor { id: subnet.id })
    }

    async fn create_or_update_public_ip(
        &self,
        group: &str,
        name: &str,
        spec: &PublicIpSpec,
    ) -> Result<OperationHandle> {
        Ok(self.spawn(public_ip_create_args(group, name, spec)))
    }

    async fn get_public_ip(&self, group: &str, name: &str) -> Result<PublicIpDescriptor> {
        let ip: AzPublicIp = self
            .az
            .run_json(to_args(&[
                "network",
                "public-ip",
                "show",
                "--resource-group",
                group,
                "--name",
                name,
            ]))
            .await?;
        Ok(PublicIpDescriptor {
            id: ip.id,
            ip_address: ip.ip_address,
        })
    }

    async fn delete_public_ip(&self, group: &str, name: &str) -> Result<OperationHandle> {
        Ok(self.spawn(to_args(&[
            "network",
            "public-ip",
            "delete",
            "--resource-group",
            group,
            "--name",
            name,
        ])))
    }

    async fn list_public_ips(&self, group: &str) -> Result<Vec<ResourceDescriptor>> {
        let listed: Vec<AzResource> = self
            .az
            .run_json(to_args(&[
                "network",
                "public-ip",
                "list",
                "--resource-group",
                group,
            ]))
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    async fn create_or_update_interface(
        &self,
        group: &str,
        name: &str,
        spec: &NetworkInterfaceSpec,
    ) -> Result<OperationHandle> {
        Ok(self.spawn(interface_create_args(group, name, spec)))
    }

    async fn get_interface(&self, group: &str, name: &str) -> Result<NetworkInterfaceDescriptor> {
        let nic: AzNic = self
            .az
            .run_json(to_args(&[
                "network",
                "nic",
                "show",
                "--resource-group",
                group,
                "--name",
                name,
            ]))
            .await?;
        let private_ip_address = nic
            .ip_configurations
            .into_iter()
            .find_map(|c| c.private_ip_address);
        Ok(NetworkInterfaceDescriptor {
            id: nic.id,
            private_ip_address,
        })
    }

    async fn delete_interface(&self, group: &str, name: &str) -> Result<OperationHandle> {
        Ok(self.spawn(to_args(&[
            "network",
            "nic",
            "delete",
            "--resource-group",
            group,
            "--name",
            name,
        ])))
    }

    async fn list_interfaces(&self, group: &str) -> Result<Vec<ResourceDescriptor>> {
        let listed: Vec<AzResource> = self
            .az
            .run_json(to_args(&[
                "network",
                "nic",
                "list",
                "--resource-group",
                group,
            ]))
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    async fn delete_security_group(&self, group: &str, name: &str) -> Result<OperationHandle> {
        Ok(self.spawn(to_args(&[
            "network",
            "nsg",
            "delete",
            "--resource-group",
            group,
            "--name",
            name,
        ])))
    }

    async fn list_security_groups(&self, group: &str) -> Result<Vec<ResourceDescriptor>> {
        let listed: Vec<AzResource> = self
            .az
            .run_json(to_args(&[
                "network",
                "nsg",
                "list",
                "--resource-group",
                group,
            ]))
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ComputeApi for AzureCloud {
    async fn create_or_update_virtual_machine(
        &self,
        group: &str,
        name: &str,
        spec: &VirtualMachineSpec,
    ) -> Result<OperationHandle> {
        Ok(self.spawn(vm_create_args(group, name, spec)))
    }

    async fn delete_virtual_machine(&self, group: &str, name: &str) -> Result<OperationHandle> {
        Ok(self.spawn(to_args(&[
            "vm",
            "delete",
            "--resource-group",
            group,
            "--name",
            name,
            "--yes",
        ])))
    }

    async fn list_virtual_machines(&self, group: &str) -> Result<Vec<ResourceDescriptor>> {
        let listed: Vec<AzResource> = self
            .az
            .run_json(to_args(&["vm", "list", "--resource-group", group]))
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }
}
