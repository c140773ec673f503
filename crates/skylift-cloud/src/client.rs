//! Facade traits over the provider management surfaces
//!
//! One trait per management surface (resource groups, storage, network,
//! compute). Create and delete calls return an [`OperationHandle`]; `get`
//! calls return typed descriptors; `list` calls return the resources
//! currently in a group as observed by the provider.
//!
//! Deleting a resource that does not exist must complete without error:
//! the orchestrator relies on this when tearing down an instance that was
//! created without a public IP.

use crate::error::Result;
use crate::model::{
    NetworkInterfaceDescriptor, NetworkInterfaceSpec, PublicIpDescriptor, PublicIpSpec,
    ResourceDescriptor, ResourceGroupSpec, StorageAccountSpec, SubnetDescriptor,
    VirtualMachineSpec, VirtualNetworkSpec,
};
use crate::operation::OperationHandle;
use async_trait::async_trait;
use std::sync::Arc;

/// Resource group management surface
#[async_trait]
pub trait ResourceGroupApi: Send + Sync {
    async fn create_or_update(&self, name: &str, spec: &ResourceGroupSpec)
    -> Result<OperationHandle>;
}

/// Storage account management surface
#[async_trait]
pub trait StorageApi: Send + Sync {
    async fn create_or_update_account(
        &self,
        group: &str,
        name: &str,
        spec: &StorageAccountSpec,
    ) -> Result<OperationHandle>;
}

/// Network management surface: virtual networks, subnets, public IPs,
/// network interfaces and security groups.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    async fn create_or_update_virtual_network(
        &self,
        group: &str,
        name: &str,
        spec: &VirtualNetworkSpec,
    ) -> Result<OperationHandle>;

    async fn get_subnet(&self, group: &str, vnet: &str, name: &str) -> Result<SubnetDescriptor>;

    async fn create_or_update_public_ip(
        &self,
        group: &str,
        name: &str,
        spec: &PublicIpSpec,
    ) -> Result<OperationHandle>;
    async fn get_public_ip(&self, group: &str, name: &str) -> Result<PublicIpDescriptor>;
    async fn delete_public_ip(&self, group: &str, name: &str) -> Result<OperationHandle>;
    async fn list_public_ips(&self, group: &str) -> Result<Vec<ResourceDescriptor>>;

    async fn create_or_update_interface(
        &self,
        group: &str,
        name: &str,
        spec: &NetworkInterfaceSpec,
    ) -> Result<OperationHandle>;
    async fn get_interface(&self, group: &str, name: &str) -> Result<NetworkInterfaceDescriptor>;
    async fn delete_interface(&self, group: &str, name: &str) -> Result<OperationHandle>;
    async fn list_interfaces(&self, group: &str) -> Result<Vec<ResourceDescriptor>>;

    async fn delete_security_group(&self, group: &str, name: &str) -> Result<OperationHandle>;
    async fn list_security_groups(&self, group: &str) -> Result<Vec<ResourceDescriptor>>;
}

/// Compute management surface
#[async_trait]
pub trait ComputeApi: Send + Sync {
    async fn create_or_update_virtual_machine(
        &self,
        group: &str,
        name: &str,
        spec: &VirtualMachineSpec,
    ) -> Result<OperationHandle>;
    async fn delete_virtual_machine(&self, group: &str, name: &str) -> Result<OperationHandle>;
    async fn list_virtual_machines(&self, group: &str) -> Result<Vec<ResourceDescriptor>>;
}

/// Bundle of the four management surfaces a provider exposes
#[derive(Clone)]
pub struct CloudClients {
    pub resources: Arc<dyn ResourceGroupApi>,
    pub storage: Arc<dyn StorageApi>,
    pub network: Arc<dyn NetworkApi>,
    pub compute: Arc<dyn ComputeApi>,
}
