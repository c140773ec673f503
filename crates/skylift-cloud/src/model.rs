//! Resource specifications and descriptors
//!
//! Specs are what the orchestrator sends to a facade on create-or-update;
//! descriptors are the minimal view read back from the provider (the opaque
//! resource id plus, where applicable, an allocated address). The provider
//! resource bodies themselves are never modeled locally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// IP allocation method for public and private addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpAllocation {
    Dynamic,
    Static,
}

impl std::fmt::Display for IpAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpAllocation::Dynamic => write!(f, "Dynamic"),
            IpAllocation::Static => write!(f, "Static"),
        }
    }
}

/// Resource group specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGroupSpec {
    pub location: String,
}

/// Storage account SKU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageSku {
    StandardLrs,
    StandardGrs,
    PremiumLrs,
}

impl std::fmt::Display for StorageSku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageSku::StandardLrs => write!(f, "Standard_LRS"),
            StorageSku::StandardGrs => write!(f, "Standard_GRS"),
            StorageSku::PremiumLrs => write!(f, "Premium_LRS"),
        }
    }
}

/// Storage account specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageAccountSpec {
    pub location: String,
    pub sku: StorageSku,
}

/// Subnet within a virtual network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetSpec {
    pub name: String,
    pub address_prefix: String,
}

/// Virtual network specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualNetworkSpec {
    pub location: String,
    pub address_prefixes: Vec<String>,
    pub subnets: Vec<SubnetSpec>,
}

/// Public IP address specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIpSpec {
    pub location: String,
    pub allocation: IpAllocation,
    pub idle_timeout_minutes: u32,
}

/// IP configuration attached to a network interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpConfiguration {
    pub name: String,
    pub private_allocation: IpAllocation,
    /// Provider-assigned id of the target subnet
    pub subnet_id: String,
    /// Provider-assigned id of the public IP, if one is attached
    pub public_ip_id: Option<String>,
}

/// Network interface specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterfaceSpec {
    pub location: String,
    pub ip_configuration: IpConfiguration,
}

/// Marketplace image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

/// OS disk caching mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskCaching {
    None,
    ReadOnly,
    ReadWrite,
}

/// How the OS disk is sourced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskCreateOption {
    FromImage,
}

/// Operating system family, only needed for template-disk images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsType {
    Linux,
    Windows,
}

/// OS disk of a virtual machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsDisk {
    pub name: String,
    pub caching: DiskCaching,
    pub create_option: DiskCreateOption,
    /// Blob URI the new OS disk is written to
    pub vhd_uri: String,
    /// Source template VHD URI, when not using a marketplace image
    pub image_uri: Option<String>,
    pub os_type: Option<OsType>,
}

/// Storage profile: either `image_reference` or `os_disk.image_uri` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageProfile {
    pub os_disk: OsDisk,
    pub image_reference: Option<ImageReference>,
}

/// SSH public key installed on the admin account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshPublicKey {
    /// Target path inside the VM (authorized_keys)
    pub path: String,
    pub key_data: String,
}

/// Admin account and host naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsProfile {
    pub computer_name: String,
    pub admin_username: String,
    pub disable_password_authentication: bool,
    pub ssh_public_keys: Vec<SshPublicKey>,
}

/// VM sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub vm_size: String,
}

/// Network interfaces attached to a VM, by provider id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub network_interface_ids: Vec<String>,
}

/// Virtual machine specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMachineSpec {
    pub location: String,
    pub tags: BTreeMap<String, String>,
    pub os_profile: OsProfile,
    pub hardware_profile: HardwareProfile,
    pub network_profile: NetworkProfile,
    pub storage_profile: StorageProfile,
}

/// Minimal listing entry for any resource category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: String,
    pub name: String,
}

/// Subnet as read back from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetDescriptor {
    pub id: String,
}

/// Public IP as read back from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIpDescriptor {
    pub id: String,
    /// Unset until the provider allocates an address
    pub ip_address: Option<String>,
}

/// Network interface as read back from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterfaceDescriptor {
    pub id: String,
    /// Private address of the first IP configuration
    pub private_ip_address: Option<String>,
}
