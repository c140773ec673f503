//! Skylift cloud facade
//!
//! This crate defines the boundary between the Skylift orchestrator and a
//! cloud provider's management APIs: typed resource specifications, the
//! descriptors read back from the provider, a handle type for long-running
//! operations, and one capability trait per management surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 skylift CLI                      │
//! │           (setup / create / reap)                │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                  skylift                         │
//! │   orchestrator / registry / bulk reaper          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               skylift-cloud                      │
//! │  trait ResourceGroupApi / StorageApi /           │
//! │        NetworkApi / ComputeApi                   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!         ┌─────────▼─────────┐
//!         │ skylift-cloud-azure│
//!         │   (az CLI wrapper) │
//!         └────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod operation;

// Re-exports
pub use client::{CloudClients, ComputeApi, NetworkApi, ResourceGroupApi, StorageApi};
pub use error::{CloudError, Result};
pub use model::{
    DiskCaching, DiskCreateOption, HardwareProfile, ImageReference, IpAllocation, IpConfiguration,
    NetworkInterfaceDescriptor, NetworkInterfaceSpec, NetworkProfile, OsDisk, OsProfile, OsType,
    PublicIpDescriptor, PublicIpSpec, ResourceDescriptor, ResourceGroupSpec, SshPublicKey,
    StorageAccountSpec, StorageProfile, StorageSku, SubnetDescriptor, SubnetSpec,
    VirtualMachineSpec, VirtualNetworkSpec,
};
pub use operation::OperationHandle;
