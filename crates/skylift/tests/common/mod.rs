//! In-memory cloud facade for orchestrator tests.
//!
//! Applies every mutation at the moment the call is issued and returns an
//! already-completed handle, while appending one line per call to an
//! ordered event log. Tests assert lifecycle ordering and provider-side
//! state from that log.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use skylift_cloud::{
    CloudClients, CloudError, ComputeApi, NetworkApi, NetworkInterfaceDescriptor,
    NetworkInterfaceSpec, OperationHandle, PublicIpDescriptor, PublicIpSpec, ResourceDescriptor,
    ResourceGroupApi, ResourceGroupSpec, StorageAccountSpec, StorageApi, SubnetDescriptor,
    VirtualMachineSpec, VirtualNetworkSpec,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Group,
    Storage,
    Vnet,
    PublicIp,
    Nic,
    Vm,
    Nsg,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Group => "group",
            Kind::Storage => "storage",
            Kind::Vnet => "vnet",
            Kind::PublicIp => "public-ip",
            Kind::Nic => "nic",
            Kind::Vm => "vm",
            Kind::Nsg => "nsg",
        }
    }
}

#[derive(Default)]
struct State {
    events: Vec<String>,
    resources: HashMap<(Kind, String), String>,
    vm_specs: HashMap<String, VirtualMachineSpec>,
    fail_on: HashSet<String>,
    next_address: u8,
}

/// Shared fake implementing all four facade surfaces.
#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<State>,
}

impl FakeCloud {
    pub fn clients(self: &Arc<Self>) -> CloudClients {
        CloudClients {
            resources: self.clone(),
            storage: self.clone(),
            network: self.clone(),
            compute: self.clone(),
        }
    }

    /// Make the call whose event line equals `event` fail once issued.
    pub fn fail_on(&self, event: &str) {
        self.state.lock().unwrap().fail_on.insert(event.to_string());
    }

    /// Insert a provider-side resource without going through the facade,
    /// as if another process had created it.
    pub fn seed(&self, kind: Kind, name: &str) {
        let mut state = self.state.lock().unwrap();
        let id = format!("/fake/{}/{}", kind.label(), name);
        state.resources.insert((kind, name.to_string()), id);
    }

    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn has(&self, kind: Kind, name: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .resources
            .contains_key(&(kind, name.to_string()))
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.state
            .lock()
            .unwrap()
            .resources
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn names(&self, kind: Kind) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .lock()
            .unwrap()
            .resources
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, n)| n.clone())
            .collect();
        names.sort();
        names
    }

    pub fn vm_spec(&self, name: &str) -> Option<VirtualMachineSpec> {
        self.state.lock().unwrap().vm_specs.get(name).cloned()
    }

    /// Position of `event` in the log; panics if it never happened.
    pub fn event_index(&self, event: &str) -> usize {
        let state = self.state.lock().unwrap();
        state
            .events
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("event {event:?} not in log: {:?}", state.events))
    }

    fn record(&self, event: String) -> Result<(), CloudError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(event.clone());
        if state.fail_on.remove(&event) {
            return Err(CloudError::ApiError(format!("injected failure: {event}")));
        }
        Ok(())
    }

    fn create(&self, kind: Kind, name: &str) -> Result<OperationHandle, CloudError> {
        self.record(format!("create {} {}", kind.label(), name))?;
        let mut state = self.state.lock().unwrap();
        let id = format!("/fake/{}/{}", kind.label(), name);
        state.resources.insert((kind, name.to_string()), id);
        Ok(OperationHandle::ready(Ok(())))
    }

    fn delete(&self, kind: Kind, name: &str) -> Result<OperationHandle, CloudError> {
        self.record(format!("delete {} {}", kind.label(), name))?;
        let mut state = self.state.lock().unwrap();
        // Deleting an absent resource is a no-op, per the facade contract.
        state.resources.remove(&(kind, name.to_string()));
        Ok(OperationHandle::ready(Ok(())))
    }

    fn list(&self, kind: Kind) -> Result<Vec<ResourceDescriptor>, CloudError> {
        self.record(format!("list {}", kind.label()))?;
        let state = self.state.lock().unwrap();
        let mut listed: Vec<ResourceDescriptor> = state
            .resources
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|((_, name), id)| ResourceDescriptor {
                id: id.clone(),
                name: name.clone(),
            })
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }

    fn require(&self, kind: Kind, name: &str) -> Result<String, CloudError> {
        let state = self.state.lock().unwrap();
        state
            .resources
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| CloudError::ResourceNotFound(format!("{} {}", kind.label(), name)))
    }

    fn next_address(&self) -> u8 {
        let mut state = self.state.lock().unwrap();
        state.next_address += 1;
        state.next_address
    }
}

#[async_trait]
impl ResourceGroupApi for FakeCloud {
    async fn create_or_update(
        &self,
        name: &str,
        _spec: &ResourceGroupSpec,
    ) -> Result<OperationHandle, CloudError> {
        self.create(Kind::Group, name)
    }
}

#[async_trait]
impl StorageApi for FakeCloud {
    async fn create_or_update_account(
        &self,
        _group: &str,
        name: &str,
        _spec: &StorageAccountSpec,
    ) -> Result<OperationHandle, CloudError> {
        self.create(Kind::Storage, name)
    }
}

#[async_trait]
impl NetworkApi for FakeCloud {
    async fn create_or_update_virtual_network(
        &self,
        _group: &str,
        name: &str,
        _spec: &VirtualNetworkSpec,
    ) -> Result<OperationHandle, CloudError> {
        self.create(Kind::Vnet, name)
    }

    async fn get_subnet(
        &self,
        _group: &str,
        vnet: &str,
        name: &str,
    ) -> Result<SubnetDescriptor, CloudError> {
        self.record(format!("get subnet {name}"))?;
        Ok(SubnetDescriptor {
            id: format!("/fake/vnet/{vnet}/subnet/{name}"),
        })
    }

    async fn create_or_update_public_ip(
        &self,
        _group: &str,
        name: &str,
        _spec: &PublicIpSpec,
    ) -> Result<OperationHandle, CloudError> {
        self.create(Kind::PublicIp, name)
    }

    async fn get_public_ip(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<PublicIpDescriptor, CloudError> {
        self.record(format!("get public-ip {name}"))?;
        let id = self.require(Kind::PublicIp, name)?;
        Ok(PublicIpDescriptor {
            id,
            ip_address: Some(format!("203.0.113.{}", self.next_address())),
        })
    }

    async fn delete_public_ip(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<OperationHandle, CloudError> {
        self.delete(Kind::PublicIp, name)
    }

    async fn list_public_ips(&self, _group: &str) -> Result<Vec<ResourceDescriptor>, CloudError> {
        self.list(Kind::PublicIp)
    }

    async fn create_or_update_interface(
        &self,
        _group: &str,
        name: &str,
        _spec: &NetworkInterfaceSpec,
    ) -> Result<OperationHandle, CloudError> {
        self.create(Kind::Nic, name)
    }

    async fn get_interface(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<NetworkInterfaceDescriptor, CloudError> {
        self.record(format!("get nic {name}"))?;
        let id = self.require(Kind::Nic, name)?;
        Ok(NetworkInterfaceDescriptor {
            id,
            private_ip_address: Some(format!("10.0.0.{}", self.next_address())),
        })
    }

    async fn delete_interface(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<OperationHandle, CloudError> {
        self.delete(Kind::Nic, name)
    }

    async fn list_interfaces(&self, _group: &str) -> Result<Vec<ResourceDescriptor>, CloudError> {
        self.list(Kind::Nic)
    }

    async fn delete_security_group(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<OperationHandle, CloudError> {
        self.delete(Kind::Nsg, name)
    }

    async fn list_security_groups(
        &self,
        _group: &str,
    ) -> Result<Vec<ResourceDescriptor>, CloudError> {
        self.list(Kind::Nsg)
    }
}

#[async_trait]
impl ComputeApi for FakeCloud {
    async fn create_or_update_virtual_machine(
        &self,
        _group: &str,
        name: &str,
        spec: &VirtualMachineSpec,
    ) -> Result<OperationHandle, CloudError> {
        let handle = self.create(Kind::Vm, name)?;
        self.state
            .lock()
            .unwrap()
            .vm_specs
            .insert(name.to_string(), spec.clone());
        Ok(handle)
    }

    async fn delete_virtual_machine(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<OperationHandle, CloudError> {
        self.delete(Kind::Vm, name)
    }

    async fn list_virtual_machines(
        &self,
        _group: &str,
    ) -> Result<Vec<ResourceDescriptor>, CloudError> {
        self.list(Kind::Vm)
    }
}

/// Config pointing at the fake environment.
pub fn test_config() -> skylift::CloudConfig {
    skylift::CloudConfig {
        subscription_id: "fake-subscription".to_string(),
        group_name: "test-rg".to_string(),
        storage_name: "teststore".to_string(),
        virtual_network_name: "test-vnet".to_string(),
        subnet_name: "default".to_string(),
        region: "westeurope".to_string(),
        vm_size: "Standard_D1".to_string(),
        admin_username: "ops".to_string(),
        image: skylift::ImageSource::Marketplace {
            publisher: "Canonical".to_string(),
            offer: "UbuntuServer".to_string(),
            sku: "22.04-LTS".to_string(),
            version: "latest".to_string(),
        },
        tags: Vec::new(),
    }
}
