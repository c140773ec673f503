//! Bulk reaper
//!
//! Deletes resources from provider-side listings rather than the local
//! registry, so it also catches instances created by other processes or
//! left behind by failed lifecycles. Categories are processed in
//! dependency order (VMs, security groups, network interfaces, public IPs);
//! within a category every delete is fired first and all handles are then
//! awaited together.

use crate::error::Result;
use crate::orchestrator::InstanceOrchestrator;
use futures_util::future::try_join_all;
use skylift_cloud::{OperationHandle, ResourceDescriptor};

impl InstanceOrchestrator {
    /// Delete every VM, security group, network interface and public IP in
    /// the configured resource group whose name contains `matcher`. An
    /// absent or empty matcher deletes everything in the group.
    pub async fn delete_all(&self, matcher: Option<&str>) -> Result<()> {
        let matcher = matcher.filter(|m| !m.is_empty());
        let group = &self.config().group_name;
        tracing::info!(
            "Reaping resources in {} (match: {})",
            group,
            matcher.unwrap_or("*")
        );

        let clients = self.clients();
        let virtual_machines = clients.compute.list_virtual_machines(group).await?;
        let security_groups = clients.network.list_security_groups(group).await?;
        let interfaces = clients.network.list_interfaces(group).await?;
        let public_ips = clients.network.list_public_ips(group).await?;

        let mut handles = Vec::new();
        for vm in matching(&virtual_machines, matcher) {
            tracing::debug!("Deleting vm: {}", vm.name);
            handles.push(clients.compute.delete_virtual_machine(group, &vm.name).await?);
        }
        wait_all(handles).await?;

        let mut handles = Vec::new();
        for nsg in matching(&security_groups, matcher) {
            tracing::debug!("Deleting security group: {}", nsg.name);
            handles.push(clients.network.delete_security_group(group, &nsg.name).await?);
        }
        wait_all(handles).await?;

        let mut handles = Vec::new();
        for interface in matching(&interfaces, matcher) {
            tracing::debug!("Deleting interface: {}", interface.name);
            handles.push(clients.network.delete_interface(group, &interface.name).await?);
        }
        wait_all(handles).await?;

        let mut handles = Vec::new();
        for public_ip in matching(&public_ips, matcher) {
            tracing::debug!("Deleting public ip: {}", public_ip.name);
            handles.push(clients.network.delete_public_ip(group, &public_ip.name).await?);
        }
        wait_all(handles).await?;

        Ok(())
    }
}

fn matching<'a>(
    resources: &'a [ResourceDescriptor],
    matcher: Option<&'a str>,
) -> impl Iterator<Item = &'a ResourceDescriptor> {
    resources
        .iter()
        .filter(move |r| matcher.is_none_or(|m| r.name.contains(m)))
}

async fn wait_all(handles: Vec<OperationHandle>) -> Result<()> {
    try_join_all(handles.into_iter().map(OperationHandle::wait)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(names: &[&str]) -> Vec<ResourceDescriptor> {
        names
            .iter()
            .map(|n| ResourceDescriptor {
                id: format!("/fake/{n}"),
                name: (*n).to_string(),
            })
            .collect()
    }

    #[test]
    fn matching_filters_by_substring() {
        let all = descriptors(&["batch-1", "batch-2", "other"]);
        let names: Vec<_> = matching(&all, Some("batch")).map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["batch-1", "batch-2"]);
    }

    #[test]
    fn matching_none_takes_everything() {
        let all = descriptors(&["a", "b"]);
        assert_eq!(matching(&all, None).count(), 2);
    }
}
