//! Capability traits for the external collaborators
//!
//! The control plane works through these interfaces ONLY - never concrete
//! types. The in-memory implementations live in cumulus-sim; a real
//! deployment could back them with actual cloud clients.

use async_trait::async_trait;

use crate::error::CumulusError;
use crate::types::*;

/// Result type for Cumulus operations
pub type Result<T> = std::result::Result<T, CumulusError>;

/// Instance inventory: launch, terminate, enumerate.
///
/// Terminated instances stay enumerable; termination only flips their state.
#[async_trait]
pub trait InstanceFleet: Send + Sync {
    /// Launch `request.count` instances; returns the new ids in launch order
    async fn launch_instances(&self, request: &LaunchRequest) -> Result<Vec<InstanceId>>;

    /// Mark the given instances terminated
    async fn terminate_instances(&self, ids: &[InstanceId]) -> Result<()>;

    /// Snapshot of every instance ever launched, including terminated ones
    async fn describe_instances(&self) -> Result<Vec<Instance>>;
}

/// Container-cluster registry backing compute environments
#[async_trait]
pub trait ClusterRegistry: Send + Sync {
    /// Create a cluster; cluster names are unique within the registry
    async fn create_cluster(&self, name: &str) -> Result<Cluster>;

    /// Remove a cluster entirely; it is no longer listed afterwards
    async fn delete_cluster(&self, arn: &ClusterArn) -> Result<()>;

    /// Snapshot of the live clusters
    async fn list_clusters(&self) -> Result<Vec<Cluster>>;
}

/// Identity role store
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Register a role and return its ARN
    async fn create_role(&self, name: &str) -> Result<String>;

    /// Resolve a role name or ARN to its canonical ARN
    async fn resolve_role(&self, name_or_arn: &str) -> Result<String>;
}

/// Instance type to vCPU size lookup used by the capacity planner
pub trait InstanceTypeCatalog: Send + Sync {
    /// vCPU count for a known instance type, `None` for unknown types
    fn vcpus(&self, instance_type: &str) -> Option<u32>;
}
