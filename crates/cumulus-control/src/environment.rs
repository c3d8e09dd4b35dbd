//! Compute environment lifecycle
//!
//! Owns the compute-environment registry and drives the collaborators:
//! every environment gets exactly one backing cluster for its lifetime, and
//! managed environments additionally get the instances the capacity planner
//! calls for. All validation happens before the first collaborator call;
//! once side effects start there is no compensating rollback.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use cumulus_core::{
    AccountScope, ClusterArn, ClusterRegistry, ComputeResourceSpec, CumulusError, EntityState,
    EnvironmentKind, InstanceFleet, InstanceId, InstanceTypeCatalog, LaunchRequest,
    LifecycleStatus, Result, RoleStore,
};

use crate::arn::Arn;
use crate::planner::{self, CapacityPlan};

/// Ownership tag applied to every instance launched for a managed environment
pub const ENVIRONMENT_TAG_KEY: &str = "cumulus:compute-environment";

/// Backing cluster name, derived deterministically from the environment name
fn cluster_name(environment_name: &str) -> String {
    format!("{environment_name}_batch_pool")
}

/// A compute environment record.
///
/// Serializes as the describe wire shape; bookkeeping fields are skipped.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeEnvironment {
    #[serde(rename = "computeEnvironmentName")]
    pub name: String,

    #[serde(rename = "computeEnvironmentArn")]
    pub arn: String,

    #[serde(rename = "ecsClusterArn")]
    pub cluster_arn: ClusterArn,

    #[serde(rename = "type")]
    pub kind: EnvironmentKind,

    pub state: EntityState,

    pub status: LifecycleStatus,

    #[serde(rename = "computeResources", skip_serializing_if = "Option::is_none")]
    pub compute_resources: Option<ComputeResourceSpec>,

    #[serde(rename = "serviceRole")]
    pub service_role_arn: String,

    /// Instances provisioned at creation time; empty for UNMANAGED
    #[serde(skip)]
    pub instance_ids: Vec<InstanceId>,

    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl ComputeEnvironment {
    /// True when `reference` is this environment's name or ARN
    pub fn matches(&self, reference: &str) -> bool {
        self.name == reference || self.arn == reference
    }
}

/// Compute environment registry and lifecycle operations
pub struct ComputeEnvironmentManager {
    scope: AccountScope,
    fleet: Arc<dyn InstanceFleet>,
    clusters: Arc<dyn ClusterRegistry>,
    roles: Arc<dyn RoleStore>,
    catalog: Arc<dyn InstanceTypeCatalog>,
    environments: RwLock<Vec<ComputeEnvironment>>,
}

impl ComputeEnvironmentManager {
    pub fn new(
        scope: AccountScope,
        fleet: Arc<dyn InstanceFleet>,
        clusters: Arc<dyn ClusterRegistry>,
        roles: Arc<dyn RoleStore>,
        catalog: Arc<dyn InstanceTypeCatalog>,
    ) -> Self {
        Self {
            scope,
            fleet,
            clusters,
            roles,
            catalog,
            environments: RwLock::new(Vec::new()),
        }
    }

    /// Create a compute environment.
    ///
    /// For MANAGED environments the capacity plan is computed up front, then
    /// the backing cluster is created and the planned instances launched.
    /// UNMANAGED environments get the backing cluster only.
    pub async fn create(
        &self,
        name: &str,
        kind: EnvironmentKind,
        state: EntityState,
        compute_resources: Option<ComputeResourceSpec>,
        service_role: &str,
    ) -> Result<ComputeEnvironment> {
        let mut environments = self.environments.write().await;

        if environments.iter().any(|e| e.name == name) {
            return Err(CumulusError::validation(format!(
                "A compute environment already exists with the name {name}"
            )));
        }

        let compute_resources = match kind {
            EnvironmentKind::Managed => Some(compute_resources.ok_or_else(|| {
                CumulusError::validation(
                    "computeResources must be provided for a MANAGED compute environment",
                )
            })?),
            EnvironmentKind::Unmanaged => None,
        };

        let service_role_arn = self.roles.resolve_role(service_role).await?;

        // Plan before the first collaborator side effect.
        let plan: Option<CapacityPlan> = match &compute_resources {
            Some(resources) => Some(planner::plan(resources, self.catalog.as_ref())?),
            None => None,
        };

        let cluster = self.clusters.create_cluster(&cluster_name(name)).await?;

        let mut instance_ids = Vec::new();
        if let (Some(plan), Some(resources)) = (&plan, &compute_resources) {
            debug!(
                "Provisioning {} instances ({} vCPUs) for {}",
                plan.instance_count(),
                plan.total_vcpus(),
                name
            );
            for launch in &plan.launches {
                let mut tags: Vec<(String, String)> = resources
                    .tags
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                tags.push((ENVIRONMENT_TAG_KEY.to_string(), name.to_string()));

                let request = LaunchRequest {
                    instance_type: launch.instance_type.clone(),
                    count: launch.count,
                    image_id: resources.image_id.clone(),
                    key_pair: resources.ec2_key_pair.clone(),
                    subnets: resources.subnets.clone(),
                    security_group_ids: resources.security_group_ids.clone(),
                    tags,
                };
                instance_ids.extend(self.fleet.launch_instances(&request).await?);
            }
        }

        let environment = ComputeEnvironment {
            name: name.to_string(),
            arn: Arn::compute_environment(&self.scope, name),
            cluster_arn: cluster.arn,
            kind,
            state,
            status: LifecycleStatus::Valid,
            compute_resources,
            service_role_arn,
            instance_ids,
            created_at: Utc::now(),
        };

        info!("Created compute environment {}", environment.arn);
        environments.push(environment.clone());
        Ok(environment)
    }

    /// Snapshot of environments in creation order.
    ///
    /// A filter entry matches by name or ARN; unknown entries are silently
    /// omitted, never an error.
    pub async fn describe(&self, filter: Option<&[String]>) -> Result<Vec<ComputeEnvironment>> {
        let environments = self.environments.read().await;
        Ok(match filter {
            None => environments.clone(),
            Some(references) => environments
                .iter()
                .filter(|e| references.iter().any(|r| e.matches(r)))
                .cloned()
                .collect(),
        })
    }

    /// Update mutable fields of an environment, addressed by name or ARN
    pub async fn update(
        &self,
        reference: &str,
        state: Option<EntityState>,
        service_role: Option<&str>,
    ) -> Result<ComputeEnvironment> {
        let mut environments = self.environments.write().await;

        let position = environments
            .iter()
            .position(|e| e.matches(reference))
            .ok_or_else(|| {
                CumulusError::not_found(format!("Compute environment {reference} does not exist"))
            })?;

        // Resolve the role before mutating the record.
        let service_role_arn = match service_role {
            Some(role) => Some(self.roles.resolve_role(role).await?),
            None => None,
        };

        let environment = &mut environments[position];
        if let Some(state) = state {
            environment.state = state;
        }
        if let Some(arn) = service_role_arn {
            environment.service_role_arn = arn;
        }

        debug!("Updated compute environment {}", environment.arn);
        Ok(environment.clone())
    }

    /// Delete an environment: terminate its instances, remove its backing
    /// cluster, then drop the record entirely.
    pub async fn delete(&self, reference: &str) -> Result<()> {
        let mut environments = self.environments.write().await;

        let position = environments
            .iter()
            .position(|e| e.matches(reference))
            .ok_or_else(|| {
                CumulusError::not_found(format!("Compute environment {reference} does not exist"))
            })?;

        environments[position].status = LifecycleStatus::Deleting;
        let instance_ids = environments[position].instance_ids.clone();
        let cluster_arn = environments[position].cluster_arn.clone();
        let arn = environments[position].arn.clone();

        if !instance_ids.is_empty() {
            info!(
                "Terminating {} instances for compute environment {}",
                instance_ids.len(),
                arn
            );
            self.fleet.terminate_instances(&instance_ids).await?;
        }

        self.clusters.delete_cluster(&cluster_arn).await?;

        environments.remove(position);
        info!("Deleted compute environment {}", arn);
        Ok(())
    }

    /// Resolve a name or ARN to the environment's canonical ARN
    pub async fn resolve(&self, reference: &str) -> Option<String> {
        self.environments
            .read()
            .await
            .iter()
            .find(|e| e.matches(reference))
            .map(|e| e.arn.clone())
    }
}
