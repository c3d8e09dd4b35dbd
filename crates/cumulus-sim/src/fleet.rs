//! In-memory instance fleet
//!
//! Emulates the instance inventory behind the `InstanceFleet` trait.
//! Terminated instances are never removed, only marked; the control plane's
//! post-delete assertions rely on the full history staying enumerable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use cumulus_core::{
    CumulusError, Instance, InstanceFleet, InstanceId, InstanceState, InstanceTypeCatalog,
    LaunchRequest, Result,
};

/// Generate an instance id in the `i-` + 17 hex chars shape
fn new_instance_id() -> InstanceId {
    let hex = Uuid::new_v4().simple().to_string();
    InstanceId::new(format!("i-{}", &hex[..17]))
}

/// In-memory instance inventory
pub struct SimInstanceFleet {
    catalog: Arc<dyn InstanceTypeCatalog>,
    instances: RwLock<Vec<Instance>>,
}

impl SimInstanceFleet {
    /// Create an empty fleet sized by the given catalog
    pub fn new(catalog: Arc<dyn InstanceTypeCatalog>) -> Self {
        Self {
            catalog,
            instances: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InstanceFleet for SimInstanceFleet {
    async fn launch_instances(&self, request: &LaunchRequest) -> Result<Vec<InstanceId>> {
        let vcpus = self.catalog.vcpus(&request.instance_type).ok_or_else(|| {
            CumulusError::client(format!(
                "Instance type {} is not known to the fleet",
                request.instance_type
            ))
        })?;

        info!(
            "Launching {} x {} ({} vCPUs each)",
            request.count, request.instance_type, vcpus
        );

        let tags: HashMap<String, String> = request.tags.iter().cloned().collect();
        let mut inventory = self.instances.write().await;
        let mut ids = Vec::with_capacity(request.count as usize);

        for _ in 0..request.count {
            let id = new_instance_id();
            inventory.push(Instance {
                id: id.clone(),
                instance_type: request.instance_type.clone(),
                state: InstanceState::Running,
                vcpus,
                launch_time: Utc::now(),
                tags: tags.clone(),
            });
            ids.push(id);
        }

        Ok(ids)
    }

    async fn terminate_instances(&self, ids: &[InstanceId]) -> Result<()> {
        let mut inventory = self.instances.write().await;

        for id in ids {
            let instance = inventory
                .iter_mut()
                .find(|i| &i.id == id)
                .ok_or_else(|| CumulusError::not_found(format!("Instance {id} not found")))?;
            debug!("Terminating instance {}", id);
            instance.state = InstanceState::Terminated;
        }

        Ok(())
    }

    async fn describe_instances(&self) -> Result<Vec<Instance>> {
        Ok(self.instances.read().await.clone())
    }
}
