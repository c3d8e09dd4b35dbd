//! In-memory container-cluster registry

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use cumulus_core::{AccountScope, Cluster, ClusterArn, ClusterRegistry, CumulusError, Result};

/// In-memory cluster registry scoped to one account/region
pub struct SimClusterRegistry {
    scope: AccountScope,
    clusters: RwLock<Vec<Cluster>>,
}

impl SimClusterRegistry {
    pub fn new(scope: AccountScope) -> Self {
        Self {
            scope,
            clusters: RwLock::new(Vec::new()),
        }
    }

    fn cluster_arn(&self, name: &str) -> ClusterArn {
        ClusterArn::new(format!(
            "arn:aws:ecs:{}:{}:cluster/{}",
            self.scope.region, self.scope.account_id, name
        ))
    }
}

impl Default for SimClusterRegistry {
    fn default() -> Self {
        Self::new(AccountScope::default())
    }
}

#[async_trait]
impl ClusterRegistry for SimClusterRegistry {
    async fn create_cluster(&self, name: &str) -> Result<Cluster> {
        let mut clusters = self.clusters.write().await;

        if clusters.iter().any(|c| c.name == name) {
            return Err(CumulusError::validation(format!(
                "Cluster {name} already exists"
            )));
        }

        let cluster = Cluster {
            arn: self.cluster_arn(name),
            name: name.to_string(),
        };
        info!("Created cluster {}", cluster.arn);
        clusters.push(cluster.clone());
        Ok(cluster)
    }

    async fn delete_cluster(&self, arn: &ClusterArn) -> Result<()> {
        let mut clusters = self.clusters.write().await;
        let position = clusters
            .iter()
            .position(|c| &c.arn == arn)
            .ok_or_else(|| CumulusError::not_found(format!("Cluster {arn} not found")))?;

        info!("Deleting cluster {}", arn);
        clusters.remove(position);
        Ok(())
    }

    async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        Ok(self.clusters.read().await.clone())
    }
}
