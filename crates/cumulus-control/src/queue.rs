//! Job queue lifecycle
//!
//! Queues reference compute environments by ARN (or name) in priority
//! order. Every reference is validated against the environment registry
//! before anything persists; a single bad reference fails the whole call.
//! Queues own no external resources, so delete has no collaborator side
//! effects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use cumulus_core::{AccountScope, CumulusError, EntityState, LifecycleStatus, Result};

use crate::arn::Arn;
use crate::environment::ComputeEnvironmentManager;

/// One entry of a queue's compute-environment priority list, stored as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeEnvironmentOrder {
    pub order: i32,

    #[serde(rename = "computeEnvironment")]
    pub compute_environment: String,
}

/// A job queue record; serializes as the describe wire shape
#[derive(Debug, Clone, Serialize)]
pub struct JobQueue {
    #[serde(rename = "jobQueueName")]
    pub name: String,

    #[serde(rename = "jobQueueArn")]
    pub arn: String,

    pub state: EntityState,

    pub status: LifecycleStatus,

    pub priority: i32,

    #[serde(rename = "computeEnvironmentOrder")]
    pub compute_environment_order: Vec<ComputeEnvironmentOrder>,

    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl JobQueue {
    /// True when `reference` is this queue's name or ARN
    pub fn matches(&self, reference: &str) -> bool {
        self.name == reference || self.arn == reference
    }
}

/// Job queue registry and lifecycle operations
pub struct JobQueueManager {
    scope: AccountScope,
    environments: Arc<ComputeEnvironmentManager>,
    queues: RwLock<Vec<JobQueue>>,
}

impl JobQueueManager {
    pub fn new(scope: AccountScope, environments: Arc<ComputeEnvironmentManager>) -> Self {
        Self {
            scope,
            environments,
            queues: RwLock::new(Vec::new()),
        }
    }

    /// Every referenced environment must resolve; the first failure aborts
    async fn check_references(&self, order: &[ComputeEnvironmentOrder]) -> Result<()> {
        if order.is_empty() {
            return Err(CumulusError::client(
                "computeEnvironmentOrder must contain at least one compute environment",
            ));
        }
        for entry in order {
            if self
                .environments
                .resolve(&entry.compute_environment)
                .await
                .is_none()
            {
                return Err(CumulusError::client(format!(
                    "Compute environment {} does not exist",
                    entry.compute_environment
                )));
            }
        }
        Ok(())
    }

    /// Create a job queue; all-or-nothing reference validation
    pub async fn create(
        &self,
        name: &str,
        state: EntityState,
        priority: i32,
        compute_environment_order: Vec<ComputeEnvironmentOrder>,
    ) -> Result<JobQueue> {
        let mut queues = self.queues.write().await;

        if queues.iter().any(|q| q.name == name) {
            return Err(CumulusError::validation(format!(
                "A job queue already exists with the name {name}"
            )));
        }

        self.check_references(&compute_environment_order).await?;

        let queue = JobQueue {
            name: name.to_string(),
            arn: Arn::job_queue(&self.scope, name),
            state,
            status: LifecycleStatus::Valid,
            priority,
            compute_environment_order,
            created_at: Utc::now(),
        };

        info!("Created job queue {}", queue.arn);
        queues.push(queue.clone());
        Ok(queue)
    }

    /// Snapshot of queues in creation order; same lenient filter semantics
    /// as environment describe
    pub async fn describe(&self, filter: Option<&[String]>) -> Result<Vec<JobQueue>> {
        let queues = self.queues.read().await;
        Ok(match filter {
            None => queues.clone(),
            Some(references) => queues
                .iter()
                .filter(|q| references.iter().any(|r| q.matches(r)))
                .cloned()
                .collect(),
        })
    }

    /// Update mutable fields of a queue, addressed by name or ARN.
    ///
    /// A supplied order list is re-validated with the same all-or-nothing
    /// contract as create.
    pub async fn update(
        &self,
        reference: &str,
        state: Option<EntityState>,
        priority: Option<i32>,
        compute_environment_order: Option<Vec<ComputeEnvironmentOrder>>,
    ) -> Result<JobQueue> {
        let mut queues = self.queues.write().await;

        let position = queues
            .iter()
            .position(|q| q.matches(reference))
            .ok_or_else(|| {
                CumulusError::not_found(format!("Job queue {reference} does not exist"))
            })?;

        if let Some(order) = &compute_environment_order {
            self.check_references(order).await?;
        }

        let queue = &mut queues[position];
        if let Some(state) = state {
            queue.state = state;
        }
        if let Some(priority) = priority {
            queue.priority = priority;
        }
        if let Some(order) = compute_environment_order {
            queue.compute_environment_order = order;
        }

        debug!("Updated job queue {}", queue.arn);
        Ok(queue.clone())
    }

    /// Delete a queue, addressed by name or ARN
    pub async fn delete(&self, reference: &str) -> Result<()> {
        let mut queues = self.queues.write().await;

        let position = queues
            .iter()
            .position(|q| q.matches(reference))
            .ok_or_else(|| {
                CumulusError::not_found(format!("Job queue {reference} does not exist"))
            })?;

        let queue = queues.remove(position);
        info!("Deleted job queue {}", queue.arn);
        Ok(())
    }
}
