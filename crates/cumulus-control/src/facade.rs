//! Service facade
//!
//! The single entry point the transport layer calls. Typed methods cover
//! every operation; [`BatchService::dispatch`] maps operation names to them
//! for callers that work in terms of (action, JSON body) pairs.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use cumulus_core::{
    AccountScope, ClusterRegistry, CumulusError, EntityState, InstanceFleet, InstanceTypeCatalog,
    Result, RoleStore,
};

use crate::api::*;
use crate::environment::ComputeEnvironmentManager;
use crate::queue::JobQueueManager;

fn parse<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|err| CumulusError::validation(format!("Malformed request: {err}")))
}

fn reply<T: Serialize>(response: T) -> Result<Value> {
    serde_json::to_value(response)
        .map_err(|err| CumulusError::internal(format!("Failed to serialize response: {err}")))
}

/// The batch control plane for one account/region scope
pub struct BatchService {
    environments: Arc<ComputeEnvironmentManager>,
    queues: JobQueueManager,
}

impl BatchService {
    /// Build a service over the given collaborators
    pub fn new(
        scope: AccountScope,
        fleet: Arc<dyn InstanceFleet>,
        clusters: Arc<dyn ClusterRegistry>,
        roles: Arc<dyn RoleStore>,
        catalog: Arc<dyn InstanceTypeCatalog>,
    ) -> Self {
        let environments = Arc::new(ComputeEnvironmentManager::new(
            scope.clone(),
            fleet,
            clusters,
            roles,
            catalog,
        ));
        let queues = JobQueueManager::new(scope, Arc::clone(&environments));
        Self {
            environments,
            queues,
        }
    }

    /// Direct access to the environment manager
    pub fn environments(&self) -> &ComputeEnvironmentManager {
        &self.environments
    }

    /// Direct access to the queue manager
    pub fn queues(&self) -> &JobQueueManager {
        &self.queues
    }

    pub async fn create_compute_environment(
        &self,
        request: CreateComputeEnvironmentRequest,
    ) -> Result<CreateComputeEnvironmentResponse> {
        let environment = self
            .environments
            .create(
                &request.compute_environment_name,
                request.kind,
                request.state.unwrap_or(EntityState::Enabled),
                request.compute_resources,
                &request.service_role,
            )
            .await?;
        Ok(CreateComputeEnvironmentResponse {
            compute_environment_arn: environment.arn,
            compute_environment_name: environment.name,
        })
    }

    pub async fn describe_compute_environments(
        &self,
        request: DescribeComputeEnvironmentsRequest,
    ) -> Result<DescribeComputeEnvironmentsResponse> {
        let compute_environments = self
            .environments
            .describe(request.compute_environments.as_deref())
            .await?;
        Ok(DescribeComputeEnvironmentsResponse {
            compute_environments,
        })
    }

    pub async fn update_compute_environment(
        &self,
        request: UpdateComputeEnvironmentRequest,
    ) -> Result<UpdateComputeEnvironmentResponse> {
        let environment = self
            .environments
            .update(
                &request.compute_environment,
                request.state,
                request.service_role.as_deref(),
            )
            .await?;
        Ok(UpdateComputeEnvironmentResponse {
            compute_environment_arn: environment.arn,
            compute_environment_name: environment.name,
        })
    }

    pub async fn delete_compute_environment(
        &self,
        request: DeleteComputeEnvironmentRequest,
    ) -> Result<()> {
        self.environments.delete(&request.compute_environment).await
    }

    pub async fn create_job_queue(
        &self,
        request: CreateJobQueueRequest,
    ) -> Result<CreateJobQueueResponse> {
        let queue = self
            .queues
            .create(
                &request.job_queue_name,
                request.state.unwrap_or(EntityState::Enabled),
                request.priority,
                request.compute_environment_order,
            )
            .await?;
        Ok(CreateJobQueueResponse {
            job_queue_arn: queue.arn,
            job_queue_name: queue.name,
        })
    }

    pub async fn describe_job_queues(
        &self,
        request: DescribeJobQueuesRequest,
    ) -> Result<DescribeJobQueuesResponse> {
        let job_queues = self.queues.describe(request.job_queues.as_deref()).await?;
        Ok(DescribeJobQueuesResponse { job_queues })
    }

    pub async fn update_job_queue(
        &self,
        request: UpdateJobQueueRequest,
    ) -> Result<UpdateJobQueueResponse> {
        let queue = self
            .queues
            .update(
                &request.job_queue,
                request.state,
                request.priority,
                request.compute_environment_order,
            )
            .await?;
        Ok(UpdateJobQueueResponse {
            job_queue_arn: queue.arn,
            job_queue_name: queue.name,
        })
    }

    pub async fn delete_job_queue(&self, request: DeleteJobQueueRequest) -> Result<()> {
        self.queues.delete(&request.job_queue).await
    }

    /// Dispatch a named operation with a JSON body.
    ///
    /// Success responses are the typed responses serialized; delete
    /// operations return an empty object. Errors carry the client-facing
    /// code via [`ErrorReply::from`].
    pub async fn dispatch(&self, action: &str, body: Value) -> Result<Value> {
        debug!("Dispatching {}", action);
        match action {
            "CreateComputeEnvironment" => {
                reply(self.create_compute_environment(parse(body)?).await?)
            }
            "DescribeComputeEnvironments" => {
                reply(self.describe_compute_environments(parse(body)?).await?)
            }
            "UpdateComputeEnvironment" => {
                reply(self.update_compute_environment(parse(body)?).await?)
            }
            "DeleteComputeEnvironment" => {
                self.delete_compute_environment(parse(body)?).await?;
                Ok(Value::Object(Default::default()))
            }
            "CreateJobQueue" => reply(self.create_job_queue(parse(body)?).await?),
            "DescribeJobQueues" => reply(self.describe_job_queues(parse(body)?).await?),
            "UpdateJobQueue" => reply(self.update_job_queue(parse(body)?).await?),
            "DeleteJobQueue" => {
                self.delete_job_queue(parse(body)?).await?;
                Ok(Value::Object(Default::default()))
            }
            other => Err(CumulusError::client(format!("Unknown operation {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_sim::{SimClusterRegistry, SimInstanceFleet, SimRoleStore, StaticCatalog};

    fn service() -> BatchService {
        let scope = AccountScope::default();
        let catalog = Arc::new(StaticCatalog::with_defaults());
        BatchService::new(
            scope.clone(),
            Arc::new(SimInstanceFleet::new(catalog.clone())),
            Arc::new(SimClusterRegistry::new(scope.clone())),
            Arc::new(SimRoleStore::new(scope)),
            catalog,
        )
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let service = service();
        let err = service
            .dispatch("LaunchRocket", Value::Object(Default::default()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ClientException");
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let service = service();
        let err = service
            .dispatch("CreateComputeEnvironment", serde_json::json!({"type": "MANAGED"}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ValidationError");
    }

    #[test]
    fn test_error_reply_shape() {
        let err = CumulusError::client("Compute environment x does not exist");
        let formatted = ErrorReply::from(&err);
        assert_eq!(formatted.code, "ClientException");
        assert_eq!(formatted.message, "Compute environment x does not exist");
    }
}
