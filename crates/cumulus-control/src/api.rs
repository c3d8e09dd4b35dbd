//! Wire request/response shapes
//!
//! Field names mirror the batch API. The facade deserializes requests from
//! the transport layer and serializes manager records back out; nothing in
//! here carries behavior.

use serde::{Deserialize, Serialize};

use cumulus_core::{ComputeResourceSpec, CumulusError, EntityState, EnvironmentKind};

use crate::environment::ComputeEnvironment;
use crate::queue::{ComputeEnvironmentOrder, JobQueue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComputeEnvironmentRequest {
    #[serde(rename = "computeEnvironmentName")]
    pub compute_environment_name: String,

    #[serde(rename = "type")]
    pub kind: EnvironmentKind,

    /// Defaults to ENABLED when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,

    #[serde(rename = "computeResources", default, skip_serializing_if = "Option::is_none")]
    pub compute_resources: Option<ComputeResourceSpec>,

    #[serde(rename = "serviceRole")]
    pub service_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComputeEnvironmentResponse {
    #[serde(rename = "computeEnvironmentArn")]
    pub compute_environment_arn: String,

    #[serde(rename = "computeEnvironmentName")]
    pub compute_environment_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescribeComputeEnvironmentsRequest {
    /// Name or ARN filter; absent means all environments
    #[serde(rename = "computeEnvironments", default, skip_serializing_if = "Option::is_none")]
    pub compute_environments: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeComputeEnvironmentsResponse {
    #[serde(rename = "computeEnvironments")]
    pub compute_environments: Vec<ComputeEnvironment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComputeEnvironmentRequest {
    /// Name or ARN of the environment to update
    #[serde(rename = "computeEnvironment")]
    pub compute_environment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,

    #[serde(rename = "serviceRole", default, skip_serializing_if = "Option::is_none")]
    pub service_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComputeEnvironmentResponse {
    #[serde(rename = "computeEnvironmentArn")]
    pub compute_environment_arn: String,

    #[serde(rename = "computeEnvironmentName")]
    pub compute_environment_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteComputeEnvironmentRequest {
    /// Name or ARN of the environment to delete
    #[serde(rename = "computeEnvironment")]
    pub compute_environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobQueueRequest {
    #[serde(rename = "jobQueueName")]
    pub job_queue_name: String,

    /// Defaults to ENABLED when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,

    pub priority: i32,

    #[serde(rename = "computeEnvironmentOrder")]
    pub compute_environment_order: Vec<ComputeEnvironmentOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobQueueResponse {
    #[serde(rename = "jobQueueArn")]
    pub job_queue_arn: String,

    #[serde(rename = "jobQueueName")]
    pub job_queue_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescribeJobQueuesRequest {
    /// Name or ARN filter; absent means all queues
    #[serde(rename = "jobQueues", default, skip_serializing_if = "Option::is_none")]
    pub job_queues: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeJobQueuesResponse {
    #[serde(rename = "jobQueues")]
    pub job_queues: Vec<JobQueue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobQueueRequest {
    /// Name or ARN of the queue to update
    #[serde(rename = "jobQueue")]
    pub job_queue: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(rename = "computeEnvironmentOrder", default, skip_serializing_if = "Option::is_none")]
    pub compute_environment_order: Option<Vec<ComputeEnvironmentOrder>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobQueueResponse {
    #[serde(rename = "jobQueueArn")]
    pub job_queue_arn: String,

    #[serde(rename = "jobQueueName")]
    pub job_queue_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteJobQueueRequest {
    /// Name or ARN of the queue to delete
    #[serde(rename = "jobQueue")]
    pub job_queue: String,
}

/// Error shape returned to the transport layer; the code is the error's
/// client-facing code verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub code: String,
    pub message: String,
}

impl From<&CumulusError> for ErrorReply {
    fn from(err: &CumulusError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
