//! Core types shared across Cumulus components

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default simulated account
pub const DEFAULT_ACCOUNT_ID: &str = "123456789012";

/// Default simulated region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Account/region scope a service context operates in.
///
/// Every generated ARN embeds this scope; two scopes never share registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountScope {
    pub account_id: String,
    pub region: String,
}

impl AccountScope {
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
        }
    }
}

impl Default for AccountScope {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_ID, DEFAULT_REGION)
    }
}

/// Unique identifier for a simulated instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ARN of a backing container cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterArn(pub String);

impl ClusterArn {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }
}

impl std::fmt::Display for ClusterArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    /// Instance is pending
    Pending,
    /// Instance is running
    Running,
    /// Instance is shutting down
    ShuttingDown,
    /// Instance is terminated
    Terminated,
}

impl InstanceState {
    /// Check if instance is active (counts toward provisioned capacity)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }

    /// Wire name, lowercase kebab-case
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute environment kind: capacity provisioned by the service or declared externally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvironmentKind {
    Managed,
    Unmanaged,
}

/// Whether an entity accepts new work; orthogonal to lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityState {
    Enabled,
    Disabled,
}

/// Lifecycle status; creation is synchronous so callers observe `Valid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LifecycleStatus {
    Creating,
    Valid,
    Deleting,
    Deleted,
}

/// Provisioning model for managed capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProvisioningModel {
    Ec2,
    Spot,
}

/// Capacity request for a managed compute environment.
///
/// Field names on the wire follow the batch API shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResourceSpec {
    #[serde(rename = "type")]
    pub model: ProvisioningModel,

    #[serde(rename = "minvCpus")]
    pub min_vcpus: u32,

    #[serde(rename = "maxvCpus")]
    pub max_vcpus: u32,

    #[serde(rename = "desiredvCpus")]
    pub desired_vcpus: u32,

    #[serde(rename = "instanceTypes")]
    pub instance_types: Vec<String>,

    #[serde(rename = "imageId", default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,

    #[serde(default)]
    pub subnets: Vec<String>,

    #[serde(rename = "securityGroupIds", default)]
    pub security_group_ids: Vec<String>,

    #[serde(rename = "ec2KeyPair", default, skip_serializing_if = "Option::is_none")]
    pub ec2_key_pair: Option<String>,

    #[serde(rename = "instanceRole", default, skip_serializing_if = "Option::is_none")]
    pub instance_role: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,

    /// Spot bid, percent of on-demand price. Stored, never acted on.
    #[serde(rename = "bidPercentage", default, skip_serializing_if = "Option::is_none")]
    pub bid_percentage: Option<u32>,

    #[serde(rename = "spotIamFleetRole", default, skip_serializing_if = "Option::is_none")]
    pub spot_fleet_role: Option<String>,
}

/// A simulated compute instance as reported by the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub instance_type: String,
    pub state: InstanceState,
    pub vcpus: u32,
    pub launch_time: DateTime<Utc>,
    pub tags: HashMap<String, String>,
}

/// A backing container cluster as reported by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub arn: ClusterArn,
    pub name: String,
}

/// Launch request handed to the instance fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Instance type (e.g., "t2.medium")
    pub instance_type: String,

    /// Number of instances to launch
    pub count: u32,

    /// Image identifier
    pub image_id: Option<String>,

    /// Key pair name
    pub key_pair: Option<String>,

    /// Subnet IDs
    pub subnets: Vec<String>,

    /// Security group IDs
    pub security_group_ids: Vec<String>,

    /// Tags applied to every launched instance
    pub tags: Vec<(String, String)>,
}

impl LaunchRequest {
    /// Create a request for `count` instances of a type
    pub fn new(instance_type: impl Into<String>, count: u32) -> Self {
        Self {
            instance_type: instance_type.into(),
            count,
            image_id: None,
            key_pair: None,
            subnets: vec![],
            security_group_ids: vec![],
            tags: vec![],
        }
    }

    /// Set the image identifier
    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_state_is_active() {
        assert!(InstanceState::Running.is_active());
        assert!(InstanceState::Pending.is_active());
        assert!(!InstanceState::Terminated.is_active());
        assert!(!InstanceState::ShuttingDown.is_active());
    }

    #[test]
    fn test_compute_resource_spec_wire_names() {
        let resources = ComputeResourceSpec {
            model: ProvisioningModel::Ec2,
            min_vcpus: 5,
            max_vcpus: 10,
            desired_vcpus: 5,
            instance_types: vec!["t2.small".to_string(), "t2.medium".to_string()],
            image_id: Some("some_image_id".to_string()),
            subnets: vec!["subnet-01".to_string()],
            security_group_ids: vec!["sg-01".to_string()],
            ec2_key_pair: Some("string".to_string()),
            instance_role: Some("arn:aws:iam::123456789012:role/TestRole".to_string()),
            tags: HashMap::new(),
            bid_percentage: Some(123),
            spot_fleet_role: None,
        };

        let value = serde_json::to_value(&resources).unwrap();
        assert_eq!(value["type"], "EC2");
        assert_eq!(value["minvCpus"], 5);
        assert_eq!(value["desiredvCpus"], 5);
        assert_eq!(value["instanceTypes"][1], "t2.medium");
        assert_eq!(value["ec2KeyPair"], "string");
        assert_eq!(value["bidPercentage"], 123);
        assert!(value.get("spotIamFleetRole").is_none());
    }

    #[test]
    fn test_entity_state_round_trip() {
        let state: EntityState = serde_json::from_str("\"DISABLED\"").unwrap();
        assert_eq!(state, EntityState::Disabled);
        assert_eq!(serde_json::to_string(&EntityState::Enabled).unwrap(), "\"ENABLED\"");
    }
}
