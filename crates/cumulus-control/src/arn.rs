//! Resource reference (ARN) handling
//!
//! ARNs are the canonical cross-resource references: job queues point at
//! compute environments by ARN, and every created entity gets one. The
//! formats here follow the `arn:{partition}:{service}:{region}:{account}:{resource}`
//! convention with `resource` as `{type}/{name}`.

use cumulus_core::{AccountScope, CumulusError, Result};

/// Parsed resource reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Parse an ARN string; the resource part may itself contain separators
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.splitn(6, ':');

        let malformed = || CumulusError::client(format!("Malformed ARN {input}"));

        if parts.next() != Some("arn") {
            return Err(malformed());
        }
        let partition = parts.next().ok_or_else(&malformed)?;
        let service = parts.next().ok_or_else(&malformed)?;
        let region = parts.next().ok_or_else(&malformed)?;
        let account_id = parts.next().ok_or_else(&malformed)?;
        let resource = parts.next().ok_or_else(&malformed)?;

        if partition.is_empty() || service.is_empty() || resource.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
        })
    }

    /// Resource type, the part of `resource` before the first `/`
    pub fn resource_type(&self) -> Option<&str> {
        self.resource.split_once('/').map(|(kind, _)| kind)
    }

    /// Resource name, the part of `resource` after the first `/`
    pub fn resource_name(&self) -> &str {
        self.resource
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.resource)
    }

    /// ARN for a compute environment in the given scope
    pub fn compute_environment(scope: &AccountScope, name: &str) -> String {
        format!(
            "arn:aws:batch:{}:{}:compute-environment/{}",
            scope.region, scope.account_id, name
        )
    }

    /// ARN for a job queue in the given scope
    pub fn job_queue(scope: &AccountScope, name: &str) -> String {
        format!(
            "arn:aws:batch:{}:{}:job-queue/{}",
            scope.region, scope.account_id, name
        )
    }
}

impl std::fmt::Display for Arn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}
