//! Capacity planning for managed compute environments
//!
//! Translates an abstract capacity request (desired vCPUs, candidate
//! instance types) into a concrete set of launch requests. Greedy best-fit:
//! minimal instance count under the greedy policy, not an exact bin-pack.

use cumulus_core::{ComputeResourceSpec, CumulusError, InstanceTypeCatalog, Result};

/// One planned launch: `count` instances of a single type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLaunch {
    pub instance_type: String,
    pub vcpus_each: u32,
    pub count: u32,
}

/// Concrete launch set satisfying a capacity request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityPlan {
    /// Launches in first-pick order
    pub launches: Vec<PlannedLaunch>,
}

impl CapacityPlan {
    /// Total vCPU capacity the plan provisions
    pub fn total_vcpus(&self) -> u32 {
        self.launches.iter().map(|l| l.vcpus_each * l.count).sum()
    }

    /// Total number of instances the plan launches
    pub fn instance_count(&self) -> u32 {
        self.launches.iter().map(|l| l.count).sum()
    }
}

/// Plan launches to cover `desired_vcpus`.
///
/// Repeatedly picks the largest candidate type whose size does not exceed
/// the remaining unmet demand; when every candidate is larger than what
/// remains, picks the smallest candidate so the loop cannot stall. Stops as
/// soon as accumulated capacity reaches the desired count, so the result may
/// overshoot by at most one instance's worth of vCPUs.
///
/// Every candidate type is resolved against the catalog before anything is
/// accumulated; an unknown type fails the whole call.
pub fn plan(
    resources: &ComputeResourceSpec,
    catalog: &dyn InstanceTypeCatalog,
) -> Result<CapacityPlan> {
    let mut candidates = Vec::with_capacity(resources.instance_types.len());
    for instance_type in &resources.instance_types {
        let vcpus = catalog.vcpus(instance_type).ok_or_else(|| {
            CumulusError::client(format!("Instance type {instance_type} does not exist"))
        })?;
        candidates.push((instance_type.as_str(), vcpus));
    }

    let smallest = candidates
        .iter()
        .copied()
        .min_by_key(|(_, vcpus)| *vcpus)
        .ok_or_else(|| CumulusError::client("instanceTypes must not be empty"))?;

    let mut launches: Vec<PlannedLaunch> = Vec::new();
    let mut remaining = i64::from(resources.desired_vcpus);

    while remaining > 0 {
        let (instance_type, vcpus) = candidates
            .iter()
            .copied()
            .filter(|(_, vcpus)| i64::from(*vcpus) <= remaining)
            .max_by_key(|(_, vcpus)| *vcpus)
            .unwrap_or(smallest);

        match launches.iter_mut().find(|l| l.instance_type == instance_type) {
            Some(launch) => launch.count += 1,
            None => launches.push(PlannedLaunch {
                instance_type: instance_type.to_string(),
                vcpus_each: vcpus,
                count: 1,
            }),
        }

        remaining -= i64::from(vcpus);
    }

    Ok(CapacityPlan { launches })
}
