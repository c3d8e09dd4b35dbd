//! Instance type catalog
//!
//! Maps instance type names to vCPU sizes for the capacity planner.

use std::collections::HashMap;

use cumulus_core::InstanceTypeCatalog;

/// vCPU sizes for the built-in general-purpose and compute families
const BUILTIN_SIZES: &[(&str, u32)] = &[
    ("t2.nano", 1),
    ("t2.micro", 1),
    ("t2.small", 1),
    ("t2.medium", 2),
    ("t2.large", 2),
    ("t2.xlarge", 4),
    ("t2.2xlarge", 8),
    ("m4.large", 2),
    ("m4.xlarge", 4),
    ("m4.2xlarge", 8),
    ("m4.4xlarge", 16),
    ("m4.10xlarge", 40),
    ("m4.16xlarge", 64),
    ("c4.large", 2),
    ("c4.xlarge", 4),
    ("c4.2xlarge", 8),
    ("c4.4xlarge", 16),
    ("c4.8xlarge", 36),
];

/// Static instance-type catalog with optional per-context additions
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    sizes: HashMap<String, u32>,
}

impl StaticCatalog {
    /// Catalog covering the built-in t2/m4/c4 families
    pub fn with_defaults() -> Self {
        let sizes = BUILTIN_SIZES
            .iter()
            .map(|(name, vcpus)| (name.to_string(), *vcpus))
            .collect();
        Self { sizes }
    }

    /// Register an additional instance type
    pub fn define(mut self, instance_type: impl Into<String>, vcpus: u32) -> Self {
        self.sizes.insert(instance_type.into(), vcpus);
        self
    }

    /// Known types sorted by name
    pub fn entries(&self) -> Vec<(String, u32)> {
        let mut entries: Vec<_> = self
            .sizes
            .iter()
            .map(|(name, vcpus)| (name.clone(), *vcpus))
            .collect();
        entries.sort();
        entries
    }
}

impl InstanceTypeCatalog for StaticCatalog {
    fn vcpus(&self, instance_type: &str) -> Option<u32> {
        self.sizes.get(instance_type).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let catalog = StaticCatalog::with_defaults();
        assert_eq!(catalog.vcpus("t2.small"), Some(1));
        assert_eq!(catalog.vcpus("t2.medium"), Some(2));
        assert_eq!(catalog.vcpus("m4.10xlarge"), Some(40));
        assert_eq!(catalog.vcpus("z9.mega"), None);
    }

    #[test]
    fn test_define_overrides_builtin() {
        let catalog = StaticCatalog::with_defaults().define("t2.small", 7);
        assert_eq!(catalog.vcpus("t2.small"), Some(7));
    }

    #[test]
    fn test_entries_sorted() {
        let catalog = StaticCatalog::with_defaults();
        let entries = catalog.entries();
        assert_eq!(entries.len(), BUILTIN_SIZES.len());
        assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
