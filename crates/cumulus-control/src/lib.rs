//! # Cumulus Control Plane
//!
//! In-process emulation of a managed batch-compute provisioning service.
//!
//! ## Architecture
//!
//! ```text
//! transport layer
//!       │
//!       ▼
//! BatchService (facade)
//!       ├── ComputeEnvironmentManager ──► CapacityPlanner
//!       │         │                          │
//!       │         ▼                          ▼
//!       │   ClusterRegistry          InstanceFleet / InstanceTypeCatalog
//!       │   RoleStore
//!       └── JobQueueManager ──► ComputeEnvironmentManager (reference checks)
//! ```
//!
//! The facade is the only entry point the transport layer calls; the two
//! managers own the entity registries; the collaborators behind the
//! cumulus-core capability traits do the instance/cluster/role work.
//!
//! Operations are synchronous transactions: every create/update/delete holds
//! its registry's write lock end to end, validates before performing any
//! collaborator side effect, and either completes fully or fails with no
//! registry mutation visible. Describes read a snapshot under the read lock
//! and never fail on unknown filter entries.

pub mod api;
pub mod arn;
pub mod environment;
pub mod facade;
pub mod planner;
pub mod queue;

// Resource references
pub use arn::Arn;

// Capacity planning
pub use planner::{plan, CapacityPlan, PlannedLaunch};

// Entity managers
pub use environment::{ComputeEnvironment, ComputeEnvironmentManager, ENVIRONMENT_TAG_KEY};
pub use queue::{ComputeEnvironmentOrder, JobQueue, JobQueueManager};

// Service facade and wire types
pub use api::ErrorReply;
pub use facade::BatchService;

// Error handling
pub use cumulus_core::{CumulusError, Result};
