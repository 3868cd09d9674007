//! Resource model: specifications, identity, install ranking, snapshots.

pub mod rank;
pub mod snapshot;
pub mod spec;
pub mod types;

pub use rank::{install_rank, install_weight, DEFAULT_GROUP_WEIGHT, DEFAULT_INSTALL_RANK};
pub use snapshot::SnapshotStore;
pub use spec::ResourceSpec;
pub use types::{ActiveResource, InfraTarget, ResourceId, SortOrder};
