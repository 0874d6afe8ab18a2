pub mod management;
pub mod permissions;
pub mod snapshot_proxy;

pub use management::{ApiCommand, ApiQuery, CommandResponse, ManagementCommands, ServerTarget};
pub use permissions::{Capability, Permissions};
pub use snapshot_proxy::{SnapshotProxy, SnapshotStream, SnapshotTarget};
