pub mod coordinator;
pub mod standings;

pub use crate::domain::model::{RankedEntry, Snapshot, TeamId, TeamRecord, WireEntry};
pub use crate::domain::ports::{ConfigProvider, RecordSource};
pub use crate::utils::error::Result;
