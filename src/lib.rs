pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{source_from_config, FileRecordSource, HttpRecordSource};
pub use app::poller::Poller;
pub use config::{OutputFormat, Settings};
pub use crate::core::coordinator::{CoordinatorState, RefreshCoordinator};
pub use crate::core::standings::{build, build_at};
pub use domain::model::{PointValue, RankedEntry, Snapshot, TeamId, TeamRecord, WireEntry};
pub use domain::ports::RecordSource;
pub use utils::error::{FetchError, LeaderboardError, Result};
