//! benchview Core - Shared Data Types
//!
//! Pure data structures with no behavior beyond small projections.
//! All other crates depend on this. This crate contains ONLY data types
//! and the error taxonomy - no caching or I/O logic.

pub mod error;
pub mod report;
pub mod session;

pub use error::{BenchviewResult, Error, UpstreamError};
pub use report::{
    BenchResult, ContainerInfo, CpuInfo, DetailRecord, OsInfo, RunnerInfo, SummaryRecord,
    SystemInfo,
};
pub use session::{ResultRecord, RunnerPage, RunnerRecord, SessionPage, SessionRecord};

use chrono::{DateTime, Utc};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Zero-based offset of a record within a partition's upstream ordering.
pub type Position = usize;
