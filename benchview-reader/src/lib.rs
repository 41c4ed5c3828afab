//! benchview Reader - Session Report Caching
//!
//! The data-access core of the session reporting frontend: a sparse
//! per-partition window cache over the paged session API, a memoizing
//! detail cache, the pure runner descriptor mapper, and the
//! [`ReportService`] facade that composes them.
//!
//! The upstream is reached exclusively through the [`SessionSource`] trait;
//! the REST implementation lives in `benchview-client`.

pub mod detail;
pub mod runner_info;
pub mod service;
pub mod source;
pub mod window;

pub use detail::DetailCache;
pub use runner_info::{describe_runner, runner_info, RunnerDescriptors};
pub use service::{FailurePolicy, ReaderConfig, ReportService};
pub use source::SessionSource;
pub use window::{PartitionKey, SparseWindowCache};
