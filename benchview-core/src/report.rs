//! Caller-facing projections of sessions and runners.
//!
//! These are the shapes the reporting UI consumes: a flat summary row per
//! session, a fully expanded detail record, and grouped hardware/OS/container
//! descriptors. All records are immutable once built.

use crate::session::{ResultRecord, RunnerRecord, SessionRecord};
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// SUMMARY PROJECTION
// ============================================================================

/// Denormalized projection of a session, one table row in the session list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: i64,
    pub date: Timestamp,
    pub user: Option<String>,
    pub architecture: Option<String>,
    pub cpu_brand: Option<String>,
    pub cpu_cores: Option<u32>,
    pub cpu_processors: Option<u32>,
    pub cpu_vendor: Option<String>,
    pub docker_architecture: Option<String>,
    pub system_virtual: Option<bool>,
    pub os_platform: Option<String>,
    pub os_distro: Option<String>,
    pub os_release: Option<String>,
    pub result_count: u32,
}

impl From<&SessionRecord> for SummaryRecord {
    fn from(session: &SessionRecord) -> Self {
        let runner = &session.runner;
        Self {
            id: session.id,
            date: session.created_at,
            user: runner.name.clone(),
            architecture: runner.os_arch.clone(),
            cpu_brand: runner.cpu_brand.clone(),
            cpu_cores: runner.cpu_cores,
            cpu_processors: runner.cpu_processors,
            cpu_vendor: runner.cpu_vendor.clone(),
            docker_architecture: runner.docker_architecture.clone(),
            system_virtual: runner.system_virtual,
            os_platform: runner.os_platform.clone(),
            os_distro: runner.os_distro.clone(),
            os_release: runner.os_release.clone(),
            result_count: session.results_count,
        }
    }
}

// ============================================================================
// DESCRIPTOR GROUPS
// ============================================================================

/// Processor descriptor group. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub manufacturer: Option<String>,
    pub brand: Option<String>,
    pub vendor: Option<String>,
    pub family: Option<String>,
    pub model: Option<String>,
    pub stepping: Option<String>,
    pub revision: Option<String>,
    pub voltage: Option<String>,
    pub socket: Option<String>,
    pub flags: Option<String>,
    pub governor: Option<String>,
    pub virtualization: Option<bool>,
    pub speed: Option<f64>,
    pub minimum_speed: Option<f64>,
    pub maximum_speed: Option<f64>,
    pub cores: Option<u32>,
    pub physical_cores: Option<u32>,
    pub performance_cores: Option<u32>,
    pub efficiency_cores: Option<u32>,
    pub processors: Option<u32>,
    pub raspberry_processor: Option<String>,
    /// Cache sizes keyed "l1d"/"l1i"/"l2"/"l3", bytes. Absent (not empty)
    /// when the runner reported no cache level at all.
    pub cache: Option<BTreeMap<String, u64>>,
}

/// Host system descriptor group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub sku: Option<String>,
    pub is_virtual: Option<bool>,
    pub raspberry_manufacturer: Option<String>,
    pub raspberry_type: Option<String>,
    pub raspberry_revision: Option<String>,
}

/// Operating system descriptor group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsInfo {
    pub platform: Option<String>,
    pub distribution: Option<String>,
    pub release: Option<String>,
    pub code_name: Option<String>,
    pub kernel: Option<String>,
    pub architecture: Option<String>,
    pub code_page: Option<String>,
    pub logo_file: Option<String>,
    pub build: Option<String>,
    pub service_pack: Option<String>,
    pub is_uefi: Option<bool>,
}

/// Container/virtualization descriptor group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub architecture: Option<String>,
    pub cpu_count: Option<u32>,
    pub total_memory: Option<u64>,
    pub kernel_version: Option<String>,
    pub operating_system: Option<String>,
    pub os_type: Option<String>,
    pub os_version: Option<String>,
    pub server_version: Option<String>,
}

/// A runner with its descriptor groups, the `list_runners` projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerInfo {
    pub id: i64,
    pub user: Option<String>,
    pub cpu: CpuInfo,
    pub system: SystemInfo,
    pub os: OsInfo,
    pub container: ContainerInfo,
}

// ============================================================================
// DETAIL PROJECTION
// ============================================================================

/// One algorithm result, projected for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    pub algorithm: String,
    pub language: String,
    pub label: String,
    pub solution: String,
    pub duration: f64,
    pub passes: u64,
    pub threads: u32,
    /// Populated only when the wire value parses as an integer.
    pub bits: Option<u32>,
    pub faithful: Option<bool>,
}

impl From<&ResultRecord> for BenchResult {
    fn from(record: &ResultRecord) -> Self {
        Self {
            algorithm: record.algorithm.clone(),
            language: record.implementation.clone(),
            label: record.label.clone(),
            solution: record.solution.clone(),
            duration: record.duration,
            passes: record.passes,
            threads: record.threads,
            bits: record.bits.as_deref().and_then(|b| b.parse().ok()),
            faithful: record.faithful,
        }
    }
}

/// Full expansion of a session: descriptors plus every algorithm result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: i64,
    pub date: Timestamp,
    pub user: Option<String>,
    pub cpu: CpuInfo,
    pub system: SystemInfo,
    pub os: OsInfo,
    pub container: ContainerInfo,
    pub results: Vec<BenchResult>,
}
