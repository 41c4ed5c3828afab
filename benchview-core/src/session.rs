//! Upstream record types, shaped exactly like the REST API wire format.
//!
//! Every hardware/OS/container attribute a runner reports is independently
//! optional: runners submit whatever their probe tooling could detect, and
//! absent fields are simply missing from the JSON document.

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// One page of sessions as returned by the paged list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPage {
    /// Records in upstream order (most recent first).
    pub data: Vec<SessionRecord>,
    /// Upstream-reported total size of the backing collection.
    pub total: usize,
}

/// One page of runners as returned by the runner list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerPage {
    pub data: Vec<RunnerRecord>,
    pub total: usize,
}

/// A benchmark session: one submission of results by one runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub created_at: Timestamp,
    pub runner: RunnerRecord,
    #[serde(default)]
    pub results_count: u32,
    /// Individual results, expanded only by the detail endpoint.
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

/// One algorithm result inside a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub algorithm: String,
    pub implementation: String,
    pub label: String,
    pub solution: String,
    pub duration: f64,
    pub passes: u64,
    pub threads: u32,
    /// Bit width as reported on the wire; free-form, not always numeric.
    #[serde(default)]
    pub bits: Option<String>,
    #[serde(default)]
    pub faithful: Option<bool>,
}

/// Raw runner attributes as submitted by the benchmark harness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,

    // Processor
    #[serde(default)]
    pub cpu_manufacturer: Option<String>,
    #[serde(default)]
    pub cpu_brand: Option<String>,
    #[serde(default)]
    pub cpu_vendor: Option<String>,
    #[serde(default)]
    pub cpu_family: Option<String>,
    #[serde(default)]
    pub cpu_model: Option<String>,
    #[serde(default)]
    pub cpu_stepping: Option<String>,
    #[serde(default)]
    pub cpu_revision: Option<String>,
    #[serde(default)]
    pub cpu_voltage: Option<String>,
    #[serde(default)]
    pub cpu_socket: Option<String>,
    #[serde(default)]
    pub cpu_flags: Option<String>,
    #[serde(default)]
    pub cpu_governor: Option<String>,
    #[serde(default)]
    pub cpu_virtualization: Option<bool>,
    #[serde(default)]
    pub cpu_speed: Option<f64>,
    #[serde(default)]
    pub cpu_speed_min: Option<f64>,
    #[serde(default)]
    pub cpu_speed_max: Option<f64>,
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    #[serde(default)]
    pub cpu_physical_cores: Option<u32>,
    #[serde(default)]
    pub cpu_performance_cores: Option<u32>,
    #[serde(default)]
    pub cpu_efficiency_cores: Option<u32>,
    #[serde(default)]
    pub cpu_processors: Option<u32>,
    #[serde(default)]
    pub cpu_cache_l1d: Option<u64>,
    #[serde(default)]
    pub cpu_cache_l1i: Option<u64>,
    #[serde(default)]
    pub cpu_cache_l2: Option<u64>,
    #[serde(default)]
    pub cpu_cache_l3: Option<u64>,

    // Host system
    #[serde(default)]
    pub system_manufacturer: Option<String>,
    #[serde(default)]
    pub system_model: Option<String>,
    #[serde(default)]
    pub system_version: Option<String>,
    #[serde(default)]
    pub system_sku: Option<String>,
    #[serde(default)]
    pub system_virtual: Option<bool>,
    #[serde(default)]
    pub system_raspberry_manufacturer: Option<String>,
    #[serde(default)]
    pub system_raspberry_processor: Option<String>,
    #[serde(default)]
    pub system_raspberry_type: Option<String>,
    #[serde(default)]
    pub system_raspberry_revision: Option<String>,

    // Operating system
    #[serde(default)]
    pub os_platform: Option<String>,
    #[serde(default)]
    pub os_distro: Option<String>,
    #[serde(default)]
    pub os_release: Option<String>,
    #[serde(default)]
    pub os_codename: Option<String>,
    #[serde(default)]
    pub os_kernel: Option<String>,
    #[serde(default)]
    pub os_arch: Option<String>,
    #[serde(default)]
    pub os_codepage: Option<String>,
    #[serde(default)]
    pub os_logofile: Option<String>,
    #[serde(default)]
    pub os_build: Option<String>,
    #[serde(default)]
    pub os_servicepack: Option<String>,
    #[serde(default)]
    pub os_uefi: Option<bool>,

    // Docker / container
    #[serde(default)]
    pub docker_architecture: Option<String>,
    #[serde(default)]
    pub docker_ncpu: Option<u32>,
    #[serde(default)]
    pub docker_mem_total: Option<u64>,
    #[serde(default)]
    pub docker_kernel_version: Option<String>,
    #[serde(default)]
    pub docker_operating_system: Option<String>,
    #[serde(default)]
    pub docker_os_type: Option<String>,
    #[serde(default)]
    pub docker_os_version: Option<String>,
    #[serde(default)]
    pub docker_server_version: Option<String>,
}
