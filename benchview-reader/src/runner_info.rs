//! Runner descriptor mapping.
//!
//! Pure, stateless transforms from a raw [`RunnerRecord`] into the grouped
//! descriptors the UI renders. No caching, no interior state; safe to call
//! concurrently without coordination.

use std::collections::BTreeMap;

use benchview_core::{ContainerInfo, CpuInfo, OsInfo, RunnerInfo, RunnerRecord, SystemInfo};

/// The four descriptor groups derived from one runner record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerDescriptors {
    pub cpu: CpuInfo,
    pub system: SystemInfo,
    pub os: OsInfo,
    pub container: ContainerInfo,
}

/// Split a raw runner record into processor, host system, operating system
/// and container descriptor groups.
pub fn describe_runner(runner: &RunnerRecord) -> RunnerDescriptors {
    let mut cpu = CpuInfo {
        manufacturer: runner.cpu_manufacturer.clone(),
        brand: runner.cpu_brand.clone(),
        vendor: runner.cpu_vendor.clone(),
        family: runner.cpu_family.clone(),
        model: runner.cpu_model.clone(),
        stepping: runner.cpu_stepping.clone(),
        revision: runner.cpu_revision.clone(),
        voltage: runner.cpu_voltage.clone(),
        socket: runner.cpu_socket.clone(),
        flags: runner.cpu_flags.clone(),
        governor: runner.cpu_governor.clone(),
        virtualization: runner.cpu_virtualization,
        speed: runner.cpu_speed,
        minimum_speed: runner.cpu_speed_min,
        maximum_speed: runner.cpu_speed_max,
        cores: runner.cpu_cores,
        physical_cores: runner.cpu_physical_cores,
        performance_cores: runner.cpu_performance_cores,
        efficiency_cores: runner.cpu_efficiency_cores,
        processors: runner.cpu_processors,
        raspberry_processor: runner.system_raspberry_processor.clone(),
        cache: None,
    };

    let mut cache = BTreeMap::new();
    if let Some(l1d) = runner.cpu_cache_l1d {
        cache.insert("l1d".to_string(), l1d);
    }
    if let Some(l1i) = runner.cpu_cache_l1i {
        cache.insert("l1i".to_string(), l1i);
    }
    if let Some(l2) = runner.cpu_cache_l2 {
        cache.insert("l2".to_string(), l2);
    }
    if let Some(l3) = runner.cpu_cache_l3 {
        cache.insert("l3".to_string(), l3);
    }
    if !cache.is_empty() {
        cpu.cache = Some(cache);
    }

    let system = SystemInfo {
        manufacturer: runner.system_manufacturer.clone(),
        model: runner.system_model.clone(),
        version: runner.system_version.clone(),
        sku: runner.system_sku.clone(),
        is_virtual: runner.system_virtual,
        raspberry_manufacturer: runner.system_raspberry_manufacturer.clone(),
        raspberry_type: runner.system_raspberry_type.clone(),
        raspberry_revision: runner.system_raspberry_revision.clone(),
    };

    let os = OsInfo {
        platform: runner.os_platform.clone(),
        distribution: runner.os_distro.clone(),
        release: runner.os_release.clone(),
        code_name: runner.os_codename.clone(),
        kernel: runner.os_kernel.clone(),
        architecture: runner.os_arch.clone(),
        code_page: runner.os_codepage.clone(),
        logo_file: runner.os_logofile.clone(),
        build: runner.os_build.clone(),
        service_pack: runner.os_servicepack.clone(),
        is_uefi: runner.os_uefi,
    };

    let container = ContainerInfo {
        architecture: runner.docker_architecture.clone(),
        cpu_count: runner.docker_ncpu,
        total_memory: runner.docker_mem_total,
        kernel_version: runner.docker_kernel_version.clone(),
        operating_system: runner.docker_operating_system.clone(),
        os_type: runner.docker_os_type.clone(),
        os_version: runner.docker_os_version.clone(),
        server_version: runner.docker_server_version.clone(),
    };

    RunnerDescriptors {
        cpu,
        system,
        os,
        container,
    }
}

/// Project a raw runner record into the `list_runners` shape.
pub fn runner_info(runner: &RunnerRecord) -> RunnerInfo {
    let descriptors = describe_runner(runner);
    RunnerInfo {
        id: runner.id,
        user: runner.name.clone(),
        cpu: descriptors.cpu,
        system: descriptors.system,
        os: descriptors.os,
        container: descriptors.container,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_map_holds_only_present_levels() {
        let runner = RunnerRecord {
            id: 1,
            cpu_cache_l1d: Some(32_768),
            cpu_cache_l3: Some(16_777_216),
            ..RunnerRecord::default()
        };

        let cache = describe_runner(&runner).cpu.cache.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache["l1d"], 32_768);
        assert_eq!(cache["l3"], 16_777_216);
        assert!(!cache.contains_key("l2"));
    }

    #[test]
    fn test_cache_map_absent_when_no_levels_reported() {
        let runner = RunnerRecord {
            id: 1,
            cpu_brand: Some("Cortex-A72".to_string()),
            ..RunnerRecord::default()
        };

        assert_eq!(describe_runner(&runner).cpu.cache, None);
    }

    #[test]
    fn test_descriptor_groups_split_by_prefix() {
        let runner = RunnerRecord {
            id: 8,
            name: Some("rbergen".to_string()),
            cpu_brand: Some("Core i7-9700K".to_string()),
            cpu_speed_max: Some(4.9),
            system_manufacturer: Some("Gigabyte".to_string()),
            system_virtual: Some(false),
            system_raspberry_processor: Some("BCM2711".to_string()),
            os_platform: Some("linux".to_string()),
            os_distro: Some("Debian GNU/Linux".to_string()),
            os_uefi: Some(true),
            docker_architecture: Some("amd64".to_string()),
            docker_ncpu: Some(8),
            docker_mem_total: Some(33_567_408_128),
            ..RunnerRecord::default()
        };

        let d = describe_runner(&runner);
        assert_eq!(d.cpu.brand.as_deref(), Some("Core i7-9700K"));
        assert_eq!(d.cpu.maximum_speed, Some(4.9));
        // Raspberry processor rides on the system_ prefix but belongs to
        // the processor group.
        assert_eq!(d.cpu.raspberry_processor.as_deref(), Some("BCM2711"));
        assert_eq!(d.system.manufacturer.as_deref(), Some("Gigabyte"));
        assert_eq!(d.system.is_virtual, Some(false));
        assert_eq!(d.os.platform.as_deref(), Some("linux"));
        assert_eq!(d.os.is_uefi, Some(true));
        assert_eq!(d.container.architecture.as_deref(), Some("amd64"));
        assert_eq!(d.container.cpu_count, Some(8));
        assert_eq!(d.container.total_memory, Some(33_567_408_128));
    }

    #[test]
    fn test_runner_info_projection() {
        let runner = RunnerRecord {
            id: 21,
            name: Some("flo80".to_string()),
            cpu_vendor: Some("Apple".to_string()),
            ..RunnerRecord::default()
        };

        let info = runner_info(&runner);
        assert_eq!(info.id, 21);
        assert_eq!(info.user.as_deref(), Some("flo80"));
        assert_eq!(info.cpu.vendor.as_deref(), Some("Apple"));
        assert_eq!(info.cpu.cache, None);
    }
}
