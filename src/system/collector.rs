use std::path::Path;
use std::time::Instant;

use sysinfo::{Components, Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::gpu::{self, GpuProbe};
use super::platform;
use super::process::ProcessRow;
use super::sensors;
use super::snapshot::{CpuSample, DiskSample, NetworkSample, Sample, UsageSample};

pub const DEFAULT_DISK_MOUNT: &str = "/";

/// Mount point and capacity figures for one disk, decoupled from sysinfo.
#[derive(Clone, Debug, PartialEq)]
pub struct DiskUsage {
    pub mount_point: String,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Disk mounted at `mount`, or the largest disk when nothing is mounted there.
pub fn select_disk(disks: &[DiskUsage], mount: &str) -> Option<DiskSample> {
    let chosen = disks
        .iter()
        .find(|d| d.mount_point == mount)
        .or_else(|| disks.iter().max_by_key(|d| d.total_bytes))?;
    let used = chosen.total_bytes.saturating_sub(chosen.available_bytes);
    Some(DiskSample {
        mount_point: chosen.mount_point.clone(),
        usage: UsageSample::new(used, chosen.total_bytes),
    })
}

/// Turns cumulative interface counters into totals plus per-second rates.
#[derive(Debug, Default)]
pub struct NetworkMeter {
    previous: Option<(u64, u64, Instant)>,
}

impl NetworkMeter {
    pub fn update(&mut self, received: u64, transmitted: u64, now: Instant) -> NetworkSample {
        let (received_per_sec, transmitted_per_sec) = match self.previous {
            Some((prev_rx, prev_tx, at)) => {
                let elapsed = now.saturating_duration_since(at).as_secs_f64();
                if elapsed > 0.0 {
                    (
                        (received.saturating_sub(prev_rx) as f64 / elapsed) as u64,
                        (transmitted.saturating_sub(prev_tx) as f64 / elapsed) as u64,
                    )
                } else {
                    (0, 0)
                }
            }
            None => (0, 0),
        };
        self.previous = Some((received, transmitted, now));
        NetworkSample {
            total_received: received,
            total_transmitted: transmitted,
            received_per_sec,
            transmitted_per_sec,
        }
    }
}

pub struct Collector {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    gpu: Box<dyn GpuProbe>,
    network_meter: NetworkMeter,
    disk_mount: String,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(DEFAULT_DISK_MOUNT)
    }
}

impl Collector {
    pub fn new(disk_mount: &str) -> Self {
        Self::with_gpu_probe(disk_mount, gpu::detect())
    }

    pub fn with_gpu_probe(disk_mount: &str, gpu: Box<dyn GpuProbe>) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        Collector {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            gpu,
            network_meter: NetworkMeter::default(),
            disk_mount: disk_mount.to_string(),
        }
    }

    pub fn refresh(&mut self) -> Sample {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        self.disks.refresh(true);
        self.networks.refresh(true);
        self.components.refresh(true);
        self.build_sample()
    }

    fn build_sample(&mut self) -> Sample {
        let _sample_span = tracing::debug_span!("collector.build_sample").entered();

        let cpus = self.sys.cpus();
        let cpu = CpuSample {
            usage_percent: self.sys.global_cpu_usage(),
            logical_cores: cpus.len(),
            frequency_mhz: cpus
                .first()
                .map(|c| c.frequency())
                .filter(|&f| f > 0)
                .or_else(platform::cpu_frequency_mhz),
            temperature_c: sensors::cpu_temperature(&self.components),
        };

        let disks: Vec<DiskUsage> = self
            .disks
            .list()
            .iter()
            .map(|disk| DiskUsage {
                mount_point: mount_label(disk.mount_point()),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect();
        let disk = select_disk(&disks, &self.disk_mount);
        if disk.is_none() {
            tracing::debug!(mount = %self.disk_mount, "no disk available");
        }

        let (received, transmitted) = self
            .networks
            .list()
            .values()
            .fold((0u64, 0u64), |(rx, tx), data| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            });
        let network = self
            .network_meter
            .update(received, transmitted, Instant::now());

        let processes: Vec<ProcessRow> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRow {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cpu_percent: process.cpu_usage(),
                memory_bytes: process.memory(),
            })
            .collect();

        Sample {
            host_name: System::host_name(),
            cpu,
            memory: UsageSample::new(self.sys.used_memory(), self.sys.total_memory()),
            swap: UsageSample::new(self.sys.used_swap(), self.sys.total_swap()),
            disk,
            network,
            gpu: self.gpu.sample(),
            process_count: processes.len(),
            processes,
        }
    }
}

fn mount_label(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
