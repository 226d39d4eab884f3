use super::process::ProcessRow;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UsageSample {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl UsageSample {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        Self {
            used_bytes,
            total_bytes,
        }
    }

    /// Used share of the total in percent, 0 when nothing is installed.
    pub fn percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        ((self.used_bytes as f64 / self.total_bytes as f64) * 100.0).clamp(0.0, 100.0) as f32
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuSample {
    pub usage_percent: f32,
    pub logical_cores: usize,
    pub frequency_mhz: Option<u64>,
    pub temperature_c: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiskSample {
    pub mount_point: String,
    pub usage: UsageSample,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkSample {
    pub total_received: u64,
    pub total_transmitted: u64,
    pub received_per_sec: u64,
    pub transmitted_per_sec: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GpuSample {
    pub name: String,
    pub load_percent: f32,
    pub memory: UsageSample,
    pub temperature_c: Option<u32>,
}

/// Everything read from the host during one tick.
#[derive(Clone, Debug, Default)]
pub struct Sample {
    pub host_name: Option<String>,
    pub cpu: CpuSample,
    pub memory: UsageSample,
    pub swap: UsageSample,
    pub disk: Option<DiskSample>,
    pub network: NetworkSample,
    pub gpu: Option<GpuSample>,
    pub process_count: usize,
    pub processes: Vec<ProcessRow>,
}

impl Sample {
    pub fn disk_percent(&self) -> Option<f32> {
        self.disk.as_ref().map(|d| d.usage.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_empty_total_is_zero() {
        assert_eq!(UsageSample::new(10, 0).percent(), 0.0);
    }

    #[test]
    fn percent_is_clamped() {
        let usage = UsageSample::new(300, 200);
        assert_eq!(usage.percent(), 100.0);
        let usage = UsageSample::new(50, 200);
        assert!((usage.percent() - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_disk_has_no_percent() {
        let sample = Sample::default();
        assert_eq!(sample.disk_percent(), None);
    }
}
