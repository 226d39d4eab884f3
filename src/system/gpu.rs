use super::snapshot::GpuSample;

/// Source of GPU readings. Implementations return `None` whenever nothing
/// can be read, so a host without a GPU never interrupts sampling.
pub trait GpuProbe {
    fn sample(&mut self) -> Option<GpuSample>;
}

/// Probe for hosts without a supported GPU.
#[derive(Debug, Default)]
pub struct NoGpu;

impl GpuProbe for NoGpu {
    fn sample(&mut self) -> Option<GpuSample> {
        None
    }
}

#[cfg(feature = "nvidia")]
pub use nvidia::NvmlProbe;

#[cfg(feature = "nvidia")]
mod nvidia {
    use nvml_wrapper::Nvml;
    use nvml_wrapper::enum_wrappers::device::TemperatureSensor;

    use super::GpuProbe;
    use crate::system::snapshot::{GpuSample, UsageSample};

    /// Reads the first NVIDIA device through NVML.
    pub struct NvmlProbe {
        nvml: Nvml,
    }

    impl NvmlProbe {
        pub fn init() -> Option<Self> {
            let nvml = match Nvml::init() {
                Ok(nvml) => nvml,
                Err(err) => {
                    tracing::debug!(error = %err, "nvml unavailable");
                    return None;
                }
            };
            match nvml.device_count() {
                Ok(count) if count > 0 => Some(Self { nvml }),
                _ => {
                    tracing::debug!("nvml reports no devices");
                    None
                }
            }
        }
    }

    impl GpuProbe for NvmlProbe {
        fn sample(&mut self) -> Option<GpuSample> {
            let device = self.nvml.device_by_index(0).ok()?;
            let name = device
                .name()
                .unwrap_or_else(|_| "NVIDIA GPU".to_string());
            let load_percent = device.utilization_rates().ok()?.gpu as f32;
            let memory = device
                .memory_info()
                .map(|mem| UsageSample::new(mem.used, mem.total))
                .unwrap_or_default();
            let temperature_c = device.temperature(TemperatureSensor::Gpu).ok();
            Some(GpuSample {
                name,
                load_percent,
                memory,
                temperature_c,
            })
        }
    }
}

/// Best available probe for this build and host.
#[cfg(feature = "nvidia")]
pub fn detect() -> Box<dyn GpuProbe> {
    match NvmlProbe::init() {
        Some(probe) => Box::new(probe),
        None => Box::new(NoGpu),
    }
}

#[cfg(not(feature = "nvidia"))]
pub fn detect() -> Box<dyn GpuProbe> {
    Box::new(NoGpu)
}
