use hostwatch::format::{PLACEHOLDER, or_placeholder};
use hostwatch::system::collector::Collector;
use hostwatch::system::gpu::{GpuProbe, NoGpu};
use hostwatch::system::history::HistoryEntry;
use hostwatch::system::sensors::pick_cpu_temperature;
use hostwatch::system::snapshot::{GpuSample, UsageSample};

/// Probe whose driver vanished after start-up.
struct FailingProbe {
    calls: usize,
}

impl GpuProbe for FailingProbe {
    fn sample(&mut self) -> Option<GpuSample> {
        self.calls += 1;
        None
    }
}

struct FixedProbe;

impl GpuProbe for FixedProbe {
    fn sample(&mut self) -> Option<GpuSample> {
        Some(GpuSample {
            name: "Fake GPU".to_string(),
            load_percent: 12.0,
            memory: UsageSample::new(1, 2),
            temperature_c: None,
        })
    }
}

#[test]
fn missing_gpu_keeps_sampling() {
    let mut collector = Collector::with_gpu_probe("/", Box::new(FailingProbe { calls: 0 }));
    for _ in 0..3 {
        let sample = collector.refresh();
        assert!(sample.gpu.is_none());
        let entry = HistoryEntry::from_sample(&sample);
        assert!((0.0..=100.0).contains(&entry.memory));
    }
}

#[test]
fn gpu_probe_output_reaches_the_sample() {
    let mut collector = Collector::with_gpu_probe("/", Box::new(FixedProbe));
    let sample = collector.refresh();
    let gpu = sample.gpu.expect("fixed probe always reports");
    assert_eq!(gpu.name, "Fake GPU");
    assert_eq!(or_placeholder(gpu.temperature_c, |t| format!("{t}°C")), PLACEHOLDER);
}

#[test]
fn unknown_disk_mount_still_samples() {
    let mut collector =
        Collector::with_gpu_probe("/definitely/not/a/mount", Box::new(NoGpu));
    let sample = collector.refresh();
    if let Some(disk) = sample.disk {
        assert_ne!(disk.mount_point, "/definitely/not/a/mount");
    }
}

#[test]
fn missing_coretemp_degrades_to_placeholder() {
    let temp = pick_cpu_temperature([("acpitz temp1", Some(27.8)), ("nvme Composite", None)]);
    assert_eq!(temp, None);
    assert_eq!(or_placeholder(temp, |t| format!("{t:.0}°C")), "N/A");
}
