use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_frequency_mhz() -> Option<u64> {
        let contents = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        parse_cpuinfo_mhz(&contents)
    }
}

/// First `cpu MHz` line of /proc/cpuinfo, rounded to whole MHz.
fn parse_cpuinfo_mhz(contents: &str) -> Option<u64> {
    contents.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim() != "cpu MHz" {
            return None;
        }
        let mhz: f64 = value.trim().parse().ok()?;
        (mhz > 0.0).then(|| mhz.round() as u64)
    })
}
