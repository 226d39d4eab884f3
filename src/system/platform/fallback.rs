use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_frequency_mhz() -> Option<u64> {
        None
    }
}
