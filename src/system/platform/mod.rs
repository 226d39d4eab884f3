pub trait PlatformExtensions {
    fn cpu_frequency_mhz() -> Option<u64>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use fallback as platform_impl;

/// Clock speed read straight from the OS, for hosts where sysinfo reports 0.
pub fn cpu_frequency_mhz() -> Option<u64> {
    platform_impl::Platform::cpu_frequency_mhz()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_does_not_panic() {
        let _ = cpu_frequency_mhz();
    }
}
