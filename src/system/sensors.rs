use sysinfo::Components;

const PREFERRED_SENSOR: &str = "coretemp";
const FALLBACK_SENSORS: [&str; 4] = ["k10temp", "tctl", "package", "cpu"];

/// Picks the CPU temperature out of `(label, reading)` pairs.
///
/// Intel `coretemp` wins when present; other CPU sensor families are only
/// consulted when it is missing. Non-finite readings count as missing.
pub fn pick_cpu_temperature<'a, I>(readings: I) -> Option<f32>
where
    I: IntoIterator<Item = (&'a str, Option<f32>)>,
{
    let readings: Vec<(String, f32)> = readings
        .into_iter()
        .filter_map(|(label, temp)| {
            let temp = temp.filter(|t| t.is_finite())?;
            Some((label.to_lowercase(), temp))
        })
        .collect();

    if let Some((_, temp)) = readings
        .iter()
        .find(|(label, _)| label.starts_with(PREFERRED_SENSOR))
    {
        return Some(*temp);
    }

    FALLBACK_SENSORS.iter().find_map(|family| {
        readings
            .iter()
            .find(|(label, _)| label.contains(family))
            .map(|(_, temp)| *temp)
    })
}

pub fn cpu_temperature(components: &Components) -> Option<f32> {
    let temp = pick_cpu_temperature(
        components
            .list()
            .iter()
            .map(|component| (component.label(), component.temperature())),
    );
    if temp.is_none() {
        tracing::debug!(
            components = components.list().len(),
            "no cpu temperature sensor found"
        );
    }
    temp
}
