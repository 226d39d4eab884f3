use std::collections::VecDeque;

use super::snapshot::Sample;

pub const DEFAULT_CAPACITY: usize = 10;

/// Per-tick usage summary kept in the rolling history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub cpu: f32,
    pub memory: f32,
    pub disk: Option<f32>,
}

impl HistoryEntry {
    pub fn new(cpu: f32, memory: f32, disk: Option<f32>) -> Self {
        Self { cpu, memory, disk }
    }

    pub fn from_sample(sample: &Sample) -> Self {
        Self {
            cpu: sample.cpu.usage_percent,
            memory: sample.memory.percent(),
            disk: sample.disk_percent(),
        }
    }
}

/// Fixed-size ring of history entries, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// CPU usage scaled to hundredths of a percent, for sparkline rendering.
    pub fn cpu_series(&self) -> Vec<u64> {
        self.entries
            .iter()
            .map(|e| (e.cpu.clamp(0.0, 100.0) * 100.0) as u64)
            .collect()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(i: usize) -> HistoryEntry {
        HistoryEntry::new(i as f32, i as f32 / 2.0, Some(50.0))
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut history = HistoryBuffer::new(10);
        history.push(entry(1));
        history.push(entry(2));
        let cpus: Vec<f32> = history.iter().map(|e| e.cpu).collect();
        assert_eq!(cpus, vec![1.0, 2.0]);
        assert_eq!(history.latest().map(|e| e.cpu), Some(2.0));
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut history = HistoryBuffer::new(3);
        for i in 0..5 {
            history.push(entry(i));
        }
        assert_eq!(history.len(), 3);
        let cpus: Vec<f32> = history.iter().map(|e| e.cpu).collect();
        assert_eq!(cpus, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut history = HistoryBuffer::new(0);
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|e| e.cpu), Some(2.0));
    }

    #[test]
    fn cpu_series_scales_and_clamps() {
        let mut history = HistoryBuffer::new(4);
        history.push(HistoryEntry::new(12.5, 0.0, None));
        history.push(HistoryEntry::new(150.0, 0.0, None));
        assert_eq!(history.cpu_series(), vec![1250, 10000]);
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(capacity in 1usize..32, pushes in 0usize..200) {
            let mut history = HistoryBuffer::new(capacity);
            for i in 0..pushes {
                history.push(entry(i));
                prop_assert!(history.len() <= capacity);
            }
            prop_assert_eq!(history.len(), pushes.min(capacity));
        }

        #[test]
        fn retains_most_recent_in_order(capacity in 1usize..32, pushes in 1usize..200) {
            let mut history = HistoryBuffer::new(capacity);
            for i in 0..pushes {
                history.push(entry(i));
            }
            let first = pushes.saturating_sub(capacity);
            let expected: Vec<f32> = (first..pushes).map(|i| i as f32).collect();
            let actual: Vec<f32> = history.iter().map(|e| e.cpu).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
