#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Cpu => SortMode::Memory,
            SortMode::Memory => SortMode::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => SortMode::Memory,
            _ => SortMode::Cpu,
        }
    }
}

/// Keep the `limit` heaviest processes under `mode`, ties broken by pid.
pub fn top_processes(mut rows: Vec<ProcessRow>, mode: SortMode, limit: usize) -> Vec<ProcessRow> {
    match mode {
        SortMode::Cpu => rows.sort_by(|a, b| {
            cpu_key(b)
                .total_cmp(&cpu_key(a))
                .then(a.pid.cmp(&b.pid))
        }),
        SortMode::Memory => rows.sort_by(|a, b| {
            b.memory_bytes
                .cmp(&a.memory_bytes)
                .then(a.pid.cmp(&b.pid))
        }),
    }
    rows.truncate(limit);
    rows
}

fn cpu_key(row: &ProcessRow) -> f32 {
    if row.cpu_percent.is_nan() {
        0.0
    } else {
        row.cpu_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pid: u32, cpu: f32, memory: u64) -> ProcessRow {
        ProcessRow {
            pid,
            name: format!("proc_{pid}"),
            cpu_percent: cpu,
            memory_bytes: memory,
        }
    }

    fn rows() -> Vec<ProcessRow> {
        vec![
            row(1, 5.0, 900),
            row(2, 90.0, 100),
            row(3, 50.0, 300),
            row(4, 50.0, 200),
            row(5, f32::NAN, 50),
        ]
    }

    #[test]
    fn cpu_sort_orders_descending_and_truncates() {
        let top = top_processes(rows(), SortMode::Cpu, 3);
        let pids: Vec<u32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 3, 4]);
    }

    #[test]
    fn memory_sort_orders_descending() {
        let top = top_processes(rows(), SortMode::Memory, 2);
        let pids: Vec<u32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1, 3]);
    }

    #[test]
    fn limit_larger_than_input_keeps_all() {
        assert_eq!(top_processes(rows(), SortMode::Memory, 50).len(), 5);
    }

    #[test]
    fn sort_mode_cycles() {
        assert_eq!(SortMode::Cpu.next(), SortMode::Memory);
        assert_eq!(SortMode::Cpu.next().next(), SortMode::Cpu);
        assert_eq!(SortMode::from_str_config("MEM"), SortMode::Memory);
        assert_eq!(SortMode::from_str_config("bogus"), SortMode::Cpu);
    }
}
