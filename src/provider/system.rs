// CPU load/temperature and memory load via sysinfo

use sysinfo::{Components, System};

use super::HardwareUnit;
use crate::models::{HardwareKind, SensorKind, SensorReading};

/// CPU package: total and per-core load, plus CPU-ish component temperatures.
pub(crate) struct CpuUnit {
    sys: System,
    components: Components,
}

const CPU_LABEL_FRAGMENTS: &[&str] = &[
    "coretemp",
    "k10temp",
    "package",
    "tctl",
    "tdie",
    "x86_pkg_temp",
    "cpu",
];

impl CpuUnit {
    pub(crate) fn new() -> Self {
        let mut sys = System::new();
        // Baseline refresh; usage deltas become meaningful from the next poll.
        sys.refresh_cpu_all();
        let components = Components::new_with_refreshed_list();
        Self { sys, components }
    }

    fn is_cpu_label(label: &str) -> bool {
        let label = label.to_ascii_lowercase();
        CPU_LABEL_FRAGMENTS.iter().any(|f| label.contains(f))
    }

    /// AMD chips report Tctl/Tdie; rename so they match the core/package
    /// selection rule the same way the native provider names them.
    fn temperature_name(label: &str) -> String {
        let lower = label.to_ascii_lowercase();
        if lower.contains("tctl") || lower.contains("tdie") {
            "Core (Tctl/Tdie)".to_string()
        } else {
            label.to_string()
        }
    }
}

impl HardwareUnit for CpuUnit {
    fn kind(&self) -> HardwareKind {
        HardwareKind::Cpu
    }

    fn name(&self) -> &str {
        "CPU"
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        self.sys.refresh_cpu_all();
        self.components.refresh(false);
        Ok(())
    }

    fn readings(&self) -> Vec<SensorReading> {
        let mut out = Vec::new();
        out.push(SensorReading::new(
            HardwareKind::Cpu,
            self.name(),
            SensorKind::Load,
            "CPU Total",
            Some(self.sys.global_cpu_usage() as f64),
        ));
        for (i, cpu) in self.sys.cpus().iter().enumerate() {
            out.push(SensorReading::new(
                HardwareKind::Cpu,
                self.name(),
                SensorKind::Load,
                format!("CPU Core #{}", i + 1),
                Some(cpu.cpu_usage() as f64),
            ));
        }
        for component in self.components.list() {
            let label = component.label();
            if !Self::is_cpu_label(label) {
                continue;
            }
            out.push(SensorReading::new(
                HardwareKind::Cpu,
                self.name(),
                SensorKind::Temperature,
                Self::temperature_name(label),
                component.temperature().map(f64::from),
            ));
        }
        out
    }
}

/// Physical memory: load percentage plus swap as "Virtual Memory".
pub(crate) struct MemoryUnit {
    sys: System,
}

impl MemoryUnit {
    pub(crate) fn new() -> Self {
        Self { sys: System::new() }
    }

    fn load_pct(used: u64, total: u64) -> Option<f64> {
        if total > 0 {
            Some((used as f64 / total as f64) * 100.0)
        } else {
            None
        }
    }
}

impl HardwareUnit for MemoryUnit {
    fn kind(&self) -> HardwareKind {
        HardwareKind::Memory
    }

    fn name(&self) -> &str {
        "Total Memory"
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        self.sys.refresh_memory();
        Ok(())
    }

    fn readings(&self) -> Vec<SensorReading> {
        let total = self.sys.total_memory();
        let available = self.sys.available_memory();
        let used = total.saturating_sub(available);
        vec![
            SensorReading::new(
                HardwareKind::Memory,
                self.name(),
                SensorKind::Load,
                "Memory",
                Self::load_pct(used, total),
            ),
            SensorReading::new(
                HardwareKind::Memory,
                self.name(),
                SensorKind::Load,
                "Virtual Memory",
                Self::load_pct(self.sys.used_swap(), self.sys.total_swap()),
            ),
        ]
    }
}
