// Snapshot computation: a deterministic filter-and-reduce over sensor readings

use std::sync::{Arc, Mutex};

use crate::models::{HardwareKind, SensorKind, SensorReading, SystemStats};
use crate::provider::HardwareUnit;

/// Snapshot field a rule feeds. Fan speeds are collected separately.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Cpu,
    CpuTemp,
    Ram,
    GpuUsage,
    GpuTemp,
    GpuVramUsed,
    GpuVramTotal,
    GpuPower,
    GpuClock,
}

#[derive(Debug, Clone, Copy)]
enum HwMatch {
    Exact(HardwareKind),
    AnyGpu,
}

#[derive(Debug, Clone, Copy)]
enum NameMatch {
    Exact(&'static str),
    ContainsAny(&'static [&'static str]),
}

/// How multiple matching readings combine. Iteration order is the provider's
/// unit order, so both reducers are deterministic for a fixed reading list.
#[derive(Debug, Clone, Copy)]
enum Reduce {
    LastWins,
    RunningMax,
}

struct Rule {
    slot: Slot,
    hardware: HwMatch,
    /// Extra filter on the owning unit's display name (RAM only).
    unit_name_contains: Option<&'static str>,
    sensor: SensorKind,
    name: NameMatch,
    /// Drop non-positive values before they reach the reducer.
    positive_only: bool,
    reduce: Reduce,
    decimals: i32,
}

const RULES: &[Rule] = &[
    Rule {
        slot: Slot::Cpu,
        hardware: HwMatch::Exact(HardwareKind::Cpu),
        unit_name_contains: None,
        sensor: SensorKind::Load,
        name: NameMatch::Exact("CPU Total"),
        positive_only: false,
        reduce: Reduce::LastWins,
        decimals: 1,
    },
    Rule {
        slot: Slot::CpuTemp,
        hardware: HwMatch::Exact(HardwareKind::Cpu),
        unit_name_contains: None,
        sensor: SensorKind::Temperature,
        name: NameMatch::ContainsAny(&["Core", "Package"]),
        positive_only: true,
        reduce: Reduce::RunningMax,
        decimals: 1,
    },
    Rule {
        slot: Slot::Ram,
        hardware: HwMatch::Exact(HardwareKind::Memory),
        unit_name_contains: Some("Total"),
        sensor: SensorKind::Load,
        name: NameMatch::Exact("Memory"),
        positive_only: false,
        reduce: Reduce::LastWins,
        decimals: 1,
    },
    Rule {
        slot: Slot::GpuUsage,
        hardware: HwMatch::AnyGpu,
        unit_name_contains: None,
        sensor: SensorKind::Load,
        name: NameMatch::Exact("GPU Core"),
        positive_only: false,
        reduce: Reduce::RunningMax,
        decimals: 1,
    },
    Rule {
        slot: Slot::GpuTemp,
        hardware: HwMatch::AnyGpu,
        unit_name_contains: None,
        sensor: SensorKind::Temperature,
        name: NameMatch::ContainsAny(&["Core", "Hot Spot"]),
        positive_only: true,
        reduce: Reduce::RunningMax,
        decimals: 1,
    },
    Rule {
        slot: Slot::GpuVramUsed,
        hardware: HwMatch::AnyGpu,
        unit_name_contains: None,
        sensor: SensorKind::SmallData,
        name: NameMatch::Exact("GPU Memory Used"),
        positive_only: false,
        reduce: Reduce::RunningMax,
        decimals: 0,
    },
    Rule {
        slot: Slot::GpuVramTotal,
        hardware: HwMatch::AnyGpu,
        unit_name_contains: None,
        sensor: SensorKind::SmallData,
        name: NameMatch::Exact("GPU Memory Total"),
        positive_only: false,
        reduce: Reduce::RunningMax,
        decimals: 0,
    },
    Rule {
        slot: Slot::GpuPower,
        hardware: HwMatch::AnyGpu,
        unit_name_contains: None,
        sensor: SensorKind::Power,
        name: NameMatch::ContainsAny(&["Package"]),
        positive_only: false,
        reduce: Reduce::LastWins,
        decimals: 1,
    },
    Rule {
        slot: Slot::GpuClock,
        hardware: HwMatch::AnyGpu,
        unit_name_contains: None,
        sensor: SensorKind::Clock,
        name: NameMatch::Exact("GPU Core"),
        positive_only: false,
        reduce: Reduce::RunningMax,
        decimals: 0,
    },
];

impl Rule {
    fn matches(&self, reading: &SensorReading) -> bool {
        let hardware_ok = match self.hardware {
            HwMatch::Exact(kind) => reading.hardware == kind,
            HwMatch::AnyGpu => reading.hardware.is_gpu(),
        };
        if !hardware_ok || reading.sensor != self.sensor {
            return false;
        }
        if let Some(fragment) = self.unit_name_contains
            && !reading.hardware_name.contains(fragment)
        {
            return false;
        }
        match self.name {
            NameMatch::Exact(name) => reading.name == name,
            NameMatch::ContainsAny(fragments) => {
                fragments.iter().any(|f| reading.name.contains(f))
            }
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn slot_mut(stats: &mut SystemStats, slot: Slot) -> &mut Option<f64> {
    match slot {
        Slot::Cpu => &mut stats.cpu,
        Slot::CpuTemp => &mut stats.cpu_temp,
        Slot::Ram => &mut stats.ram,
        Slot::GpuUsage => &mut stats.gpu_usage,
        Slot::GpuTemp => &mut stats.gpu_temp,
        Slot::GpuVramUsed => &mut stats.gpu_vram_used,
        Slot::GpuVramTotal => &mut stats.gpu_vram_total,
        Slot::GpuPower => &mut stats.gpu_power,
        Slot::GpuClock => &mut stats.gpu_clock,
    }
}

/// Reduces one poll's readings to a snapshot. Deterministic for a fixed input
/// sequence; readings without a value never influence any field. Stored
/// values are already rounded, and running max compares the raw incoming
/// value against that rounded accumulator.
pub fn reduce(readings: impl IntoIterator<Item = SensorReading>) -> SystemStats {
    let mut stats = SystemStats::default();
    let mut fans: Vec<String> = Vec::new();

    for reading in readings {
        let Some(value) = reading.value else {
            continue;
        };

        if reading.sensor == SensorKind::Fan {
            fans.push(format!("{} RPM", value as i64));
            continue;
        }

        for rule in RULES {
            if !rule.matches(&reading) {
                continue;
            }
            if rule.positive_only && value <= 0.0 {
                continue;
            }
            let slot = slot_mut(&mut stats, rule.slot);
            let next = match rule.reduce {
                Reduce::LastWins => round_to(value, rule.decimals),
                Reduce::RunningMax => {
                    let current = slot.unwrap_or(0.0);
                    if rule.decimals == 0 {
                        // Whole-number slots only move when the raw value beats
                        // the stored one.
                        if value > current {
                            round_to(value, 0)
                        } else {
                            current
                        }
                    } else {
                        round_to(current.max(value), rule.decimals)
                    }
                }
            };
            *slot = Some(next);
        }
    }

    if !fans.is_empty() {
        stats.fan_speed = Some(fans.join(", "));
    }
    stats
}

/// Owns the provider session and computes fresh snapshots on demand.
/// Refresh + read runs on the blocking pool; a unit whose refresh fails is
/// skipped so a single dead backend cannot blank the whole snapshot.
pub struct Aggregator {
    units: Arc<Mutex<Vec<Box<dyn HardwareUnit>>>>,
}

impl Aggregator {
    pub fn new(units: Vec<Box<dyn HardwareUnit>>) -> Self {
        Self {
            units: Arc::new(Mutex::new(units)),
        }
    }

    /// Never fails: partial (or empty) snapshots are still snapshots.
    pub async fn snapshot(&self) -> SystemStats {
        let units = self.units.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut units = match units.lock() {
                Ok(units) => units,
                Err(e) => {
                    tracing::warn!(error = %e, "sensor units lock poisoned");
                    return SystemStats::default();
                }
            };
            let mut readings = Vec::new();
            for unit in units.iter_mut() {
                if let Err(e) = unit.refresh() {
                    tracing::warn!(unit = unit.name(), error = %e, "sensor refresh failed; skipping unit");
                    continue;
                }
                readings.extend(unit.readings());
            }
            reduce(readings)
        });
        match task.await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot task join failed");
                SystemStats::default()
            }
        }
    }
}
