// Domain models: raw sensor readings and the wire-format snapshot

use serde::{Deserialize, Serialize};

/// Hardware category a sensor reading belongs to.
/// Closed set so the aggregator's matching rules are exhaustively testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareKind {
    Cpu,
    Memory,
    Motherboard,
    Controller,
    GpuNvidia,
    GpuAmd,
    GpuIntel,
    Storage,
    Network,
}

impl HardwareKind {
    /// Any GPU vendor (the native provider tags them per vendor).
    pub fn is_gpu(&self) -> bool {
        matches!(
            self,
            HardwareKind::GpuNvidia | HardwareKind::GpuAmd | HardwareKind::GpuIntel
        )
    }
}

/// Sensor value class, mirroring the native provider's taxonomy.
/// `SmallData` is the provider's unit for megabyte quantities (VRAM).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Load,
    Temperature,
    SmallData,
    Power,
    Clock,
    Fan,
    Voltage,
}

/// One named, typed reading from one hardware unit.
/// `value: None` means the sensor exists but reported nothing this poll.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub hardware: HardwareKind,
    pub hardware_name: String,
    pub sensor: SensorKind,
    pub name: String,
    pub value: Option<f64>,
}

impl SensorReading {
    pub fn new(
        hardware: HardwareKind,
        hardware_name: impl Into<String>,
        sensor: SensorKind,
        name: impl Into<String>,
        value: Option<f64>,
    ) -> Self {
        Self {
            hardware,
            hardware_name: hardware_name.into(),
            sensor,
            name: name.into(),
            value,
        }
    }
}

/// One normalized snapshot, recreated on every poll. Every field is optional:
/// `None` ("no sensor reported this") serializes as `null` and is distinct
/// from a legitimate zero reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub cpu: Option<f64>,
    pub cpu_temp: Option<f64>,
    pub ram: Option<f64>,
    pub gpu_usage: Option<f64>,
    pub gpu_temp: Option<f64>,
    pub gpu_vram_used: Option<f64>,
    pub gpu_vram_total: Option<f64>,
    pub gpu_power: Option<f64>,
    pub gpu_clock: Option<f64>,
    pub fan_speed: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastResponse {
    pub message: String,
}
