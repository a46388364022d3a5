// Shared test helpers

#![allow(dead_code)]

use roastmon::models::{HardwareKind, SensorKind, SensorReading};
use roastmon::provider::HardwareUnit;

/// Synthetic hardware unit with canned readings.
pub struct FakeUnit {
    pub kind: HardwareKind,
    pub name: String,
    pub readings: Vec<SensorReading>,
    pub fail_refresh: bool,
}

impl FakeUnit {
    pub fn new(kind: HardwareKind, name: &str, readings: Vec<SensorReading>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            readings,
            fail_refresh: false,
        }
    }

    /// Unit whose refresh always errors, for skip-and-continue tests.
    pub fn failing(kind: HardwareKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            readings: vec![],
            fail_refresh: true,
        }
    }
}

impl HardwareUnit for FakeUnit {
    fn kind(&self) -> HardwareKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        if self.fail_refresh {
            anyhow::bail!("synthetic refresh failure");
        }
        Ok(())
    }

    fn readings(&self) -> Vec<SensorReading> {
        self.readings.clone()
    }
}

pub fn reading(
    hardware: HardwareKind,
    hardware_name: &str,
    sensor: SensorKind,
    name: &str,
    value: Option<f64>,
) -> SensorReading {
    SensorReading::new(hardware, hardware_name, sensor, name, value)
}

/// CPU-unit reading shorthand (the most common fixture).
pub fn cpu_reading(sensor: SensorKind, name: &str, value: Option<f64>) -> SensorReading {
    reading(HardwareKind::Cpu, "CPU", sensor, name, value)
}

/// NVIDIA-unit reading shorthand.
pub fn gpu_reading(sensor: SensorKind, name: &str, value: Option<f64>) -> SensorReading {
    reading(HardwareKind::GpuNvidia, "NVIDIA GeForce RTX 4070", sensor, name, value)
}
