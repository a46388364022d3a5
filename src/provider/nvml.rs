// NVIDIA GPU readings via NVML

use std::ffi::OsStr;
use std::sync::Arc;

use nvml_wrapper::Nvml;
use nvml_wrapper::enum_wrappers::device::{Clock, TemperatureSensor};

use super::{HardwareUnit, ProviderError};
use crate::models::{HardwareKind, SensorKind, SensorReading};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Opens the NVML session and returns one unit per device. A missing or
/// broken library is a `ProviderError`; zero devices is not.
pub(crate) fn open_devices(lib_path: &str) -> Result<Vec<Box<dyn HardwareUnit>>, ProviderError> {
    let nvml = if lib_path.is_empty() {
        Nvml::init()?
    } else {
        Nvml::builder().lib_path(OsStr::new(lib_path)).init()?
    };
    let nvml = Arc::new(nvml);
    let count = nvml.device_count()?;
    if count == 0 {
        tracing::warn!("NVML initialized but reported no devices");
    }
    let mut units: Vec<Box<dyn HardwareUnit>> = Vec::with_capacity(count as usize);
    for index in 0..count {
        let name = nvml
            .device_by_index(index)
            .and_then(|d| d.name())
            .unwrap_or_else(|_| format!("NVIDIA GPU #{index}"));
        tracing::info!(index, name = %name, "GPU device found");
        units.push(Box::new(NvmlGpuUnit {
            nvml: nvml.clone(),
            index,
            name,
            cache: Vec::new(),
        }));
    }
    Ok(units)
}

/// One NVIDIA device. Device handles borrow the NVML session, so the unit
/// holds the session and re-acquires the device on each refresh; readings
/// come from the cache the last refresh filled.
struct NvmlGpuUnit {
    nvml: Arc<Nvml>,
    index: u32,
    name: String,
    cache: Vec<SensorReading>,
}

impl NvmlGpuUnit {
    fn reading(&self, sensor: SensorKind, name: &str, value: f64) -> SensorReading {
        SensorReading::new(
            HardwareKind::GpuNvidia,
            self.name.as_str(),
            sensor,
            name,
            Some(value),
        )
    }
}

impl HardwareUnit for NvmlGpuUnit {
    fn kind(&self) -> HardwareKind {
        HardwareKind::GpuNvidia
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        let device = self
            .nvml
            .device_by_index(self.index)
            .map_err(|e| anyhow::anyhow!("GPU #{}: {}", self.index, e))?;

        // Individual sensors may be unsupported on a given board; each one
        // missing just leaves its reading out of this poll.
        let mut cache = Vec::new();
        if let Ok(util) = device.utilization_rates() {
            cache.push(self.reading(SensorKind::Load, "GPU Core", util.gpu as f64));
        }
        if let Ok(temp) = device.temperature(TemperatureSensor::Gpu) {
            cache.push(self.reading(SensorKind::Temperature, "GPU Core", temp as f64));
        }
        if let Ok(mem) = device.memory_info() {
            cache.push(self.reading(
                SensorKind::SmallData,
                "GPU Memory Used",
                mem.used as f64 / BYTES_PER_MB,
            ));
            cache.push(self.reading(
                SensorKind::SmallData,
                "GPU Memory Total",
                mem.total as f64 / BYTES_PER_MB,
            ));
        }
        if let Ok(milliwatts) = device.power_usage() {
            cache.push(self.reading(SensorKind::Power, "GPU Package", milliwatts as f64 / 1000.0));
        }
        if let Ok(mhz) = device.clock_info(Clock::Graphics) {
            cache.push(self.reading(SensorKind::Clock, "GPU Core", mhz as f64));
        }
        self.cache = cache;
        Ok(())
    }

    fn readings(&self) -> Vec<SensorReading> {
        self.cache.clone()
    }
}
