// Native sensor backends behind one per-unit refresh/read interface

#[cfg(target_os = "linux")]
mod hwmon;
mod nvml;
mod system;

use crate::config::SensorConfig;
use crate::models::{HardwareKind, SensorReading};

/// One hardware unit as the native layer sees it: a type tag, a display name,
/// and a list of named sensor readings. `refresh` must be called before
/// `readings`; the backends do not auto-refresh.
pub trait HardwareUnit: Send {
    fn kind(&self) -> HardwareKind;
    fn name(&self) -> &str;
    fn refresh(&mut self) -> anyhow::Result<()>;
    fn readings(&self) -> Vec<SensorReading>;
}

/// Failure to open the native provider session. Fatal at startup: callers log
/// the cause and exit nonzero instead of falling back to synthetic data.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("NVML could not be located or initialized: {0}")]
    Nvml(#[from] nvml_wrapper::error::NvmlError),
}

/// Opens units for every enabled sensor category. Storage and network are
/// accepted in the config for parity with the native provider's category
/// flags but construct nothing.
pub fn open_units(config: &SensorConfig) -> Result<Vec<Box<dyn HardwareUnit>>, ProviderError> {
    let mut units: Vec<Box<dyn HardwareUnit>> = Vec::new();
    if config.cpu {
        units.push(Box::new(system::CpuUnit::new()));
    }
    if config.memory {
        units.push(Box::new(system::MemoryUnit::new()));
    }
    if config.gpu {
        units.extend(nvml::open_devices(&config.nvml_path)?);
    }
    #[cfg(target_os = "linux")]
    if config.motherboard || config.controller {
        units.extend(hwmon::discover());
    }
    tracing::info!(units = units.len(), "sensor provider session opened");
    Ok(units)
}
