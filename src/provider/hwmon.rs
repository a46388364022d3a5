// Motherboard temperatures and fan tachometers from /sys/class/hwmon.
// CPU thermal chips are already covered by the sysinfo-backed CPU unit and
// skipped here; fan RPM has no sysinfo equivalent, so this is its only source.

use std::fs;
use std::path::{Path, PathBuf};

use super::HardwareUnit;
use crate::models::{HardwareKind, SensorKind, SensorReading};

const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Chips whose readings other units already provide (CPU) or whose category
/// is disabled by design (storage).
const SKIPPED_CHIPS: &[&str] = &["coretemp", "k10temp", "zenpower", "nvme", "drivetemp"];

pub(crate) fn discover() -> Vec<Box<dyn HardwareUnit>> {
    discover_under(Path::new(HWMON_ROOT))
}

fn discover_under(root: &Path) -> Vec<Box<dyn HardwareUnit>> {
    let mut units: Vec<Box<dyn HardwareUnit>> = Vec::new();
    let Ok(entries) = fs::read_dir(root) else {
        return units;
    };
    for entry in entries.flatten() {
        let base = entry.path();
        let chip_name = fs::read_to_string(base.join("name"))
            .unwrap_or_default()
            .trim()
            .to_string();
        if chip_name.is_empty() || SKIPPED_CHIPS.contains(&chip_name.as_str()) {
            continue;
        }
        let channels = discover_channels(&base);
        if channels.is_empty() {
            continue;
        }
        units.push(Box::new(HwmonChip {
            name: chip_name,
            channels,
        }));
    }
    units
}

fn discover_channels(base: &Path) -> Vec<Channel> {
    let mut channels = Vec::new();
    let Ok(files) = fs::read_dir(base) else {
        return channels;
    };
    for file in files.flatten() {
        let path = file.path();
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(channel_id) = file_name.strip_suffix("_input") else {
            continue;
        };
        let sensor = if channel_id.starts_with("temp") {
            SensorKind::Temperature
        } else if channel_id.starts_with("fan") {
            SensorKind::Fan
        } else {
            continue;
        };
        let name = read_label(base, channel_id).unwrap_or_else(|| default_label(sensor, channel_id));
        channels.push(Channel {
            sensor,
            name,
            path,
            value: None,
        });
    }
    channels.sort_by(|a, b| a.path.cmp(&b.path));
    channels
}

fn read_label(base: &Path, channel_id: &str) -> Option<String> {
    let label = fs::read_to_string(base.join(format!("{channel_id}_label"))).ok()?;
    let label = label.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

fn default_label(sensor: SensorKind, channel_id: &str) -> String {
    let index = channel_id.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    match sensor {
        SensorKind::Fan => format!("Fan #{index}"),
        _ => format!("Temperature #{index}"),
    }
}

struct Channel {
    sensor: SensorKind,
    name: String,
    path: PathBuf,
    value: Option<f64>,
}

impl Channel {
    fn read(&self) -> Option<f64> {
        let raw: f64 = fs::read_to_string(&self.path).ok()?.trim().parse().ok()?;
        match self.sensor {
            // Temperatures are millidegrees; some drivers export degrees.
            SensorKind::Temperature if raw > 1000.0 => Some(raw / 1000.0),
            _ => Some(raw),
        }
    }
}

struct HwmonChip {
    name: String,
    channels: Vec<Channel>,
}

impl HardwareUnit for HwmonChip {
    fn kind(&self) -> HardwareKind {
        HardwareKind::Motherboard
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        for channel in &mut self.channels {
            channel.value = channel.read();
        }
        Ok(())
    }

    fn readings(&self) -> Vec<SensorReading> {
        self.channels
            .iter()
            .map(|c| {
                SensorReading::new(
                    HardwareKind::Motherboard,
                    self.name.as_str(),
                    c.sensor,
                    c.name.as_str(),
                    c.value,
                )
            })
            .collect()
    }
}
