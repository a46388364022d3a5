// Selection/reduction rules and snapshot computation

mod common;

use common::{FakeUnit, cpu_reading, gpu_reading, reading};
use roastmon::aggregator::{Aggregator, reduce};
use roastmon::models::{HardwareKind, SensorKind, SystemStats};

#[test]
fn test_cpu_total_rounds_to_one_decimal() {
    let stats = reduce([cpu_reading(SensorKind::Load, "CPU Total", Some(57.26))]);
    assert_eq!(stats.cpu, Some(57.3));
}

#[test]
fn test_cpu_total_last_match_wins() {
    let stats = reduce([
        cpu_reading(SensorKind::Load, "CPU Total", Some(57.26)),
        cpu_reading(SensorKind::Load, "CPU Total", Some(12.04)),
    ]);
    assert_eq!(stats.cpu, Some(12.0));
}

#[test]
fn test_per_core_loads_do_not_feed_cpu_total() {
    let stats = reduce([cpu_reading(SensorKind::Load, "CPU Core #1", Some(99.0))]);
    assert_eq!(stats.cpu, None);
}

#[test]
fn test_absent_value_never_influences_any_field() {
    let stats = reduce([
        cpu_reading(SensorKind::Load, "CPU Total", None),
        cpu_reading(SensorKind::Temperature, "Core (Tctl/Tdie)", None),
        gpu_reading(SensorKind::Fan, "Fan #1", None),
    ]);
    assert_eq!(stats, SystemStats::default());
}

#[test]
fn test_cpu_temp_zero_is_ignored() {
    let stats = reduce([cpu_reading(SensorKind::Temperature, "Package id 0", Some(0.0))]);
    assert_eq!(stats.cpu_temp, None);
}

#[test]
fn test_cpu_temp_negative_is_ignored() {
    let stats = reduce([cpu_reading(SensorKind::Temperature, "Core 0", Some(-5.0))]);
    assert_eq!(stats.cpu_temp, None);
}

#[test]
fn test_cpu_temp_running_max_keeps_rounded_peak() {
    let stats = reduce([
        cpu_reading(SensorKind::Temperature, "Core 0", Some(42.37)),
        cpu_reading(SensorKind::Temperature, "Package id 0", Some(38.1)),
    ]);
    assert_eq!(stats.cpu_temp, Some(42.4));
}

#[test]
fn test_cpu_temp_requires_core_or_package_in_name() {
    let stats = reduce([cpu_reading(SensorKind::Temperature, "Junction", Some(70.0))]);
    assert_eq!(stats.cpu_temp, None);
}

#[test]
fn test_ram_requires_total_in_unit_name() {
    let matched = reduce([reading(
        HardwareKind::Memory,
        "Total Memory",
        SensorKind::Load,
        "Memory",
        Some(63.57),
    )]);
    assert_eq!(matched.ram, Some(63.6));

    let unmatched = reduce([reading(
        HardwareKind::Memory,
        "Swap",
        SensorKind::Load,
        "Memory",
        Some(63.57),
    )]);
    assert_eq!(unmatched.ram, None);
}

#[test]
fn test_gpu_usage_running_max_across_devices() {
    let stats = reduce([
        gpu_reading(SensorKind::Load, "GPU Core", Some(55.55)),
        reading(
            HardwareKind::GpuAmd,
            "Radeon iGPU",
            SensorKind::Load,
            "GPU Core",
            Some(61.24),
        ),
    ]);
    assert_eq!(stats.gpu_usage, Some(61.2));
}

#[test]
fn test_gpu_fields_ignore_non_gpu_hardware() {
    let stats = reduce([cpu_reading(SensorKind::Load, "GPU Core", Some(88.0))]);
    assert_eq!(stats.gpu_usage, None);
}

#[test]
fn test_gpu_temp_accepts_hot_spot_with_positive_guard() {
    let stats = reduce([
        gpu_reading(SensorKind::Temperature, "GPU Hot Spot", Some(0.0)),
        gpu_reading(SensorKind::Temperature, "GPU Hot Spot", Some(74.92)),
        gpu_reading(SensorKind::Temperature, "GPU Memory", Some(95.0)),
    ]);
    assert_eq!(stats.gpu_temp, Some(74.9));
}

#[test]
fn test_vram_rounds_to_whole_megabytes() {
    let stats = reduce([
        gpu_reading(SensorKind::SmallData, "GPU Memory Used", Some(4021.4)),
        gpu_reading(SensorKind::SmallData, "GPU Memory Total", Some(8192.0)),
    ]);
    assert_eq!(stats.gpu_vram_used, Some(4021.0));
    assert_eq!(stats.gpu_vram_total, Some(8192.0));
}

#[test]
fn test_vram_used_keeps_maximum() {
    let stats = reduce([
        gpu_reading(SensorKind::SmallData, "GPU Memory Used", Some(4021.0)),
        gpu_reading(SensorKind::SmallData, "GPU Memory Used", Some(1024.0)),
    ]);
    assert_eq!(stats.gpu_vram_used, Some(4021.0));
}

#[test]
fn test_gpu_power_last_match_wins_and_requires_package() {
    let stats = reduce([
        gpu_reading(SensorKind::Power, "GPU Package", Some(180.04)),
        gpu_reading(SensorKind::Power, "GPU Core", Some(90.0)),
        gpu_reading(SensorKind::Power, "GPU Package", Some(175.26)),
    ]);
    assert_eq!(stats.gpu_power, Some(175.3));
}

#[test]
fn test_gpu_clock_whole_numbers_running_max() {
    let stats = reduce([
        gpu_reading(SensorKind::Clock, "GPU Core", Some(1850.7)),
        gpu_reading(SensorKind::Clock, "GPU Core", Some(1700.0)),
    ]);
    assert_eq!(stats.gpu_clock, Some(1851.0));
}

#[test]
fn test_fan_speeds_truncate_and_join() {
    let stats = reduce([
        reading(
            HardwareKind::Motherboard,
            "nct6799",
            SensorKind::Fan,
            "Fan #1",
            Some(1200.4),
        ),
        reading(
            HardwareKind::Motherboard,
            "nct6799",
            SensorKind::Fan,
            "Fan #2",
            Some(980.9),
        ),
    ]);
    assert_eq!(stats.fan_speed.as_deref(), Some("1200 RPM, 980 RPM"));
}

#[test]
fn test_no_fan_readings_means_absent_not_empty() {
    let stats = reduce([cpu_reading(SensorKind::Load, "CPU Total", Some(10.0))]);
    assert_eq!(stats.fan_speed, None);
}

#[test]
fn test_reduce_is_deterministic() {
    let input = || {
        vec![
            cpu_reading(SensorKind::Load, "CPU Total", Some(57.26)),
            cpu_reading(SensorKind::Temperature, "Package id 0", Some(61.7)),
            gpu_reading(SensorKind::Load, "GPU Core", Some(43.2)),
            gpu_reading(SensorKind::SmallData, "GPU Memory Used", Some(4021.0)),
            gpu_reading(SensorKind::SmallData, "GPU Memory Total", Some(8192.0)),
        ]
    };
    assert_eq!(reduce(input()), reduce(input()));
}

#[tokio::test]
async fn test_snapshot_skips_failing_unit() {
    let aggregator = Aggregator::new(vec![
        Box::new(FakeUnit::failing(HardwareKind::GpuNvidia, "dead GPU")),
        Box::new(FakeUnit::new(
            HardwareKind::Cpu,
            "CPU",
            vec![cpu_reading(SensorKind::Load, "CPU Total", Some(57.26))],
        )),
    ]);
    let stats = aggregator.snapshot().await;
    assert_eq!(stats.cpu, Some(57.3));
    assert_eq!(stats.gpu_usage, None);
}

#[tokio::test]
async fn test_snapshot_with_no_units_is_all_absent() {
    let aggregator = Aggregator::new(vec![]);
    assert_eq!(aggregator.snapshot().await, SystemStats::default());
}
