// Metric cards with conditional visibility

use crate::models::SystemStats;

const CPU_WARN_PCT: f64 = 85.0;
const GPU_WARN_PCT: f64 = 90.0;
const RAM_WARN_PCT: f64 = 90.0;
const VRAM_WARN_PCT: f64 = 90.0;

/// One dashboard card. Numeric cards carry a value with optional warn
/// threshold and progress bar; the fan card is plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Metric {
        label: &'static str,
        value: f64,
        unit: &'static str,
        sub: String,
        warn_threshold: Option<f64>,
        show_bar: bool,
    },
    Text {
        label: &'static str,
        text: String,
    },
}

impl Card {
    pub fn label(&self) -> &'static str {
        match self {
            Card::Metric { label, .. } | Card::Text { label, .. } => label,
        }
    }

    pub fn is_warn(&self) -> bool {
        match self {
            Card::Metric {
                value,
                warn_threshold: Some(threshold),
                ..
            } => value > threshold,
            _ => false,
        }
    }
}

/// A metric card renders iff its value is present and nonzero. This also
/// hides legitimately-zero readings (an idle GPU disappears along with an
/// absent one) — intentional, kept as-is.
pub fn shows_value(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0)
}

fn metric(
    label: &'static str,
    value: Option<f64>,
    unit: &'static str,
    sub: String,
    warn_threshold: Option<f64>,
    show_bar: bool,
) -> Option<Card> {
    if !shows_value(value) {
        return None;
    }
    let value = value?;
    Some(Card::Metric {
        label,
        value,
        unit,
        sub,
        warn_threshold,
        show_bar,
    })
}

fn temp_sub(temp: Option<f64>) -> String {
    match temp {
        Some(t) if t != 0.0 => format!("{t}°C"),
        _ => String::new(),
    }
}

/// Builds the card set for one snapshot, in display order. Suppressed cards
/// are simply not in the output.
pub fn build_cards(stats: &SystemStats) -> Vec<Card> {
    let mut cards = Vec::new();

    cards.extend(metric(
        "CPU Load",
        stats.cpu,
        "%",
        temp_sub(stats.cpu_temp),
        Some(CPU_WARN_PCT),
        true,
    ));
    cards.extend(metric(
        "GPU Load",
        stats.gpu_usage,
        "%",
        temp_sub(stats.gpu_temp),
        Some(GPU_WARN_PCT),
        true,
    ));
    cards.extend(metric(
        "Memory",
        stats.ram,
        "%",
        String::new(),
        Some(RAM_WARN_PCT),
        true,
    ));

    // VRAM needs both ends of the fraction; shown as a computed percentage.
    if let (Some(used), Some(total)) = (stats.gpu_vram_used, stats.gpu_vram_total)
        && used != 0.0
        && total != 0.0
    {
        let pct = ((used / total) * 1000.0).round() / 10.0;
        cards.extend(metric(
            "VRAM",
            Some(pct),
            "%",
            format!("{}/{} MB", used as i64, total as i64),
            Some(VRAM_WARN_PCT),
            true,
        ));
    }

    cards.extend(metric(
        "GPU Power",
        stats.gpu_power,
        "W",
        String::new(),
        None,
        false,
    ));
    cards.extend(metric(
        "GPU Clock",
        stats.gpu_clock,
        "MHz",
        String::new(),
        None,
        false,
    ));

    if let Some(fan) = stats.fan_speed.as_deref()
        && !fan.is_empty()
    {
        cards.push(Card::Text {
            label: "Fan Speed",
            text: fan.to_string(),
        });
    }

    cards
}

/// Lays cards out in rows of at most `per_row`.
pub fn rows(cards: &[Card], per_row: usize) -> Vec<&[Card]> {
    cards.chunks(per_row.max(1)).collect()
}
