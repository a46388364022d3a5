// Server-side page rendering: cards, usage chart, roast panel

use super::cards::{Card, rows};
use super::history::HistoryWindow;
use crate::version;

const CARDS_PER_ROW: usize = 4;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 120.0;

const CPU_COLOR: &str = "#00f3ff";
const GPU_COLOR: &str = "#ff2a6d";
const RAM_COLOR: &str = "#ffd700";

const STYLE: &str = r#"
body { background: #050510; color: #e0e0e0; font-family: 'Rajdhani', 'Segoe UI', sans-serif; margin: 24px; }
h1 { color: #00f3ff; text-transform: uppercase; letter-spacing: 3px; text-shadow: 2px 2px 0 #a56de2;
     border-bottom: 2px solid #a56de2; display: inline-block; padding-right: 20px; }
h1 small { font-size: 0.5em; color: #888; }
.row { display: flex; gap: 12px; margin-bottom: 12px; }
.card { flex: 1; background: rgba(10, 14, 23, 0.85); border: 1px solid rgba(0, 243, 255, 0.2);
        border-top: 2px solid #00f3ff; border-radius: 4px; padding: 12px 15px; }
.card.warning { border-top-color: #ff2a6d; }
.label { font-size: 0.75rem; color: #ffd700; text-transform: uppercase; }
.value { font-size: 1.8rem; font-weight: 700; color: #fff; }
.value.fan { font-size: 1.2rem; }
.unit { font-size: 0.9rem; color: #00f3ff; margin-left: 3px; }
.sub { font-size: 0.7rem; color: #888; min-height: 1em; }
.bar-bg { width: 100%; height: 5px; background: rgba(255,255,255,0.1); margin-top: 8px; }
.bar-fill { height: 100%; background: #00f3ff; }
.warning .bar-fill { background: #ff2a6d; }
.bubble { display: flex; align-items: center; margin-top: 15px; background: rgba(165, 109, 226, 0.1);
          border: 1px solid #a56de2; padding: 15px; border-radius: 0 15px 0 15px; }
.avatar { font-size: 1.8rem; margin-right: 15px; }
.quote { font-style: italic; color: #ddd; }
.chart { margin-top: 15px; }
.legend { font-size: 0.75rem; color: #888; margin-bottom: 4px; }
.legend span { margin-right: 12px; }
.waiting { margin-top: 40px; color: #ff2a6d; font-size: 1.2rem; }
"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page_shell(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"1\">\n\
         <title>roastmon // telemetry</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n<h1>System Telemetry <small>// roastmon v{}</small></h1>\n{body}\n</body>\n</html>\n",
        version::VERSION
    )
}

fn card_html(card: &Card) -> String {
    let warn_class = if card.is_warn() { " warning" } else { "" };
    match card {
        Card::Metric {
            label,
            value,
            unit,
            sub,
            show_bar,
            ..
        } => {
            let bar = if *show_bar {
                format!(
                    "<div class=\"bar-bg\"><div class=\"bar-fill\" style=\"width:{:.0}%\"></div></div>",
                    value.min(100.0)
                )
            } else {
                String::new()
            };
            format!(
                "<div class=\"card{warn_class}\"><div class=\"label\">{label}</div>\
                 <div class=\"value\">{value}<span class=\"unit\">{unit}</span></div>\
                 <div class=\"sub\">{}</div>{bar}</div>",
                escape(sub)
            )
        }
        Card::Text { label, text } => format!(
            "<div class=\"card\"><div class=\"label\">{label}</div>\
             <div class=\"value fan\">{}</div></div>",
            escape(text)
        ),
    }
}

fn polyline(history: &HistoryWindow, color: &str, pick: impl Fn(&super::history::Sample) -> f64) -> String {
    let step = if history.capacity() > 1 {
        CHART_WIDTH / (history.capacity() - 1) as f64
    } else {
        CHART_WIDTH
    };
    let points: Vec<String> = history
        .samples()
        .enumerate()
        .map(|(i, sample)| {
            let x = i as f64 * step;
            let y = CHART_HEIGHT - (pick(sample).clamp(0.0, 100.0) / 100.0) * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect();
    format!(
        "<polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"2\" points=\"{}\"/>",
        points.join(" ")
    )
}

fn chart_svg(history: &HistoryWindow) -> String {
    format!(
        "<div class=\"chart\"><div class=\"legend\">\
         <span style=\"color:{CPU_COLOR}\">CPU</span>\
         <span style=\"color:{GPU_COLOR}\">GPU</span>\
         <span style=\"color:{RAM_COLOR}\">RAM</span></div>\
         <svg viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" width=\"100%\" height=\"{CHART_HEIGHT}\">{}{}{}</svg></div>",
        polyline(history, CPU_COLOR, |s| s.cpu),
        polyline(history, GPU_COLOR, |s| s.gpu),
        polyline(history, RAM_COLOR, |s| s.ram),
    )
}

/// Full dashboard page for one successful poll cycle.
pub fn page(history: &HistoryWindow, cards: &[Card], roast: &str) -> String {
    let mut body = String::new();
    for row in rows(cards, CARDS_PER_ROW) {
        body.push_str("<div class=\"row\">");
        for card in row {
            body.push_str(&card_html(card));
        }
        body.push_str("</div>");
    }
    body.push_str(&format!(
        "<div class=\"bubble\"><div class=\"avatar\">👾</div>\
         <div class=\"quote\">&quot;{}&quot;</div></div>",
        escape(roast)
    ));
    body.push_str(&chart_svg(history));
    page_shell(&body)
}

/// Shown while the stats server is unreachable.
pub fn waiting_page() -> String {
    page_shell("<div class=\"waiting\">Awaiting link...</div>")
}
