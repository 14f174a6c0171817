//! Prometheus text exposition rendering.

use std::fmt::Write;

use clustermetrics_core::metric::MetricKind;

use super::registry::Sample;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else {
        v.to_string()
    }
}

/// Render samples (already sorted by the registry) as exposition text.
/// Derived gauges are exposed with `# TYPE ... gauge` like plain ones.
pub fn render_text(samples: &[Sample]) -> String {
    let mut out = String::new();
    for s in samples {
        let name = s.desc.fq_name();
        let ty = match s.desc.kind() {
            MetricKind::Gauge | MetricKind::GaugeFunc => "gauge",
        };
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(s.desc.help()));
        let _ = writeln!(out, "# TYPE {} {}", name, ty);

        let labels = s.desc.const_labels();
        if labels.is_empty() {
            let _ = writeln!(out, "{} {}", name, format_value(s.value));
        } else {
            let label_str = labels
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, format_value(s.value));
        }
    }
    out
}
