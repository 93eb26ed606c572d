//! Human-readable trace output for the `trace` subcommand.

use colored::*;

use crate::trace::{StatusCategory, TraceResult};

/// Renders a trace as one line per hop followed by a summary line.
///
/// Status codes are colored by class. Color is suppressed automatically when
/// `colored` decides the output is not a terminal.
pub fn render_text(result: &TraceResult) -> String {
    let mut out = String::new();

    for (i, hop) in result.hops.iter().enumerate() {
        let status = hop.status_code.to_string();
        let status = match hop.category() {
            StatusCategory::Success => status.green(),
            StatusCategory::Redirect => status.yellow(),
            StatusCategory::ClientError | StatusCategory::ServerError => status.red(),
            StatusCategory::None => status.normal(),
        };
        let timing = hop
            .timing
            .map(|t| format!(" ({}ms)", t.duration))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>2}. {} {} {}{}\n",
            i + 1,
            status,
            hop.describe(),
            hop.url,
            timing
        ));
        if let Some(location) = hop.redirect_location() {
            out.push_str(&format!("      -> {}\n", location));
        }
    }

    let total = result
        .total_time_ms
        .map(|ms| format!(" in {}ms", ms))
        .unwrap_or_default();
    out.push_str(&format!(
        "{} redirect{}{}, final URL: {}\n",
        result.redirect_count,
        if result.redirect_count == 1 { "" } else { "s" },
        total,
        result.final_url
    ));
    if let Some(error) = &result.error {
        out.push_str(&format!("{} {}\n", "error:".red().bold(), error));
    }

    out
}
