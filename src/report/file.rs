use chrono::{DateTime, Local, TimeZone};
use std::path::Path;
use tracing::info;

use crate::config::Targets;
use crate::error::Result;
use crate::validation::AggregateStatistics;

/// Plain report persisted next to the input file.
pub fn render_file<Tz>(stats: &AggregateStatistics, targets: &Targets, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let rule = "=".repeat(60);
    let rr = targets.implied_rr();
    let mut out: Vec<String> = Vec::new();

    out.push(rule.clone());
    out.push("SL/TP PARAMETER VERIFICATION REPORT".to_string());
    out.push(format!("Date: {}", at.format("%Y-%m-%d %H:%M:%S")));
    out.push(rule.clone());
    out.push(String::new());

    out.push("TARGET CONFIGURATION:".to_string());
    out.push(format!("  SL Multiplier: {:.2}", targets.sl_multiplier));
    out.push(format!("  TP Multiplier: {:.2}", targets.tp_multiplier));
    out.push(format!("  R:R Ratio: {:.2}", rr));
    out.push(String::new());

    out.push("RESULTS:".to_string());
    out.push(format!("  Total trades: {}", stats.total_trades));
    out.push(format!("  Trades OK: {}", stats.ok_trades));
    out.push(format!("  Trades with errors: {}", stats.error_trades));
    out.push(String::new());

    out.push("CALCULATED AVERAGES:".to_string());
    out.push(format!(
        "  Mean SL Multiplier: {:.2} (target: {:.2})",
        stats.avg_calc_sl, targets.sl_multiplier
    ));
    out.push(format!(
        "  Mean TP Multiplier: {:.2} (target: {:.2})",
        stats.avg_calc_tp, targets.tp_multiplier
    ));
    out.push(format!("  Mean R:R Ratio: {:.2} (target: {:.2})", stats.avg_rr, rr));
    out.push(String::new());

    if !stats.errors.is_empty() {
        out.push("TRADES WITH ERRORS:".to_string());
        for error in &stats.errors {
            out.push(format!("  Trade #{}: {}", error.trade, error.status));
        }
    }

    out.push(String::new());
    out.push(rule);
    out.push(String::new());
    out.join("\n")
}

/// Write the plain report, stamped with the current local time.
pub fn save_report(stats: &AggregateStatistics, targets: &Targets, path: &Path) -> Result<()> {
    std::fs::write(path, render_file(stats, targets, &Local::now()))?;
    info!("Report saved: {}", path.display());
    Ok(())
}
