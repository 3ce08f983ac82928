use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::chart::{render_chart, ChartOutcome};
use crate::config::Config;
use crate::data::{find_input, load_table};
use crate::error::{Result, VerifyError};
use crate::report::{render_console, save_report};
use crate::validation::{AggregateStatistics, ParameterValidator};

#[derive(Debug)]
pub struct RunOutcome {
    pub input: PathBuf,
    pub stats: AggregateStatistics,
    pub report_path: PathBuf,
    pub chart: ChartOutcome,
}

impl RunOutcome {
    /// 0 only when every record validated `OK`.
    pub fn exit_code(&self) -> u8 {
        if self.stats.all_ok() {
            0
        } else {
            1
        }
    }
}

/// Explicit path if given (it must exist), otherwise the newest match from
/// the configured search directories.
pub fn resolve_input(explicit: Option<PathBuf>, cfg: &Config) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path),
        Some(path) => Err(VerifyError::InputNotFound(path)),
        None => find_input(&cfg.search_dirs, &cfg.patterns),
    }
}

/// Load, validate, print the report, draw the chart and save the report file.
/// Errors before a table exists abort; everything after is reported as data.
pub fn run(explicit: Option<PathBuf>, cfg: &Config) -> Result<RunOutcome> {
    let input = resolve_input(explicit, cfg)?;
    let table = load_table(&input)?;

    let validator = ParameterValidator::new(cfg.targets.tolerance);
    let (validated, stats) = validator.validate(table);
    info!(
        "Validated {} trades: {} OK, {} with errors",
        stats.total_trades, stats.ok_trades, stats.error_trades
    );

    println!("{}", render_console(&stats, &cfg.targets));

    let out_dir = input.parent().unwrap_or_else(|| Path::new("."));
    let chart_path = out_dir.join(&cfg.graph_file);
    let chart = match render_chart(&validated, &cfg.targets, &chart_path) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{}", e);
            ChartOutcome::Failed(e.to_string())
        }
    };

    let report_path = out_dir.join(&cfg.report_file);
    save_report(&stats, &cfg.targets, &report_path)?;

    Ok(RunOutcome {
        input,
        stats,
        report_path,
        chart,
    })
}
