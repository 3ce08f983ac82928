use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Target SL multiplier (×ATR) the EA is configured with.
pub const TARGET_SL_MULTIPLIER: f64 = 1.50;
/// Target TP multiplier (×ATR) the EA is configured with.
pub const TARGET_TP_MULTIPLIER: f64 = 3.00;
/// Target reward/risk ratio.
pub const TARGET_RR_RATIO: f64 = 2.00;
/// Allowed fractional deviation per record.
pub const TOLERANCE: f64 = 0.05;
/// Fixed band used by the averages table of the report. Kept apart from
/// `TOLERANCE` so per-record tolerance can change without moving it.
pub const REPORT_CHECK_BAND: f64 = 0.05;

pub const REPORT_FILE: &str = "verification_report.txt";
pub const GRAPH_FILE: &str = "verification_graph.png";

/// File name patterns produced by the EA's verification logger.
pub const FILE_PATTERNS: &[&str] = &[
    "*parameters_verification*.csv",
    "GoldEA_parameters_verification*.csv",
    "*param*verif*.csv",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub sl_multiplier: f64,
    pub tp_multiplier: f64,
    pub rr_ratio: f64,
    pub tolerance: f64,
}

impl Targets {
    /// Reward/risk implied by the two multipliers.
    pub fn implied_rr(&self) -> f64 {
        if self.sl_multiplier == 0.0 {
            return 0.0;
        }
        self.tp_multiplier / self.sl_multiplier
    }
}

impl Default for Targets {
    fn default() -> Self {
        Targets {
            sl_multiplier: TARGET_SL_MULTIPLIER,
            tp_multiplier: TARGET_TP_MULTIPLIER,
            rr_ratio: TARGET_RR_RATIO,
            tolerance: TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub targets: Targets,

    // Discovery
    pub search_dirs: Vec<PathBuf>,
    pub patterns: Vec<String>,

    // Artifacts, written next to the input file
    pub report_file: String,
    pub graph_file: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let terminal_dir = std::env::var_os("VERIFY_TERMINAL_DIR")
            .map(PathBuf::from)
            .or_else(default_terminal_dir);

        let mut search_dirs = Vec::new();
        if let Some(dir) = invocation_dir() {
            search_dirs.push(dir);
        }
        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd);
        }
        if let Some(dir) = terminal_dir {
            search_dirs.push(dir);
        }

        Config {
            targets: Targets::default(),
            search_dirs,
            patterns: FILE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            report_file: REPORT_FILE.to_string(),
            graph_file: GRAPH_FILE.to_string(),
            log_level: env("VERIFY_LOG_LEVEL", "info"),
        }
    }
}

/// Directory holding the running executable.
fn invocation_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
}

/// MetaTrader terminal data directory (native on Windows, Wine layout elsewhere).
fn default_terminal_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        std::env::var_os("APPDATA")
            .map(|appdata| PathBuf::from(appdata).join("MetaQuotes").join("Terminal"))
    } else {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join("AppData")
                .join("Roaming")
                .join("MetaQuotes")
                .join("Terminal")
        })
    }
}
