use serde::{Deserialize, Serialize};

use crate::models::ValidationStatus;

/// Expected vs. observed value of one multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub expected: f64,
    pub actual: f64,
}

/// A record that failed at least one tolerance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub trade: i64,
    pub status: ValidationStatus,
    /// Set for `SlError` and `BothError`.
    pub sl: Option<Deviation>,
    /// Set for `TpError` and `BothError`.
    pub tp: Option<Deviation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub total_trades: usize,
    pub ok_trades: usize,
    pub error_trades: usize,
    pub sl_errors: usize,
    pub tp_errors: usize,
    pub both_errors: usize,

    // Column means
    pub avg_input_sl: f64,
    pub avg_input_tp: f64,
    pub avg_calc_sl: f64,
    pub avg_calc_tp: f64,
    pub avg_rr: f64,

    pub errors: Vec<ErrorDetail>,
}

impl AggregateStatistics {
    pub(crate) fn record(&mut self, status: ValidationStatus) {
        match status {
            ValidationStatus::Ok => self.ok_trades += 1,
            ValidationStatus::SlError => self.sl_errors += 1,
            ValidationStatus::TpError => self.tp_errors += 1,
            ValidationStatus::BothError => self.both_errors += 1,
        }
        if !status.is_ok() {
            self.error_trades += 1;
        }
    }

    pub fn count(&self, status: ValidationStatus) -> usize {
        match status {
            ValidationStatus::Ok => self.ok_trades,
            ValidationStatus::SlError => self.sl_errors,
            ValidationStatus::TpError => self.tp_errors,
            ValidationStatus::BothError => self.both_errors,
        }
    }

    pub fn ok_percent(&self) -> f64 {
        if self.total_trades == 0 {
            return 0.0;
        }
        self.ok_trades as f64 / self.total_trades as f64 * 100.0
    }

    /// True when every record validated `OK`. An empty table counts as all OK.
    pub fn all_ok(&self) -> bool {
        self.ok_trades == self.total_trades
    }
}
