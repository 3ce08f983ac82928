use tracing::debug;

use crate::config::TOLERANCE;
use crate::models::record::columns;
use crate::models::{Record, RecordTable, ValidationStatus};
use crate::validation::stats::{AggregateStatistics, Deviation, ErrorDetail};

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub record: Record,
    pub status: ValidationStatus,
}

/// The loaded table with a `Validation_Status` attached to every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedTable {
    pub headers: Vec<String>,
    pub rows: Vec<ValidatedRecord>,
}

impl ValidatedTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn statuses(&self) -> impl Iterator<Item = ValidationStatus> + '_ {
        self.rows.iter().map(|r| r.status)
    }
}

/// `|actual - expected| <= expected * tolerance`. The bound is inclusive.
pub fn within_tolerance(expected: f64, actual: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= expected * tolerance
}

pub struct ParameterValidator {
    pub tolerance: f64,
}

impl Default for ParameterValidator {
    fn default() -> Self {
        Self::new(TOLERANCE)
    }
}

impl ParameterValidator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn classify(&self, record: &Record) -> ValidationStatus {
        let (input_sl, input_tp, calc_sl, calc_tp) = multipliers(record);
        ValidationStatus::classify(
            within_tolerance(input_sl, calc_sl, self.tolerance),
            within_tolerance(input_tp, calc_tp, self.tolerance),
        )
    }

    pub fn validate(&self, table: RecordTable) -> (ValidatedTable, AggregateStatistics) {
        let mut stats = AggregateStatistics {
            total_trades: table.len(),
            avg_input_sl: table.column_mean(columns::INPUT_SL, |r| r.input_sl_multiplier),
            avg_input_tp: table.column_mean(columns::INPUT_TP, |r| r.input_tp_multiplier),
            avg_calc_sl: table.column_mean(columns::CALC_SL, |r| r.calculated_sl_multiplier),
            avg_calc_tp: table.column_mean(columns::CALC_TP, |r| r.calculated_tp_multiplier),
            avg_rr: table.column_mean(columns::RR_RATIO, |r| r.rr_ratio),
            ..AggregateStatistics::default()
        };

        let mut rows = Vec::with_capacity(table.len());
        for (idx, record) in table.records.into_iter().enumerate() {
            let status = self.classify(&record);
            stats.record(status);

            if !status.is_ok() {
                let detail = error_detail(&record, idx, status);
                debug!("Trade #{}: {}", detail.trade, status);
                stats.errors.push(detail);
            }
            rows.push(ValidatedRecord { record, status });
        }

        let validated = ValidatedTable {
            headers: table.headers,
            rows,
        };
        (validated, stats)
    }
}

fn multipliers(record: &Record) -> (f64, f64, f64, f64) {
    (
        record.input_sl_multiplier.unwrap_or(0.0),
        record.input_tp_multiplier.unwrap_or(0.0),
        record.calculated_sl_multiplier.unwrap_or(0.0),
        record.calculated_tp_multiplier.unwrap_or(0.0),
    )
}

fn error_detail(record: &Record, row: usize, status: ValidationStatus) -> ErrorDetail {
    let (input_sl, input_tp, calc_sl, calc_tp) = multipliers(record);
    let sl = Deviation {
        expected: input_sl,
        actual: calc_sl,
    };
    let tp = Deviation {
        expected: input_tp,
        actual: calc_tp,
    };
    let (sl, tp) = match status {
        ValidationStatus::SlError => (Some(sl), None),
        ValidationStatus::TpError => (None, Some(tp)),
        _ => (Some(sl), Some(tp)),
    };
    ErrorDetail {
        trade: record.trade_id(row),
        status,
        sl,
        tp,
    }
}
