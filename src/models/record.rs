use serde::{Deserialize, Serialize};

/// Header names written by the EA's verification logger.
pub mod columns {
    pub const TIMESTAMP: &str = "Timestamp";
    pub const TRADE_NUMBER: &str = "TradeNumber";
    pub const INPUT_SL: &str = "Input_SL_Multiplier";
    pub const INPUT_TP: &str = "Input_TP_Multiplier";
    pub const ATR_VALUE: &str = "ATR_Value";
    pub const ENTRY_PRICE: &str = "Entry_Price";
    pub const ACTUAL_SL_PRICE: &str = "Actual_SL_Price";
    pub const ACTUAL_TP_PRICE: &str = "Actual_TP_Price";
    pub const SL_DISTANCE_PIPS: &str = "SL_Distance_Pips";
    pub const TP_DISTANCE_PIPS: &str = "TP_Distance_Pips";
    pub const CALC_SL: &str = "Calculated_SL_Multiplier";
    pub const CALC_TP: &str = "Calculated_TP_Multiplier";
    pub const RR_RATIO: &str = "RR_Ratio";
    pub const MATCH_STATUS: &str = "Match_Status";
    pub const VALIDATION_STATUS: &str = "Validation_Status";
}

/// One logged SL/TP computation. Columns the validator does not read are
/// carried verbatim in `extra`, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub trade_number: Option<i64>,
    pub input_sl_multiplier: Option<f64>,
    pub input_tp_multiplier: Option<f64>,
    pub calculated_sl_multiplier: Option<f64>,
    pub calculated_tp_multiplier: Option<f64>,
    pub rr_ratio: Option<f64>,
    #[serde(default)]
    pub extra: Vec<(String, String)>,
}

impl Record {
    /// Raw text of a pass-through column.
    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// `TradeNumber` if logged, otherwise the row position.
    pub fn trade_id(&self, row: usize) -> i64 {
        self.trade_number.unwrap_or(row as i64)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordTable {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean over the parseable cells of `column`; 0 when the column is
    /// absent or holds no numbers.
    pub fn column_mean(&self, column: &str, field: impl Fn(&Record) -> Option<f64>) -> f64 {
        if !self.has_column(column) {
            return 0.0;
        }
        let values: Vec<f64> = self.records.iter().filter_map(&field).collect();
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], sl: &[Option<f64>]) -> RecordTable {
        let records = sl
            .iter()
            .map(|&v| Record {
                calculated_sl_multiplier: v,
                ..Record::default()
            })
            .collect();
        RecordTable::new(headers.iter().map(|h| h.to_string()).collect(), records)
    }

    #[test]
    fn mean_skips_missing_cells() {
        let t = table(&[columns::CALC_SL], &[Some(1.0), None, Some(2.0)]);
        let mean = t.column_mean(columns::CALC_SL, |r| r.calculated_sl_multiplier);
        assert!((mean - 1.5).abs() < 1e-12);
    }

    #[test]
    fn absent_column_mean_is_zero() {
        let t = table(&[columns::INPUT_SL], &[Some(1.0), Some(2.0)]);
        assert_eq!(t.column_mean(columns::CALC_SL, |r| r.calculated_sl_multiplier), 0.0);
    }

    #[test]
    fn trade_id_falls_back_to_row() {
        let r = Record::default();
        assert_eq!(r.trade_id(7), 7);
        let r = Record {
            trade_number: Some(42),
            ..Record::default()
        };
        assert_eq!(r.trade_id(7), 42);
    }

    #[test]
    fn extra_lookup_by_name() {
        let r = Record {
            extra: vec![
                (columns::MATCH_STATUS.to_string(), "OK".to_string()),
                (columns::ATR_VALUE.to_string(), "2.31".to_string()),
            ],
            ..Record::default()
        };
        assert_eq!(r.extra(columns::ATR_VALUE), Some("2.31"));
        assert_eq!(r.extra(columns::ENTRY_PRICE), None);
    }
}
