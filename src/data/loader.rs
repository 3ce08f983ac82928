use csv::StringRecord;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, VerifyError};
use crate::models::record::columns;
use crate::models::{Record, RecordTable};

/// Positions of the typed columns in the header row.
#[derive(Debug, Default)]
struct ColumnIndex {
    trade_number: Option<usize>,
    input_sl: Option<usize>,
    input_tp: Option<usize>,
    calc_sl: Option<usize>,
    calc_tp: Option<usize>,
    rr_ratio: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        ColumnIndex {
            trade_number: find(columns::TRADE_NUMBER),
            input_sl: find(columns::INPUT_SL),
            input_tp: find(columns::INPUT_TP),
            calc_sl: find(columns::CALC_SL),
            calc_tp: find(columns::CALC_TP),
            rr_ratio: find(columns::RR_RATIO),
        }
    }

    fn is_typed(&self, idx: usize) -> bool {
        [
            self.trade_number,
            self.input_sl,
            self.input_tp,
            self.calc_sl,
            self.calc_tp,
            self.rr_ratio,
        ]
        .contains(&Some(idx))
    }
}

/// Read a verification CSV into a `RecordTable`. Malformed numbers become
/// `None`; I/O, encoding and CSV framing errors fail the whole load.
pub fn load_table(path: &Path) -> Result<RecordTable> {
    info!("Loading file: {}", path.display());

    let load_err = |source: csv::Error| VerifyError::Load {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(load_err)?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(load_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(VerifyError::EmptyHeader(path.to_path_buf()));
    }
    debug!("Columns: {}", headers.join(", "));

    let index = ColumnIndex::from_headers(&headers);
    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(load_err)?;
        records.push(parse_record(&row, &headers, &index));
    }

    info!("  {} trades loaded", records.len());
    Ok(RecordTable::new(headers, records))
}

fn parse_record(row: &StringRecord, headers: &[String], index: &ColumnIndex) -> Record {
    let num = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(parse_f64);

    let extra = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !index.is_typed(*i))
        .map(|(i, name)| (name.clone(), row.get(i).unwrap_or("").to_string()))
        .collect();

    Record {
        trade_number: index
            .trade_number
            .and_then(|i| row.get(i))
            .and_then(parse_trade_number),
        input_sl_multiplier: num(index.input_sl),
        input_tp_multiplier: num(index.input_tp),
        calculated_sl_multiplier: num(index.calc_sl),
        calculated_tp_multiplier: num(index.calc_tp),
        rr_ratio: num(index.rr_ratio),
        extra,
    }
}

fn parse_f64(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_trade_number(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        parse_f64(cell)
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    })
}
