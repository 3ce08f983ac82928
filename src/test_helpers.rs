use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::models::record::columns;
use crate::models::{Record, RecordTable};

/// Header row as written by the EA.
pub const HEADER: &str = "Timestamp,TradeNumber,Input_SL_Multiplier,Input_TP_Multiplier,\
ATR_Value,Entry_Price,Actual_SL_Price,Actual_TP_Price,SL_Distance_Pips,TP_Distance_Pips,\
Calculated_SL_Multiplier,Calculated_TP_Multiplier,RR_Ratio,Match_Status";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn set_mtime(path: &Path, when: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(when)
        .unwrap();
}

/// A record with the validated fields set and nothing else.
pub fn make_record(
    trade: i64,
    input_sl: f64,
    calc_sl: f64,
    input_tp: f64,
    calc_tp: f64,
    rr: f64,
) -> Record {
    Record {
        trade_number: Some(trade),
        input_sl_multiplier: Some(input_sl),
        input_tp_multiplier: Some(input_tp),
        calculated_sl_multiplier: Some(calc_sl),
        calculated_tp_multiplier: Some(calc_tp),
        rr_ratio: Some(rr),
        extra: Vec::new(),
    }
}

/// Table carrying the validated columns only.
pub fn make_table(records: &[Record]) -> RecordTable {
    let headers = [
        columns::TRADE_NUMBER,
        columns::INPUT_SL,
        columns::INPUT_TP,
        columns::CALC_SL,
        columns::CALC_TP,
        columns::RR_RATIO,
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    RecordTable::new(headers, records.to_vec())
}
