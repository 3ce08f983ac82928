#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use sltp_verify::config::{Config, Targets, FILE_PATTERNS, GRAPH_FILE, REPORT_FILE};

pub const HEADER: &str = "Timestamp,TradeNumber,Input_SL_Multiplier,Input_TP_Multiplier,\
ATR_Value,Entry_Price,Actual_SL_Price,Actual_TP_Price,SL_Distance_Pips,TP_Distance_Pips,\
Calculated_SL_Multiplier,Calculated_TP_Multiplier,RR_Ratio,Match_Status";

/// One CSV line in the EA's layout from (trade, input_sl, calc_sl, input_tp, calc_tp, rr).
pub fn row(trade: i64, input_sl: f64, calc_sl: f64, input_tp: f64, calc_tp: f64, rr: f64) -> String {
    let atr = 2.0;
    let entry = 2350.0;
    let status = if (calc_sl - input_sl).abs() < 1e-9 && (calc_tp - input_tp).abs() < 1e-9 {
        "OK"
    } else {
        "ERROR"
    };
    format!(
        "2024.05.02 10:{:02},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.1},{:.1},{:.2},{:.2},{:.2},{}",
        trade % 60,
        trade,
        input_sl,
        input_tp,
        atr,
        entry,
        entry - calc_sl * atr,
        entry + calc_tp * atr,
        calc_sl * atr * 10.0,
        calc_tp * atr * 10.0,
        calc_sl,
        calc_tp,
        rr,
        status
    )
}

pub fn write_csv(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let mut contents = String::from(HEADER);
    for r in rows {
        contents.push('\n');
        contents.push_str(r);
    }
    contents.push('\n');
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

/// Config whose discovery only looks at `dirs`.
pub fn test_config(dirs: &[&Path]) -> Config {
    Config {
        targets: Targets::default(),
        search_dirs: dirs.iter().map(|d| d.to_path_buf()).collect(),
        patterns: FILE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        report_file: REPORT_FILE.to_string(),
        graph_file: GRAPH_FILE.to_string(),
        log_level: "warn".to_string(),
    }
}
