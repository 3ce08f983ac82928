use crate::config::Targets;
use crate::models::ValidationStatus;
use crate::report::{
    breakeven_win_rate, verdict, AveragesCheck, Verdict, MAX_LISTED_ERRORS, PROFITABLE_RR,
};
use crate::validation::{AggregateStatistics, ErrorDetail};

const RULE_WIDTH: usize = 60;
const TABLE_WIDTH: usize = 53;

/// Decorated report for the terminal.
pub fn render_console(stats: &AggregateStatistics, targets: &Targets) -> String {
    let check = AveragesCheck::evaluate(stats, targets);
    let mut out: Vec<String> = Vec::new();

    out.push(String::new());
    out.push("=".repeat(RULE_WIDTH));
    out.push("  SL/TP PARAMETER VERIFICATION REPORT".to_string());
    out.push("=".repeat(RULE_WIDTH));

    // Summary
    let total = stats.total_trades;
    let ok_pct = stats.ok_percent();
    out.push(String::new());
    out.push("  GLOBAL SUMMARY".to_string());
    out.push("  ───────────────────────────────────".to_string());
    out.push(format!("  Total trades analysed: {}", total));
    if stats.all_ok() && total > 0 {
        out.push(format!(
            "  ✓ {}/{} trades with correct parameters ({:.1}%)",
            stats.ok_trades, total, ok_pct
        ));
    } else {
        out.push(format!(
            "  ⚠ {}/{} trades with correct parameters ({:.1}%)",
            stats.ok_trades, total, ok_pct
        ));
        out.push(format!(
            "  ✗ {}/{} trades with errors ({:.1}%)",
            stats.error_trades,
            total,
            100.0 - ok_pct
        ));
    }
    if stats.error_trades > 0 {
        out.push(String::new());
        out.push("  Error breakdown:".to_string());
        out.push(format!("     - SL errors only: {}", stats.sl_errors));
        out.push(format!("     - TP errors only: {}", stats.tp_errors));
        out.push(format!("     - SL + TP errors: {}", stats.both_errors));
    }

    // Averages
    out.push(String::new());
    out.push("  MULTIPLIER COMPARISON".to_string());
    out.push(format!("  ┌{}┐", "─".repeat(TABLE_WIDTH)));
    out.push(format!(
        "  │ {:<20} {:<10} {:<10} {:<8} │",
        "Parameter", "Target", "Observed", "Status"
    ));
    out.push(format!("  ├{}┤", "─".repeat(TABLE_WIDTH)));
    for row in check.rows() {
        out.push(format!(
            "  │ {:<20} {:<10.2} {:<10.2} {:<8} │",
            row.name,
            row.target,
            row.observed,
            if row.ok { "OK" } else { "ERROR" }
        ));
    }
    out.push(format!("  └{}┘", "─".repeat(TABLE_WIDTH)));

    // Impact
    out.push(String::new());
    out.push("  IMPACT ESTIMATE".to_string());
    out.push("  ───────────────────────────────────".to_string());
    let breakeven = breakeven_win_rate(stats.avg_rr);
    if stats.avg_rr >= PROFITABLE_RR {
        out.push(format!(
            "  With an R:R of {:.2}, the system should be profitable",
            stats.avg_rr
        ));
        out.push(format!("  Breakeven win rate: {:.1}%", breakeven));
        out.push("  Expected profit (at 66% WR): POSITIVE".to_string());
    } else {
        out.push(format!(
            "  ⚠ With an R:R of {:.2}, the system may lose money",
            stats.avg_rr
        ));
        out.push(format!("  Required breakeven win rate: {:.1}%", breakeven));
    }

    // Failing trades
    if !stats.errors.is_empty() {
        out.push(String::new());
        if stats.errors.len() <= MAX_LISTED_ERRORS {
            out.push("  TRADES WITH ERRORS".to_string());
            out.push("  ───────────────────────────────────".to_string());
            out.extend(stats.errors.iter().map(error_line));
        } else {
            out.push(format!(
                "  ✗ {} trades with errors (see report file)",
                stats.errors.len()
            ));
        }
    }

    // Conclusion
    out.push(String::new());
    out.push("=".repeat(RULE_WIDTH));
    match verdict(stats, &check) {
        Verdict::AllCorrect => {
            out.push("  ✓ CONCLUSION: all parameters are CORRECT".to_string());
            out.push(format!(
                "    The system uses SL={:.1}×ATR and TP={:.1}×ATR",
                targets.sl_multiplier, targets.tp_multiplier
            ));
            out.push(format!("    R:R = {:.1} as configured", targets.implied_rr()));
        }
        Verdict::Anomalies => {
            out.push("  ⚠ CONCLUSION: anomalies detected".to_string());
            out.push("    Check the parameters in the EA's .set file".to_string());
            out.push("    and recompile the EA after clearing the cache".to_string());
        }
    }
    out.push("=".repeat(RULE_WIDTH));
    out.push(String::new());

    out.join("\n")
}

fn error_line(error: &ErrorDetail) -> String {
    match (error.status, error.sl, error.tp) {
        (ValidationStatus::SlError, Some(sl), _) => format!(
            "  Trade #{}: SL expected={:.2}, actual={:.2}",
            error.trade, sl.expected, sl.actual
        ),
        (ValidationStatus::TpError, _, Some(tp)) => format!(
            "  Trade #{}: TP expected={:.2}, actual={:.2}",
            error.trade, tp.expected, tp.actual
        ),
        (_, Some(sl), Some(tp)) => format!(
            "  Trade #{}: SL and TP incorrect (SL {:.2}→{:.2}, TP {:.2}→{:.2})",
            error.trade, sl.expected, sl.actual, tp.expected, tp.actual
        ),
        _ => format!("  Trade #{}: {}", error.trade, error.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_record, make_table};
    use crate::validation::ParameterValidator;

    fn render(records: &[crate::models::Record]) -> String {
        let (_, stats) = ParameterValidator::default().validate(make_table(records));
        render_console(&stats, &Targets::default())
    }

    #[test]
    fn clean_run_reports_all_correct() {
        let text = render(&[
            make_record(1, 1.5, 1.5, 3.0, 3.0, 2.0),
            make_record(2, 1.5, 1.52, 3.0, 2.97, 1.95),
        ]);
        assert!(text.contains("Total trades analysed: 2"));
        assert!(text.contains("2/2 trades with correct parameters (100.0%)"));
        assert!(!text.contains("Error breakdown"));
        assert!(text.contains("CONCLUSION: all parameters are CORRECT"));
        assert!(text.contains("SL=1.5×ATR and TP=3.0×ATR"));
        assert!(text.contains("should be profitable"));
    }

    #[test]
    fn errors_are_listed_with_values() {
        let text = render(&[
            make_record(1, 1.50, 1.50, 3.00, 3.00, 2.00),
            make_record(2, 1.50, 2.00, 3.00, 3.00, 1.5),
            make_record(3, 1.50, 2.50, 3.00, 1.00, 0.4),
        ]);
        assert!(text.contains("1/3 trades with correct parameters (33.3%)"));
        assert!(text.contains("2/3 trades with errors (66.7%)"));
        assert!(text.contains("- SL errors only: 1"));
        assert!(text.contains("- TP errors only: 0"));
        assert!(text.contains("- SL + TP errors: 1"));
        assert!(text.contains("Trade #2: SL expected=1.50, actual=2.00"));
        assert!(text.contains("Trade #3: SL and TP incorrect"));
        assert!(text.contains("CONCLUSION: anomalies detected"));
        // mean R:R 1.3 is below the profitable threshold
        assert!(text.contains("may lose money"));
        assert!(text.contains("Required breakeven win rate: 43.5%"));
    }

    #[test]
    fn long_error_list_is_summarised() {
        let records: Vec<_> = (0..11)
            .map(|i| make_record(i, 1.5, 2.0, 3.0, 3.0, 1.5))
            .collect();
        let text = render(&records);
        assert!(text.contains("11 trades with errors (see report file)"));
        assert!(!text.contains("Trade #0:"));
    }

    #[test]
    fn averages_table_flags_drift() {
        let text = render(&[make_record(1, 1.5, 1.5, 3.0, 3.5, 2.33)]);
        let tp_row = text.lines().find(|l| l.contains("TP Multiplier")).unwrap();
        assert!(tp_row.contains("3.00"));
        assert!(tp_row.contains("3.50"));
        assert!(tp_row.contains("ERROR"));
        let sl_row = text.lines().find(|l| l.contains("SL Multiplier")).unwrap();
        assert!(sl_row.contains("OK"));
    }
}
