pub mod console;
pub mod file;

pub use console::render_console;
pub use file::{render_file, save_report};

use crate::config::{Targets, REPORT_CHECK_BAND};
use crate::validation::AggregateStatistics;

/// Mean R:R at or above which the impact estimate reads as profitable.
pub const PROFITABLE_RR: f64 = 1.5;

/// How many error entries the console lists before deferring to the file.
pub const MAX_LISTED_ERRORS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterCheck {
    pub name: &'static str,
    pub target: f64,
    pub observed: f64,
    pub ok: bool,
}

impl ParameterCheck {
    fn new(name: &'static str, target: f64, observed: f64) -> Self {
        Self {
            name,
            target,
            observed,
            ok: within_band(target, observed),
        }
    }
}

/// Observed means against their targets, each within `REPORT_CHECK_BAND`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragesCheck {
    pub sl: ParameterCheck,
    pub tp: ParameterCheck,
    pub rr: ParameterCheck,
}

impl AveragesCheck {
    pub fn evaluate(stats: &AggregateStatistics, targets: &Targets) -> Self {
        Self {
            sl: ParameterCheck::new("SL Multiplier", targets.sl_multiplier, stats.avg_calc_sl),
            tp: ParameterCheck::new("TP Multiplier", targets.tp_multiplier, stats.avg_calc_tp),
            rr: ParameterCheck::new("R:R Ratio", targets.implied_rr(), stats.avg_rr),
        }
    }

    pub fn rows(&self) -> [ParameterCheck; 3] {
        [self.sl, self.tp, self.rr]
    }
}

pub fn within_band(target: f64, observed: f64) -> bool {
    (observed - target).abs() <= target * REPORT_CHECK_BAND
}

/// Win rate (percent) at which a strategy with this R:R breaks even.
pub fn breakeven_win_rate(rr: f64) -> f64 {
    100.0 / (1.0 + rr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AllCorrect,
    Anomalies,
}

/// All correct only when every record is `OK` and both multiplier means
/// sit inside the band. The R:R row is informational.
pub fn verdict(stats: &AggregateStatistics, check: &AveragesCheck) -> Verdict {
    if stats.all_ok() && check.sl.ok && check.tp.ok {
        Verdict::AllCorrect
    } else {
        Verdict::Anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: usize, ok: usize, sl: f64, tp: f64, rr: f64) -> AggregateStatistics {
        AggregateStatistics {
            total_trades: total,
            ok_trades: ok,
            error_trades: total - ok,
            sl_errors: total - ok,
            avg_calc_sl: sl,
            avg_calc_tp: tp,
            avg_rr: rr,
            ..AggregateStatistics::default()
        }
    }

    #[test]
    fn all_correct_requires_every_condition() {
        let targets = Targets::default();

        let s = stats(10, 10, 1.5, 3.0, 2.0);
        assert_eq!(verdict(&s, &AveragesCheck::evaluate(&s, &targets)), Verdict::AllCorrect);

        let s = stats(10, 9, 1.5, 3.0, 2.0);
        assert_eq!(verdict(&s, &AveragesCheck::evaluate(&s, &targets)), Verdict::Anomalies);

        let s = stats(10, 10, 1.6, 3.0, 2.0);
        assert_eq!(verdict(&s, &AveragesCheck::evaluate(&s, &targets)), Verdict::Anomalies);

        let s = stats(10, 10, 1.5, 2.8, 2.0);
        assert_eq!(verdict(&s, &AveragesCheck::evaluate(&s, &targets)), Verdict::Anomalies);
    }

    #[test]
    fn rr_row_does_not_affect_verdict() {
        let targets = Targets::default();
        let s = stats(4, 4, 1.5, 3.0, 1.0);
        let check = AveragesCheck::evaluate(&s, &targets);
        assert!(!check.rr.ok);
        assert_eq!(verdict(&s, &check), Verdict::AllCorrect);
    }

    #[test]
    fn band_is_inclusive_and_fixed() {
        // 2.0 * 0.05 = 0.1
        assert!(within_band(2.0, 2.1 - 1e-12));
        assert!(!within_band(2.0, 2.2));
        assert!(within_band(3.0, 3.0));
    }

    #[test]
    fn rr_target_derives_from_multipliers() {
        let targets = Targets {
            sl_multiplier: 2.0,
            tp_multiplier: 5.0,
            ..Targets::default()
        };
        let s = stats(1, 1, 2.0, 5.0, 2.5);
        let check = AveragesCheck::evaluate(&s, &targets);
        assert_eq!(check.rr.target, 2.5);
        assert!(check.rr.ok);
    }

    #[test]
    fn breakeven_for_two_to_one() {
        assert!((breakeven_win_rate(2.0) - 33.333333).abs() < 1e-4);
    }
}
