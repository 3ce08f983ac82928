use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing one record's computed multipliers to its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Ok,
    SlError,
    TpError,
    BothError,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 4] = [
        ValidationStatus::Ok,
        ValidationStatus::SlError,
        ValidationStatus::TpError,
        ValidationStatus::BothError,
    ];

    pub fn classify(sl_ok: bool, tp_ok: bool) -> Self {
        match (sl_ok, tp_ok) {
            (true, true) => ValidationStatus::Ok,
            (true, false) => ValidationStatus::TpError,
            (false, true) => ValidationStatus::SlError,
            (false, false) => ValidationStatus::BothError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Ok => "OK",
            ValidationStatus::SlError => "SL_ERROR",
            ValidationStatus::TpError => "TP_ERROR",
            ValidationStatus::BothError => "BOTH_ERROR",
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == ValidationStatus::Ok
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_exhaustive() {
        assert_eq!(ValidationStatus::classify(true, true), ValidationStatus::Ok);
        assert_eq!(ValidationStatus::classify(true, false), ValidationStatus::TpError);
        assert_eq!(ValidationStatus::classify(false, true), ValidationStatus::SlError);
        assert_eq!(ValidationStatus::classify(false, false), ValidationStatus::BothError);
    }

    #[test]
    fn labels_match_csv_convention() {
        let labels: Vec<&str> = ValidationStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["OK", "SL_ERROR", "TP_ERROR", "BOTH_ERROR"]);
        assert_eq!(ValidationStatus::BothError.to_string(), "BOTH_ERROR");
    }
}
