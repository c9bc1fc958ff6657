// Validator
// Checks every entry against the data contract and the candidate/baseline
// delta against the one-new-row change policy. Violations accumulate; a
// single run reports the complete problem set.

use crate::entry::{ABOUT_MAX_LENGTH, REQUIRED_FIELDS, YEAR_MAX, YEAR_MIN};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// One contract violation, carrying its own operator-facing message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("entry {index}: missing required field \"{field}\"")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} ({name}): \"about\" must be <= {limit} characters (got {actual})")]
    LengthExceeded {
        index: usize,
        name: String,
        limit: usize,
        actual: usize,
    },

    #[error("entry {index} ({name}): \"website\" must be a valid http or https URL")]
    InvalidUrl { index: usize, name: String },

    #[error("entry {index} ({name}): \"year\" must be an integer between {min} and {max}")]
    InvalidYear {
        index: usize,
        name: String,
        min: i64,
        max: i64,
    },

    #[error("{added} new rows added; only one new row is allowed per change")]
    TooManyAdded { added: usize },

    #[error("existing rows must not be removed")]
    RowsRemoved,

    #[error("{dataset} must be a JSON array")]
    InvalidShape { dataset: &'static str },
}

/// Outcome of a validation run
///
/// `Pass` only when zero violations across all checks. The caller maps this
/// to console output and an exit status; the validator never exits a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Pass,
    Fail(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Pass => &[],
            ValidationResult::Fail(violations) => violations,
        }
    }

    fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            ValidationResult::Pass
        } else {
            ValidationResult::Fail(violations)
        }
    }
}

/// Validate a candidate dataset, and the change against a baseline when one
/// is supplied (the prior accepted state in an incremental-update workflow).
pub fn validate(candidate: &Value, baseline: Option<&Value>) -> ValidationResult {
    // A non-array candidate is fatal on its own; no per-entry checks run
    let rows = match candidate.as_array() {
        Some(rows) => rows,
        None => {
            return ValidationResult::Fail(vec![Violation::InvalidShape {
                dataset: "candidate",
            }])
        }
    };

    let mut violations = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        check_entry(row, i + 1, &mut violations);
    }

    if let Some(baseline) = baseline {
        check_change_policy(rows.len(), baseline, &mut violations);
    }

    ValidationResult::from_violations(violations)
}

/// Per-entry contract checks, all collected, none short-circuited
fn check_entry(row: &Value, index: usize, violations: &mut Vec<Violation>) {
    for field in REQUIRED_FIELDS {
        if field_value(row, field).is_none() {
            violations.push(Violation::MissingField { index, field });
        }
    }

    if let Some(about) = field_value(row, "about").and_then(Value::as_str) {
        let actual = about.chars().count();
        if actual > ABOUT_MAX_LENGTH {
            violations.push(Violation::LengthExceeded {
                index,
                name: entry_name(row),
                limit: ABOUT_MAX_LENGTH,
                actual,
            });
        }
    }

    if let Some(website) = field_value(row, "website") {
        if !is_valid_url(website) {
            violations.push(Violation::InvalidUrl {
                index,
                name: entry_name(row),
            });
        }
    }

    if let Some(year) = field_value(row, "year") {
        if !is_valid_year(year) {
            violations.push(Violation::InvalidYear {
                index,
                name: entry_name(row),
                min: YEAR_MIN,
                max: YEAR_MAX,
            });
        }
    }
}

/// One-row-per-change policy: compares dataset lengths only. It does not
/// verify that existing rows are unmodified; that minimal semantics is the
/// contract.
fn check_change_policy(candidate_len: usize, baseline: &Value, violations: &mut Vec<Violation>) {
    let baseline_rows = match baseline.as_array() {
        Some(rows) => rows,
        None => {
            violations.push(Violation::InvalidShape {
                dataset: "baseline",
            });
            return;
        }
    };

    if candidate_len > baseline_rows.len() + 1 {
        violations.push(Violation::TooManyAdded {
            added: candidate_len - baseline_rows.len(),
        });
    } else if candidate_len < baseline_rows.len() {
        violations.push(Violation::RowsRemoved);
    }
}

/// Field lookup that treats JSON null as absent and accepts the `fact`
/// spelling for `about` (the renamed variant of the same contract)
fn field_value<'a>(row: &'a Value, field: &str) -> Option<&'a Value> {
    match row.get(field) {
        Some(v) if !v.is_null() => Some(v),
        _ if field == "about" => row.get("fact").filter(|v| !v.is_null()),
        _ => None,
    }
}

fn entry_name(row: &Value) -> String {
    row.get("name")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn is_valid_url(value: &Value) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    if s.trim().is_empty() {
        return false;
    }
    match Url::parse(s) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}

fn is_valid_year(value: &Value) -> bool {
    match value.as_i64() {
        Some(year) => (YEAR_MIN..=YEAR_MAX).contains(&year),
        None => false,
    }
}
