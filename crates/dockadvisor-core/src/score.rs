//! Quality score over a finished rule list.

use crate::types::{Severity, Violation};

/// Computes the Dockerfile quality score.
///
/// `score = max(0, 100 - 15 * errors - 5 * warnings)`; any fatal violation
/// forces the score to 0.
#[must_use]
pub fn score(rules: &[Violation]) -> i32 {
    let mut errors: i32 = 0;
    let mut warnings: i32 = 0;
    for rule in rules {
        match rule.severity {
            Severity::Fatal => return 0,
            Severity::Error => errors += 1,
            Severity::Warning => warnings += 1,
        }
    }
    (100 - errors * 15 - warnings * 5).max(0)
}
