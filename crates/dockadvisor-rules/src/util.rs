//! Helpers shared across validators.

use dockadvisor_core::{Instruction, RuleCode, Violation};

/// Builds the error every validator reports for an instruction with no
/// arguments at all.
pub(crate) fn invalid_instruction(
    instruction: &Instruction,
    description: impl Into<String>,
) -> Violation {
    Violation::error(instruction, RuleCode::InvalidInstruction, description, "")
}

/// Validates a raw exec-form region as a JSON array of strings.
///
/// The region must start with `[`, end with `]`, parse as a JSON array of
/// strings and use double quotes throughout. `allow_empty` permits the empty
/// array (CMD accepts `[]` as default parameters to ENTRYPOINT).
pub(crate) fn is_valid_exec_form(raw: &str, allow_empty: bool) -> bool {
    let raw = raw.trim();
    if !raw.starts_with('[') || !raw.ends_with(']') {
        return false;
    }
    let Ok(values) = serde_json::from_str::<Vec<String>>(raw) else {
        return false;
    };
    if values.is_empty() && !allow_empty {
        return false;
    }
    // Single-quoted elements survive a lenient reading; reject them outright.
    !raw.contains("['") && !raw.contains("']")
}
