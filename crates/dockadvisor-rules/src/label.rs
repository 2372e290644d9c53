//! Validator for LABEL.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#label";

/// Validates LABEL key=value pairs.
pub struct LabelRule;

impl InstructionRule for LabelRule {
    fn keyword(&self) -> &'static str {
        "LABEL"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "LABEL requires at least one argument",
            )];
        }

        let config = instruction.config_text();

        if config.is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::LabelMissingKeyValue,
                "LABEL instruction must specify at least one key=value pair",
                URL,
            )];
        }

        if !has_key_value_pair(config) {
            return vec![Violation::error(
                instruction,
                RuleCode::LabelInvalidFormat,
                "LABEL instruction must be in the format <key>=<value> [<key>=<value>...]",
                URL,
            )];
        }

        Vec::new()
    }
}

/// At least one whitespace-separated token must look like `key=value` with a
/// non-empty key. Quoting inside values is out of scope for this check.
pub(crate) fn has_key_value_pair(config: &str) -> bool {
    if !config.contains('=') {
        return false;
    }
    config
        .split_whitespace()
        .any(|part| part.contains('=') && !part.starts_with('='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn codes(source: &str) -> Vec<RuleCode> {
        let dockerfile = lex(source).expect("lexes");
        LabelRule
            .check(&dockerfile.instructions[0])
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn key_value_pairs_are_clean() {
        assert!(codes("LABEL version=1.0").is_empty());
        assert!(codes(r#"LABEL maintainer="dev@example.com" version=1.0"#).is_empty());
    }

    #[test]
    fn missing_equals_is_rejected() {
        assert_eq!(codes("LABEL version"), [RuleCode::LabelInvalidFormat]);
        assert_eq!(codes("LABEL version 1.0"), [RuleCode::LabelInvalidFormat]);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(codes("LABEL =value"), [RuleCode::LabelInvalidFormat]);
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("LABEL"), [RuleCode::InvalidInstruction]);
    }
}
