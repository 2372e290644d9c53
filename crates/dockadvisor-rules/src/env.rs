//! Validator for ENV.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::label::has_key_value_pair;
use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#env";

/// Validates ENV key=value pairs and flags the legacy space-separated form.
pub struct EnvRule;

impl InstructionRule for EnvRule {
    fn keyword(&self) -> &'static str {
        "ENV"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "ENV requires at least one argument",
            )];
        }

        let config = instruction.config_text();

        if config.is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::EnvMissingKeyValue,
                "ENV instruction must specify at least one key=value pair",
                URL,
            )];
        }

        let legacy = is_legacy_syntax(config);

        if !legacy && !has_key_value_pair(config) {
            return vec![Violation::error(
                instruction,
                RuleCode::EnvInvalidFormat,
                "ENV instruction must be in the format <key>=<value> [<key>=<value>...]",
                URL,
            )];
        }

        let mut rules = Vec::new();
        if legacy {
            rules.push(Violation::warning(
                instruction,
                RuleCode::LegacyKeyValueFormat,
                "Legacy key/value format with whitespace separator should not be used. \
                 Use ENV key=value format instead",
                "https://docs.docker.com/reference/build-checks/legacy-key-value-format/",
            ));
        }
        rules
    }
}

/// The legacy `ENV key value` form: whitespace present but no `=` at all.
fn is_legacy_syntax(config: &str) -> bool {
    config.contains(' ') && !config.contains('=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn codes(source: &str) -> Vec<RuleCode> {
        let dockerfile = lex(source).expect("lexes");
        EnvRule
            .check(&dockerfile.instructions[0])
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn key_value_pairs_are_clean() {
        assert!(codes("ENV PATH=/usr/local/bin").is_empty());
        assert!(codes("ENV A=1 B=2").is_empty());
    }

    #[test]
    fn legacy_form_warns() {
        assert_eq!(codes("ENV PATH /usr/local/bin"), [RuleCode::LegacyKeyValueFormat]);
    }

    #[test]
    fn bare_name_is_rejected() {
        assert_eq!(codes("ENV PATH"), [RuleCode::EnvInvalidFormat]);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(codes("ENV =value"), [RuleCode::EnvInvalidFormat]);
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("ENV"), [RuleCode::InvalidInstruction]);
    }
}
