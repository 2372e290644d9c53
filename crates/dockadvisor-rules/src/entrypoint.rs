//! Validator for ENTRYPOINT.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::{invalid_instruction, is_valid_exec_form};

const URL: &str = "https://docs.docker.com/reference/dockerfile/#entrypoint";

/// Validates ENTRYPOINT commands. Unlike CMD, an empty exec array is not
/// accepted.
pub struct EntrypointRule;

impl InstructionRule for EntrypointRule {
    fn keyword(&self) -> &'static str {
        "ENTRYPOINT"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "ENTRYPOINT requires at least one argument",
            )];
        }

        let config = instruction.config_text();
        let joined = instruction.args().join(" ");
        let command = if joined.is_empty() {
            config.to_string()
        } else {
            joined
        };

        if command.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::EntrypointMissingCommand,
                "ENTRYPOINT instruction must specify a command to execute",
                URL,
            )];
        }

        if config.starts_with('[') && !is_valid_exec_form(config, false) {
            return vec![Violation::error(
                instruction,
                RuleCode::EntrypointInvalidExecForm,
                "ENTRYPOINT exec form must be a valid JSON array with double quotes",
                URL,
            )];
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        let dockerfile = lex(source).expect("lexes");
        EntrypointRule.check(&dockerfile.instructions[0])
    }

    fn codes(source: &str) -> Vec<RuleCode> {
        check(source).into_iter().map(|v| v.code).collect()
    }

    #[test]
    fn shell_form_is_clean() {
        assert!(check("ENTRYPOINT top -b").is_empty());
    }

    #[test]
    fn exec_form_is_clean() {
        assert!(check(r#"ENTRYPOINT ["top", "-b"]"#).is_empty());
    }

    #[test]
    fn empty_array_is_rejected() {
        assert_eq!(codes("ENTRYPOINT []"), [RuleCode::InvalidInstruction]);
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("ENTRYPOINT"), [RuleCode::InvalidInstruction]);
    }

    #[test]
    fn blank_exec_element_is_a_missing_command() {
        assert_eq!(
            codes(r#"ENTRYPOINT [" "]"#),
            [RuleCode::EntrypointMissingCommand]
        );
    }

    #[test]
    fn single_quoted_exec_form_is_rejected() {
        assert_eq!(
            codes("ENTRYPOINT ['top', '-b']"),
            [RuleCode::EntrypointInvalidExecForm]
        );
    }
}
