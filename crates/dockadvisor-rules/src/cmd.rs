//! Validator for CMD.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::{invalid_instruction, is_valid_exec_form};

const URL: &str = "https://docs.docker.com/reference/dockerfile/#cmd";

/// Validates CMD commands. The shell-form JSON recommendation is handled by
/// the whole-file [`crate::JsonArgsAdvice`] pass so a SHELL instruction can
/// suppress it.
pub struct CmdRule;

impl InstructionRule for CmdRule {
    fn keyword(&self) -> &'static str {
        "CMD"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        let config = instruction.config_text();

        // CMD [] is valid: an empty default parameter list for ENTRYPOINT.
        if instruction.args().is_empty() && config != "[]" {
            return vec![invalid_instruction(
                instruction,
                "CMD requires at least one argument",
            )];
        }

        let joined = instruction.args().join(" ");
        let command = if joined.is_empty() {
            config.to_string()
        } else {
            joined
        };

        if command.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::CmdMissingCommand,
                "CMD instruction must specify a command to execute",
                URL,
            )];
        }

        if config.starts_with('[') && !is_valid_exec_form(config, true) {
            return vec![Violation::error(
                instruction,
                RuleCode::CmdInvalidExecForm,
                "CMD exec form must be a valid JSON array with double quotes",
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
        CmdRule.check(&dockerfile.instructions[0])
    }

    fn codes(source: &str) -> Vec<RuleCode> {
        check(source).into_iter().map(|v| v.code).collect()
    }

    #[test]
    fn shell_form_is_clean() {
        assert!(check("CMD echo hi").is_empty());
    }

    #[test]
    fn exec_form_is_clean() {
        assert!(check(r#"CMD ["nginx", "-g", "daemon off;"]"#).is_empty());
    }

    #[test]
    fn empty_array_is_allowed() {
        assert!(check("CMD []").is_empty());
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("CMD"), [RuleCode::InvalidInstruction]);
    }

    #[test]
    fn blank_exec_element_is_a_missing_command() {
        assert_eq!(codes(r#"CMD [" "]"#), [RuleCode::CmdMissingCommand]);
    }

    #[test]
    fn single_quoted_exec_form_is_rejected() {
        assert_eq!(codes("CMD ['echo', 'hi']"), [RuleCode::CmdInvalidExecForm]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_eq!(codes(r#"CMD ["echo", "hi"#), [RuleCode::CmdInvalidExecForm]);
    }
}
