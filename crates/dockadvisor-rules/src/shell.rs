//! Validator for SHELL.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::{invalid_instruction, is_valid_exec_form};

const URL: &str = "https://docs.docker.com/reference/dockerfile/#shell";

/// SHELL must always be written in JSON form.
pub struct ShellRule;

impl InstructionRule for ShellRule {
    fn keyword(&self) -> &'static str {
        "SHELL"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "SHELL requires at least one argument",
            )];
        }

        let config = instruction.config_text();

        if config.is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::ShellMissingConfig,
                "SHELL instruction must specify a shell configuration",
                URL,
            )];
        }

        if !config.starts_with('[') {
            return vec![Violation::error(
                instruction,
                RuleCode::ShellRequiresJsonForm,
                "SHELL instruction must be written in JSON form \
                 (e.g., SHELL [\"executable\", \"parameters\"])",
                URL,
            )];
        }

        if !is_valid_exec_form(config, false) {
            return vec![Violation::error(
                instruction,
                RuleCode::ShellInvalidJsonForm,
                "SHELL instruction must be a valid JSON array with double quotes",
                URL,
            )];
        }

        Vec::new()
    }
}
