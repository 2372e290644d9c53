//! Validator for ADD.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#add";

const VALID_FLAGS: &[&str] = &[
    "--keep-git-dir",
    "--checksum",
    "--chown",
    "--chmod",
    "--link",
    "--exclude",
];

/// Validates ADD argument counts and flags.
pub struct AddRule;

impl InstructionRule for AddRule {
    fn keyword(&self) -> &'static str {
        "ADD"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "ADD requires at least source and destination arguments",
            )];
        }

        let arg_count = instruction
            .args()
            .iter()
            .filter(|arg| !arg.starts_with("--"))
            .count();
        if arg_count < 2 {
            return vec![Violation::error(
                instruction,
                RuleCode::AddMissingArguments,
                "ADD instruction requires at least source and destination arguments",
                URL,
            )];
        }

        for flag in instruction.flags() {
            let name = flag.split('=').next().unwrap_or(flag);
            if !VALID_FLAGS.contains(&name) {
                return vec![Violation::error(
                    instruction,
                    RuleCode::AddInvalidFlag,
                    format!("ADD instruction has invalid flag: {name}"),
                    URL,
                )];
            }
        }

        Vec::new()
    }
}
