//! Validator for COPY.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#copy";

const VALID_FLAGS: &[&str] = &[
    "--from",
    "--chown",
    "--chmod",
    "--link",
    "--parents",
    "--exclude",
];

/// Validates COPY argument counts and flags.
pub struct CopyRule;

impl InstructionRule for CopyRule {
    fn keyword(&self) -> &'static str {
        "COPY"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "COPY requires at least source and destination arguments",
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
                RuleCode::CopyMissingArguments,
                "COPY instruction requires at least source and destination arguments",
                URL,
            )];
        }

        for flag in instruction.flags() {
            let name = flag.split('=').next().unwrap_or(flag);
            if !VALID_FLAGS.contains(&name) {
                return vec![Violation::error(
                    instruction,
                    RuleCode::CopyInvalidFlag,
                    format!("COPY instruction has invalid flag: {name}"),
                    URL,
                )];
            }
        }

        Vec::new()
    }
}
