//! Validator for HEALTHCHECK.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

/// HEALTHCHECK must be `NONE` or carry a `CMD`.
pub struct HealthcheckRule;

impl InstructionRule for HealthcheckRule {
    fn keyword(&self) -> &'static str {
        "HEALTHCHECK"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(instruction, "HEALTHCHECK requires arguments")];
        }

        if instruction.args()[0].eq_ignore_ascii_case("NONE") {
            return Vec::new();
        }

        let has_cmd = instruction
            .args()
            .iter()
            .any(|arg| arg.eq_ignore_ascii_case("CMD"));
        if !has_cmd {
            return vec![Violation::error(
                instruction,
                RuleCode::HealthcheckMissingCmd,
                "HEALTHCHECK instruction must include CMD keyword or be HEALTHCHECK NONE",
                "https://docs.docker.com/reference/dockerfile/#healthcheck",
            )];
        }

        Vec::new()
    }
}
