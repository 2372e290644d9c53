//! Validator for ONBUILD.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

/// ONBUILD must be followed by an instruction.
pub struct OnbuildRule;

impl InstructionRule for OnbuildRule {
    fn keyword(&self) -> &'static str {
        "ONBUILD"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "ONBUILD requires an instruction argument",
            )];
        }

        if instruction.config_text().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::OnbuildMissingInstruction,
                "ONBUILD must be followed by a Dockerfile instruction",
                "https://docs.docker.com/reference/dockerfile/#onbuild",
            )];
        }

        Vec::new()
    }
}
