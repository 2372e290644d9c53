//! Validator for the deprecated MAINTAINER instruction.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

/// MAINTAINER always warns: the instruction is deprecated in favor of LABEL.
pub struct MaintainerRule;

impl InstructionRule for MaintainerRule {
    fn keyword(&self) -> &'static str {
        "MAINTAINER"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "MAINTAINER requires a name argument",
            )];
        }

        if instruction.args()[0].trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::MaintainerMissingName,
                "MAINTAINER must specify a name",
                "https://docs.docker.com/reference/dockerfile/#maintainer-deprecated",
            )];
        }

        vec![Violation::warning(
            instruction,
            RuleCode::MaintainerDeprecated,
            "MAINTAINER instruction is deprecated in favor of using label",
            "https://docs.docker.com/reference/build-checks/maintainer-deprecated/",
        )]
    }
}
