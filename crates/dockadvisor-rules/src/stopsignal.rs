//! Validator for STOPSIGNAL.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

/// STOPSIGNAL must carry a signal value.
pub struct StopsignalRule;

impl InstructionRule for StopsignalRule {
    fn keyword(&self) -> &'static str {
        "STOPSIGNAL"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "STOPSIGNAL requires a signal argument",
            )];
        }

        if instruction.args()[0].trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::StopsignalMissingValue,
                "STOPSIGNAL must specify a signal",
                "https://docs.docker.com/reference/dockerfile/#stopsignal",
            )];
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn codes(source: &str) -> Vec<RuleCode> {
        let dockerfile = lex(source).expect("lexes");
        StopsignalRule
            .check(&dockerfile.instructions[0])
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn signal_names_and_numbers_are_clean() {
        assert!(codes("STOPSIGNAL SIGTERM").is_empty());
        assert!(codes("STOPSIGNAL 9").is_empty());
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("STOPSIGNAL"), [RuleCode::InvalidInstruction]);
    }
}
