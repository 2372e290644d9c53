//! Validator for VOLUME.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::{invalid_instruction, is_valid_exec_form};

const URL: &str = "https://docs.docker.com/reference/dockerfile/#volume";

/// Validates VOLUME mount points; the JSON form must be well-formed when
/// used.
pub struct VolumeRule;

impl InstructionRule for VolumeRule {
    fn keyword(&self) -> &'static str {
        "VOLUME"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "VOLUME requires at least one argument",
            )];
        }

        let config = instruction.args().join(" ");

        if config.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::VolumeMissingPath,
                "VOLUME instruction must specify at least one mount point",
                URL,
            )];
        }

        // Exec-form arguments were already unpacked by the lexer; a config
        // still starting with '[' is a malformed JSON array.
        if config.trim().starts_with('[') && !is_valid_exec_form(config.trim(), false) {
            return vec![Violation::error(
                instruction,
                RuleCode::VolumeInvalidJsonForm,
                "VOLUME JSON form must be a valid JSON array with double quotes",
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

    fn codes(source: &str) -> Vec<RuleCode> {
        let dockerfile = lex(source).expect("lexes");
        VolumeRule
            .check(&dockerfile.instructions[0])
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn plain_paths_are_clean() {
        assert!(codes("VOLUME /data").is_empty());
        assert!(codes("VOLUME /data /logs").is_empty());
    }

    #[test]
    fn json_form_is_clean() {
        assert!(codes(r#"VOLUME ["/data", "/logs"]"#).is_empty());
    }

    #[test]
    fn single_quoted_json_is_rejected() {
        assert_eq!(codes("VOLUME ['/data']"), [RuleCode::VolumeInvalidJsonForm]);
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("VOLUME"), [RuleCode::InvalidInstruction]);
    }
}
