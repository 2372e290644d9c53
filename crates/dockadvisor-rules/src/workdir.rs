//! Validator for WORKDIR.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

/// Warns when WORKDIR uses a relative path.
pub struct WorkdirRule;

impl InstructionRule for WorkdirRule {
    fn keyword(&self) -> &'static str {
        "WORKDIR"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "WORKDIR requires exactly one argument",
            )];
        }

        if is_absolute(&instruction.args()[0]) {
            return Vec::new();
        }

        vec![Violation::warning(
            instruction,
            RuleCode::WorkdirRelativePath,
            "WORKDIR uses a relative path. Consider using an absolute path (starting with /) \
             to avoid issues when the base image's working directory changes.",
            "https://docs.docker.com/reference/build-checks/workdir-relative-path/",
        )]
    }
}

/// Unix absolute paths, Windows drive paths and variable references all count
/// as absolute; variables resolve at build time and cannot be judged here.
fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('$') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        let dockerfile = lex(source).expect("lexes");
        WorkdirRule.check(&dockerfile.instructions[0])
    }

    #[test]
    fn absolute_paths_are_clean() {
        assert!(check("WORKDIR /app").is_empty());
        assert!(check("WORKDIR C:\\app").is_empty());
        assert!(check("WORKDIR c:/app").is_empty());
        assert!(check("WORKDIR $HOME/app").is_empty());
        assert!(check("WORKDIR ${APP_HOME}").is_empty());
    }

    #[test]
    fn relative_path_warns() {
        let violations = check("WORKDIR app/src");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, RuleCode::WorkdirRelativePath);
        assert_eq!(violations[0].severity, crate::Severity::Warning);
    }

    #[test]
    fn missing_argument() {
        let violations = check("WORKDIR");
        assert_eq!(violations[0].code, RuleCode::InvalidInstruction);
    }
}
