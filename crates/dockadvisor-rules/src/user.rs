//! Validator for USER.

use once_cell::sync::Lazy;
use regex::Regex;

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#user";

static USER_RE: Lazy<Regex> = Lazy::new(|| {
    // <user>[:<group>] or <UID>[:<GID>]; '$' allows variable references.
    Regex::new(r"^[A-Za-z0-9_.$-]+(?::[A-Za-z0-9_.$-]+)?$").expect("user pattern")
});

/// Validates USER values.
pub struct UserRule;

impl InstructionRule for UserRule {
    fn keyword(&self) -> &'static str {
        "USER"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "USER requires at least one argument",
            )];
        }

        let config = instruction.args().join(" ");

        if config.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::UserMissingValue,
                "USER instruction must specify a user",
                URL,
            )];
        }

        if !USER_RE.is_match(config.trim()) {
            return vec![Violation::error(
                instruction,
                RuleCode::UserInvalidFormat,
                "USER instruction must be in the format <user>[:<group>] or <UID>[:<GID>]",
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
        UserRule
            .check(&dockerfile.instructions[0])
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn valid_users() {
        assert!(codes("USER nginx").is_empty());
        assert!(codes("USER 1000:1000").is_empty());
        assert!(codes("USER app-user.service").is_empty());
        assert!(codes("USER $APP_USER").is_empty());
    }

    #[test]
    fn invalid_formats() {
        assert_eq!(codes("USER a:b:c"), [RuleCode::UserInvalidFormat]);
        assert_eq!(codes("USER one two"), [RuleCode::UserInvalidFormat]);
        assert_eq!(codes("USER user!"), [RuleCode::UserInvalidFormat]);
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("USER"), [RuleCode::InvalidInstruction]);
    }
}
