//! Validator for ARG.

use once_cell::sync::Lazy;
use regex::Regex;

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#arg";

static ARG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("arg name pattern"));

/// Validates ARG declarations.
pub struct ArgRule;

impl InstructionRule for ArgRule {
    fn keyword(&self) -> &'static str {
        "ARG"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "ARG requires at least one argument",
            )];
        }

        let config = instruction.args().join(" ");

        if config.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::ArgMissingName,
                "ARG instruction must specify at least one argument name",
                URL,
            )];
        }

        if !valid_arg_tokens(&config) {
            return vec![Violation::error(
                instruction,
                RuleCode::ArgInvalidFormat,
                "ARG instruction must be in the format <name>[=<default value>]",
                URL,
            )];
        }

        let mut rules = Vec::new();
        if is_ambiguous_multi_arg(&config) {
            rules.push(Violation::warning(
                instruction,
                RuleCode::LegacyKeyValueFormat,
                "Legacy key/value format with whitespace separator should not be used. \
                 Use ARG key=value format instead",
                "https://docs.docker.com/reference/build-checks/legacy-key-value-format/",
            ));
        }
        rules
    }
}

/// Every token must be `name` or `name=value` with a valid identifier name.
fn valid_arg_tokens(config: &str) -> bool {
    config.split_whitespace().all(|part| {
        let name = part.split_once('=').map_or(part, |(name, _)| name);
        ARG_NAME_RE.is_match(name)
    })
}

/// `ARG foo bar` is ambiguous: it declares two arguments but reads like a
/// legacy key/value attempt. A single bare name is fine; so is an all-`=`
/// multi-arg list.
fn is_ambiguous_multi_arg(config: &str) -> bool {
    let parts: Vec<&str> = config.split_whitespace().collect();
    parts.len() > 1 && parts.iter().any(|part| !part.contains('='))
}
