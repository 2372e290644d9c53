//! The analysis pipeline: lex, run passes, dispatch validators, score.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use dockadvisor_core::{
    lex, score, Analysis, DockerfileRuleBox, InstructionRuleBox, LexError, RuleCode, Severity,
    Violation,
};
use dockadvisor_rules::{default_passes, default_validators};

/// Errors returned by [`parse`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be lexed into instructions.
    #[error("failed to parse Dockerfile: {0}")]
    Lex(#[from] LexError),
}

/// The analyzer holds the registered passes and validators.
///
/// Rule emission order is stable and part of the contract: lexer warnings
/// first, then each pass in registration order (each emitting in instruction
/// traversal order), then the per-instruction validators in traversal order.
pub struct Analyzer {
    passes: Vec<DockerfileRuleBox>,
    validators: HashMap<&'static str, InstructionRuleBox>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer with the full built-in rule set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            passes: default_passes(),
            validators: default_validators()
                .into_iter()
                .map(|validator| (validator.keyword(), validator))
                .collect(),
        }
    }

    /// Analyzes Dockerfile text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Lex`] when the input holds no instructions. All
    /// other findings are rules inside the returned [`Analysis`].
    pub fn analyze(&self, source: &str) -> Result<Analysis, ParseError> {
        let dockerfile = lex(source)?;
        let mut rules: Vec<Violation> = Vec::new();

        // Lexer warnings surface as ParserWarning rules. Empty-continuation
        // warnings are skipped: the continuation scanner owns that rule.
        for warning in &dockerfile.warnings {
            if warning.url.contains("no-empty-continuation") {
                continue;
            }
            rules.push(Violation::new(
                RuleCode::ParserWarning,
                Severity::Warning,
                warning.start_line,
                warning.end_line,
                warning.short.clone(),
                warning.url.clone(),
            ));
        }

        for pass in &self.passes {
            rules.extend(pass.check(&dockerfile));
        }

        for instruction in &dockerfile.instructions {
            match self.validators.get(instruction.keyword_upper().as_str()) {
                Some(validator) => rules.extend(validator.check(instruction)),
                None => rules.push(Violation::fatal(
                    instruction,
                    RuleCode::UnrecognizedInstruction,
                    format!(
                        "'{}' is not a recognized Dockerfile instruction",
                        instruction.keyword()
                    ),
                    "https://docs.docker.com/reference/dockerfile/",
                )),
            }
        }

        let score = score(&rules);
        debug!(rules = rules.len(), score, "analysis complete");
        Ok(Analysis { rules, score })
    }
}

/// Analyzes Dockerfile text with the full built-in rule set.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] when the input cannot be lexed into at least
/// one instruction.
pub fn parse(source: &str) -> Result<Analysis, ParseError> {
    Analyzer::new().analyze(source)
}
