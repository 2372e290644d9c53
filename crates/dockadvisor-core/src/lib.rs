//! # dockadvisor-core
//!
//! Core building blocks for the dockadvisor Dockerfile analyzer.
//!
//! This crate provides:
//!
//! - [`lex`] — the Dockerfile lexer that splits raw text into logical
//!   [`Instruction`]s (continuations joined, comments stripped)
//! - [`Violation`], [`RuleCode`] and [`Severity`] — the finding model
//! - [`InstructionRule`] and [`DockerfileRule`] — the traits every
//!   validator and cross-instruction pass implements
//! - [`score`] — the quality score over a finished rule list
//!
//! The crate is pure: no I/O, no global mutable state, deterministic output
//! for a given input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lexer;
mod rule;
mod score;
mod types;

pub use lexer::{lex, Dockerfile, Instruction, LexError, LexWarning};
pub use rule::{DockerfileRule, DockerfileRuleBox, InstructionRule, InstructionRuleBox};
pub use score::score;
pub use types::{Analysis, RuleCode, Severity, Violation};
