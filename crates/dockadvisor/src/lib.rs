//! # dockadvisor
//!
//! Static analyzer for Dockerfiles. Given the text of a Dockerfile, [`parse`]
//! returns the list of rule violations (each pinned to a line range with a
//! stable code, severity, description and documentation URL) and an integer
//! quality score in `[0, 100]`.
//!
//! ```
//! let analysis = dockadvisor::parse("FROM alpine:latest\nRUN echo hi\n")?;
//! assert!(analysis.rules.is_empty());
//! assert_eq!(analysis.score, 100);
//! # Ok::<(), dockadvisor::ParseError>(())
//! ```
//!
//! Analysis is a pure function of the input text: no I/O, no shared state,
//! safe to call concurrently. The only error path is input that cannot be
//! lexed into at least one instruction; everything else is reported as a
//! rule inside the returned [`Analysis`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;

pub use analyzer::{parse, Analyzer, ParseError};

pub use dockadvisor_core::{
    score, Analysis, Dockerfile, Instruction, LexError, RuleCode, Severity, Violation,
};
