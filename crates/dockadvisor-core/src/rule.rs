//! Rule traits for validators and cross-instruction passes.

use crate::lexer::{Dockerfile, Instruction};
use crate::types::Violation;

/// A validator for one instruction keyword.
///
/// Implementations examine a single [`Instruction`] in isolation. By
/// convention they short-circuit on the first error and only accumulate
/// warnings once no error was found.
///
/// # Example
///
/// ```ignore
/// use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};
///
/// pub struct StopsignalRule;
///
/// impl InstructionRule for StopsignalRule {
///     fn keyword(&self) -> &'static str {
///         "STOPSIGNAL"
///     }
///
///     fn check(&self, instruction: &Instruction) -> Vec<Violation> {
///         if instruction.args().is_empty() {
///             return vec![Violation::error(
///                 instruction,
///                 RuleCode::InvalidInstruction,
///                 "STOPSIGNAL requires a signal argument",
///                 "",
///             )];
///         }
///         Vec::new()
///     }
/// }
/// ```
pub trait InstructionRule: Send + Sync {
    /// The uppercase keyword this validator handles.
    fn keyword(&self) -> &'static str;

    /// Checks a single instruction and returns any violations found.
    fn check(&self, instruction: &Instruction) -> Vec<Violation>;
}

/// Type alias for boxed [`InstructionRule`] trait objects.
pub type InstructionRuleBox = Box<dyn InstructionRule>;

/// A pass over the whole Dockerfile.
///
/// Implement this trait for checks that correlate state across instructions
/// and stages (scope tracking, duplicate detection) or that must look at the
/// raw physical lines rather than the instruction stream.
pub trait DockerfileRule: Send + Sync {
    /// Returns the kebab-case name of this pass (e.g., "duplicate-stage-names").
    fn name(&self) -> &'static str;

    /// Checks the full Dockerfile and returns any violations found, in
    /// instruction traversal order.
    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation>;
}

/// Type alias for boxed [`DockerfileRule`] trait objects.
pub type DockerfileRuleBox = Box<dyn DockerfileRule>;
