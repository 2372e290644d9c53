//! Default rule sets in pipeline order.

use dockadvisor_core::{DockerfileRuleBox, InstructionRuleBox};

use crate::{
    AddRule, ArgRule, CmdRule, ConstantPlatforms, ContinuationScanner, CopyRule, DuplicateStages,
    EntrypointRule, EnvRule, ExposeRule, FromRule, HealthcheckRule, InstructionCasing,
    InvalidDefaultArgs, JsonArgsAdvice, LabelRule, MaintainerRule, OnbuildRule,
    RepeatedInstructions, RunRule, SecretNames, ShellRule, StopsignalRule, UndefinedArgsInFrom,
    UndefinedVariables, UserRule, VolumeRule, WorkdirRule,
};

/// All cross-instruction passes, in the order the analyzer runs them.
///
/// The order is part of the output contract: rules from earlier passes come
/// first in the final list.
#[must_use]
pub fn default_passes() -> Vec<DockerfileRuleBox> {
    vec![
        Box::new(ContinuationScanner),
        Box::new(InstructionCasing),
        Box::new(DuplicateStages),
        Box::new(ConstantPlatforms),
        Box::new(JsonArgsAdvice),
        Box::new(UndefinedArgsInFrom),
        Box::new(UndefinedVariables),
        Box::new(RepeatedInstructions),
        Box::new(SecretNames),
        Box::new(InvalidDefaultArgs),
    ]
}

/// All per-instruction validators, one per recognized keyword.
#[must_use]
pub fn default_validators() -> Vec<InstructionRuleBox> {
    vec![
        Box::new(FromRule),
        Box::new(WorkdirRule),
        Box::new(RunRule),
        Box::new(ExposeRule),
        Box::new(CmdRule),
        Box::new(EntrypointRule),
        Box::new(ShellRule),
        Box::new(VolumeRule),
        Box::new(UserRule),
        Box::new(LabelRule),
        Box::new(EnvRule),
        Box::new(ArgRule),
        Box::new(CopyRule),
        Box::new(AddRule),
        Box::new(HealthcheckRule),
        Box::new(OnbuildRule),
        Box::new(StopsignalRule),
        Box::new(MaintainerRule),
    ]
}
