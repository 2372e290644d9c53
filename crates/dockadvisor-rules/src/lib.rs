//! # dockadvisor-rules
//!
//! Built-in rules for the dockadvisor Dockerfile analyzer.
//!
//! The crate provides one validator per recognized instruction (implementing
//! [`dockadvisor_core::InstructionRule`]) and the cross-instruction passes
//! (implementing [`dockadvisor_core::DockerfileRule`]) that correlate state
//! across instructions and stages.
//!
//! ## Per-instruction validators
//!
//! | Keyword | Validator | Codes |
//! |---------|-----------|-------|
//! | FROM | [`FromRule`] | `FromMissingImage`, `FromInvalidImageReference`, `FromInvalidPlatform`, `FromInvalidStageName`, `ReservedStageName`, `RedundantTargetPlatform`, `StageNameCasing`, `FromAsCasing` |
//! | WORKDIR | [`WorkdirRule`] | `WorkdirRelativePath` |
//! | RUN | [`RunRule`] | `RunMissingCommand`, `RunInvalidExecForm`, `RunInvalidMountFlag`, `RunInvalidNetworkFlag`, `RunInvalidSecurityFlag` |
//! | EXPOSE | [`ExposeRule`] | `ExposeInvalidFormat`, `ExposePortOutOfRange`, `ExposeInvalidProtocol`, `ExposeProtoCasing` |
//! | CMD | [`CmdRule`] | `CmdMissingCommand`, `CmdInvalidExecForm` |
//! | ENTRYPOINT | [`EntrypointRule`] | `EntrypointMissingCommand`, `EntrypointInvalidExecForm` |
//! | SHELL | [`ShellRule`] | `ShellMissingConfig`, `ShellRequiresJsonForm`, `ShellInvalidJsonForm` |
//! | VOLUME | [`VolumeRule`] | `VolumeMissingPath`, `VolumeInvalidJsonForm` |
//! | USER | [`UserRule`] | `UserMissingValue`, `UserInvalidFormat` |
//! | LABEL | [`LabelRule`] | `LabelMissingKeyValue`, `LabelInvalidFormat` |
//! | ENV | [`EnvRule`] | `EnvMissingKeyValue`, `EnvInvalidFormat`, `LegacyKeyValueFormat` |
//! | ARG | [`ArgRule`] | `ArgMissingName`, `ArgInvalidFormat`, `LegacyKeyValueFormat` |
//! | COPY | [`CopyRule`] | `CopyMissingArguments`, `CopyInvalidFlag` |
//! | ADD | [`AddRule`] | `AddMissingArguments`, `AddInvalidFlag` |
//! | HEALTHCHECK | [`HealthcheckRule`] | `HealthcheckMissingCmd` |
//! | ONBUILD | [`OnbuildRule`] | `OnbuildMissingInstruction` |
//! | STOPSIGNAL | [`StopsignalRule`] | `StopsignalMissingValue` |
//! | MAINTAINER | [`MaintainerRule`] | `MaintainerMissingName`, `MaintainerDeprecated` |
//!
//! Every validator additionally reports `InvalidInstruction` when the
//! instruction carries no arguments at all.
//!
//! ## Cross-instruction passes
//!
//! In pipeline order: [`ContinuationScanner`], [`InstructionCasing`],
//! [`DuplicateStages`], [`ConstantPlatforms`], [`JsonArgsAdvice`],
//! [`UndefinedArgsInFrom`], [`UndefinedVariables`], [`RepeatedInstructions`],
//! [`SecretNames`], [`InvalidDefaultArgs`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod add;
mod arg;
mod casing;
mod cmd;
mod continuation;
mod copy;
mod duplicate_stages;
mod entrypoint;
mod env;
mod expose;
mod from;
mod healthcheck;
mod invalid_default_arg;
mod json_args;
mod label;
mod maintainer;
mod multiple_instructions;
mod onbuild;
mod platform_const;
mod registry;
mod run;
mod secrets;
mod shell;
mod stopsignal;
mod undefined_arg;
mod undefined_var;
mod user;
mod util;
mod variables;
mod volume;
mod workdir;

pub use add::AddRule;
pub use arg::ArgRule;
pub use casing::InstructionCasing;
pub use cmd::CmdRule;
pub use continuation::ContinuationScanner;
pub use copy::CopyRule;
pub use duplicate_stages::DuplicateStages;
pub use entrypoint::EntrypointRule;
pub use env::EnvRule;
pub use expose::ExposeRule;
pub use from::FromRule;
pub use healthcheck::HealthcheckRule;
pub use invalid_default_arg::InvalidDefaultArgs;
pub use json_args::JsonArgsAdvice;
pub use label::LabelRule;
pub use maintainer::MaintainerRule;
pub use multiple_instructions::RepeatedInstructions;
pub use onbuild::OnbuildRule;
pub use platform_const::ConstantPlatforms;
pub use registry::{default_passes, default_validators};
pub use run::RunRule;
pub use secrets::SecretNames;
pub use shell::ShellRule;
pub use stopsignal::StopsignalRule;
pub use undefined_arg::UndefinedArgsInFrom;
pub use undefined_var::UndefinedVariables;
pub use user::UserRule;
pub use volume::VolumeRule;
pub use workdir::WorkdirRule;

/// Re-export core types for convenience.
pub use dockadvisor_core::{DockerfileRule, InstructionRule, RuleCode, Severity, Violation};
