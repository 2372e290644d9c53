//! Core types for Dockerfile analysis findings.

use serde::{Deserialize, Serialize};

use crate::lexer::Instruction;

/// Severity level for a rule violation.
///
/// Severities are ordered: `Warning < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style or best-practice finding. Costs 5 score points.
    Warning,
    /// Finding that breaks build semantics. Costs 15 score points.
    Error,
    /// The input cannot be meaningfully analyzed. Forces the score to 0.
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// The closed set of rule codes dockadvisor can report.
///
/// Codes are stable, machine-readable identifiers; they serialize and display
/// as their PascalCase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCode {
    /// Instruction is present but has no arguments at all.
    InvalidInstruction,
    /// Keyword is not a recognized Dockerfile instruction.
    UnrecognizedInstruction,
    /// Empty line follows a backslash line continuation.
    NoEmptyContinuation,
    /// Warning surfaced by the lexer itself.
    ParserWarning,

    /// FROM has no image reference.
    FromMissingImage,
    /// FROM image reference fails the format check.
    FromInvalidImageReference,
    /// FROM `--platform` flag is not a valid `os[/arch[/variant]]`.
    FromInvalidPlatform,
    /// FROM `AS` stage name has invalid characters.
    FromInvalidStageName,
    /// Stage name collides with a reserved word.
    ReservedStageName,
    /// `--platform=$TARGETPLATFORM` restates the default behavior.
    RedundantTargetPlatform,
    /// Stage name contains uppercase characters.
    StageNameCasing,
    /// FROM and AS keywords mix upper and lower case.
    FromAsCasing,

    /// WORKDIR uses a relative path.
    WorkdirRelativePath,

    /// RUN has no command.
    RunMissingCommand,
    /// RUN exec form is not a valid JSON array of strings.
    RunInvalidExecForm,
    /// RUN `--mount` flag has an unknown mount type.
    RunInvalidMountFlag,
    /// RUN `--network` flag is not one of default, none, host.
    RunInvalidNetworkFlag,
    /// RUN `--security` flag is not one of sandbox, insecure.
    RunInvalidSecurityFlag,

    /// EXPOSE defines an IP address or host-port mapping.
    ExposeInvalidFormat,
    /// EXPOSE port is outside the range 0-65535.
    ExposePortOutOfRange,
    /// EXPOSE protocol is neither tcp nor udp.
    ExposeInvalidProtocol,
    /// EXPOSE protocol is not lowercase.
    ExposeProtoCasing,

    /// CMD has no command.
    CmdMissingCommand,
    /// CMD exec form is not a valid JSON array of strings.
    CmdInvalidExecForm,
    /// ENTRYPOINT has no command.
    EntrypointMissingCommand,
    /// ENTRYPOINT exec form is not a valid JSON array of strings.
    EntrypointInvalidExecForm,

    /// SHELL has no configuration.
    ShellMissingConfig,
    /// SHELL is not written in JSON form.
    ShellRequiresJsonForm,
    /// SHELL JSON form is malformed.
    ShellInvalidJsonForm,

    /// VOLUME has no mount point.
    VolumeMissingPath,
    /// VOLUME JSON form is malformed.
    VolumeInvalidJsonForm,

    /// USER has no value.
    UserMissingValue,
    /// USER is not `<user>[:<group>]`.
    UserInvalidFormat,

    /// LABEL has no key=value pair.
    LabelMissingKeyValue,
    /// LABEL is not in `key=value` form.
    LabelInvalidFormat,
    /// ENV has no key=value pair.
    EnvMissingKeyValue,
    /// ENV is not in `key=value` form.
    EnvInvalidFormat,
    /// Whitespace-separated key/value syntax is deprecated.
    LegacyKeyValueFormat,

    /// ARG has no name.
    ArgMissingName,
    /// ARG name is not `name[=default]` with a valid identifier.
    ArgInvalidFormat,

    /// COPY has fewer than source and destination arguments.
    CopyMissingArguments,
    /// COPY uses a flag outside the allowed set.
    CopyInvalidFlag,
    /// ADD has fewer than source and destination arguments.
    AddMissingArguments,
    /// ADD uses a flag outside the allowed set.
    AddInvalidFlag,

    /// HEALTHCHECK is neither `NONE` nor contains a `CMD`.
    HealthcheckMissingCmd,
    /// ONBUILD is not followed by an instruction.
    OnbuildMissingInstruction,
    /// STOPSIGNAL has no signal value.
    StopsignalMissingValue,
    /// MAINTAINER has no name.
    MaintainerMissingName,
    /// MAINTAINER is deprecated in favor of LABEL.
    MaintainerDeprecated,

    /// Instruction keywords mix upper and lower case across the file.
    ConsistentInstructionCasing,
    /// Stage name is declared more than once.
    DuplicateStageName,
    /// FROM `--platform` uses a constant value in an unreferenced stage.
    FromPlatformFlagConstDisallowed,
    /// CMD/ENTRYPOINT shell form without an explicit SHELL instruction.
    #[serde(rename = "JSONArgsRecommended")]
    JsonArgsRecommended,
    /// FROM references an ARG that is not declared in global scope.
    UndefinedArgInFrom,
    /// Variable reference is not in scope.
    UndefinedVar,
    /// CMD/ENTRYPOINT/HEALTHCHECK repeated within one stage.
    MultipleInstructionsDisallowed,
    /// ARG/ENV name suggests it holds a secret.
    SecretsUsedInArgOrEnv,
    /// Defaultless global ARG would yield an invalid FROM reference.
    InvalidDefaultArgInFrom,
}

impl RuleCode {
    /// Returns the stable PascalCase identifier for this code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInstruction => "InvalidInstruction",
            Self::UnrecognizedInstruction => "UnrecognizedInstruction",
            Self::NoEmptyContinuation => "NoEmptyContinuation",
            Self::ParserWarning => "ParserWarning",
            Self::FromMissingImage => "FromMissingImage",
            Self::FromInvalidImageReference => "FromInvalidImageReference",
            Self::FromInvalidPlatform => "FromInvalidPlatform",
            Self::FromInvalidStageName => "FromInvalidStageName",
            Self::ReservedStageName => "ReservedStageName",
            Self::RedundantTargetPlatform => "RedundantTargetPlatform",
            Self::StageNameCasing => "StageNameCasing",
            Self::FromAsCasing => "FromAsCasing",
            Self::WorkdirRelativePath => "WorkdirRelativePath",
            Self::RunMissingCommand => "RunMissingCommand",
            Self::RunInvalidExecForm => "RunInvalidExecForm",
            Self::RunInvalidMountFlag => "RunInvalidMountFlag",
            Self::RunInvalidNetworkFlag => "RunInvalidNetworkFlag",
            Self::RunInvalidSecurityFlag => "RunInvalidSecurityFlag",
            Self::ExposeInvalidFormat => "ExposeInvalidFormat",
            Self::ExposePortOutOfRange => "ExposePortOutOfRange",
            Self::ExposeInvalidProtocol => "ExposeInvalidProtocol",
            Self::ExposeProtoCasing => "ExposeProtoCasing",
            Self::CmdMissingCommand => "CmdMissingCommand",
            Self::CmdInvalidExecForm => "CmdInvalidExecForm",
            Self::EntrypointMissingCommand => "EntrypointMissingCommand",
            Self::EntrypointInvalidExecForm => "EntrypointInvalidExecForm",
            Self::ShellMissingConfig => "ShellMissingConfig",
            Self::ShellRequiresJsonForm => "ShellRequiresJsonForm",
            Self::ShellInvalidJsonForm => "ShellInvalidJsonForm",
            Self::VolumeMissingPath => "VolumeMissingPath",
            Self::VolumeInvalidJsonForm => "VolumeInvalidJsonForm",
            Self::UserMissingValue => "UserMissingValue",
            Self::UserInvalidFormat => "UserInvalidFormat",
            Self::LabelMissingKeyValue => "LabelMissingKeyValue",
            Self::LabelInvalidFormat => "LabelInvalidFormat",
            Self::EnvMissingKeyValue => "EnvMissingKeyValue",
            Self::EnvInvalidFormat => "EnvInvalidFormat",
            Self::LegacyKeyValueFormat => "LegacyKeyValueFormat",
            Self::ArgMissingName => "ArgMissingName",
            Self::ArgInvalidFormat => "ArgInvalidFormat",
            Self::CopyMissingArguments => "CopyMissingArguments",
            Self::CopyInvalidFlag => "CopyInvalidFlag",
            Self::AddMissingArguments => "AddMissingArguments",
            Self::AddInvalidFlag => "AddInvalidFlag",
            Self::HealthcheckMissingCmd => "HealthcheckMissingCmd",
            Self::OnbuildMissingInstruction => "OnbuildMissingInstruction",
            Self::StopsignalMissingValue => "StopsignalMissingValue",
            Self::MaintainerMissingName => "MaintainerMissingName",
            Self::MaintainerDeprecated => "MaintainerDeprecated",
            Self::ConsistentInstructionCasing => "ConsistentInstructionCasing",
            Self::DuplicateStageName => "DuplicateStageName",
            Self::FromPlatformFlagConstDisallowed => "FromPlatformFlagConstDisallowed",
            Self::JsonArgsRecommended => "JSONArgsRecommended",
            Self::UndefinedArgInFrom => "UndefinedArgInFrom",
            Self::UndefinedVar => "UndefinedVar",
            Self::MultipleInstructionsDisallowed => "MultipleInstructionsDisallowed",
            Self::SecretsUsedInArgOrEnv => "SecretsUsedInArgOrEnv",
            Self::InvalidDefaultArgInFrom => "InvalidDefaultArgInFrom",
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation, pinned to a line range of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// First line of the offending region (1-based, inclusive).
    pub start_line: usize,
    /// Last line of the offending region (1-based, inclusive).
    pub end_line: usize,
    /// Stable machine-readable code.
    pub code: RuleCode,
    /// Human-readable description.
    pub description: String,
    /// Documentation link, or empty when none exists.
    pub url: String,
    /// Severity that drives the score.
    pub severity: Severity,
}

impl Violation {
    /// Creates a violation spanning an explicit line range.
    #[must_use]
    pub fn new(
        code: RuleCode,
        severity: Severity,
        start_line: usize,
        end_line: usize,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            start_line,
            end_line,
            code,
            description: description.into(),
            url: url.into(),
            severity,
        }
    }

    /// Creates an error-severity violation located at an instruction.
    #[must_use]
    pub fn error(
        instruction: &Instruction,
        code: RuleCode,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(
            code,
            Severity::Error,
            instruction.start_line(),
            instruction.end_line(),
            description,
            url,
        )
    }

    /// Creates a warning-severity violation located at an instruction.
    #[must_use]
    pub fn warning(
        instruction: &Instruction,
        code: RuleCode,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(
            code,
            Severity::Warning,
            instruction.start_line(),
            instruction.end_line(),
            description,
            url,
        )
    }

    /// Creates a fatal-severity violation located at an instruction.
    #[must_use]
    pub fn fatal(
        instruction: &Instruction,
        code: RuleCode,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(
            code,
            Severity::Fatal,
            instruction.start_line(),
            instruction.end_line(),
            description,
            url,
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start_line == self.end_line {
            write!(
                f,
                "Line {}: [{}] {}",
                self.start_line, self.code, self.description
            )
        } else {
            write!(
                f,
                "Line {}-{}: [{}] {}",
                self.start_line, self.end_line, self.code, self.description
            )
        }
    }
}

/// Result of analyzing one Dockerfile.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// All violations, in the stable emission order of the pipeline.
    pub rules: Vec<Violation>,
    /// Quality score in `[0, 100]`.
    pub score: i32,
}

impl Analysis {
    /// Counts violations by severity as `(fatals, errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let mut fatals = 0;
        let mut errors = 0;
        let mut warnings = 0;
        for rule in &self.rules {
            match rule.severity {
                Severity::Fatal => fatals += 1,
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
            }
        }
        (fatals, errors, warnings)
    }

    /// Returns true if any violation is at or above the given severity.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.rules.iter().any(|r| r.severity >= severity)
    }
}
