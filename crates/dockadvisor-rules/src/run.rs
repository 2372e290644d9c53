//! Validator for RUN.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::{invalid_instruction, is_valid_exec_form};

const URL: &str = "https://docs.docker.com/reference/dockerfile/#run";

const VALID_MOUNT_TYPES: &[&str] = &["bind", "cache", "tmpfs", "secret", "ssh"];
const VALID_NETWORKS: &[&str] = &["default", "none", "host"];
const VALID_SECURITY: &[&str] = &["sandbox", "insecure"];

/// Validates RUN commands and their `--mount`/`--network`/`--security` flags.
pub struct RunRule;

impl InstructionRule for RunRule {
    fn keyword(&self) -> &'static str {
        "RUN"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "RUN requires at least one argument",
            )];
        }

        let command = if instruction.is_exec_form() {
            instruction.args().join(" ")
        } else {
            instruction.args_text().to_string()
        };

        if command.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::RunMissingCommand,
                "RUN instruction must specify a command to execute",
                URL,
            )];
        }

        // A region starting with '[' that the lexer did not accept as exec
        // form is a malformed JSON array.
        if !instruction.is_exec_form()
            && command.trim().starts_with('[')
            && !is_valid_exec_form(&command, false)
        {
            return vec![Violation::error(
                instruction,
                RuleCode::RunInvalidExecForm,
                "RUN exec form must be a valid JSON array with double quotes",
                URL,
            )];
        }

        for flag in instruction.flags() {
            if let Some(mount) = flag.strip_prefix("--mount=") {
                if !valid_mount(mount) {
                    return vec![Violation::error(
                        instruction,
                        RuleCode::RunInvalidMountFlag,
                        format!("RUN --mount flag has invalid format: '{flag}'"),
                        "https://docs.docker.com/reference/dockerfile/#run---mount",
                    )];
                }
            }
            if let Some(network) = flag.strip_prefix("--network=") {
                if !VALID_NETWORKS.contains(&network) {
                    return vec![Violation::error(
                        instruction,
                        RuleCode::RunInvalidNetworkFlag,
                        format!(
                            "RUN --network flag must be one of: default, none, host. \
                             Got: '{network}'"
                        ),
                        "https://docs.docker.com/reference/dockerfile/#run---network",
                    )];
                }
            }
            if let Some(security) = flag.strip_prefix("--security=") {
                if !VALID_SECURITY.contains(&security) {
                    return vec![Violation::error(
                        instruction,
                        RuleCode::RunInvalidSecurityFlag,
                        format!(
                            "RUN --security flag must be one of: sandbox, insecure. \
                             Got: '{security}'"
                        ),
                        "https://docs.docker.com/reference/dockerfile/#run---security",
                    )];
                }
            }
        }

        Vec::new()
    }
}

/// A `--mount` value must either declare a known `type=` or be any non-empty
/// option list (the type then defaults to bind).
fn valid_mount(mount: &str) -> bool {
    if mount.is_empty() {
        return false;
    }
    if let Some(rest) = mount.strip_prefix("type=") {
        let mount_type = rest.split(',').next().unwrap_or_default();
        return VALID_MOUNT_TYPES.contains(&mount_type);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        let dockerfile = lex(source).expect("lexes");
        RunRule.check(&dockerfile.instructions[0])
    }

    fn codes(source: &str) -> Vec<RuleCode> {
        check(source).into_iter().map(|v| v.code).collect()
    }

    #[test]
    fn shell_form_is_clean() {
        assert!(check("RUN apk add --no-cache curl").is_empty());
    }

    #[test]
    fn exec_form_is_clean() {
        assert!(check(r#"RUN ["apk", "add", "curl"]"#).is_empty());
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("RUN"), [RuleCode::InvalidInstruction]);
    }

    #[test]
    fn single_quoted_exec_form_is_rejected() {
        assert_eq!(codes("RUN ['echo', 'hi']"), [RuleCode::RunInvalidExecForm]);
    }

    #[test]
    fn unterminated_exec_form_is_rejected() {
        assert_eq!(codes(r#"RUN ["echo", "hi""#), [RuleCode::RunInvalidExecForm]);
    }

    #[test]
    fn mount_flag_types() {
        assert!(check("RUN --mount=type=cache,target=/root/.cargo cargo build").is_empty());
        assert!(check("RUN --mount=type=secret,id=token cat /run/secrets/token").is_empty());
        assert!(check("RUN --mount=target=/src make").is_empty());
        assert_eq!(
            codes("RUN --mount=type=volume,target=/src make"),
            [RuleCode::RunInvalidMountFlag]
        );
        assert_eq!(codes("RUN --mount= make"), [RuleCode::RunInvalidMountFlag]);
    }

    #[test]
    fn network_flag_values() {
        assert!(check("RUN --network=none curl example.com").is_empty());
        assert_eq!(
            codes("RUN --network=bridge curl example.com"),
            [RuleCode::RunInvalidNetworkFlag]
        );
    }

    #[test]
    fn security_flag_values() {
        assert!(check("RUN --security=insecure some-tool").is_empty());
        assert_eq!(
            codes("RUN --security=privileged some-tool"),
            [RuleCode::RunInvalidSecurityFlag]
        );
    }
}
