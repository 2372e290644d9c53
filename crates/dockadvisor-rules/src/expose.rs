//! Validator for EXPOSE.

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

/// Validates EXPOSE port specifications.
pub struct ExposeRule;

impl InstructionRule for ExposeRule {
    fn keyword(&self) -> &'static str {
        "EXPOSE"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "EXPOSE requires at least one argument",
            )];
        }

        for spec in instruction.args() {
            if spec.contains(':') {
                return vec![Violation::error(
                    instruction,
                    RuleCode::ExposeInvalidFormat,
                    format!(
                        "EXPOSE instruction should not define an IP address or host-port \
                         mapping, found '{spec}'"
                    ),
                    "https://docs.docker.com/reference/build-checks/expose-invalid-format/",
                )];
            }
            if !port_in_range(spec) {
                return vec![Violation::error(
                    instruction,
                    RuleCode::ExposePortOutOfRange,
                    format!(
                        "Port number in EXPOSE instruction is outside valid UNIX port range \
                         (0-65535): '{spec}'"
                    ),
                    "https://en.wikipedia.org/wiki/List_of_TCP_and_UDP_port_numbers",
                )];
            }
            if !valid_protocol(spec) {
                return vec![Violation::error(
                    instruction,
                    RuleCode::ExposeInvalidProtocol,
                    format!(
                        "Invalid protocol in EXPOSE instruction '{spec}', only 'tcp' and \
                         'udp' are supported"
                    ),
                    "https://docs.docker.com/reference/dockerfile/#expose",
                )];
            }
        }

        let mut rules = Vec::new();
        for spec in instruction.args() {
            if !lowercase_protocol(spec) {
                rules.push(Violation::warning(
                    instruction,
                    RuleCode::ExposeProtoCasing,
                    format!(
                        "Defined protocol '{spec}' in EXPOSE instruction should be lowercase"
                    ),
                    "https://docs.docker.com/reference/build-checks/expose-proto-casing/",
                ));
            }
        }
        rules
    }
}

fn split_protocol(spec: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = spec.split('/').collect();
    match parts.as_slice() {
        [port, protocol] => Some((port, protocol)),
        _ => None,
    }
}

/// Numeric ports must fall in 0-65535; non-numeric prefixes (variables) are
/// accepted since their value is unknown until build time.
fn port_in_range(spec: &str) -> bool {
    let port = spec.split('/').next().unwrap_or(spec);
    match port.parse::<i64>() {
        Ok(value) => (0..=65535).contains(&value),
        Err(_) => true,
    }
}

fn valid_protocol(spec: &str) -> bool {
    match split_protocol(spec) {
        Some((_, protocol)) => {
            let protocol = protocol.to_lowercase();
            protocol == "tcp" || protocol == "udp"
        }
        None => true,
    }
}

fn lowercase_protocol(spec: &str) -> bool {
    match split_protocol(spec) {
        Some((_, protocol)) => protocol == protocol.to_lowercase(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        let dockerfile = lex(source).expect("lexes");
        ExposeRule.check(&dockerfile.instructions[0])
    }

    fn codes(source: &str) -> Vec<RuleCode> {
        check(source).into_iter().map(|v| v.code).collect()
    }

    #[test]
    fn plain_ports_are_clean() {
        assert!(check("EXPOSE 80").is_empty());
        assert!(check("EXPOSE 80/tcp 443/tcp 53/udp").is_empty());
        assert!(check("EXPOSE $PORT").is_empty());
    }

    #[test]
    fn port_mapping_is_rejected() {
        assert_eq!(codes("EXPOSE 80:80"), [RuleCode::ExposeInvalidFormat]);
        assert_eq!(
            codes("EXPOSE 127.0.0.1:80:80"),
            [RuleCode::ExposeInvalidFormat]
        );
    }

    #[test]
    fn port_range_boundaries() {
        assert!(check("EXPOSE 0").is_empty());
        assert!(check("EXPOSE 65535").is_empty());
        assert_eq!(codes("EXPOSE 65536"), [RuleCode::ExposePortOutOfRange]);
        assert_eq!(codes("EXPOSE -1"), [RuleCode::ExposePortOutOfRange]);
    }

    #[test]
    fn protocol_validation() {
        assert_eq!(codes("EXPOSE 80/http"), [RuleCode::ExposeInvalidProtocol]);
        assert_eq!(codes("EXPOSE 80/sctp"), [RuleCode::ExposeInvalidProtocol]);
    }

    #[test]
    fn uppercase_protocol_warns() {
        assert_eq!(codes("EXPOSE 80/TCP"), [RuleCode::ExposeProtoCasing]);
        assert_eq!(
            codes("EXPOSE 80/TCP 443/UdP"),
            [RuleCode::ExposeProtoCasing, RuleCode::ExposeProtoCasing]
        );
    }

    #[test]
    fn first_error_wins_across_arguments() {
        // The host-port mapping on the second argument is reported before
        // any casing warning on the first.
        assert_eq!(codes("EXPOSE 80/TCP 80:80"), [RuleCode::ExposeInvalidFormat]);
    }

    #[test]
    fn missing_argument() {
        assert_eq!(codes("EXPOSE"), [RuleCode::InvalidInstruction]);
    }
}
