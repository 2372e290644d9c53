//! Shell-form CMD/ENTRYPOINT recommendation, suppressed by SHELL.

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Violation};

/// Recommends exec form for CMD and ENTRYPOINT.
///
/// Shell form runs the process as a child of `/bin/sh`, which breaks OS
/// signal delivery. An explicit SHELL instruction anywhere in the file marks
/// shell form as a deliberate choice and suppresses the recommendation.
pub struct JsonArgsAdvice;

impl DockerfileRule for JsonArgsAdvice {
    fn name(&self) -> &'static str {
        "json-args-recommended"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let has_shell = dockerfile
            .instructions
            .iter()
            .any(|instruction| instruction.keyword_upper() == "SHELL");
        if has_shell {
            return Vec::new();
        }

        let mut rules = Vec::new();
        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword_upper();
            if keyword != "CMD" && keyword != "ENTRYPOINT" {
                continue;
            }
            let config = instruction.config_text();
            if config.is_empty() || config.starts_with('[') {
                continue;
            }
            rules.push(Violation::warning(
                instruction,
                RuleCode::JsonArgsRecommended,
                format!(
                    "JSON arguments recommended for {keyword} to prevent unintended behavior \
                     related to OS signals"
                ),
                "https://docs.docker.com/reference/build-checks/json-args-recommended/",
            ));
        }
        rules
    }
}
