//! Repeated CMD/ENTRYPOINT/HEALTHCHECK detection per stage.

use std::collections::HashSet;

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Violation};

/// Flags second and later CMD, ENTRYPOINT or HEALTHCHECK instructions within
/// a stage. Docker silently keeps only the last occurrence, so earlier ones
/// are dead weight; the first occurrence is treated as the intended one and
/// every repeat is reported.
pub struct RepeatedInstructions;

const RESTRICTED: &[&str] = &["CMD", "ENTRYPOINT", "HEALTHCHECK"];

impl DockerfileRule for RepeatedInstructions {
    fn name(&self) -> &'static str {
        "multiple-instructions-disallowed"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let mut rules = Vec::new();
        let mut in_stage = false;
        let mut seen: HashSet<String> = HashSet::new();

        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword_upper();
            if keyword == "FROM" {
                seen.clear();
                in_stage = true;
                continue;
            }
            if !in_stage || !RESTRICTED.contains(&keyword.as_str()) {
                continue;
            }
            if !seen.insert(keyword.clone()) {
                rules.push(Violation::error(
                    instruction,
                    RuleCode::MultipleInstructionsDisallowed,
                    format!(
                        "Multiple {keyword} instructions should not be used in the same \
                         stage; only the last one takes effect"
                    ),
                    "https://docs.docker.com/reference/build-checks/multiple-instructions-disallowed/",
                ));
            }
        }
        rules
    }
}
