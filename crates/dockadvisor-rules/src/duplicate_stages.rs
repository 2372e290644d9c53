//! Duplicate stage name detection across FROM instructions.

use std::collections::HashMap;

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Violation};

use crate::from::from_components;

/// Flags every FROM whose stage name is declared more than once.
///
/// Stage names compare case-insensitively, the way Docker resolves them; the
/// message keeps the name as written.
pub struct DuplicateStages;

impl DockerfileRule for DuplicateStages {
    fn name(&self) -> &'static str {
        "duplicate-stage-names"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let mut occurrences: HashMap<String, usize> = HashMap::new();
        for instruction in &dockerfile.instructions {
            if instruction.keyword_upper() != "FROM" {
                continue;
            }
            let stage = from_components(instruction).stage;
            if !stage.is_empty() {
                *occurrences.entry(stage.to_lowercase()).or_default() += 1;
            }
        }

        let mut rules = Vec::new();
        for instruction in &dockerfile.instructions {
            if instruction.keyword_upper() != "FROM" {
                continue;
            }
            let stage = from_components(instruction).stage;
            if stage.is_empty() {
                continue;
            }
            if occurrences.get(&stage.to_lowercase()).copied().unwrap_or(0) > 1 {
                rules.push(Violation::error(
                    instruction,
                    RuleCode::DuplicateStageName,
                    format!("Duplicate stage name '{stage}', stage names should be unique"),
                    "https://docs.docker.com/reference/build-checks/duplicate-stage-name/",
                ));
            }
        }
        rules
    }
}
