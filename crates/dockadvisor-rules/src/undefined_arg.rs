//! Undefined ARG references in FROM image references.

use std::collections::HashSet;

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Violation};

use crate::from::from_components;
use crate::variables::{arg_names, is_predefined_arg, variable_references};

/// Checks that FROM image references only use declared build arguments.
///
/// Only ARGs before the first FROM (global scope) are visible to FROM;
/// Docker's predefined platform and proxy arguments are always available.
pub struct UndefinedArgsInFrom;

impl DockerfileRule for UndefinedArgsInFrom {
    fn name(&self) -> &'static str {
        "undefined-arg-in-from"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let mut global_args: HashSet<String> = HashSet::new();
        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword_upper();
            if keyword == "FROM" {
                break;
            }
            if keyword == "ARG" {
                global_args.extend(arg_names(instruction));
            }
        }

        let mut rules = Vec::new();
        for instruction in &dockerfile.instructions {
            if instruction.keyword_upper() != "FROM" {
                continue;
            }
            let image = from_components(instruction).image;
            for name in variable_references(&image) {
                if !global_args.contains(&name) && !is_predefined_arg(&name) {
                    rules.push(Violation::error(
                        instruction,
                        RuleCode::UndefinedArgInFrom,
                        format!("FROM argument '{name}' is not declared"),
                        "https://docs.docker.com/reference/build-checks/undefined-arg-in-from/",
                    ));
                }
            }
        }
        rules
    }
}
