//! Defaultless global ARGs that would break a FROM reference.

use std::collections::HashMap;

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Violation};

use crate::from::from_components;
use crate::variables::{arg_names_with_defaults, variable_references};

const URL: &str =
    "https://docs.docker.com/reference/build-checks/invalid-default-arg-in-from/";

/// Checks that global ARGs used in FROM degrade gracefully when unset.
///
/// A global ARG without a default expands to the empty string unless the
/// build supplies `--build-arg`. That is an error when the variable sits in a
/// position where emptiness yields a syntactically invalid image reference
/// (`node:${VERSION}` becomes `node:`), and always an error inside a
/// `--platform` flag. Positions that stay valid when empty
/// (`base:stable${SUFFIX}`) pass.
pub struct InvalidDefaultArgs;

impl DockerfileRule for InvalidDefaultArgs {
    fn name(&self) -> &'static str {
        "invalid-default-arg-in-from"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        // Global ARG names mapped to whether they carry a default value.
        let mut global_args: HashMap<String, bool> = HashMap::new();
        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword_upper();
            if keyword == "FROM" {
                break;
            }
            if keyword == "ARG" {
                for (name, has_default) in arg_names_with_defaults(instruction) {
                    global_args.insert(name, has_default);
                }
            }
        }

        let mut rules = Vec::new();
        for instruction in &dockerfile.instructions {
            if instruction.keyword_upper() != "FROM" {
                continue;
            }
            let components = from_components(instruction);

            for name in variable_references(&components.image) {
                if global_args.get(&name) == Some(&false)
                    && empty_value_breaks_reference(&components.image, &name)
                {
                    rules.push(Violation::error(
                        instruction,
                        RuleCode::InvalidDefaultArgInFrom,
                        format!(
                            "ARG '{name}' has no default value and is used in FROM \
                             instruction. Provide a default value or use parameter \
                             expansion with fallback: ${{{name}:-default}}"
                        ),
                        URL,
                    ));
                }
            }

            if !components.platform.is_empty() {
                for name in variable_references(&components.platform) {
                    if global_args.get(&name) == Some(&false) {
                        rules.push(Violation::error(
                            instruction,
                            RuleCode::InvalidDefaultArgInFrom,
                            format!(
                                "ARG '{name}' has no default value and is used in FROM \
                                 --platform flag. Provide a default value or use parameter \
                                 expansion with fallback: ${{{name}:-default}}"
                            ),
                            URL,
                        ));
                    }
                }
            }
        }
        rules
    }
}

/// Decides whether substituting the empty string for `name` leaves a
/// syntactically invalid image reference.
///
/// Invalid positions: immediately after `:` or `@`; at the start when
/// followed by `/`, `:` or `@`; immediately after `/` when followed by
/// nothing, `/`, `:` or `@`.
fn empty_value_breaks_reference(image: &str, name: &str) -> bool {
    let patterns = [format!("${{{name}}}"), format!("${name}")];
    for pattern in &patterns {
        let Some(idx) = image.find(pattern.as_str()) else {
            continue;
        };

        let before = idx.checked_sub(1).map(|i| image.as_bytes()[i]);
        let after = image.as_bytes().get(idx + pattern.len()).copied();

        if matches!(before, Some(b':' | b'@')) {
            return true;
        }
        if idx == 0 && matches!(after, Some(b'/' | b':' | b'@')) {
            return true;
        }
        if before == Some(b'/') && matches!(after, None | Some(b'/' | b':' | b'@')) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        InvalidDefaultArgs.check(&lex(source).expect("lexes"))
    }

    #[test]
    fn defaulted_arg_is_clean() {
        assert!(check("ARG TAG=latest\nFROM alpine:${TAG}\n").is_empty());
    }

    #[test]
    fn defaultless_arg_in_tag_position_is_flagged() {
        let rules = check("ARG VERSION\nFROM node:${VERSION}\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code, RuleCode::InvalidDefaultArgInFrom);
        assert!(rules[0].description.contains("'VERSION'"));
    }

    #[test]
    fn defaultless_arg_in_digest_position_is_flagged() {
        let rules = check("ARG DIGEST\nFROM alpine@${DIGEST}\n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn leading_variable_followed_by_separator_is_flagged() {
        assert_eq!(check("ARG REG\nFROM ${REG}/app\n").len(), 1);
        assert_eq!(check("ARG IMG\nFROM ${IMG}:latest\n").len(), 1);
    }

    #[test]
    fn variable_after_slash_is_flagged() {
        assert_eq!(check("ARG APP\nFROM registry.io/${APP}\n").len(), 1);
        assert_eq!(check("ARG NS\nFROM registry.io/${NS}/app\n").len(), 1);
    }

    #[test]
    fn suffix_position_stays_valid_when_empty() {
        assert!(check("ARG VARIANT\nFROM busybox:stable${VARIANT}\n").is_empty());
        assert!(check("ARG PREFIX\nFROM ${PREFIX}busybox\n").is_empty());
    }

    #[test]
    fn platform_flag_always_needs_a_default() {
        let rules = check("ARG PLAT\nFROM --platform=${PLAT} alpine\n");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].description.contains("--platform"));
    }

    #[test]
    fn non_global_args_are_out_of_scope() {
        assert!(check("FROM alpine\nARG TAG\nFROM node:${TAG}\n").is_empty());
    }

    #[test]
    fn undeclared_variables_are_someone_elses_problem() {
        // UndefinedArgsInFrom owns references to never-declared names.
        assert!(check("FROM node:${VERSION}\n").is_empty());
    }

    #[test]
    fn bare_dollar_form_is_also_recognized() {
        let rules = check("ARG VERSION\nFROM node:$VERSION\n");
        assert_eq!(rules.len(), 1);
    }
}
