//! Per-stage variable scope tracking.

use std::collections::HashSet;

use dockadvisor_core::{Dockerfile, DockerfileRule, Instruction, RuleCode, Violation};

use crate::from::from_components;
use crate::variables::{arg_names, env_names, is_predefined_arg, variable_references};

/// Checks that every variable reference is in scope.
///
/// Scope rules:
///
/// - each FROM starts a new stage whose scope is the global ARGs plus the
///   predefined build arguments
/// - ARG and ENV declarations inside a stage extend that stage's scope
/// - shell-form RUN/CMD/ENTRYPOINT are skipped (the shell resolves variables
///   at run time); their exec forms are checked
/// - FROM itself is checked in both its image reference and platform flag
/// - instructions before the first FROM are ignored
pub struct UndefinedVariables;

impl DockerfileRule for UndefinedVariables {
    fn name(&self) -> &'static str {
        "undefined-var"
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
        let mut in_stage = false;
        let mut scope: HashSet<String> = HashSet::new();

        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword_upper();
            match keyword.as_str() {
                "FROM" => {
                    scope = global_args.clone();
                    in_stage = true;

                    let components = from_components(instruction);
                    report_unknown(&mut rules, instruction, &scope, &components.image);
                    if !components.platform.is_empty() {
                        report_unknown(&mut rules, instruction, &scope, &components.platform);
                    }
                }
                _ if !in_stage => {}
                "ARG" => {
                    scope.extend(arg_names(instruction));
                    for token in instruction.args() {
                        if let Some((_, default)) = token.split_once('=') {
                            report_unknown(&mut rules, instruction, &scope, default);
                        }
                    }
                }
                "ENV" => {
                    scope.extend(env_names(instruction));
                    let args = instruction.args();
                    let mut i = 0;
                    while i < args.len() {
                        match args[i].split_once('=') {
                            Some((_, value)) => {
                                report_unknown(&mut rules, instruction, &scope, value);
                                i += 1;
                            }
                            None => {
                                // Legacy `KEY value`: the next token is the value.
                                if let Some(value) = args.get(i + 1) {
                                    report_unknown(&mut rules, instruction, &scope, value);
                                }
                                i += 2;
                            }
                        }
                    }
                }
                "RUN" | "CMD" | "ENTRYPOINT" => {
                    if instruction.is_exec_form() {
                        for arg in instruction.args() {
                            report_unknown(&mut rules, instruction, &scope, arg);
                        }
                    }
                }
                _ => {
                    for arg in instruction.args() {
                        report_unknown(&mut rules, instruction, &scope, arg);
                    }
                    for flag in instruction.flags() {
                        report_unknown(&mut rules, instruction, &scope, flag);
                    }
                }
            }
        }
        rules
    }
}

fn report_unknown(
    rules: &mut Vec<Violation>,
    instruction: &Instruction,
    scope: &HashSet<String>,
    text: &str,
) {
    for name in variable_references(text) {
        if !scope.contains(&name) && !is_predefined_arg(&name) {
            rules.push(Violation::error(
                instruction,
                RuleCode::UndefinedVar,
                format!("Usage of undefined variable '${name}'"),
                "https://docs.docker.com/reference/build-checks/undefined-var/",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        UndefinedVariables.check(&lex(source).expect("lexes"))
    }

    #[test]
    fn declared_variables_are_clean() {
        let source = "\
FROM alpine
ARG VERSION=1.0
ENV APP_HOME=/app
WORKDIR ${APP_HOME}
EXPOSE $VERSION
";
        assert!(check(source).is_empty());
    }

    #[test]
    fn unknown_variable_in_workdir_is_flagged() {
        let rules = check("FROM alpine\nWORKDIR $APP_HOME\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code, RuleCode::UndefinedVar);
        assert_eq!(
            rules[0].description,
            "Usage of undefined variable '$APP_HOME'"
        );
        assert_eq!(rules[0].severity, crate::Severity::Error);
    }

    #[test]
    fn shell_form_run_is_skipped() {
        assert!(check("FROM alpine\nRUN echo $UNDEFINED\n").is_empty());
        assert!(check("FROM alpine\nCMD echo $UNDEFINED\n").is_empty());
    }

    #[test]
    fn exec_form_run_is_checked() {
        let rules = check("FROM alpine\nRUN [\"echo\", \"$UNDEFINED\"]\n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn global_args_are_visible_in_every_stage() {
        let source = "\
ARG VERSION
FROM alpine
EXPOSE $VERSION
FROM debian
EXPOSE $VERSION
";
        assert!(check(source).is_empty());
    }

    #[test]
    fn stage_scope_resets_on_from() {
        let source = "\
FROM alpine
ARG LOCAL=1
EXPOSE $LOCAL
FROM debian
EXPOSE $LOCAL
";
        let rules = check(source);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].start_line, 5);
    }

    #[test]
    fn env_declaration_extends_scope() {
        assert!(check("FROM alpine\nENV DIR=/srv\nWORKDIR $DIR\n").is_empty());
    }

    #[test]
    fn from_image_reference_is_checked() {
        let rules = check("FROM alpine:${TAG}\n");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].description.contains("$TAG"));
    }

    #[test]
    fn from_platform_flag_is_checked() {
        let rules = check("FROM --platform=$MYPLATFORM alpine\n");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].description.contains("$MYPLATFORM"));
    }

    #[test]
    fn predefined_platform_args_are_in_scope() {
        assert!(check("FROM --platform=$BUILDPLATFORM alpine\nEXPOSE 80\n").is_empty());
    }

    #[test]
    fn flags_are_checked() {
        let rules = check("FROM alpine\nCOPY --chown=$OWNER a b\n");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].description.contains("$OWNER"));
    }

    #[test]
    fn instructions_before_first_from_are_ignored() {
        assert!(check("ONBUILD RUN echo $X\nFROM alpine\n").is_empty());
    }

    #[test]
    fn env_value_with_unknown_reference_is_flagged() {
        let rules = check("FROM alpine\nENV PATH_EXT=$MISSING/bin\n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn self_referencing_arg_default_is_clean() {
        // The name enters scope before its default value is examined.
        assert!(check("FROM alpine\nARG VERSION=${VERSION}\n").is_empty());
    }
}
