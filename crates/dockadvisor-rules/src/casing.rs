//! Whole-file keyword casing consistency.

use dockadvisor_core::{Dockerfile, DockerfileRule, Instruction, RuleCode, Violation};

/// Checks that instruction keywords use one casing style across the file.
///
/// When both pure-uppercase and pure-lowercase keywords occur, the majority
/// style wins (ties favor uppercase) and every keyword outside it is flagged.
/// When only one style occurs, mixed-case keywords like `From` are flagged
/// against it.
pub struct InstructionCasing;

impl DockerfileRule for InstructionCasing {
    fn name(&self) -> &'static str {
        "consistent-instruction-casing"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let mut uppercase = 0usize;
        let mut lowercase = 0usize;
        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword();
            if keyword == keyword.to_uppercase() {
                uppercase += 1;
            } else if keyword == keyword.to_lowercase() {
                lowercase += 1;
            }
        }

        if uppercase == 0 || lowercase == 0 {
            // One pure style: only mixed-case keywords are out of line.
            let expected = if lowercase > 0 { "lowercase" } else { "uppercase" };
            return dockerfile
                .instructions
                .iter()
                .filter(|instruction| {
                    let keyword = instruction.keyword();
                    keyword != keyword.to_uppercase() && keyword != keyword.to_lowercase()
                })
                .map(|instruction| casing_violation(instruction, expected))
                .collect();
        }

        let prefer_uppercase = uppercase >= lowercase;
        dockerfile
            .instructions
            .iter()
            .filter(|instruction| {
                let keyword = instruction.keyword();
                if prefer_uppercase {
                    keyword != keyword.to_uppercase()
                } else {
                    keyword != keyword.to_lowercase()
                }
            })
            .map(|instruction| {
                casing_violation(
                    instruction,
                    if prefer_uppercase { "uppercase" } else { "lowercase" },
                )
            })
            .collect()
    }
}

fn casing_violation(instruction: &Instruction, expected: &str) -> Violation {
    Violation::warning(
        instruction,
        RuleCode::ConsistentInstructionCasing,
        format!(
            "Instruction '{}' should be consistently cased as {expected}",
            instruction.keyword()
        ),
        "https://docs.docker.com/reference/build-checks/consistent-instruction-casing/",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        InstructionCasing.check(&lex(source).expect("lexes"))
    }

    #[test]
    fn consistent_uppercase_is_clean() {
        assert!(check("FROM alpine\nRUN echo hi\nCMD echo done\n").is_empty());
    }

    #[test]
    fn consistent_lowercase_is_clean() {
        assert!(check("from alpine\nrun echo hi\n").is_empty());
    }

    #[test]
    fn minority_style_is_flagged() {
        let rules = check("FROM alpine\nRUN echo hi\nrun echo again\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code, RuleCode::ConsistentInstructionCasing);
        assert_eq!(rules[0].start_line, 3);
        assert!(rules[0].description.contains("uppercase"));
    }

    #[test]
    fn tie_prefers_uppercase() {
        let rules = check("FROM alpine\nrun echo hi\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].start_line, 2);
        assert!(rules[0].description.contains("uppercase"));
    }

    #[test]
    fn lowercase_majority_flags_uppercase() {
        let rules = check("from alpine\nrun echo hi\nRUN echo again\n");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].description.contains("lowercase"));
    }

    #[test]
    fn mixed_case_keyword_is_flagged_against_the_pure_style() {
        let rules = check("FROM alpine\nRun echo hi\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].start_line, 2);
        assert!(rules[0].description.contains("'Run'"));
        assert!(rules[0].description.contains("uppercase"));
    }

    #[test]
    fn mixed_case_against_lowercase_file() {
        let rules = check("from alpine\nRun echo hi\n");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].description.contains("lowercase"));
    }
}
