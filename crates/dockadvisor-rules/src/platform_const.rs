//! Constant `--platform` tolerance across multi-stage builds.

use std::collections::HashSet;

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Violation};

use crate::from::from_components;

/// Flags FROM instructions that pin a constant platform.
///
/// A constant platform is tolerated when the stage it creates is referenced
/// by another FROM, which covers the multi-arch idiom:
///
/// ```text
/// FROM --platform=linux/amd64 alpine AS build_amd64
/// FROM --platform=linux/arm64 alpine AS build_arm64
/// FROM build_${TARGETARCH} AS build
/// ```
///
/// A reference counts when the other FROM's image equals the stage name, or
/// starts with the stage's prefix (the part before the first `_` or `-`).
pub struct ConstantPlatforms;

impl DockerfileRule for ConstantPlatforms {
    fn name(&self) -> &'static str {
        "from-platform-flag-const-disallowed"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let froms: Vec<_> = dockerfile
            .instructions
            .iter()
            .filter(|instruction| instruction.keyword_upper() == "FROM")
            .collect();

        let stage_names: HashSet<String> = froms
            .iter()
            .filter_map(|from| {
                let stage = from_components(from).stage;
                (!stage.is_empty()).then(|| stage.to_lowercase())
            })
            .collect();

        let mut referenced: HashSet<String> = HashSet::new();
        for from in &froms {
            let image = from_components(from).image.to_lowercase();
            if image.is_empty() {
                continue;
            }
            if stage_names.contains(&image) {
                referenced.insert(image);
                continue;
            }
            for stage in &stage_names {
                if image.starts_with(stage_prefix(stage)) {
                    referenced.insert(stage.clone());
                }
            }
        }

        let mut rules = Vec::new();
        for from in &froms {
            let components = from_components(from);
            let platform = components.platform.trim();
            if platform.is_empty() || platform.starts_with('$') {
                continue;
            }
            let stage = components.stage.to_lowercase();
            if !stage.is_empty() && referenced.contains(&stage) {
                continue;
            }
            rules.push(Violation::warning(
                from,
                RuleCode::FromPlatformFlagConstDisallowed,
                format!(
                    "FROM --platform should not use a constant value '{}'. Use a variable \
                     like $BUILDPLATFORM or $TARGETPLATFORM, or specify --platform at build \
                     time instead.",
                    components.platform
                ),
                "https://docs.docker.com/reference/build-checks/from-platform-flag-const-disallowed/",
            ));
        }
        rules
    }
}

/// The stage name up to the first `_` or `-`, or the whole name.
fn stage_prefix(stage: &str) -> &str {
    match stage.find(['_', '-']) {
        Some(idx) => &stage[..idx],
        None => stage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        ConstantPlatforms.check(&lex(source).expect("lexes"))
    }

    #[test]
    fn variable_platform_is_clean() {
        assert!(check("FROM --platform=$BUILDPLATFORM alpine\n").is_empty());
        assert!(check("FROM --platform=${TARGETPLATFORM} alpine\n").is_empty());
    }

    #[test]
    fn standalone_constant_platform_warns() {
        let rules = check("FROM --platform=linux/amd64 alpine\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code, RuleCode::FromPlatformFlagConstDisallowed);
        assert!(rules[0].description.contains("linux/amd64"));
    }

    #[test]
    fn constant_platform_in_unreferenced_stage_warns() {
        let rules = check("FROM --platform=linux/amd64 alpine AS build\nFROM alpine\n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn exact_stage_reference_tolerates_constant() {
        let source = "FROM --platform=linux/amd64 alpine AS build\nFROM build\n";
        assert!(check(source).is_empty());
    }

    #[test]
    fn prefix_reference_tolerates_multi_arch_idiom() {
        let source = "\
FROM --platform=linux/amd64 alpine AS build_amd64
FROM --platform=linux/arm64 alpine AS build_arm64
FROM build_${TARGETARCH} AS build
";
        assert!(check(source).is_empty());
    }

    #[test]
    fn stage_reference_is_case_insensitive() {
        let source = "FROM --platform=linux/amd64 alpine AS Build\nFROM BUILD\n";
        assert!(check(source).is_empty());
    }
}
