//! Validator for `FROM [--platform=<p>] <image>[:tag|@digest] [AS <name>]`.

use once_cell::sync::Lazy;
use regex::Regex;

use dockadvisor_core::{Instruction, InstructionRule, RuleCode, Violation};

use crate::util::invalid_instruction;

const URL: &str = "https://docs.docker.com/reference/dockerfile/#from";

static IMAGE_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    // ${VAR}, ${VAR:-default} and $VAR are permitted inside image references;
    // ${VAR:+...} and ${VAR:?...} are not.
    Regex::new(r"\$\{[A-Za-z_][A-Za-z0-9_]*(?::-[^}]*)?\}|\$[A-Za-z_][A-Za-z0-9_]*")
        .expect("image variable pattern")
});

static INVALID_IMAGE_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9:@./_-]").expect("image charset pattern"));

static DIGEST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+:[a-f0-9]+$").expect("digest pattern"));

static STAGE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").expect("stage name pattern"));

const VALID_OS: &[&str] = &["linux", "windows", "darwin", "freebsd"];
const VALID_ARCH: &[&str] = &["amd64", "arm64", "arm", "386", "ppc64le", "s390x", "riscv64"];

/// The three components a FROM instruction can carry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FromComponents {
    /// Image reference (may contain variables).
    pub image: String,
    /// Stage name after `AS`, or empty.
    pub stage: String,
    /// Value of the `--platform` flag, or empty.
    pub platform: String,
}

/// Extracts image reference, stage name and platform flag from a FROM
/// instruction. Shared with the cross-instruction passes.
pub(crate) fn from_components(instruction: &Instruction) -> FromComponents {
    let platform = instruction
        .flags()
        .iter()
        .find_map(|flag| flag.strip_prefix("--platform="))
        .unwrap_or_default()
        .to_string();

    let mut args = instruction.args().iter();
    let image = args.next().cloned().unwrap_or_default();
    let stage = match (args.next(), args.next()) {
        (Some(keyword), Some(name)) if keyword.eq_ignore_ascii_case("AS") => name.clone(),
        _ => String::new(),
    };

    FromComponents {
        image,
        stage,
        platform,
    }
}

/// Validates FROM instructions.
pub struct FromRule;

impl InstructionRule for FromRule {
    fn keyword(&self) -> &'static str {
        "FROM"
    }

    fn check(&self, instruction: &Instruction) -> Vec<Violation> {
        if instruction.args().is_empty() {
            return vec![invalid_instruction(
                instruction,
                "FROM requires at least one argument",
            )];
        }

        let FromComponents {
            image,
            stage,
            platform,
        } = from_components(instruction);

        if image.trim().is_empty() {
            return vec![Violation::error(
                instruction,
                RuleCode::FromMissingImage,
                "FROM instruction must specify an image reference",
                URL,
            )];
        }

        if !valid_image_reference(&image) {
            return vec![Violation::error(
                instruction,
                RuleCode::FromInvalidImageReference,
                format!("FROM instruction has invalid image reference format: '{image}'"),
                URL,
            )];
        }

        if !platform.is_empty() && !valid_platform(&platform) {
            return vec![Violation::error(
                instruction,
                RuleCode::FromInvalidPlatform,
                format!("FROM instruction has invalid --platform flag format: '{platform}'"),
                URL,
            )];
        }

        if !stage.is_empty() && !STAGE_NAME_RE.is_match(&stage) {
            return vec![Violation::error(
                instruction,
                RuleCode::FromInvalidStageName,
                format!(
                    "FROM instruction AS stage name is invalid: '{stage}'. Stage names must \
                     start with a letter or underscore and contain only alphanumeric \
                     characters, underscores, hyphens, and dots."
                ),
                URL,
            )];
        }

        if !stage.is_empty() && is_reserved_stage_name(&stage) {
            return vec![Violation::error(
                instruction,
                RuleCode::ReservedStageName,
                format!("'{stage}' is reserved and should not be used as a stage name"),
                "https://docs.docker.com/reference/build-checks/reserved-stage-name/",
            )];
        }

        let mut rules = Vec::new();

        if platform.trim() == "$TARGETPLATFORM" {
            rules.push(Violation::warning(
                instruction,
                RuleCode::RedundantTargetPlatform,
                "Setting platform to predefined $TARGETPLATFORM in FROM is redundant as this \
                 is the default behavior",
                "https://docs.docker.com/reference/build-checks/redundant-target-platform/",
            ));
        }

        if !stage.is_empty() && stage != stage.to_lowercase() {
            rules.push(Violation::warning(
                instruction,
                RuleCode::StageNameCasing,
                format!("Stage name '{stage}' should be lowercase"),
                "https://docs.docker.com/reference/build-checks/stage-name-casing/",
            ));
        }

        if !consistent_from_as_casing(instruction.keyword(), instruction.original()) {
            rules.push(Violation::warning(
                instruction,
                RuleCode::FromAsCasing,
                "FROM instruction with AS keyword uses inconsistent casing. Ensure that both \
                 FROM and AS keywords use the same casing style (either both uppercase or \
                 both lowercase) for better readability.",
                "https://docs.docker.com/reference/build-checks/from-as-casing/",
            ));
        }

        rules
    }
}

/// Validates the image reference format.
///
/// References containing `$` are accepted as long as at least one
/// well-formed variable occurs. Plain references are restricted to the
/// Docker name charset, at most one `@`, and a digest shape after `@`.
fn valid_image_reference(image: &str) -> bool {
    let image = image.trim();
    if image.is_empty() {
        return false;
    }

    if image.contains('$') {
        return IMAGE_VAR_RE.is_match(image);
    }

    if INVALID_IMAGE_CHAR_RE.is_match(image) {
        return false;
    }

    let at_count = image.matches('@').count();
    if at_count > 1 {
        return false;
    }
    if let Some((_, digest)) = image.split_once('@') {
        if !digest.starts_with("sha256:")
            && !digest.starts_with("sha512:")
            && !DIGEST_RE.is_match(digest)
        {
            return false;
        }
    }

    true
}

/// Validates `os[/arch[/variant]]`. Variables are accepted as-is.
fn valid_platform(platform: &str) -> bool {
    let platform = platform.trim();
    if platform.is_empty() {
        return false;
    }
    if platform.starts_with('$') {
        return true;
    }

    let parts: Vec<&str> = platform.split('/').collect();
    if parts.len() > 3 {
        return false;
    }
    if !VALID_OS.contains(&parts[0]) {
        return false;
    }
    if parts.len() >= 2 && !VALID_ARCH.contains(&parts[1]) {
        return false;
    }
    true
}

fn is_reserved_stage_name(stage: &str) -> bool {
    let lower = stage.trim().to_lowercase();
    lower == "scratch" || lower == "context"
}

/// Checks that FROM and AS agree on casing when both are present.
fn consistent_from_as_casing(keyword: &str, original: &str) -> bool {
    let parts: Vec<&str> = original.split_whitespace().collect();
    // FROM <image> AS <name> needs at least four tokens.
    if parts.len() < 4 {
        return true;
    }
    let Some(as_keyword) = parts.iter().find(|part| part.eq_ignore_ascii_case("AS")) else {
        return true;
    };

    let from_is_upper = keyword == keyword.to_uppercase();
    let as_is_upper = *as_keyword == "AS";
    from_is_upper == as_is_upper
}
