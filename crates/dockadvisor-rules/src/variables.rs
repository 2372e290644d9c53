//! Variable reference extraction and build-argument bookkeeping.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use dockadvisor_core::Instruction;

static BRACED_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("braced variable pattern"));

static BARE_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("bare variable pattern"));

/// Build arguments Docker makes available automatically in every scope.
///
/// The proxy names are recognized in both upper and lower case.
const PREDEFINED_BUILD_ARGS: &[&str] = &[
    "TARGETPLATFORM",
    "TARGETOS",
    "TARGETARCH",
    "TARGETVARIANT",
    "BUILDPLATFORM",
    "BUILDOS",
    "BUILDARCH",
    "BUILDVARIANT",
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "FTP_PROXY",
    "ftp_proxy",
    "NO_PROXY",
    "no_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// Returns true when `name` is one of Docker's predefined build arguments.
pub(crate) fn is_predefined_arg(name: &str) -> bool {
    PREDEFINED_BUILD_ARGS.contains(&name)
}

/// Extracts variable references from a string, matching both `${NAME}` and
/// `$NAME`, deduplicated in first-seen order.
///
/// Parameter expansions such as `${NAME:-default}` deliberately do not
/// register as references: an expansion with a fallback never leaves the
/// reference dangling.
pub(crate) fn variable_references(text: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut seen = HashSet::new();
    for caps in BRACED_VAR_RE.captures_iter(text) {
        let name = &caps[1];
        if seen.insert(name.to_string()) {
            refs.push(name.to_string());
        }
    }
    for caps in BARE_VAR_RE.captures_iter(text) {
        let name = &caps[1];
        if seen.insert(name.to_string()) {
            refs.push(name.to_string());
        }
    }
    refs
}

/// Extracts the declared names from an ARG instruction (the part of each
/// token before `=`, or the bare token).
pub(crate) fn arg_names(instruction: &Instruction) -> Vec<String> {
    instruction
        .args()
        .iter()
        .map(|token| match token.split_once('=') {
            Some((name, _)) => name.to_string(),
            None => token.clone(),
        })
        .collect()
}

/// Extracts ARG names paired with whether a default value was supplied.
pub(crate) fn arg_names_with_defaults(instruction: &Instruction) -> Vec<(String, bool)> {
    instruction
        .args()
        .iter()
        .map(|token| match token.split_once('=') {
            Some((name, _)) => (name.to_string(), true),
            None => (token.clone(), false),
        })
        .collect()
}

/// Extracts the declared names from an ENV instruction.
///
/// Handles both `KEY=value` tokens and the legacy `KEY value` form, where the
/// token after a bare key is its value and is skipped.
pub(crate) fn env_names(instruction: &Instruction) -> Vec<String> {
    let mut names = Vec::new();
    let args = instruction.args();
    let mut i = 0;
    while i < args.len() {
        match args[i].split_once('=') {
            Some((name, _)) => {
                names.push(name.to_string());
                i += 1;
            }
            None => {
                names.push(args[i].clone());
                i += 2; // skip the legacy-form value
            }
        }
    }
    names
}
