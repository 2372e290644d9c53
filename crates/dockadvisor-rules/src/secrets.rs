//! Secret-looking names in ARG and ENV.

use once_cell::sync::Lazy;
use regex::Regex;

use dockadvisor_core::{Dockerfile, DockerfileRule, Instruction, RuleCode, Violation};

// Sensitive tokens matched at underscore boundaries, case-insensitively:
// api_key, DATABASE_PASSWORD, GITHUB_TOKEN, secret_MESSAGE, AUTH.
static DENY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:_|^)(?:apikey|auth|credential|credentials|key|password|pword|passwd|secret|token)(?:_|$)",
    )
    .expect("secret deny pattern")
});

static ALLOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:_|^)(?:public)(?:_|$)").expect("secret allow pattern"));

/// Warns when an ARG or ENV name suggests it carries a secret.
///
/// Values set through ARG or ENV persist in image layers and metadata;
/// secret mounts are the supported alternative.
pub struct SecretNames;

impl DockerfileRule for SecretNames {
    fn name(&self) -> &'static str {
        "secrets-used-in-arg-or-env"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let mut rules = Vec::new();
        for instruction in &dockerfile.instructions {
            let keyword = instruction.keyword_upper();
            if keyword != "ARG" && keyword != "ENV" {
                continue;
            }
            for name in declared_names(instruction) {
                if DENY_RE.is_match(&name) && !ALLOW_RE.is_match(&name) {
                    rules.push(Violation::warning(
                        instruction,
                        RuleCode::SecretsUsedInArgOrEnv,
                        format!(
                            "Sensitive data should not be used in {keyword} instruction: \
                             '{name}'. Consider using secret mounts instead"
                        ),
                        "https://docs.docker.com/reference/build-checks/secrets-used-in-arg-or-env/",
                    ));
                }
            }
        }
        rules
    }
}

/// Every token contributes a name: the key before `=`, or the bare token.
fn declared_names(instruction: &Instruction) -> Vec<String> {
    instruction
        .args()
        .iter()
        .filter_map(|token| match token.split_once('=') {
            Some(("", _)) => None,
            Some((name, _)) => Some(name.to_string()),
            None => Some(token.clone()),
        })
        .collect()
}
