//! Raw-text scan for empty lines inside backslash continuations.

use dockadvisor_core::{Dockerfile, DockerfileRule, RuleCode, Severity, Violation};

/// Flags empty lines that follow a backslash continuation.
///
/// Operates on the physical lines rather than the instruction stream: the
/// lexer has already swallowed the empty lines by the time instructions
/// exist. Each violation spans from the start of the continuation chain to
/// the offending empty line.
pub struct ContinuationScanner;

impl DockerfileRule for ContinuationScanner {
    fn name(&self) -> &'static str {
        "no-empty-continuation"
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Violation> {
        let mut rules = Vec::new();
        let mut chain_start: Option<usize> = None;

        for (index, line) in dockerfile.source.lines().enumerate() {
            let trimmed = line.trim();
            let continues = trimmed.ends_with('\\');

            match chain_start {
                None => {
                    if continues {
                        chain_start = Some(index);
                    }
                }
                Some(start) => {
                    if trimmed.is_empty() {
                        rules.push(Violation::new(
                            RuleCode::NoEmptyContinuation,
                            Severity::Warning,
                            start + 1,
                            index + 1,
                            "Empty continuation line found. Empty lines following a backslash \
                             continuation are deprecated and will cause errors in future \
                             Docker versions.",
                            "https://docs.docker.com/reference/build-checks/no-empty-continuation/",
                        ));
                    } else if !continues {
                        chain_start = None;
                    }
                }
            }
        }

        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor_core::lex;

    fn check(source: &str) -> Vec<Violation> {
        ContinuationScanner.check(&lex(source).expect("lexes"))
    }

    #[test]
    fn clean_continuation_has_no_findings() {
        assert!(check("RUN apk add \\\n    curl\n").is_empty());
    }

    #[test]
    fn empty_line_after_continuation_warns() {
        let rules = check("RUN apk add \\\n\n    curl\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code, RuleCode::NoEmptyContinuation);
        assert_eq!(rules[0].start_line, 1);
        assert_eq!(rules[0].end_line, 2);
    }

    #[test]
    fn violation_spans_from_instruction_start() {
        let rules = check("RUN apk add \\\n    curl \\\n\n    git\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].start_line, 1);
        assert_eq!(rules[0].end_line, 3);
    }

    #[test]
    fn whitespace_only_line_counts_as_empty() {
        let rules = check("RUN apk add \\\n   \t\n    curl\n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn comment_line_does_not_warn() {
        assert!(check("RUN apk add \\\n    # tools\n    curl\n").is_empty());
    }

    #[test]
    fn each_empty_line_warns_separately() {
        let rules = check("RUN a \\\n\n  b \\\n\n  c\n");
        assert_eq!(rules.len(), 2);
        assert_eq!((rules[0].start_line, rules[0].end_line), (1, 2));
        assert_eq!((rules[1].start_line, rules[1].end_line), (1, 4));
    }

    #[test]
    fn continuation_at_end_of_file_is_silent() {
        assert!(check("RUN echo hi \\\n").is_empty());
    }
}
