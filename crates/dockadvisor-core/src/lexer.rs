//! Dockerfile lexer: splits raw text into logical instructions.
//!
//! A logical instruction is one keyword plus everything that belongs to it
//! after backslash continuations are joined. Comment lines (`#` at the start
//! of a line) and blank lines are dropped, including inside a continuation
//! chain; a blank line inside a chain additionally produces a lexer warning.
//!
//! The lexer keeps the normalized original text of every instruction because
//! several checks must see literal brackets, quoting and keyword casing.

use thiserror::Error;
use tracing::debug;

/// Errors produced while lexing a Dockerfile.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// The input contains no instructions at all (empty file, or only
    /// comments and blank lines).
    #[error("Dockerfile contains no instructions")]
    EmptyDockerfile,
}

/// A warning raised by the lexer itself, independent of any rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexWarning {
    /// Short human-readable summary.
    pub short: String,
    /// Documentation link identifying the warning class.
    pub url: String,
    /// First affected line (1-based).
    pub start_line: usize,
    /// Last affected line (1-based).
    pub end_line: usize,
}

impl LexWarning {
    fn empty_continuation(line: usize) -> Self {
        Self {
            short: "Empty continuation line".to_string(),
            url: "https://docs.docker.com/reference/build-checks/no-empty-continuation/"
                .to_string(),
            start_line: line,
            end_line: line,
        }
    }
}

/// One logical Dockerfile statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    keyword: String,
    flags: Vec<String>,
    args: Vec<String>,
    args_text: String,
    original: String,
    start_line: usize,
    end_line: usize,
    exec_form: bool,
}

impl Instruction {
    /// The instruction keyword exactly as written.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The instruction keyword folded to uppercase, for dispatch.
    #[must_use]
    pub fn keyword_upper(&self) -> String {
        self.keyword.to_uppercase()
    }

    /// Leading `--name[=value]` tokens, in order.
    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Argument tokens after the flags.
    ///
    /// For an exec-form instruction these are the JSON array elements;
    /// otherwise they are whitespace-separated tokens.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The raw argument region after the keyword and flags.
    #[must_use]
    pub fn args_text(&self) -> &str {
        &self.args_text
    }

    /// The normalized original text of the logical line, continuations
    /// joined with single spaces.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The original text with the keyword stripped.
    #[must_use]
    pub fn config_text(&self) -> &str {
        self.original
            .strip_prefix(&self.keyword)
            .unwrap_or(&self.original)
            .trim()
    }

    /// First physical line of the instruction (1-based, inclusive).
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Last physical line of the instruction (1-based, inclusive).
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// True when the argument region is a JSON array of strings.
    #[must_use]
    pub fn is_exec_form(&self) -> bool {
        self.exec_form
    }
}

/// A lexed Dockerfile: the instruction stream plus the raw source for the
/// checks that operate on physical lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Dockerfile {
    /// Logical instructions in file order.
    pub instructions: Vec<Instruction>,
    /// Warnings raised during lexing.
    pub warnings: Vec<LexWarning>,
    /// The raw input text.
    pub source: String,
}

/// Instructions whose argument region may be a JSON array (exec form).
const EXEC_FORM_KEYWORDS: &[&str] = &["RUN", "CMD", "ENTRYPOINT", "SHELL", "VOLUME"];

/// Lexes a Dockerfile into logical instructions.
///
/// # Errors
///
/// Returns [`LexError::EmptyDockerfile`] when the input holds no
/// instructions.
pub fn lex(source: &str) -> Result<Dockerfile, LexError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut instructions = Vec::new();
    let mut warnings = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }

        let start_line = i + 1;
        let mut end_line = i + 1;
        let mut logical = String::new();

        loop {
            if !logical.is_empty() {
                // Inside a continuation chain: blank lines are skipped with a
                // warning, comment lines are skipped silently.
                while i < lines.len() {
                    let t = lines[i].trim();
                    if t.is_empty() {
                        warnings.push(LexWarning::empty_continuation(i + 1));
                        i += 1;
                    } else if t.starts_with('#') {
                        i += 1;
                    } else {
                        break;
                    }
                }
                if i >= lines.len() {
                    break;
                }
            }

            let content = lines[i].trim_end();
            let (fragment, continued) = match content.strip_suffix('\\') {
                Some(rest) => (rest, true),
                None => (content, false),
            };
            let fragment = fragment.trim();
            if !fragment.is_empty() {
                if !logical.is_empty() {
                    logical.push(' ');
                }
                logical.push_str(fragment);
            }
            end_line = i + 1;
            i += 1;
            if !continued || i >= lines.len() {
                break;
            }
        }

        if let Some(instruction) = split_instruction(&logical, start_line, end_line) {
            instructions.push(instruction);
        }
    }

    if instructions.is_empty() {
        return Err(LexError::EmptyDockerfile);
    }

    debug!(instructions = instructions.len(), "lexed dockerfile");
    Ok(Dockerfile {
        instructions,
        warnings,
        source: source.to_string(),
    })
}

/// Splits a joined logical line into keyword, flags and arguments.
fn split_instruction(logical: &str, start_line: usize, end_line: usize) -> Option<Instruction> {
    let (keyword, rest) = split_token(logical);
    if keyword.is_empty() {
        return None;
    }

    let mut flags = Vec::new();
    let mut rest = rest.trim_start();
    loop {
        let (token, after) = split_token(rest);
        if token.starts_with("--") {
            flags.push(token.to_string());
            rest = after.trim_start();
        } else {
            break;
        }
    }
    let args_text = rest.to_string();

    let upper = keyword.to_uppercase();
    let trimmed_args = args_text.trim();
    let (args, exec_form) =
        if EXEC_FORM_KEYWORDS.contains(&upper.as_str()) && trimmed_args.starts_with('[') {
            match serde_json::from_str::<Vec<String>>(trimmed_args) {
                Ok(values) => (values, true),
                Err(_) => (whitespace_tokens(trimmed_args), false),
            }
        } else {
            (whitespace_tokens(&args_text), false)
        };

    Some(Instruction {
        keyword: keyword.to_string(),
        flags,
        args,
        args_text,
        original: logical.to_string(),
        start_line,
        end_line,
        exec_form,
    })
}

fn split_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], &text[idx..]),
        None => (text, ""),
    }
}

fn whitespace_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> Instruction {
        let dockerfile = lex(source).expect("lexes");
        dockerfile.instructions.into_iter().next().expect("instruction")
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(lex(""), Err(LexError::EmptyDockerfile));
    }

    #[test]
    fn comment_only_input_is_an_error() {
        assert_eq!(
            lex("# just a comment\n\n   # another\n"),
            Err(LexError::EmptyDockerfile)
        );
    }

    #[test]
    fn splits_keyword_and_args() {
        let ins = lex_one("FROM alpine:latest AS base\n");
        assert_eq!(ins.keyword(), "FROM");
        assert_eq!(ins.args(), ["alpine:latest", "AS", "base"]);
        assert_eq!(ins.start_line(), 1);
        assert_eq!(ins.end_line(), 1);
    }

    #[test]
    fn keyword_case_is_preserved() {
        let ins = lex_one("from alpine");
        assert_eq!(ins.keyword(), "from");
        assert_eq!(ins.keyword_upper(), "FROM");
    }

    #[test]
    fn leading_double_dash_tokens_are_flags() {
        let ins = lex_one("RUN --mount=type=cache,target=/root --network=none make\n");
        assert_eq!(
            ins.flags(),
            ["--mount=type=cache,target=/root", "--network=none"]
        );
        assert_eq!(ins.args(), ["make"]);
        assert_eq!(ins.args_text(), "make");
    }

    #[test]
    fn double_dash_after_first_arg_is_an_argument() {
        let ins = lex_one("COPY a --chown=x b\n");
        assert!(ins.flags().is_empty());
        assert_eq!(ins.args(), ["a", "--chown=x", "b"]);
    }

    #[test]
    fn continuations_join_into_one_instruction() {
        let dockerfile = lex("FROM alpine\nRUN apk add \\\n    curl \\\n    git\n").unwrap();
        assert_eq!(dockerfile.instructions.len(), 2);
        let run = &dockerfile.instructions[1];
        assert_eq!(run.original(), "RUN apk add curl git");
        assert_eq!(run.start_line(), 2);
        assert_eq!(run.end_line(), 4);
    }

    #[test]
    fn comment_inside_continuation_is_dropped() {
        let ins = lex_one("RUN apk add \\\n    # tools\n    curl\n");
        assert_eq!(ins.original(), "RUN apk add curl");
        assert_eq!(ins.end_line(), 3);
    }

    #[test]
    fn blank_line_inside_continuation_warns_and_continues() {
        let dockerfile = lex("RUN apk add \\\n\n    curl\n").unwrap();
        assert_eq!(dockerfile.instructions.len(), 1);
        assert_eq!(dockerfile.instructions[0].original(), "RUN apk add curl");
        assert_eq!(dockerfile.warnings.len(), 1);
        assert!(dockerfile.warnings[0].url.contains("no-empty-continuation"));
        assert_eq!(dockerfile.warnings[0].start_line, 2);
    }

    #[test]
    fn continuation_at_end_of_file_terminates() {
        let ins = lex_one("RUN echo hi \\\n");
        assert_eq!(ins.original(), "RUN echo hi");
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let ins = lex_one("RUN echo hi \\\r\n  there\r\n");
        assert_eq!(ins.original(), "RUN echo hi there");
    }

    #[test]
    fn exec_form_args_are_json_elements() {
        let ins = lex_one(r#"CMD ["nginx", "-g", "daemon off;"]"#);
        assert!(ins.is_exec_form());
        assert_eq!(ins.args(), ["nginx", "-g", "daemon off;"]);
        assert_eq!(ins.config_text(), r#"["nginx", "-g", "daemon off;"]"#);
    }

    #[test]
    fn malformed_exec_form_falls_back_to_tokens() {
        let ins = lex_one("RUN ['echo', 'hi']");
        assert!(!ins.is_exec_form());
        assert_eq!(ins.args_text(), "['echo', 'hi']");
    }

    #[test]
    fn exec_form_detection_is_limited_to_exec_keywords() {
        let ins = lex_one(r#"EXPOSE ["80"]"#);
        assert!(!ins.is_exec_form());
    }

    #[test]
    fn empty_exec_array_yields_no_args() {
        let ins = lex_one("CMD []");
        assert!(ins.is_exec_form());
        assert!(ins.args().is_empty());
        assert_eq!(ins.config_text(), "[]");
    }

    #[test]
    fn config_text_strips_keyword_only() {
        let ins = lex_one("ENV PATH /usr/local/bin");
        assert_eq!(ins.config_text(), "PATH /usr/local/bin");
    }

    #[test]
    fn interior_comments_do_not_break_line_numbers() {
        let dockerfile = lex("# header\nFROM alpine\n# explain\nRUN echo hi\n").unwrap();
        assert_eq!(dockerfile.instructions[0].start_line(), 2);
        assert_eq!(dockerfile.instructions[1].start_line(), 4);
    }
}
