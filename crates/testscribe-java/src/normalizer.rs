//! Source normalization
//!
//! Pattern matching downstream assumes the text has no comments, no string
//! contents and no annotations. Literal quotes are kept so expressions stay
//! recognizable; line structure is kept so nothing is accidentally joined.

use regex::Regex;
use std::sync::LazyLock;

static RE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\s*[\w$.]+(?:\s*\([^()]*\))?").unwrap());

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
    CharLiteral,
    TextBlock,
}

const TEXT_BLOCK_QUOTES: &str = "\"\"\"";

/// Strip comments, literal contents, annotations and trailing whitespace.
///
/// Line breaks become `\n` and tabs become spaces. Normalizing twice yields
/// the same text as normalizing once.
pub fn normalize(source: &str) -> String {
    let unified = source.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = strip_comments_and_literals(&unified);
    let without_annotations = RE_ANNOTATION.replace_all(&stripped, " ");

    without_annotations
        .split('\n')
        .map(|line| line.replace('\t', " ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_comments_and_literals(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, next)| next);
        match state {
            State::Code => match c {
                '/' if next == Some('/') => {
                    chars.next();
                    out.push(' ');
                    state = State::LineComment;
                }
                '/' if next == Some('*') => {
                    chars.next();
                    out.push(' ');
                    state = State::BlockComment;
                }
                '"' if source[i..].starts_with(TEXT_BLOCK_QUOTES) => {
                    chars.nth(1);
                    out.push_str(TEXT_BLOCK_QUOTES);
                    state = State::TextBlock;
                }
                '"' => {
                    out.push('"');
                    state = State::StringLiteral;
                }
                '\'' => {
                    out.push('\'');
                    state = State::CharLiteral;
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && next == Some('/') {
                    chars.next();
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                }
            }
            State::TextBlock => match c {
                '\\' => {
                    // an escaped line break still ends a line
                    if chars.next().is_some_and(|(_, escaped)| escaped == '\n') {
                        out.push('\n');
                    }
                }
                '\n' => out.push('\n'),
                '"' if source[i..].starts_with(TEXT_BLOCK_QUOTES) => {
                    chars.nth(1);
                    out.push_str(TEXT_BLOCK_QUOTES);
                    state = State::Code;
                }
                _ => {}
            },
            State::StringLiteral | State::CharLiteral => {
                let quote = if state == State::StringLiteral { '"' } else { '\'' };
                match c {
                    '\\' => {
                        chars.next();
                    }
                    '\n' => {
                        // unterminated literal
                        out.push('\n');
                        state = State::Code;
                    }
                    _ if c == quote => {
                        out.push(quote);
                        state = State::Code;
                    }
                    _ => {}
                }
            }
        }
    }

    out
}
