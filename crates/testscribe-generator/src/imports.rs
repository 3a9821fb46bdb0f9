//! Import statement injection
//!
//! Presence is a textual question: an import is present when some `import`
//! statement of the source's header, whitespace aside, equals it. Statements
//! are found by position in the text, so sources written on a single line
//! work the same as one-statement-per-line ones. Nothing is deduplicated
//! semantically and no state survives between calls, so asking twice about
//! the same absent import appends it twice.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;
use testscribe_model::{ClassMeta, TestConvention};

static RE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(package|import)\s+((?:static\s+)?[\w$]+(?:\s*\.\s*(?:[\w$]+|\*))*)\s*;")
        .unwrap()
});

pub const ASSERT_IMPORT: &str = "import static org.junit.Assert.*;";
pub const TEST_ANNOTATION_IMPORT: &str = "import org.junit.Test;";
pub const TEST_CASE_IMPORT: &str = "import junit.framework.TestCase;";

/// One `package` or `import` statement of a source header
#[derive(Debug, Clone, PartialEq, Eq)]
struct Statement {
    is_import: bool,
    /// Canonical text, e.g. `import static org.junit.Assert.*;`
    text: String,
    start: usize,
    end: usize,
}

/// `package` and `import` statements ahead of the first opening brace
fn statements(source: &str) -> Vec<Statement> {
    let header_end = source.find('{').unwrap_or(source.len());
    RE_STATEMENT
        .captures_iter(&source[..header_end])
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Statement {
                is_import: &caps[1] == "import",
                text: canonical_statement(&caps[1], &caps[2]),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

fn canonical_statement(keyword: &str, target: &str) -> String {
    let target = target
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" .", ".")
        .replace(". ", ".");
    format!("{keyword} {target};")
}

/// Import lines a test source of `convention` needs
pub fn convention_imports(convention: TestConvention) -> &'static [&'static str] {
    match convention {
        TestConvention::Modern => &[ASSERT_IMPORT, TEST_ANNOTATION_IMPORT],
        TestConvention::Legacy => &[TEST_CASE_IMPORT],
    }
}

/// Line separator used by `text`, or `fallback` when it has none
pub fn detect_line_separator<'a>(text: &str, fallback: &'a str) -> &'a str {
    if text.contains("\r\n") {
        "\r\n"
    } else if text.contains('\n') {
        "\n"
    } else {
        fallback
    }
}

/// Whether `source` already has `import_line`
///
/// Import statements are compared statement by statement; any other line
/// must appear as a trimmed line of its own.
pub fn contains_import(source: &str, import_line: &str) -> bool {
    let wanted = import_line.trim();
    match RE_STATEMENT.captures(wanted) {
        Some(caps) if caps.get(0).is_some_and(|m| m.as_str() == wanted) => {
            let wanted = canonical_statement(&caps[1], &caps[2]);
            statements(source).iter().any(|s| s.text == wanted)
        }
        _ => source.lines().any(|l| l.trim() == wanted),
    }
}

/// Push `import_line` and `nl` onto `buf` unless `source` already has it.
///
/// Only `source` is consulted, never `buf`.
pub fn append_import_if_absent(buf: &mut String, source: &str, import_line: &str, nl: &str) {
    if contains_import(source, import_line) {
        return;
    }
    buf.push_str(import_line);
    buf.push_str(nl);
}

/// Import lines missing from `source`: the target's own imports in source
/// order, then those of `convention`
pub fn required_imports(
    source: &str,
    target: &ClassMeta,
    convention: TestConvention,
    nl: &str,
) -> String {
    let mut buf = String::new();
    for import in &target.imported_list {
        append_import_if_absent(&mut buf, source, &format!("import {import};"), nl);
    }
    for import in convention_imports(convention) {
        append_import_if_absent(&mut buf, source, import, nl);
    }
    buf
}

/// Inject everything [`required_imports`] reports into `source`
pub fn add_required_imports(source: &str, target: &ClassMeta, convention: TestConvention) -> String {
    let nl = detect_line_separator(source, "\n");
    let block = required_imports(source, target, convention, nl);
    insert_import_block(source, &block, nl)
}

/// Insert a block of complete import lines after the last import statement.
///
/// Without imports the block goes after the package statement, preceded by
/// a blank line; without a package statement it goes at the top, followed by
/// one. A statement sharing its line with other code gets a line break
/// before the block.
pub fn insert_import_block(source: &str, block: &str, nl: &str) -> String {
    if block.is_empty() {
        return source.to_string();
    }
    debug!("Injecting imports: {:?}", block.trim_end());

    let found = statements(source);
    let last_import_end = found.iter().rev().find(|s| s.is_import).map(|s| s.end);
    let package_end = found.iter().find(|s| !s.is_import).map(|s| s.end);

    let mut result = String::with_capacity(source.len() + block.len() + nl.len() * 2);
    match (last_import_end, package_end) {
        (Some(end), _) => {
            let end = through_line_end(source, end);
            result.push_str(&source[..end]);
            if !source[..end].ends_with('\n') {
                result.push_str(nl);
            }
            result.push_str(block);
            result.push_str(&source[end..]);
        }
        (None, Some(end)) => {
            let end = through_line_end(source, end);
            result.push_str(&source[..end]);
            if !source[..end].ends_with('\n') {
                result.push_str(nl);
            }
            result.push_str(nl);
            result.push_str(block);
            result.push_str(&source[end..]);
        }
        (None, None) => {
            result.push_str(block);
            if !source.starts_with(['\r', '\n']) {
                result.push_str(nl);
            }
            result.push_str(source);
        }
    }
    result
}

/// Offset past the line break following `offset`, if only blanks sit between
fn through_line_end(source: &str, offset: usize) -> usize {
    let rest = &source[offset..];
    let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let after = &rest[blanks..];
    if after.starts_with("\r\n") {
        offset + blanks + 2
    } else if after.starts_with('\n') {
        offset + blanks + 1
    } else {
        offset
    }
}

/// Drop `import_line` from `source`.
///
/// An import on a line of its own goes with its line, see [`remove_line`];
/// one sharing a line with other code is cut out along with the blanks after
/// it.
pub fn remove_import(source: &str, import_line: &str) -> String {
    let mut text = remove_line(source, import_line);
    let Some(caps) = RE_STATEMENT.captures(import_line.trim()) else {
        return text;
    };
    let wanted = canonical_statement(&caps[1], &caps[2]);
    while let Some(found) = statements(&text).into_iter().find(|s| s.text == wanted) {
        let rest = &text[found.end..];
        let end = found.end + rest.len() - rest.trim_start_matches([' ', '\t']).len();
        text.replace_range(found.start..end, "");
    }
    text
}

/// Drop every line equal (after trimming) to `line`, newline included.
///
/// A line that sat between two blank lines takes one of them along.
pub fn remove_line(source: &str, line: &str) -> String {
    let line = line.trim();
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut skip_blank = false;
    for (i, current) in lines.iter().copied().enumerate() {
        if skip_blank {
            skip_blank = false;
            if current.trim().is_empty() {
                continue;
            }
        }
        if current.trim() != line {
            kept.push(current);
            continue;
        }
        let after_blank = kept.last().is_some_and(|prev| prev.trim().is_empty());
        let before_blank = lines.get(i + 1).is_some_and(|next| next.trim().is_empty());
        skip_blank = after_blank && before_blank;
    }
    kept.concat()
}

/// Whether `name` appears as a whole word outside import statements
pub fn is_referenced(source: &str, name: &str) -> bool {
    let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(name))) else {
        return false;
    };
    let mut rest = String::with_capacity(source.len());
    let mut offset = 0;
    for statement in statements(source).iter().filter(|s| s.is_import) {
        rest.push_str(&source[offset..statement.start]);
        offset = statement.end;
    }
    rest.push_str(&source[offset..]);
    pattern.is_match(&rest)
}
