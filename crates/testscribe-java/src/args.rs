//! Parameter list extraction

use crate::type_name::{split_top_level, TypeContext, TypeNameConverter};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;
use testscribe_model::{ExtractorConfig, TypeMeta};

static RE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w$]+$").unwrap());
static RE_LEADING_FINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:final\s+)+").unwrap());

/// Parallel name/type lists for one parameter list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedArgs {
    pub names: Vec<String>,
    pub types: Vec<TypeMeta>,
}

impl ExtractedArgs {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn push(&mut self, name: String, ty: TypeMeta) {
        self.names.push(name);
        self.types.push(ty);
    }
}

/// Parses the text between a parameter list's parentheses
///
/// Malformed parameters are dropped rather than reported, so the result is
/// always a well-formed (possibly empty) pair of lists.
pub struct ArgTypeMetaExtractor<'a> {
    converter: TypeNameConverter<'a>,
    context: TypeContext<'a>,
}

impl<'a> ArgTypeMetaExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig, context: TypeContext<'a>) -> Self {
        Self {
            converter: TypeNameConverter::new(config),
            context,
        }
    }

    pub fn extract(&self, args_area: &str) -> ExtractedArgs {
        let mut args = ExtractedArgs::default();
        for param in split_top_level(args_area) {
            match self.extract_one(param) {
                Some((name, ty)) => args.push(name, ty),
                None if !param.is_empty() => trace!("Dropping unparseable parameter: {param:?}"),
                None => {}
            }
        }
        args
    }

    fn extract_one(&self, param: &str) -> Option<(String, TypeMeta)> {
        let param = RE_LEADING_FINAL.replace(param.trim(), "");
        let param = param.trim();

        // C-style `int values[]` or `int values []`
        let (param, extra_dimensions) = strip_trailing_dimensions(param);

        let (type_text, name) = match param.find("...") {
            Some(dots) => (&param[..dots + 3], param[dots + 3..].trim()),
            None => {
                let split = last_top_level_whitespace(param)?;
                (&param[..split], param[split..].trim())
            }
        };

        if !RE_IDENTIFIER.is_match(name) {
            return None;
        }
        let ty = self.converter.parse(type_text, &self.context)?;
        let dimensions = ty.array_dimensions + extra_dimensions;
        Some((name.to_string(), ty.with_array_dimensions(dimensions)))
    }
}

/// `text` without trailing `[]` pairs, and how many were removed
fn strip_trailing_dimensions(text: &str) -> (&str, usize) {
    let mut rest = text.trim_end();
    let mut dimensions = 0;
    while let Some(open) = rest
        .strip_suffix(']')
        .and_then(|r| r.trim_end().strip_suffix('['))
    {
        rest = open.trim_end();
        dimensions += 1;
    }
    (rest, dimensions)
}

/// Byte index of the last whitespace outside angle brackets
fn last_top_level_whitespace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut last = None;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if c.is_whitespace() && depth == 0 => last = Some(i),
            _ => {}
        }
    }
    // `String []` is a type, not a name
    last.filter(|&i| !text[i..].trim_start().starts_with('['))
}
