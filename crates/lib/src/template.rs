//! Placeholder parsing and substitution for the config header template.
//!
//! # Placeholder Format
//!
//! `{{KEY}}` where `KEY` starts with an ASCII letter or underscore and
//! continues with letters, digits and underscores. Spaces just inside the
//! braces are ignored, so `{{ KEY }}` is the same placeholder.
//!
//! Every other `{{` is plain C text (`{{0}}`, `{{1, 2}, {3, 4}}`) and is
//! copied through verbatim along with everything else. Every placeholder must
//! resolve; there is no fallback value.
//!
//! # Example
//!
//! ```
//! use fwbuild_lib::template::{parse, Segment};
//!
//! let segments = parse("#define SCH_NAME \"{{NAME}}\"");
//! assert_eq!(segments, vec![
//!     Segment::Literal("#define SCH_NAME \""),
//!     Segment::Placeholder { key: "NAME", line: 1 },
//!     Segment::Literal("\""),
//! ]);
//! ```

use std::borrow::Cow;

use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A segment of parsed template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
  /// Literal text copied to the output unchanged
  Literal(&'a str),

  /// A `{{KEY}}` placeholder, with the 1-based line it starts on
  Placeholder { key: &'a str, line: usize },
}

/// Errors that can occur during substitution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  #[error("unresolved placeholder {key} on line {line}")]
  Unresolved { key: String, line: usize },
}

/// Supplies values for placeholder keys.
pub trait Resolver {
  /// Returns the value for `key`, or `None` if the key is unknown.
  fn resolve(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Split a template into literal and placeholder segments.
///
/// Adjacent literal text is kept in one segment, including any `{{` that does
/// not open a placeholder.
pub fn parse(input: &str) -> Vec<Segment<'_>> {
  let mut segments = Vec::new();
  let mut literal_start = 0;
  let mut cursor = 0;

  while let Some(found) = input[cursor..].find(OPEN) {
    let start = cursor + found;
    let body_start = start + OPEN.len();

    match placeholder_key(&input[body_start..]) {
      Some((key, body_len)) => {
        if start > literal_start {
          segments.push(Segment::Literal(&input[literal_start..start]));
        }
        segments.push(Segment::Placeholder {
          key,
          line: line_at(input, start),
        });
        cursor = body_start + body_len + CLOSE.len();
        literal_start = cursor;
      }
      // Not a placeholder; rescan from the second brace so `{{{KEY}}}` still matches.
      None => cursor = start + 1,
    }
  }

  if literal_start < input.len() {
    segments.push(Segment::Literal(&input[literal_start..]));
  }

  segments
}

/// Substitute all placeholders in a template using the provided resolver.
///
/// # Errors
///
/// Returns an error if any placeholder cannot be resolved.
pub fn substitute(input: &str, resolver: &impl Resolver) -> Result<String, TemplateError> {
  let mut result = String::with_capacity(input.len());

  for segment in parse(input) {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder { key, line } => {
        let value = resolver.resolve(key).ok_or_else(|| TemplateError::Unresolved {
          key: key.to_string(),
          line,
        })?;
        result.push_str(&value);
      }
    }
  }

  Ok(result)
}

/// Key and body length when `body` starts with `KEY}}`.
fn placeholder_key(body: &str) -> Option<(&str, usize)> {
  let end = body.find(CLOSE)?;
  let key = body[..end].trim_matches(' ');
  is_key(key).then_some((key, end))
}

fn is_key(candidate: &str) -> bool {
  let mut chars = candidate.chars();
  matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn line_at(input: &str, byte_offset: usize) -> usize {
  input[..byte_offset].matches('\n').count() + 1
}
