//! Canonical and display forms of type signatures.

use std::sync::LazyLock;

use regex::Regex;

use super::scanner;
use crate::config::{DetailLevel, TypeFormatting};

/// Placed where truncated content used to be.
pub const ELLIPSIS: &str = "...";

const OBJECT_OPEN: &str = "object({";
const GENERIC_OBJECT: &str = "object({...})";
const GENERIC_TUPLE: &str = "tuple([...])";
const COLLECTION_WRAPPERS: &[&str] = &["list(", "set(", "map("];

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalize `raw` and, when it is a long compound type, truncate it for
/// display while keeping its outer shape.
///
/// Never fails: input that cannot be matched up degrades to the generic
/// placeholder of its wrapper family. Applying it twice gives the same result
/// as applying it once.
pub fn normalize(raw: &str, formatting: &TypeFormatting) -> String {
    let canonical = canonicalize(raw);
    if formatting.detail_level == DetailLevel::Detailed
        || canonical.len() <= formatting.max_type_length
    {
        return canonical;
    }
    truncate(&canonical, formatting).unwrap_or(canonical)
}

/// Strip enclosing quotes and stray trailing commas, and collapse every
/// whitespace run to a single space.
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c == '"' || c == ',' || c.is_whitespace());
    WHITESPACE_REGEX.replace_all(trimmed, " ").into_owned()
}

fn truncate(ty: &str, formatting: &TypeFormatting) -> Option<String> {
    if ty.starts_with(OBJECT_OPEN) {
        return Some(truncate_object(ty, formatting));
    }

    if let Some(wrapper) = COLLECTION_WRAPPERS
        .iter()
        .find(|wrapper| ty.starts_with(**wrapper))
        && ty.contains("object")
    {
        return Some(format!("{wrapper}{ELLIPSIS})"));
    }

    if ty.starts_with("tuple([") {
        return Some(GENERIC_TUPLE.to_string());
    }

    None
}

fn truncate_object(ty: &str, formatting: &TypeFormatting) -> String {
    let open = OBJECT_OPEN.len() - 1;
    let Ok(close) = scanner::find_matching(ty, open) else {
        return GENERIC_OBJECT.to_string();
    };
    let rest = &ty[close + 1..];
    if !rest.starts_with(')') {
        return GENERIC_OBJECT.to_string();
    }

    let shown = if formatting.detail_level == DetailLevel::Minimal || !formatting.show_field_names
    {
        0
    } else {
        formatting.max_fields_to_show
    };

    let mut parts = field_names(&ty[open + 1..close]);
    parts.truncate(shown);
    parts.push(ELLIPSIS.to_string());

    format!("object({{{}}}{}", parts.join(", "), rest)
}

/// Field names declared at the top level of an object type body.
///
/// Quoted keys keep their quotes. A body that is itself the output of
/// truncation (`a, b, ...`) has no assignments; its bare names are returned
/// instead.
fn field_names(body: &str) -> Vec<String> {
    let bytes = body.as_bytes();
    let mut assigned = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let end = match scanner::skip_opaque(body, i) {
            Ok(Some(next)) if bytes[i] == b'"' => next,
            Ok(Some(next)) => {
                i = next;
                continue;
            }
            Ok(None) => match bytes[i] {
                b'{' | b'(' | b'[' => match scanner::find_matching(body, i) {
                    Ok(close) => {
                        i = close + 1;
                        continue;
                    }
                    Err(_) => break,
                },
                c if c.is_ascii_alphabetic() || c == b'_' => scanner::ident_end(body, i),
                _ => {
                    i += 1;
                    continue;
                }
            },
            Err(_) => break,
        };

        i = end;
        let after = body[end..].trim_start();
        if after.starts_with('=') && !after.starts_with("==") {
            assigned.push(body[start..end].to_string());
        }
    }

    if !assigned.is_empty() {
        return assigned;
    }

    top_level_entries(body)
        .into_iter()
        .map(str::trim)
        .filter(|s| is_field_name(s))
        .map(String::from)
        .collect()
}

/// Split `body` on commas that sit outside strings and brackets.
fn top_level_entries(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut entries = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match scanner::skip_opaque(body, i) {
            Ok(Some(next)) => {
                i = next;
                continue;
            }
            Ok(None) => {}
            Err(_) => break,
        }
        match bytes[i] {
            b'{' | b'(' | b'[' => match scanner::find_matching(body, i) {
                Ok(close) => i = close + 1,
                Err(_) => break,
            },
            b',' => {
                entries.push(&body[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }

    entries.push(&body[start..]);
    entries
}

fn is_field_name(s: &str) -> bool {
    let quoted = s.len() >= 2 && s.starts_with('"') && s.ends_with('"');
    quoted || (!s.is_empty() && scanner::ident_end(s, 0) == s.len())
}
