//! Balanced-structure scanner for HCL source text.
//!
//! This is not a parser. It knows just enough about the language to find where
//! a bracketed region, a statement, or a block body ends: quoted strings (with
//! `${...}` interpolation), heredocs, and comments are skipped as opaque runs so
//! that braces inside them never disturb the depth count.
//!
//! All delimiters are ASCII, so byte offsets returned here always fall on UTF-8
//! character boundaries of the input.

use thiserror::Error;

/// Failure to find the end of a construct in source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: unterminated heredoc, expected closing marker `{marker}`")]
    UnterminatedHeredoc { line: usize, marker: String },

    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: usize },

    #[error("line {line}: `{open}` is never closed")]
    Unclosed { line: usize, open: char },

    #[error("line {line}: unexpected `{found}`")]
    Unbalanced { line: usize, found: char },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnterminatedString { line }
            | ScanError::UnterminatedHeredoc { line, .. }
            | ScanError::UnterminatedComment { line }
            | ScanError::Unclosed { line, .. }
            | ScanError::Unbalanced { line, .. } => *line,
        }
    }

    /// Re-base the reported line for text that was scanned as a slice of a
    /// larger document starting on `first_line`.
    pub fn shifted(mut self, first_line: usize) -> Self {
        let delta = first_line.saturating_sub(1);
        match &mut self {
            ScanError::UnterminatedString { line }
            | ScanError::UnterminatedHeredoc { line, .. }
            | ScanError::UnterminatedComment { line }
            | ScanError::Unclosed { line, .. }
            | ScanError::Unbalanced { line, .. } => *line += delta,
        }
        self
    }
}

/// A `key = value` statement at the top level of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: &'a str,
    /// Expression text, trimmed. Comments inside it are left in place.
    pub value: &'a str,
    pub line: usize,
}

/// A `kind "label" { ... }` block at the top level of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub kind: &'a str,
    pub labels: Vec<String>,
    /// Text between the block's own braces.
    pub body: &'a str,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'a> {
    Attribute(Attribute<'a>),
    Block(Block<'a>),
}

/// 1-based line number of byte offset `pos`.
pub fn line_at(src: &str, pos: usize) -> usize {
    count_newlines(&src.as_bytes()[..pos.min(src.len())]) + 1
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Line numbers for offsets visited in increasing order, counted from where
/// the previous lookup stopped.
struct LineCursor<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, pos: usize) -> usize {
        let pos = pos.min(self.src.len());
        if pos < self.pos {
            return count_newlines(&self.src[..pos]) + 1;
        }
        self.line += count_newlines(&self.src[self.pos..pos]);
        self.pos = pos;
        self.line
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

pub(crate) fn ident_end(src: &str, start: usize) -> usize {
    let b = src.as_bytes();
    if start >= b.len() || !(b[start].is_ascii_alphabetic() || b[start] == b'_') {
        return start;
    }
    let mut i = start + 1;
    while i < b.len() && is_ident_byte(b[i]) {
        i += 1;
    }
    i
}

fn skip_inline_space(src: &str, mut i: usize) -> usize {
    let b = src.as_bytes();
    while i < b.len() && (b[i] == b' ' || b[i] == b'\t' || b[i] == b'\r') {
        i += 1;
    }
    i
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'(' => b')',
        _ => b']',
    }
}

/// If an opaque run (string, heredoc, comment) starts at `i`, return the offset
/// just past it. Line comments and heredocs stop before their final newline.
pub(crate) fn skip_opaque(src: &str, i: usize) -> Result<Option<usize>, ScanError> {
    let b = src.as_bytes();
    match (b.get(i), b.get(i + 1)) {
        (Some(b'"'), _) => skip_string(src, i).map(Some),
        (Some(b'#'), _) | (Some(b'/'), Some(b'/')) => Ok(Some(line_end(src, i))),
        (Some(b'/'), Some(b'*')) => match src[i + 2..].find("*/") {
            Some(rel) => Ok(Some(i + 2 + rel + 2)),
            None => Err(ScanError::UnterminatedComment {
                line: line_at(src, i),
            }),
        },
        (Some(b'<'), Some(b'<')) => skip_heredoc(src, i),
        _ => Ok(None),
    }
}

fn line_end(src: &str, i: usize) -> usize {
    src[i..].find('\n').map_or(src.len(), |rel| i + rel)
}

/// Skip a quoted string starting at `start` (which must be `"`), including any
/// `${...}` / `%{...}` template sequences, and return the offset past the
/// closing quote.
pub(crate) fn skip_string(src: &str, start: usize) -> Result<usize, ScanError> {
    let b = src.as_bytes();
    let mut i = start + 1;
    while i < b.len() {
        match b[i] {
            b'\\' => i += 2,
            b'"' => return Ok(i + 1),
            b'\n' => break,
            b'$' | b'%' if b.get(i + 1) == Some(&b[i]) && b.get(i + 2) == Some(&b'{') => i += 3,
            b'$' | b'%' if b.get(i + 1) == Some(&b'{') => i = find_matching(src, i + 1)? + 1,
            _ => i += 1,
        }
    }
    Err(ScanError::UnterminatedString {
        line: line_at(src, start),
    })
}

/// Marker and body start of a heredoc opening at `start`, if there is one.
fn heredoc_header(src: &str, start: usize) -> Option<(&str, bool, usize)> {
    let b = src.as_bytes();
    let mut i = start + 2;
    let indented = b.get(i) == Some(&b'-');
    if indented {
        i += 1;
    }
    let end = ident_end(src, i);
    if end == i {
        return None;
    }
    let rest = skip_inline_space(src, end);
    if rest < b.len() && b[rest] != b'\n' {
        return None;
    }
    Some((&src[i..end], indented, (rest + 1).min(src.len())))
}

fn skip_heredoc(src: &str, start: usize) -> Result<Option<usize>, ScanError> {
    let Some((marker, _, body_start)) = heredoc_header(src, start) else {
        return Ok(None);
    };
    let mut pos = body_start;
    while pos < src.len() {
        let end = line_end(src, pos);
        if src[pos..end].trim() == marker {
            return Ok(Some(end));
        }
        pos = end + 1;
    }
    Err(ScanError::UnterminatedHeredoc {
        line: line_at(src, start),
        marker: marker.to_string(),
    })
}

/// Given the offset of an opening `{`, `(` or `[`, return the offset of the
/// bracket that closes it.
///
/// Nesting is tracked with an explicit stack, so an inner `}` never closes an
/// outer region and a mismatched closer is reported instead of miscounted.
pub fn find_matching(src: &str, open: usize) -> Result<usize, ScanError> {
    let b = src.as_bytes();
    let mut stack = vec![b[open]];
    let mut i = open + 1;
    while i < b.len() {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match b[i] {
            b'{' | b'(' | b'[' => stack.push(b[i]),
            c @ (b'}' | b')' | b']') => {
                let expected = stack.last().copied().map(closer_for);
                if expected != Some(c) {
                    return Err(ScanError::Unbalanced {
                        line: line_at(src, i),
                        found: c as char,
                    });
                }
                stack.pop();
                if stack.is_empty() {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(ScanError::Unclosed {
        line: line_at(src, open),
        open: b[open] as char,
    })
}

/// Offset of the newline that ends the statement starting at `i`, or the end of
/// the text. Bracketed regions may span lines.
fn statement_end(src: &str, mut i: usize) -> Result<usize, ScanError> {
    let b = src.as_bytes();
    while i < b.len() {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match b[i] {
            b'\n' => return Ok(i),
            b'{' | b'(' | b'[' => i = find_matching(src, i)? + 1,
            c @ (b'}' | b')' | b']') => {
                return Err(ScanError::Unbalanced {
                    line: line_at(src, i),
                    found: c as char,
                });
            }
            _ => i += 1,
        }
    }
    Ok(b.len())
}

/// Skip whitespace and comments.
fn skip_blank(src: &str, mut i: usize) -> Result<usize, ScanError> {
    let b = src.as_bytes();
    while i < b.len() {
        if b[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let is_comment = b[i] == b'#' || (b[i] == b'/' && matches!(b.get(i + 1), Some(b'/' | b'*')));
        if !is_comment {
            break;
        }
        match skip_opaque(src, i)? {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(i)
}

/// Split a body (a whole file, or the inside of a block) into its top-level
/// attributes and blocks. Statements that are neither are skipped.
pub fn body_items(src: &str) -> Result<Vec<Item<'_>>, ScanError> {
    let b = src.as_bytes();
    let mut items = Vec::new();
    let mut lines = LineCursor::new(src);
    let mut i = 0;

    while i < b.len() {
        i = skip_blank(src, i)?;
        if i >= b.len() {
            break;
        }
        let start = i;
        let key_end = ident_end(src, i);
        if key_end == start {
            i = statement_end(src, i)?;
            continue;
        }
        let key = &src[start..key_end];
        let line = lines.line_at(start);
        let mut j = skip_inline_space(src, key_end);

        if b.get(j) == Some(&b'=') && b.get(j + 1) != Some(&b'=') {
            let end = statement_end(src, j + 1)?;
            items.push(Item::Attribute(Attribute {
                key,
                value: src[j + 1..end].trim(),
                line,
            }));
            i = end;
            continue;
        }

        let mut labels = Vec::new();
        loop {
            j = skip_inline_space(src, j);
            match b.get(j) {
                Some(b'"') => {
                    let end = skip_string(src, j)?;
                    labels.push(unquote(&src[j..end]));
                    j = end;
                }
                Some(b'{') => {
                    let close = find_matching(src, j)?;
                    items.push(Item::Block(Block {
                        kind: key,
                        labels,
                        body: &src[j + 1..close],
                        line,
                    }));
                    i = close + 1;
                    break;
                }
                Some(&c) if c.is_ascii_alphabetic() || c == b'_' => {
                    let end = ident_end(src, j);
                    labels.push(src[j..end].to_string());
                    j = end;
                }
                _ => {
                    i = statement_end(src, j)?;
                    break;
                }
            }
        }
    }

    Ok(items)
}

/// Decode a quoted string literal (including its quotes) into its text.
///
/// Unknown escapes are kept as written.
pub fn unquote(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            out.push_str("\\u");
                            out.push_str(&hex);
                        }
                    }
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '$' | '%' if chars.peek() == Some(&c) => {
                // `$${` and `%%{` are literal `${` and `%{`
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek() == Some(&'{') {
                    chars.next();
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Text of a heredoc expression such as `<<-EOT ... EOT`, or `None` if `expr`
/// is not one. Indented heredocs lose their common leading whitespace.
pub fn heredoc_text(expr: &str) -> Option<String> {
    let expr = expr.trim();
    if !expr.starts_with("<<") {
        return None;
    }
    let (marker, indented, body_start) = heredoc_header(expr, 0)?;
    let lines: Vec<&str> = expr[body_start..].lines().collect();
    let close = lines.iter().rposition(|l| l.trim() == marker)?;
    let body = &lines[..close];

    let indent = if indented {
        body.iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0)
    } else {
        0
    };

    Some(
        body.iter()
            .map(|l| l.get(indent..).unwrap_or(l.trim_start()))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Replace every comment in `src` with a single space, leaving strings and
/// heredocs untouched.
pub fn strip_comments(src: &str) -> Result<String, ScanError> {
    let b = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut i = 0;
    while i < b.len() {
        let is_comment = b[i] == b'#' || (b[i] == b'/' && matches!(b.get(i + 1), Some(b'/' | b'*')));
        match skip_opaque(src, i)? {
            Some(next) if is_comment => {
                out.push_str(&src[copied..i]);
                out.push(' ');
                copied = next;
                i = next;
            }
            Some(next) => i = next,
            None => i += 1,
        }
    }
    out.push_str(&src[copied..]);
    Ok(out)
}
