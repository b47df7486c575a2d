//! Top-level construct recognition over a flat source text.
//!
//! A single pass segments the file into class declarations, function
//! declarations, module-level assignments, and catch-all "other" lines.
//! Recognition is column-anchored: a construct is top-level exactly when it
//! starts at column 1. There is no indentation stack and no syntax tree;
//! nested declarations simply fail the column test and fall into whatever
//! scope is currently open.
//!
//! The scan driver skips opaque spans (comments, string literals) wholesale,
//! so a `class` keyword inside a docstring can never start a match. Within a
//! class or def header, whitespace (including newlines) and opaque spans are
//! skipped between tokens, so a header may span lines and carry inline
//! comments.
//!
//! Failure semantics: once a `class` or `def` keyword has matched at column
//! 1, the rest of the header is mandatory. A missing name, malformed base
//! list, unterminated parameter list, or missing colon is a fatal
//! [`MalformedDeclaration`](crate::error::PyscopeError::MalformedDeclaration)
//! rather than a silent skip; a bare construct keyword with no name is never
//! valid in the analyzed grammar and signals a real structural problem.

use crate::error::{PyscopeError, PyscopeResult};
use crate::lexical::opaque_span_at;
use crate::text::{byte_offset_to_position, column_at, line_end};

// ============================================================================
// Match Types
// ============================================================================

/// A recognized class statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Class name.
    pub name: String,
    /// Declared base classes, in declaration order. May be empty.
    pub bases: Vec<String>,
    /// Byte offset of the `class` keyword.
    pub start: usize,
}

/// One top-level construct, tagged by kind.
///
/// A scan emits these in file order, so start offsets are strictly
/// increasing across the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelMatch {
    /// `class Name(Base, ...):`
    Class(ClassDecl),
    /// `def name(...):`
    Method { name: String, start: usize },
    /// `name = <rest of line>`; `end` is the end of the matched line.
    Assignment {
        name: String,
        start: usize,
        end: usize,
    },
    /// Any other column-1 line.
    Other { start: usize },
}

impl TopLevelMatch {
    /// Byte offset where this construct starts.
    pub fn start(&self) -> usize {
        match self {
            TopLevelMatch::Class(decl) => decl.start,
            TopLevelMatch::Method { start, .. } => *start,
            TopLevelMatch::Assignment { start, .. } => *start,
            TopLevelMatch::Other { start } => *start,
        }
    }
}

// ============================================================================
// Scan Driver
// ============================================================================

/// Scan the whole source for non-overlapping top-level constructs.
///
/// At each position: an opaque span is skipped wholesale; at column 1 the
/// recognizers are tried in priority order (class, def, assignment, other)
/// and the first success wins, with the scan resuming at the match end;
/// anywhere else the scan advances one byte.
pub fn scan_top_level(text: &str) -> PyscopeResult<Vec<TopLevelMatch>> {
    let mut matches = Vec::new();
    let mut pos = 0usize;

    while pos < text.len() {
        if let Some(span) = opaque_span_at(text, pos) {
            pos = span.end;
            continue;
        }
        if column_at(text, pos) == 1 {
            if let Some((matched, end)) = match_at(text, pos)? {
                matches.push(matched);
                pos = end;
                continue;
            }
        }
        pos += 1;
    }

    Ok(matches)
}

/// Try the recognizers at `pos` in priority order.
fn match_at(text: &str, pos: usize) -> PyscopeResult<Option<(TopLevelMatch, usize)>> {
    if let Some(found) = match_class(text, pos)? {
        return Ok(Some(found));
    }
    if let Some(found) = match_method(text, pos)? {
        return Ok(Some(found));
    }
    if let Some(found) = match_assignment(text, pos) {
        return Ok(Some(found));
    }
    Ok(match_other(text, pos))
}

// ============================================================================
// Token Cursor
// ============================================================================

/// Is `b` part of an identifier (`[A-Za-z0-9_]`)?
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// Token-level cursor used by the class/def recognizers.
///
/// `skip_insignificant` steps over whitespace (including newlines) and
/// opaque spans, which is what lets headers span lines and carry comments
/// without a colon inside a string ever terminating the match.
struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Cursor {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    fn skip_insignificant(&mut self) {
        loop {
            match self.bytes.get(self.pos) {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(_) => match opaque_span_at(self.text, self.pos) {
                    Some(span) => self.pos = span.end,
                    None => return,
                },
                None => return,
            }
        }
    }

    /// Consume `[A-Za-z_][A-Za-z0-9_]*` at the cursor.
    fn take_identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.bytes.get(start) {
            Some(&b) if b == b'_' || b.is_ascii_alphabetic() => {}
            _ => return None,
        }
        let mut end = start + 1;
        while end < self.bytes.len() && is_ident_byte(self.bytes[end]) {
            end += 1;
        }
        self.pos = end;
        Some(&self.text[start..end])
    }

    /// Consume one expected byte.
    fn take_byte(&mut self, expected: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a keyword as a whole word: the literal text followed by a
    /// non-identifier byte (or end of input).
    fn take_keyword(&mut self, keyword: &str) -> bool {
        let end = self.pos + keyword.len();
        if self.bytes.len() < end || &self.bytes[self.pos..end] != keyword.as_bytes() {
            return false;
        }
        if self.bytes.get(end).map_or(false, |&b| is_ident_byte(b)) {
            return false;
        }
        self.pos = end;
        true
    }
}

fn malformed(text: &str, construct: &'static str, at: usize, message: &str) -> PyscopeError {
    let (line, col) = byte_offset_to_position(text, at);
    PyscopeError::MalformedDeclaration {
        construct,
        line,
        col,
        message: message.to_string(),
    }
}

// ============================================================================
// Recognizers
// ============================================================================

/// `class` keyword, mandatory name, optional parenthesized base list,
/// mandatory colon.
fn match_class(text: &str, start: usize) -> PyscopeResult<Option<(TopLevelMatch, usize)>> {
    let mut cur = Cursor::new(text, start);
    if !cur.take_keyword("class") {
        return Ok(None);
    }
    cur.skip_insignificant();
    let name = cur
        .take_identifier()
        .ok_or_else(|| malformed(text, "class", cur.pos, "expected class name after 'class'"))?
        .to_string();
    cur.skip_insignificant();

    let mut bases = Vec::new();
    if cur.take_byte(b'(') {
        loop {
            cur.skip_insignificant();
            let base = cur
                .take_identifier()
                .ok_or_else(|| malformed(text, "class", cur.pos, "expected base class name"))?;
            bases.push(base.to_string());
            cur.skip_insignificant();
            if cur.take_byte(b',') {
                continue;
            }
            if cur.take_byte(b')') {
                break;
            }
            return Err(malformed(
                text,
                "class",
                cur.pos,
                "expected ',' or ')' in base class list",
            ));
        }
        cur.skip_insignificant();
    }

    if !cur.take_byte(b':') {
        return Err(malformed(
            text,
            "class",
            cur.pos,
            "expected ':' after class header",
        ));
    }
    Ok(Some((
        TopLevelMatch::Class(ClassDecl { name, bases, start }),
        cur.pos,
    )))
}

/// `def` keyword, mandatory name, one balanced-paren group, mandatory colon.
/// Parameter list contents are not parsed, but parens inside strings or
/// comments do not count toward balancing.
fn match_method(text: &str, start: usize) -> PyscopeResult<Option<(TopLevelMatch, usize)>> {
    let mut cur = Cursor::new(text, start);
    if !cur.take_keyword("def") {
        return Ok(None);
    }
    cur.skip_insignificant();
    let name = cur
        .take_identifier()
        .ok_or_else(|| malformed(text, "def", cur.pos, "expected function name after 'def'"))?
        .to_string();
    cur.skip_insignificant();

    if !cur.take_byte(b'(') {
        return Err(malformed(
            text,
            "def",
            cur.pos,
            "expected '(' after function name",
        ));
    }
    let mut depth = 1usize;
    while depth > 0 {
        if cur.pos >= cur.bytes.len() {
            return Err(malformed(text, "def", start, "unterminated parameter list"));
        }
        if let Some(span) = opaque_span_at(text, cur.pos) {
            cur.pos = span.end;
            continue;
        }
        match cur.bytes[cur.pos] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        cur.pos += 1;
    }
    cur.skip_insignificant();

    if !cur.take_byte(b':') {
        return Err(malformed(
            text,
            "def",
            cur.pos,
            "expected ':' after parameter list",
        ));
    }
    Ok(Some((TopLevelMatch::Method { name, start }, cur.pos)))
}

/// Identifier, `=`, rest of line captured verbatim. Only spaces and tabs may
/// sit between the target and the `=`; no opaque-span suppression applies.
fn match_assignment(text: &str, start: usize) -> Option<(TopLevelMatch, usize)> {
    let mut cur = Cursor::new(text, start);
    let name = cur.take_identifier()?.to_string();
    while matches!(cur.bytes.get(cur.pos), Some(b' ') | Some(b'\t')) {
        cur.pos += 1;
    }
    if !cur.take_byte(b'=') {
        return None;
    }
    let end = line_end(text, start);
    Some((TopLevelMatch::Assignment { name, start, end }, end))
}

/// Fallback: one non-whitespace printable run, rest of line consumed.
fn match_other(text: &str, start: usize) -> Option<(TopLevelMatch, usize)> {
    let b = *text.as_bytes().get(start)?;
    if !b.is_ascii_graphic() {
        return None;
    }
    let end = line_end(text, start);
    Some((TopLevelMatch::Other { start }, end))
}

// ============================================================================
// Tests
// ============================================================================
