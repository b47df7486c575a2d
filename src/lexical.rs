//! Opaque-span recognition: line comments and quoted string literals.
//!
//! Every structural matcher in the crate routes around "opaque" spans so that
//! keywords and identifiers inside comments or strings are never mistaken for
//! structural tokens. Two operations are exposed:
//!
//! - [`opaque_span_at`]: recognize the longest opaque span starting at a
//!   position (absence of a match is a normal outcome, not an error)
//! - [`strip`]: remove every opaque span from a text slice, preserving all
//!   other content verbatim
//!
//! Recognized opaque spans, tried in this order at a position:
//!
//! 1. `'''`- or `"""`-delimited string (non-greedy, may span multiple lines)
//! 2. `'`- or `"`-delimited single-line string with backslash escapes
//! 3. `#` line comment through end of line
//!
//! An unterminated triple-quoted string extends to end of file. An
//! unterminated single-line string is not a match; its opening quote is
//! treated as ordinary content.

// ============================================================================
// Span Types
// ============================================================================

/// Kind of opaque span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpaqueKind {
    /// Triple-quoted string (`'''` or `"""`), possibly multi-line.
    TripleString,
    /// Single-line quoted string (`'` or `"`).
    String,
    /// `#` comment through end of line.
    Comment,
}

/// An opaque span: a half-open `[start, end)` byte interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueSpan {
    pub kind: OpaqueKind,
    pub start: usize,
    pub end: usize,
}

// ============================================================================
// Recognition
// ============================================================================

/// Recognize the longest opaque span starting exactly at `pos`.
///
/// Returns `None` when `pos` does not start a comment or string literal; the
/// caller then treats the position as ordinary content and advances by one.
pub fn opaque_span_at(text: &str, pos: usize) -> Option<OpaqueSpan> {
    let bytes = text.as_bytes();
    match bytes.get(pos)? {
        b'\'' | b'"' => {
            let quote = bytes[pos];
            if is_triple(bytes, pos, quote) {
                Some(triple_string_span(bytes, pos, quote))
            } else {
                single_line_string_span(bytes, pos, quote)
            }
        }
        b'#' => {
            let end = bytes[pos..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|nl| pos + nl)
                .unwrap_or(bytes.len());
            Some(OpaqueSpan {
                kind: OpaqueKind::Comment,
                start: pos,
                end,
            })
        }
        _ => None,
    }
}

fn is_triple(bytes: &[u8], pos: usize, quote: u8) -> bool {
    bytes.len() >= pos + 3 && bytes[pos + 1] == quote && bytes[pos + 2] == quote
}

/// Triple-quoted string: non-greedy scan to the next closing delimiter,
/// with no escape character. Unterminated literals extend to end of file.
fn triple_string_span(bytes: &[u8], pos: usize, quote: u8) -> OpaqueSpan {
    let mut i = pos + 3;
    while i + 3 <= bytes.len() {
        if bytes[i] == quote && bytes[i + 1] == quote && bytes[i + 2] == quote {
            return OpaqueSpan {
                kind: OpaqueKind::TripleString,
                start: pos,
                end: i + 3,
            };
        }
        i += 1;
    }
    OpaqueSpan {
        kind: OpaqueKind::TripleString,
        start: pos,
        end: bytes.len(),
    }
}

/// Single-line string: a backslash escapes the next byte, a bare newline or
/// end of file before the closing quote means no match.
fn single_line_string_span(bytes: &[u8], pos: usize, quote: u8) -> Option<OpaqueSpan> {
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                // An escaped newline cannot extend a single-line string.
                if bytes.get(i + 1) == Some(&b'\n') {
                    return None;
                }
                i += 2;
            }
            b'\n' => return None,
            b if b == quote => {
                return Some(OpaqueSpan {
                    kind: OpaqueKind::String,
                    start: pos,
                    end: i + 1,
                });
            }
            _ => i += 1,
        }
    }
    None
}

// ============================================================================
// Strip
// ============================================================================

/// Remove every opaque span from `text`, preserving all other content.
///
/// Only containment matters downstream (the reference scanner performs
/// whole-word searches over the result), so no placeholder is substituted
/// for removed spans.
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run_start = 0usize;
    let mut pos = 0usize;

    while pos < text.len() {
        if let Some(span) = opaque_span_at(text, pos) {
            out.push_str(&text[run_start..span.start]);
            pos = span.end;
            run_start = span.end;
        } else {
            pos += 1;
        }
    }
    out.push_str(&text[run_start..]);
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod recognition {
        use super::*;

        #[test]
        fn comment_runs_to_end_of_line() {
            let text = "x = 1  # uses Alpha\ny = 2";
            let span = opaque_span_at(text, 7).unwrap();
            assert_eq!(span.kind, OpaqueKind::Comment);
            assert_eq!(&text[span.start..span.end], "# uses Alpha");
        }

        #[test]
        fn comment_on_final_line_runs_to_eof() {
            let text = "# trailing";
            let span = opaque_span_at(text, 0).unwrap();
            assert_eq!(span.end, text.len());
        }

        #[test]
        fn single_quoted_string() {
            let text = "x = 'hello' + y";
            let span = opaque_span_at(text, 4).unwrap();
            assert_eq!(span.kind, OpaqueKind::String);
            assert_eq!(&text[span.start..span.end], "'hello'");
        }

        #[test]
        fn escaped_quote_does_not_terminate() {
            let text = r"'it\'s' rest";
            let span = opaque_span_at(text, 0).unwrap();
            assert_eq!(&text[span.start..span.end], r"'it\'s'");
        }

        #[test]
        fn unterminated_single_line_string_is_not_a_span() {
            assert_eq!(opaque_span_at("'no closer\nx = 1", 0), None);
            assert_eq!(opaque_span_at("'no closer", 0), None);
        }

        #[test]
        fn triple_quoted_spans_multiple_lines() {
            let text = "'''first\nsecond''' tail";
            let span = opaque_span_at(text, 0).unwrap();
            assert_eq!(span.kind, OpaqueKind::TripleString);
            assert_eq!(&text[span.start..span.end], "'''first\nsecond'''");
        }

        #[test]
        fn triple_double_quoted_recognized() {
            let text = "\"\"\"doc\"\"\"rest";
            let span = opaque_span_at(text, 0).unwrap();
            assert_eq!(&text[span.start..span.end], "\"\"\"doc\"\"\"");
        }

        #[test]
        fn triple_quoted_is_non_greedy() {
            let text = "'''a''' mid '''b'''";
            let span = opaque_span_at(text, 0).unwrap();
            assert_eq!(&text[span.start..span.end], "'''a'''");
        }

        #[test]
        fn unterminated_triple_extends_to_eof() {
            let text = "'''never closed\nclass Hidden:\n    pass\n";
            let span = opaque_span_at(text, 0).unwrap();
            assert_eq!(span.end, text.len());
        }

        #[test]
        fn empty_string_literal() {
            let span = opaque_span_at("'' tail", 0).unwrap();
            assert_eq!((span.start, span.end), (0, 2));
        }

        #[test]
        fn ordinary_content_is_no_match() {
            assert_eq!(opaque_span_at("class Foo:", 0), None);
            assert_eq!(opaque_span_at("x = 1", 2), None);
        }
    }

    mod strip {
        use super::*;

        #[test]
        fn strips_comments_and_strings() {
            let text = "x = Alpha()  # builds Beta\ny = 'Gamma'\n";
            assert_eq!(strip(text), "x = Alpha()  \ny = \n");
        }

        #[test]
        fn strips_triple_quoted_bodies() {
            let text = "def f():\n    '''mentions Alpha'''\n    return Beta\n";
            let stripped = strip(text);
            assert!(!stripped.contains("Alpha"));
            assert!(stripped.contains("Beta"));
        }

        #[test]
        fn preserves_ordinary_content_verbatim() {
            let text = "a + b - c\n";
            assert_eq!(strip(text), text);
        }

        #[test]
        fn quote_inside_comment_is_part_of_comment() {
            let text = "# don't match\nAlpha\n";
            assert_eq!(strip(text), "\nAlpha\n");
        }

        #[test]
        fn hash_inside_string_is_part_of_string() {
            let text = "x = '# not a comment' + Alpha\n";
            assert_eq!(strip(text), "x =  + Alpha\n");
        }

        #[test]
        fn unterminated_triple_swallows_rest_of_file() {
            let text = "before\n'''open\nAlpha Beta";
            assert_eq!(strip(text), "before\n");
        }
    }
}
