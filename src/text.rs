//! Text position utilities for byte offset and line:column conversions.
//!
//! Coordinate conventions:
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//!
//! Columns count bytes within the line. The analyzed constructs are anchored
//! at ASCII positions (column 1, keyword starts), so byte columns and
//! character columns agree everywhere the analyzer reports positions.

// ============================================================================
// Offset Conversions
// ============================================================================

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds the content length, returns the position at end of
/// content.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(content.len());
    let mut line = 1u32;
    let mut col = 1u32;

    for (i, &byte) in content.as_bytes().iter().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Compute the 1-indexed column of a byte offset within its line.
///
/// This is the anchor test for top-level construct recognition: a construct
/// is top-level exactly when its start offset sits at column 1.
pub fn column_at(content: &str, offset: usize) -> u32 {
    let offset = offset.min(content.len());
    let line_start = match content[..offset].rfind('\n') {
        Some(newline) => newline + 1,
        None => 0,
    };
    (offset - line_start) as u32 + 1
}

/// Byte offset of the end of the line containing `offset`.
///
/// The returned offset points at the terminating newline (exclusive end of
/// line content), or at the end of the content for the final line.
pub fn line_end(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content[offset..]
        .find('\n')
        .map(|pos| offset + pos)
        .unwrap_or(content.len())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_zero_is_line_one_col_one() {
        assert_eq!(byte_offset_to_position("hello", 0), (1, 1));
    }

    #[test]
    fn offset_after_newline_starts_new_line() {
        let text = "ab\ncd";
        assert_eq!(byte_offset_to_position(text, 3), (2, 1));
        assert_eq!(byte_offset_to_position(text, 4), (2, 2));
    }

    #[test]
    fn offset_past_end_clamps() {
        let text = "ab\ncd";
        assert_eq!(byte_offset_to_position(text, 100), (2, 3));
    }

    #[test]
    fn column_at_line_start_is_one() {
        let text = "first\nsecond\n";
        assert_eq!(column_at(text, 0), 1);
        assert_eq!(column_at(text, 6), 1);
    }

    #[test]
    fn column_at_mid_line() {
        let text = "first\nsecond\n";
        assert_eq!(column_at(text, 2), 3);
        assert_eq!(column_at(text, 8), 3);
    }

    #[test]
    fn line_end_stops_at_newline() {
        let text = "x = 1\ny = 2";
        assert_eq!(line_end(text, 0), 5);
        assert_eq!(line_end(text, 6), 11);
    }

    #[test]
    fn line_end_of_final_line_is_len() {
        assert_eq!(line_end("no newline", 3), 10);
    }
}
