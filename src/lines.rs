// Copyright (C) Tab Tokenizer Contributors. All rights reserved.
//
// This file is part of tab-tokenizer, distributed under the MIT license. For
// the full terms, see the included LICENSE file.

//! Advancing a source position past whole logical lines without tokenizing
//! them, used to reach a starting offset before the state machine takes
//! over.

use crate::tokenizer::TokenizeError;

/// Advances `pos` past `offset` significant logical lines of `source` and
/// returns the new position.
///
/// A line is significant if it contains at least one byte that is not a line
/// terminator and, unless `header` is set, is not blank; a line is never
/// significant if it is a comment line (its first non-whitespace byte equals
/// `comment`). When `header` is set, whitespace-only lines count as
/// significant, since a header is allowed to be made entirely of delimiters.
///
/// Recognizes LF, CR, and CRLF as line terminators; the LF half of a CRLF
/// pair is consumed together with the CR, never counted as a second
/// terminator.
pub(crate) fn skip_lines(
    source: &[u8],
    pos: usize,
    comment: Option<u8>,
    offset: usize,
    header: bool,
) -> Result<usize, TokenizeError> {
    let mut pos = pos;
    let mut skipped = 0;

    while skipped < offset {
        if pos >= source.len() {
            return if header {
                Err(TokenizeError::InvalidLine)
            } else {
                Ok(source.len())
            };
        }

        let line_start = pos;
        let line_end = find_line_end(source, pos);
        let line = &source[line_start..line_end];
        pos = skip_terminator(source, line_end);

        if is_comment_line(line, comment) {
            continue;
        }
        if header || !is_blank_line(line) {
            skipped += 1;
        }
    }

    Ok(pos)
}

/// Finds the end of the logical line starting at `pos`, i.e. the offset of
/// the first line-terminator byte (or `source.len()` if none remains).
fn find_line_end(source: &[u8], pos: usize) -> usize {
    match memchr::memchr2(b'\n', b'\r', &source[pos..]) {
        Some(off) => pos + off,
        None => source.len(),
    }
}

/// Advances past the line terminator beginning at `pos`, treating a CR
/// immediately followed by LF as a single two-byte terminator.
fn skip_terminator(source: &[u8], pos: usize) -> usize {
    match source.get(pos) {
        Some(b'\r') if source.get(pos + 1) == Some(&b'\n') => pos + 2,
        Some(b'\r') | Some(b'\n') => pos + 1,
        _ => pos,
    }
}

fn is_blank_line(line: &[u8]) -> bool {
    line.is_empty()
}

pub(crate) fn is_comment_line(line: &[u8], comment: Option<u8>) -> bool {
    match comment {
        Some(c) => {
            let first_non_whitespace = line.iter().find(|&&b| b != b' ' && b != b'\t');
            first_non_whitespace == Some(&c)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines_before_data() {
        let src = b"\n\nfirst\nsecond\n";
        let pos = skip_lines(src, 0, None, 1, false).unwrap();
        assert_eq!(&src[pos..], b"second\n");
    }

    #[test]
    fn header_mode_counts_blank_lines_as_significant() {
        let src = b"\nsecond\n";
        let pos = skip_lines(src, 0, None, 1, true).unwrap();
        assert_eq!(pos, 1);
    }

    #[test]
    fn comment_lines_are_never_significant() {
        let src = b"# comment\nfirst\n";
        let pos = skip_lines(src, 0, Some(b'#'), 1, false).unwrap();
        assert_eq!(&src[pos..], b"");
    }

    #[test]
    fn crlf_terminator_counts_once() {
        let src = b"a\r\nb\r\n";
        let pos = skip_lines(src, 0, None, 1, false).unwrap();
        assert_eq!(&src[pos..], b"b\r\n");
    }

    #[test]
    fn lone_cr_is_a_terminator() {
        let src = b"a\rb\r";
        let pos = skip_lines(src, 0, None, 1, false).unwrap();
        assert_eq!(&src[pos..], b"b\r");
    }

    #[test]
    fn missing_header_line_is_an_error() {
        let src = b"";
        assert_eq!(skip_lines(src, 0, None, 1, true), Err(TokenizeError::InvalidLine));
    }

    #[test]
    fn missing_data_line_is_ok_at_end_of_source() {
        let src = b"\n\n";
        assert_eq!(skip_lines(src, 0, None, 1, false), Ok(src.len()));
    }

    #[test]
    fn indented_comment_is_recognized() {
        let src = b"  # comment\nfirst\n";
        let pos = skip_lines(src, 0, Some(b'#'), 1, false).unwrap();
        assert_eq!(&src[pos..], b"");
    }
}
