// Copyright (C) Tab Tokenizer Contributors. All rights reserved.
//
// This file is part of tab-tokenizer, distributed under the MIT license. For
// the full terms, see the included LICENSE file.

//! The byte-driven state machine that turns a delimited-text buffer into a
//! [`ColumnStore`].

use bstr::BStr;
use thiserror::Error;

use crate::columns::{ColumnStore, FieldIter};
use crate::lines;
use crate::numeric::ConvertError;
use crate::span::Span;

/// Longest line prefix included in an error's log line, so a single
/// pathological row does not flood the log.
const ERROR_CONTEXT_MAX_LEN: usize = 80;

/// An error produced while tokenizing a row-delimited input.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("header line was expected but the input ended first")]
    InvalidLine,
    #[error("row has more fields than the configured column count")]
    TooManyCols,
    #[error("row ended with fewer fields than the configured column count")]
    NotEnoughCols,
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Configuration accepted by a [`Tokenizer`].
///
/// Constructed through [`TokenizerConfig::builder`]; see [`TokenizerConfigBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenizerConfig {
    pub(crate) delimiter: u8,
    pub(crate) quote: u8,
    pub(crate) comment: Option<u8>,
    pub(crate) fill_extra_cols: bool,
    pub(crate) strip_whitespace_lines: bool,
    pub(crate) strip_whitespace_fields: bool,
    pub(crate) use_fast_converter: bool,
}

impl TokenizerConfig {
    /// Starts building a [`TokenizerConfig`] from the default settings
    /// (delimiter `,`, quote `"`, no comment byte, no whitespace stripping,
    /// no column padding, fast converter enabled).
    pub fn builder() -> TokenizerConfigBuilder {
        TokenizerConfigBuilder::default()
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig::builder().build()
    }
}

/// Fluent builder for [`TokenizerConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenizerConfigBuilder {
    delimiter: Option<u8>,
    quote: Option<u8>,
    comment: Option<u8>,
    fill_extra_cols: Option<bool>,
    strip_whitespace_lines: Option<bool>,
    strip_whitespace_fields: Option<bool>,
    use_fast_converter: Option<bool>,
}

impl TokenizerConfigBuilder {
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    pub fn fill_extra_cols(mut self, fill_extra_cols: bool) -> Self {
        self.fill_extra_cols = Some(fill_extra_cols);
        self
    }

    pub fn strip_whitespace_lines(mut self, strip: bool) -> Self {
        self.strip_whitespace_lines = Some(strip);
        self
    }

    pub fn strip_whitespace_fields(mut self, strip: bool) -> Self {
        self.strip_whitespace_fields = Some(strip);
        self
    }

    /// Retained for API compatibility with callers porting an existing
    /// configuration; this port has no locale-sensitive converter to fall
    /// back to, so the setting has no observable effect.
    pub fn use_fast_converter(mut self, use_fast_converter: bool) -> Self {
        self.use_fast_converter = Some(use_fast_converter);
        self
    }

    pub fn build(self) -> TokenizerConfig {
        TokenizerConfig {
            delimiter: self.delimiter.unwrap_or(b','),
            quote: self.quote.unwrap_or(b'"'),
            comment: self.comment,
            fill_extra_cols: self.fill_extra_cols.unwrap_or(false),
            strip_whitespace_lines: self.strip_whitespace_lines.unwrap_or(false),
            strip_whitespace_fields: self.strip_whitespace_fields.unwrap_or(false),
            use_fast_converter: self.use_fast_converter.unwrap_or(true),
        }
    }
}

/// The FSM's state. `CarriageReturn` carries the state to resume once the
/// CR/CRLF/lone-CR ambiguity has been resolved against the following byte.
#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    StartLine,
    StartField,
    Field,
    StartQuotedField,
    QuotedField,
    QuotedFieldNewline,
    Comment,
    CarriageReturn { old_state: Box<State> },
}

/// A tokenizer bound to a borrowed byte slice.
pub struct Tokenizer<'a> {
    source: &'a [u8],
    source_pos: usize,
    config: TokenizerConfig,
    columns: ColumnStore,
    state: State,
    num_rows: usize,
}

static_assertions::assert_impl_all!(Tokenizer<'static>: Send);

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a [u8], config: TokenizerConfig) -> Self {
        Tokenizer {
            source,
            source_pos: 0,
            config,
            columns: ColumnStore::new(),
            state: State::StartLine,
            num_rows: 0,
        }
    }

    /// Rebinds the source slice, resetting the read position and FSM state.
    /// Column storage from a previous `tokenize` call is left untouched
    /// until the next call to [`Tokenizer::tokenize`].
    pub fn set_source(&mut self, source: &'a [u8]) {
        self.source = source;
        self.source_pos = 0;
        self.state = State::StartLine;
    }

    /// Advances the read position past `offset` significant logical lines.
    /// See [`lines::skip_lines`] for the exact rules.
    pub fn skip_lines(&mut self, offset: usize, header: bool) -> Result<(), TokenizeError> {
        self.source_pos = lines::skip_lines(
            self.source,
            self.source_pos,
            self.config.comment,
            offset,
            header,
        )?;
        self.state = State::StartLine;
        Ok(())
    }

    /// Tokenizes from the current read position.
    ///
    /// In header mode, the entire next significant line is stored verbatim
    /// as the sole field of a single column, and the position advances past
    /// that one line. Otherwise rows of exactly `num_cols` fields are
    /// produced until `end` rows have been read (or indefinitely, if `end`
    /// is `None`) or the input is exhausted.
    pub fn tokenize(
        &mut self,
        end: Option<usize>,
        header: bool,
        num_cols: usize,
    ) -> Result<(), TokenizeError> {
        self.columns.reset(if header { 1 } else { num_cols });
        self.num_rows = 0;
        let result = if header {
            self.tokenize_header()
        } else {
            self.tokenize_rows(end, num_cols)
        };
        if let Err(ref e) = result {
            log::trace!(
                "tokenize error {e} at byte offset {}, near {:?}",
                self.source_pos,
                BStr::new(&self.source[self.offending_line_start()..self.offending_line_end()])
            );
        }
        result
    }

    /// Returns an iterator over the fields stored in column `col`.
    pub fn column(&self, col: usize) -> FieldIter<'_> {
        self.columns.column(col).iter()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.columns.num_cols()
    }

    /// Start of the logical line containing `source_pos`, for error context.
    fn offending_line_start(&self) -> usize {
        match memchr::memrchr2(b'\n', b'\r', &self.source[..self.source_pos.min(self.source.len())]) {
            Some(off) => off + 1,
            None => 0,
        }
    }

    /// End of the logical line containing `source_pos`, truncated so error
    /// context never blows up the log.
    fn offending_line_end(&self) -> usize {
        let start = self.offending_line_start();
        let line_end = match memchr::memchr2(b'\n', b'\r', &self.source[start..]) {
            Some(off) => start + off,
            None => self.source.len(),
        };
        line_end.min(start + ERROR_CONTEXT_MAX_LEN)
    }

    /// Stores the first significant (non-comment) line verbatim as the sole
    /// field of column 0. Comment lines are skipped exactly as they are by
    /// the state machine's own `START_LINE` handling, but blank lines are
    /// not: an all-whitespace line is a legitimate (if unusual) header.
    fn tokenize_header(&mut self) -> Result<(), TokenizeError> {
        let source = self.source;
        let len = source.len();
        let mut pos = self.source_pos;

        let (line, line_end) = loop {
            if pos >= len {
                self.source_pos = pos;
                return Err(TokenizeError::InvalidLine);
            }
            let line_end = match memchr::memchr2(b'\n', b'\r', &source[pos..]) {
                Some(off) => pos + off,
                None => len,
            };
            let line = &source[pos..line_end];
            if lines::is_comment_line(line, self.config.comment) {
                pos = line_end;
                if pos < len {
                    pos = match source.get(pos..pos + 2) {
                        Some(b"\r\n") => pos + 2,
                        _ => pos + 1,
                    };
                }
                continue;
            }
            break (line, line_end);
        };
        pos = line_end;
        if pos < len {
            pos = match source.get(pos..pos + 2) {
                Some(b"\r\n") => pos + 2,
                _ => pos + 1,
            };
        }

        self.columns.column_mut(0).push_field(line);
        self.num_rows = 1;
        self.source_pos = pos;
        self.state = State::StartLine;
        Ok(())
    }

    fn close_field(&mut self, col: usize, num_cols: usize, field: &[u8]) -> Result<(), TokenizeError> {
        if col >= num_cols {
            return Err(TokenizeError::TooManyCols);
        }
        self.columns.column_mut(col).push_field(field);
        Ok(())
    }

    fn end_field(
        &mut self,
        col: usize,
        num_cols: usize,
        field_buf: &mut Vec<u8>,
    ) -> Result<(), TokenizeError> {
        let mut end = field_buf.len();
        if self.config.strip_whitespace_fields {
            while end > 0 && matches!(field_buf[end - 1], b' ' | b'\t') {
                end -= 1;
            }
        }
        self.close_field(col, num_cols, &field_buf[..end])?;
        field_buf.clear();
        Ok(())
    }

    /// Completes a row: pads or rejects a short row, then advances the row
    /// counters. Returns `Ok(true)` if `end` has now been reached and the
    /// caller should stop.
    fn finish_row(
        &mut self,
        mut col: usize,
        num_cols: usize,
        rows_this_call: &mut usize,
        end: Option<usize>,
    ) -> Result<bool, TokenizeError> {
        while col < num_cols {
            if !self.config.fill_extra_cols {
                return Err(TokenizeError::NotEnoughCols);
            }
            self.close_field(col, num_cols, &[])?;
            col += 1;
        }
        self.num_rows += 1;
        *rows_this_call += 1;
        Ok(matches!(end, Some(end) if *rows_this_call >= end))
    }

    fn tokenize_rows(&mut self, end: Option<usize>, num_cols: usize) -> Result<(), TokenizeError> {
        let source = self.source;
        let len = source.len();
        let mut pos = self.source_pos;
        let mut col = 0usize;
        let mut field_start = pos;
        let mut field_buf: Vec<u8> = Vec::new();
        let mut pending: Option<u8> = None;
        // Whether `pending` holds a byte synthesized by CR/CRLF normalization
        // (not a real byte sitting at `pos`) rather than the current byte
        // being re-dispatched into a new state without having consumed it
        // yet. Only the former must permanently suppress the position
        // advance; a byte that falls through several states before finally
        // being consumed (e.g. StartLine -> StartField -> Field) still needs
        // `pos` to move past it exactly once, however many re-dispatches it
        // took.
        let mut pending_synthetic = false;
        let mut flushed_eof = false;
        let mut rows_this_call = 0usize;

        let outcome: Result<(), TokenizeError> = 'parse: loop {
            if pending.is_none() && pos >= len {
                if flushed_eof {
                    break 'parse Ok(());
                }
                flushed_eof = true;
            }

            let is_pending = pending.is_some();
            let is_synthetic = is_pending && pending_synthetic;
            let is_eof_byte = !is_pending && pos >= len;
            let byte = if is_pending {
                pending.take().unwrap()
            } else if is_eof_byte {
                b'\n'
            } else {
                source[pos]
            };

            let current = self.state.clone();
            let mut advance = true;

            match current {
                State::StartLine => {
                    if self.config.strip_whitespace_lines && (byte == b' ' || byte == b'\t') {
                        // leading line whitespace, stay in StartLine
                    } else if self.config.comment == Some(byte) {
                        self.state = State::Comment;
                    } else if byte == b'\n' {
                        // blank line
                    } else {
                        col = 0;
                        field_start = pos;
                        field_buf.clear();
                        self.state = State::StartField;
                        advance = false;
                    }
                }
                State::StartField => {
                    if self.config.strip_whitespace_fields && (byte == b' ' || byte == b'\t') {
                        // leading field whitespace, stay in StartField
                    } else if !self.config.strip_whitespace_lines && self.config.comment == Some(byte) {
                        self.state = State::Comment;
                    } else if byte == self.config.delimiter {
                        if let Err(e) = self.close_field(col, num_cols, &[]) {
                            break 'parse Err(e);
                        }
                        col += 1;
                        field_start = pos + 1;
                    } else if byte == b'\n' {
                        // A whitespace delimiter can collapse a trailing run
                        // of separators down to nothing once all `num_cols`
                        // fields have already been closed (the leading-
                        // whitespace-skip branch above consumes them without
                        // registering a field or advancing `col`). In that
                        // case the row is already complete: finish it without
                        // trying to close a field that isn't there, which
                        // would otherwise spuriously raise `TooManyCols`.
                        if col < num_cols {
                            // Preserve trailing whitespace that was skipped
                            // while looking for field content, if line
                            // stripping is off.
                            let field: &[u8] = if self.config.strip_whitespace_lines {
                                &[]
                            } else {
                                Span::new(field_start, pos.min(len)).slice(source)
                            };
                            if let Err(e) = self.close_field(col, num_cols, field) {
                                break 'parse Err(e);
                            }
                            col += 1;
                        }
                        match self.finish_row(col, num_cols, &mut rows_this_call, end) {
                            Ok(true) => {
                                if pos < len && !is_synthetic {
                                    pos += 1;
                                }
                                break 'parse Ok(());
                            }
                            Ok(false) => {}
                            Err(e) => break 'parse Err(e),
                        }
                        col = 0;
                        self.state = State::StartLine;
                    } else if byte == b'\r' {
                        self.state = State::CarriageReturn { old_state: Box::new(State::StartField) };
                    } else if byte == self.config.quote {
                        self.state = State::StartQuotedField;
                    } else {
                        if col >= num_cols {
                            break 'parse Err(TokenizeError::TooManyCols);
                        }
                        self.state = State::Field;
                        advance = false;
                    }
                }
                State::Field => {
                    if byte == self.config.delimiter {
                        if let Err(e) = self.end_field(col, num_cols, &mut field_buf) {
                            break 'parse Err(e);
                        }
                        col += 1;
                        field_start = pos + 1;
                        self.state = State::StartField;
                    } else if byte == b'\n' {
                        if let Err(e) = self.end_field(col, num_cols, &mut field_buf) {
                            break 'parse Err(e);
                        }
                        col += 1;
                        match self.finish_row(col, num_cols, &mut rows_this_call, end) {
                            Ok(true) => {
                                if pos < len && !is_synthetic {
                                    pos += 1;
                                }
                                break 'parse Ok(());
                            }
                            Ok(false) => {}
                            Err(e) => break 'parse Err(e),
                        }
                        col = 0;
                        self.state = State::StartLine;
                    } else if byte == b'\r' {
                        self.state = State::CarriageReturn { old_state: Box::new(State::Field) };
                    } else if col == 0
                        && self.config.comment == Some(byte)
                        && field_buf.iter().all(|&b| b == b' ' || b == b'\t')
                    {
                        // Reclassify as a comment line: the first column was
                        // whitespace-only up to this point. Preserved
                        // verbatim, ambiguous only for col == 0.
                        field_buf.clear();
                        self.state = State::Comment;
                    } else {
                        field_buf.push(byte);
                    }
                }
                State::StartQuotedField => {
                    if byte == self.config.quote {
                        if let Err(e) = self.end_field(col, num_cols, &mut field_buf) {
                            break 'parse Err(e);
                        }
                        col += 1;
                        field_start = pos + 1;
                        self.state = State::StartField;
                    } else {
                        self.state = State::QuotedField;
                        advance = false;
                    }
                }
                State::QuotedField => {
                    if byte == self.config.quote {
                        self.state = State::Field;
                    } else if byte == b'\n' {
                        field_buf.push(b'\n');
                        self.state = State::QuotedFieldNewline;
                    } else if byte == b'\r' {
                        self.state = State::CarriageReturn { old_state: Box::new(State::QuotedField) };
                    } else {
                        field_buf.push(byte);
                    }
                }
                State::QuotedFieldNewline => {
                    if byte == self.config.quote {
                        if let Err(e) = self.end_field(col, num_cols, &mut field_buf) {
                            break 'parse Err(e);
                        }
                        col += 1;
                        field_start = pos + 1;
                        self.state = State::StartField;
                    } else if byte == b'\r' {
                        self.state = State::CarriageReturn { old_state: Box::new(State::QuotedFieldNewline) };
                    } else {
                        self.state = State::QuotedField;
                        advance = false;
                    }
                }
                State::Comment => {
                    if byte == b'\n' {
                        self.state = State::StartLine;
                    } else if byte == b'\r' {
                        self.state = State::CarriageReturn { old_state: Box::new(State::Comment) };
                    }
                }
                State::CarriageReturn { old_state } => {
                    if !is_pending && pos < len && source[pos] == b'\n' {
                        pos += 1;
                    }
                    self.state = *old_state;
                    pending = Some(b'\n');
                    pending_synthetic = true;
                    continue 'parse;
                }
            }

            if !advance {
                pending = Some(byte);
                pending_synthetic = is_synthetic;
            } else if pos < len && !is_synthetic {
                pos += 1;
            }
        };

        self.source_pos = pos;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(tok: &Tokenizer<'_>) -> Vec<Vec<Vec<u8>>> {
        (0..tok.num_cols())
            .map(|col| tok.column(col).map(|f| f.to_vec()).collect())
            .collect::<Vec<_>>()
            .into_iter()
            .fold(vec![Vec::new(); tok.num_rows()], |mut rows, col_fields: Vec<Vec<u8>>| {
                for (r, field) in col_fields.into_iter().enumerate() {
                    rows[r].push(field);
                }
                rows
            })
    }

    fn default_config() -> TokenizerConfig {
        TokenizerConfig::builder()
            .delimiter(b',')
            .quote(b'"')
            .comment(Some(b'#'))
            .fill_extra_cols(false)
            .strip_whitespace_lines(true)
            .strip_whitespace_fields(true)
            .use_fast_converter(true)
            .build()
    }

    #[test]
    fn scenario_basic_rows() {
        let mut tok = Tokenizer::new(b"1,2,3\n4,5,6\n", default_config());
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(tok.num_rows(), 2);
        assert_eq!(
            rows(&tok),
            vec![
                vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()],
                vec![b"4".to_vec(), b"5".to_vec(), b"6".to_vec()],
            ]
        );
    }

    #[test]
    fn scenario_field_whitespace_stripped() {
        let mut tok = Tokenizer::new(b"a,  b  ,c\n", default_config());
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]]);
    }

    #[test]
    fn scenario_quoted_field_with_delimiter() {
        let mut tok = Tokenizer::new(b"\"x,y\",1,2\n", default_config());
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"x,y".to_vec(), b"1".to_vec(), b"2".to_vec()]]);
    }

    #[test]
    fn scenario_not_enough_cols_errors_without_fill() {
        let mut tok = Tokenizer::new(b"1,2\n", default_config());
        assert_eq!(tok.tokenize(None, false, 3), Err(TokenizeError::NotEnoughCols));
    }

    #[test]
    fn scenario_not_enough_cols_filled() {
        let config = TokenizerConfig::builder().fill_extra_cols(true).build();
        let mut tok = Tokenizer::new(b"1,2\n", config);
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"1".to_vec(), b"2".to_vec(), b"".to_vec()]]);
    }

    #[test]
    fn scenario_comment_line_is_skipped() {
        let mut tok = Tokenizer::new(b"# comment\n1,2,3\n", default_config());
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]]);
    }

    #[test]
    fn scenario_quoted_field_with_embedded_newline() {
        let mut tok = Tokenizer::new(b"\"a\nb\",1,2\n", default_config());
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"a\nb".to_vec(), b"1".to_vec(), b"2".to_vec()]]);
    }

    #[test]
    fn too_many_cols_is_an_error() {
        let mut tok = Tokenizer::new(b"1,2,3,4\n", default_config());
        assert_eq!(tok.tokenize(None, false, 3), Err(TokenizeError::TooManyCols));
    }

    #[test]
    fn lf_crlf_and_cr_line_endings_agree() {
        let config = default_config();
        let mut lf = Tokenizer::new(b"1,2,3\n4,5,6\n", config);
        lf.tokenize(None, false, 3).unwrap();
        let mut crlf = Tokenizer::new(b"1,2,3\r\n4,5,6\r\n", config);
        crlf.tokenize(None, false, 3).unwrap();
        let mut cr = Tokenizer::new(b"1,2,3\r4,5,6\r", config);
        cr.tokenize(None, false, 3).unwrap();
        let expected = rows(&lf);
        assert_eq!(rows(&crlf), expected);
        assert_eq!(rows(&cr), expected);
    }

    #[test]
    fn end_limits_number_of_rows_produced() {
        let mut tok = Tokenizer::new(b"1,2,3\n4,5,6\n7,8,9\n", default_config());
        tok.tokenize(Some(2), false, 3).unwrap();
        assert_eq!(tok.num_rows(), 2);
    }

    #[test]
    fn header_mode_stores_whole_line_as_one_field() {
        let mut tok = Tokenizer::new(b"a,b,c\n1,2,3\n", default_config());
        tok.tokenize(None, true, 1).unwrap();
        assert_eq!(tok.num_rows(), 1);
        assert_eq!(tok.num_cols(), 1);
        let fields: Vec<&[u8]> = tok.column(0).collect();
        assert_eq!(fields, vec![&b"a,b,c"[..]]);
    }

    #[test]
    fn header_mode_skips_leading_comment_lines() {
        let mut tok = Tokenizer::new(b"# preamble\na,b,c\n1,2,3\n", default_config());
        tok.tokenize(None, true, 1).unwrap();
        let fields: Vec<&[u8]> = tok.column(0).collect();
        assert_eq!(fields, vec![&b"a,b,c"[..]]);
    }

    #[test]
    fn header_mode_all_comments_is_invalid_line() {
        let mut tok = Tokenizer::new(b"# only comments\n# here\n", default_config());
        assert_eq!(tok.tokenize(None, true, 1), Err(TokenizeError::InvalidLine));
    }

    #[test]
    fn trailing_whitespace_backtrack_quirk_preserved() {
        let config = TokenizerConfig::builder()
            .strip_whitespace_lines(false)
            .strip_whitespace_fields(true)
            .build();
        let mut tok = Tokenizer::new(b"a,b,  \n", config);
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(
            rows(&tok),
            vec![vec![b"a".to_vec(), b"b".to_vec(), b"  ".to_vec()]]
        );
    }

    #[test]
    fn whitespace_delimiter_mode_collapses_runs_and_drops_trailing_empty() {
        let config = TokenizerConfig::builder()
            .delimiter(b' ')
            .strip_whitespace_lines(true)
            .strip_whitespace_fields(true)
            .fill_extra_cols(false)
            .build();
        let mut tok = Tokenizer::new(b"a   b   c   \n", config);
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]]);
    }

    #[test]
    fn distinct_instances_tokenize_concurrently() {
        let inputs: Vec<&'static [u8]> = vec![
            b"1,2,3\n4,5,6\n",
            b"a,b,c\nd,e,f\n",
            b"x,y,z\n",
        ];
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|input| {
                std::thread::spawn(move || {
                    let mut tok = Tokenizer::new(input, default_config());
                    tok.tokenize(None, false, 3).unwrap();
                    tok.num_rows()
                })
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn whitespace_then_comment_in_first_column_quirk() {
        let config = TokenizerConfig::builder()
            .comment(Some(b'#'))
            .strip_whitespace_fields(false)
            .strip_whitespace_lines(false)
            .build();
        let mut tok = Tokenizer::new(b"  # trailing comment\n1,2,3\n", config);
        tok.tokenize(None, false, 3).unwrap();
        assert_eq!(rows(&tok), vec![vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]]);
    }
}
