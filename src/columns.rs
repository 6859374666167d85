// Copyright (C) Tab Tokenizer Contributors. All rights reserved.
//
// This file is part of tab-tokenizer, distributed under the MIT license. For
// the full terms, see the included LICENSE file.

//! Columnar field storage.
//!
//! Each column is a single growable byte buffer in which fields are packed
//! back to back, separated by a `0x00` terminator. An empty field is encoded
//! as the two-byte sequence `0x01 0x00` so that it can be told apart from the
//! zero-length "nothing here yet" state of a freshly allocated buffer. This
//! mirrors the sentinel-delimited layout of the reference tokenizer this
//! crate is based on, which fuses storage and index to avoid a secondary
//! offset table per field.

/// Initial backing capacity for a column buffer, matching the reference
/// implementation's constant. Large enough to hold a handful of short fields
/// without reallocating.
const INITIAL_COLUMN_CAPACITY: usize = 50;

const EMPTY_FIELD_MARKER: u8 = 0x01;
const FIELD_TERMINATOR: u8 = 0x00;

/// A single column's backing storage.
#[derive(Debug, Default)]
pub(crate) struct Column {
    buf: Vec<u8>,
}

impl Column {
    #[inline]
    fn new() -> Self {
        Column {
            buf: Vec::with_capacity(INITIAL_COLUMN_CAPACITY),
        }
    }

    /// Closes the field accumulated so far by writing its terminator,
    /// encoding an empty field as `0x01 0x00`.
    ///
    /// This is the single entry point the tokenizer uses to end a field, so
    /// that the empty-field marker and the terminator can never be written
    /// out of step with each other.
    #[inline]
    pub(crate) fn push_field(&mut self, field: &[u8]) {
        if field.is_empty() {
            self.buf.push(EMPTY_FIELD_MARKER);
        } else {
            let had_capacity = self.buf.capacity() - self.buf.len() >= field.len() + 1;
            self.buf.extend_from_slice(field);
            if !had_capacity {
                log::trace!(
                    "column buffer grew past initial capacity to {}",
                    self.buf.capacity()
                );
            }
        }
        self.buf.push(FIELD_TERMINATOR);
    }

    /// Returns an iterator over the fields stored in this column, in the
    /// order they were pushed.
    #[inline]
    pub(crate) fn iter(&self) -> FieldIter<'_> {
        FieldIter { buf: &self.buf, pos: 0 }
    }
}

/// A store of `num_cols` columns, each independently growable.
#[derive(Debug, Default)]
pub(crate) struct ColumnStore {
    columns: Vec<Column>,
}

impl ColumnStore {
    #[inline]
    pub(crate) fn new() -> Self {
        ColumnStore { columns: Vec::new() }
    }

    /// Discards any previous column buffers and allocates `num_cols` fresh
    /// columns.
    pub(crate) fn reset(&mut self, num_cols: usize) {
        self.columns.clear();
        self.columns.resize_with(num_cols, Column::new);
    }

    #[inline(always)]
    pub(crate) fn num_cols(&self) -> usize {
        self.columns.len()
    }

    #[inline(always)]
    pub(crate) fn column_mut(&mut self, col: usize) -> &mut Column {
        &mut self.columns[col]
    }

    #[inline(always)]
    pub(crate) fn column(&self, col: usize) -> &Column {
        &self.columns[col]
    }
}

/// An iterator over the fields in a single [`Column`].
///
/// Iteration ends when the cursor has walked off the buffer. Each call scans
/// to the next `0x00` terminator; a leading `0x01` marks the field as empty.
pub struct FieldIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.buf.len() {
            return None;
        }
        if self.buf[self.pos] == EMPTY_FIELD_MARKER {
            self.pos += 2; // marker byte + terminator
            return Some(&[][..]);
        }
        let rest = &self.buf[self.pos..];
        let term = memchr::memchr(FIELD_TERMINATOR, rest)
            .expect("column buffer invariant violated: field without terminator");
        let field = &rest[..term];
        self.pos += term + 1;
        Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_field_round_trip() {
        let mut col = Column::new();
        col.push_field(b"a");
        col.push_field(b"");
        col.push_field(b"bcd");
        let fields: Vec<&[u8]> = col.iter().collect();
        assert_eq!(fields, vec![&b"a"[..], &b""[..], &b"bcd"[..]]);
    }

    #[test]
    fn empty_field_is_not_confused_with_missing_field() {
        let mut col = Column::new();
        col.push_field(b"");
        col.push_field(b"");
        assert_eq!(col.iter().count(), 2);
    }

    #[test]
    fn store_reset_discards_previous_columns() {
        let mut store = ColumnStore::new();
        store.reset(2);
        store.column_mut(0).push_field(b"x");
        store.reset(3);
        assert_eq!(store.num_cols(), 3);
        assert_eq!(store.column(0).iter().count(), 0);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut col = Column::new();
        let long = vec![b'z'; INITIAL_COLUMN_CAPACITY * 3];
        col.push_field(&long);
        let fields: Vec<&[u8]> = col.iter().collect();
        assert_eq!(fields, vec![&long[..]]);
    }
}
