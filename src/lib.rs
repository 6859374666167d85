//! A fast byte-driven tokenizer for delimited tabular text (CSV-like, with
//! configurable delimiter, quote, and comment bytes).
//!
//! This crate owns the hard part of reading such data: a state machine that
//! handles quoting, escaping, embedded newlines, comment lines, mixed line
//! terminators, and whitespace stripping, plus a columnar store for the
//! resulting fields and a pair of locale-independent numeric converters.
//! Column-type inference, text decoding, and file I/O orchestration are left
//! to the caller.

mod columns;
mod lines;
pub mod numeric;
#[cfg(feature = "mmap")]
pub mod source;
mod span;
mod tokenizer;

pub use columns::FieldIter;
pub use tokenizer::{Tokenizer, TokenizeError, TokenizerConfig, TokenizerConfigBuilder};
