//! A memory-mapped file as a [`Tokenizer`](crate::Tokenizer) source.
//!
//! Gated behind the `mmap` feature, since mapping a file is a platform
//! concern the core state machine has no need of on its own.

use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;

/// A read-only memory mapping of a file, exposed as a borrowable byte slice.
///
/// The mapping is released when this value is dropped; `memmap2` handles the
/// platform-specific unmapping uniformly, so there is nothing else to clean
/// up here.
pub struct MappedSource {
    mmap: Mmap,
}

impl MappedSource {
    /// Opens `path` and maps its contents read-only.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        // Safety: the mapping is invalidated if the backing file is modified
        // or truncated out from under it; that hazard is inherent to file
        // mappings and is the caller's to avoid, not something this wrapper
        // can check for.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(MappedSource { mmap })
    }

    /// Returns the mapped bytes, suitable as the `source` argument to
    /// [`Tokenizer::new`](crate::Tokenizer::new) or
    /// [`Tokenizer::set_source`](crate::Tokenizer::set_source).
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }
}
