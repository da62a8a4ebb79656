//! Container reader — the orchestration layer, plus extraction.
//!
//! # Decoding chain
//! Each step feeds the next: magic → variant → table offset (registry hit
//! or fallback) → offset table → gap-based name detection → per-resource
//! size derivation. A misjudged step compounds silently, so the index is
//! built completely, and validated, before a single resource byte is
//! extracted.
//!
//! # Table offset precedence
//! 1. A registry hit on the 6-byte signature is authoritative.
//! 2. Vector files force 0x17.
//! 3. A caller-supplied override.
//! 4. The 0x22 default.
//!
//! # Resource model
//! Strictly single-threaded, blocking, one linear pass over one seekable
//! file. Any read or seek failure aborts the whole operation.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::MmfwError;
use crate::header::ContainerHeader;
use crate::index::{ResourceDescriptor, ResourceIndex};
use crate::known::{self, KnownFormat};
use crate::names;
use crate::table::{RawTable, DEFAULT_TABLE_OFFSET};

/// Copy granularity for extraction.
const BLOCK_SIZE: usize = 4096;

/// Extension used when the registry has no better suggestion.
pub const DEFAULT_EXTENSION: &str = ".bin";

#[derive(Debug)]
pub struct MmfwReader<R: Read + Seek> {
    reader:           R,
    pub header:       ContainerHeader,
    /// Registry entry the signature matched, if any.
    pub known:        Option<&'static KnownFormat>,
    /// Effective table offset after precedence resolution.
    pub table_offset: u32,
    pub has_names:    bool,
    pub index:        ResourceIndex,
}

impl MmfwReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MmfwError> {
        Self::with_table_offset(File::open(path)?, None)
    }
}

impl<R: Read + Seek> MmfwReader<R> {
    pub fn new(reader: R) -> Result<Self, MmfwError> {
        Self::with_table_offset(reader, None)
    }

    /// Open a container, optionally overriding the fallback table offset.
    ///
    /// The override applies only when the signature is not in the registry
    /// and the file is not a Vector file (see module docs for precedence).
    pub fn with_table_offset(mut reader: R, override_offset: Option<u32>) -> Result<Self, MmfwError> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = ContainerHeader::read(&mut reader)?;

        let mut table_offset = override_offset.unwrap_or(DEFAULT_TABLE_OFFSET);
        if let Some(forced) = header.variant.forced_table_offset() {
            table_offset = forced;
        }
        let known = known::lookup(&header.signature());
        if let Some(entry) = known {
            table_offset = entry.table_offset;
        }

        let table = RawTable::read(&mut reader, table_offset, header.variant, file_len)?;

        let names = if names::table_present(table.offsets[0], table.end_pos, table.entry_count) {
            Some(names::read_names(&mut reader, table.entry_count, file_len)?)
        } else {
            None
        };
        let has_names = names.is_some();

        let index = ResourceIndex::build(&table, names.as_deref())?;

        Ok(Self { reader, header, known, table_offset, has_names, index })
    }

    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.index.resources
    }

    /// Output extension suggested by the registry, or `".bin"`.
    pub fn extension(&self) -> &'static str {
        self.known.map_or(DEFAULT_EXTENSION, |k| k.extension)
    }

    /// Copy exactly `desc.size` bytes starting at `desc.offset` into `out`.
    ///
    /// The source cursor is restored afterwards so callers can keep
    /// enumerating resources sequentially.
    pub fn extract<W: Write>(&mut self, desc: &ResourceDescriptor, out: &mut W) -> Result<(), MmfwError> {
        let saved = self.reader.stream_position()?;
        self.reader.seek(SeekFrom::Start(u64::from(desc.offset)))?;

        let mut buf = [0u8; BLOCK_SIZE];
        let mut left = desc.size as usize;
        while left > 0 {
            let n = left.min(BLOCK_SIZE);
            self.reader.read_exact(&mut buf[..n])?;
            out.write_all(&buf[..n])?;
            left -= n;
        }

        self.reader.seek(SeekFrom::Start(saved))?;
        Ok(())
    }

    /// Consume the reader, returning the inner stream.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
