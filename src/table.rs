//! Resource table decoding.
//!
//! The table starts with a big-endian u16 count, followed by that many + 1
//! entries: the trailing entry is an end-of-data sentinel whose offset only
//! ever sizes the last real resource. Standard entries are a lone u32
//! offset; Vector entries interleave a u32 offset with a u32 size.
//!
//! Counts are validated against the file size before any buffer is
//! allocated — the count field is attacker-controlled.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::MmfwError;
use crate::header::Variant;

/// Fallback table offset for unrecognised Standard files.
pub const DEFAULT_TABLE_OFFSET: u32 = 0x22;

/// The one known layout with no reserved bytes after the table.
pub const UNPADDED_TABLE_OFFSET: u32 = 0x1A;

/// Offset (and size) entries as read from disk, sentinel included.
#[derive(Debug)]
pub struct RawTable {
    /// On-disk count + 1 (the trailing EOF sentinel entry).
    pub entry_count: u32,
    pub offsets:     Vec<u32>,
    /// Explicit sizes; present for the Vector variant only.
    pub sizes:       Option<Vec<u32>>,
    /// Stream position immediately after the table and padding skip — the
    /// start of the region the name heuristic measures.
    pub end_pos:     u64,
}

impl RawTable {
    pub fn read<R: Read + Seek>(
        reader: &mut R,
        table_offset: u32,
        variant: Variant,
        file_len: u64,
    ) -> Result<Self, MmfwError> {
        reader.seek(SeekFrom::Start(u64::from(table_offset)))?;

        let declared = reader.read_u16::<BigEndian>()?;
        if declared == 0 {
            return Err(MmfwError::NoResources);
        }
        let entry_count = u32::from(declared) + 1;

        let entry_size: u64 = match variant {
            Variant::Standard => 4,
            Variant::Vector => 8,
        };
        let table_bytes = u64::from(entry_count) * entry_size;
        let available = file_len.saturating_sub(u64::from(table_offset) + 2);
        if table_bytes > available {
            return Err(MmfwError::CorruptTable(format!(
                "count {declared} needs {table_bytes} table bytes but only {available} remain"
            )));
        }

        let mut offsets = Vec::with_capacity(entry_count as usize);
        let mut sizes = match variant {
            Variant::Vector => Some(Vec::with_capacity(entry_count as usize)),
            Variant::Standard => None,
        };
        for _ in 0..entry_count {
            offsets.push(reader.read_u32::<BigEndian>()?);
            if let Some(sizes) = sizes.as_mut() {
                sizes.push(reader.read_u32::<BigEndian>()?);
            }
        }

        // Every layout except the 0x1A one carries two reserved bytes here.
        if table_offset != UNPADDED_TABLE_OFFSET {
            reader.seek(SeekFrom::Current(2))?;
        }
        let end_pos = reader.stream_position()?;

        Ok(Self { entry_count, offsets, sizes, end_pos })
    }

    /// Number of real resources (sentinel excluded).
    pub fn resource_count(&self) -> u32 {
        self.entry_count - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::{Cursor, Write};

    fn table_at(offset: u32, entries: &[u8], tail: usize) -> Cursor<Vec<u8>> {
        let mut buf = vec![0u8; offset as usize];
        buf.extend_from_slice(entries);
        buf.extend(std::iter::repeat(0).take(tail));
        Cursor::new(buf)
    }

    fn standard_entries(count: u16, offsets: &[u32]) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u16::<BigEndian>(count).unwrap();
        for &o in offsets {
            out.write_u32::<BigEndian>(o).unwrap();
        }
        out.write_all(&[0, 0]).unwrap(); // reserved
        out
    }

    #[test]
    fn reads_standard_table_and_skips_padding() {
        let entries = standard_entries(3, &[100, 150, 200, 250]);
        let mut cur = table_at(0x22, &entries, 256);
        let file_len = cur.get_ref().len() as u64;

        let table = RawTable::read(&mut cur, 0x22, Variant::Standard, file_len).unwrap();
        assert_eq!(table.entry_count, 4);
        assert_eq!(table.resource_count(), 3);
        assert_eq!(table.offsets, vec![100, 150, 200, 250]);
        assert!(table.sizes.is_none());
        // 0x22 + count(2) + 4 offsets(16) + reserved(2)
        assert_eq!(table.end_pos, 0x22 + 2 + 16 + 2);
    }

    #[test]
    fn table_at_0x1a_has_no_padding() {
        let mut entries = Vec::new();
        entries.write_u16::<BigEndian>(1).unwrap();
        entries.write_u32::<BigEndian>(40).unwrap();
        entries.write_u32::<BigEndian>(50).unwrap();
        let mut cur = table_at(0x1A, &entries, 64);
        let file_len = cur.get_ref().len() as u64;

        let table = RawTable::read(&mut cur, 0x1A, Variant::Standard, file_len).unwrap();
        assert_eq!(table.end_pos, 0x1A + 2 + 8);
    }

    #[test]
    fn reads_vector_table_interleaved() {
        let mut entries = Vec::new();
        entries.write_u16::<BigEndian>(2).unwrap();
        for &(o, s) in &[(60u32, 10u32), (100, 20), (140, 0)] {
            entries.write_u32::<BigEndian>(o).unwrap();
            entries.write_u32::<BigEndian>(s).unwrap();
        }
        entries.extend_from_slice(&[0, 0]);
        let mut cur = table_at(0x17, &entries, 256);
        let file_len = cur.get_ref().len() as u64;

        let table = RawTable::read(&mut cur, 0x17, Variant::Vector, file_len).unwrap();
        assert_eq!(table.offsets, vec![60, 100, 140]);
        assert_eq!(table.sizes, Some(vec![10, 20, 0]));
        assert_eq!(table.end_pos, 0x17 + 2 + 24 + 2);
    }

    #[test]
    fn zero_count_is_no_resources() {
        let entries = standard_entries(0, &[]);
        let mut cur = table_at(0x22, &entries, 0);
        let file_len = cur.get_ref().len() as u64;

        let err = RawTable::read(&mut cur, 0x22, Variant::Standard, file_len).unwrap_err();
        assert!(matches!(err, MmfwError::NoResources));
    }

    #[test]
    fn implausible_count_is_rejected_before_reading() {
        let mut entries = Vec::new();
        entries.write_u16::<BigEndian>(0xFFF0).unwrap();
        let mut cur = table_at(0x22, &entries, 64);
        let file_len = cur.get_ref().len() as u64;

        let err = RawTable::read(&mut cur, 0x22, Variant::Standard, file_len).unwrap_err();
        assert!(matches!(err, MmfwError::CorruptTable(_)));
    }
}
