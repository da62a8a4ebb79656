//! Container header detection.
//!
//! Two magic patterns are supported. The MMFW family shares a `"MMFW "`
//! prefix (the six bytes after it name the sub-kind — Pictures, Blobs,
//! Sounds, Films, Scripts — which is cosmetic) followed by a `NUL,'M','M'`
//! marker at 0x0F. Vector files carry the full literal
//! `"Vector File Version 1.0"` and keep their resource table at a fixed
//! position.

use std::borrow::Cow;
use std::io::Read;

use crate::error::MmfwError;
use crate::known::SIGNATURE_POS;
use crate::wire::be_u16;

/// Bytes consumed for detection. Covers every fixed header field.
pub const HEADER_LEN: usize = 26;

pub const MAGIC_MMFW: &[u8; 5] = b"MMFW ";
pub const MAGIC_VECTOR: &[u8; 23] = b"Vector File Version 1.0";

const SUBKIND_POS: usize = 0x0F;
const SUBKIND_MARKER: &[u8; 3] = &[0x00, b'M', b'M'];
const VERSION_POS: usize = 0x12;

/// Container layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// MMFW Pictures/Blobs/Sounds/Films/Scripts: size-less offset table.
    Standard,
    /// Vector File: interleaved explicit sizes, fixed table position.
    Vector,
}

impl Variant {
    /// Vector files ignore any caller-supplied table offset.
    pub fn forced_table_offset(self) -> Option<u32> {
        match self {
            Variant::Standard => None,
            Variant::Vector => Some(0x17),
        }
    }
}

/// Parsed fixed header. Immutable once read.
#[derive(Debug, Clone)]
pub struct ContainerHeader {
    pub variant: Variant,
    pub raw:     [u8; HEADER_LEN],
    /// Format version at 0x12. For Vector files this position lands inside
    /// the magic text; the value is read regardless, as shipped decoders do.
    pub version: u16,
}

impl ContainerHeader {
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, MmfwError> {
        let mut raw = [0u8; HEADER_LEN];
        reader.read_exact(&mut raw)?;

        let variant = if raw.starts_with(MAGIC_MMFW)
            && &raw[SUBKIND_POS..SUBKIND_POS + SUBKIND_MARKER.len()] == SUBKIND_MARKER
        {
            Variant::Standard
        } else if raw.starts_with(MAGIC_VECTOR) {
            Variant::Vector
        } else {
            return Err(MmfwError::UnrecognizedFormat);
        };

        let version = be_u16(&raw[VERSION_POS..]);
        Ok(Self { variant, raw, version })
    }

    /// 6-byte known-title signature at 0x14.
    pub fn signature(&self) -> [u8; 6] {
        let mut sig = [0u8; 6];
        sig.copy_from_slice(&self.raw[SIGNATURE_POS..SIGNATURE_POS + 6]);
        sig
    }

    /// Header text for display ("MMFW Pictures", "MMFW Sounds", ...).
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.variant {
            Variant::Vector => Cow::Borrowed("Vector File Version 1.0"),
            Variant::Standard => {
                let end = self.raw.iter().position(|&b| b == 0).unwrap_or(HEADER_LEN);
                String::from_utf8_lossy(&self.raw[..end])
            }
        }
    }
}
