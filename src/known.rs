//! Known-title registry: frozen 6-byte signatures → table layout shortcuts.
//!
//! # Identity rules
//! Every shipped title carries a 6-byte fingerprint at [`SIGNATURE_POS`],
//! immediately after the generic header. Matching is an exact byte
//! comparison; the set contains no duplicates. An unknown signature is
//! expected, not an error — unrecognised builds fall back to a
//! caller-supplied or default table offset.
//!
//! A registry hit is authoritative: its `table_offset` and `extension`
//! override whatever the caller passed.

/// Byte position of the signature within the file.
pub const SIGNATURE_POS: usize = 0x14;

/// Layout shortcut for one known shipped title.
#[derive(Debug, Clone, Copy)]
pub struct KnownFormat {
    pub signature:    [u8; 6],
    /// Title/build the signature was sampled from.
    pub title:        &'static str,
    /// File offset of the 16-bit resource count.
    pub table_offset: u32,
    /// Advisory only — name presence is always decided by the gap heuristic.
    pub name_hint:    bool,
    /// Suggested extension for dumped resources.
    pub extension:    &'static str,
}

pub const KNOWN_FORMATS: &[KnownFormat] = &[
    KnownFormat {
        signature:    [0x00, 0x00, 0x1E, 0x49, 0x35, 0xCD],
        title:        "Lmps.pic",
        table_offset: 0x1A,
        name_hint:    true,
        extension:    ".bin",
    },
    KnownFormat {
        signature:    [0x45, 0x02, 0x9D, 0x88, 0x00, 0x65],
        title:        "TarzanPI.mmp",
        table_offset: 0x22,
        name_hint:    true,
        extension:    ".bin",
    },
    KnownFormat {
        signature:    [0x3D, 0x98, 0x27, 0x2B, 0x00, 0x65],
        title:        "ToyStory2PI.MMB",
        table_offset: 0x22,
        name_hint:    true,
        extension:    ".bin",
    },
    KnownFormat {
        signature:    [0xB3, 0x3B, 0x6F, 0xF6, 0x00, 0x00],
        title:        "Bugs.mmp",
        table_offset: 0x22,
        name_hint:    true,
        extension:    ".bin",
    },
    KnownFormat {
        signature:    [0x40, 0x00, 0x20, 0xFC, 0x9D, 0x12],
        title:        "MUpsIntS.SND",
        table_offset: 0x1A,
        name_hint:    true,
        extension:    ".bin",
    },
    KnownFormat {
        signature:    [0x53, 0xAC, 0xA9, 0x9A, 0x00, 0x01],
        title:        "Bugsai.mms",
        table_offset: 0x22,
        name_hint:    false,
        extension:    ".bin",
    },
    KnownFormat {
        signature:    [0x31, 0x2E, 0x30, 0x00, 0xFA, 0x00],
        title:        "MUpsVec.VEC",
        table_offset: 0x17,
        name_hint:    false,
        extension:    ".cgm",
    },
];

/// Exact-match lookup. Returns `None` for unrecognised builds.
pub fn lookup(signature: &[u8; 6]) -> Option<&'static KnownFormat> {
    KNOWN_FORMATS.iter().find(|k| &k.signature == signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hits_registered_signature() {
        let k = lookup(&[0x00, 0x00, 0x1E, 0x49, 0x35, 0xCD]).unwrap();
        assert_eq!(k.title, "Lmps.pic");
        assert_eq!(k.table_offset, 0x1A);
        assert_eq!(k.extension, ".bin");
    }

    #[test]
    fn lookup_misses_unknown_signature() {
        assert!(lookup(&[0xAA; 6]).is_none());
    }

    #[test]
    fn signatures_are_unique() {
        for (i, a) in KNOWN_FORMATS.iter().enumerate() {
            for b in &KNOWN_FORMATS[i + 1..] {
                assert_ne!(a.signature, b.signature, "{} duplicates {}", a.title, b.title);
            }
        }
    }
}
