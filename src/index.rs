//! Resource index: the unit the decoder produces.

use serde::Serialize;

use crate::error::MmfwError;
use crate::names::ResourceName;
use crate::table::RawTable;

/// One extractable blob: everything the extractor needs, plus the optional
/// label.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescriptor {
    pub index:  u16,
    pub offset: u32,
    pub size:   u32,
    pub name:   Option<ResourceName>,
}

/// Ordered list of descriptors for one container. Read-only once built;
/// discarded after listing/extraction completes.
#[derive(Debug, Default, Serialize)]
pub struct ResourceIndex {
    pub resources: Vec<ResourceDescriptor>,
}

impl ResourceIndex {
    /// Combine raw table entries (and detected names) into descriptors.
    ///
    /// Standard sizes are derived from offset deltas, which requires the
    /// offsets to be non-decreasing — an underflow means the table offset or
    /// variant was misidentified and is a hard error, never clamped.
    /// Vector sizes are explicit; offsets may be non-contiguous. The
    /// sentinel entry is consumed here and does not appear in the output.
    pub fn build(table: &RawTable, names: Option<&[ResourceName]>) -> Result<Self, MmfwError> {
        let real = table.resource_count() as usize;
        let mut resources = Vec::with_capacity(real);

        for i in 0..real {
            let offset = table.offsets[i];
            let size = match table.sizes.as_ref() {
                Some(sizes) => sizes[i],
                None => table.offsets[i + 1].checked_sub(offset).ok_or_else(|| {
                    MmfwError::CorruptTable(format!(
                        "offsets not non-decreasing at entry {i}: {:#x} then {:#x}",
                        offset, table.offsets[i + 1]
                    ))
                })?,
            };
            resources.push(ResourceDescriptor {
                index: i as u16,
                offset,
                size,
                name: names.map(|n| n[i]),
            });
        }

        Ok(Self { resources })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
