use bytes::Bytes;
use std::any::Any;

use crate::engine::core::row::format::parse_typed_offset;
use crate::engine::core::seq::row_seq::{RowSeq, sort_and_dedupe};
use crate::engine::errors::RowSeqError;
use crate::shared::time::{NANOS_PER_SECOND, TimeResolution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    pub offset_nanos: u64,
    pub resolution: TimeResolution,
    pub payload: Bytes,
}

/// Fragment for an extension type whose payloads stay opaque.
///
/// Qualifiers are the type tag followed by a 2, 4 or 8 byte offset in
/// seconds, milliseconds or nanoseconds.
#[derive(Debug, Clone)]
pub struct BlobRowSeq {
    tag: u8,
    base_timestamp: u64,
    entries: Vec<BlobEntry>,
    duplicates: usize,
    resolved: Option<TimeResolution>,
}

impl BlobRowSeq {
    pub fn new(tag: u8, base_timestamp: u64) -> Self {
        Self {
            tag,
            base_timestamp,
            entries: Vec::new(),
            duplicates: 0,
            resolved: None,
        }
    }

    pub fn entries(&self) -> &[BlobEntry] {
        &self.entries
    }

    /// Entries as (epoch nanos, payload) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Bytes)> + '_ {
        let base = self.base_timestamp * NANOS_PER_SECOND;
        self.entries
            .iter()
            .map(move |e| (base + e.offset_nanos, &e.payload))
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl RowSeq for BlobRowSeq {
    fn data_type(&self) -> u8 {
        self.tag
    }

    fn base_timestamp(&self) -> u64 {
        self.base_timestamp
    }

    fn add_column(
        &mut self,
        _prefix: u8,
        qualifier: &[u8],
        value: &[u8],
    ) -> Result<(), RowSeqError> {
        if self.resolved.is_some() {
            return Err(RowSeqError::Finalized);
        }
        let (&tag, offset) = qualifier
            .split_first()
            .ok_or(RowSeqError::EmptyQualifier)?;
        if tag != self.tag {
            return Err(RowSeqError::MalformedQualifier(format!(
                "type {} column routed to type {} fragment",
                tag, self.tag
            )));
        }
        let (offset_nanos, resolution) = parse_typed_offset(offset)?;
        self.entries.push(BlobEntry {
            offset_nanos,
            resolution,
            payload: Bytes::copy_from_slice(value),
        });
        Ok(())
    }

    fn dedupe(
        &mut self,
        keep_earliest: bool,
        reversed: bool,
    ) -> Result<TimeResolution, RowSeqError> {
        if let Some(resolution) = self.resolved {
            return Ok(resolution);
        }
        self.duplicates =
            sort_and_dedupe(&mut self.entries, |e| e.offset_nanos, keep_earliest, reversed);
        let resolution = self
            .entries
            .iter()
            .map(|e| e.resolution)
            .max()
            .unwrap_or_default();
        self.resolved = Some(resolution);
        Ok(resolution)
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
