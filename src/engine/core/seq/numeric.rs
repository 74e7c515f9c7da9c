use serde::Serialize;
use std::any::Any;
use tracing::trace;

use crate::engine::core::row::format::{
    APPENDS_PREFIX, NUMERIC_TYPE, NumericValue, QualifierHeader, decode_value, parse_qualifier,
};
use crate::engine::core::seq::row_seq::{RowSeq, sort_and_dedupe};
use crate::engine::errors::RowSeqError;
use crate::shared::time::{NANOS_PER_SECOND, TimeResolution};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericPoint {
    /// Offset from the row base timestamp
    pub offset_nanos: u64,
    pub value: NumericValue,
    #[serde(skip)]
    pub resolution: TimeResolution,
}

/// Raw numeric fragment for one row.
///
/// Accepts single-point columns, compacted columns (several qualifiers packed
/// into one) and appended batches.
#[derive(Debug, Clone)]
pub struct NumericRowSeq {
    base_timestamp: u64,
    points: Vec<NumericPoint>,
    duplicates: usize,
    resolved: Option<TimeResolution>,
}

impl NumericRowSeq {
    pub fn new(base_timestamp: u64) -> Self {
        Self {
            base_timestamp,
            points: Vec::new(),
            duplicates: 0,
            resolved: None,
        }
    }

    pub fn points(&self) -> &[NumericPoint] {
        &self.points
    }

    /// Points as (epoch nanos, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u64, NumericValue)> + '_ {
        let base = self.base_timestamp * NANOS_PER_SECOND;
        self.points.iter().map(move |p| (base + p.offset_nanos, p.value))
    }

    /// Points dropped by dedupe.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    fn push(&mut self, header: &QualifierHeader, value: &[u8]) -> Result<(), RowSeqError> {
        let value = decode_value(header, value)?;
        self.points.push(NumericPoint {
            offset_nanos: header.offset_nanos,
            value,
            resolution: header.resolution,
        });
        Ok(())
    }

    fn add_compacted(&mut self, qualifier: &[u8], value: &[u8]) -> Result<(), RowSeqError> {
        let mut q = 0;
        let mut v = 0;
        while q < qualifier.len() {
            let header = parse_qualifier(&qualifier[q..])?;
            q += header.width;
            let end = v + header.value_len();
            if end > value.len() {
                return Err(RowSeqError::TruncatedValue {
                    needed: end,
                    available: value.len(),
                });
            }
            self.push(&header, &value[v..end])?;
            v = end;
        }

        // Compacted columns may end with a single meta byte.
        let trailing = value.len() - v;
        if trailing > 1 {
            return Err(RowSeqError::TrailingBytes(trailing));
        }
        Ok(())
    }

    fn add_appends(&mut self, value: &[u8]) -> Result<(), RowSeqError> {
        let mut pos = 0;
        while pos < value.len() {
            let header = parse_qualifier(&value[pos..])?;
            pos += header.width;
            let end = pos + header.value_len();
            if end > value.len() {
                return Err(RowSeqError::TruncatedValue {
                    needed: end,
                    available: value.len(),
                });
            }
            self.push(&header, &value[pos..end])?;
            pos = end;
        }
        Ok(())
    }
}

impl RowSeq for NumericRowSeq {
    fn data_type(&self) -> u8 {
        NUMERIC_TYPE
    }

    fn base_timestamp(&self) -> u64 {
        self.base_timestamp
    }

    fn add_column(
        &mut self,
        prefix: u8,
        qualifier: &[u8],
        value: &[u8],
    ) -> Result<(), RowSeqError> {
        if self.resolved.is_some() {
            return Err(RowSeqError::Finalized);
        }
        if prefix == APPENDS_PREFIX {
            self.add_appends(value)
        } else {
            self.add_compacted(qualifier, value)
        }
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
            sort_and_dedupe(&mut self.points, |p| p.offset_nanos, keep_earliest, reversed);
        let resolution = self
            .points
            .iter()
            .map(|p| p.resolution)
            .max()
            .unwrap_or_default();

        if self.duplicates > 0 && tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                target: "tsdb::seq::numeric",
                base_timestamp = self.base_timestamp,
                duplicates = self.duplicates,
                keep_earliest,
                "Resolved duplicate numeric timestamps"
            );
        }

        self.resolved = Some(resolution);
        Ok(resolution)
    }

    fn size(&self) -> usize {
        self.points.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
