use serde::Serialize;
use std::any::Any;

use crate::engine::core::row::format::{
    FLAGS_MASK, NUMERIC_TYPE, NumericValue, QualifierHeader, SECOND_QUALIFIER_WIDTH,
    decode_value,
};
use crate::engine::core::seq::row_seq::{RowSeq, sort_and_dedupe};
use crate::engine::errors::RowSeqError;
use crate::engine::rollup::RollupInterval;
use crate::shared::time::{NANOS_PER_SECOND, TimeResolution};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryPoint {
    /// Offset from the row base timestamp
    pub offset_seconds: u64,
    pub aggregator: u8,
    pub value: NumericValue,
}

/// Rollup fragment for one row: aggregated values keyed by slot and
/// aggregator id.
#[derive(Debug, Clone)]
pub struct NumericSummaryRowSeq {
    base_timestamp: u64,
    interval: RollupInterval,
    points: Vec<SummaryPoint>,
    duplicates: usize,
    resolved: Option<TimeResolution>,
}

impl NumericSummaryRowSeq {
    pub fn new(base_timestamp: u64, interval: RollupInterval) -> Self {
        Self {
            base_timestamp,
            interval,
            points: Vec::new(),
            duplicates: 0,
            resolved: None,
        }
    }

    pub fn interval(&self) -> &RollupInterval {
        &self.interval
    }

    pub fn points(&self) -> &[SummaryPoint] {
        &self.points
    }

    /// Values of one aggregator as (epoch seconds, value) pairs.
    pub fn aggregator_values(&self, aggregator: u8) -> Vec<(u64, NumericValue)> {
        self.points
            .iter()
            .filter(|p| p.aggregator == aggregator)
            .map(|p| (self.base_timestamp + p.offset_seconds, p.value))
            .collect()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl RowSeq for NumericSummaryRowSeq {
    fn data_type(&self) -> u8 {
        NUMERIC_TYPE
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
        let (&aggregator, offsets) = qualifier
            .split_first()
            .ok_or(RowSeqError::EmptyQualifier)?;
        if offsets.is_empty() || offsets.len() % SECOND_QUALIFIER_WIDTH != 0 {
            return Err(RowSeqError::MalformedQualifier(format!(
                "rollup qualifier needs an aggregator byte and 2 byte offsets, got {} bytes",
                qualifier.len()
            )));
        }

        let slots = self.interval.intervals_per_row();
        let mut v = 0;
        for raw in offsets.chunks_exact(SECOND_QUALIFIER_WIDTH) {
            let raw = u16::from_be_bytes([raw[0], raw[1]]);
            let slot = (raw >> 4) as u64;
            if slot >= slots {
                return Err(RowSeqError::OffsetOutOfRange {
                    offset: slot,
                    max: slots.saturating_sub(1),
                });
            }
            let offset_seconds = slot * self.interval.interval_seconds;
            let header = QualifierHeader {
                offset_nanos: offset_seconds * NANOS_PER_SECOND,
                resolution: TimeResolution::Seconds,
                flags: (raw as u8) & FLAGS_MASK,
                width: SECOND_QUALIFIER_WIDTH,
            };
            let end = v + header.value_len();
            if end > value.len() {
                return Err(RowSeqError::TruncatedValue {
                    needed: end,
                    available: value.len(),
                });
            }
            self.points.push(SummaryPoint {
                offset_seconds,
                aggregator,
                value: decode_value(&header, &value[v..end])?,
            });
            v = end;
        }

        let trailing = value.len() - v;
        if trailing > 1 {
            return Err(RowSeqError::TrailingBytes(trailing));
        }
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
        self.duplicates = sort_and_dedupe(
            &mut self.points,
            |p| (p.offset_seconds, p.aggregator),
            keep_earliest,
            reversed,
        );
        // Slots are whole seconds wide.
        self.resolved = Some(TimeResolution::Seconds);
        Ok(TimeResolution::Seconds)
    }

    fn size(&self) -> usize {
        self.points.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
