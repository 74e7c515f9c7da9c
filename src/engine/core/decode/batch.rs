use rayon::prelude::*;
use tracing::info;

use crate::engine::core::decode::decoder::{DecodeOutcome, RowDecoder};
use crate::engine::core::row::Row;
use crate::engine::core::sink::FragmentSink;
use crate::engine::errors::DecodeError;
use crate::engine::rollup::RollupInterval;

/// Decodes the rows of one scan in parallel into a shared sink.
pub struct RowBatchDecoder<'a> {
    decoder: RowDecoder<'a>,
}

impl<'a> RowBatchDecoder<'a> {
    pub fn new(decoder: RowDecoder<'a>) -> Self {
        Self { decoder }
    }

    /// Stops at the first failing row; fragments of rows decoded before the
    /// failure stay in the sink.
    pub fn decode_all(
        &self,
        rows: &[Row],
        interval: Option<&RollupInterval>,
        sink: &dyn FragmentSink,
    ) -> Result<DecodeOutcome, DecodeError> {
        let outcome = rows
            .par_iter()
            .map(|row| self.decoder.decode(row, interval, sink))
            .try_reduce(DecodeOutcome::default, |a, b| Ok(a.merge(b)))?;

        if tracing::enabled!(tracing::Level::INFO) {
            info!(
                target: "tsdb::decode::batch",
                rows = rows.len(),
                columns = outcome.columns,
                fragments = outcome.fragments,
                filtered = outcome.filtered,
                unsupported = outcome.unsupported,
                rollup = interval.map(|i| i.name.as_str()),
                "Decoded row batch"
            );
        }
        Ok(outcome)
    }
}
