use bytes::Bytes;
use tracing::trace;

use crate::engine::core::decode::decoder::DecodeOptions;
use crate::engine::core::decode::router::PendingFragment;
use crate::engine::core::sink::FragmentSink;
use crate::engine::errors::DecodeError;

/// Resolves each fragment of a row and hands it to the sink.
pub struct Finalizer<'a> {
    series_hash: u64,
    row_key: &'a Bytes,
    options: DecodeOptions,
    sink: &'a dyn FragmentSink,
}

impl<'a> Finalizer<'a> {
    pub fn new(
        series_hash: u64,
        row_key: &'a Bytes,
        options: DecodeOptions,
        sink: &'a dyn FragmentSink,
    ) -> Self {
        Self {
            series_hash,
            row_key,
            options,
            sink,
        }
    }

    /// Returns the number of fragments registered. Fragments that never
    /// received a column are skipped.
    pub fn finalize(
        &self,
        fragments: impl IntoIterator<Item = PendingFragment>,
    ) -> Result<usize, DecodeError> {
        let mut registered = 0;
        for PendingFragment { mut seq, columns } in fragments {
            let tag = seq.data_type();
            if columns == 0 {
                if tracing::enabled!(tracing::Level::TRACE) {
                    trace!(
                        target: "tsdb::decode::finalizer",
                        series_hash = self.series_hash,
                        data_type = tag,
                        "Skipping fragment without columns"
                    );
                }
                continue;
            }

            let resolution = seq
                .dedupe(self.options.keep_earliest, self.options.reversed)
                .map_err(|source| DecodeError::RowSeq { tag, source })?;
            self.sink
                .add_fragment(self.series_hash, self.row_key, seq, resolution);
            registered += 1;
        }
        Ok(registered)
    }
}
