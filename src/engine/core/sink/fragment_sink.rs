use bytes::Bytes;

use crate::engine::core::seq::RowSeq;
use crate::shared::time::TimeResolution;

/// Receives finished fragments from row decodes.
///
/// Rows may decode on several threads against one sink, so implementations
/// take `&self` and handle their own locking.
pub trait FragmentSink: Send + Sync {
    fn add_fragment(
        &self,
        series_hash: u64,
        row_key: &Bytes,
        fragment: Box<dyn RowSeq>,
        resolution: TimeResolution,
    );
}
