use std::sync::Arc;

use crate::engine::core::seq::RowSeq;
use crate::engine::schema::errors::SchemaError;

/// Builds an empty fragment for one data type given the row base timestamp.
pub type RowSeqFactory = Arc<dyn Fn(u64) -> Box<dyn RowSeq> + Send + Sync>;

/// What the decoder needs to know about row keys and data types.
pub trait Schema: Send + Sync {
    /// Base timestamp of the row in epoch seconds.
    fn base_timestamp(&self, key: &[u8]) -> Result<u64, SchemaError>;

    /// Series identity shared by every row of one time series.
    fn series_hash(&self, key: &[u8]) -> Result<u64, SchemaError>;

    /// A fresh fragment for `tag`, or `None` when no codec handles it.
    fn new_row_seq(&self, tag: u8, base_timestamp: u64) -> Option<Box<dyn RowSeq>>;
}
