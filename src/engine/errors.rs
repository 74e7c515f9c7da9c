use thiserror::Error;
use tracing::{debug, error};

use crate::engine::schema::errors::SchemaError;

/// Errors raised by a fragment builder while absorbing or resolving columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowSeqError {
    #[error("Empty qualifier")]
    EmptyQualifier,

    #[error("Truncated qualifier: need {needed} bytes, have {available}")]
    TruncatedQualifier { needed: usize, available: usize },

    #[error("Truncated value: need {needed} bytes, have {available}")]
    TruncatedValue { needed: usize, available: usize },

    #[error("Unsupported value length {len} (float: {float})")]
    UnsupportedValueLength { len: usize, float: bool },

    #[error("Unexpected {0} trailing value bytes")]
    TrailingBytes(usize),

    #[error("Malformed qualifier: {0}")]
    MalformedQualifier(String),

    #[error("Offset {offset} out of range (max {max})")]
    OffsetOutOfRange { offset: u64, max: u64 },

    #[error("Fragment already finalized")]
    Finalized,
}

/// Errors that escape a row decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Row has no columns")]
    EmptyRow,

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Fragment builder for type {tag} failed: {source}")]
    RowSeq {
        tag: u8,
        #[source]
        source: RowSeqError,
    },
}

impl DecodeError {
    pub fn log_error(&self) {
        match self {
            DecodeError::EmptyRow => {
                error!("Row decode called with an empty row");
                debug!("Empty rows are a caller bug; the scanner must skip them");
            }
            DecodeError::Schema(e) => {
                error!("Row key could not be parsed: {}", e);
                debug!("Schema error details: {:?}", e);
            }
            DecodeError::RowSeq { tag, source } => {
                error!("Fragment builder for type {} failed: {}", tag, source);
                debug!("Fragment builder error details: {:?}", source);
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RollupConfigError {
    #[error("Invalid rollup interval '{name}': {reason}")]
    InvalidInterval { name: String, reason: String },

    #[error("Duplicate rollup interval: {0}")]
    DuplicateInterval(String),

    #[error("More than one default rollup interval")]
    MultipleDefaults,

    #[error("Aggregator id {0} mapped more than once")]
    DuplicateAggregatorId(u8),
}
