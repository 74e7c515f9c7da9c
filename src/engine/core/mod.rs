pub mod decode;
pub mod row;
pub mod seq;
pub mod sink;

pub use decode::{DataTypeFilter, DecodeOptions, DecodeOutcome, RowBatchDecoder, RowDecoder, TypeFilter};
pub use row::{Column, Row};
pub use seq::RowSeq;
pub use sink::{FragmentSink, QueryResult};
