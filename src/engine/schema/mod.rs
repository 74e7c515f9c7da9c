pub mod errors;
pub mod registry;
pub mod types;

pub use errors::SchemaError;
pub use registry::Tsdb1xSchema;
pub use types::{RowSeqFactory, Schema};
