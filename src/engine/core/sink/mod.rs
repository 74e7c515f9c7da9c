mod fragment_sink;
mod query_result;

pub use fragment_sink::FragmentSink;
pub use query_result::{Fragment, QueryResult};
