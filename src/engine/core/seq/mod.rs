mod blob;
mod numeric;
mod row_seq;
mod summary;

pub use blob::{BlobEntry, BlobRowSeq};
pub use numeric::{NumericPoint, NumericRowSeq};
pub use row_seq::{RowSeq, sort_and_dedupe};
pub use summary::{NumericSummaryRowSeq, SummaryPoint};
