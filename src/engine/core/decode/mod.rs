mod batch;
mod classifier;
mod decoder;
mod finalizer;
mod router;
mod type_filter;

pub use batch::RowBatchDecoder;
pub use classifier::{ColumnClass, ColumnClassifier, DropReason};
pub use decoder::{DecodeOptions, DecodeOutcome, RowDecoder};
pub use finalizer::Finalizer;
pub use router::{FragmentRouter, PendingFragment};
pub use type_filter::{DataTypeFilter, TypeFilter};

#[cfg(test)]
mod type_filter_test;
