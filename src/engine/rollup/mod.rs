mod interval;

pub use interval::{RollupConfig, RollupInterval};
