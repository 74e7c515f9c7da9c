pub mod column;
pub mod format;

pub use column::{Column, Row};
pub use format::{APPENDS_PREFIX, NUMERIC_PREFIX, NUMERIC_TYPE, NumericValue};

#[cfg(test)]
mod format_test;
