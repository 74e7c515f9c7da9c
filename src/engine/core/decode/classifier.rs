use crate::engine::core::decode::type_filter::TypeFilter;
use crate::engine::core::row::format::{APPENDS_PREFIX, NUMERIC_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The query does not want this data type
    Filtered,
    /// Wanted, but no codec is registered for the tag
    UnsupportedType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnClass {
    Numeric,
    AppendedNumericBatch,
    Typed(u8),
    Drop(DropReason),
}

/// Decides, from qualifier bytes alone, where a column belongs.
///
/// Unsupported tags cannot be told apart here; the router reports them once
/// the schema declines to build a fragment.
pub struct ColumnClassifier<'a> {
    rollup: bool,
    wants_numeric: bool,
    filter: &'a dyn TypeFilter,
}

impl<'a> ColumnClassifier<'a> {
    pub fn new(rollup: bool, filter: &'a dyn TypeFilter) -> Self {
        Self {
            rollup,
            wants_numeric: filter.wants_type(NUMERIC_TYPE),
            filter,
        }
    }

    pub fn wants_numeric(&self) -> bool {
        self.wants_numeric
    }

    pub fn is_rollup(&self) -> bool {
        self.rollup
    }

    pub fn classify(&self, qualifier: &[u8]) -> ColumnClass {
        debug_assert!(!qualifier.is_empty(), "zero-length qualifier");

        // Only numerics are rolled up.
        if self.rollup {
            return ColumnClass::Numeric;
        }

        if qualifier.len() & 1 == 0 {
            return if self.wants_numeric {
                ColumnClass::Numeric
            } else {
                ColumnClass::Drop(DropReason::Filtered)
            };
        }

        match qualifier[0] {
            APPENDS_PREFIX if self.wants_numeric => ColumnClass::AppendedNumericBatch,
            APPENDS_PREFIX => ColumnClass::Drop(DropReason::Filtered),
            tag if self.filter.wants_type(tag) => ColumnClass::Typed(tag),
            _ => ColumnClass::Drop(DropReason::Filtered),
        }
    }
}
