use tracing::{debug, trace};

use crate::engine::core::decode::classifier::{ColumnClass, DropReason};
use crate::engine::core::row::Column;
use crate::engine::core::row::format::{APPENDS_PREFIX, NUMERIC_PREFIX};
use crate::engine::core::seq::RowSeq;
use crate::engine::errors::DecodeError;
use crate::engine::schema::Schema;

/// A fragment under construction and how many columns reached it.
#[derive(Debug)]
pub struct PendingFragment {
    pub seq: Box<dyn RowSeq>,
    pub columns: usize,
}

impl PendingFragment {
    pub fn new(seq: Box<dyn RowSeq>) -> Self {
        Self { seq, columns: 0 }
    }

    fn append(&mut self, prefix: u8, column: &Column) -> Result<(), DecodeError> {
        self.seq
            .add_column(prefix, &column.qualifier, &column.value)
            .map_err(|source| DecodeError::RowSeq {
                tag: self.seq.data_type(),
                source,
            })?;
        self.columns += 1;
        Ok(())
    }
}

/// Row-scoped tag to fragment map. Rows rarely carry more than one or two
/// non-numeric types, so a linear scan beats hashing.
#[derive(Debug, Default)]
struct TagRegistry {
    slots: Vec<(u8, PendingFragment)>,
}

impl TagRegistry {
    fn get_mut(&mut self, tag: u8) -> Option<&mut PendingFragment> {
        self.slots
            .iter_mut()
            .find(|(t, _)| *t == tag)
            .map(|(_, fragment)| fragment)
    }

    fn insert(&mut self, tag: u8, fragment: PendingFragment) -> &mut PendingFragment {
        self.slots.push((tag, fragment));
        let last = self.slots.len() - 1;
        &mut self.slots[last].1
    }
}

/// Sends classified columns to the row's fragments, creating typed
/// fragments on first sight.
pub struct FragmentRouter<'a> {
    schema: &'a dyn Schema,
    base_timestamp: u64,
    numeric: Option<PendingFragment>,
    registry: Option<TagRegistry>,
    filtered: usize,
    unsupported: usize,
}

impl<'a> FragmentRouter<'a> {
    /// `numeric` must be present whenever the classifier can emit numeric
    /// classes for this row.
    pub fn new(
        schema: &'a dyn Schema,
        base_timestamp: u64,
        numeric: Option<Box<dyn RowSeq>>,
    ) -> Self {
        Self {
            schema,
            base_timestamp,
            numeric: numeric.map(PendingFragment::new),
            registry: None,
            filtered: 0,
            unsupported: 0,
        }
    }

    pub fn route(&mut self, class: ColumnClass, column: &Column) -> Result<(), DecodeError> {
        match class {
            ColumnClass::Numeric => self.append_numeric(NUMERIC_PREFIX, column),
            ColumnClass::AppendedNumericBatch => self.append_numeric(APPENDS_PREFIX, column),
            ColumnClass::Typed(tag) => self.append_typed(tag, column),
            ColumnClass::Drop(reason) => {
                self.count_drop(reason, column);
                Ok(())
            }
        }
    }

    fn append_numeric(&mut self, prefix: u8, column: &Column) -> Result<(), DecodeError> {
        match self.numeric.as_mut() {
            Some(numeric) => numeric.append(prefix, column),
            None => unreachable!("numeric column routed for a row without a numeric fragment"),
        }
    }

    fn append_typed(&mut self, tag: u8, column: &Column) -> Result<(), DecodeError> {
        let registry = self.registry.get_or_insert_with(TagRegistry::default);
        if let Some(fragment) = registry.get_mut(tag) {
            return fragment.append(tag, column);
        }

        match self.schema.new_row_seq(tag, self.base_timestamp) {
            Some(seq) => registry
                .insert(tag, PendingFragment::new(seq))
                .append(tag, column),
            None => {
                self.count_drop(DropReason::UnsupportedType, column);
                Ok(())
            }
        }
    }

    fn count_drop(&mut self, reason: DropReason, column: &Column) {
        match reason {
            DropReason::Filtered => {
                self.filtered += 1;
                if tracing::enabled!(tracing::Level::TRACE) {
                    trace!(
                        target: "tsdb::decode::router",
                        qualifier = %hex::encode(&column.qualifier),
                        "Dropped filtered column"
                    );
                }
            }
            DropReason::UnsupportedType => {
                self.unsupported += 1;
                if tracing::enabled!(tracing::Level::DEBUG) {
                    debug!(
                        target: "tsdb::decode::router",
                        tag = column.prefix(),
                        qualifier = %hex::encode(&column.qualifier),
                        "Dropped column with no registered codec"
                    );
                }
            }
        }
    }

    /// Whether a non-numeric column has been seen.
    pub fn has_typed_fragments(&self) -> bool {
        self.registry.is_some()
    }

    pub fn filtered(&self) -> usize {
        self.filtered
    }

    pub fn unsupported(&self) -> usize {
        self.unsupported
    }

    /// The numeric fragment first, then typed fragments in order of creation.
    pub fn into_fragments(self) -> impl Iterator<Item = PendingFragment> {
        self.numeric.into_iter().chain(
            self.registry
                .into_iter()
                .flat_map(|registry| registry.slots.into_iter().map(|(_, fragment)| fragment)),
        )
    }
}
