use std::any::Any;
use std::fmt;

use crate::engine::errors::RowSeqError;
use crate::shared::time::TimeResolution;

/// A per-row, per-data-type fragment under construction.
///
/// Builders absorb columns in store order, then get resolved exactly once by
/// [`RowSeq::dedupe`]. After that they are read-only.
pub trait RowSeq: Send + Sync + fmt::Debug {
    /// Type tag of the data this builder holds.
    fn data_type(&self) -> u8;

    /// Row base timestamp in epoch seconds.
    fn base_timestamp(&self) -> u64;

    /// Absorbs one column. `prefix` is the numeric prefix or appends marker
    /// for numeric builders and the type tag for everything else.
    fn add_column(&mut self, prefix: u8, qualifier: &[u8], value: &[u8])
    -> Result<(), RowSeqError>;

    /// Sorts and resolves duplicate timestamps, returning the finest time
    /// unit kept. A second call returns the first result untouched.
    fn dedupe(&mut self, keep_earliest: bool, reversed: bool)
    -> Result<TimeResolution, RowSeqError>;

    /// Number of entries currently held.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn RowSeq {
    pub fn downcast_ref<T: RowSeq + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Sorts `items` by `key` and collapses runs of equal keys.
///
/// The sort is stable, so within a run the store order survives: the first
/// item is kept when `keep_earliest`, the last otherwise. `reversed` flips the
/// result to descending order. Returns how many items were dropped.
pub fn sort_and_dedupe<T, K, F>(
    items: &mut Vec<T>,
    key: F,
    keep_earliest: bool,
    reversed: bool,
) -> usize
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let before = items.len();
    items.sort_by_key(|item| key(item));

    if keep_earliest {
        items.dedup_by(|later, earlier| key(later) == key(earlier));
    } else {
        let mut kept: Vec<T> = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            match kept.last_mut() {
                Some(last) if key(last) == key(&item) => *last = item,
                _ => kept.push(item),
            }
        }
        *items = kept;
    }

    if reversed {
        items.reverse();
    }
    before - items.len()
}
