use bytes::Bytes;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::trace;

use crate::engine::core::seq::RowSeq;
use crate::engine::core::sink::FragmentSink;
use crate::shared::time::TimeResolution;

#[derive(Debug)]
pub struct Fragment {
    pub row_key: Bytes,
    pub seq: Box<dyn RowSeq>,
    pub resolution: TimeResolution,
}

/// Fragments of one query grouped by series hash.
#[derive(Debug, Default)]
pub struct QueryResult {
    series: DashMap<u64, Vec<Fragment>>,
    resolution: Mutex<Option<TimeResolution>>,
}

impl QueryResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn fragment_count(&self) -> usize {
        self.series.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series hashes in ascending order.
    pub fn series_hashes(&self) -> Vec<u64> {
        let mut hashes: Vec<u64> = self.series.iter().map(|entry| *entry.key()).collect();
        hashes.sort_unstable();
        hashes
    }

    /// Runs `f` over the fragments of one series.
    pub fn with_series<R>(&self, series_hash: u64, f: impl FnOnce(&[Fragment]) -> R) -> Option<R> {
        self.series
            .get(&series_hash)
            .map(|fragments| f(fragments.value()))
    }

    /// Finest resolution across every fragment added so far.
    pub fn resolution(&self) -> Option<TimeResolution> {
        *self.resolution.lock()
    }

    pub fn into_series(self) -> HashMap<u64, Vec<Fragment>> {
        self.series.into_iter().collect()
    }
}

impl FragmentSink for QueryResult {
    fn add_fragment(
        &self,
        series_hash: u64,
        row_key: &Bytes,
        fragment: Box<dyn RowSeq>,
        resolution: TimeResolution,
    ) {
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                target: "tsdb::sink::query_result",
                series_hash,
                data_type = fragment.data_type(),
                size = fragment.size(),
                %resolution,
                "Adding fragment"
            );
        }

        {
            let mut finest = self.resolution.lock();
            *finest = Some(finest.map_or(resolution, |r| r.finest(resolution)));
        }

        self.series.entry(series_hash).or_default().push(Fragment {
            row_key: row_key.clone(),
            seq: fragment,
            resolution,
        });
    }
}
