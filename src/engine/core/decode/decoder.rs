use tracing::debug;

use crate::engine::core::decode::classifier::ColumnClassifier;
use crate::engine::core::decode::finalizer::Finalizer;
use crate::engine::core::decode::router::FragmentRouter;
use crate::engine::core::decode::type_filter::TypeFilter;
use crate::engine::core::row::Row;
use crate::engine::core::seq::{NumericRowSeq, NumericSummaryRowSeq, RowSeq};
use crate::engine::core::sink::FragmentSink;
use crate::engine::errors::DecodeError;
use crate::engine::rollup::RollupInterval;
use crate::engine::schema::Schema;
use crate::shared::config::DecodeConfig;

/// Scan-wide dedupe policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// On equal timestamps keep the first column seen, otherwise the last
    pub keep_earliest: bool,
    /// Emit points newest first
    pub reversed: bool,
}

impl From<&DecodeConfig> for DecodeOptions {
    fn from(config: &DecodeConfig) -> Self {
        Self {
            keep_earliest: config.keep_earliest,
            reversed: config.reversed,
        }
    }
}

/// What happened to the columns of one or more rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub columns: usize,
    pub filtered: usize,
    pub unsupported: usize,
    pub fragments: usize,
}

impl DecodeOutcome {
    pub fn dropped(&self) -> usize {
        self.filtered + self.unsupported
    }

    pub fn merge(self, other: DecodeOutcome) -> DecodeOutcome {
        DecodeOutcome {
            columns: self.columns + other.columns,
            filtered: self.filtered + other.filtered,
            unsupported: self.unsupported + other.unsupported,
            fragments: self.fragments + other.fragments,
        }
    }
}

/// Turns one fetched row into deduplicated fragments.
///
/// All per-row state (numeric fragment, typed fragment map, counters) lives
/// inside [`RowDecoder::decode`], so one decoder can serve many threads.
#[derive(Clone, Copy)]
pub struct RowDecoder<'a> {
    schema: &'a dyn Schema,
    filter: &'a dyn TypeFilter,
    options: DecodeOptions,
}

impl<'a> RowDecoder<'a> {
    pub fn new(schema: &'a dyn Schema, filter: &'a dyn TypeFilter, options: DecodeOptions) -> Self {
        Self {
            schema,
            filter,
            options,
        }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes `row`, reading it as rollup data when `interval` is given.
    ///
    /// The row must not be empty; that is a scanner bug and asserts in
    /// debug builds.
    pub fn decode(
        &self,
        row: &Row,
        interval: Option<&RollupInterval>,
        sink: &dyn FragmentSink,
    ) -> Result<DecodeOutcome, DecodeError> {
        debug_assert!(!row.is_empty(), "decode called with an empty row");
        if row.is_empty() {
            return Err(DecodeError::EmptyRow);
        }

        let key = row.key();
        let base_timestamp = self.schema.base_timestamp(key)?;
        let series_hash = self.schema.series_hash(key)?;

        let classifier = ColumnClassifier::new(interval.is_some(), self.filter);
        // Rollup rows are all numeric, so they always get a numeric fragment.
        let numeric: Option<Box<dyn RowSeq>> = match interval {
            Some(interval) => Some(Box::new(NumericSummaryRowSeq::new(
                base_timestamp,
                interval.clone(),
            ))),
            None if classifier.wants_numeric() => {
                Some(Box::new(NumericRowSeq::new(base_timestamp)))
            }
            None => None,
        };

        let mut router = FragmentRouter::new(self.schema, base_timestamp, numeric);
        for column in row.columns() {
            router.route(classifier.classify(&column.qualifier), column)?;
        }

        let filtered = router.filtered();
        let unsupported = router.unsupported();
        let fragments =
            Finalizer::new(series_hash, key, self.options, sink).finalize(router.into_fragments())?;

        let outcome = DecodeOutcome {
            columns: row.len(),
            filtered,
            unsupported,
            fragments,
        };

        if outcome.unsupported > 0 && tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "tsdb::decode::row",
                series_hash,
                base_timestamp,
                columns = outcome.columns,
                unsupported = outcome.unsupported,
                "Row carried columns of unregistered types"
            );
        }

        Ok(outcome)
    }
}
