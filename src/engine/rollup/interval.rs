use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::engine::errors::RollupConfigError;

/// A pre-aggregation resolution and the table its rows live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupInterval {
    /// Name such as "1h" used by queries to pick the interval
    pub name: String,
    pub table: String,
    /// Width of one aggregated slot
    pub interval_seconds: u64,
    /// Time covered by one row
    pub row_span_seconds: u64,
    #[serde(default)]
    pub default_interval: bool,
}

impl RollupInterval {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        interval_seconds: u64,
        row_span_seconds: u64,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            interval_seconds,
            row_span_seconds,
            default_interval: false,
        }
    }

    /// Number of slots in one row.
    pub fn intervals_per_row(&self) -> u64 {
        if self.interval_seconds == 0 {
            return 0;
        }
        self.row_span_seconds / self.interval_seconds
    }

    pub fn validate(&self) -> Result<(), RollupConfigError> {
        let invalid = |reason: &str| RollupConfigError::InvalidInterval {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.interval_seconds == 0 {
            return Err(invalid("interval must be positive"));
        }
        if self.row_span_seconds < self.interval_seconds {
            return Err(invalid("row span shorter than interval"));
        }
        if self.row_span_seconds % self.interval_seconds != 0 {
            return Err(invalid("row span is not a multiple of the interval"));
        }
        // Slot indexes are 12 bits wide in the qualifier.
        if self.intervals_per_row() > 4096 {
            return Err(invalid("more than 4096 slots per row"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RollupConfig {
    #[serde(default)]
    pub intervals: Vec<RollupInterval>,
    /// Aggregator name to the id stored as the first qualifier byte
    #[serde(default)]
    pub aggregation_ids: HashMap<String, u8>,
}

impl RollupConfig {
    pub fn interval(&self, name: &str) -> Option<&RollupInterval> {
        self.intervals.iter().find(|i| i.name == name)
    }

    pub fn default_interval(&self) -> Option<&RollupInterval> {
        self.intervals.iter().find(|i| i.default_interval)
    }

    pub fn aggregator_id(&self, name: &str) -> Option<u8> {
        self.aggregation_ids.get(name).copied()
    }

    pub fn aggregator_name(&self, id: u8) -> Option<&str> {
        self.aggregation_ids
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    pub fn validate(&self) -> Result<(), RollupConfigError> {
        let mut names = HashSet::with_capacity(self.intervals.len());
        let mut defaults = 0;
        for interval in &self.intervals {
            interval.validate()?;
            if !names.insert(interval.name.as_str()) {
                return Err(RollupConfigError::DuplicateInterval(interval.name.clone()));
            }
            if interval.default_interval {
                defaults += 1;
            }
        }
        if defaults > 1 {
            return Err(RollupConfigError::MultipleDefaults);
        }

        let mut ids = HashSet::with_capacity(self.aggregation_ids.len());
        for id in self.aggregation_ids.values() {
            if !ids.insert(*id) {
                return Err(RollupConfigError::DuplicateAggregatorId(*id));
            }
        }
        Ok(())
    }
}
