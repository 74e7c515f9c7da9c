use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::engine::core::row::format::{APPENDS_PREFIX, NUMERIC_PREFIX, NUMERIC_TYPE};
use crate::engine::core::seq::{BlobRowSeq, RowSeq};
use crate::engine::schema::errors::SchemaError;
use crate::engine::schema::types::{RowSeqFactory, Schema};
use crate::shared::config::SchemaConfig;
use crate::shared::hash::stable_hash64;

pub const TIMESTAMP_BYTES: usize = 4;

/// Row key layout `[salt][metric][base timestamp][tagk tagv]*` plus the
/// codecs registered for non-numeric data types.
#[derive(Clone)]
pub struct Tsdb1xSchema {
    salt_width: usize,
    metric_width: usize,
    tagk_width: usize,
    tagv_width: usize,
    factories: HashMap<u8, RowSeqFactory>,
}

impl Tsdb1xSchema {
    pub fn new(config: &SchemaConfig) -> Self {
        Self {
            salt_width: config.salt_width,
            metric_width: config.metric_width,
            tagk_width: config.tagk_width,
            tagv_width: config.tagv_width,
            factories: HashMap::new(),
        }
    }

    pub fn salt_width(&self) -> usize {
        self.salt_width
    }

    /// Offset of the base timestamp within the key.
    pub fn timestamp_offset(&self) -> usize {
        self.salt_width + self.metric_width
    }

    fn header_len(&self) -> usize {
        self.timestamp_offset() + TIMESTAMP_BYTES
    }

    pub fn register(&mut self, tag: u8, factory: RowSeqFactory) -> Result<(), SchemaError> {
        if tag == NUMERIC_PREFIX || tag == NUMERIC_TYPE || tag == APPENDS_PREFIX {
            return Err(SchemaError::ReservedType(tag));
        }
        if self.factories.contains_key(&tag) {
            return Err(SchemaError::AlreadyRegistered(tag));
        }
        debug!(target: "tsdb::schema", tag, "Registered fragment factory");
        self.factories.insert(tag, factory);
        Ok(())
    }

    /// Registers an opaque-payload codec for `tag`.
    pub fn register_blob_type(&mut self, tag: u8) -> Result<(), SchemaError> {
        self.register(
            tag,
            Arc::new(move |base| Box::new(BlobRowSeq::new(tag, base)) as Box<dyn RowSeq>),
        )
    }

    pub fn registered_types(&self) -> Vec<u8> {
        let mut tags: Vec<u8> = self.factories.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    fn check_key(&self, key: &[u8]) -> Result<(), SchemaError> {
        let needed = self.header_len();
        if key.len() < needed {
            return Err(SchemaError::KeyTooShort {
                needed,
                actual: key.len(),
            });
        }
        let pair = self.tagk_width + self.tagv_width;
        let partial = if pair == 0 {
            0
        } else {
            (key.len() - needed) % pair
        };
        if partial != 0 {
            return Err(SchemaError::PartialTagPair(partial));
        }
        Ok(())
    }

    /// Metric and tag bytes of the key, without salt and timestamp.
    pub fn tsuid(&self, key: &[u8]) -> Result<Vec<u8>, SchemaError> {
        self.check_key(key)?;
        let ts = self.timestamp_offset();
        let mut tsuid = Vec::with_capacity(key.len() - self.salt_width - TIMESTAMP_BYTES);
        tsuid.extend_from_slice(&key[self.salt_width..ts]);
        tsuid.extend_from_slice(&key[ts + TIMESTAMP_BYTES..]);
        Ok(tsuid)
    }
}

impl Default for Tsdb1xSchema {
    fn default() -> Self {
        Self::new(&SchemaConfig::default())
    }
}

impl std::fmt::Debug for Tsdb1xSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tsdb1xSchema")
            .field("salt_width", &self.salt_width)
            .field("metric_width", &self.metric_width)
            .field("tagk_width", &self.tagk_width)
            .field("tagv_width", &self.tagv_width)
            .field("types", &self.registered_types())
            .finish()
    }
}

impl Schema for Tsdb1xSchema {
    fn base_timestamp(&self, key: &[u8]) -> Result<u64, SchemaError> {
        self.check_key(key)?;
        let ts = self.timestamp_offset();
        let raw = [key[ts], key[ts + 1], key[ts + 2], key[ts + 3]];
        Ok(u32::from_be_bytes(raw) as u64)
    }

    fn series_hash(&self, key: &[u8]) -> Result<u64, SchemaError> {
        let tsuid = self.tsuid(key)?;
        Ok(stable_hash64(tsuid.as_slice()))
    }

    fn new_row_seq(&self, tag: u8, base_timestamp: u64) -> Option<Box<dyn RowSeq>> {
        self.factories.get(&tag).map(|factory| factory(base_timestamp))
    }
}
