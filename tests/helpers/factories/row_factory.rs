use crate::engine::core::row::{Column, Row};
use bytes::Bytes;

/// Hour-aligned base timestamp used when none is given.
pub const DEFAULT_BASE_TIMESTAMP: u32 = 1_699_999_200;

/// Builds rows keyed `[salt][metric][base timestamp][tagk tagv]*` with 3 byte uids.
pub struct RowFactory {
    salt: Option<u8>,
    metric: [u8; 3],
    base_timestamp: u32,
    tags: Vec<([u8; 3], [u8; 3])>,
    columns: Vec<Column>,
}

impl RowFactory {
    pub fn new() -> Self {
        Self {
            salt: None,
            metric: [0, 0, 1],
            base_timestamp: DEFAULT_BASE_TIMESTAMP,
            tags: vec![([0, 0, 1], [0, 0, 1])],
            columns: Vec::new(),
        }
    }

    pub fn with_salt(mut self, salt: u8) -> Self {
        self.salt = Some(salt);
        self
    }

    pub fn with_metric(mut self, metric: [u8; 3]) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_base_timestamp(mut self, base_timestamp: u32) -> Self {
        self.base_timestamp = base_timestamp;
        self
    }

    pub fn with_tag(mut self, tagk: [u8; 3], tagv: [u8; 3]) -> Self {
        self.tags.push((tagk, tagv));
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn key(&self) -> Bytes {
        let mut key = Vec::with_capacity(8 + self.tags.len() * 6);
        if let Some(salt) = self.salt {
            key.push(salt);
        }
        key.extend_from_slice(&self.metric);
        key.extend_from_slice(&self.base_timestamp.to_be_bytes());
        for (k, v) in &self.tags {
            key.extend_from_slice(k);
            key.extend_from_slice(v);
        }
        Bytes::from(key)
    }

    pub fn create(self) -> Row {
        Row::new(self.key(), self.columns)
    }

    /// `count` consecutive hourly rows of the same series, each with the
    /// configured columns.
    pub fn create_list(self, count: u32) -> Vec<Row> {
        (0..count)
            .map(|i| {
                let row = RowFactory {
                    salt: self.salt,
                    metric: self.metric,
                    base_timestamp: self.base_timestamp + i * 3600,
                    tags: self.tags.clone(),
                    columns: self.columns.clone(),
                };
                row.create()
            })
            .collect()
    }
}
