use crate::engine::schema::Tsdb1xSchema;
use crate::shared::config::SchemaConfig;

/// Builds a `Tsdb1xSchema` with 3 byte uids and optional blob codecs.
pub struct SchemaFactory {
    config: SchemaConfig,
    blob_types: Vec<u8>,
}

impl SchemaFactory {
    pub fn new() -> Self {
        Self {
            config: SchemaConfig::default(),
            blob_types: Vec::new(),
        }
    }

    pub fn with_salt_width(mut self, width: usize) -> Self {
        self.config.salt_width = width;
        self
    }

    pub fn with_blob_type(mut self, tag: u8) -> Self {
        self.blob_types.push(tag);
        self
    }

    pub fn create(self) -> Tsdb1xSchema {
        let mut schema = Tsdb1xSchema::new(&self.config);
        for tag in self.blob_types {
            schema
                .register_blob_type(tag)
                .expect("Failed to register blob type");
        }
        schema
    }
}
