use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::shared::config::model::{Settings, load_settings};

/// Process-wide settings, read from `$TSDB_DECODER_CONFIG` on first use.
pub static CONFIG: Lazy<Arc<Settings>> = Lazy::new(|| match load_settings() {
    Ok(settings) => Arc::new(settings),
    Err(e) => panic!("Failed to load decoder configuration: {}", e),
});
