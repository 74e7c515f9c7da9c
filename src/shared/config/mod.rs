mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{DecodeConfig, LoggingConfig, SchemaConfig, Settings, load_settings};
