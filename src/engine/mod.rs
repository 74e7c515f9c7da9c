pub mod core;
pub mod errors;
pub mod rollup;
pub mod schema;

pub use errors::*;
