pub mod config;
pub mod hash;
pub mod time;
