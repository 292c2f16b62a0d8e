pub mod config;
pub mod error;
pub mod host;
pub mod scene;
pub mod types;
