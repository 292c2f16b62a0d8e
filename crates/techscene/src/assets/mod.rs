pub mod content;
pub mod loader;
pub mod manifest;
