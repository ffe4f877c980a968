//! Configuration types
//!
//! Board-agnostic node configuration and its TOML loader.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
