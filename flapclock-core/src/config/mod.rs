//! Configuration types
//!
//! Board-agnostic clock settings plus a parser for the `clock.toml` subset
//! the firmware embeds at build time.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
