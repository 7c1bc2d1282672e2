//! Layered configuration for the gatekeeper and its command-line front end.
//!
//! Scoring itself is not configurable; this only covers presentation
//! (locale), what happens after a block, and log filtering.

pub mod error;
pub mod loader;

pub use error::{ConfigError, Result};
pub use loader::{BlockConfig, ConfigLoader, GuardConfig, HoldPolicy, LocaleSetting, LoggingConfig};
