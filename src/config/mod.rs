//! Configuration for the Break-Time Compliance Engine.
//!
//! Break thresholds, break durations, the excluded-procedure-code list and
//! the drive-time switch are resolved from a key-value store with typed
//! defaults. A store can be seeded with the engine defaults, populated
//! programmatically, or loaded from a YAML file.

mod resolver;
mod store;
mod types;

pub use resolver::resolve_break_config;
pub use store::ConfigStore;
pub use types::{BreakConfig, ConfigEntry, ConfigValue, ValueType};
