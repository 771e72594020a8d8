//! Configuration types and re-exports

pub use super::{AppConfig, DefaultsConfig, LoggingConfig, PersistenceConfig, SampleConfig};
