//! Typed configuration access for the configuration provider
//!
//! This crate turns raw string settings from a key/value source into
//! validated, normalized application values, and loads that source from
//! YAML files and environment variables.

pub mod accessor;
pub mod connection;
pub mod loader;
pub mod provider;
pub mod schema;
pub mod source;
pub mod validation;

pub use accessor::SettingsAccessor;
pub use loader::ConfigLoader;
pub use provider::ConfigurationProvider;
pub use schema::*;
pub use source::{InMemorySource, SettingsSource};
pub use validation::*;
