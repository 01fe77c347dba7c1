//! Shared types for the configuration provider
//!
//! This crate contains the domain types used by the typed settings accessor
//! and the command-line front end: raw value classification, the connection
//! descriptor and the error taxonomy.

pub mod connection;
pub mod error;
pub mod setting;
pub mod utils;

// Re-export commonly used types
pub use connection::DbConnectionInformation;
pub use error::{
    ConfigProviderError, ConfigurationSettingError, Result, SettingErrorKind, SettingResult,
};
pub use setting::{BlankKind, ValidationOutcome};
