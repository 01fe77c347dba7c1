//! Database connection descriptors built on the typed accessor

use crate::accessor::SettingsAccessor;
use crate::source::SettingsSource;
use tracing::debug;
use types::{utils::sanitize_for_logging, DbConnectionInformation, SettingResult};

impl<S: SettingsSource> SettingsAccessor<S> {
    /// Build the descriptor for the connection string stored under `name`.
    ///
    /// The connection string is a required setting; the provider identifier
    /// comes from the accessor options, never from the source.
    pub fn connection_info(&self, name: &str) -> SettingResult<DbConnectionInformation> {
        let connection_string = self.required_string(name)?;
        debug!(
            name = name,
            connection_string = %sanitize_for_logging(&connection_string),
            provider = %self.options().provider_name,
            "Resolved database connection"
        );
        Ok(DbConnectionInformation::new(
            name,
            connection_string,
            self.options().provider_name.clone(),
        ))
    }
}
