//! Database connection descriptor

use serde::{Deserialize, Serialize};

/// Provider identifier used when none is configured on the accessor
pub const DEFAULT_PROVIDER_NAME: &str = "System.Data.SqlClient";

/// Named database connection: logical name, connection string and the
/// driver/provider identifier used to open it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConnectionInformation {
    /// Logical name the connection string was looked up under
    pub name: String,
    /// Raw connection string as configured
    pub connection_string: String,
    /// Driver identifier, fixed per deployment target
    pub provider_name: String,
}

impl DbConnectionInformation {
    pub fn new(
        name: impl Into<String>,
        connection_string: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            connection_string: connection_string.into(),
            provider_name: provider_name.into(),
        }
    }
}
