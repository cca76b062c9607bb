//! Database location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentinel path for a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file, or `:memory:`. Empty selects the
    /// per-user data directory.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.trim().is_empty()
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Path the store should open.
    ///
    /// Falls back to `<data_dir>/jobhuntr/jobhuntr.db`, then to `./jobhuntr.db`
    /// when the platform has no data directory.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if self.is_configured() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from("jobhuntr.db"),
            |dir| dir.join("jobhuntr").join("jobhuntr.db"),
        )
    }
}
