//! Enums shared by the opportunity aggregate.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{PREFIX_APPLICATION, PREFIX_INTERVIEW};

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

/// Kind of record a process entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Application,
    Interview,
}

impl DocumentType {
    /// Every document kind, in storage order.
    pub const ALL: [Self; 2] = [Self::Application, Self::Interview];

    /// Return the string representation used in SQL storage and the list output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Interview => "interview",
        }
    }

    /// ID prefix of documents of this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Application => PREFIX_APPLICATION,
            Self::Interview => PREFIX_INTERVIEW,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_matches_as_str() {
        for kind in DocumentType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn display_uses_storage_name() {
        assert_eq!(DocumentType::Interview.to_string(), "interview");
    }
}
