use serde::{Deserialize, Serialize};

/// Error payload the backend attaches to rejected requests: `{ "error": "..." }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Server message, ignoring blank strings
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}
