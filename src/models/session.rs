use serde::{Deserialize, Serialize};

/// What survives between runs of the client.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionRecord {
    pub authenticated: bool,
    /// Opaque `Cookie` header replayed into the HTTP client on startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    pub last_updated: chrono::DateTime<chrono::Local>,
}
