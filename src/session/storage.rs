use crate::error::Result;
use crate::models::SessionRecord;

/// Trait for session storage backends
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any
    fn load(&self) -> Option<SessionRecord>;

    /// Persist a session
    fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Forget the persisted session
    fn clear(&self) -> Result<()>;
}
