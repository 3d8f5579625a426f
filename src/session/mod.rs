mod filesystem;
mod storage;

pub use filesystem::{FilesystemSessionStore, SESSION_FILE};
pub use storage::SessionStore;

use crate::api::DogApi;
use crate::models::SessionRecord;
use crate::ui::debug;
use chrono::Local;

/// Process-wide "am I logged in" flag, mirrored into a [`SessionStore`].
///
/// The flag always resolves to a definite boolean: check and logout failures
/// are treated as "not authenticated", never surfaced as errors.
pub struct AuthSession {
    authenticated: bool,
    store: Box<dyn SessionStore>,
    verbose: bool,
}

impl AuthSession {
    /// Seed the flag from the store and hand any saved cookie back to the
    /// transport so the upstream session can be resumed.
    pub fn open(store: Box<dyn SessionStore>, api: &dyn DogApi, verbose: bool) -> Self {
        let record = store.load();
        let authenticated = record.as_ref().map(|r| r.authenticated).unwrap_or(false);

        if let Some(cookie) = record.as_ref().and_then(|r| r.cookie.as_deref()) {
            debug(verbose, "Restoring saved session cookie");
            api.restore_cookie(cookie);
        }

        Self {
            authenticated,
            store,
            verbose,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Hit an authenticated endpoint once and settle the flag from the result.
    pub async fn check_session(&mut self, api: &dyn DogApi) -> bool {
        match api.breeds().await {
            Ok(_) => self.mark_authenticated(api),
            Err(e) => {
                debug(self.verbose, format!("Session check failed: {}", e));
                self.mark_signed_out();
            }
        }
        self.authenticated
    }

    /// Credentials were already accepted by the login request; just record it.
    pub fn login(&mut self, api: &dyn DogApi) {
        self.mark_authenticated(api);
    }

    /// Best-effort remote logout; local state is cleared whatever happens.
    pub async fn logout(&mut self, api: &dyn DogApi) {
        if let Err(e) = api.logout().await {
            debug(self.verbose, format!("Logout request failed: {}", e));
        }
        self.mark_signed_out();
    }

    fn mark_authenticated(&mut self, api: &dyn DogApi) {
        self.authenticated = true;
        let record = SessionRecord {
            authenticated: true,
            cookie: api.export_cookie(),
            last_updated: Local::now(),
        };
        if let Err(e) = self.store.save(&record) {
            debug(self.verbose, format!("Warning: Failed to save session: {}", e));
        }
    }

    fn mark_signed_out(&mut self) {
        self.authenticated = false;
        if let Err(e) = self.store.clear() {
            debug(self.verbose, format!("Warning: Failed to clear session: {}", e));
        }
    }
}
