use crate::api::{Credentials, DogApi};
use crate::error::{FetchDogsError, Result};
use crate::session::AuthSession;
use regex::Regex;
use std::sync::OnceLock;

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// `local@domain.tld`, nothing stricter.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session is live; the caller should switch to the search view.
    Authenticated,
}

/// Name and email entry with submit gating.
#[derive(Debug, Default)]
pub struct LoginForm {
    name: String,
    email: String,
    submitting: bool,
    error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error = None;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && is_valid_email(&self.email)
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    /// Send the credentials. On failure the user-facing message is kept on
    /// the form (see [`LoginForm::error`]) and the form stays usable.
    pub async fn submit(
        &mut self,
        api: &dyn DogApi,
        session: &mut AuthSession,
    ) -> Result<LoginOutcome> {
        if !self.can_submit() {
            return Err(FetchDogsError::Validation(
                "Enter a name and a valid email address".to_string(),
            ));
        }

        self.error = None;
        self.submitting = true;

        let credentials = Credentials {
            name: self.name.clone(),
            email: self.email.clone(),
        };
        let result = api.login(&credentials).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                session.login(api);
                Ok(LoginOutcome::Authenticated)
            }
            Err(e) => {
                let message = match &e {
                    FetchDogsError::ApiError { .. } => LOGIN_FAILED.to_string(),
                    other => other.to_string(),
                };
                self.error = Some(message);
                Err(e)
            }
        }
    }
}
