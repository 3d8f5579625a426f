use crate::api::models::{Credentials, DogSearchRequest, SearchPage};
use crate::error::Result;
use crate::models::{Dog, Location};
use async_trait::async_trait;

/// Operations of the remote adoption service.
///
/// Every call shares the same credentialed session. Non-success statuses map
/// to `FetchDogsError::ApiError` carrying the response body; payloads missing
/// their expected fields map to `FetchDogsError::Malformed`.
#[async_trait]
pub trait DogApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<()>;

    /// `GET /dogs/breeds`, also the cheapest authenticated check
    async fn breeds(&self) -> Result<Vec<String>>;

    /// `GET /dogs/search`
    async fn search_dogs(&self, request: &DogSearchRequest) -> Result<SearchPage>;

    /// `POST /dogs`
    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>>;

    /// `POST /dogs/match`, returns the matched id
    async fn match_dog(&self, ids: &[String]) -> Result<String>;

    /// `POST /locations/search`
    async fn search_locations(&self, city: &str, size: u32) -> Result<Vec<Location>>;

    /// `POST /locations`
    async fn locations(&self, zip_codes: &[String]) -> Result<Vec<Location>>;

    /// `POST /locations/near-by`
    async fn nearby_zip_codes(&self, zip_code: &str, mile_radius: u32) -> Result<Vec<String>>;

    /// Current session cookie header, if the transport keeps one.
    fn export_cookie(&self) -> Option<String> {
        None
    }

    /// Seed the transport with a previously exported cookie header.
    fn restore_cookie(&self, _cookie: &str) {}
}
