use crate::api::models::{Credentials, DogSearchRequest, LocationSearchBody, NearbyBody, SearchPage};
use crate::api::response::{
    extract_location_results, extract_match, extract_zip_codes, parse_dogs, parse_location_batch,
    parse_search_page,
};
use crate::api::DogApi;
use crate::error::{FetchDogsError, Result};
use crate::models::{Dog, Location};
use crate::ui::debug;
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// reqwest-backed client. The cookie jar plays the part of the browser's
/// credentialed session: every request carries it.
pub struct HttpDogApi {
    client: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
    verbose: bool,
}

impl HttpDogApi {
    pub fn new(base_url: &str, timeout: Duration, verbose: bool) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            FetchDogsError::ConfigError(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            jar,
            verbose,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, request: RequestBuilder, label: &str) -> Result<reqwest::Response> {
        debug(self.verbose, format!("{} ...", label));
        let response = request.send().await?;
        debug(self.verbose, format!("{} -> {}", label, response.status()));

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchDogsError::ApiError { status, message });
        }

        Ok(response)
    }

    async fn send_json(&self, request: RequestBuilder, label: &str) -> Result<Value> {
        let response = self.send(request, label).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            FetchDogsError::Malformed(format!("{} returned invalid JSON: {}", label, e))
        })
    }
}

#[async_trait]
impl DogApi for HttpDogApi {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint("auth/login"))
            .json(credentials);
        self.send(request, "POST /auth/login").await?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let request = self.client.post(self.endpoint("auth/logout"));
        self.send(request, "POST /auth/logout").await?;
        Ok(())
    }

    async fn breeds(&self) -> Result<Vec<String>> {
        let request = self.client.get(self.endpoint("dogs/breeds"));
        let value = self.send_json(request, "GET /dogs/breeds").await?;
        serde_json::from_value(value)
            .map_err(|e| FetchDogsError::Malformed(format!("Invalid breed list: {}", e)))
    }

    async fn search_dogs(&self, search: &DogSearchRequest) -> Result<SearchPage> {
        let request = self
            .client
            .get(self.endpoint("dogs/search"))
            .query(&search.to_query_pairs());
        let value = self.send_json(request, "GET /dogs/search").await?;
        parse_search_page(&value)
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        let request = self.client.post(self.endpoint("dogs")).json(ids);
        let value = self.send_json(request, "POST /dogs").await?;
        parse_dogs(&value)
    }

    async fn match_dog(&self, ids: &[String]) -> Result<String> {
        let request = self.client.post(self.endpoint("dogs/match")).json(ids);
        let value = self.send_json(request, "POST /dogs/match").await?;
        extract_match(&value)
    }

    async fn search_locations(&self, city: &str, size: u32) -> Result<Vec<Location>> {
        let request = self
            .client
            .post(self.endpoint("locations/search"))
            .json(&LocationSearchBody { city, size });
        let value = self.send_json(request, "POST /locations/search").await?;
        extract_location_results(&value)
    }

    async fn locations(&self, zip_codes: &[String]) -> Result<Vec<Location>> {
        let request = self.client.post(self.endpoint("locations")).json(zip_codes);
        let value = self.send_json(request, "POST /locations").await?;
        parse_location_batch(&value)
    }

    async fn nearby_zip_codes(&self, zip_code: &str, mile_radius: u32) -> Result<Vec<String>> {
        let request = self
            .client
            .post(self.endpoint("locations/near-by"))
            .json(&NearbyBody {
                zip_code,
                mile_radius,
            });
        let value = self.send_json(request, "POST /locations/near-by").await?;
        extract_zip_codes(&value)
    }

    fn export_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(|s| s.to_string()))
    }

    fn restore_cookie(&self, cookie: &str) {
        for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &self.base_url);
        }
    }
}
