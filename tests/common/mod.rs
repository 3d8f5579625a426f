#![allow(dead_code)]

use async_trait::async_trait;
use fetchdogs::api::{Credentials, DogApi, DogSearchRequest, SearchPage};
use fetchdogs::app::{App, AppSettings};
use fetchdogs::error::{FetchDogsError, Result};
use fetchdogs::models::{Dog, Location, SessionRecord, SortOrder};
use fetchdogs::session::{AuthSession, SessionStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String, String),
    Logout,
    Breeds,
    Search(DogSearchRequest),
    Dogs(Vec<String>),
    Match(Vec<String>),
    SearchLocations(String, u32),
    Locations(Vec<String>),
    Nearby(String, u32),
}

/// In-memory stand-in for the remote service that records every call.
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    cookie: Mutex<Option<String>>,
    pub breeds: Vec<String>,
    pub dogs: Vec<Dog>,
    pub locations: Vec<Location>,
    /// Raw `/locations/search` results; filtered from `locations` when unset.
    pub location_results: Option<Vec<Location>>,
    /// `None` makes the near-by lookup fail.
    pub nearby: Option<Vec<String>>,
    /// Id returned by `/dogs/match`; the first submitted id when unset.
    pub match_id: Option<String>,
    /// Endpoints that answer with HTTP 500: "login", "logout", "breeds",
    /// "search", "dogs", "match", "locations/search", "locations", "near-by".
    pub failing: HashSet<&'static str>,
    /// Endpoints that fail before any response, like a dropped connection.
    pub unreachable: HashSet<&'static str>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            cookie: Mutex::new(None),
            breeds: vec![
                "Beagle".to_string(),
                "Labrador".to_string(),
                "Poodle".to_string(),
            ],
            dogs: Vec::new(),
            locations: Vec::new(),
            location_results: None,
            nearby: Some(Vec::new()),
            match_id: None,
            failing: HashSet::new(),
            unreachable: HashSet::new(),
        }
    }

    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    pub fn unreachable(mut self, endpoint: &'static str) -> Self {
        self.unreachable.insert(endpoint);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn searches(&self) -> Vec<DogSearchRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn cookie(&self) -> Option<String> {
        self.cookie.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, endpoint: &'static str) -> Result<()> {
        if self.unreachable.contains(endpoint) {
            return Err(FetchDogsError::Other("connection refused".to_string()));
        }
        if self.failing.contains(endpoint) {
            return Err(FetchDogsError::ApiError {
                status: 500,
                message: format!("{} is down", endpoint),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DogApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.record(Call::Login(
            credentials.name.clone(),
            credentials.email.clone(),
        ));
        self.check("login")?;
        *self.cookie.lock().unwrap() = Some("fetch-access-token=abc123".to_string());
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.record(Call::Logout);
        self.check("logout")?;
        *self.cookie.lock().unwrap() = None;
        Ok(())
    }

    async fn breeds(&self) -> Result<Vec<String>> {
        self.record(Call::Breeds);
        self.check("breeds")?;
        Ok(self.breeds.clone())
    }

    async fn search_dogs(&self, request: &DogSearchRequest) -> Result<SearchPage> {
        self.record(Call::Search(request.clone()));
        self.check("search")?;

        let matching: Vec<&Dog> = self
            .dogs
            .iter()
            .filter(|d| request.breeds.is_empty() || request.breeds.contains(&d.breed))
            .filter(|d| request.zip_codes.is_empty() || request.zip_codes.contains(&d.zip_code))
            .collect();

        let result_ids = matching
            .iter()
            .skip(request.from as usize)
            .take(request.size as usize)
            .map(|d| d.id.clone())
            .collect();

        Ok(SearchPage {
            result_ids,
            total: matching.len() as u64,
        })
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        self.record(Call::Dogs(ids.to_vec()));
        self.check("dogs")?;
        Ok(ids
            .iter()
            .filter_map(|id| self.dogs.iter().find(|d| &d.id == id).cloned())
            .collect())
    }

    async fn match_dog(&self, ids: &[String]) -> Result<String> {
        self.record(Call::Match(ids.to_vec()));
        self.check("match")?;
        Ok(self
            .match_id
            .clone()
            .or_else(|| ids.first().cloned())
            .unwrap_or_default())
    }

    async fn search_locations(&self, city: &str, size: u32) -> Result<Vec<Location>> {
        self.record(Call::SearchLocations(city.to_string(), size));
        self.check("locations/search")?;
        if let Some(results) = &self.location_results {
            return Ok(results.clone());
        }
        let needle = city.to_lowercase();
        Ok(self
            .locations
            .iter()
            .filter(|l| l.city.to_lowercase().starts_with(&needle))
            .take(size as usize)
            .cloned()
            .collect())
    }

    async fn locations(&self, zip_codes: &[String]) -> Result<Vec<Location>> {
        self.record(Call::Locations(zip_codes.to_vec()));
        self.check("locations")?;
        Ok(zip_codes
            .iter()
            .filter_map(|zip| self.locations.iter().find(|l| &l.zip_code == zip).cloned())
            .collect())
    }

    async fn nearby_zip_codes(&self, zip_code: &str, mile_radius: u32) -> Result<Vec<String>> {
        self.record(Call::Nearby(zip_code.to_string(), mile_radius));
        self.check("near-by")?;
        self.nearby
            .clone()
            .ok_or_else(|| FetchDogsError::Other("connection refused".to_string()))
    }

    fn export_cookie(&self) -> Option<String> {
        self.cookie()
    }

    fn restore_cookie(&self, cookie: &str) {
        *self.cookie.lock().unwrap() = Some(cookie.to_string());
    }
}

/// Session store that lives in memory and can be inspected afterwards.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub record: Arc<Mutex<Option<SessionRecord>>>,
}

impl MemoryStore {
    pub fn signed_in() -> Self {
        let store = Self::default();
        *store.record.lock().unwrap() = Some(SessionRecord {
            authenticated: true,
            cookie: Some("fetch-access-token=saved".to_string()),
            last_updated: chrono::Local::now(),
        });
        store
    }

    pub fn current(&self) -> Option<SessionRecord> {
        self.record.lock().unwrap().clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<SessionRecord> {
        self.current()
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

pub fn dog(id: &str, name: &str, breed: &str, age: u32, zip_code: &str) -> Dog {
    Dog {
        id: id.to_string(),
        img: format!("https://img.example/{}.jpg", id),
        name: name.to_string(),
        age,
        zip_code: zip_code.to_string(),
        breed: breed.to_string(),
    }
}

pub fn location(zip_code: &str, city: &str, state: &str) -> Location {
    Location {
        zip_code: zip_code.to_string(),
        latitude: 0.0,
        longitude: 0.0,
        city: city.to_string(),
        state: state.to_string(),
        county: String::new(),
    }
}

pub fn settings() -> AppSettings {
    AppSettings {
        sort: SortOrder::default(),
        max_distance: 50,
        debounce: Duration::from_millis(500),
        location_limit: 10,
        verbose: false,
    }
}

/// Logged-in app over the given fake.
pub fn app_with(api: Arc<FakeApi>) -> App {
    let session = AuthSession::open(Box::new(MemoryStore::signed_in()), api.as_ref(), false);
    App::new(api, session, settings())
}

/// A small kennel spread over two cities.
pub fn kennel() -> FakeApi {
    let mut api = FakeApi::new();
    api.dogs = vec![
        dog("d1", "Rex", "Beagle", 3, "78701"),
        dog("d2", "Bella", "Poodle", 5, "78701"),
        dog("d3", "Max", "Poodle", 2, "10001"),
        dog("d4", "Luna", "Labrador", 7, "10001"),
    ];
    api.locations = vec![
        location("78701", "Austin", "TX"),
        location("10001", "New York", "NY"),
    ];
    api
}
