use crate::api::DogApi;
use crate::error::{FetchDogsError, Result};
use crate::favorites::{request_match, Favorites};
use crate::listing::{fetch_listing, Listing, ListingOutcome, ListingRequest, ListingUpdate};
use crate::location::{LocationSearch, LocationUpdate, ZipCache};
use crate::models::{Dog, Location, SearchQuery, SortOrder};
use crate::session::AuthSession;
use crate::ui::{debug, Notifications};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    Favorites,
}

/// Knobs the application state is built from; see `Config`.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub sort: SortOrder,
    pub max_distance: u32,
    pub debounce: Duration,
    pub location_limit: u32,
    pub verbose: bool,
}

/// Everything a listing refresh needs, detached from the app so it can run
/// on another task.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    pub generation: u64,
    pub request: ListingRequest,
    pub known_zip_codes: HashSet<String>,
}

impl RefreshTicket {
    pub async fn run(self, api: &dyn DogApi, verbose: bool) -> (u64, ListingOutcome) {
        let outcome = fetch_listing(api, &self.request, &self.known_zip_codes, verbose).await;
        (self.generation, outcome)
    }
}

/// Application state for one client session.
///
/// Views read through the accessors; every change goes through a method
/// here. Filter setters return `true` when the listing needs a refresh.
pub struct App {
    api: Arc<dyn DogApi>,
    session: AuthSession,
    breeds: Vec<String>,
    query: SearchQuery,
    listing: Listing,
    favorites: Favorites,
    zip_cache: ZipCache,
    locations: LocationSearch,
    notices: Notifications,
    last_match: Option<Dog>,
    tab: Tab,
    settings: AppSettings,
}

impl App {
    pub fn new(api: Arc<dyn DogApi>, session: AuthSession, settings: AppSettings) -> Self {
        Self {
            api,
            session,
            breeds: Vec::new(),
            query: SearchQuery::new(settings.sort, settings.max_distance),
            listing: Listing::new(),
            favorites: Favorites::new(),
            zip_cache: ZipCache::new(),
            locations: LocationSearch::new(settings.debounce, settings.location_limit),
            notices: Notifications::default(),
            last_match: None,
            tab: Tab::Search,
            settings,
        }
    }

    pub fn api(&self) -> Arc<dyn DogApi> {
        Arc::clone(&self.api)
    }

    pub fn verbose(&self) -> bool {
        self.settings.verbose
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AuthSession {
        &mut self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn zip_cache(&self) -> &ZipCache {
        &self.zip_cache
    }

    pub fn location_search(&self) -> &LocationSearch {
        &self.locations
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }

    pub fn last_match(&self) -> Option<&Dog> {
        self.last_match.as_ref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// "City, ST" for a zip code, or the zip itself when not cached.
    pub fn location_label(&self, zip_code: &str) -> String {
        self.zip_cache.label(zip_code)
    }

    /// Fetch the breed list once per session.
    pub async fn load_breeds(&mut self) {
        match self.api.breeds().await {
            Ok(breeds) => self.breeds = breeds,
            Err(e) => {
                debug(self.settings.verbose, format!("Breed list failed: {}", e));
                self.notices.error("Failed to fetch breeds");
            }
        }
    }

    /// Replace the breed filter. Names are matched case-insensitively
    /// against the breed list when one has been loaded.
    pub fn select_breeds<I, S>(&mut self, breeds: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = Vec::new();
        for breed in breeds {
            let breed = breed.as_ref().trim();
            if breed.is_empty() {
                continue;
            }
            if self.breeds.is_empty() {
                resolved.push(breed.to_string());
                continue;
            }
            match self.breeds.iter().find(|b| b.eq_ignore_ascii_case(breed)) {
                Some(known) => resolved.push(known.clone()),
                None => {
                    return Err(FetchDogsError::Validation(format!("Unknown breed: {}", breed)))
                }
            }
        }
        Ok(self.query.set_breeds(resolved))
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> bool {
        self.query.set_sort(sort)
    }

    /// Pages run from 1 to the last page; with no results only page 1
    /// exists. Before the first refresh lands there is no upper bound.
    pub fn set_page(&mut self, page: u32) -> Result<bool> {
        let last = self.listing.total_pages().max(1);
        if page == 0 || (self.listing.has_loaded() && page > last) {
            return Err(FetchDogsError::Validation(format!(
                "Page must be between 1 and {}",
                last
            )));
        }
        Ok(self.query.set_page(page))
    }

    pub fn next_page(&mut self) -> Result<bool> {
        self.set_page(self.query.page() + 1)
    }

    pub fn previous_page(&mut self) -> Result<bool> {
        self.set_page(self.query.page().saturating_sub(1))
    }

    pub fn set_max_distance(&mut self, miles: u32) -> Result<bool> {
        if miles == 0 {
            return Err(FetchDogsError::Validation(
                "Distance must be at least 1 mile".to_string(),
            ));
        }
        Ok(self.query.set_max_distance(miles))
    }

    /// Feed the location type-ahead.
    pub fn location_input(&mut self, text: impl Into<String>) {
        self.locations.input(text);
    }

    /// Wait for the type-ahead to settle; yields the text to look up.
    pub async fn location_due(&mut self) -> String {
        self.locations.due().await
    }

    /// Land the lookup for `query`; lookups overtaken by newer input are dropped
    /// without a notice.
    pub fn apply_location_results(
        &mut self,
        query: &str,
        result: Result<Vec<Location>>,
    ) -> LocationUpdate {
        let update = self.locations.apply(query, result);
        match &update {
            LocationUpdate::Failed(message) => self.notices.error(message.clone()),
            LocationUpdate::Stale => debug(
                self.settings.verbose,
                format!("Dropped location results for '{}'", query),
            ),
            LocationUpdate::Applied => {}
        }
        update
    }

    /// Choose a location from the type-ahead results (1-based).
    pub fn select_location(&mut self, index: usize) -> Result<bool> {
        let location = self
            .locations
            .pick(index)
            .cloned()
            .ok_or_else(|| FetchDogsError::Validation(format!("No location #{}", index)))?;
        Ok(self.query.set_location(Some(location)))
    }

    pub fn clear_location(&mut self) -> bool {
        self.query.set_location(None)
    }

    /// Start a refresh: stamps a new generation and snapshots the query.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        RefreshTicket {
            generation: self.listing.begin(),
            request: ListingRequest::from_query(&self.query),
            known_zip_codes: self.zip_cache.known_zip_codes(),
        }
    }

    /// Land a finished refresh. Location details are cached whatever the
    /// generation; dogs and notices only count for the newest one.
    pub fn apply_listing(&mut self, generation: u64, outcome: ListingOutcome) -> ListingUpdate {
        self.zip_cache.merge(outcome.locations);

        let update = self.listing.apply(generation, outcome.page);
        match &update {
            ListingUpdate::Stale => {
                debug(
                    self.settings.verbose,
                    format!("Dropped listing from superseded refresh #{}", generation),
                );
            }
            ListingUpdate::Committed => {
                for notice in outcome.notices {
                    self.notices.error(notice);
                }
            }
            ListingUpdate::Failed(message) => {
                for notice in outcome.notices {
                    self.notices.error(notice);
                }
                self.notices.error(message.clone());
            }
        }
        update
    }

    /// Refresh and wait for it in place.
    pub async fn refresh(&mut self) -> ListingUpdate {
        let ticket = self.begin_refresh();
        let api = self.api();
        let (generation, outcome) = ticket.run(api.as_ref(), self.settings.verbose).await;
        self.apply_listing(generation, outcome)
    }

    /// Find a dog by its 1-based card number in the tab on screen, or by id
    /// on the page or among favorites.
    pub fn resolve_dog(&self, reference: &str) -> Option<Dog> {
        if let Ok(index) = reference.parse::<usize>() {
            let shown = match self.tab {
                Tab::Search => self.listing.pick(index),
                Tab::Favorites => index.checked_sub(1).and_then(|i| self.favorites.dogs().get(i)),
            };
            if let Some(dog) = shown {
                return Some(dog.clone());
            }
        }
        self.listing
            .find(reference)
            .or_else(|| self.favorites.get(reference))
            .cloned()
    }

    pub fn toggle_favorite(&mut self, reference: &str) -> Result<bool> {
        let dog = self
            .resolve_dog(reference)
            .ok_or_else(|| FetchDogsError::Validation(format!("No dog '{}' on screen", reference)))?;
        Ok(self.favorites.toggle(&dog))
    }

    /// Request a match from the favorites and remember it for display.
    pub async fn generate_match(&mut self) -> Option<Dog> {
        self.last_match = None;

        match request_match(self.api.as_ref(), &self.favorites, self.settings.verbose).await {
            Ok(matched) => {
                if let Some(dog) = &matched {
                    let message = format!(
                        "You've been matched with {}! A {}, {} years old from {}.",
                        dog.name,
                        dog.breed,
                        dog.age,
                        self.zip_cache.label(&dog.zip_code)
                    );
                    self.notices.success(message);
                }
                self.last_match = matched.clone();
                matched
            }
            Err(e) => {
                self.notices.error(e.user_message());
                None
            }
        }
    }

    /// End the session and drop everything the search view built up.
    /// Refreshes still in flight are invalidated.
    pub async fn logout(&mut self) {
        let api = self.api();
        self.session.logout(api.as_ref()).await;

        self.breeds.clear();
        self.query = SearchQuery::new(self.settings.sort, self.settings.max_distance);
        self.listing.reset();
        self.favorites = Favorites::new();
        self.locations = LocationSearch::new(self.settings.debounce, self.settings.location_limit);
        self.last_match = None;
        self.tab = Tab::Search;
    }
}
