use super::debounce::Debouncer;
use crate::api::DogApi;
use crate::error::Result;
use crate::models::Location;
use std::collections::HashSet;
use tokio::time::Duration;

pub const MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

/// Keep the first location seen for each zip code.
pub fn dedupe_by_zip(locations: Vec<Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    locations
        .into_iter()
        .filter(|l| seen.insert(l.zip_code.clone()))
        .collect()
}

/// City lookup with duplicates removed.
pub async fn search_locations(api: &dyn DogApi, text: &str, size: u32) -> Result<Vec<Location>> {
    let results = api.search_locations(text, size).await?;
    Ok(dedupe_by_zip(results))
}

/// How a lookup result landed on the type-ahead.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Applied,
    Failed(String),
    /// The input changed after this lookup was sent; the result was dropped.
    Stale,
}

/// Type-ahead state for the location filter.
#[derive(Debug)]
pub struct LocationSearch {
    text: String,
    results: Vec<Location>,
    loading: bool,
    limit: u32,
    debouncer: Debouncer<String>,
}

impl LocationSearch {
    pub fn new(delay: Duration, limit: u32) -> Self {
        Self {
            text: String::new(),
            results: Vec::new(),
            loading: false,
            limit,
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> &[Location] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_pending_query(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record a keystroke. Short input clears results immediately and
    /// cancels any pending lookup.
    pub fn input(&mut self, text: impl Into<String>) {
        self.text = text.into();

        if self.text.chars().count() < MIN_QUERY_CHARS {
            self.debouncer.cancel();
            self.results.clear();
            self.loading = false;
            return;
        }

        self.debouncer.schedule(self.text.clone());
    }

    /// Wait for the quiet window to pass and hand back the text to look up.
    pub async fn due(&mut self) -> String {
        let text = self.debouncer.due().await;
        self.loading = true;
        text
    }

    /// Store the result of the lookup for `query`. Only a lookup for the
    /// text currently in the box may land.
    pub fn apply(&mut self, query: &str, result: Result<Vec<Location>>) -> LocationUpdate {
        if query != self.text {
            return LocationUpdate::Stale;
        }

        self.loading = false;
        match result {
            Ok(locations) => {
                self.results = dedupe_by_zip(locations);
                LocationUpdate::Applied
            }
            Err(e) => {
                self.results.clear();
                LocationUpdate::Failed(format!("Failed to search locations: {}", e.user_message()))
            }
        }
    }

    /// 1-based pick from the current results.
    pub fn pick(&self, index: usize) -> Option<&Location> {
        index.checked_sub(1).and_then(|i| self.results.get(i))
    }
}
