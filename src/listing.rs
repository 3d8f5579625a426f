use crate::api::{DogApi, DogSearchRequest};
use crate::error::{FetchDogsError, Result};
use crate::location::{fetch_missing, nearby_zip_codes, unknown_zip_codes};
use crate::models::{Dog, Location, SearchQuery, SortOrder};
use crate::ui::debug;
use std::collections::HashSet;

pub const PAGE_SIZE: u32 = 20;
pub const NO_NEARBY_LOCATIONS: &str = "No locations found within the selected radius";

/// `ceil(total / PAGE_SIZE)`
pub fn total_pages(total: u64) -> u32 {
    u32::try_from(total.div_ceil(u64::from(PAGE_SIZE))).unwrap_or(u32::MAX)
}

/// Snapshot of the search query taken when a refresh starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub breeds: Vec<String>,
    pub sort: SortOrder,
    pub page: u32,
    pub zip_code: Option<String>,
    pub max_distance: u32,
}

impl ListingRequest {
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            breeds: query.breeds().to_vec(),
            sort: query.sort(),
            page: query.page(),
            zip_code: query.location().map(|l| l.zip_code.clone()),
            max_distance: query.max_distance(),
        }
    }

    pub fn search_request(&self, zip_codes: Vec<String>) -> DogSearchRequest {
        DogSearchRequest {
            size: PAGE_SIZE,
            sort: self.sort,
            breeds: self.breeds.clone(),
            zip_codes,
            from: self.page.saturating_sub(1).saturating_mul(PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingPage {
    pub dogs: Vec<Dog>,
    pub total_pages: u32,
}

/// Everything one refresh produced.
#[derive(Debug)]
pub struct ListingOutcome {
    pub page: Result<ListingPage>,
    /// Non-fatal problems to show even when the page loaded.
    pub notices: Vec<String>,
    /// Newly fetched zip code details for the cache.
    pub locations: Vec<Location>,
}

impl ListingOutcome {
    fn failed(error: FetchDogsError, notices: Vec<String>) -> Self {
        Self {
            page: Err(error),
            notices,
            locations: Vec::new(),
        }
    }
}

/// Run one listing refresh: radius expansion, id search, detail batch,
/// then location details for zip codes not in `known_zip_codes`.
pub async fn fetch_listing(
    api: &dyn DogApi,
    request: &ListingRequest,
    known_zip_codes: &HashSet<String>,
    verbose: bool,
) -> ListingOutcome {
    let mut notices = Vec::new();

    let mut zip_codes = Vec::new();
    if let Some(zip_code) = &request.zip_code {
        let nearby = nearby_zip_codes(api, zip_code, request.max_distance).await;
        if let Some(error) = nearby.error {
            notices.push(error);
        }
        if nearby.zip_codes.is_empty() {
            notices.push(NO_NEARBY_LOCATIONS.to_string());
            return ListingOutcome {
                page: Ok(ListingPage::default()),
                notices,
                locations: Vec::new(),
            };
        }
        zip_codes = nearby.zip_codes;
    }

    let search = request.search_request(zip_codes);
    let found = match api.search_dogs(&search).await {
        Ok(found) => found,
        Err(e) => {
            let error = FetchDogsError::Other(format!("Search failed: {}", e.user_message()));
            return ListingOutcome::failed(error, notices);
        }
    };

    let total_pages = total_pages(found.total);
    if found.result_ids.is_empty() {
        return ListingOutcome {
            page: Ok(ListingPage {
                dogs: Vec::new(),
                total_pages,
            }),
            notices,
            locations: Vec::new(),
        };
    }

    let dogs = match api.dogs(&found.result_ids).await {
        Ok(dogs) => dogs,
        Err(e) => {
            let error = FetchDogsError::Other(format!(
                "Failed to fetch dog details: {}",
                e.user_message()
            ));
            return ListingOutcome::failed(error, notices);
        }
    };

    let missing = unknown_zip_codes(dogs.iter().map(|d| d.zip_code.as_str()), known_zip_codes);
    let locations = match fetch_missing(api, &missing).await {
        Ok(locations) => locations,
        Err(e) => {
            debug(verbose, format!("Failed to fetch location details: {}", e));
            Vec::new()
        }
    };

    ListingOutcome {
        page: Ok(ListingPage { dogs, total_pages }),
        notices,
        locations,
    }
}

/// How an outcome landed on the listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingUpdate {
    Committed,
    Failed(String),
    /// A newer refresh started after this one; the outcome was dropped.
    Stale,
}

/// The dogs currently on screen.
///
/// Each refresh is stamped with a generation; only the newest one may commit,
/// so an older response arriving late cannot overwrite a newer filter.
#[derive(Debug, Default)]
pub struct Listing {
    dogs: Vec<Dog>,
    total_pages: u32,
    loading: bool,
    loaded: bool,
    generation: u64,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a refresh has landed a page, so `total_pages` is a real count.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Empty the listing and invalidate any refresh still in flight.
    pub fn reset(&mut self) {
        self.dogs.clear();
        self.total_pages = 0;
        self.loading = false;
        self.loaded = false;
        self.generation += 1;
    }

    pub fn apply(&mut self, generation: u64, page: Result<ListingPage>) -> ListingUpdate {
        if generation != self.generation {
            return ListingUpdate::Stale;
        }

        self.loading = false;
        match page {
            Ok(page) => {
                self.dogs = page.dogs;
                self.total_pages = page.total_pages;
                self.loaded = true;
                ListingUpdate::Committed
            }
            Err(e) => {
                self.dogs.clear();
                ListingUpdate::Failed(e.user_message())
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Dog> {
        self.dogs.iter().find(|d| d.id == id)
    }

    /// 1-based pick from the current page.
    pub fn pick(&self, index: usize) -> Option<&Dog> {
        index.checked_sub(1).and_then(|i| self.dogs.get(i))
    }
}
