use crate::api::DogApi;
use crate::error::Result;
use crate::models::Location;
use std::collections::{HashMap, HashSet};

/// Zip code to location lookup for card labels.
///
/// Grows for the life of the process; nothing is evicted or refreshed.
#[derive(Debug, Default, Clone)]
pub struct ZipCache {
    entries: HashMap<String, Location>,
}

impl ZipCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, zip_code: &str) -> Option<&Location> {
        self.entries.get(zip_code)
    }

    pub fn contains(&self, zip_code: &str) -> bool {
        self.entries.contains_key(zip_code)
    }

    pub fn known_zip_codes(&self) -> HashSet<String> {
        self.entries.keys().cloned().collect()
    }

    /// Zip codes not cached yet, each once, in first-seen order.
    pub fn missing<'a, I>(&self, zip_codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known = self.known_zip_codes();
        unknown_zip_codes(zip_codes, &known)
    }

    pub fn merge(&mut self, locations: impl IntoIterator<Item = Location>) {
        for location in locations {
            self.entries.insert(location.zip_code.clone(), location);
        }
    }

    /// "City, ST" when known, otherwise the bare zip code.
    pub fn label(&self, zip_code: &str) -> String {
        self.entries
            .get(zip_code)
            .map(|l| l.label())
            .unwrap_or_else(|| zip_code.to_string())
    }
}

pub(crate) fn unknown_zip_codes<'a, I>(zip_codes: I, known: &HashSet<String>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    zip_codes
        .into_iter()
        .filter(|zip| !known.contains(*zip) && seen.insert(*zip))
        .map(|zip| zip.to_string())
        .collect()
}

/// One batch lookup for the given zip codes; no request at all when empty.
pub async fn fetch_missing(api: &dyn DogApi, zip_codes: &[String]) -> Result<Vec<Location>> {
    if zip_codes.is_empty() {
        return Ok(Vec::new());
    }
    api.locations(zip_codes).await
}
