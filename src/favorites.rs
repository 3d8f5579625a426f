use crate::api::DogApi;
use crate::error::{FetchDogsError, Result};
use crate::models::Dog;
use crate::ui::debug;

pub const NO_FAVORITES: &str = "Please select some favorite dogs first";
pub const MATCH_FAILED: &str = "Failed to generate match";

/// Liked dogs in the order they were liked, at most once each.
#[derive(Debug, Default, Clone)]
pub struct Favorites {
    dogs: Vec<Dog>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the dog if absent, remove it if present. Returns whether it is
    /// now a favorite.
    pub fn toggle(&mut self, dog: &Dog) -> bool {
        if self.contains(&dog.id) {
            self.dogs.retain(|fav| fav.id != dog.id);
            false
        } else {
            self.dogs.push(dog.clone());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.dogs.iter().any(|fav| fav.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Dog> {
        self.dogs.iter().find(|fav| fav.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.dogs.iter().map(|fav| fav.id.clone()).collect()
    }

    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }
}

/// Ask the service to pick one dog from the favorites.
///
/// An empty favorites list is rejected without a request. The returned id is
/// resolved against the favorites held locally; an id we do not hold yields
/// `Ok(None)`.
pub async fn request_match(
    api: &dyn DogApi,
    favorites: &Favorites,
    verbose: bool,
) -> Result<Option<Dog>> {
    if favorites.is_empty() {
        return Err(FetchDogsError::Validation(NO_FAVORITES.to_string()));
    }

    let matched = api.match_dog(&favorites.ids()).await.map_err(|e| {
        debug(verbose, format!("Match request failed: {}", e));
        FetchDogsError::Other(MATCH_FAILED.to_string())
    })?;

    let dog = favorites.get(&matched).cloned();
    if dog.is_none() {
        debug(
            verbose,
            format!("Matched id {} is not among the favorites", matched),
        );
    }
    Ok(dog)
}
