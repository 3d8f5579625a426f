use crate::models::SortOrder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct LocationSearchBody<'a> {
    pub city: &'a str,
    pub size: u32,
}

#[derive(Serialize)]
pub struct NearbyBody<'a> {
    pub zip_code: &'a str,
    pub mile_radius: u32,
}

/// One page of dog identifiers from `/dogs/search`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub result_ids: Vec<String>,
    pub total: u64,
}

/// Query parameters for `/dogs/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct DogSearchRequest {
    pub size: u32,
    pub sort: SortOrder,
    pub breeds: Vec<String>,
    pub zip_codes: Vec<String>,
    /// Offset of the first result; omitted from the query when zero.
    pub from: u32,
}

impl DogSearchRequest {
    /// Pairs in the order they go on the query string. Breeds and zip codes
    /// repeat their key once per value.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("size", self.size.to_string()), ("sort", self.sort.to_string())];

        for breed in &self.breeds {
            pairs.push(("breeds", breed.clone()));
        }
        for zip in &self.zip_codes {
            pairs.push(("zipCodes", zip.clone()));
        }
        if self.from > 0 {
            pairs.push(("from", self.from.to_string()));
        }

        pairs
    }
}
