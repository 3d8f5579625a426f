use crate::api::models::SearchPage;
use crate::error::{FetchDogsError, Result};
use crate::models::{Dog, Location};
use serde_json::Value;

/// Parse the `/dogs/search` payload into ids and a total count
pub fn parse_search_page(response_json: &Value) -> Result<SearchPage> {
    if response_json.get("resultIds").and_then(|r| r.as_array()).is_none() {
        return Err(FetchDogsError::Malformed(
            "No resultIds in search response".to_string(),
        ));
    }

    serde_json::from_value(response_json.clone())
        .map_err(|e| FetchDogsError::Malformed(format!("Invalid search response: {}", e)))
}

/// Parse the `/dogs` batch payload
pub fn parse_dogs(response_json: &Value) -> Result<Vec<Dog>> {
    if !response_json.is_array() {
        return Err(FetchDogsError::Malformed(
            "Expected an array of dogs".to_string(),
        ));
    }

    serde_json::from_value(response_json.clone())
        .map_err(|e| FetchDogsError::Malformed(format!("Invalid dog record: {}", e)))
}

/// Extract `results` from a `/locations/search` payload
pub fn extract_location_results(response_json: &Value) -> Result<Vec<Location>> {
    let results = response_json
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| FetchDogsError::Malformed("Invalid response format".to_string()))?;

    results
        .iter()
        .map(|entry| {
            serde_json::from_value(entry.clone())
                .map_err(|e| FetchDogsError::Malformed(format!("Invalid location: {}", e)))
        })
        .collect()
}

/// Parse the `/locations` batch payload; unknown zip codes come back as null
pub fn parse_location_batch(response_json: &Value) -> Result<Vec<Location>> {
    let entries = response_json
        .as_array()
        .ok_or_else(|| FetchDogsError::Malformed("Expected an array of locations".to_string()))?;

    let mut locations = Vec::with_capacity(entries.len());
    for entry in entries.iter().filter(|e| !e.is_null()) {
        let location: Location = serde_json::from_value(entry.clone())
            .map_err(|e| FetchDogsError::Malformed(format!("Invalid location: {}", e)))?;
        locations.push(location);
    }

    Ok(locations)
}

/// Extract `zip_codes` from a `/locations/near-by` payload
pub fn extract_zip_codes(response_json: &Value) -> Result<Vec<String>> {
    let zip_codes = response_json
        .get("zip_codes")
        .and_then(|z| z.as_array())
        .ok_or_else(|| {
            FetchDogsError::Malformed("Invalid response format for nearby zip codes".to_string())
        })?;

    Ok(zip_codes
        .iter()
        .filter_map(|z| z.as_str())
        .map(|s| s.to_string())
        .collect())
}

/// Extract the matched dog id from a `/dogs/match` payload
pub fn extract_match(response_json: &Value) -> Result<String> {
    response_json
        .get("match")
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| FetchDogsError::Malformed("No match in response".to_string()))
}
