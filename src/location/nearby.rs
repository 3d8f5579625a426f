use crate::api::DogApi;

/// Zip codes inside the search radius. `error` is set when the lookup failed
/// and `zip_codes` fell back to the selected zip alone.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyZipCodes {
    pub zip_codes: Vec<String>,
    pub error: Option<String>,
}

pub async fn nearby_zip_codes(api: &dyn DogApi, zip_code: &str, mile_radius: u32) -> NearbyZipCodes {
    match api.nearby_zip_codes(zip_code, mile_radius).await {
        Ok(zip_codes) => NearbyZipCodes {
            zip_codes,
            error: None,
        },
        Err(e) => NearbyZipCodes {
            zip_codes: vec![zip_code.to_string()],
            error: Some(format!("Failed to fetch nearby locations: {}", e.user_message())),
        },
    }
}
