use crate::api::client::DEFAULT_BASE_URL;
use crate::location::{DEFAULT_DEBOUNCE, DEFAULT_RESULT_LIMIT};
use crate::models::DEFAULT_MAX_DISTANCE;

pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub fn default_timeout() -> u64 {
    30
}

pub fn default_sort() -> String {
    "breed:asc".to_string()
}

pub fn default_max_distance() -> u32 {
    DEFAULT_MAX_DISTANCE
}

pub fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

pub fn default_result_limit() -> u32 {
    DEFAULT_RESULT_LIMIT
}
