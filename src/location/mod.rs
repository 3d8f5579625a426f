mod cache;
mod debounce;
mod nearby;
mod search;

pub use cache::{fetch_missing, ZipCache};
pub(crate) use cache::unknown_zip_codes;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use nearby::{nearby_zip_codes, NearbyZipCodes};
pub use search::{
    dedupe_by_zip, search_locations, LocationSearch, LocationUpdate, DEFAULT_RESULT_LIMIT,
    MIN_QUERY_CHARS,
};
