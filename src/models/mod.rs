mod dog;
mod location;
mod query;
mod session;

pub use dog::Dog;
pub use location::Location;
pub use query::{SearchQuery, SortDirection, SortField, SortOrder, DEFAULT_MAX_DISTANCE};
pub use session::SessionRecord;
