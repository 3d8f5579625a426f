use super::Location;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_DISTANCE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Breed,
    Name,
    Age,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Field and direction travel together, as `breed:asc` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::new(SortField::Breed, SortDirection::Asc),
        SortOrder::new(SortField::Breed, SortDirection::Desc),
        SortOrder::new(SortField::Name, SortDirection::Asc),
        SortOrder::new(SortField::Name, SortDirection::Desc),
        SortOrder::new(SortField::Age, SortDirection::Asc),
        SortOrder::new(SortField::Age, SortDirection::Desc),
    ];

    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Menu label, e.g. "Age (Oldest)".
    pub fn describe(&self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::Breed, SortDirection::Asc) => "Breed (A-Z)",
            (SortField::Breed, SortDirection::Desc) => "Breed (Z-A)",
            (SortField::Name, SortDirection::Asc) => "Name (A-Z)",
            (SortField::Name, SortDirection::Desc) => "Name (Z-A)",
            (SortField::Age, SortDirection::Asc) => "Age (Youngest)",
            (SortField::Age, SortDirection::Desc) => "Age (Oldest)",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::new(SortField::Breed, SortDirection::Asc)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Breed => "breed",
            SortField::Name => "name",
            SortField::Age => "age",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", field, direction)
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (field, direction) = match lower.split_once(':') {
            Some((field, direction)) => (field, direction),
            None => (lower.as_str(), "asc"),
        };

        let field = match field {
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            "age" => SortField::Age,
            other => return Err(format!("Unknown sort field '{}' (breed, name, age)", other)),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("Unknown sort direction '{}' (asc, desc)", other)),
        };

        Ok(Self::new(field, direction))
    }
}

/// Filter, sort and paging state of the search view.
///
/// Every setter other than [`SearchQuery::set_page`] sends the view back to
/// page 1. Setters return whether anything observable changed, which is the
/// signal to refresh the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    breeds: Vec<String>,
    sort: SortOrder,
    page: u32,
    location: Option<Location>,
    max_distance: u32,
}

impl SearchQuery {
    pub fn new(sort: SortOrder, max_distance: u32) -> Self {
        Self {
            breeds: Vec::new(),
            sort,
            page: 1,
            location: None,
            max_distance,
        }
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn max_distance(&self) -> u32 {
        self.max_distance
    }

    pub fn set_breeds<I, S>(&mut self, breeds: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for breed in breeds {
            let breed = breed.into();
            if !unique.contains(&breed) {
                unique.push(breed);
            }
        }

        let changed = unique != self.breeds;
        self.breeds = unique;
        self.reset_page() || changed
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> bool {
        let changed = sort != self.sort;
        self.sort = sort;
        self.reset_page() || changed
    }

    pub fn set_location(&mut self, location: Option<Location>) -> bool {
        let before = self.location.as_ref().map(|l| l.zip_code.as_str());
        let after = location.as_ref().map(|l| l.zip_code.as_str());
        let changed = before != after;
        self.location = location;
        self.reset_page() || changed
    }

    pub fn set_max_distance(&mut self, miles: u32) -> bool {
        let changed = miles != self.max_distance;
        self.max_distance = miles;
        self.reset_page() || changed
    }

    /// Pure pagination: leaves every filter untouched.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    fn reset_page(&mut self) -> bool {
        let changed = self.page != 1;
        self.page = 1;
        changed
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(SortOrder::default(), DEFAULT_MAX_DISTANCE)
    }
}
