use chrono_tz::Tz;

/// Opaque key of a location inside the index it was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub u32);

/// A city with a resolved IANA timezone. Built once at dataset load,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub country: String,
    /// Precomputed for case-insensitive search.
    pub name_lowercased: String,
    /// Precomputed from the dataset's `city_ascii`, so "Zürich" is
    /// findable as "zurich".
    pub ascii_lowercased: String,
    pub timezone: Tz,
}

impl Location {
    pub fn new(id: LocationId, name: String, country: String, ascii: &str, timezone: Tz) -> Self {
        let name_lowercased = name.to_lowercase();
        let ascii_lowercased = if ascii.is_empty() {
            name_lowercased.clone()
        } else {
            ascii.to_lowercase()
        };
        Self {
            id,
            name,
            country,
            name_lowercased,
            ascii_lowercased,
            timezone,
        }
    }

    /// The exact `"<name>, <country>"` string that identifies this location
    /// uniquely for a location field.
    pub fn canonical_text(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Case-insensitive substring match against the display name or its
    /// ASCII form. `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name_lowercased.contains(needle) || self.ascii_lowercased.contains(needle)
    }
}
