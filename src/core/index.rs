//! Static, immutable location index with case-insensitive substring search.
//!
//! Loaded once at startup from the bundled JSON dataset; records whose
//! timezone identifier does not resolve are dropped at load time.

use serde::Deserialize;

use crate::core::timemath;
use crate::errors::AppResult;
use crate::models::{Location, LocationId};

/// Raw dataset record. `timezone` is optional on purpose: entries without a
/// resolvable zone are excluded, not reported.
#[derive(Debug, Deserialize)]
struct RawRecord {
    city: String,
    #[serde(default)]
    city_ascii: String,
    country: String,
    #[serde(default)]
    timezone: Option<String>,
}

pub struct LocationIndex {
    locations: Vec<Location>,
}

impl LocationIndex {
    /// Parse a JSON array of dataset records, dropping entries whose
    /// timezone does not resolve.
    pub fn from_json(data: &str) -> AppResult<Self> {
        let raw: Vec<RawRecord> = serde_json::from_str(data)?;

        let mut locations = Vec::with_capacity(raw.len());
        for record in raw {
            let Some(tz) = record.timezone.as_deref().and_then(timemath::resolve_zone) else {
                continue;
            };
            let id = LocationId(locations.len() as u32);
            locations.push(Location::new(
                id,
                record.city,
                record.country,
                &record.city_ascii,
                tz,
            ));
        }

        Ok(Self { locations })
    }

    /// The dataset shipped inside the binary.
    pub fn bundled() -> AppResult<Self> {
        Self::from_json(include_str!("../../data/cities.json"))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Case-insensitive substring search on the city name (display or ASCII
    /// form), capped at `limit`. Empty queries match nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Location> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.locations
            .iter()
            .filter(|l| l.matches(&needle))
            .take(limit)
            .collect()
    }

    /// Exact match on the canonical `"<name>, <country>"` text.
    pub fn find_canonical(&self, text: &str) -> Option<&Location> {
        let trimmed = text.trim();
        self.locations.iter().find(|l| l.canonical_text() == trimmed)
    }

    /// Case-insensitive match on name and country, used to restore persisted
    /// selections.
    pub fn find_by_name_country(&self, name: &str, country: &str) -> Option<&Location> {
        let name = name.trim().to_lowercase();
        let country = country.trim().to_lowercase();
        self.locations
            .iter()
            .find(|l| l.name_lowercased == name && l.country.to_lowercase() == country)
    }

    /// First location with the given display name, case-insensitive. Used
    /// for the named default pair.
    pub fn find_by_name(&self, name: &str) -> Option<&Location> {
        let name = name.trim().to_lowercase();
        self.locations.iter().find(|l| l.name_lowercased == name)
    }
}
