//! In-memory implementation of the geographic collaborator.
//!
//! The reference deployment queries an external airport database; this
//! crate ships a serde-backed atlas so tests and the QA tester can run
//! without one. The boundary layer is free to provide its own
//! [`GeoData`](crate::GeoData) implementation instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::GeoData;
use crate::geo::Location;

/// Airport and country tables for one atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AtlasData {
    pub airports: Vec<Location>,
    /// ISO country code to display name.
    #[serde(default)]
    pub countries: BTreeMap<String, String>,
}

impl AtlasData {
    /// Create empty atlas data (useful for tests)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            airports: Vec::new(),
            countries: BTreeMap::new(),
        }
    }

    /// Load atlas data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid atlas data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Infallible [`GeoData`] over an [`AtlasData`] table.
#[derive(Debug, Clone, Default)]
pub struct MemoryAtlas {
    data: AtlasData,
}

impl MemoryAtlas {
    #[must_use]
    pub const fn new(data: AtlasData) -> Self {
        Self { data }
    }

    /// Parse an atlas from JSON and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid atlas data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        AtlasData::from_json(json).map(Self::new)
    }

    #[must_use]
    pub const fn data(&self) -> &AtlasData {
        &self.data
    }
}

impl GeoData for MemoryAtlas {
    type Error = Infallible;

    fn lookup_location(&self, ident: &str) -> Result<Option<Location>, Self::Error> {
        Ok(self
            .data
            .airports
            .iter()
            .find(|airport| airport.ident == ident)
            .cloned())
    }

    fn candidate_locations(&self, exclude_country: &str) -> Result<Vec<Location>, Self::Error> {
        Ok(self
            .data
            .airports
            .iter()
            .filter(|airport| airport.iso_country != exclude_country)
            .filter(|airport| airport.lat.is_finite() && airport.lon.is_finite())
            .cloned()
            .collect())
    }

    fn country_name(&self, iso_country: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.data.countries.get(iso_country).cloned())
    }

    fn country_codes(&self, exclude_country: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .data
            .countries
            .keys()
            .filter(|code| code.as_str() != exclude_country)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "airports": [
            {
                "ident": "EFHK",
                "name": "Helsinki Vantaa",
                "lat": 60.3172,
                "lon": 24.9633,
                "iso_country": "FI",
                "municipality": "Helsinki"
            },
            {
                "ident": "EETN",
                "name": "Lennart Meri Tallinn",
                "lat": 59.4133,
                "lon": 24.8328,
                "iso_country": "EE"
            }
        ],
        "countries": {
            "FI": "Finland",
            "EE": "Estonia"
        }
    }"#;

    #[test]
    fn atlas_parses_and_answers_lookups() {
        let atlas = MemoryAtlas::from_json(FIXTURE).unwrap();

        let helsinki = atlas.lookup_location("EFHK").unwrap().unwrap();
        assert_eq!(helsinki.municipality.as_deref(), Some("Helsinki"));
        assert!(atlas.lookup_location("ZZZZ").unwrap().is_none());

        assert_eq!(
            atlas.country_name("EE").unwrap().as_deref(),
            Some("Estonia")
        );
        assert!(atlas.country_name("XX").unwrap().is_none());
    }

    #[test]
    fn candidates_and_codes_exclude_the_current_country() {
        let atlas = MemoryAtlas::from_json(FIXTURE).unwrap();

        let candidates = atlas.candidate_locations("FI").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].ident, "EETN");

        assert_eq!(atlas.country_codes("FI").unwrap(), vec!["EE".to_string()]);
    }

    #[test]
    fn empty_atlas_is_harmless() {
        let atlas = MemoryAtlas::new(AtlasData::empty());
        assert!(atlas.lookup_location("EFHK").unwrap().is_none());
        assert!(atlas.candidate_locations("FI").unwrap().is_empty());
        assert!(atlas.country_codes("FI").unwrap().is_empty());
    }
}
