use crate::domain::model::Track;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only catalog of purchasable tracks. Ships with a built-in default
/// and can be replaced wholesale from a TOML file; nothing in the checkout
/// flow ever mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCatalog {
    pub tracks: Vec<Track>,
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self {
            tracks: vec![
                Track {
                    key: "brand-management".to_string(),
                    title: "Brand Management Immersion".to_string(),
                    duration: "8 Weeks".to_string(),
                    price: 4999,
                },
                Track {
                    key: "growth-marketing".to_string(),
                    title: "Growth Marketing Immersion".to_string(),
                    duration: "8 Weeks".to_string(),
                    price: 4999,
                },
                Track {
                    key: "product-ops".to_string(),
                    title: "Product Operations Immersion".to_string(),
                    duration: "12 Weeks".to_string(),
                    price: 7499,
                },
            ],
        }
    }
}

impl TrackCatalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog: TrackCatalog = toml::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn get(&self, key: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.key == key)
    }
}

impl Validate for TrackCatalog {
    fn validate(&self) -> Result<()> {
        for track in &self.tracks {
            validate_non_empty_string("track.key", &track.key)?;
            validate_non_empty_string("track.title", &track.title)?;
            validate_non_empty_string("track.duration", &track.duration)?;
            validate_positive_number("track.price", track.price, 1)?;
        }
        Ok(())
    }
}
