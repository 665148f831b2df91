use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::GeoLocation;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "nameJa")]
    pub name: String,
}

impl Region {
    pub fn location(&self) -> Result<GeoLocation> {
        GeoLocation::new(self.lat, self.lon)
    }
}

/// Region id → coordinates, as shipped in the region dataset (`{"regions": [...]}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionCatalog {
    pub regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: RegionCatalog = serde_json::from_str(json)?;
        for region in &catalog.regions {
            region.location()?;
        }
        Ok(catalog)
    }

    pub fn find(&self, id: &str) -> Result<&Region> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::UnknownRegion(id.to_string()))
    }

    pub fn locate(&self, id: &str) -> Result<GeoLocation> {
        self.find(id)?.location()
    }
}
