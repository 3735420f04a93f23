// crates/dalemeta-core/src/catalog.rs

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{MetadataError, Result};
use crate::types::{Appliance, BuildingMetadata, DatasetDescription};

const DATASET_TOML: &str = include_str!("../catalog/dataset.toml");
const BUILDINGS_TOML: &str = include_str!("../catalog/buildings.toml");
const APPLIANCE_TOMLS: &[(u32, &str)] = &[
    (1, include_str!("../catalog/house_1.toml")),
    (2, include_str!("../catalog/house_2.toml")),
    (3, include_str!("../catalog/house_3.toml")),
    (4, include_str!("../catalog/house_4.toml")),
    (5, include_str!("../catalog/house_5.toml")),
];

#[derive(Debug, Deserialize)]
struct DatasetFile {
    dataset: DatasetDescription,
}

#[derive(Debug, Deserialize)]
struct BuildingsFile {
    #[serde(rename = "building")]
    buildings: Vec<BuildingSeed>,
}

/// One household's static catalog entry: its instance number plus whatever
/// descriptive metadata was collected for it (possibly none).
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingSeed {
    pub instance: u32,
    #[serde(flatten)]
    pub metadata: BuildingMetadata,
}

#[derive(Debug, Deserialize)]
struct AppliancesFile {
    #[serde(rename = "appliance", default)]
    appliances: Vec<Appliance>,
}

/// The full static catalog: dataset description, household metadata, and the
/// per-household appliance tables. Declarative data, parsed once at startup;
/// the reconciliation engine never reaches back into the raw documents.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub dataset: DatasetDescription,
    pub buildings: Vec<BuildingSeed>,
    appliances: BTreeMap<u32, Vec<Appliance>>,
}

impl Catalog {
    /// Loads the catalog embedded in this crate.
    pub fn load() -> Result<Self> {
        Self::from_toml(DATASET_TOML, BUILDINGS_TOML, APPLIANCE_TOMLS)
    }

    /// Parses a catalog from TOML documents. Public so tests can drive the
    /// pipeline with a reduced catalog.
    pub fn from_toml(
        dataset: &str,
        buildings: &str,
        appliances: &[(u32, &str)],
    ) -> Result<Self> {
        let dataset = toml::from_str::<DatasetFile>(dataset)?.dataset;
        let buildings = toml::from_str::<BuildingsFile>(buildings)?.buildings;

        let mut tables = BTreeMap::new();
        for (instance, text) in appliances {
            tables.insert(*instance, toml::from_str::<AppliancesFile>(text)?.appliances);
        }

        let catalog = Self {
            dataset,
            buildings,
            appliances: tables,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.dataset.number_of_buildings as usize != self.buildings.len() {
            return Err(MetadataError::Validation(format!(
                "dataset claims {} buildings but the catalog lists {}",
                self.dataset.number_of_buildings,
                self.buildings.len()
            )));
        }
        for seed in &self.buildings {
            if !self.appliances.contains_key(&seed.instance) {
                return Err(MetadataError::Validation(format!(
                    "building {} has no appliance table",
                    seed.instance
                )));
            }
        }
        Ok(())
    }

    /// The dataset's fixed civil timezone, in which all raw timestamps are
    /// interpreted.
    pub fn timezone(&self) -> Result<Tz> {
        self.dataset.timezone.parse::<Tz>().map_err(|err| {
            MetadataError::Validation(format!(
                "invalid dataset timezone '{}': {err}",
                self.dataset.timezone
            ))
        })
    }

    pub fn appliances_for(&self, building: u32) -> &[Appliance] {
        self.appliances
            .get(&building)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
