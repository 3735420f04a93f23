// crates/dalemeta-core/src/types.rs

use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use dalemeta_parser::LogBounds;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed interval during which a data stream has recorded values.
/// Serializes to `{start, end}` RFC 3339 strings in the dataset timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeframe {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Timeframe {
    /// Smallest interval covering both operands: min of starts, max of ends.
    /// Commutative and associative, so fold order never matters.
    pub fn union(&self, other: &Timeframe) -> Timeframe {
        Timeframe {
            start: self.start.clone().min(other.start.clone()),
            end: self.end.clone().max(other.end.clone()),
        }
    }
}

impl From<LogBounds> for Timeframe {
    fn from(bounds: LogBounds) -> Self {
        Self {
            start: bounds.start,
            end: bounds.end,
        }
    }
}

/// The meter hardware families present in the dataset. Serialized as the
/// model tag recorded in the output documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceModel {
    EcoManagerWholeHouseTx,
    EcoManagerTxPlug,
    SoundCardPowerMeter,
    CurrentCostTx,
}

impl DeviceModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceModel::EcoManagerWholeHouseTx => "EcoManagerWholeHouseTx",
            DeviceModel::EcoManagerTxPlug => "EcoManagerTxPlug",
            DeviceModel::SoundCardPowerMeter => "SoundCardPowerMeter",
            DeviceModel::CurrentCostTx => "CurrentCostTx",
        }
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Clip {
    pub upper_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preprocessing {
    pub clip: Clip,
}

impl Preprocessing {
    pub fn clip(upper_limit: u32) -> Self {
        Self {
            clip: Clip { upper_limit },
        }
    }
}

/// One metered channel of a household. Channel 0 is reserved as the
/// "not separately metered" sentinel and never appears as a key here;
/// `submeter_of` values 0 and 1 are sentinel top-level references.
#[derive(Debug, Clone, Serialize)]
pub struct Meter {
    pub data_location: String,
    pub timeframe: Timeframe,
    pub device_model: DeviceModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_meter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submeter_of: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessing_applied: Option<Preprocessing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// One side-open activity interval for appliances installed or removed
/// mid-dataset. The strings are kept verbatim from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A sub-component of an appliance. Recursive: a CRT screen inside a
/// television, a DAC inside an audio amplifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceComponent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ApplianceComponent>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One physical appliance from the household catalog. `meters` and
/// `instance` may be absent in the catalog; reconciliation fills them in.
/// The flattened `extra` map carries the catalog's long tail of attributes
/// (nominal_consumption, distributions, on_power_threshold, categories, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Appliance {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meters: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_purchase: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ApplianceComponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_active: Option<Vec<ActivePeriod>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Static descriptive metadata for one household. Every field is optional;
/// some households carry nothing beyond their instance number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<Room>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_occupants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_of_occupants: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_improvements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communal_boiler: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<String>,
}

/// One fully assembled household record, ready for emission.
#[derive(Debug, Clone, Serialize)]
pub struct Building {
    pub instance: u32,
    pub original_name: String,
    #[serde(flatten)]
    pub metadata: BuildingMetadata,
    pub elec_meters: BTreeMap<u32, Meter>,
    pub timeframe: Timeframe,
    pub appliances: Vec<Appliance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub country: String,
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rights {
    pub name: String,
    pub uri: String,
}

/// Dataset-wide descriptive metadata, straight from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDescription {
    pub name: String,
    pub long_name: String,
    pub subject: String,
    pub geospatial_coverage: String,
    pub publisher: String,
    pub related_documents: Vec<String>,
    pub creators: Vec<String>,
    pub contact: String,
    pub institution: String,
    pub description: String,
    pub number_of_buildings: u32,
    pub geo_location: GeoLocation,
    pub timezone: String,
    pub schema: String,
    pub funding: Vec<String>,
    pub rights_list: Vec<Rights>,
    pub description_of_subjects: String,
}

/// The top-level output document: the dataset description plus the computed
/// dataset timeframe and the date string derived from its end.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetDocument {
    #[serde(flatten)]
    pub description: DatasetDescription,
    pub timeframe: Timeframe,
    pub date: String,
}
