//! Data model for harvested compatibility records
//!
//! These types mirror the persisted artifact format: every equipment bundle
//! is written as an array of device feature sets, with PascalCase keys.
//! All records are built complete during fan-in and never mutated afterwards.

use serde::Serialize;

/// One finer-grained capability beneath a feature heading
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubFeatureRecord {
    pub name: String,
    pub description: String,
    pub supported: bool,
}

/// One named capability of a device, with optional sub-capabilities
///
/// Order of `sub_features` matches document order on the source page and is
/// never re-sorted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureRecord {
    pub name: String,
    pub description: String,
    pub supported: bool,
    pub sub_features: Vec<SubFeatureRecord>,
}

/// The full feature list of one device model, produced per leaf page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceFeatureSet {
    pub model: String,
    pub manufacturer: String,
    pub features: Vec<FeatureRecord>,
}

/// The unit of persistence: all device feature sets for one car trim in one
/// model year, sorted by `(manufacturer, model)`
#[derive(Debug, Clone)]
pub struct EquipmentBundle {
    pub car_model: String,
    pub model_year: String,
    pub equipment: String,
    pub devices: Vec<DeviceFeatureSet>,
}
