//! Hierarchical crawl engine - the four-level catalog traversal
//!
//! The traversal walks model -> model year -> equipment -> manufacturer ->
//! device model. The top two levels run sequentially; equipment branches of
//! one model year, manufacturers of one equipment, and device models of one
//! manufacturer all fan out concurrently under a global fetch bound.
//! Results flow strictly upward through `Result`-typed joins: the first
//! failed branch aborts its enclosing join, which propagates through every
//! level and terminates the run. A bundle file is written only after the
//! full bundle is assembled, so completed-but-unflushed sibling results are
//! discarded on failure and files already on disk stay valid.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::extract::{
    collect_features, device_entries, equipment_entries, manufacturer_entries, model_entries,
    year_entries, CatalogChild, ExtractError,
};
use crate::output::persist_bundle;
use crate::records::{DeviceFeatureSet, EquipmentBundle};
use crate::{HarvestError, Result};
use futures::future::try_join_all;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// The crawl engine: owns the transport client, the catalog root, and the
/// global fetch bound
pub struct Engine {
    client: Client,
    root_url: String,
    output_dir: PathBuf,
    fetch_limit: Arc<Semaphore>,
}

impl Engine {
    /// Creates an engine from a validated configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.crawler)?;

        Ok(Self {
            client,
            root_url: config.catalog.root_url.clone(),
            output_dir: PathBuf::from(&config.output.directory),
            fetch_limit: Arc::new(Semaphore::new(config.crawler.max_concurrent_fetches)),
        })
    }

    /// Runs the full traversal from the catalog root
    ///
    /// Terminates after every reachable equipment bundle has been written,
    /// or on the first unrecovered failure.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("Starting harvest from {}", self.root_url);
        let start_time = std::time::Instant::now();
        let mut bundles = 0usize;

        let root_page = self.fetch("").await?;
        let models = self.extract("", model_entries(&root_page))?;

        for model in models {
            tracing::info!("Car model: {}", model.label);
            let years_page = self.fetch(&model.target).await?;
            let years = self.extract(&model.target, year_entries(&years_page))?;

            for year in years {
                tracing::debug!("Model year: {} {}", model.label, year.label);
                let equipment_page = self.fetch(&year.target).await?;
                let equipments = self.extract(&year.target, equipment_entries(&equipment_page))?;

                // Fire every equipment branch of this model year at once and
                // wait for all of them before advancing to the next year.
                bundles += equipments.len();
                let branches = equipments
                    .into_iter()
                    .map(|equipment| self.harvest_equipment(&model.label, &year.label, equipment));
                try_join_all(branches).await?;
            }
        }

        tracing::info!(
            "Harvest complete: {} bundles in {:?}",
            bundles,
            start_time.elapsed()
        );
        Ok(())
    }

    /// Assembles and persists the bundle of one equipment node
    async fn harvest_equipment(
        &self,
        car_model: &str,
        model_year: &str,
        equipment: CatalogChild,
    ) -> Result<()> {
        let devices = self.equipment_devices(&equipment).await?;

        let bundle = EquipmentBundle {
            car_model: car_model.to_string(),
            model_year: model_year.to_string(),
            equipment: equipment.label,
            devices,
        };

        let path = persist_bundle(&self.output_dir, &bundle)?;
        tracing::info!(
            "Persisted {} device(s) to {}",
            bundle.devices.len(),
            path.display()
        );
        Ok(())
    }

    /// Collects every device feature set reachable below one equipment node
    ///
    /// Fans out over manufacturers, flattens the results, and sorts by
    /// `(manufacturer, model)` so the output is independent of fetch
    /// completion order.
    async fn equipment_devices(&self, equipment: &CatalogChild) -> Result<Vec<DeviceFeatureSet>> {
        let page = self.fetch(&equipment.target).await?;
        let manufacturers = self.extract(&equipment.target, manufacturer_entries(&page))?;

        let branches = manufacturers
            .into_iter()
            .map(|manufacturer| self.manufacturer_devices(manufacturer));
        let per_manufacturer = try_join_all(branches).await?;

        let mut devices: Vec<DeviceFeatureSet> =
            per_manufacturer.into_iter().flatten().collect();
        sort_device_sets(&mut devices);
        Ok(devices)
    }

    /// Collects the feature sets of every device model of one manufacturer
    ///
    /// Output order within one manufacturer matches the device listing's
    /// document order until the equipment-level sort overrides it.
    async fn manufacturer_devices(
        &self,
        manufacturer: CatalogChild,
    ) -> Result<Vec<DeviceFeatureSet>> {
        let page = self.fetch(&manufacturer.target).await?;
        let models = self.extract(&manufacturer.target, device_entries(&page))?;

        let branches = models
            .into_iter()
            .map(|device| self.device_feature_set(manufacturer.label.clone(), device));
        try_join_all(branches).await
    }

    /// Fetches one device leaf page and collects its feature list
    async fn device_feature_set(
        &self,
        manufacturer: String,
        device: CatalogChild,
    ) -> Result<DeviceFeatureSet> {
        let page = self.fetch(&device.target).await?;
        let features = self.extract(&device.target, collect_features(&page))?;

        tracing::info!("{} {}", manufacturer, device.label);
        Ok(DeviceFeatureSet {
            model: device.label,
            manufacturer,
            features,
        })
    }

    /// Fetches one catalog page, holding a fetch permit for the network time
    ///
    /// `target` is a relative navigation fragment appended verbatim to the
    /// catalog root; the empty fragment fetches the root itself. The permit
    /// is released before parsing so slots are held only while a request is
    /// outstanding.
    async fn fetch(&self, target: &str) -> Result<String> {
        let url = format!("{}{}", self.root_url, target);
        let _permit = self
            .fetch_limit
            .acquire()
            .await
            .expect("fetch semaphore is never closed");
        tracing::debug!("Fetching {}", url);
        fetch_page(&self.client, &url).await
    }

    /// Attaches the failing page's URL to an extraction error
    fn extract<T>(
        &self,
        target: &str,
        extracted: std::result::Result<T, ExtractError>,
    ) -> Result<T> {
        extracted.map_err(|source| HarvestError::Extraction {
            url: format!("{}{}", self.root_url, target),
            source,
        })
    }
}

/// Sorts device feature sets by `(manufacturer, model)` ascending
///
/// `str` ordering is byte-wise, giving the exact-ordinal, case-sensitive
/// comparison the output contract requires.
fn sort_device_sets(devices: &mut [DeviceFeatureSet]) {
    devices.sort_by(|a, b| {
        a.manufacturer
            .cmp(&b.manufacturer)
            .then_with(|| a.model.cmp(&b.model))
    });
}
