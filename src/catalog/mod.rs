//! Read-only chassis, item and omnipod catalog.
//!
//! The catalog is built once (from TOML or programmatically) and then
//! shared by reference. Registration validates cross references so the
//! checker and solver never see a dangling id or a missing location.

pub mod chassis;
pub mod component;
pub mod item;
pub mod loader;
pub mod omnipod;
pub mod upgrades;

pub use chassis::{Chassis, ChassisKind, OmniLayout};
pub use component::Component;
pub use item::{EngineSpec, Item, ItemKind};
pub use omnipod::{Modifier, ModifierOp, OmniPod};
pub use upgrades::{ArmorKind, HeatSinkKind, StructureKind, Upgrades};

use ahash::AHashMap;
use std::sync::Arc;

use crate::core::config::RulesConfig;
use crate::core::error::{BayError, Result};
use crate::core::types::{ChassisId, ItemId, Location, LocationMap, PodId, SeriesId};

/// Registry of every chassis, item and omnipod
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rules: Arc<RulesConfig>,
    items: AHashMap<ItemId, Arc<Item>>,
    pods: AHashMap<PodId, Arc<OmniPod>>,
    /// Candidate pods per (series, location), in registration order
    pods_by_slot: AHashMap<(SeriesId, Location), Vec<Arc<OmniPod>>>,
    chassis: AHashMap<ChassisId, Arc<Chassis>>,
}

impl Catalog {
    /// Create an empty catalog governed by `rules`
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules: Arc::new(rules),
            ..Self::default()
        }
    }

    pub fn rules(&self) -> &Arc<RulesConfig> {
        &self.rules
    }

    /// Register an item, replacing any item with the same id
    pub fn add_item(&mut self, item: Item) -> Arc<Item> {
        let item = Arc::new(item);
        self.items.insert(item.id.clone(), Arc::clone(&item));
        item
    }

    /// Register an omnipod, replacing any pod with the same id, and index
    /// it under its series and location
    pub fn add_pod(&mut self, pod: OmniPod) -> Arc<OmniPod> {
        let pod = Arc::new(pod);
        if let Some(old) = self.pods.insert(pod.id.clone(), Arc::clone(&pod)) {
            if let Some(candidates) = self.pods_by_slot.get_mut(&(old.series.clone(), old.location)) {
                candidates.retain(|candidate| candidate.id != old.id);
            }
        }
        self.pods_by_slot
            .entry((pod.series.clone(), pod.location))
            .or_default()
            .push(Arc::clone(&pod));
        pod
    }

    /// Register a chassis after checking its components and stock pods
    pub fn add_chassis(&mut self, chassis: Chassis) -> Result<Arc<Chassis>> {
        for (location, component) in chassis.components.iter() {
            if component.location != location {
                return Err(BayError::MissingLocation {
                    chassis: chassis.id.clone(),
                    location,
                });
            }
            component
                .validate()
                .map_err(|reason| BayError::InvalidComponent {
                    chassis: chassis.id.clone(),
                    location,
                    reason,
                })?;
        }

        if let Some(layout) = chassis.omni() {
            for (location, pod) in layout.stock_pods.iter() {
                check_pod_fits(&chassis, pod, location)?;

                let component = chassis.component(location);
                let needed = component.fixed_slots() + pod.fixed_slots() + pod.toggle_slots();
                if needed > component.slots {
                    return Err(BayError::InvalidComponent {
                        chassis: chassis.id.clone(),
                        location,
                        reason: format!(
                            "stock pod {} needs {} slots but only {} exist",
                            pod.id, needed, component.slots
                        ),
                    });
                }
            }
        }

        let chassis = Arc::new(chassis);
        self.chassis.insert(chassis.id.clone(), Arc::clone(&chassis));
        Ok(chassis)
    }

    pub fn item(&self, id: &ItemId) -> Result<Arc<Item>> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| BayError::UnknownItem(id.clone()))
    }

    pub fn pod(&self, id: &PodId) -> Result<Arc<OmniPod>> {
        self.pods
            .get(id)
            .cloned()
            .ok_or_else(|| BayError::UnknownPod(id.clone()))
    }

    pub fn chassis(&self, id: &ChassisId) -> Result<Arc<Chassis>> {
        self.chassis
            .get(id)
            .cloned()
            .ok_or_else(|| BayError::UnknownChassis(id.clone()))
    }

    /// Per-location skeleton of a chassis
    pub fn components<'a>(&self, chassis: &'a Chassis) -> &'a LocationMap<Arc<Component>> {
        &chassis.components
    }

    /// Candidate pods for one location of a series; empty when none exist
    pub fn pods(&self, series: &SeriesId, location: Location) -> &[Arc<OmniPod>] {
        self.pods_by_slot
            .get(&(series.clone(), location))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn items(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn pod_count(&self) -> usize {
        self.pods.len()
    }

    pub fn chassis_count(&self) -> usize {
        self.chassis.len()
    }
}

/// Fails unless `pod` belongs to the chassis series and fits `location`
pub fn check_pod_fits(chassis: &Chassis, pod: &OmniPod, location: Location) -> Result<()> {
    if pod.series != chassis.series {
        return Err(BayError::PodSeriesMismatch {
            pod: pod.id.clone(),
            pod_series: pod.series.clone(),
            chassis: chassis.id.clone(),
            chassis_series: chassis.series.clone(),
        });
    }
    if pod.location != location {
        return Err(BayError::PodLocationMismatch {
            pod: pod.id.clone(),
            expected: pod.location,
            actual: location,
        });
    }
    Ok(())
}
