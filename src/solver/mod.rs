//! Pod selection for omni chassis.
//!
//! Finds one pod per swappable location so the chassis reaches a minimum
//! hardpoint, jump jet and ECM requirement. Infeasibility is an absent
//! result, never an error.

pub mod requirements;
pub mod search;

pub use requirements::{Demand, Requirements};
pub use search::{PodSearch, SearchStats, SEARCH_ORDER};

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{Catalog, Chassis, OmniPod};
use crate::core::types::{HardpointType, Location, PodId};

/// Pods chosen per location; unlisted locations keep their current pod
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodAssignment {
    pods: BTreeMap<Location, Arc<OmniPod>>,
}

impl PodAssignment {
    pub fn insert(&mut self, location: Location, pod: Arc<OmniPod>) {
        self.pods.insert(location, pod);
    }

    pub fn get(&self, location: Location) -> Option<&Arc<OmniPod>> {
        self.pods.get(&location)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &Arc<OmniPod>)> {
        self.pods.iter().map(|(location, pod)| (*location, pod))
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    /// Hardpoints of one type across the assigned pods
    pub fn hardpoint_count(&self, hardpoint: HardpointType) -> usize {
        self.pods.values().map(|pod| pod.hardpoint_count(hardpoint)).sum()
    }

    pub fn jump_jets(&self) -> u32 {
        self.pods.values().map(|pod| pod.jump_jets).sum()
    }

    pub fn has_ecm(&self) -> bool {
        self.pods.values().any(|pod| pod.has_ecm())
    }

    /// Pod ids per location, for reporting
    pub fn to_ids(&self) -> BTreeMap<Location, PodId> {
        self.pods
            .iter()
            .map(|(location, pod)| (*location, pod.id.clone()))
            .collect()
    }
}

/// Serializable summary of a search outcome
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub chassis: String,
    pub requirements: Requirements,
    pub pods: Option<BTreeMap<Location, PodId>>,
    pub nodes: u64,
    pub pruned: u64,
}

/// Find a pod assignment meeting `requirements`
///
/// Returns `None` when no assignment exists or the chassis is not omni.
pub fn select_pods(
    catalog: &Catalog,
    chassis: &Chassis,
    requirements: &Requirements,
) -> Option<PodAssignment> {
    let Some(mut search) = PodSearch::new(catalog, chassis, requirements) else {
        tracing::debug!("Chassis {} has no swappable pods", chassis.id);
        return None;
    };
    search.run()
}

/// Run a search and summarize it
pub fn report(catalog: &Catalog, chassis: &Chassis, requirements: &Requirements) -> SelectionReport {
    let (pods, stats) = match PodSearch::new(catalog, chassis, requirements) {
        Some(mut search) => {
            let found = search.run();
            (found.map(|assignment| assignment.to_ids()), search.stats())
        }
        None => (None, SearchStats::default()),
    };
    SelectionReport {
        chassis: chassis.id.to_string(),
        requirements: requirements.clone(),
        pods,
        nodes: stats.nodes,
        pruned: stats.pruned,
    }
}
