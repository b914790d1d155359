//! Chassis templates
//!
//! A chassis is either standard, with hardpoints fixed on its components,
//! or omni, with hardpoints supplied by swappable pods of its series.

use std::sync::Arc;

use crate::catalog::component::Component;
use crate::catalog::item::EngineSpec;
use crate::catalog::omnipod::OmniPod;
use crate::catalog::upgrades::Upgrades;
use crate::core::types::{ChassisClass, ChassisId, Faction, Location, LocationMap, SeriesId};

/// Pod-specific data of an omni chassis
#[derive(Debug, Clone, PartialEq)]
pub struct OmniLayout {
    /// Pods the chassis ships with; the center torso pod never changes
    pub stock_pods: LocationMap<Arc<OmniPod>>,
    /// Omni chassis upgrades are fixed
    pub upgrades: Upgrades,
}

impl OmniLayout {
    /// The structurally fixed center torso pod
    pub fn center_pod(&self) -> &Arc<OmniPod> {
        &self.stock_pods[Location::CenterTorso]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChassisKind {
    Standard { max_jump_jets: u32 },
    Omni(OmniLayout),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chassis {
    pub id: ChassisId,
    pub name: String,
    pub series: SeriesId,
    pub faction: Faction,
    /// Mass limit in tons
    pub max_mass: f64,
    pub module_slots: u32,
    pub components: LocationMap<Arc<Component>>,
    pub kind: ChassisKind,
}

impl Chassis {
    pub fn class(&self) -> ChassisClass {
        ChassisClass::from_mass(self.max_mass)
    }

    pub fn component(&self, location: Location) -> &Arc<Component> {
        &self.components[location]
    }

    pub fn omni(&self) -> Option<&OmniLayout> {
        match &self.kind {
            ChassisKind::Omni(layout) => Some(layout),
            ChassisKind::Standard { .. } => None,
        }
    }

    pub fn is_omni(&self) -> bool {
        self.omni().is_some()
    }

    /// Engine permanently mounted in the center torso, if any
    pub fn fixed_engine(&self) -> Option<EngineSpec> {
        self.components[Location::CenterTorso]
            .fixed_items
            .iter()
            .find_map(|item| item.engine_spec())
    }

    pub fn total_slots(&self) -> u32 {
        self.components.values().map(|c| c.slots).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item::Item;

    fn layout() -> LocationMap<Arc<Component>> {
        LocationMap::from_fn(|location| Arc::new(Component::new(location, 6, 10)))
    }

    #[test]
    fn test_standard_chassis() {
        let chassis = Chassis {
            id: "hbk-4g".into(),
            name: "Hunchback HBK-4G".into(),
            series: "hunchback".into(),
            faction: Faction::InnerSphere,
            max_mass: 50.0,
            module_slots: 2,
            components: layout(),
            kind: ChassisKind::Standard { max_jump_jets: 0 },
        };
        assert_eq!(chassis.class(), ChassisClass::Medium);
        assert!(!chassis.is_omni());
        assert_eq!(chassis.total_slots(), 48);
        assert_eq!(chassis.fixed_engine(), None);
    }

    #[test]
    fn test_fixed_engine_lookup() {
        let spec = EngineSpec { rating: 375, side_slots: 2, heat_sink_slots: 5 };
        let mut components = layout();
        components[Location::CenterTorso] = Arc::new(
            Component::new(Location::CenterTorso, 12, 30)
                .with_fixed(Arc::new(Item::engine("xl375", "XL 375", 19.0, spec))),
        );
        let chassis = Chassis {
            id: "tbr-prime".into(),
            name: "Timber Wolf Prime".into(),
            series: "timber_wolf".into(),
            faction: Faction::Clan,
            max_mass: 75.0,
            module_slots: 2,
            components,
            kind: ChassisKind::Standard { max_jump_jets: 0 },
        };
        assert_eq!(chassis.fixed_engine(), Some(spec));
    }
}
