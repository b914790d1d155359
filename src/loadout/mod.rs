//! Configured loadout: one chassis plus everything mounted on it.
//!
//! Every mutation is checked before it is committed. Mutations are applied
//! to a copy, the copy is audited, and only a clean copy replaces `self`,
//! so a refused operation leaves the loadout exactly as it was.

pub mod component;

pub use component::{ConfiguredComponent, Mount, Toggle};

use std::sync::Arc;

use crate::catalog::{Catalog, Chassis, ChassisKind, EngineSpec, Item, ItemKind, Modifier, OmniPod, Upgrades};
use crate::core::config::RulesConfig;
use crate::core::error::Result;
use crate::core::types::{ChassisId, HardpointType, ItemId, Location, LocationMap};
use crate::equip::{can_equip, can_equip_at, can_equip_local, EquipResult, EquipResultKind};
use crate::solver::PodAssignment;

/// Slack allowed when comparing summed masses against the mass limit
pub(crate) const MASS_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Loadout {
    chassis: Arc<Chassis>,
    rules: Arc<RulesConfig>,
    components: LocationMap<ConfiguredComponent>,
    upgrades: Upgrades,
    modules: Vec<Arc<Item>>,
}

impl Loadout {
    /// Create an empty loadout of a catalog chassis
    pub fn new(catalog: &Catalog, chassis: &ChassisId) -> Result<Self> {
        let chassis = catalog.chassis(chassis)?;
        Ok(Self::from_chassis(chassis, Arc::clone(catalog.rules())))
    }

    /// Create an empty loadout; omni chassis start with their stock pods
    pub fn from_chassis(chassis: Arc<Chassis>, rules: Arc<RulesConfig>) -> Self {
        let (components, upgrades) = match &chassis.kind {
            ChassisKind::Standard { .. } => (
                LocationMap::from_fn(|location| {
                    ConfiguredComponent::new(Arc::clone(&chassis.components[location]), Mount::Fixed)
                }),
                Upgrades::default(),
            ),
            ChassisKind::Omni(layout) => (
                LocationMap::from_fn(|location| {
                    ConfiguredComponent::new(
                        Arc::clone(&chassis.components[location]),
                        Mount::Pod(Arc::clone(&layout.stock_pods[location])),
                    )
                }),
                layout.upgrades,
            ),
        };
        Self {
            chassis,
            rules,
            components,
            upgrades,
            modules: Vec::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn chassis(&self) -> &Arc<Chassis> {
        &self.chassis
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn upgrades(&self) -> Upgrades {
        self.upgrades
    }

    pub fn component(&self, location: Location) -> &ConfiguredComponent {
        &self.components[location]
    }

    pub fn components(&self) -> impl Iterator<Item = &ConfiguredComponent> {
        self.components.values()
    }

    pub fn pod(&self, location: Location) -> Option<&Arc<OmniPod>> {
        self.components[location].pod()
    }

    pub fn modules(&self) -> &[Arc<Item>] {
        &self.modules
    }

    /// User-equipped items across all locations
    pub fn items(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.components.values().flat_map(|c| c.items().iter())
    }

    /// The engine, fixed or equipped
    pub fn engine(&self) -> Option<EngineSpec> {
        self.components[Location::CenterTorso]
            .fixed_items()
            .chain(self.components[Location::CenterTorso].items().iter())
            .find_map(|item| item.engine_spec())
    }

    /// Heat sinks that can still be placed inside the engine
    pub fn engine_heat_sink_slack(&self) -> u32 {
        match self.engine() {
            Some(engine) => engine
                .heat_sink_slots
                .saturating_sub(self.center_heat_sinks().count() as u32),
            None => 0,
        }
    }

    fn center_heat_sinks(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.components[Location::CenterTorso]
            .items()
            .iter()
            .filter(|item| item.is_heat_sink())
    }

    /// Slots consumed at one location, including wide engine reservations
    pub fn slots_used_at(&self, location: Location) -> u32 {
        let component = &self.components[location];
        let mut used = component.fixed_slots()
            + component.items().iter().map(|item| item.slots).sum::<u32>();

        if let Some(engine) = self.engine() {
            if location == Location::CenterTorso {
                let discount: u32 = self
                    .center_heat_sinks()
                    .take(engine.heat_sink_slots as usize)
                    .map(|item| item.slots)
                    .sum();
                used -= discount;
            } else if location.is_side_torso() {
                used += engine.side_slots;
            }
        }
        used
    }

    pub fn free_slots_at(&self, location: Location) -> u32 {
        self.components[location]
            .definition()
            .slots
            .saturating_sub(self.slots_used_at(location))
    }

    /// Slots used across the chassis, including upgrade reservations
    pub fn slots_used(&self) -> u32 {
        let located: u32 = Location::ALL.iter().map(|l| self.slots_used_at(*l)).sum();
        located + self.dynamic_slots()
    }

    pub fn free_slots(&self) -> u32 {
        self.chassis.total_slots().saturating_sub(self.slots_used())
    }

    pub fn dynamic_slots(&self) -> u32 {
        self.upgrades.dynamic_slots(self.chassis.faction, &self.rules)
    }

    pub fn armor_total(&self) -> u32 {
        self.components.values().map(|c| c.armor_total()).sum()
    }

    /// Current mass in tons
    pub fn mass(&self) -> f64 {
        let structure = self.upgrades.structure_mass(self.chassis.max_mass, &self.rules);
        let armor = self
            .upgrades
            .armor_mass(self.armor_total(), self.chassis.faction, &self.rules);
        let items: f64 = self.components.values().map(|c| c.item_mass()).sum();
        let modules: f64 = self.modules.iter().map(|m| m.mass).sum();
        structure + armor + items + modules
    }

    pub fn free_mass(&self) -> f64 {
        self.chassis.max_mass - self.mass()
    }

    pub fn jump_jet_capacity(&self) -> u32 {
        match &self.chassis.kind {
            ChassisKind::Standard { max_jump_jets } => *max_jump_jets,
            ChassisKind::Omni(_) => self.components.values().map(|c| c.jump_jet_capacity()).sum(),
        }
    }

    pub fn jump_jet_count(&self) -> u32 {
        self.items().filter(|item| item.is_jump_jet()).count() as u32
    }

    /// Total hardpoints of one type across all locations
    pub fn hardpoint_count(&self, hardpoint: HardpointType) -> usize {
        self.components.values().map(|c| c.hardpoint_count(hardpoint)).sum()
    }

    /// Modifiers granted by the assigned pods
    pub fn modifiers(&self) -> Vec<&Modifier> {
        self.components
            .values()
            .filter_map(|c| c.pod())
            .flat_map(|pod| pod.modifiers.iter())
            .collect()
    }

    /// Check every invariant of a complete loadout
    ///
    /// Returns the first violation found, or success.
    pub fn audit(&self) -> EquipResult {
        let heat_sinks = self.upgrades.heat_sinks;
        let mismatched = self.items().any(|item| match item.kind {
            ItemKind::HeatSink(kind) => kind != heat_sinks,
            _ => false,
        });
        if mismatched {
            return EquipResult::new(EquipResultKind::IncompatibleUpgrades);
        }

        if self.free_mass() < -MASS_TOLERANCE {
            return EquipResult::new(EquipResultKind::TooHeavy);
        }

        for location in Location::ALL {
            let component = &self.components[location];
            if self.slots_used_at(location) > component.definition().slots {
                return EquipResult::at(EquipResultKind::NotEnoughSlots, location);
            }
            let overdrawn = HardpointType::ALL
                .iter()
                .any(|h| component.hardpoints_used(*h) > component.hardpoint_count(*h));
            if overdrawn {
                return EquipResult::at(EquipResultKind::NoFreeHardpoints, location);
            }
            if component.armor_total() > component.definition().armor_cap(&self.rules) {
                return EquipResult::at(EquipResultKind::CapacityReached, location);
            }
        }

        if self.slots_used() > self.chassis.total_slots() {
            return EquipResult::new(EquipResultKind::NotEnoughSlots);
        }

        if self.jump_jet_count() > self.jump_jet_capacity() {
            return EquipResult::new(EquipResultKind::CapacityReached);
        }

        EquipResult::SUCCESS
    }

    // ========================================================================
    // Checked mutations
    // ========================================================================

    /// Equip an item at the first location that accepts it
    pub fn equip(&mut self, item: Arc<Item>) -> EquipResult {
        let result = can_equip(self, &item);
        if !result.is_success() {
            return self.refuse("equip", &item.id, result);
        }
        if item.is_module() {
            self.modules.push(item);
            return EquipResult::SUCCESS;
        }
        let Some(location) = self.placement_for(&item) else {
            return self.refuse("equip", &item.id, EquipResult::new(EquipResultKind::NotSupported));
        };
        let id = item.id.clone();
        self.commit("equip", &id, |loadout| {
            loadout.components[location].push_item(item);
            EquipResult::SUCCESS
        })
    }

    /// Equip an item at a specific location
    pub fn equip_at(&mut self, location: Location, item: Arc<Item>) -> EquipResult {
        if item.is_module() {
            return self.refuse(
                "equip_at",
                &item.id,
                EquipResult::at(EquipResultKind::NotSupported, location),
            );
        }
        let result = can_equip_at(self, location, &item);
        if !result.is_success() {
            return self.refuse("equip_at", &item.id, result);
        }
        let id = item.id.clone();
        self.commit("equip_at", &id, |loadout| {
            loadout.components[location].push_item(item);
            EquipResult::SUCCESS
        })
    }

    /// Remove one equipped copy of an item; fixed items cannot be removed
    ///
    /// Removing an engine can push its former heat sinks out of the
    /// center torso's room, so removals are audited too.
    pub fn unequip(&mut self, location: Location, id: &ItemId) -> EquipResult {
        self.commit("unequip", id, |loadout| {
            match loadout.components[location].remove_item(id) {
                Some(_) => EquipResult::SUCCESS,
                None => EquipResult::at(EquipResultKind::NotSupported, location),
            }
        })
    }

    pub fn unequip_module(&mut self, id: &ItemId) -> EquipResult {
        match self.modules.iter().position(|m| &m.id == id) {
            Some(index) => {
                self.modules.remove(index);
                EquipResult::SUCCESS
            }
            None => self.refuse("unequip_module", id, EquipResult::new(EquipResultKind::NotSupported)),
        }
    }

    /// Set front and back armor of one location
    pub fn set_armor(&mut self, location: Location, front: u32, back: u32) -> EquipResult {
        let id = ItemId(format!("armor:{}", location.short_name()));
        if back > 0 && !location.is_two_sided() {
            return self.refuse("set_armor", &id, EquipResult::at(EquipResultKind::NotSupported, location));
        }
        let cap = self.components[location].definition().armor_cap(&self.rules);
        if front + back > cap {
            return self.refuse(
                "set_armor",
                &id,
                EquipResult::at(EquipResultKind::CapacityReached, location),
            );
        }
        self.commit("set_armor", &id, |loadout| {
            loadout.components[location].set_armor(front, back);
            EquipResult::SUCCESS
        })
    }

    /// Replace the upgrade selection; omni chassis upgrades are fixed
    pub fn set_upgrades(&mut self, upgrades: Upgrades) -> EquipResult {
        let id = ItemId("upgrades".into());
        if upgrades == self.upgrades {
            return EquipResult::SUCCESS;
        }
        if self.chassis.is_omni() {
            return self.refuse("set_upgrades", &id, EquipResult::new(EquipResultKind::NotSupported));
        }
        self.commit("set_upgrades", &id, |loadout| {
            loadout.upgrades = upgrades;
            EquipResult::SUCCESS
        })
    }

    /// Swap the pod at the pod's own location
    pub fn change_pod(&mut self, pod: Arc<OmniPod>) -> EquipResult {
        let id = ItemId(pod.id.0.clone());
        let result = self.pod_change_allowed(&pod);
        if !result.is_success() {
            return self.refuse("change_pod", &id, result);
        }
        self.commit("change_pod", &id, |loadout| {
            let location = pod.location;
            loadout.components[location].set_pod(pod);
            EquipResult::SUCCESS
        })
    }

    /// Apply a whole pod assignment, all or nothing
    pub fn apply_pods(&mut self, assignment: &PodAssignment) -> EquipResult {
        let id = ItemId("pod_assignment".into());
        for (location, pod) in assignment.iter() {
            if pod.location != location {
                return self.refuse(
                    "apply_pods",
                    &id,
                    EquipResult::at(EquipResultKind::NotSupported, location),
                );
            }
            let result = self.pod_change_allowed(pod);
            if !result.is_success() {
                return self.refuse("apply_pods", &id, result);
            }
        }
        self.commit("apply_pods", &id, |loadout| {
            for (location, pod) in assignment.iter() {
                loadout.components[location].set_pod(Arc::clone(pod));
            }
            EquipResult::SUCCESS
        })
    }

    /// Enable or disable a toggleable pod item
    pub fn toggle(&mut self, location: Location, id: &ItemId, enabled: bool) -> EquipResult {
        self.commit("toggle", id, |loadout| {
            if loadout.components[location].set_toggle(id, enabled) {
                EquipResult::SUCCESS
            } else {
                EquipResult::at(EquipResultKind::NotSupported, location)
            }
        })
    }

    fn pod_change_allowed(&self, pod: &OmniPod) -> EquipResult {
        let Some(layout) = self.chassis.omni() else {
            return EquipResult::at(EquipResultKind::NotSupported, pod.location);
        };
        if pod.series != self.chassis.series {
            return EquipResult::at(EquipResultKind::NotSupported, pod.location);
        }
        if pod.location == Location::CenterTorso && pod.id != layout.center_pod().id {
            return EquipResult::at(EquipResultKind::NotSupported, pod.location);
        }
        EquipResult::SUCCESS
    }

    /// Where `equip` puts an item the checker accepted
    fn placement_for(&self, item: &Item) -> Option<Location> {
        if item.is_engine() {
            return Some(Location::CenterTorso);
        }
        if item.is_heat_sink()
            && self.engine_heat_sink_slack() > 0
            && can_equip_local(self, Location::CenterTorso, item).is_success()
        {
            return Some(Location::CenterTorso);
        }
        Location::ALL
            .into_iter()
            .find(|location| can_equip_local(self, *location, item).is_success())
    }

    /// Apply `change` to a copy and keep it only if the copy audits clean
    fn commit(
        &mut self,
        operation: &str,
        id: &ItemId,
        change: impl FnOnce(&mut Loadout) -> EquipResult,
    ) -> EquipResult {
        let mut candidate = self.clone();
        let mut result = change(&mut candidate);
        if result.is_success() {
            result = candidate.audit();
        }
        if !result.is_success() {
            return self.refuse(operation, id, result);
        }
        *self = candidate;
        EquipResult::SUCCESS
    }

    fn refuse(&self, operation: &str, id: &ItemId, result: EquipResult) -> EquipResult {
        tracing::debug!("Refused {} of {} on {}: {}", operation, id, self.chassis.id, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArmorKind, Component, HeatSinkKind, StructureKind};
    use crate::core::types::Faction;

    fn chassis(max_mass: f64) -> Arc<Chassis> {
        Arc::new(Chassis {
            id: "test".into(),
            name: "Test".into(),
            series: "test".into(),
            faction: Faction::InnerSphere,
            max_mass,
            module_slots: 2,
            components: LocationMap::from_fn(|location| Arc::new(Component::new(location, 12, 20))),
            kind: ChassisKind::Standard { max_jump_jets: 0 },
        })
    }

    fn loadout(max_mass: f64) -> Loadout {
        Loadout::from_chassis(chassis(max_mass), Arc::new(RulesConfig::default()))
    }

    fn engine(side_slots: u32, heat_sink_slots: u32) -> Arc<Item> {
        Arc::new(Item::engine(
            "engine",
            "Engine",
            10.0,
            EngineSpec {
                rating: 300,
                side_slots,
                heat_sink_slots,
            },
        ))
    }

    #[test]
    fn test_empty_loadout_is_structure_only() {
        let loadout = loadout(40.0);
        assert!((loadout.mass() - 4.0).abs() < 1e-9);
        assert_eq!(loadout.slots_used(), 0);
        assert_eq!(loadout.free_slots(), 96);
        assert!(loadout.audit().is_success());
    }

    #[test]
    fn test_wide_engine_reserves_side_torsos() {
        let mut loadout = loadout(50.0);
        assert!(loadout.equip(engine(3, 0)).is_success());
        assert_eq!(loadout.slots_used_at(Location::CenterTorso), 6);
        assert_eq!(loadout.slots_used_at(Location::LeftTorso), 3);
        assert_eq!(loadout.slots_used_at(Location::RightTorso), 3);
        assert_eq!(loadout.slots_used_at(Location::LeftArm), 0);
        assert_eq!(loadout.slots_used(), 12);
    }

    #[test]
    fn test_engine_heat_sinks_are_free() {
        let mut loadout = loadout(50.0);
        assert!(loadout.equip(engine(0, 2)).is_success());
        let sink = Arc::new(Item::heat_sink("hs", HeatSinkKind::Single));
        for _ in 0..3 {
            assert!(loadout.equip(Arc::clone(&sink)).is_success());
        }
        // Two ride in the engine, the third goes to the first open location
        assert_eq!(loadout.component(Location::CenterTorso).items().len(), 3);
        assert_eq!(loadout.slots_used_at(Location::CenterTorso), 6);
        assert_eq!(loadout.component(Location::Head).items().len(), 1);
        assert_eq!(loadout.engine_heat_sink_slack(), 0);
    }

    #[test]
    fn test_upgrades_move_mass_and_slots() {
        let mut loadout = loadout(50.0);
        assert!(loadout.set_armor(Location::CenterTorso, 32, 0).is_success());
        let standard = loadout.mass();

        let upgrades = Upgrades {
            structure: StructureKind::EndoSteel,
            armor: ArmorKind::FerroFibrous,
            heat_sinks: HeatSinkKind::Single,
        };
        assert!(loadout.set_upgrades(upgrades).is_success());
        assert_eq!(loadout.dynamic_slots(), 28);
        assert!(loadout.mass() < standard);
    }

    #[test]
    fn test_refused_armor_keeps_state() {
        // 2t of structure plus 18t of ballast fills a 20t chassis
        let mut loadout = loadout(20.0);
        let ballast = Arc::new(Item::new("ballast", "Ballast", 18.0, 1));
        assert!(loadout.equip(ballast).is_success());
        let before = loadout.clone();

        assert_eq!(
            loadout.set_armor(Location::LeftLeg, 10, 0),
            EquipResult::new(EquipResultKind::TooHeavy)
        );
        assert_eq!(loadout, before);
    }

    #[test]
    fn test_removing_engine_may_overflow_center_torso() {
        let mut loadout = loadout(50.0);
        let engine = engine(0, 10);
        assert!(loadout.equip(Arc::clone(&engine)).is_success());
        let sink = Arc::new(Item::heat_sink("hs", HeatSinkKind::Single));
        for _ in 0..10 {
            assert!(loadout.equip_at(Location::CenterTorso, Arc::clone(&sink)).is_success());
        }
        let filler = Arc::new(Item::new("filler", "Filler", 0.0, 6));
        assert!(loadout.equip_at(Location::CenterTorso, filler).is_success());
        assert_eq!(loadout.free_slots_at(Location::CenterTorso), 0);
        let before = loadout.clone();

        // Without the engine the heat sinks need ten real slots
        assert_eq!(
            loadout.unequip(Location::CenterTorso, &engine.id),
            EquipResult::at(EquipResultKind::NotEnoughSlots, Location::CenterTorso)
        );
        assert_eq!(loadout, before);
    }
}
