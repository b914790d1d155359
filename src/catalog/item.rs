//! Equipment items
//!
//! An item is immutable catalog data. Loadouts hold shared references to
//! items, never copies.

use serde::{Deserialize, Serialize};

use crate::catalog::upgrades::HeatSinkKind;
use crate::core::types::{ChassisClass, Faction, HardpointType, ItemId, Location};

/// Engine characteristics that matter for placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub rating: u32,
    /// Slots reserved in each side torso (0 for a standard engine)
    pub side_slots: u32,
    /// Heat sinks the engine holds without consuming slots
    pub heat_sink_slots: u32,
}

impl EngineSpec {
    /// Does this engine reserve slots in both side torsos?
    pub fn is_wide(&self) -> bool {
        self.side_slots > 0
    }
}

/// What kind of equipment an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Ammunition,
    HeatSink(HeatSinkKind),
    /// Mobility equipment, limited by the chassis jump capacity
    JumpJet,
    Engine(EngineSpec),
    /// Support items only fit in side torsos
    Support,
    /// Actuators and other structure; never user equippable
    Internal,
    /// Pilot modules, stored on the loadout rather than a location
    Module,
    Other,
}

/// A unit of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Mass in tons
    pub mass: f64,
    /// Critical slots consumed
    pub slots: u32,
    /// Hardpoint the item must occupy, if any
    pub hardpoint: Option<HardpointType>,
    pub kind: ItemKind,
    pub faction: Faction,
    /// Restricts the item to these locations when set
    pub allowed_locations: Option<Vec<Location>>,
    /// Restricts the item to these chassis classes when set
    pub allowed_classes: Option<Vec<ChassisClass>>,
    /// At most one copy may be placed per component
    pub one_per_component: bool,
}

impl Item {
    /// An unrestricted item of kind `Other`
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, mass: f64, slots: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mass,
            slots,
            hardpoint: None,
            kind: ItemKind::Other,
            faction: Faction::Any,
            allowed_locations: None,
            allowed_classes: None,
            one_per_component: false,
        }
    }

    pub fn weapon(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        mass: f64,
        slots: u32,
        hardpoint: HardpointType,
    ) -> Self {
        Self::new(id, name, mass, slots)
            .with_kind(ItemKind::Weapon)
            .with_hardpoint(hardpoint)
    }

    pub fn engine(id: impl Into<ItemId>, name: impl Into<String>, mass: f64, spec: EngineSpec) -> Self {
        Self::new(id, name, mass, 6).with_kind(ItemKind::Engine(spec))
    }

    pub fn heat_sink(id: impl Into<ItemId>, kind: HeatSinkKind) -> Self {
        let (name, slots) = match kind {
            HeatSinkKind::Single => ("Heat Sink", 1),
            HeatSinkKind::Double => ("Double Heat Sink", 3),
        };
        Self::new(id, name, 1.0, slots).with_kind(ItemKind::HeatSink(kind))
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_hardpoint(mut self, hardpoint: HardpointType) -> Self {
        self.hardpoint = Some(hardpoint);
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.allowed_locations = Some(locations);
        self
    }

    pub fn with_classes(mut self, classes: Vec<ChassisClass>) -> Self {
        self.allowed_classes = Some(classes);
        self
    }

    pub fn one_per_component(mut self) -> Self {
        self.one_per_component = true;
        self
    }

    pub fn engine_spec(&self) -> Option<EngineSpec> {
        match self.kind {
            ItemKind::Engine(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn is_engine(&self) -> bool {
        matches!(self.kind, ItemKind::Engine(_))
    }

    pub fn is_heat_sink(&self) -> bool {
        matches!(self.kind, ItemKind::HeatSink(_))
    }

    pub fn is_jump_jet(&self) -> bool {
        matches!(self.kind, ItemKind::JumpJet)
    }

    pub fn is_module(&self) -> bool {
        matches!(self.kind, ItemKind::Module)
    }

    /// Is the item allowed at `location` by its own restriction list?
    pub fn allowed_at(&self, location: Location) -> bool {
        self.allowed_locations
            .as_ref()
            .map_or(true, |locations| locations.contains(&location))
    }

    pub fn allowed_on(&self, class: ChassisClass) -> bool {
        self.allowed_classes
            .as_ref()
            .map_or(true, |classes| classes.contains(&class))
    }
}
