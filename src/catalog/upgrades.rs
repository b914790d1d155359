//! Chassis-wide upgrades
//!
//! Upgrades change structure and armor mass and may reserve dynamic slots
//! anywhere on the chassis.

use serde::{Deserialize, Serialize};

use crate::core::config::RulesConfig;
use crate::core::types::Faction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StructureKind {
    #[default]
    Standard,
    EndoSteel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArmorKind {
    #[default]
    Standard,
    FerroFibrous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HeatSinkKind {
    #[default]
    Single,
    Double,
}

/// Complete upgrade selection of a loadout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Upgrades {
    pub structure: StructureKind,
    pub armor: ArmorKind,
    pub heat_sinks: HeatSinkKind,
}

impl Upgrades {
    /// Slots reserved by the structure and armor upgrades
    pub fn dynamic_slots(&self, faction: Faction, rules: &RulesConfig) -> u32 {
        let structure = match self.structure {
            StructureKind::Standard => 0,
            StructureKind::EndoSteel => rules.endo_slots(faction),
        };
        let armor = match self.armor {
            ArmorKind::Standard => 0,
            ArmorKind::FerroFibrous => rules.ferro_slots(faction),
        };
        structure + armor
    }

    /// Mass of the internal structure for a chassis of `max_mass` tons
    pub fn structure_mass(&self, max_mass: f64, rules: &RulesConfig) -> f64 {
        let fraction = match self.structure {
            StructureKind::Standard => rules.structure_fraction_standard,
            StructureKind::EndoSteel => rules.structure_fraction_endo,
        };
        max_mass * fraction
    }

    /// Mass of `points` armor points
    pub fn armor_mass(&self, points: u32, faction: Faction, rules: &RulesConfig) -> f64 {
        let per_ton = match self.armor {
            ArmorKind::Standard => rules.armor_per_ton_standard,
            ArmorKind::FerroFibrous => rules.ferro_armor_per_ton(faction),
        };
        points as f64 / per_ton
    }
}
