//! Construction rules with documented constants
//!
//! All numbers the checker and loadout arithmetic depend on are collected
//! here. Catalog files may override any of them in a `[rules]` table.

use serde::{Deserialize, Serialize};

use crate::core::error::{BayError, Result};
use crate::core::types::Faction;

/// Rules shared by every loadout built from one catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    // === ARMOR ===
    /// Armor points per ton of standard armor
    pub armor_per_ton_standard: f64,

    /// Armor points per ton of ferro-fibrous armor (Inner Sphere)
    pub armor_per_ton_ferro_is: f64,

    /// Armor points per ton of ferro-fibrous armor (Clan)
    ///
    /// Clan ferro is lighter per point than the Inner Sphere version.
    pub armor_per_ton_ferro_clan: f64,

    /// Maximum armor on a component, as a multiple of its hit points
    ///
    /// Two-sided components split this cap between front and back.
    pub armor_per_hit_point: u32,

    /// Armor cap for the head regardless of hit points
    pub head_armor_cap: u32,

    // === STRUCTURE ===
    /// Internal structure mass as a fraction of chassis max mass
    pub structure_fraction_standard: f64,

    /// Endo-steel structure mass as a fraction of chassis max mass
    pub structure_fraction_endo: f64,

    // === DYNAMIC SLOTS ===
    /// Slots reserved anywhere on the chassis by endo-steel (Inner Sphere)
    pub endo_slots_is: u32,

    /// Slots reserved by endo-steel (Clan)
    pub endo_slots_clan: u32,

    /// Slots reserved by ferro-fibrous armor (Inner Sphere)
    pub ferro_slots_is: u32,

    /// Slots reserved by ferro-fibrous armor (Clan)
    pub ferro_slots_clan: u32,

    // === MODULES ===
    /// Module slots for chassis that do not declare their own count
    pub default_module_slots: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            armor_per_ton_standard: 32.0,
            armor_per_ton_ferro_is: 35.84,
            armor_per_ton_ferro_clan: 38.4,
            armor_per_hit_point: 2,
            head_armor_cap: 18,

            structure_fraction_standard: 0.10,
            structure_fraction_endo: 0.05,

            endo_slots_is: 14,
            endo_slots_clan: 7,
            ferro_slots_is: 14,
            ferro_slots_clan: 7,

            default_module_slots: 2,
        }
    }
}

impl RulesConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a standalone rules table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: RulesConfig = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn endo_slots(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Clan => self.endo_slots_clan,
            _ => self.endo_slots_is,
        }
    }

    pub fn ferro_slots(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Clan => self.ferro_slots_clan,
            _ => self.ferro_slots_is,
        }
    }

    pub fn ferro_armor_per_ton(&self, faction: Faction) -> f64 {
        match faction {
            Faction::Clan => self.armor_per_ton_ferro_clan,
            _ => self.armor_per_ton_ferro_is,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let per_ton = [
            self.armor_per_ton_standard,
            self.armor_per_ton_ferro_is,
            self.armor_per_ton_ferro_clan,
        ];
        if per_ton.iter().any(|v| !(*v > 0.0)) {
            return Err(BayError::Config("armor points per ton must be positive".into()));
        }

        for (name, fraction) in [
            ("structure_fraction_standard", self.structure_fraction_standard),
            ("structure_fraction_endo", self.structure_fraction_endo),
        ] {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(BayError::Config(format!(
                    "{} ({}) must be in (0, 1]",
                    name, fraction
                )));
            }
        }

        if self.structure_fraction_endo > self.structure_fraction_standard {
            return Err(BayError::Config(format!(
                "structure_fraction_endo ({}) should be <= structure_fraction_standard ({})",
                self.structure_fraction_endo, self.structure_fraction_standard
            )));
        }

        if self.armor_per_hit_point == 0 {
            return Err(BayError::Config("armor_per_hit_point must be at least 1".into()));
        }

        Ok(())
    }
}
