//! Per-location chassis skeleton

use std::sync::Arc;

use crate::catalog::item::Item;
use crate::core::config::RulesConfig;
use crate::core::types::{HardpointType, Location};

/// Immutable description of one location of a chassis
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub location: Location,
    /// Total critical slots
    pub slots: u32,
    pub hit_points: u32,
    /// Items permanently mounted here (actuators, fixed engines)
    pub fixed_items: Vec<Arc<Item>>,
    /// Hardpoints of a standard chassis; omni chassis take theirs from pods
    pub hardpoints: Vec<HardpointType>,
}

impl Component {
    pub fn new(location: Location, slots: u32, hit_points: u32) -> Self {
        Self {
            location,
            slots,
            hit_points,
            fixed_items: Vec::new(),
            hardpoints: Vec::new(),
        }
    }

    pub fn with_fixed(mut self, item: Arc<Item>) -> Self {
        self.fixed_items.push(item);
        self
    }

    pub fn with_hardpoints(mut self, hardpoints: &[HardpointType]) -> Self {
        self.hardpoints.extend_from_slice(hardpoints);
        self
    }

    /// Slots consumed by fixed items
    pub fn fixed_slots(&self) -> u32 {
        self.fixed_items.iter().map(|item| item.slots).sum()
    }

    pub fn hardpoint_count(&self, hardpoint: HardpointType) -> usize {
        self.hardpoints.iter().filter(|h| **h == hardpoint).count()
    }

    /// Maximum total armor (front + back) this component accepts
    pub fn armor_cap(&self, rules: &RulesConfig) -> u32 {
        match self.location {
            Location::Head => rules.head_armor_cap,
            _ => self.hit_points * rules.armor_per_hit_point,
        }
    }

    /// Checks slot count covers the fixed items
    pub fn validate(&self) -> Result<(), String> {
        let fixed = self.fixed_slots();
        if fixed > self.slots {
            return Err(format!(
                "fixed items need {} slots but only {} exist",
                fixed, self.slots
            ));
        }
        Ok(())
    }
}
