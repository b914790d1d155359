//! Swappable per-location hardpoint providers for omni chassis

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::item::Item;
use crate::core::types::{HardpointType, Location, PodId, SeriesId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierOp {
    /// Added to the base value
    Additive,
    /// Added to the multiplier of the base value
    Multiplicative,
}

/// Numeric performance adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub attribute: String,
    pub operation: ModifierOp,
    pub value: f64,
}

/// An omnipod: hardpoints, jump capacity, items and modifiers for one location
#[derive(Debug, Clone, PartialEq)]
pub struct OmniPod {
    pub id: PodId,
    pub name: String,
    /// Only chassis of this series accept the pod
    pub series: SeriesId,
    /// The pod only fits the location it was authored for
    pub location: Location,
    pub hardpoints: Vec<HardpointType>,
    /// Jump jets this pod allows
    pub jump_jets: u32,
    pub fixed_items: Vec<Arc<Item>>,
    /// Items that start enabled and can be switched off
    pub toggleable_items: Vec<Arc<Item>>,
    pub modifiers: Vec<Modifier>,
}

impl OmniPod {
    pub fn new(
        id: impl Into<PodId>,
        series: impl Into<SeriesId>,
        location: Location,
        hardpoints: &[HardpointType],
    ) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            series: series.into(),
            location,
            hardpoints: hardpoints.to_vec(),
            jump_jets: 0,
            fixed_items: Vec::new(),
            toggleable_items: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_jump_jets(mut self, jump_jets: u32) -> Self {
        self.jump_jets = jump_jets;
        self
    }

    pub fn with_fixed(mut self, item: Arc<Item>) -> Self {
        self.fixed_items.push(item);
        self
    }

    pub fn with_toggleable(mut self, item: Arc<Item>) -> Self {
        self.toggleable_items.push(item);
        self
    }

    pub fn with_modifier(mut self, attribute: impl Into<String>, operation: ModifierOp, value: f64) -> Self {
        self.modifiers.push(Modifier {
            attribute: attribute.into(),
            operation,
            value,
        });
        self
    }

    pub fn hardpoint_count(&self, hardpoint: HardpointType) -> usize {
        self.hardpoints.iter().filter(|h| **h == hardpoint).count()
    }

    pub fn fixed_slots(&self) -> u32 {
        self.fixed_items.iter().map(|item| item.slots).sum()
    }

    /// Slots taken when every toggleable item is switched on
    pub fn toggle_slots(&self) -> u32 {
        self.toggleable_items.iter().map(|item| item.slots).sum()
    }

    pub fn has_ecm(&self) -> bool {
        self.hardpoints.contains(&HardpointType::Ecm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_hardpoints() {
        let pod = OmniPod::new(
            "tbr-prime-ra",
            "timber_wolf",
            Location::RightArm,
            &[HardpointType::Energy, HardpointType::Energy, HardpointType::Ballistic],
        );
        assert_eq!(pod.hardpoint_count(HardpointType::Energy), 2);
        assert_eq!(pod.hardpoint_count(HardpointType::Ballistic), 1);
        assert!(!pod.has_ecm());
        assert_eq!(pod.name, "tbr-prime-ra");
    }

    #[test]
    fn test_pod_modifiers() {
        let pod = OmniPod::new("p", "s", Location::CenterTorso, &[])
            .with_modifier("torso_turn_rate", ModifierOp::Multiplicative, 0.1);
        assert_eq!(pod.modifiers.len(), 1);
        assert_eq!(pod.modifiers[0].operation, ModifierOp::Multiplicative);
    }
}
