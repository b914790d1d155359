//! Per-location configuration state

use std::sync::Arc;

use crate::catalog::{Component, Item, OmniPod};
use crate::core::types::{HardpointType, ItemId, Location};

/// Where a component's hardpoints come from
#[derive(Debug, Clone, PartialEq)]
pub enum Mount {
    /// Standard chassis: hardpoints fixed on the component
    Fixed,
    /// Omni chassis: hardpoints from the assigned pod
    Pod(Arc<OmniPod>),
}

/// A pod item that can be switched off
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    pub item: Arc<Item>,
    pub enabled: bool,
}

/// One location of a loadout
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredComponent {
    def: Arc<Component>,
    mount: Mount,
    toggles: Vec<Toggle>,
    items: Vec<Arc<Item>>,
    armor_front: u32,
    armor_back: u32,
}

impl ConfiguredComponent {
    pub(crate) fn new(def: Arc<Component>, mount: Mount) -> Self {
        let toggles = toggles_for(&mount);
        Self {
            def,
            mount,
            toggles,
            items: Vec::new(),
            armor_front: 0,
            armor_back: 0,
        }
    }

    pub fn location(&self) -> Location {
        self.def.location
    }

    pub fn definition(&self) -> &Arc<Component> {
        &self.def
    }

    pub fn pod(&self) -> Option<&Arc<OmniPod>> {
        match &self.mount {
            Mount::Pod(pod) => Some(pod),
            Mount::Fixed => None,
        }
    }

    /// User-equipped items, in equip order
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn toggles(&self) -> &[Toggle] {
        &self.toggles
    }

    pub fn armor(&self) -> (u32, u32) {
        (self.armor_front, self.armor_back)
    }

    pub fn armor_total(&self) -> u32 {
        self.armor_front + self.armor_back
    }

    /// Every item the user cannot remove: component, pod and enabled toggles
    pub fn fixed_items(&self) -> impl Iterator<Item = &Arc<Item>> {
        let pod_items = self.pod().into_iter().flat_map(|pod| pod.fixed_items.iter());
        let toggled = self.toggles.iter().filter(|t| t.enabled).map(|t| &t.item);
        self.def.fixed_items.iter().chain(pod_items).chain(toggled)
    }

    pub fn fixed_slots(&self) -> u32 {
        self.fixed_items().map(|item| item.slots).sum()
    }

    pub fn hardpoint_count(&self, hardpoint: HardpointType) -> usize {
        match &self.mount {
            Mount::Fixed => self.def.hardpoint_count(hardpoint),
            Mount::Pod(pod) => pod.hardpoint_count(hardpoint),
        }
    }

    pub fn hardpoints_used(&self, hardpoint: HardpointType) -> usize {
        self.items
            .iter()
            .filter(|item| item.hardpoint == Some(hardpoint))
            .count()
    }

    pub fn free_hardpoints(&self, hardpoint: HardpointType) -> usize {
        self.hardpoint_count(hardpoint)
            .saturating_sub(self.hardpoints_used(hardpoint))
    }

    /// Jump jets this location allows (pods only)
    pub fn jump_jet_capacity(&self) -> u32 {
        self.pod().map_or(0, |pod| pod.jump_jets)
    }

    /// Mass of fixed and equipped items; armor is accounted by the loadout
    pub fn item_mass(&self) -> f64 {
        self.fixed_items()
            .chain(self.items.iter())
            .map(|item| item.mass)
            .sum()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.fixed_items().chain(self.items.iter()).any(|item| &item.id == id)
    }

    pub(crate) fn push_item(&mut self, item: Arc<Item>) {
        self.items.push(item);
    }

    /// Removes the last equipped copy of `id`
    pub(crate) fn remove_item(&mut self, id: &ItemId) -> Option<Arc<Item>> {
        let index = self.items.iter().rposition(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn set_armor(&mut self, front: u32, back: u32) {
        self.armor_front = front;
        self.armor_back = back;
    }

    /// Swap the pod; toggles reset to the new pod's defaults
    pub(crate) fn set_pod(&mut self, pod: Arc<OmniPod>) {
        self.mount = Mount::Pod(pod);
        self.toggles = toggles_for(&self.mount);
    }

    pub(crate) fn set_toggle(&mut self, id: &ItemId, enabled: bool) -> bool {
        match self.toggles.iter_mut().find(|t| &t.item.id == id) {
            Some(toggle) => {
                toggle.enabled = enabled;
                true
            }
            None => false,
        }
    }
}

fn toggles_for(mount: &Mount) -> Vec<Toggle> {
    match mount {
        Mount::Fixed => Vec::new(),
        Mount::Pod(pod) => pod
            .toggleable_items
            .iter()
            .map(|item| Toggle {
                item: Arc::clone(item),
                enabled: true,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm_pod() -> Arc<OmniPod> {
        Arc::new(
            OmniPod::new("arm", "s", Location::LeftArm, &[HardpointType::Energy])
                .with_fixed(Arc::new(Item::new("shoulder", "Shoulder", 0.0, 1)))
                .with_toggleable(Arc::new(Item::new("laa", "Lower Arm Actuator", 0.0, 1))),
        )
    }

    #[test]
    fn test_pod_supplies_hardpoints_and_fixed_items() {
        let def = Arc::new(Component::new(Location::LeftArm, 12, 20).with_hardpoints(&[
            HardpointType::Missile,
        ]));
        let component = ConfiguredComponent::new(def, Mount::Pod(arm_pod()));
        assert_eq!(component.hardpoint_count(HardpointType::Energy), 1);
        assert_eq!(component.hardpoint_count(HardpointType::Missile), 0);
        assert_eq!(component.fixed_slots(), 2);
    }

    #[test]
    fn test_disabled_toggle_frees_slot() {
        let def = Arc::new(Component::new(Location::LeftArm, 12, 20));
        let mut component = ConfiguredComponent::new(def, Mount::Pod(arm_pod()));
        assert!(component.set_toggle(&"laa".into(), false));
        assert_eq!(component.fixed_slots(), 1);
        assert!(!component.set_toggle(&"missing".into(), false));
    }

    #[test]
    fn test_free_hardpoints_track_items() {
        let def = Arc::new(
            Component::new(Location::RightArm, 12, 20).with_hardpoints(&[HardpointType::Energy]),
        );
        let mut component = ConfiguredComponent::new(def, Mount::Fixed);
        assert_eq!(component.free_hardpoints(HardpointType::Energy), 1);
        component.push_item(Arc::new(Item::weapon("ml", "ML", 1.0, 1, HardpointType::Energy)));
        assert_eq!(component.free_hardpoints(HardpointType::Energy), 0);
        assert!(component.remove_item(&"ml".into()).is_some());
        assert_eq!(component.free_hardpoints(HardpointType::Energy), 1);
    }
}
