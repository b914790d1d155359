//! Loadout mutations: every refused change leaves the build untouched

mod common;

use std::sync::Arc;

use mechbay::catalog::{ArmorKind, HeatSinkKind, StructureKind, Upgrades};
use mechbay::core::types::{HardpointType, Location};
use mechbay::equip::{EquipResult, EquipResultKind};
use mechbay::solver::PodAssignment;

use common::{catalog, item, loadout, pod, HUNCHBACK, TIMBER_WOLF};

// ============================================================================
// Items
// ============================================================================

#[test]
fn test_refused_equip_leaves_loadout_unchanged() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);
    assert!(loadout.equip(item(&catalog, "std_300")).is_success());
    let before = loadout.clone();

    let result = loadout.equip(item(&catalog, "double_heat_sink"));
    assert_eq!(result.kind(), EquipResultKind::IncompatibleUpgrades);
    assert_eq!(loadout, before);

    let result = loadout.equip_at(Location::LeftArm, item(&catalog, "case"));
    assert_eq!(result, EquipResult::at(EquipResultKind::NotSupported, Location::LeftArm));
    assert_eq!(loadout, before);
}

#[test]
fn test_equip_and_unequip() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);
    let mass = loadout.mass();
    let laser = item(&catalog, "medium_laser");

    assert!(loadout.equip(Arc::clone(&laser)).is_success());
    assert_eq!(loadout.component(Location::Head).items().len(), 1);
    assert!((loadout.mass() - (mass + 1.0)).abs() < 1e-9);

    assert!(loadout.unequip(Location::Head, &laser.id).is_success());
    assert!(loadout.items().next().is_none());
    assert!((loadout.mass() - mass).abs() < 1e-9);

    assert_eq!(
        loadout.unequip(Location::Head, &laser.id),
        EquipResult::at(EquipResultKind::NotSupported, Location::Head)
    );
    // Fixed items stay
    assert_eq!(
        loadout.unequip(Location::Head, &"cockpit".into()),
        EquipResult::at(EquipResultKind::NotSupported, Location::Head)
    );
}

#[test]
fn test_removing_engine_clears_heat_sink_room() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);
    let engine = item(&catalog, "std_300");
    assert!(loadout.equip(Arc::clone(&engine)).is_success());
    assert_eq!(loadout.engine_heat_sink_slack(), 2);

    let sink = item(&catalog, "heat_sink");
    assert!(loadout.equip(Arc::clone(&sink)).is_success());
    assert_eq!(loadout.component(Location::CenterTorso).items().len(), 2);
    assert_eq!(loadout.engine_heat_sink_slack(), 1);

    assert!(loadout.unequip(Location::CenterTorso, &engine.id).is_success());
    assert!(loadout.engine().is_none());
    assert_eq!(loadout.engine_heat_sink_slack(), 0);
    // The heat sink now occupies a real slot: gyro 4 + sink 1
    assert_eq!(loadout.slots_used_at(Location::CenterTorso), 5);
}

#[test]
fn test_modules_are_removable() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);
    let zoom = item(&catalog, "advanced_zoom");
    assert!(loadout.equip(Arc::clone(&zoom)).is_success());
    assert!(loadout.unequip_module(&zoom.id).is_success());
    assert!(loadout.modules().is_empty());
    assert_eq!(
        loadout.unequip_module(&zoom.id),
        EquipResult::new(EquipResultKind::NotSupported)
    );
    // Modules never take a location
    assert_eq!(
        loadout.equip_at(Location::Head, zoom),
        EquipResult::at(EquipResultKind::NotSupported, Location::Head)
    );
}

// ============================================================================
// Armor and upgrades
// ============================================================================

#[test]
fn test_armor_caps() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);

    assert!(loadout.set_armor(Location::Head, 18, 0).is_success());
    assert_eq!(
        loadout.set_armor(Location::Head, 19, 0),
        EquipResult::at(EquipResultKind::CapacityReached, Location::Head)
    );
    assert_eq!(
        loadout.set_armor(Location::Head, 10, 2),
        EquipResult::at(EquipResultKind::NotSupported, Location::Head)
    );
    assert_eq!(loadout.component(Location::Head).armor(), (18, 0));

    // Torso cap is twice the hit points, split freely front and back
    assert!(loadout.set_armor(Location::CenterTorso, 40, 24).is_success());
    assert_eq!(
        loadout.set_armor(Location::CenterTorso, 40, 25),
        EquipResult::at(EquipResultKind::CapacityReached, Location::CenterTorso)
    );
    assert_eq!(loadout.armor_total(), 82);
    // 82 points of standard armor at 32 per ton, on top of 11 base tons
    assert!((loadout.mass() - (11.0 + 82.0 / 32.0)).abs() < 1e-9);
}

#[test]
fn test_armor_respects_mass_budget() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);
    for id in ["std_300", "ac20", "lrm10", "lrm10"] {
        assert!(loadout.equip(item(&catalog, id)).is_success(), "equip {}", id);
    }
    assert!(loadout.free_mass().abs() < 1e-9);
    let before = loadout.clone();

    assert_eq!(
        loadout.set_armor(Location::CenterTorso, 1, 0),
        EquipResult::new(EquipResultKind::TooHeavy)
    );
    assert_eq!(loadout, before);
}

#[test]
fn test_upgrades_change_slots_and_mass() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, HUNCHBACK);
    let free = loadout.free_slots();
    let mass = loadout.mass();

    let endo = Upgrades {
        structure: StructureKind::EndoSteel,
        ..Upgrades::default()
    };
    assert!(loadout.set_upgrades(endo).is_success());
    assert_eq!(loadout.dynamic_slots(), 14);
    assert_eq!(loadout.free_slots(), free - 14);
    assert!((loadout.mass() - (mass - 2.5)).abs() < 1e-9);

    // Equipped single heat sinks forbid switching to doubles
    assert!(loadout.equip(item(&catalog, "heat_sink")).is_success());
    let before = loadout.clone();
    let doubles = Upgrades {
        heat_sinks: HeatSinkKind::Double,
        ..endo
    };
    assert_eq!(
        loadout.set_upgrades(doubles),
        EquipResult::new(EquipResultKind::IncompatibleUpgrades)
    );
    assert_eq!(loadout, before);
}

#[test]
fn test_omni_upgrades_fixed() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);
    let upgrades = loadout.upgrades();
    assert_eq!(upgrades.armor, ArmorKind::FerroFibrous);

    let standard = Upgrades::default();
    assert_eq!(
        loadout.set_upgrades(standard),
        EquipResult::new(EquipResultKind::NotSupported)
    );
    assert!(loadout.set_upgrades(upgrades).is_success());
}

// ============================================================================
// Pods
// ============================================================================

#[test]
fn test_omni_starts_with_stock_pods() {
    let catalog = catalog();
    let loadout = loadout(&catalog, TIMBER_WOLF);
    assert_eq!(loadout.pod(Location::RightArm).unwrap().id.0, "tbr-prime-ra");
    assert_eq!(loadout.hardpoint_count(HardpointType::Energy), 5);
    assert_eq!(loadout.modifiers().len(), 2);
    // Cockpit, gyro, engine and endo structure
    assert!((loadout.mass() - 28.75).abs() < 1e-9);
    assert_eq!(loadout.free_slots(), 36);
}

#[test]
fn test_change_pod() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);

    assert!(loadout.change_pod(pod(&catalog, "tbr-d-ra")).is_success());
    assert_eq!(loadout.hardpoint_count(HardpointType::Energy), 6);
    assert_eq!(loadout.modifiers().len(), 3);

    let laser = item(&catalog, "medium_laser");
    for _ in 0..3 {
        assert!(loadout.equip_at(Location::RightArm, Arc::clone(&laser)).is_success());
    }

    // The lasers would lose their hardpoints
    let before = loadout.clone();
    assert_eq!(
        loadout.change_pod(pod(&catalog, "tbr-a-ra")),
        EquipResult::at(EquipResultKind::NoFreeHardpoints, Location::RightArm)
    );
    assert_eq!(loadout, before);
}

#[test]
fn test_change_pod_refusals() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);
    let before = loadout.clone();

    assert_eq!(
        loadout.change_pod(pod(&catalog, "dwf-prime-ra")),
        EquipResult::at(EquipResultKind::NotSupported, Location::RightArm)
    );
    assert_eq!(
        loadout.change_pod(pod(&catalog, "tbr-c-ct")),
        EquipResult::at(EquipResultKind::NotSupported, Location::CenterTorso)
    );
    assert_eq!(loadout, before);
    assert!(loadout.change_pod(pod(&catalog, "tbr-prime-ct")).is_success());

    let mut standard = common::loadout(&catalog, HUNCHBACK);
    assert_eq!(
        standard.change_pod(pod(&catalog, "tbr-d-ra")),
        EquipResult::at(EquipResultKind::NotSupported, Location::RightArm)
    );
}

#[test]
fn test_jump_capacity_follows_pods() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);
    assert!(loadout.change_pod(pod(&catalog, "tbr-s-ll")).is_success());
    assert_eq!(loadout.jump_jet_capacity(), 2);

    let jet = item(&catalog, "jump_jet");
    assert!(loadout.equip(Arc::clone(&jet)).is_success());
    assert!(loadout.equip(Arc::clone(&jet)).is_success());

    let before = loadout.clone();
    assert_eq!(
        loadout.change_pod(pod(&catalog, "tbr-prime-ll")),
        EquipResult::new(EquipResultKind::CapacityReached)
    );
    assert_eq!(loadout, before);
}

#[test]
fn test_toggles() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);
    let free = loadout.free_slots();
    let hand = "hand".into();

    assert!(loadout.toggle(Location::LeftArm, &hand, false).is_success());
    assert_eq!(loadout.free_slots(), free + 1);
    assert_eq!(
        loadout.toggle(Location::LeftArm, &"gyro".into(), false),
        EquipResult::at(EquipResultKind::NotSupported, Location::LeftArm)
    );

    // Shoulder, upper and lower arm leave nine slots
    let ammo = item(&catalog, "ammo_ac20");
    for _ in 0..9 {
        assert!(loadout.equip_at(Location::LeftArm, Arc::clone(&ammo)).is_success());
    }
    let before = loadout.clone();
    assert_eq!(
        loadout.toggle(Location::LeftArm, &hand, true),
        EquipResult::at(EquipResultKind::NotEnoughSlots, Location::LeftArm)
    );
    assert_eq!(loadout, before);
}

#[test]
fn test_pod_change_resets_toggles() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);
    assert!(loadout.toggle(Location::LeftArm, &"hand".into(), false).is_success());
    assert!(loadout.change_pod(pod(&catalog, "tbr-a-la")).is_success());

    let toggles = loadout.component(Location::LeftArm).toggles();
    assert_eq!(toggles.len(), 1);
    assert_eq!(toggles[0].item.id.0, "lower_arm");
    assert!(toggles[0].enabled);
}

#[test]
fn test_apply_pods_is_all_or_nothing() {
    let catalog = catalog();
    let mut loadout = loadout(&catalog, TIMBER_WOLF);
    let before = loadout.clone();

    let mut assignment = PodAssignment::default();
    assignment.insert(Location::RightArm, pod(&catalog, "tbr-d-ra"));
    assignment.insert(Location::LeftTorso, pod(&catalog, "tbr-s-lt"));
    assignment.insert(Location::Head, pod(&catalog, "dwf-prime-ra"));
    assert!(!loadout.apply_pods(&assignment).is_success());
    assert_eq!(loadout, before);

    let mut misplaced = PodAssignment::default();
    misplaced.insert(Location::LeftArm, pod(&catalog, "tbr-d-ra"));
    assert_eq!(
        loadout.apply_pods(&misplaced),
        EquipResult::at(EquipResultKind::NotSupported, Location::LeftArm)
    );

    let mut valid = PodAssignment::default();
    valid.insert(Location::RightArm, pod(&catalog, "tbr-d-ra"));
    valid.insert(Location::LeftTorso, pod(&catalog, "tbr-s-lt"));
    assert!(loadout.apply_pods(&valid).is_success());
    assert_eq!(loadout.pod(Location::LeftTorso).unwrap().id.0, "tbr-s-lt");
    assert_eq!(loadout.hardpoint_count(HardpointType::Ecm), 1);
}
