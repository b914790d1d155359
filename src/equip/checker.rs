//! Equip legality checks
//!
//! Pure predicates over a loadout snapshot. The global check covers what
//! does not depend on a location; the local check covers one component.
//! `can_equip` combines them and, when every location refuses, reports the
//! most specific refusal.

use crate::catalog::{Item, ItemKind};
use crate::core::types::Location;
use crate::equip::result::{EquipResult, EquipResultKind};
use crate::loadout::{Loadout, MASS_TOLERANCE};

/// Side torsos checked for wide engine parts, in order
const SIDE_TORSOS: [Location; 2] = [Location::LeftTorso, Location::RightTorso];

/// Location-independent checks; necessary but not sufficient
pub fn can_equip_global(loadout: &Loadout, item: &Item) -> EquipResult {
    let chassis = loadout.chassis();

    if matches!(item.kind, ItemKind::Internal)
        || !item.faction.is_compatible(chassis.faction)
        || !item.allowed_on(chassis.class())
    {
        return EquipResult::new(EquipResultKind::NotSupported);
    }

    if item.is_module() {
        if loadout.modules().iter().any(|m| m.id == item.id) {
            return EquipResult::new(EquipResultKind::AlreadyEquipped);
        }
        if loadout.modules().len() as u32 >= chassis.module_slots {
            return EquipResult::new(EquipResultKind::CapacityReached);
        }
    }

    if item.mass > loadout.free_mass() + MASS_TOLERANCE {
        return EquipResult::new(EquipResultKind::TooHeavy);
    }

    if let ItemKind::HeatSink(kind) = item.kind {
        if kind != loadout.upgrades().heat_sinks {
            return EquipResult::new(EquipResultKind::IncompatibleUpgrades);
        }
    }

    if item.is_jump_jet() && loadout.jump_jet_count() >= loadout.jump_jet_capacity() {
        return EquipResult::new(EquipResultKind::CapacityReached);
    }

    let fits_in_engine = item.is_heat_sink() && loadout.engine_heat_sink_slack() > 0;
    if !fits_in_engine {
        let side_slots = item.engine_spec().map_or(0, |engine| 2 * engine.side_slots);
        if item.slots + side_slots > loadout.free_slots() {
            return EquipResult::new(EquipResultKind::NotEnoughSlots);
        }
    }

    if item.is_engine() && loadout.engine().is_some() {
        return EquipResult::new(EquipResultKind::AlreadyEquipped);
    }

    EquipResult::SUCCESS
}

/// Can `item` be equipped anywhere on the loadout?
pub fn can_equip(loadout: &Loadout, item: &Item) -> EquipResult {
    let global = can_equip_global(loadout, item);
    if !global.is_success() || item.is_module() {
        return global;
    }

    if item.is_engine() {
        return can_equip_engine(loadout, item);
    }

    let mut best: Option<EquipResult> = None;
    for location in Location::ALL {
        let result = can_equip_local(loadout, location, item);
        if result.is_success() {
            return result;
        }
        match best {
            Some(current) if !result.is_more_specific_than(&current) => {}
            _ => best = Some(result),
        }
    }
    best.unwrap_or(EquipResult::new(EquipResultKind::NotSupported))
}

/// Can `item` be equipped at exactly `location`?
pub fn can_equip_at(loadout: &Loadout, location: Location, item: &Item) -> EquipResult {
    let global = can_equip_global(loadout, item);
    if !global.is_success() {
        return global;
    }
    if item.is_engine() && location == Location::CenterTorso {
        return can_equip_engine(loadout, item);
    }
    can_equip_local(loadout, location, item)
}

/// Wide engines also need room for their parts in both side torsos
fn can_equip_engine(loadout: &Loadout, item: &Item) -> EquipResult {
    if let Some(engine) = item.engine_spec() {
        for side in SIDE_TORSOS {
            if loadout.free_slots_at(side) < engine.side_slots {
                return EquipResult::at(EquipResultKind::NotEnoughSlotsForSideComponent, side);
            }
        }
    }
    can_equip_local(loadout, Location::CenterTorso, item)
}

/// Checks that depend only on one component
pub fn can_equip_local(loadout: &Loadout, location: Location, item: &Item) -> EquipResult {
    let component = loadout.component(location);

    let supported = match item.kind {
        ItemKind::Engine(_) => location == Location::CenterTorso,
        ItemKind::Support => location.is_side_torso(),
        ItemKind::Internal | ItemKind::Module => false,
        _ => true,
    };
    if !supported {
        return EquipResult::at(EquipResultKind::NotSupported, location);
    }

    if !item.allowed_at(location) {
        return EquipResult::at(EquipResultKind::NoComponentSupport, location);
    }

    if item.one_per_component && component.contains(&item.id) {
        return EquipResult::at(EquipResultKind::ComponentAlreadyRestricted, location);
    }

    if let Some(hardpoint) = item.hardpoint {
        if component.free_hardpoints(hardpoint) == 0 {
            return EquipResult::at(EquipResultKind::NoFreeHardpoints, location);
        }
    }

    let in_engine = item.is_heat_sink()
        && location == Location::CenterTorso
        && loadout.engine_heat_sink_slack() > 0;
    let cost = if in_engine { 0 } else { item.slots };
    if cost > loadout.free_slots_at(location) {
        return EquipResult::at(EquipResultKind::NotEnoughSlots, location);
    }

    EquipResult::SUCCESS
}
