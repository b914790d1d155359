//! Mechbay - loadout legality checks and omnipod selection
//!
//! A read-only [`catalog::Catalog`] describes chassis, items and pods.
//! A [`loadout::Loadout`] is one configured build; [`equip`] decides whether
//! a part may be added to it and [`solver`] picks pods that reach a
//! requested hardpoint profile.

pub mod catalog;
pub mod core;
pub mod equip;
pub mod loadout;
pub mod solver;
