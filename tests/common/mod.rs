//! Shared fixture: the sample catalog shipped in `data/`

#![allow(dead_code)]

use std::sync::Arc;

use mechbay::catalog::{Catalog, Item, OmniPod};
use mechbay::loadout::Loadout;

pub const CATALOG_TOML: &str = include_str!("../../data/catalog.toml");

/// Standard inner sphere chassis, 50 tons
pub const HUNCHBACK: &str = "hbk-4g";
/// Clan omni chassis, 75 tons, timber_wolf series
pub const TIMBER_WOLF: &str = "tbr-prime";

pub fn catalog() -> Catalog {
    Catalog::from_toml_str(CATALOG_TOML).expect("sample catalog loads")
}

pub fn loadout(catalog: &Catalog, chassis: &str) -> Loadout {
    Loadout::new(catalog, &chassis.into()).expect("chassis exists")
}

pub fn item(catalog: &Catalog, id: &str) -> Arc<Item> {
    catalog.item(&id.into()).expect("item exists")
}

pub fn pod(catalog: &Catalog, id: &str) -> Arc<OmniPod> {
    catalog.pod(&id.into()).expect("pod exists")
}
