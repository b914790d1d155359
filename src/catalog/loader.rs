//! Load a catalog from TOML
//!
//! A catalog file holds an optional `[rules]` table followed by
//! `[[items]]`, `[[pods]]` and `[[chassis]]` arrays. Items are registered
//! first so pods and chassis can refer to them by id.

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::{
    ArmorKind, Catalog, Chassis, ChassisKind, Component, EngineSpec, HeatSinkKind, Item,
    ItemKind, Modifier, ModifierOp, OmniLayout, OmniPod, StructureKind, Upgrades,
};
use crate::core::config::RulesConfig;
use crate::core::error::{BayError, Result};
use crate::core::types::{
    ChassisClass, ChassisId, Faction, HardpointType, ItemId, Location, LocationMap, PodId,
};

impl Catalog {
    /// Load a catalog from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TomlCatalog = toml::from_str(content)?;
        file.rules.validate()?;

        let mut catalog = Catalog::new(file.rules);
        for item in file.items {
            let item = item.into_item()?;
            catalog.add_item(item);
        }
        for pod in file.pods {
            let pod = pod.into_pod(&catalog)?;
            catalog.add_pod(pod);
        }
        for chassis in file.chassis {
            let chassis = chassis.into_chassis(&catalog)?;
            catalog.add_chassis(chassis)?;
        }

        tracing::debug!(
            "Loaded catalog: {} items, {} pods, {} chassis",
            catalog.item_count(),
            catalog.pod_count(),
            catalog.chassis_count()
        );
        Ok(catalog)
    }
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    rules: RulesConfig,
    #[serde(default)]
    items: Vec<TomlItem>,
    #[serde(default)]
    pods: Vec<TomlPod>,
    #[serde(default)]
    chassis: Vec<TomlChassis>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    name: String,
    mass: f64,
    slots: u32,
    #[serde(default = "default_kind")]
    kind: String,
    hardpoint: Option<String>,
    faction: Option<String>,
    heat_sink: Option<String>,
    engine: Option<TomlEngine>,
    allowed_locations: Option<Vec<String>>,
    allowed_classes: Option<Vec<String>>,
    #[serde(default)]
    one_per_component: bool,
}

#[derive(Debug, Deserialize)]
struct TomlEngine {
    rating: u32,
    #[serde(default)]
    side_slots: u32,
    #[serde(default)]
    heat_sink_slots: u32,
}

#[derive(Debug, Deserialize)]
struct TomlPod {
    id: String,
    name: Option<String>,
    series: String,
    location: String,
    #[serde(default)]
    hardpoints: Vec<String>,
    #[serde(default)]
    jump_jets: u32,
    #[serde(default)]
    fixed_items: Vec<String>,
    #[serde(default)]
    toggleable_items: Vec<String>,
    #[serde(default)]
    modifiers: Vec<TomlModifier>,
}

#[derive(Debug, Deserialize)]
struct TomlModifier {
    attribute: String,
    operation: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct TomlChassis {
    id: String,
    name: String,
    series: String,
    faction: String,
    max_mass: f64,
    #[serde(default = "default_chassis_kind")]
    kind: String,
    module_slots: Option<u32>,
    #[serde(default)]
    max_jump_jets: u32,
    upgrades: Option<TomlUpgrades>,
    components: Vec<TomlComponent>,
}

#[derive(Debug, Deserialize)]
struct TomlUpgrades {
    #[serde(default = "default_standard")]
    structure: String,
    #[serde(default = "default_standard")]
    armor: String,
    #[serde(default = "default_single")]
    heat_sinks: String,
}

#[derive(Debug, Deserialize)]
struct TomlComponent {
    location: String,
    slots: u32,
    hit_points: u32,
    #[serde(default)]
    fixed_items: Vec<String>,
    #[serde(default)]
    hardpoints: Vec<String>,
    /// Stock pod, omni chassis only
    pod: Option<String>,
}

fn default_kind() -> String {
    "other".into()
}

fn default_chassis_kind() -> String {
    "standard".into()
}

fn default_standard() -> String {
    "standard".into()
}

fn default_single() -> String {
    "single".into()
}

impl TomlItem {
    fn into_item(self) -> Result<Item> {
        let kind = match normalize(&self.kind).as_str() {
            "weapon" => ItemKind::Weapon,
            "ammunition" | "ammo" => ItemKind::Ammunition,
            "heatsink" => ItemKind::HeatSink(parse_heat_sinks(
                self.heat_sink.as_deref().unwrap_or("single"),
            )?),
            "jumpjet" => ItemKind::JumpJet,
            "engine" => {
                let engine = self.engine.as_ref().ok_or_else(|| {
                    BayError::Config(format!("engine item {} has no [engine] table", self.id))
                })?;
                ItemKind::Engine(EngineSpec {
                    rating: engine.rating,
                    side_slots: engine.side_slots,
                    heat_sink_slots: engine.heat_sink_slots,
                })
            }
            "support" => ItemKind::Support,
            "internal" => ItemKind::Internal,
            "module" => ItemKind::Module,
            "other" => ItemKind::Other,
            _ => return Err(BayError::Config(format!("unknown item kind: {}", self.kind))),
        };

        let hardpoint = self
            .hardpoint
            .as_deref()
            .map(str::parse::<HardpointType>)
            .transpose()?;
        let faction = self
            .faction
            .as_deref()
            .map(parse_faction)
            .transpose()?
            .unwrap_or(Faction::Any);
        let allowed_locations = self
            .allowed_locations
            .map(|names| names.iter().map(|n| n.parse::<Location>()).collect::<Result<Vec<_>>>())
            .transpose()?;
        let allowed_classes = self
            .allowed_classes
            .map(|names| names.iter().map(|n| parse_class(n)).collect::<Result<Vec<_>>>())
            .transpose()?;

        Ok(Item {
            id: ItemId(self.id),
            name: self.name,
            mass: self.mass,
            slots: self.slots,
            hardpoint,
            kind,
            faction,
            allowed_locations,
            allowed_classes,
            one_per_component: self.one_per_component,
        })
    }
}

impl TomlPod {
    fn into_pod(self, catalog: &Catalog) -> Result<OmniPod> {
        let location: Location = self.location.parse()?;
        let hardpoints = parse_hardpoints(&self.hardpoints)?;
        let mut pod = OmniPod::new(PodId(self.id), self.series.as_str(), location, &hardpoints)
            .with_jump_jets(self.jump_jets);
        if let Some(name) = self.name {
            pod.name = name;
        }
        pod.fixed_items = resolve_items(catalog, &self.fixed_items)?;
        pod.toggleable_items = resolve_items(catalog, &self.toggleable_items)?;
        pod.modifiers = self
            .modifiers
            .into_iter()
            .map(TomlModifier::into_modifier)
            .collect::<Result<Vec<_>>>()?;
        Ok(pod)
    }
}

impl TomlModifier {
    fn into_modifier(self) -> Result<Modifier> {
        let operation = match normalize(&self.operation).as_str() {
            "additive" | "add" => ModifierOp::Additive,
            "multiplicative" | "mul" => ModifierOp::Multiplicative,
            _ => {
                return Err(BayError::Config(format!(
                    "unknown modifier operation: {}",
                    self.operation
                )))
            }
        };
        Ok(Modifier {
            attribute: self.attribute,
            operation,
            value: self.value,
        })
    }
}

impl TomlChassis {
    fn into_chassis(self, catalog: &Catalog) -> Result<Chassis> {
        let id = ChassisId(self.id);
        let faction = parse_faction(&self.faction)?;

        let mut parsed = Vec::with_capacity(self.components.len());
        for component in self.components {
            let location: Location = component.location.parse()?;
            parsed.push((location, component));
        }
        let find = |location: Location| {
            parsed
                .iter()
                .find(|(l, _)| *l == location)
                .map(|(_, c)| c)
                .ok_or_else(|| BayError::MissingLocation {
                    chassis: id.clone(),
                    location,
                })
        };

        let components = LocationMap::try_from_fn(|location| {
            let def = find(location)?;
            let component = Component {
                location,
                slots: def.slots,
                hit_points: def.hit_points,
                fixed_items: resolve_items(catalog, &def.fixed_items)?,
                hardpoints: parse_hardpoints(&def.hardpoints)?,
            };
            Ok::<_, BayError>(Arc::new(component))
        })?;

        let kind = match normalize(&self.kind).as_str() {
            "standard" => ChassisKind::Standard {
                max_jump_jets: self.max_jump_jets,
            },
            "omni" => {
                let stock_pods = LocationMap::try_from_fn(|location| {
                    let def = find(location)?;
                    let pod_id = def.pod.as_ref().ok_or_else(|| {
                        BayError::Config(format!(
                            "omni chassis {} has no stock pod for {}",
                            id, location
                        ))
                    })?;
                    catalog.pod(&PodId(pod_id.clone()))
                })?;
                let upgrades = self
                    .upgrades
                    .map(TomlUpgrades::into_upgrades)
                    .transpose()?
                    .unwrap_or_default();
                ChassisKind::Omni(OmniLayout {
                    stock_pods,
                    upgrades,
                })
            }
            _ => return Err(BayError::Config(format!("unknown chassis kind: {}", self.kind))),
        };

        Ok(Chassis {
            id,
            name: self.name,
            series: self.series.into(),
            faction,
            max_mass: self.max_mass,
            module_slots: self
                .module_slots
                .unwrap_or(catalog.rules().default_module_slots),
            components,
            kind,
        })
    }
}

impl TomlUpgrades {
    fn into_upgrades(self) -> Result<Upgrades> {
        let structure = match normalize(&self.structure).as_str() {
            "standard" => StructureKind::Standard,
            "endosteel" | "endo" => StructureKind::EndoSteel,
            _ => return Err(BayError::Config(format!("unknown structure: {}", self.structure))),
        };
        let armor = match normalize(&self.armor).as_str() {
            "standard" => ArmorKind::Standard,
            "ferrofibrous" | "ferro" => ArmorKind::FerroFibrous,
            _ => return Err(BayError::Config(format!("unknown armor: {}", self.armor))),
        };
        Ok(Upgrades {
            structure,
            armor,
            heat_sinks: parse_heat_sinks(&self.heat_sinks)?,
        })
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase().replace(['-', '_', ' '], "")
}

fn parse_faction(s: &str) -> Result<Faction> {
    match normalize(s).as_str() {
        "innersphere" | "is" => Ok(Faction::InnerSphere),
        "clan" => Ok(Faction::Clan),
        "any" => Ok(Faction::Any),
        _ => Err(BayError::Config(format!("unknown faction: {}", s))),
    }
}

fn parse_class(s: &str) -> Result<ChassisClass> {
    match normalize(s).as_str() {
        "light" => Ok(ChassisClass::Light),
        "medium" => Ok(ChassisClass::Medium),
        "heavy" => Ok(ChassisClass::Heavy),
        "assault" => Ok(ChassisClass::Assault),
        _ => Err(BayError::Config(format!("unknown chassis class: {}", s))),
    }
}

fn parse_heat_sinks(s: &str) -> Result<HeatSinkKind> {
    match normalize(s).as_str() {
        "single" => Ok(HeatSinkKind::Single),
        "double" => Ok(HeatSinkKind::Double),
        _ => Err(BayError::Config(format!("unknown heat sink type: {}", s))),
    }
}

fn parse_hardpoints(names: &[String]) -> Result<Vec<HardpointType>> {
    names.iter().map(|n| n.parse::<HardpointType>()).collect()
}

fn resolve_items(catalog: &Catalog, ids: &[String]) -> Result<Vec<Arc<Item>>> {
    ids.iter()
        .map(|id| catalog.item(&ItemId(id.clone())))
        .collect()
}
