//! Mechbay - command line entry point
//!
//! Loads a catalog file and answers two questions about it: can a part be
//! equipped on a build, and which pods reach a hardpoint profile. Results
//! are printed as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mechbay::catalog::Catalog;
use mechbay::core::error::Result;
use mechbay::core::types::{ChassisId, HardpointType, ItemId};
use mechbay::equip::{can_equip, EquipResult};
use mechbay::loadout::Loadout;
use mechbay::solver::{self, Requirements};

/// Loadout legality checks and omnipod selection
#[derive(Parser, Debug)]
#[command(name = "mechbay")]
#[command(about = "Check loadout legality and search omnipod assignments")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a loadout, then report whether one more item fits
    Check {
        /// Catalog TOML file
        #[arg(long)]
        catalog: PathBuf,

        /// Chassis id to build on
        #[arg(long)]
        chassis: String,

        /// Item id to check
        #[arg(long)]
        item: String,

        /// Items to equip first, in order
        #[arg(long)]
        equip: Vec<String>,
    },

    /// Search pods of an omni chassis for a minimum hardpoint profile
    Pods {
        /// Catalog TOML file
        #[arg(long)]
        catalog: PathBuf,

        /// Omni chassis id
        #[arg(long)]
        chassis: String,

        #[arg(long, default_value_t = 0)]
        energy: u32,

        #[arg(long, default_value_t = 0)]
        ballistic: u32,

        #[arg(long, default_value_t = 0)]
        missile: u32,

        #[arg(long, default_value_t = 0)]
        anti_missile: u32,

        /// Minimum jump jet capacity
        #[arg(long, default_value_t = 0)]
        jump_jets: u32,

        /// Require an ECM hardpoint
        #[arg(long)]
        ecm: bool,
    },
}

/// JSON form of an equip result
#[derive(Serialize)]
struct ResultReport {
    #[serde(flatten)]
    result: EquipResult,
    message: String,
}

impl From<EquipResult> for ResultReport {
    fn from(result: EquipResult) -> Self {
        Self {
            result,
            message: result.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Refusal {
    item: String,
    result: ResultReport,
}

#[derive(Serialize)]
struct CheckReport {
    chassis: String,
    equipped: Vec<String>,
    refused: Vec<Refusal>,
    mass: f64,
    free_slots: u32,
    item: String,
    result: ResultReport,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mechbay=info")),
        )
        .init();

    let args = Args::parse();
    let output = match args.command {
        Command::Check {
            catalog,
            chassis,
            item,
            equip,
        } => {
            let catalog = Catalog::load_file(&catalog)?;
            serde_json::to_string_pretty(&check(&catalog, chassis, item, equip)?)?
        }
        Command::Pods {
            catalog,
            chassis,
            energy,
            ballistic,
            missile,
            anti_missile,
            jump_jets,
            ecm,
        } => {
            let catalog = Catalog::load_file(&catalog)?;
            let chassis = catalog.chassis(&ChassisId(chassis))?;
            let mut requirements = Requirements::new()
                .with_hardpoints(HardpointType::Energy, energy)
                .with_hardpoints(HardpointType::Ballistic, ballistic)
                .with_hardpoints(HardpointType::Missile, missile)
                .with_hardpoints(HardpointType::AntiMissile, anti_missile)
                .with_jump_jets(jump_jets);
            if ecm {
                requirements = requirements.with_ecm();
            }
            if !chassis.is_omni() {
                tracing::warn!("{} is not an omni chassis; no pods to select", chassis.id);
            }
            let report = solver::report(&catalog, &chassis, &requirements);
            tracing::info!(
                "Pod search on {} visited {} nodes ({} pruned)",
                report.chassis,
                report.nodes,
                report.pruned
            );
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn check(catalog: &Catalog, chassis: String, item: String, equip: Vec<String>) -> Result<CheckReport> {
    let mut loadout = Loadout::new(catalog, &ChassisId(chassis.clone()))?;

    let mut equipped = Vec::new();
    let mut refused = Vec::new();
    for id in equip {
        let part = catalog.item(&ItemId(id.clone()))?;
        let result = loadout.equip(part);
        if result.is_success() {
            equipped.push(id);
        } else {
            tracing::warn!("Could not equip {}: {}", id, result);
            refused.push(Refusal {
                item: id,
                result: result.into(),
            });
        }
    }

    let part = catalog.item(&ItemId(item.clone()))?;
    let result = can_equip(&loadout, &part);

    Ok(CheckReport {
        chassis,
        equipped,
        refused,
        mass: loadout.mass(),
        free_slots: loadout.free_slots(),
        item,
        result: result.into(),
    })
}
