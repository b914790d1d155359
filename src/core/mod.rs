pub mod config;
pub mod error;
pub mod types;

pub use config::RulesConfig;
pub use error::{BayError, Result};
pub use types::{
    ChassisClass, ChassisId, Faction, HardpointType, ItemId, Location, LocationMap, PodId,
    SeriesId,
};
