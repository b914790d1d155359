use thiserror::Error;

use crate::core::types::{ChassisId, ItemId, Location, PodId, SeriesId};

#[derive(Error, Debug)]
pub enum BayError {
    #[error("Chassis not found: {0}")]
    UnknownChassis(ChassisId),

    #[error("Item not found: {0}")]
    UnknownItem(ItemId),

    #[error("Omnipod not found: {0}")]
    UnknownPod(PodId),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Invalid hardpoint type: {0}")]
    InvalidHardpoint(String),

    #[error("Chassis {chassis} has no definition for {location}")]
    MissingLocation { chassis: ChassisId, location: Location },

    #[error("Invalid component {location} on {chassis}: {reason}")]
    InvalidComponent {
        chassis: ChassisId,
        location: Location,
        reason: String,
    },

    #[error("Omnipod {pod} is authored for {expected}, not {actual}")]
    PodLocationMismatch {
        pod: PodId,
        expected: Location,
        actual: Location,
    },

    #[error("Omnipod {pod} belongs to series {pod_series}, chassis {chassis} is {chassis_series}")]
    PodSeriesMismatch {
        pod: PodId,
        pod_series: SeriesId,
        chassis: ChassisId,
        chassis_series: SeriesId,
    },

    #[error("Invalid rules configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BayError>;
