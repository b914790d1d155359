//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::core::error::BayError;

/// Identifier of a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
pub struct ItemId(pub String);

/// Identifier of an omnipod
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
pub struct PodId(pub String);

/// Identifier of a chassis
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
pub struct ChassisId(pub String);

/// Variant series shared by chassis that can exchange omnipods
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
pub struct SeriesId(pub String);

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for PodId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for ChassisId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Body position a component occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    Head,
    LeftArm,
    LeftTorso,
    CenterTorso,
    RightTorso,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Location {
    /// Number of locations on every chassis
    pub const COUNT: usize = 8;

    /// All locations in traversal order
    pub const ALL: [Location; Location::COUNT] = [
        Location::Head,
        Location::LeftArm,
        Location::LeftTorso,
        Location::CenterTorso,
        Location::RightTorso,
        Location::RightArm,
        Location::LeftLeg,
        Location::RightLeg,
    ];

    /// Position in `Location::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Torsos carry separate front and back armor
    pub fn is_two_sided(self) -> bool {
        matches!(
            self,
            Location::LeftTorso | Location::CenterTorso | Location::RightTorso
        )
    }

    pub fn is_side_torso(self) -> bool {
        matches!(self, Location::LeftTorso | Location::RightTorso)
    }

    /// Mirror location used by symmetric rules, if any
    pub fn opposite(self) -> Option<Location> {
        match self {
            Location::LeftArm => Some(Location::RightArm),
            Location::RightArm => Some(Location::LeftArm),
            Location::LeftTorso => Some(Location::RightTorso),
            Location::RightTorso => Some(Location::LeftTorso),
            Location::LeftLeg => Some(Location::RightLeg),
            Location::RightLeg => Some(Location::LeftLeg),
            Location::Head | Location::CenterTorso => None,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Location::Head => "HD",
            Location::LeftArm => "LA",
            Location::LeftTorso => "LT",
            Location::CenterTorso => "CT",
            Location::RightTorso => "RT",
            Location::RightArm => "RA",
            Location::LeftLeg => "LL",
            Location::RightLeg => "RL",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Location::Head => "head",
            Location::LeftArm => "left arm",
            Location::LeftTorso => "left torso",
            Location::CenterTorso => "center torso",
            Location::RightTorso => "right torso",
            Location::RightArm => "right arm",
            Location::LeftLeg => "left leg",
            Location::RightLeg => "right leg",
        };
        f.write_str(name)
    }
}

impl FromStr for Location {
    type Err = BayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "hd" | "head" => Ok(Location::Head),
            "la" | "leftarm" => Ok(Location::LeftArm),
            "lt" | "lefttorso" => Ok(Location::LeftTorso),
            "ct" | "centertorso" => Ok(Location::CenterTorso),
            "rt" | "righttorso" => Ok(Location::RightTorso),
            "ra" | "rightarm" => Ok(Location::RightArm),
            "ll" | "leftleg" => Ok(Location::LeftLeg),
            "rl" | "rightleg" => Ok(Location::RightLeg),
            _ => Err(BayError::InvalidLocation(s.to_string())),
        }
    }
}

/// Total map from every location to a value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationMap<T>([T; Location::COUNT]);

impl<T> LocationMap<T> {
    /// Build a map by evaluating `f` for each location in traversal order
    pub fn from_fn(mut f: impl FnMut(Location) -> T) -> Self {
        Self(Location::ALL.map(&mut f))
    }

    /// Build a map, failing on the first location `f` rejects
    pub fn try_from_fn<E>(mut f: impl FnMut(Location) -> Result<T, E>) -> Result<Self, E> {
        let mut values = Vec::with_capacity(Location::COUNT);
        for location in Location::ALL {
            values.push(f(location)?);
        }
        match values.try_into() {
            Ok(array) => Ok(Self(array)),
            Err(_) => unreachable!("one value per location"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> {
        Location::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> Index<Location> for LocationMap<T> {
    type Output = T;

    fn index(&self, location: Location) -> &T {
        &self.0[location.index()]
    }
}

impl<T> IndexMut<Location> for LocationMap<T> {
    fn index_mut(&mut self, location: Location) -> &mut T {
        &mut self.0[location.index()]
    }
}

/// Typed mounting point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HardpointType {
    Energy,
    Ballistic,
    Missile,
    AntiMissile,
    /// Electronic warfare (support equipment)
    Ecm,
}

impl HardpointType {
    pub const COUNT: usize = 5;

    pub const ALL: [HardpointType; HardpointType::COUNT] = [
        HardpointType::Energy,
        HardpointType::Ballistic,
        HardpointType::Missile,
        HardpointType::AntiMissile,
        HardpointType::Ecm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for HardpointType {
    type Err = BayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "energy" | "e" => Ok(HardpointType::Energy),
            "ballistic" | "b" => Ok(HardpointType::Ballistic),
            "missile" | "m" => Ok(HardpointType::Missile),
            "antimissile" | "ams" => Ok(HardpointType::AntiMissile),
            "ecm" => Ok(HardpointType::Ecm),
            _ => Err(BayError::InvalidHardpoint(s.to_string())),
        }
    }
}

/// Technology base of a chassis or item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Faction {
    InnerSphere,
    Clan,
    /// Usable by either technology base
    #[default]
    Any,
}

impl Faction {
    /// Can an item of this faction be mounted on a chassis of `chassis` faction?
    pub fn is_compatible(self, chassis: Faction) -> bool {
        self == Faction::Any || chassis == Faction::Any || self == chassis
    }
}

/// Weight class derived from chassis max mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChassisClass {
    Light,
    Medium,
    Heavy,
    Assault,
}

impl ChassisClass {
    pub fn from_mass(max_mass: f64) -> Self {
        if max_mass < 40.0 {
            ChassisClass::Light
        } else if max_mass < 60.0 {
            ChassisClass::Medium
        } else if max_mass < 80.0 {
            ChassisClass::Heavy
        } else {
            ChassisClass::Assault
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_index_matches_all() {
        for (i, location) in Location::ALL.iter().enumerate() {
            assert_eq!(location.index(), i);
        }
    }

    #[test]
    fn test_opposite_is_symmetric() {
        for location in Location::ALL {
            if let Some(other) = location.opposite() {
                assert_eq!(other.opposite(), Some(location));
                assert_ne!(other, location);
            }
        }
        assert_eq!(Location::CenterTorso.opposite(), None);
    }

    #[test]
    fn test_two_sided_locations() {
        let two_sided: Vec<_> = Location::ALL.into_iter().filter(|l| l.is_two_sided()).collect();
        assert_eq!(
            two_sided,
            vec![Location::LeftTorso, Location::CenterTorso, Location::RightTorso]
        );
    }

    #[test]
    fn test_location_parse() {
        assert_eq!("CT".parse::<Location>().unwrap(), Location::CenterTorso);
        assert_eq!("right_arm".parse::<Location>().unwrap(), Location::RightArm);
        assert_eq!("Left Leg".parse::<Location>().unwrap(), Location::LeftLeg);
        assert!("tail".parse::<Location>().is_err());
    }

    #[test]
    fn test_location_map_index() {
        let mut map = LocationMap::from_fn(|l| l.index() * 10);
        assert_eq!(map[Location::RightTorso], 40);
        map[Location::Head] = 7;
        assert_eq!(map[Location::Head], 7);
        assert_eq!(map.iter().count(), Location::COUNT);
    }

    #[test]
    fn test_faction_compatibility() {
        assert!(Faction::Any.is_compatible(Faction::Clan));
        assert!(Faction::Clan.is_compatible(Faction::Clan));
        assert!(!Faction::Clan.is_compatible(Faction::InnerSphere));
    }

    #[test]
    fn test_class_from_mass() {
        assert_eq!(ChassisClass::from_mass(20.0), ChassisClass::Light);
        assert_eq!(ChassisClass::from_mass(55.0), ChassisClass::Medium);
        assert_eq!(ChassisClass::from_mass(75.0), ChassisClass::Heavy);
        assert_eq!(ChassisClass::from_mass(100.0), ChassisClass::Assault);
    }
}
