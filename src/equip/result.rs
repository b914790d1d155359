//! Outcome of an equip legality check
//!
//! Failures are ordinary values. Each kind carries a specificity rank used
//! only to choose the most informative failure when every location refuses
//! an item.

use serde::{Deserialize, Serialize};

use crate::core::types::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipResultKind {
    Success,
    TooHeavy,
    NotEnoughSlots,
    /// A wide engine cannot fit its side torso parts
    NotEnoughSlotsForSideComponent,
    IncompatibleUpgrades,
    /// The item is restricted away from this location
    NoComponentSupport,
    CapacityReached,
    AlreadyEquipped,
    NoFreeHardpoints,
    /// The component already holds the one permitted copy
    ComponentAlreadyRestricted,
    NotSupported,
}

impl EquipResultKind {
    /// Specificity of a failure; higher is more specific
    ///
    /// `NotSupported` and `NotEnoughSlotsForSideComponent` share a rank.
    pub fn rank(self) -> u8 {
        match self {
            EquipResultKind::Success => 0,
            EquipResultKind::NotSupported => 1,
            EquipResultKind::NotEnoughSlotsForSideComponent => 1,
            EquipResultKind::NoComponentSupport => 2,
            EquipResultKind::NoFreeHardpoints => 3,
            EquipResultKind::ComponentAlreadyRestricted => 4,
            EquipResultKind::NotEnoughSlots => 5,
            EquipResultKind::TooHeavy
            | EquipResultKind::IncompatibleUpgrades
            | EquipResultKind::CapacityReached
            | EquipResultKind::AlreadyEquipped => 6,
        }
    }
}

/// Feasibility outcome: a kind plus the location it applies to, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipResult {
    kind: EquipResultKind,
    location: Option<Location>,
}

impl EquipResult {
    /// The one success value
    pub const SUCCESS: EquipResult = EquipResult {
        kind: EquipResultKind::Success,
        location: None,
    };

    /// A location-independent result
    pub const fn new(kind: EquipResultKind) -> Self {
        Self { kind, location: None }
    }

    /// A result qualified by location; success is never qualified
    pub const fn at(kind: EquipResultKind, location: Location) -> Self {
        match kind {
            EquipResultKind::Success => Self::SUCCESS,
            _ => Self {
                kind,
                location: Some(location),
            },
        }
    }

    pub fn kind(&self) -> EquipResultKind {
        self.kind
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn is_success(&self) -> bool {
        self.kind == EquipResultKind::Success
    }

    pub fn rank(&self) -> u8 {
        self.kind.rank()
    }

    /// Strictly more specific than `other`; ties are not
    pub fn is_more_specific_than(&self, other: &EquipResult) -> bool {
        self.rank() > other.rank()
    }
}

impl std::fmt::Display for EquipResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self.kind {
            EquipResultKind::Success => "Success",
            EquipResultKind::TooHeavy => "Too heavy",
            EquipResultKind::NotEnoughSlots => "Not enough free slots",
            EquipResultKind::NotEnoughSlotsForSideComponent => {
                "Not enough free slots for the engine side torso parts"
            }
            EquipResultKind::IncompatibleUpgrades => "Incompatible with the current upgrades",
            EquipResultKind::NoComponentSupport => "The item cannot be mounted in this component",
            EquipResultKind::CapacityReached => "Capacity reached",
            EquipResultKind::AlreadyEquipped => "Already equipped",
            EquipResultKind::NoFreeHardpoints => "No free hardpoints",
            EquipResultKind::ComponentAlreadyRestricted => {
                "The component already holds one of these"
            }
            EquipResultKind::NotSupported => "Not supported",
        };
        match self.location {
            Some(location) => write!(f, "{} ({})", message, location),
            None => f.write_str(message),
        }
    }
}
