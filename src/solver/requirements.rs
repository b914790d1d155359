//! Requirement vectors for pod selection

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::catalog::OmniPod;
use crate::core::types::HardpointType;

/// Dimensions tracked by the search: one per hardpoint type plus jump jets
pub const DIMENSIONS: usize = HardpointType::COUNT + 1;

const JUMP_JETS: usize = HardpointType::COUNT;

/// Minimums a pod assignment must reach
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirements {
    /// Minimum hardpoints per type, indexed by `HardpointType::index`
    pub hardpoints: [u32; HardpointType::COUNT],
    /// Minimum jump jet capacity
    pub jump_jets: u32,
    /// Require at least one ECM hardpoint
    pub ecm: bool,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hardpoints(mut self, hardpoint: HardpointType, count: u32) -> Self {
        self.hardpoints[hardpoint.index()] = count;
        self
    }

    pub fn with_jump_jets(mut self, count: u32) -> Self {
        self.jump_jets = count;
        self
    }

    pub fn with_ecm(mut self) -> Self {
        self.ecm = true;
        self
    }

    pub fn hardpoints(&self, hardpoint: HardpointType) -> u32 {
        self.hardpoints[hardpoint.index()]
    }

    /// The requirement as a demand vector, before any fixed contribution
    pub fn demand(&self) -> Demand {
        let mut values = [0i64; DIMENSIONS];
        for hardpoint in HardpointType::ALL {
            values[hardpoint.index()] = i64::from(self.hardpoints(hardpoint));
        }
        if self.ecm {
            let ecm = &mut values[HardpointType::Ecm.index()];
            *ecm = (*ecm).max(1);
        }
        values[JUMP_JETS] = i64::from(self.jump_jets);
        Demand(values)
    }
}

/// Signed per-dimension amounts; positive entries are still unmet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Demand(pub [i64; DIMENSIONS]);

impl Demand {
    /// What a pod supplies in every dimension
    pub fn of_pod(pod: &OmniPod) -> Self {
        let mut values = [0i64; DIMENSIONS];
        for hardpoint in &pod.hardpoints {
            values[hardpoint.index()] += 1;
        }
        values[JUMP_JETS] = i64::from(pod.jump_jets);
        Demand(values)
    }

    pub fn hardpoints(&self, hardpoint: HardpointType) -> i64 {
        self.0[hardpoint.index()]
    }

    pub fn jump_jets(&self) -> i64 {
        self.0[JUMP_JETS]
    }

    /// Every dimension is met
    pub fn is_satisfied(&self) -> bool {
        self.0.iter().all(|v| *v <= 0)
    }

    /// Element-wise maximum
    pub fn max(self, other: Demand) -> Demand {
        let mut values = self.0;
        for (value, theirs) in values.iter_mut().zip(other.0) {
            *value = (*value).max(theirs);
        }
        Demand(values)
    }

    /// Does `supply` fall short of this demand in any dimension?
    pub fn exceeds(&self, supply: &Demand) -> bool {
        self.0.iter().zip(supply.0.iter()).any(|(need, have)| have < need)
    }
}

impl Add for Demand {
    type Output = Demand;

    fn add(self, rhs: Demand) -> Demand {
        let mut values = self.0;
        for (value, theirs) in values.iter_mut().zip(rhs.0) {
            *value += theirs;
        }
        Demand(values)
    }
}

impl Sub for Demand {
    type Output = Demand;

    fn sub(self, rhs: Demand) -> Demand {
        let mut values = self.0;
        for (value, theirs) in values.iter_mut().zip(rhs.0) {
            *value -= theirs;
        }
        Demand(values)
    }
}
