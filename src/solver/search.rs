//! Depth-first branch-and-bound over per-location pod candidates
//!
//! Each node records the location it decided, the candidate chosen there
//! and the demand still unmet. Nodes are never mutated: descending creates
//! a child, revising a choice creates a sibling, and backtracking pops the
//! explicit stack.

use std::sync::Arc;

use crate::catalog::{Catalog, Chassis, OmniPod};
use crate::core::types::Location;
use crate::solver::requirements::{Demand, Requirements};
use crate::solver::PodAssignment;

/// Location visiting order; hardpoint-dense locations first
pub const SEARCH_ORDER: [Location; 7] = [
    Location::RightArm,
    Location::LeftArm,
    Location::RightTorso,
    Location::LeftTorso,
    Location::Head,
    Location::LeftLeg,
    Location::RightLeg,
];

/// Counters for one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes created, root included
    pub nodes: u64,
    /// Nodes whose subtree was cut by the bound
    pub pruned: u64,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Index into the search slots; `None` for the root
    slot: Option<usize>,
    choice: usize,
    remaining: Demand,
}

/// One location with its candidates and their supplies
struct Slot {
    location: Location,
    candidates: Vec<Arc<OmniPod>>,
    supplies: Vec<Demand>,
}

/// A configured pod search
pub struct PodSearch {
    slots: Vec<Slot>,
    /// `bounds[i]`: sum over slots `i..` of each slot's best supply per dimension
    bounds: Vec<Demand>,
    initial: Demand,
    prune: bool,
    stats: SearchStats,
}

impl PodSearch {
    /// Prepare a search over the swappable locations of an omni chassis
    ///
    /// The requirement is reduced by what the fixed center torso pod
    /// already supplies. Returns `None` for a standard chassis.
    pub fn new(catalog: &Catalog, chassis: &Chassis, requirements: &Requirements) -> Option<Self> {
        let layout = chassis.omni()?;
        let center = Demand::of_pod(layout.center_pod());
        let initial = requirements.demand() - center;

        let candidates = SEARCH_ORDER.iter().map(|location| {
            (
                *location,
                catalog.pods(&chassis.series, *location).to_vec(),
            )
        });
        Some(Self::from_candidates(candidates, initial))
    }

    /// Search explicit candidate lists against an already reduced demand
    pub fn from_candidates(
        candidates: impl IntoIterator<Item = (Location, Vec<Arc<OmniPod>>)>,
        initial: Demand,
    ) -> Self {
        let slots: Vec<Slot> = candidates
            .into_iter()
            .map(|(location, candidates)| {
                let supplies = candidates.iter().map(|pod| Demand::of_pod(pod)).collect();
                Slot {
                    location,
                    candidates,
                    supplies,
                }
            })
            .collect();

        let mut bounds = vec![Demand::default(); slots.len() + 1];
        for (i, slot) in slots.iter().enumerate().rev() {
            let best = slot
                .supplies
                .iter()
                .fold(Demand::default(), |best, supply| best.max(*supply));
            bounds[i] = bounds[i + 1] + best;
        }

        Self {
            slots,
            bounds,
            initial,
            prune: true,
            stats: SearchStats::default(),
        }
    }

    /// Explore every branch; only useful to validate the bound
    pub fn without_pruning(mut self) -> Self {
        self.prune = false;
        self
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Run the search; the first feasible assignment wins
    pub fn run(&mut self) -> Option<PodAssignment> {
        self.stats = SearchStats::default();
        let root = Node {
            slot: None,
            choice: 0,
            remaining: self.initial,
        };
        self.stats.nodes += 1;
        let mut stack = vec![root];

        loop {
            let node = *stack.last()?;
            if self.accept(&node) {
                tracing::debug!(
                    "Pod search succeeded after {} nodes ({} pruned)",
                    self.stats.nodes,
                    self.stats.pruned
                );
                return Some(self.assignment(&stack));
            }

            let child = if self.prune && self.reject(&node) {
                self.stats.pruned += 1;
                None
            } else {
                self.first(&node)
            };
            if let Some(child) = child {
                self.stats.nodes += 1;
                stack.push(child);
                continue;
            }

            // Backtrack to the nearest node that still has a sibling
            loop {
                let Some(done) = stack.pop() else {
                    tracing::debug!(
                        "Pod search exhausted after {} nodes ({} pruned)",
                        self.stats.nodes,
                        self.stats.pruned
                    );
                    return None;
                };
                if let Some(sibling) = self.next(&done) {
                    self.stats.nodes += 1;
                    stack.push(sibling);
                    break;
                }
            }
        }
    }

    fn accept(&self, node: &Node) -> bool {
        node.remaining.is_satisfied()
    }

    /// No completion of `node` can meet the demand
    ///
    /// Assumes every unvisited location supplies its per-dimension best at
    /// once, which only overestimates, so no feasible branch is cut.
    fn reject(&self, node: &Node) -> bool {
        let unvisited = node.slot.map_or(0, |slot| slot + 1);
        node.remaining.exceeds(&self.bounds[unvisited])
    }

    /// First candidate of the next location that has any
    fn first(&self, node: &Node) -> Option<Node> {
        let start = node.slot.map_or(0, |slot| slot + 1);
        let slot = (start..self.slots.len()).find(|i| !self.slots[*i].candidates.is_empty())?;
        Some(Node {
            slot: Some(slot),
            choice: 0,
            remaining: node.remaining - self.slots[slot].supplies[0],
        })
    }

    /// Following candidate at the same location
    fn next(&self, node: &Node) -> Option<Node> {
        let slot = node.slot?;
        let supplies = &self.slots[slot].supplies;
        let choice = node.choice + 1;
        if choice >= supplies.len() {
            return None;
        }
        Some(Node {
            slot: Some(slot),
            choice,
            remaining: node.remaining + supplies[node.choice] - supplies[choice],
        })
    }

    fn assignment(&self, stack: &[Node]) -> PodAssignment {
        let mut assignment = PodAssignment::default();
        for node in stack {
            if let Some(slot) = node.slot {
                let slot = &self.slots[slot];
                assignment.insert(slot.location, Arc::clone(&slot.candidates[node.choice]));
            }
        }
        assignment
    }
}
