//! Equip legality: may a part be added to a build, and if not, why.

pub mod checker;
pub mod result;

pub use checker::{can_equip, can_equip_at, can_equip_global, can_equip_local};
pub use result::{EquipResult, EquipResultKind};
