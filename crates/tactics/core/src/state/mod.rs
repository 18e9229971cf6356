//! Battlefield state read by the attack engine.
//!
//! Units, equipment and terrain are owned by the host application. The engine
//! never mutates them; it reads them through the oracles in [`crate::env`].
pub mod types;

pub use types::{
    Actuators, AmmoKind, Arc, BuildingInfo, ClubKind, Crew, CrewAbility, EntityId, Facing,
    GrappleLink, HexCoord, HexState, Location, LocationState, MountedClub, MountedWeapon,
    MovementMode, MovementReport, RangeBands, RangeBracket, Smoke, TeamId, UnitKind, UnitState,
    UnitStatus, WeaponClass, WeaponFlags, WeightClass, Woods,
};
