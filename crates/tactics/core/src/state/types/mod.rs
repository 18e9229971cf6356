mod common;
mod equipment;
mod hex;
mod terrain;
mod unit;

pub use common::{EntityId, TeamId};
pub use equipment::{
    Actuators, AmmoKind, ClubKind, Location, LocationState, MountedClub, MountedWeapon,
    RangeBands, RangeBracket, WeaponClass, WeaponFlags,
};
pub use hex::{Arc, Facing, HexCoord};
pub use terrain::{BuildingInfo, HexState, Smoke, Woods};
pub use unit::{
    Crew, CrewAbility, GrappleLink, MovementMode, MovementReport, UnitKind, UnitState,
    UnitStatus, WeightClass,
};
