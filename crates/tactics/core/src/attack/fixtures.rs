//! Battlefield builders shared by the attack unit tests.

use super::{AttackDeclaration, ResolutionRecord, evaluate};
use crate::env::BattlefieldSnapshot;
use crate::state::{
    Crew, EntityId, Facing, HexCoord, Location, MountedWeapon, RangeBands, TeamId, UnitKind,
    UnitState, WeaponClass,
};

pub(crate) const ATTACKER: EntityId = EntityId(1);
pub(crate) const TARGET: EntityId = EntityId(2);

/// Gunnery 4, piloting 5, facing north.
pub(crate) fn mech(id: EntityId, col: i32, row: i32) -> UnitState {
    UnitState::new(id, UnitKind::BipedMech, HexCoord::new(col, row))
        .with_crew(Crew::new(4, 5))
        .with_tonnage(50)
}

pub(crate) fn enemy(id: EntityId, col: i32, row: i32) -> UnitState {
    mech(id, col, row).on_team(TeamId(1)).facing(Facing::South)
}

pub(crate) fn medium_laser(location: Location) -> MountedWeapon {
    MountedWeapon::new(
        "Medium Laser",
        WeaponClass::Energy,
        location,
        RangeBands::new(0, 3, 6, 9),
    )
}

pub(crate) fn field() -> BattlefieldSnapshot {
    BattlefieldSnapshot::open_field(16, 17)
}

/// Attacker at (4, 8) facing north with a target `distance` hexes straight ahead.
pub(crate) fn duel(distance: i32) -> BattlefieldSnapshot {
    field()
        .with_unit(mech(ATTACKER, 4, 8).with_weapon(medium_laser(Location::RightArm)))
        .with_unit(enemy(TARGET, 4, 8 - distance))
}

pub(crate) fn eval(snapshot: &BattlefieldSnapshot, declaration: AttackDeclaration) -> ResolutionRecord {
    evaluate(&declaration, &snapshot.env()).expect("valid declaration")
}

pub(crate) fn reasons(record: &ResolutionRecord) -> Vec<&str> {
    record
        .modifiers
        .iter()
        .map(|entry| entry.reason.as_str())
        .collect()
}

pub(crate) fn delta_of(record: &ResolutionRecord, reason: &str) -> Option<i32> {
    record
        .modifiers
        .iter()
        .find(|entry| entry.reason == reason)
        .map(|entry| entry.delta)
}
