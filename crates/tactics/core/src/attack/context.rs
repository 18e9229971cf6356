//! Per-evaluation view of the battlefield.
//!
//! [`AttackContext::build`] performs boundary validation: every lookup that a
//! malformed declaration could break happens here, so guards and modifier
//! clauses can read the battlefield without error handling.

use super::declaration::{AttackDeclaration, AttackKind, TargetRef};
use super::error::AttackError;
use crate::config::GameOption;
use crate::env::{
    BattleEnv, BoardOracle, EwOracle, LosEffects, LosEndpoint, LosOracle, OptionsOracle,
    UnitOracle,
};
use crate::state::{EntityId, HexCoord, HexState, MountedClub, MountedWeapon, TeamId, UnitState};

/// Resolved target of an attack.
#[derive(Clone, Copy, Debug)]
pub struct TargetView<'a> {
    pub reference: TargetRef,
    pub unit: Option<&'a UnitState>,
    pub hex: HexState,
}

impl TargetView<'_> {
    pub fn position(&self) -> HexCoord {
        self.hex.coord
    }

    /// Buildings and fuel tanks.
    pub fn is_structure(&self) -> bool {
        matches!(
            self.reference,
            TargetRef::Building(_) | TargetRef::FuelTank(_)
        )
    }

    /// Structures and bare hexes never move or dodge.
    pub fn is_stationary_object(&self) -> bool {
        self.unit.is_none()
    }

    /// Absolute level of the bottom of the target.
    pub fn base(&self) -> i32 {
        self.hex.level + self.unit.map_or(0, |unit| unit.elevation)
    }

    /// Absolute level of the top of the target.
    pub fn top(&self) -> i32 {
        match (self.reference, self.unit) {
            (_, Some(unit)) => self.base() + unit.height(),
            (TargetRef::Building(_), None) => self.hex.ceiling(),
            _ => self.base(),
        }
    }

    pub fn endpoint(&self) -> LosEndpoint {
        LosEndpoint::new(self.position(), self.base(), self.top())
    }
}

/// Everything an evaluation reads, resolved and validated up front.
pub struct AttackContext<'a> {
    pub declaration: AttackDeclaration,
    pub attacker: &'a UnitState,
    pub attacker_hex: HexState,
    pub target: TargetView<'a>,
    /// Hexes between attacker and target.
    pub distance: u32,
    /// Line of sight from attacker to target.
    pub los: LosEffects,
    board: &'a dyn BoardOracle,
    units: &'a dyn UnitOracle,
    sight: &'a dyn LosOracle,
    options: &'a dyn OptionsOracle,
    ew: &'a dyn EwOracle,
}

impl<'a> AttackContext<'a> {
    /// Resolves a declaration against the environment.
    ///
    /// # Errors
    ///
    /// Returns an [`AttackError`] when an oracle is missing or the declaration
    /// references something that does not exist.
    pub fn build(
        declaration: &AttackDeclaration,
        env: &BattleEnv<'a>,
    ) -> Result<Self, AttackError> {
        let board = env.board()?;
        let units = env.units()?;
        let sight = env.los()?;
        let options = env.options()?;
        let ew = env.ew()?;

        let attacker = units
            .unit(declaration.attacker)
            .ok_or(AttackError::AttackerNotFound(declaration.attacker))?;
        let attacker_hex = unit_hex(board, attacker)?;

        match declaration.kind {
            AttackKind::WeaponFire(fire) => {
                weapon_at(attacker, fire.weapon)?;
                if let Some(spotter) = fire.spotter {
                    let spotter = units
                        .unit(spotter)
                        .ok_or(AttackError::SpotterNotFound(spotter))?;
                    unit_hex(board, spotter)?;
                }
            }
            AttackKind::SwarmRetarget {
                weapon,
                original_target,
            } => {
                weapon_at(attacker, weapon)?;
                if declaration.target.unit().is_none() {
                    return Err(AttackError::UnitTargetRequired("swarm retarget"));
                }
                let original = units
                    .unit(original_target)
                    .ok_or(AttackError::TargetNotFound(original_target))?;
                unit_hex(board, original)?;
            }
            AttackKind::Club { club } => {
                club_at(attacker, club)?;
            }
            _ => {}
        }

        let target = resolve_target(declaration.target, board, units)?;
        Ok(Self::assemble(
            *declaration,
            attacker,
            attacker_hex,
            target,
            board,
            units,
            sight,
            options,
            ew,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        declaration: AttackDeclaration,
        attacker: &'a UnitState,
        attacker_hex: HexState,
        target: TargetView<'a>,
        board: &'a dyn BoardOracle,
        units: &'a dyn UnitOracle,
        sight: &'a dyn LosOracle,
        options: &'a dyn OptionsOracle,
        ew: &'a dyn EwOracle,
    ) -> Self {
        let attacker_end = LosEndpoint::new(
            attacker.position,
            attacker_hex.level + attacker.elevation,
            attacker_hex.level + attacker.elevation + attacker.height(),
        );
        let los = sight.line_of_sight(attacker_end, target.endpoint());
        Self {
            declaration,
            attacker,
            attacker_hex,
            distance: attacker.position.distance(target.position()),
            target,
            los,
            board,
            units,
            sight,
            options,
            ew,
        }
    }

    /// Same attacker and attack, aimed at a different target.
    ///
    /// # Errors
    ///
    /// Returns an [`AttackError`] when the new target does not exist.
    pub fn retarget(&self, target: TargetRef, kind: AttackKind) -> Result<Self, AttackError> {
        let view = resolve_target(target, self.board, self.units)?;
        let declaration = AttackDeclaration::new(self.declaration.attacker, target, kind);
        Ok(Self::assemble(
            declaration,
            self.attacker,
            self.attacker_hex,
            view,
            self.board,
            self.units,
            self.sight,
            self.options,
            self.ew,
        ))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn target_unit(&self) -> Option<&'a UnitState> {
        self.target.unit
    }

    pub fn unit(&self, id: EntityId) -> Option<&'a UnitState> {
        self.units.unit(id)
    }

    pub fn flag(&self, option: GameOption) -> bool {
        self.options.flag(option)
    }

    pub fn int(&self, option: GameOption) -> i32 {
        self.options.int(option)
    }

    pub fn ecm_protected(&self, coord: HexCoord, team: TeamId) -> bool {
        self.ew.ecm_protected(coord, team)
    }

    /// The target unit stands inside its own side's ECM.
    pub fn target_ecm_protected(&self) -> bool {
        self.target
            .unit
            .is_some_and(|unit| self.ecm_protected(unit.position, unit.team))
    }

    pub fn attacker_base(&self) -> i32 {
        self.attacker_hex.level + self.attacker.elevation
    }

    /// Target base level minus attacker base level.
    pub fn elevation_delta(&self) -> i32 {
        self.target.base() - self.attacker_base()
    }

    pub fn hex(&self, coord: HexCoord) -> Option<HexState> {
        self.board.hex(coord)
    }

    /// Line of sight from another unit to the target.
    pub fn sight_from(&self, unit: &UnitState) -> LosEffects {
        let level = self.hex(unit.position).map_or(0, |hex| hex.level);
        let base = level + unit.elevation;
        let from = LosEndpoint::new(unit.position, base, base + unit.height());
        self.sight.line_of_sight(from, self.target.endpoint())
    }

    /// The declared weapon. Index validated in [`AttackContext::build`].
    pub fn weapon(&self, index: usize) -> Option<&'a MountedWeapon> {
        self.attacker.weapons.get(index)
    }

    pub fn club(&self, index: usize) -> Option<&'a MountedClub> {
        self.attacker.clubs.get(index)
    }
}

fn unit_hex(board: &dyn BoardOracle, unit: &UnitState) -> Result<HexState, AttackError> {
    board.hex(unit.position).ok_or(AttackError::UnitOffBoard {
        unit: unit.id,
        position: unit.position,
    })
}

fn weapon_at(attacker: &UnitState, index: usize) -> Result<&MountedWeapon, AttackError> {
    attacker.weapons.get(index).ok_or(AttackError::WeaponIndex {
        attacker: attacker.id,
        index,
        count: attacker.weapons.len(),
    })
}

fn club_at(attacker: &UnitState, index: usize) -> Result<&MountedClub, AttackError> {
    attacker.clubs.get(index).ok_or(AttackError::ClubIndex {
        attacker: attacker.id,
        index,
        count: attacker.clubs.len(),
    })
}

fn resolve_target<'a>(
    target: TargetRef,
    board: &'a dyn BoardOracle,
    units: &'a dyn UnitOracle,
) -> Result<TargetView<'a>, AttackError> {
    match target {
        TargetRef::Unit(id) => {
            let unit = units.unit(id).ok_or(AttackError::TargetNotFound(id))?;
            let hex = unit_hex(board, unit)?;
            Ok(TargetView {
                reference: target,
                unit: Some(unit),
                hex,
            })
        }
        TargetRef::Building(coord) => {
            let hex = board.hex(coord).ok_or(AttackError::HexOffBoard(coord))?;
            if hex.building.is_none() {
                return Err(AttackError::NoBuilding(coord));
            }
            Ok(TargetView {
                reference: target,
                unit: None,
                hex,
            })
        }
        TargetRef::FuelTank(coord) => {
            let hex = board.hex(coord).ok_or(AttackError::HexOffBoard(coord))?;
            if !hex.fuel_tank {
                return Err(AttackError::NoFuelTank(coord));
            }
            Ok(TargetView {
                reference: target,
                unit: None,
                hex,
            })
        }
        TargetRef::Hex(coord) => {
            let hex = board.hex(coord).ok_or(AttackError::HexOffBoard(coord))?;
            Ok(TargetView {
                reference: target,
                unit: None,
                hex,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::declaration::WeaponFire;
    use crate::env::BattlefieldSnapshot;
    use crate::state::{BuildingInfo, UnitKind};

    fn snapshot() -> BattlefieldSnapshot {
        BattlefieldSnapshot::open_field(10, 10)
            .with_unit(UnitState::new(
                EntityId(1),
                UnitKind::BipedMech,
                HexCoord::new(2, 2),
            ))
            .with_unit(
                UnitState::new(EntityId(2), UnitKind::Vehicle, HexCoord::new(2, 5))
                    .on_team(TeamId(1)),
            )
    }

    #[test]
    fn missing_attacker_is_a_contract_violation() {
        let snapshot = snapshot();
        let declaration = AttackDeclaration::new(
            EntityId(9),
            TargetRef::Unit(EntityId(2)),
            AttackKind::Push,
        );
        let error = AttackContext::build(&declaration, &snapshot.env())
            .err()
            .expect("attacker missing");
        assert_eq!(error, AttackError::AttackerNotFound(EntityId(9)));
    }

    #[test]
    fn weapon_index_is_validated() {
        let snapshot = snapshot();
        let declaration =
            AttackDeclaration::weapon(EntityId(1), TargetRef::Unit(EntityId(2)), WeaponFire::new(3));
        let error = AttackContext::build(&declaration, &snapshot.env())
            .err()
            .expect("no weapons mounted");
        assert!(matches!(error, AttackError::WeaponIndex { index: 3, count: 0, .. }));
    }

    #[test]
    fn building_target_requires_a_building() {
        let snapshot = snapshot();
        let declaration = AttackDeclaration::new(
            EntityId(1),
            TargetRef::Building(HexCoord::new(3, 3)),
            AttackKind::Charge,
        );
        let error = AttackContext::build(&declaration, &snapshot.env())
            .err()
            .expect("no building");
        assert_eq!(error, AttackError::NoBuilding(HexCoord::new(3, 3)));
    }

    #[test]
    fn distance_and_elevation_are_resolved() {
        let snapshot = snapshot().with_hex(
            HexState::clear(HexCoord::new(2, 3)).with_building(BuildingInfo {
                id: 1,
                class: 2,
                height: 2,
            }),
        );
        let declaration = AttackDeclaration::new(
            EntityId(1),
            TargetRef::Building(HexCoord::new(2, 3)),
            AttackKind::Charge,
        );
        let ctx = AttackContext::build(&declaration, &snapshot.env()).expect("valid");
        assert_eq!(ctx.distance, 1);
        assert_eq!(ctx.elevation_delta(), 0);
        assert_eq!(ctx.target.top(), 2);
        assert!(ctx.target.is_structure());
    }

    #[test]
    fn missing_oracle_surfaces_as_error() {
        let declaration = AttackDeclaration::new(
            EntityId(1),
            TargetRef::Unit(EntityId(2)),
            AttackKind::Push,
        );
        let error = AttackContext::build(&declaration, &BattleEnv::empty())
            .err()
            .expect("empty env");
        assert!(matches!(error, AttackError::Oracle(_)));
    }
}
