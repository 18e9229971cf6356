//! Declaration errors.
//!
//! These are caller contract violations. Illegal but well-formed attacks are
//! reported through [`super::TerminalStatus`] instead.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, HexCoord};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("attacker {0} not found")]
    AttackerNotFound(EntityId),

    #[error("target unit {0} not found")]
    TargetNotFound(EntityId),

    #[error("spotter {0} not found")]
    SpotterNotFound(EntityId),

    #[error("target hex {0} is off the board")]
    HexOffBoard(HexCoord),

    #[error("unit {unit} stands off the board at {position}")]
    UnitOffBoard { unit: EntityId, position: HexCoord },

    #[error("no building at {0}")]
    NoBuilding(HexCoord),

    #[error("no fuel tank at {0}")]
    NoFuelTank(HexCoord),

    #[error("{attacker} has no weapon #{index} ({count} mounted)")]
    WeaponIndex {
        attacker: EntityId,
        index: usize,
        count: usize,
    },

    #[error("{attacker} has no club #{index} ({count} mounted)")]
    ClubIndex {
        attacker: EntityId,
        index: usize,
        count: usize,
    },

    #[error("{0} attacks require a unit target")]
    UnitTargetRequired(&'static str),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AttackError::Oracle(error) => error.severity(),
            AttackError::UnitOffBoard { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::Oracle(error) => error.error_code(),
            AttackError::AttackerNotFound(_) => "ATTACK_ATTACKER_NOT_FOUND",
            AttackError::TargetNotFound(_) => "ATTACK_TARGET_NOT_FOUND",
            AttackError::SpotterNotFound(_) => "ATTACK_SPOTTER_NOT_FOUND",
            AttackError::HexOffBoard(_) => "ATTACK_HEX_OFF_BOARD",
            AttackError::UnitOffBoard { .. } => "ATTACK_UNIT_OFF_BOARD",
            AttackError::NoBuilding(_) => "ATTACK_NO_BUILDING",
            AttackError::NoFuelTank(_) => "ATTACK_NO_FUEL_TANK",
            AttackError::WeaponIndex { .. } => "ATTACK_WEAPON_INDEX",
            AttackError::ClubIndex { .. } => "ATTACK_CLUB_INDEX",
            AttackError::UnitTargetRequired(_) => "ATTACK_UNIT_TARGET_REQUIRED",
        }
    }
}
