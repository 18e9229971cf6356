//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::HexCoord;

/// Errors that occur when the environment lacks data the engine needs.
///
/// These are fatal: an attack cannot be evaluated without the board, the
/// units, or the rule options.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("BoardOracle not available")]
    BoardNotAvailable,

    #[error("UnitOracle not available")]
    UnitsNotAvailable,

    #[error("LosOracle not available")]
    LosNotAvailable,

    #[error("OptionsOracle not available")]
    OptionsNotAvailable,

    #[error("EwOracle not available")]
    EwNotAvailable,

    /// Hex is outside the board.
    #[error("hex {0} is off the board")]
    HexOffBoard(HexCoord),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::HexOffBoard(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::BoardNotAvailable => "ORACLE_BOARD_NOT_AVAILABLE",
            OracleError::UnitsNotAvailable => "ORACLE_UNITS_NOT_AVAILABLE",
            OracleError::LosNotAvailable => "ORACLE_LOS_NOT_AVAILABLE",
            OracleError::OptionsNotAvailable => "ORACLE_OPTIONS_NOT_AVAILABLE",
            OracleError::EwNotAvailable => "ORACLE_EW_NOT_AVAILABLE",
            OracleError::HexOffBoard(_) => "ORACLE_HEX_OFF_BOARD",
        }
    }
}
