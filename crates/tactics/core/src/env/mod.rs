//! Traits describing the read-only battlefield.
//!
//! Oracles expose board terrain, units, line of sight, rule options and
//! electronic warfare coverage. The [`Env`] aggregate bundles them so the
//! attack engine can read everything it needs without coupling to concrete
//! implementations.
mod board;
mod error;
mod ew;
mod los;
mod options;
mod snapshot;
mod units;

pub use board::{BoardDimensions, BoardOracle};
pub use error::OracleError;
pub use ew::{EcmField, EwOracle};
pub use los::{BLOCKING_OBSTRUCTION, LosEffects, LosEndpoint, LosOracle, trace_line};
pub use options::OptionsOracle;
pub use snapshot::{BattlefieldSnapshot, BoardSnapshot, LosOverride};
pub use units::UnitOracle;

/// Aggregates read-only oracles required by the attack engine.
pub struct Env<'a, B, U, L, O, E>
where
    B: BoardOracle + ?Sized,
    U: UnitOracle + ?Sized,
    L: LosOracle + ?Sized,
    O: OptionsOracle + ?Sized,
    E: EwOracle + ?Sized,
{
    board: Option<&'a B>,
    units: Option<&'a U>,
    los: Option<&'a L>,
    options: Option<&'a O>,
    ew: Option<&'a E>,
}

pub type BattleEnv<'a> = Env<
    'a,
    dyn BoardOracle + 'a,
    dyn UnitOracle + 'a,
    dyn LosOracle + 'a,
    dyn OptionsOracle + 'a,
    dyn EwOracle + 'a,
>;

impl<B, U, L, O, E> Clone for Env<'_, B, U, L, O, E>
where
    B: BoardOracle + ?Sized,
    U: UnitOracle + ?Sized,
    L: LosOracle + ?Sized,
    O: OptionsOracle + ?Sized,
    E: EwOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, U, L, O, E> Copy for Env<'_, B, U, L, O, E>
where
    B: BoardOracle + ?Sized,
    U: UnitOracle + ?Sized,
    L: LosOracle + ?Sized,
    O: OptionsOracle + ?Sized,
    E: EwOracle + ?Sized,
{
}

impl<'a, B, U, L, O, E> Env<'a, B, U, L, O, E>
where
    B: BoardOracle + ?Sized,
    U: UnitOracle + ?Sized,
    L: LosOracle + ?Sized,
    O: OptionsOracle + ?Sized,
    E: EwOracle + ?Sized,
{
    pub fn new(
        board: Option<&'a B>,
        units: Option<&'a U>,
        los: Option<&'a L>,
        options: Option<&'a O>,
        ew: Option<&'a E>,
    ) -> Self {
        Self {
            board,
            units,
            los,
            options,
            ew,
        }
    }

    pub fn with_all(board: &'a B, units: &'a U, los: &'a L, options: &'a O, ew: &'a E) -> Self {
        Self::new(Some(board), Some(units), Some(los), Some(options), Some(ew))
    }

    pub fn empty() -> Self {
        Self {
            board: None,
            units: None,
            los: None,
            options: None,
            ew: None,
        }
    }

    /// Returns the BoardOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::BoardNotAvailable` if no board oracle was provided.
    pub fn board(&self) -> Result<&'a B, OracleError> {
        self.board.ok_or(OracleError::BoardNotAvailable)
    }

    /// Returns the UnitOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnitsNotAvailable` if no unit oracle was provided.
    pub fn units(&self) -> Result<&'a U, OracleError> {
        self.units.ok_or(OracleError::UnitsNotAvailable)
    }

    /// Returns the LosOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LosNotAvailable` if no line-of-sight oracle was provided.
    pub fn los(&self) -> Result<&'a L, OracleError> {
        self.los.ok_or(OracleError::LosNotAvailable)
    }

    /// Returns the OptionsOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::OptionsNotAvailable` if no options oracle was provided.
    pub fn options(&self) -> Result<&'a O, OracleError> {
        self.options.ok_or(OracleError::OptionsNotAvailable)
    }

    /// Returns the EwOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EwNotAvailable` if no electronic warfare oracle was provided.
    pub fn ew(&self) -> Result<&'a E, OracleError> {
        self.ew.ok_or(OracleError::EwNotAvailable)
    }
}

impl<'a, B, U, L, O, E> Env<'a, B, U, L, O, E>
where
    B: BoardOracle + 'a,
    U: UnitOracle + 'a,
    L: LosOracle + 'a,
    O: OptionsOracle + 'a,
    E: EwOracle + 'a,
{
    /// Erases concrete oracle types.
    pub fn into_battle_env(self) -> BattleEnv<'a> {
        Env::new(
            self.board.map(|board| board as &'a dyn BoardOracle),
            self.units.map(|units| units as &'a dyn UnitOracle),
            self.los.map(|los| los as &'a dyn LosOracle),
            self.options.map(|options| options as &'a dyn OptionsOracle),
            self.ew.map(|ew| ew as &'a dyn EwOracle),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_env_reports_missing_oracles() {
        let env = BattleEnv::empty();
        assert!(matches!(env.board(), Err(OracleError::BoardNotAvailable)));
        assert!(matches!(env.units(), Err(OracleError::UnitsNotAvailable)));
        assert!(matches!(env.los(), Err(OracleError::LosNotAvailable)));
        assert!(matches!(env.options(), Err(OracleError::OptionsNotAvailable)));
        assert!(matches!(env.ew(), Err(OracleError::EwNotAvailable)));
    }
}
