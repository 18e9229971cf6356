//! Immutable battlefield snapshots and their oracle adapters.
//!
//! A [`BattlefieldSnapshot`] captures everything an evaluation reads: board,
//! units, rule options, ECM coverage and optional line-of-sight overrides. It
//! implements every oracle, so one snapshot is enough to build a full
//! [`BattleEnv`](super::BattleEnv). Snapshots are plain data and can be shared
//! across threads for concurrent previews.

use super::{
    BattleEnv, BoardDimensions, BoardOracle, EcmField, EwOracle, LosEffects, LosEndpoint,
    LosOracle, OptionsOracle, UnitOracle, trace_line,
};
use crate::config::{GameOption, OptionValue, RuleOptions};
use crate::state::{EntityId, HexCoord, HexState, TeamId, UnitState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Board
// ============================================================================

/// Board terrain. Only hexes that differ from clear level-0 ground are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "BoardParts"))]
pub struct BoardSnapshot {
    dimensions: BoardDimensions,
    /// Sorted by coordinate, one entry per hex.
    features: Vec<HexState>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BoardParts {
    dimensions: BoardDimensions,
    features: Vec<HexState>,
}

#[cfg(feature = "serde")]
impl From<BoardParts> for BoardSnapshot {
    fn from(parts: BoardParts) -> Self {
        Self::new(parts.dimensions, parts.features)
    }
}

impl BoardSnapshot {
    /// Builds a board from sparse features. Later entries for the same hex win.
    pub fn new(dimensions: BoardDimensions, features: Vec<HexState>) -> Self {
        let mut features: Vec<HexState> = features.into_iter().rev().collect();
        features.sort_by_key(|hex| hex.coord);
        features.dedup_by_key(|hex| hex.coord);
        Self {
            dimensions,
            features,
        }
    }

    pub fn features(&self) -> &[HexState] {
        &self.features
    }

    /// Captures a board from any oracle, keeping only non-clear hexes.
    pub fn from_oracle(oracle: &dyn BoardOracle) -> Self {
        let dimensions = oracle.dimensions();
        let mut features = Vec::new();

        for row in 0..dimensions.height as i32 {
            for col in 0..dimensions.width as i32 {
                let coord = HexCoord::new(col, row);
                if let Some(hex) = oracle.hex(coord) {
                    if hex != HexState::clear(coord) {
                        features.push(hex);
                    }
                }
            }
        }

        Self::new(dimensions, features)
    }
}

impl BoardOracle for BoardSnapshot {
    fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    fn hex(&self, coord: HexCoord) -> Option<HexState> {
        if !self.dimensions.contains(coord) {
            return None;
        }
        let found = self
            .features
            .binary_search_by_key(&coord, |hex| hex.coord)
            .ok()
            .map(|index| self.features[index]);
        Some(found.unwrap_or_else(|| HexState::clear(coord)))
    }
}

// ============================================================================
// Line of sight overrides
// ============================================================================

/// Explicit line-of-sight result between two hexes, used in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LosOverride {
    pub from: HexCoord,
    pub to: HexCoord,
    pub effects: LosEffects,
}

// ============================================================================
// Battlefield
// ============================================================================

/// Complete read-only battlefield state for one evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattlefieldSnapshot {
    pub board: BoardSnapshot,
    pub units: Vec<UnitState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: RuleOptions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ecm: Vec<EcmField>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub los_overrides: Vec<LosOverride>,
}

impl BattlefieldSnapshot {
    pub fn new(board: BoardSnapshot, units: Vec<UnitState>, options: RuleOptions) -> Self {
        Self {
            board,
            units,
            options,
            ecm: Vec::new(),
            los_overrides: Vec::new(),
        }
    }

    /// Open level-0 board of the given size with no units.
    pub fn open_field(width: u32, height: u32) -> Self {
        Self::new(
            BoardSnapshot::new(BoardDimensions::new(width, height), Vec::new()),
            Vec::new(),
            RuleOptions::default(),
        )
    }

    #[must_use]
    pub fn with_unit(mut self, unit: UnitState) -> Self {
        self.units.retain(|existing| existing.id != unit.id);
        self.units.push(unit);
        self
    }

    #[must_use]
    pub fn with_hex(self, hex: HexState) -> Self {
        let mut features = self.board.features.clone();
        features.push(hex);
        Self {
            board: BoardSnapshot::new(self.board.dimensions, features),
            ..self
        }
    }

    #[must_use]
    pub fn with_option(mut self, option: GameOption, value: OptionValue) -> Self {
        self.options.set(option, value);
        self
    }

    #[must_use]
    pub fn with_ecm(mut self, field: EcmField) -> Self {
        self.ecm.push(field);
        self
    }

    #[must_use]
    pub fn with_los_override(mut self, from: HexCoord, to: HexCoord, effects: LosEffects) -> Self {
        self.los_overrides.push(LosOverride { from, to, effects });
        self
    }

    pub fn unit_mut(&mut self, id: EntityId) -> Option<&mut UnitState> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// Environment backed entirely by this snapshot.
    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::with_all(self, self, self, self, self)
    }
}

impl BoardOracle for BattlefieldSnapshot {
    fn dimensions(&self) -> BoardDimensions {
        self.board.dimensions()
    }

    fn hex(&self, coord: HexCoord) -> Option<HexState> {
        self.board.hex(coord)
    }
}

impl UnitOracle for BattlefieldSnapshot {
    fn unit(&self, id: EntityId) -> Option<&UnitState> {
        self.units.iter().find(|unit| unit.id == id)
    }

    fn unit_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.units.iter().map(|unit| unit.id).collect();
        ids.sort();
        ids
    }
}

impl LosOracle for BattlefieldSnapshot {
    fn line_of_sight(&self, from: LosEndpoint, to: LosEndpoint) -> LosEffects {
        let explicit = self.los_overrides.iter().find(|entry| {
            (entry.from == from.coord && entry.to == to.coord)
                || (entry.from == to.coord && entry.to == from.coord)
        });
        match explicit {
            Some(entry) => entry.effects,
            None => trace_line(&self.board, from, to),
        }
    }
}

impl OptionsOracle for BattlefieldSnapshot {
    fn option(&self, option: GameOption) -> OptionValue {
        self.options.get(option)
    }
}

impl EwOracle for BattlefieldSnapshot {
    fn ecm_protected(&self, coord: HexCoord, team: TeamId) -> bool {
        self.ecm.ecm_protected(coord, team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{UnitKind, Woods};

    #[test]
    fn missing_hexes_are_clear_ground() {
        let board = BoardSnapshot::new(BoardDimensions::new(4, 4), Vec::new());
        assert_eq!(
            board.hex(HexCoord::new(1, 1)),
            Some(HexState::clear(HexCoord::new(1, 1)))
        );
        assert_eq!(board.hex(HexCoord::new(4, 0)), None);
    }

    #[test]
    fn later_features_replace_earlier_ones() {
        let coord = HexCoord::new(2, 2);
        let board = BoardSnapshot::new(
            BoardDimensions::new(4, 4),
            vec![
                HexState::clear(coord).with_woods(Woods::Light),
                HexState::clear(coord).with_woods(Woods::Heavy),
            ],
        );
        assert_eq!(board.features().len(), 1);
        assert_eq!(board.hex(coord).and_then(|hex| hex.woods), Some(Woods::Heavy));
    }

    #[test]
    fn override_applies_in_both_directions() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(0, 3);
        let snapshot =
            BattlefieldSnapshot::open_field(8, 8).with_los_override(a, b, LosEffects::blocked());

        let forward = snapshot.line_of_sight(LosEndpoint::ground(a, 0), LosEndpoint::ground(b, 0));
        let backward = snapshot.line_of_sight(LosEndpoint::ground(b, 0), LosEndpoint::ground(a, 0));
        assert!(forward.blocked);
        assert!(backward.blocked);
    }

    #[test]
    fn env_exposes_every_oracle() {
        let snapshot = BattlefieldSnapshot::open_field(8, 8).with_unit(UnitState::new(
            EntityId(3),
            UnitKind::BipedMech,
            HexCoord::new(1, 1),
        ));
        let env = snapshot.env();

        assert!(env.board().is_ok());
        assert!(env.los().is_ok());
        assert!(env.options().is_ok());
        assert!(env.ew().is_ok());
        let units = env.units().expect("units oracle");
        assert_eq!(units.unit_ids(), vec![EntityId(3)]);
    }

    #[test]
    fn ecm_protects_only_the_fielding_team() {
        let snapshot = BattlefieldSnapshot::open_field(8, 8).with_ecm(EcmField::new(
            HexCoord::new(4, 4),
            2,
            TeamId(1),
        ));
        assert!(snapshot.ecm_protected(HexCoord::new(4, 5), TeamId(1)));
        assert!(!snapshot.ecm_protected(HexCoord::new(4, 5), TeamId(2)));
        assert!(!snapshot.ecm_protected(HexCoord::new(4, 7), TeamId(1)));
    }
}
