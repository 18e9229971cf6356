//! Line of sight between two hexes.
//!
//! The engine consumes line of sight as a summary of what lies between the
//! attacker and the target. [`trace_line`] provides a straight-line walk over
//! any [`BoardOracle`] that hosts can use when they have no better model.

use super::BoardOracle;
use crate::state::{HexCoord, Smoke, Woods};

/// Points of woods and smoke along a line at which sight is blocked.
pub const BLOCKING_OBSTRUCTION: i32 = 3;

/// One end of a line of sight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LosEndpoint {
    pub coord: HexCoord,
    /// Absolute level of the bottom of the unit (hex level plus unit elevation).
    pub base: i32,
    /// Absolute level of the top of the unit.
    pub top: i32,
}

impl LosEndpoint {
    pub const fn new(coord: HexCoord, base: i32, top: i32) -> Self {
        Self { coord, base, top }
    }

    /// Endpoint for a flat target such as an empty hex.
    pub const fn ground(coord: HexCoord, level: i32) -> Self {
        Self::new(coord, level, level)
    }
}

/// Summary of terrain between two endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosEffects {
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub light_woods: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heavy_woods: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultra_woods: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub light_smoke: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heavy_smoke: u8,
    /// Terrain next to the target hides its lower half.
    #[cfg_attr(feature = "serde", serde(default))]
    pub partial_cover: bool,
    /// Both ends stand inside the same building.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interior_building: Option<u32>,
}

impl LosEffects {
    pub const fn clear() -> Self {
        Self {
            blocked: false,
            light_woods: 0,
            heavy_woods: 0,
            ultra_woods: 0,
            light_smoke: 0,
            heavy_smoke: 0,
            partial_cover: false,
            interior_building: None,
        }
    }

    pub const fn blocked() -> Self {
        let mut effects = Self::clear();
        effects.blocked = true;
        effects
    }

    pub fn obstruction(&self) -> i32 {
        i32::from(self.light_woods)
            + 2 * i32::from(self.heavy_woods)
            + 3 * i32::from(self.ultra_woods)
            + i32::from(self.light_smoke)
            + 2 * i32::from(self.heavy_smoke)
    }
}

pub trait LosOracle: Send + Sync {
    fn line_of_sight(&self, from: LosEndpoint, to: LosEndpoint) -> LosEffects;
}

/// Straight-line walk over the hexes strictly between both endpoints.
///
/// Woods and smoke accumulate points; once they reach
/// [`BLOCKING_OBSTRUCTION`] the line is blocked. Terrain or buildings rising
/// above both endpoints block as well. A hex adjacent to the target that
/// stands exactly one level above the target's base hides the lower half of a
/// two-level target. Counters saturate on very long lines.
pub fn trace_line<B>(board: &B, from: LosEndpoint, to: LosEndpoint) -> LosEffects
where
    B: BoardOracle + ?Sized,
{
    let mut effects = LosEffects::clear();

    let building_at = |coord| board.hex(coord).and_then(|hex| hex.building);
    if let (Some(left), Some(right)) = (building_at(from.coord), building_at(to.coord)) {
        if left.id == right.id {
            effects.interior_building = Some(left.id);
        }
    }

    let line = from.coord.line_to(to.coord);
    let intervening = line
        .iter()
        .skip(1)
        .take(line.len().saturating_sub(2))
        .copied();

    for coord in intervening {
        let Some(hex) = board.hex(coord) else {
            continue;
        };

        if hex.ceiling() > from.top && hex.ceiling() > to.top {
            effects.blocked = true;
        }

        let counter = match hex.woods {
            Some(Woods::Light) => Some(&mut effects.light_woods),
            Some(Woods::Heavy) => Some(&mut effects.heavy_woods),
            Some(Woods::Ultra) => Some(&mut effects.ultra_woods),
            None => None,
        };
        if let Some(count) = counter {
            *count = count.saturating_add(1);
        }
        let counter = match hex.smoke {
            Some(Smoke::Light) => Some(&mut effects.light_smoke),
            Some(Smoke::Heavy) => Some(&mut effects.heavy_smoke),
            None => None,
        };
        if let Some(count) = counter {
            *count = count.saturating_add(1);
        }

        if coord.distance(to.coord) == 1
            && to.top - to.base == 1
            && hex.ceiling() == to.base + 1
        {
            effects.partial_cover = true;
        }
    }

    if effects.obstruction() >= BLOCKING_OBSTRUCTION {
        effects.blocked = true;
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BoardDimensions, BoardSnapshot};
    use crate::state::{HexState, Woods};

    fn board(features: Vec<HexState>) -> BoardSnapshot {
        BoardSnapshot::new(BoardDimensions::new(16, 17), features)
    }

    fn mech_at(coord: HexCoord) -> LosEndpoint {
        LosEndpoint::new(coord, 0, 1)
    }

    #[test]
    fn open_ground_is_clear() {
        let board = board(Vec::new());
        let effects = trace_line(&board, mech_at(HexCoord::new(2, 2)), mech_at(HexCoord::new(2, 8)));
        assert_eq!(effects, LosEffects::clear());
    }

    #[test]
    fn woods_accumulate_until_blocked() {
        let board = board(vec![
            HexState::clear(HexCoord::new(2, 4)).with_woods(Woods::Light),
            HexState::clear(HexCoord::new(2, 5)).with_woods(Woods::Heavy),
        ]);
        let effects = trace_line(&board, mech_at(HexCoord::new(2, 2)), mech_at(HexCoord::new(2, 8)));
        assert_eq!(effects.light_woods, 1);
        assert_eq!(effects.heavy_woods, 1);
        assert!(effects.blocked);
    }

    #[test]
    fn hill_taller_than_both_ends_blocks() {
        let board = board(vec![HexState::clear(HexCoord::new(2, 5)).at_level(3)]);
        let effects = trace_line(&board, mech_at(HexCoord::new(2, 2)), mech_at(HexCoord::new(2, 8)));
        assert!(effects.blocked);
    }

    #[test]
    fn rise_next_to_target_grants_partial_cover() {
        let board = board(vec![HexState::clear(HexCoord::new(2, 7)).at_level(1)]);
        let effects = trace_line(&board, mech_at(HexCoord::new(2, 2)), mech_at(HexCoord::new(2, 8)));
        assert!(effects.partial_cover);
        assert!(!effects.blocked);
    }

    #[test]
    fn long_wooded_lines_saturate() {
        let features = (1..=598)
            .map(|row| HexState::clear(HexCoord::new(0, row)).with_woods(Woods::Light))
            .collect();
        let board = BoardSnapshot::new(BoardDimensions::new(2, 600), features);
        let effects = trace_line(&board, mech_at(HexCoord::new(0, 599)), mech_at(HexCoord::new(0, 0)));
        assert_eq!(effects.light_woods, u8::MAX);
        assert!(effects.blocked);
    }

    #[test]
    fn rise_does_not_cover_vehicles() {
        let board = board(vec![HexState::clear(HexCoord::new(2, 7)).at_level(1)]);
        let effects = trace_line(
            &board,
            mech_at(HexCoord::new(2, 2)),
            LosEndpoint::ground(HexCoord::new(2, 8), 0),
        );
        assert!(!effects.partial_cover);
    }
}
