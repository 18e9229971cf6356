//! Hit-table and side-table selection.

use super::context::AttackContext;
use super::record::{Classification, Cover, HitTable, SideTable};
use crate::state::{HexCoord, UnitKind, UnitState, UnitStatus};

/// Side of `target` facing an attack coming from `from`.
pub fn side_struck(target: &UnitState, from: HexCoord) -> SideTable {
    if target.position == from {
        return SideTable::Front;
    }
    match target.position.relative_bearing(target.facing, from) {
        0..=30 | 330..=359 => SideTable::Front,
        150..=210 => SideTable::Rear,
        31..=149 => SideTable::Right,
        _ => SideTable::Left,
    }
}

/// Side from attacker geometry. Structures and hexes are always struck in front.
pub fn geometric_side(ctx: &AttackContext<'_>) -> SideTable {
    match ctx.target_unit() {
        Some(target) => side_struck(target, ctx.attacker.position),
        None => SideTable::Front,
    }
}

/// Partial cover protecting the target from this attacker, if any.
pub fn partial_cover(ctx: &AttackContext<'_>) -> Option<Cover> {
    let target = ctx.target_unit()?;
    if ctx.los.partial_cover {
        return Some(Cover::Terrain);
    }
    if target.is_mech() && !target.is_prone() && ctx.target.hex.water_depth == 1 {
        return Some(Cover::Water);
    }
    if target.is(UnitStatus::HULL_DOWN) {
        return Some(Cover::HullDown);
    }
    None
}

/// Melee classification: a table picked by the variant, prone targets use the
/// normal table, side from geometry.
pub fn melee(ctx: &AttackContext<'_>, table: HitTable) -> Classification {
    let prone = ctx.target_unit().is_some_and(UnitState::is_prone);
    let hit_table = if prone { HitTable::Normal } else { table };
    Classification::new(hit_table, geometric_side(ctx))
}

/// Vehicles struck from inside their own hex take hits on a random side.
pub fn randomize_side_at_zero_range(ctx: &AttackContext<'_>, classification: &mut Classification) {
    let vehicle = ctx
        .target_unit()
        .is_some_and(|unit| unit.kind == UnitKind::Vehicle);
    if vehicle && ctx.distance == 0 {
        classification.side_table = SideTable::Random;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, Facing};

    fn target_facing(facing: Facing) -> UnitState {
        UnitState::new(EntityId(2), UnitKind::BipedMech, HexCoord::new(4, 4)).facing(facing)
    }

    #[test]
    fn attacks_from_each_direction_strike_the_matching_side() {
        let target = target_facing(Facing::North);
        let origin = target.position;
        assert_eq!(side_struck(&target, origin.neighbor(Facing::North)), SideTable::Front);
        assert_eq!(side_struck(&target, origin.neighbor(Facing::NorthEast)), SideTable::Right);
        assert_eq!(side_struck(&target, origin.neighbor(Facing::SouthEast)), SideTable::Right);
        assert_eq!(side_struck(&target, origin.neighbor(Facing::South)), SideTable::Rear);
        assert_eq!(side_struck(&target, origin.neighbor(Facing::SouthWest)), SideTable::Left);
        assert_eq!(side_struck(&target, origin.neighbor(Facing::NorthWest)), SideTable::Left);
    }

    #[test]
    fn side_rotates_with_target_facing() {
        let target = target_facing(Facing::South);
        let from = target.position.neighbor(Facing::North);
        assert_eq!(side_struck(&target, from), SideTable::Rear);
    }

    #[test]
    fn same_hex_attacks_strike_the_front() {
        let target = target_facing(Facing::SouthWest);
        assert_eq!(side_struck(&target, target.position), SideTable::Front);
    }
}
