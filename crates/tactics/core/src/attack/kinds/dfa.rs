//! Death from above: landing a jump on top of the target.

use super::{AttackVariant, adjacent_structure, common_guards, within_elevation, within_range};
use crate::attack::classify::{melee, randomize_side_at_zero_range};
use crate::attack::clauses::{
    physical_base, piloting_differential, target_movement, target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger, SideTable};

#[derive(Clone, Copy, Debug, Default)]
pub struct DeathFromAboveAttack;

impl AttackVariant for DeathFromAboveAttack {
    fn guards(&self) -> GuardChain<'_> {
        common_guards()
            .guard("mech_only", |ctx| {
                Verdict::veto_if(
                    !ctx.attacker.is_mech(),
                    "Non-mechs can't make death from above attacks",
                )
            })
            .guard("attacker_jumped", |ctx| {
                Verdict::veto_if(
                    !ctx.attacker.movement.jumped(),
                    "Attacker must jump to make a death from above attack",
                )
            })
            .guard("range", |ctx| within_range(ctx, 0..=1))
            .guard("elevation", |ctx| within_elevation(ctx, i32::MIN..=1))
            .guard("adjacent_structure", adjacent_structure)
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        target_movement(ctx, ledger);
        target_terrain(ctx, ledger);
        target_type(ctx, ledger);
        piloting_differential(ctx, ledger);
    }

    /// A prone target is landed on from behind.
    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        let mut classification = melee(ctx, HitTable::Punch);
        if ctx.target_unit().is_some_and(|unit| unit.is_prone()) {
            classification.side_table = SideTable::Rear;
        }
        randomize_side_at_zero_range(ctx, &mut classification);
        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::declaration::{AttackDeclaration, AttackKind, TargetRef};
    use crate::attack::fixtures::{ATTACKER, TARGET, enemy, eval, field, mech, reasons};
    use crate::state::{HexCoord, HexState, MovementMode, MovementReport};

    fn dfa() -> AttackDeclaration {
        AttackDeclaration::new(ATTACKER, TargetRef::Unit(TARGET), AttackKind::DeathFromAbove)
    }

    fn jumper() -> crate::state::UnitState {
        mech(ATTACKER, 4, 8).with_movement(MovementReport::new(MovementMode::Jumped, 4))
    }

    #[test]
    fn requires_a_jump() {
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7));
        assert_eq!(
            eval(&snapshot, dfa()).reason(),
            Some("Attacker must jump to make a death from above attack")
        );
    }

    #[test]
    fn standing_target_takes_punch_table_hits() {
        let snapshot = field().with_unit(jumper()).with_unit(enemy(TARGET, 4, 7));
        let record = eval(&snapshot, dfa());
        assert!(reasons(&record).is_empty());
        assert_eq!(record.target_number(), Some(5));
        assert_eq!(record.classification.hit_table, HitTable::Punch);
    }

    #[test]
    fn cannot_reach_targets_two_levels_up() {
        let snapshot = field()
            .with_hex(HexState::clear(HexCoord::new(4, 7)).at_level(2))
            .with_unit(jumper())
            .with_unit(enemy(TARGET, 4, 7));
        assert_eq!(
            eval(&snapshot, dfa()).reason(),
            Some("Target elevation not in range")
        );
    }
}
