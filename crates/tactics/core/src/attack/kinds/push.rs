use super::{
    AttackVariant, arm_not_fired, arm_usable, attacker_jumped, attacker_prone, both_arms,
    common_guards, within_arc, within_elevation, within_range,
};
use crate::attack::classify::geometric_side;
use crate::attack::clauses::{
    attacker_movement, attacker_terrain, melee_specialist, physical_base, target_movement,
    target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::state::Arc;

/// Shoves an adjacent mech one hex back with both arms.
#[derive(Clone, Copy, Debug, Default)]
pub struct PushAttack;

impl AttackVariant for PushAttack {
    fn guards(&self) -> GuardChain<'_> {
        common_guards()
            .guard("mech_only", |ctx| {
                Verdict::veto_if(!ctx.attacker.is_mech(), "Non-mechs can't push")
            })
            // Only mechs can be the target, so structures are vetoed here and
            // never reach an adjacent-structure automatic hit.
            .guard("target_mech", |ctx| {
                Verdict::veto_if(
                    !ctx.target_unit().is_some_and(|unit| unit.is_mech()),
                    "Target must be a mech",
                )
            })
            .guard("arms_usable", |ctx| both_arms(ctx, arm_usable))
            .guard("arms_fired", |ctx| both_arms(ctx, arm_not_fired))
            .guard("attacker_jumped", attacker_jumped)
            .guard("attacker_prone", attacker_prone)
            .guard("target_prone", |ctx| {
                Verdict::veto_if(
                    ctx.target_unit().is_some_and(|unit| unit.is_prone()),
                    "Target is prone",
                )
            })
            .guard("range", |ctx| within_range(ctx, 1..=1))
            .guard("elevation", |ctx| within_elevation(ctx, 0..=0))
            .guard("arc", |ctx| {
                within_arc(ctx, Arc::Forward, ctx.attacker.torso_facing())
            })
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        ledger.add(-1, "push");
        attacker_movement(ctx, ledger);
        target_movement(ctx, ledger);
        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        melee_specialist(ctx, ledger);
        target_type(ctx, ledger);
    }

    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        Classification::new(HitTable::Normal, geometric_side(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::declaration::{AttackDeclaration, AttackKind, TargetRef};
    use crate::attack::fixtures::{ATTACKER, TARGET, enemy, eval, field, mech, reasons};
    use crate::state::{
        Actuators, HexCoord, Location, LocationState, TeamId, UnitKind, UnitState,
    };

    fn push() -> AttackDeclaration {
        AttackDeclaration::new(ATTACKER, TargetRef::Unit(TARGET), AttackKind::Push)
    }

    #[test]
    fn push_is_piloting_minus_one() {
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7));
        let record = eval(&snapshot, push());
        assert_eq!(reasons(&record), ["push"]);
        assert_eq!(record.target_number(), Some(4));
        assert_eq!(record.classification.hit_table, HitTable::Normal);
    }

    #[test]
    fn needs_both_shoulders() {
        let left = LocationState::intact(UnitKind::BipedMech, Location::LeftArm)
            .with_damaged(Actuators::SHOULDER);
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8).with_location(left))
            .with_unit(enemy(TARGET, 4, 7));
        assert_eq!(eval(&snapshot, push()).reason(), Some("Shoulder destroyed"));
    }

    #[test]
    fn only_mechs_can_be_pushed() {
        let tank = UnitState::new(TARGET, UnitKind::Vehicle, HexCoord::new(4, 7)).on_team(TeamId(1));
        let snapshot = field().with_unit(mech(ATTACKER, 4, 8)).with_unit(tank);
        assert_eq!(eval(&snapshot, push()).reason(), Some("Target must be a mech"));
    }

    #[test]
    fn prone_targets_cannot_be_pushed() {
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7).with_status(crate::state::UnitStatus::PRONE));
        assert_eq!(eval(&snapshot, push()).reason(), Some("Target is prone"));
    }

    #[test]
    fn adjacent_buildings_are_refused_rather_than_hit() {
        let building = crate::state::BuildingInfo {
            id: 4,
            class: 2,
            height: 2,
        };
        let snapshot = field()
            .with_hex(crate::state::HexState::clear(HexCoord::new(4, 7)).with_building(building))
            .with_unit(mech(ATTACKER, 4, 8));
        let declaration = AttackDeclaration::new(
            ATTACKER,
            TargetRef::Building(HexCoord::new(4, 7)),
            AttackKind::Push,
        );
        let record = eval(&snapshot, declaration);
        assert_eq!(record.reason(), Some("Target must be a mech"));
        assert!(record.modifiers.is_empty());
    }
}
