//! Grappling between two mechs.
//!
//! A mech already held by the target may always grapple back: the counter
//! grapple guard passes the chain before posture, range and arc are checked.

use super::{
    AttackVariant, arm_not_fired, arm_usable, attacker_jumped, attacker_prone, both_arms,
    common_guards, within_arc, within_elevation, within_range,
};
use crate::attack::classify::geometric_side;
use crate::attack::clauses::{
    attacker_movement, attacker_terrain, limb_damage, melee_specialist, physical_base,
    target_movement, target_terrain, target_type, weight_class_difference,
};
use crate::attack::context::AttackContext;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::config::GameOption;
use crate::state::{Actuators, Arc, Location, UnitKind};

const HAND_PENALTY: [(Actuators, i32, &str); 1] =
    [(Actuators::HAND, 1, "hand actuator destroyed")];

#[derive(Clone, Copy, Debug, Default)]
pub struct GrappleAttack;

impl AttackVariant for GrappleAttack {
    fn guards(&self) -> GuardChain<'_> {
        common_guards()
            .guard("grappling_option", |ctx| {
                Verdict::veto_if(
                    !ctx.flag(GameOption::TacOpsGrappling),
                    "Grappling attacks are not enabled",
                )
            })
            .guard("biped_only", |ctx| {
                Verdict::veto_if(
                    ctx.attacker.kind != UnitKind::BipedMech,
                    "Only biped mechs can grapple",
                )
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
            .guard("counter_grapple", |ctx| {
                let held_by_target = ctx
                    .target_unit()
                    .and_then(|unit| unit.grapple)
                    .is_some_and(|link| link.partner == ctx.attacker.id && link.initiator);
                if held_by_target {
                    Verdict::Pass
                } else {
                    Verdict::Continue
                }
            })
            .guard("attacker_jumped", attacker_jumped)
            .guard("attacker_prone", attacker_prone)
            .guard("already_grappling", |ctx| {
                Verdict::veto_if(
                    ctx.attacker.grapple.is_some(),
                    "Attacker is already grappling",
                )
            })
            .guard("target_grappled", |ctx| {
                Verdict::veto_if(
                    ctx.target_unit().is_some_and(|unit| unit.grapple.is_some()),
                    "Target is already grappled",
                )
            })
            .guard("range", |ctx| within_range(ctx, 1..=1))
            .guard("elevation", |ctx| within_elevation(ctx, -1..=1))
            .guard("arc", |ctx| {
                within_arc(ctx, Arc::Forward, ctx.attacker.torso_facing())
            })
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        attacker_movement(ctx, ledger);
        target_movement(ctx, ledger);
        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        for arm in [Location::LeftArm, Location::RightArm] {
            limb_damage(ctx.attacker, arm, &HAND_PENALTY, ledger);
        }
        melee_specialist(ctx, ledger);
        target_type(ctx, ledger);
        weight_class_difference(ctx, ledger);
    }

    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        Classification::new(HitTable::Normal, geometric_side(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::declaration::{AttackDeclaration, AttackKind, TargetRef};
    use crate::attack::fixtures::{ATTACKER, TARGET, delta_of, enemy, eval, field, mech, reasons};
    use crate::config::OptionValue;
    use crate::env::BattlefieldSnapshot;
    use crate::state::{EntityId, GrappleLink, LocationState, UnitStatus};

    fn grapple() -> AttackDeclaration {
        AttackDeclaration::new(ATTACKER, TargetRef::Unit(TARGET), AttackKind::Grapple)
    }

    fn grappling_allowed() -> BattlefieldSnapshot {
        field().with_option(GameOption::TacOpsGrappling, OptionValue::Bool(true))
    }

    #[test]
    fn disabled_without_the_option() {
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7));
        assert_eq!(
            eval(&snapshot, grapple()).reason(),
            Some("Grappling attacks are not enabled")
        );
    }

    #[test]
    fn hands_and_weight_classes_are_charged() {
        let left = LocationState::intact(UnitKind::BipedMech, Location::LeftArm)
            .without(Actuators::HAND);
        let snapshot = grappling_allowed()
            .with_unit(mech(ATTACKER, 4, 8).with_location(left))
            .with_unit(enemy(TARGET, 4, 7).with_tonnage(85));
        let record = eval(&snapshot, grapple());
        assert_eq!(
            reasons(&record),
            ["left hand actuator destroyed", "weight class difference"]
        );
        assert_eq!(delta_of(&record, "weight class difference"), Some(2));
        assert_eq!(record.target_number(), Some(8));
    }

    #[test]
    fn counter_grapple_skips_posture_and_range_checks() {
        let held = mech(ATTACKER, 4, 8)
            .with_status(UnitStatus::PRONE)
            .grappling(GrappleLink {
                partner: TARGET,
                initiator: false,
            });
        let holder = enemy(TARGET, 4, 5).grappling(GrappleLink {
            partner: ATTACKER,
            initiator: true,
        });
        let snapshot = grappling_allowed().with_unit(held).with_unit(holder);
        let record = eval(&snapshot, grapple());
        assert!(!record.is_terminal());
    }

    #[test]
    fn without_the_exception_a_prone_attacker_is_refused() {
        let snapshot = grappling_allowed()
            .with_unit(mech(ATTACKER, 4, 8).with_status(UnitStatus::PRONE))
            .with_unit(enemy(TARGET, 4, 5));
        assert_eq!(eval(&snapshot, grapple()).reason(), Some("Attacker is prone"));
    }

    #[test]
    fn one_grapple_at_a_time() {
        let bystander = EntityId(3);
        let snapshot = grappling_allowed()
            .with_unit(mech(ATTACKER, 4, 8).grappling(GrappleLink {
                partner: bystander,
                initiator: true,
            }))
            .with_unit(enemy(TARGET, 4, 7));
        assert_eq!(
            eval(&snapshot, grapple()).reason(),
            Some("Attacker is already grappling")
        );

        let snapshot = grappling_allowed()
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7).grappling(GrappleLink {
                partner: bystander,
                initiator: false,
            }));
        assert_eq!(
            eval(&snapshot, grapple()).reason(),
            Some("Target is already grappled")
        );
    }
}
