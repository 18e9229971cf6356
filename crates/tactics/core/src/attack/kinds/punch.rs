use super::{
    AttackVariant, adjacent_structure, arm_not_fired, arm_usable, attacker_jumped, attacker_prone,
    common_guards, within_arc, within_range,
};
use crate::attack::classify::melee;
use crate::attack::clauses::{
    attacker_movement, attacker_terrain, limb_damage, melee_specialist, physical_base,
    target_movement, target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::declaration::Side;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::state::{Actuators, Arc, UnitKind};

/// Arm penalties. A missing hand still lets the mech punch.
const ARM_PENALTIES: [(Actuators, i32, &str); 3] = [
    (Actuators::UPPER_ARM, 2, "upper arm actuator destroyed"),
    (Actuators::LOWER_ARM, 2, "lower arm actuator destroyed"),
    (Actuators::HAND, 1, "hand actuator destroyed"),
];

#[derive(Clone, Copy, Debug)]
pub struct PunchAttack {
    arm: Side,
}

impl PunchAttack {
    pub const fn new(arm: Side) -> Self {
        Self { arm }
    }
}

impl AttackVariant for PunchAttack {
    fn guards(&self) -> GuardChain<'_> {
        let arm = self.arm.arm();
        let arc = match self.arm {
            Side::Left => Arc::LeftArm,
            Side::Right => Arc::RightArm,
        };
        common_guards()
            .guard("mech_only", |ctx| {
                Verdict::veto_if(!ctx.attacker.is_mech(), "Non-mechs can't punch")
            })
            .guard("biped_only", |ctx| {
                Verdict::veto_if(ctx.attacker.kind == UnitKind::QuadMech, "Quads can't punch")
            })
            .guard("arm_usable", move |ctx| arm_usable(ctx, arm))
            .guard("arm_fired", move |ctx| arm_not_fired(ctx, arm))
            .guard("attacker_jumped", attacker_jumped)
            .guard("attacker_prone", attacker_prone)
            .guard("range", |ctx| within_range(ctx, 1..=1))
            .guard("elevation", |ctx| {
                let delta = ctx.elevation_delta();
                let standing_mech = ctx
                    .target_unit()
                    .is_some_and(|unit| unit.is_mech() && !unit.is_prone());
                Verdict::veto_if(
                    !(-1..=1).contains(&delta) || (delta == -1 && !standing_mech),
                    "Target elevation not in range",
                )
            })
            .guard("arc", move |ctx| {
                within_arc(ctx, arc, ctx.attacker.torso_facing())
            })
            .guard("adjacent_structure", adjacent_structure)
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        attacker_movement(ctx, ledger);
        target_movement(ctx, ledger);
        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        limb_damage(ctx.attacker, self.arm.arm(), &ARM_PENALTIES, ledger);
        melee_specialist(ctx, ledger);
        target_type(ctx, ledger);
    }

    /// Punches land on the upper body; a target one level up takes them on the legs.
    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        let table = if ctx.elevation_delta() == 1 {
            HitTable::Kick
        } else {
            HitTable::Punch
        };
        melee(ctx, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::declaration::{AttackDeclaration, AttackKind, TargetRef};
    use crate::attack::fixtures::{
        ATTACKER, TARGET, delta_of, enemy, eval, field, mech, medium_laser, reasons,
    };
    use crate::state::{
        HexCoord, HexState, Location, LocationState, MovementMode, MovementReport, UnitState,
        UnitStatus, WeaponFlags,
    };

    fn punch(arm: Side) -> AttackDeclaration {
        AttackDeclaration::new(ATTACKER, TargetRef::Unit(TARGET), AttackKind::Punch { arm })
    }

    fn with_arm(state: LocationState) -> crate::env::BattlefieldSnapshot {
        field()
            .with_unit(mech(ATTACKER, 4, 8).with_location(state))
            .with_unit(enemy(TARGET, 4, 7))
    }

    fn right_arm() -> LocationState {
        LocationState::intact(UnitKind::BipedMech, Location::RightArm)
    }

    #[test]
    fn clean_punch_rolls_against_piloting() {
        let record = eval(&with_arm(right_arm()), punch(Side::Right));
        assert!(reasons(&record).is_empty());
        assert_eq!(record.target_number(), Some(5));
        assert_eq!(record.classification.hit_table, HitTable::Punch);
    }

    #[test]
    fn missing_hand_is_a_penalty_not_a_veto() {
        let record = eval(&with_arm(right_arm().without(Actuators::HAND)), punch(Side::Right));
        assert_eq!(reasons(&record), ["right hand actuator destroyed"]);
        assert_eq!(record.target_number(), Some(6));
    }

    #[test]
    fn destroyed_shoulder_is_a_veto() {
        let state = right_arm().with_damaged(Actuators::SHOULDER | Actuators::HAND);
        let record = eval(&with_arm(state), punch(Side::Right));
        assert_eq!(record.reason(), Some("Shoulder destroyed"));
        assert!(record.modifiers.is_empty());
    }

    #[test]
    fn blown_off_arm_reports_the_arm() {
        let record = eval(&with_arm(right_arm().blown_off()), punch(Side::Right));
        assert_eq!(record.reason(), Some("Arm missing"));
    }

    #[test]
    fn quads_and_vehicles_cannot_punch() {
        let quad = UnitState::new(ATTACKER, UnitKind::QuadMech, HexCoord::new(4, 8));
        let snapshot = field().with_unit(quad).with_unit(enemy(TARGET, 4, 7));
        assert_eq!(eval(&snapshot, punch(Side::Left)).reason(), Some("Quads can't punch"));

        let tank = UnitState::new(ATTACKER, UnitKind::Vehicle, HexCoord::new(4, 8));
        let snapshot = field().with_unit(tank).with_unit(enemy(TARGET, 4, 7));
        assert_eq!(eval(&snapshot, punch(Side::Left)).reason(), Some("Non-mechs can't punch"));
    }

    #[test]
    fn target_one_level_up_is_struck_on_the_kick_table() {
        let snapshot = with_arm(right_arm())
            .with_hex(HexState::clear(HexCoord::new(4, 7)).at_level(1));
        let record = eval(&snapshot, punch(Side::Right));
        assert_eq!(record.classification.hit_table, HitTable::Kick);
    }

    #[test]
    fn prone_target_below_cannot_be_punched() {
        let snapshot = field()
            .with_hex(HexState::clear(HexCoord::new(4, 8)).at_level(1))
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7).with_status(UnitStatus::PRONE));
        let record = eval(&snapshot, punch(Side::Left));
        assert_eq!(record.reason(), Some("Target elevation not in range"));
    }

    #[test]
    fn movement_and_prone_target_modifiers() {
        let snapshot = field()
            .with_unit(
                mech(ATTACKER, 4, 8).with_movement(MovementReport::new(MovementMode::Ran, 6)),
            )
            .with_unit(enemy(TARGET, 4, 7).with_status(UnitStatus::PRONE));
        let record = eval(&snapshot, punch(Side::Left));
        assert_eq!(reasons(&record), ["attacker ran", "target prone and adjacent"]);
        assert_eq!(delta_of(&record, "target prone and adjacent"), Some(-2));
        assert_eq!(record.classification.hit_table, HitTable::Normal);
    }

    #[test]
    fn an_arm_that_fired_cannot_punch() {
        let fired = medium_laser(Location::RightArm).with_flags(WeaponFlags::FIRED);
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8).with_weapon(fired))
            .with_unit(enemy(TARGET, 4, 7));
        let record = eval(&snapshot, punch(Side::Right));
        assert_eq!(record.reason(), Some("Weapons fired from arm this turn"));
        assert!(record.modifiers.is_empty());

        assert!(!eval(&snapshot, punch(Side::Left)).is_terminal());
    }
}
