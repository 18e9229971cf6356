use super::{
    AttackVariant, adjacent_structure, attacker_jumped, attacker_prone, common_guards, within_arc,
    within_elevation, within_range,
};
use crate::attack::classify::{melee, randomize_side_at_zero_range};
use crate::attack::clauses::{
    attacker_movement, attacker_terrain, limb_damage, melee_specialist, physical_base,
    target_movement, target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::declaration::Side;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::state::{Actuators, Arc, Location, UnitKind};

const LEG_PENALTIES: [(Actuators, i32, &str); 3] = [
    (Actuators::UPPER_LEG, 2, "upper leg actuator destroyed"),
    (Actuators::LOWER_LEG, 2, "lower leg actuator destroyed"),
    (Actuators::FOOT, 1, "foot actuator destroyed"),
];

#[derive(Clone, Copy, Debug)]
pub struct KickAttack {
    leg: Side,
}

impl KickAttack {
    pub const fn new(leg: Side) -> Self {
        Self { leg }
    }
}

impl AttackVariant for KickAttack {
    fn guards(&self) -> GuardChain<'_> {
        let leg = self.leg.leg();
        common_guards()
            .guard("mech_only", |ctx| {
                Verdict::veto_if(!ctx.attacker.is_mech(), "Non-mechs can't kick")
            })
            .guard("leg_missing", move |ctx| {
                Verdict::veto_if(ctx.attacker.is_location_destroyed(leg), "Leg missing")
            })
            .guard("other_leg_missing", |ctx| {
                let missing = Location::legs(ctx.attacker.kind)
                    .iter()
                    .any(|&location| ctx.attacker.is_location_destroyed(location));
                Verdict::veto_if(missing, "Can't kick while missing a leg")
            })
            .guard("hip", move |ctx| {
                Verdict::veto_if(
                    !ctx.attacker.actuator_working(leg, Actuators::HIP),
                    "Hip destroyed",
                )
            })
            .guard("leg_fired", move |ctx| {
                Verdict::veto_if(
                    ctx.attacker.fired_from(leg),
                    "Weapons fired from leg this turn",
                )
            })
            .guard("attacker_jumped", attacker_jumped)
            .guard("attacker_prone", attacker_prone)
            .guard("range", |ctx| {
                let low_target = ctx.target_unit().is_some_and(|unit| {
                    matches!(
                        unit.kind,
                        UnitKind::Infantry | UnitKind::BattleArmor | UnitKind::Vehicle
                    )
                });
                let closest = if low_target { 0 } else { 1 };
                within_range(ctx, closest..=1)
            })
            .guard("elevation", |ctx| within_elevation(ctx, -1..=0))
            .guard("arc", |ctx| within_arc(ctx, Arc::Forward, ctx.attacker.facing))
            .guard("adjacent_structure", adjacent_structure)
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        ledger.add(-2, "kick");
        attacker_movement(ctx, ledger);
        target_movement(ctx, ledger);
        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        limb_damage(ctx.attacker, self.leg.leg(), &LEG_PENALTIES, ledger);
        melee_specialist(ctx, ledger);
        target_type(ctx, ledger);
    }

    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        let table = if ctx.elevation_delta() == -1 {
            HitTable::Punch
        } else {
            HitTable::Kick
        };
        let mut classification = melee(ctx, table);
        randomize_side_at_zero_range(ctx, &mut classification);
        classification
    }
}
