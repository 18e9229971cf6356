use super::{
    AttackVariant, adjacent_structure, attacker_prone, common_guards, within_arc,
    within_elevation, within_range,
};
use crate::attack::classify::melee;
use crate::attack::clauses::{
    attacker_terrain, melee_specialist, physical_base, piloting_differential, target_movement,
    target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::state::{Arc, MovementMode, UnitKind};

/// Rams the target at the end of the attacker's movement.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChargeAttack;

impl AttackVariant for ChargeAttack {
    fn guards(&self) -> GuardChain<'_> {
        common_guards()
            .guard("charger_kind", |ctx| {
                Verdict::veto_if(
                    !matches!(
                        ctx.attacker.kind,
                        UnitKind::BipedMech
                            | UnitKind::QuadMech
                            | UnitKind::ProtoMech
                            | UnitKind::Vehicle
                    ),
                    "Only mechs, protomechs and vehicles can charge",
                )
            })
            .guard("attacker_prone", attacker_prone)
            .guard("attacker_jumped", |ctx| {
                Verdict::veto_if(ctx.attacker.movement.jumped(), "Can't charge after jumping")
            })
            .guard("attacker_moved", |ctx| {
                let movement = ctx.attacker.movement;
                Verdict::veto_if(
                    movement.mode == MovementMode::Stationary || movement.hexes == 0,
                    "Attacker must move to charge",
                )
            })
            .guard("infantry_target", |ctx| {
                Verdict::veto_if(
                    ctx.target_unit().is_some_and(|unit| unit.kind.is_infantry()),
                    "Can't charge infantry",
                )
            })
            .guard("range", |ctx| within_range(ctx, 1..=1))
            .guard("elevation", |ctx| within_elevation(ctx, -1..=1))
            .guard("arc", |ctx| within_arc(ctx, Arc::Forward, ctx.attacker.facing))
            .guard("adjacent_structure", adjacent_structure)
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    /// The charge itself is the movement, so the attacker pays nothing for it.
    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        target_movement(ctx, ledger);
        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        melee_specialist(ctx, ledger);
        target_type(ctx, ledger);
        piloting_differential(ctx, ledger);
    }

    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        let table = match ctx.elevation_delta() {
            delta if delta > 0 => HitTable::Kick,
            delta if delta < 0 => HitTable::Punch,
            _ => HitTable::Normal,
        };
        melee(ctx, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::declaration::{AttackDeclaration, AttackKind, TargetRef};
    use crate::attack::fixtures::{ATTACKER, TARGET, delta_of, enemy, eval, field, mech, reasons};
    use crate::state::{Crew, HexCoord, HexState, MovementReport, TeamId, UnitState};

    fn charge() -> AttackDeclaration {
        AttackDeclaration::new(ATTACKER, TargetRef::Unit(TARGET), AttackKind::Charge)
    }

    fn charger() -> UnitState {
        mech(ATTACKER, 4, 8).with_movement(MovementReport::new(MovementMode::Ran, 5))
    }

    #[test]
    fn charge_ignores_own_movement_and_compares_pilots() {
        let snapshot = field()
            .with_unit(charger())
            .with_unit(enemy(TARGET, 4, 7).with_crew(Crew::new(4, 3)));
        let record = eval(&snapshot, charge());
        assert_eq!(reasons(&record), ["piloting skill differential"]);
        assert_eq!(delta_of(&record, "piloting skill differential"), Some(2));
        assert_eq!(record.target_number(), Some(7));
    }

    #[test]
    fn standing_still_is_not_a_charge() {
        let snapshot = field()
            .with_unit(mech(ATTACKER, 4, 8))
            .with_unit(enemy(TARGET, 4, 7));
        assert_eq!(eval(&snapshot, charge()).reason(), Some("Attacker must move to charge"));
    }

    #[test]
    fn infantry_cannot_be_charged() {
        let platoon =
            UnitState::new(TARGET, UnitKind::Infantry, HexCoord::new(4, 7)).on_team(TeamId(1));
        let snapshot = field().with_unit(charger()).with_unit(platoon);
        assert_eq!(eval(&snapshot, charge()).reason(), Some("Can't charge infantry"));
    }

    #[test]
    fn charging_uphill_uses_the_kick_table() {
        let snapshot = field()
            .with_hex(HexState::clear(HexCoord::new(4, 7)).at_level(1))
            .with_unit(charger())
            .with_unit(enemy(TARGET, 4, 7));
        let record = eval(&snapshot, charge());
        assert_eq!(record.classification.hit_table, HitTable::Kick);
    }
}
