//! Attack resolution.
//!
//! [`evaluate`] turns one [`AttackDeclaration`] into a [`ResolutionRecord`]
//! without touching the battlefield:
//!
//! - the declaration is validated against the environment ([`AttackError`])
//! - the variant's guard chain decides legality
//! - legal attacks get a base value, an ordered modifier ledger and a
//!   hit/side table classification
//!
//! Evaluation is a pure function of the declaration and the environment, so
//! identical inputs always produce identical records.
mod classify;
mod clauses;
mod context;
mod declaration;
mod error;
mod guard;
mod kinds;
mod record;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classify::side_struck;
pub use context::{AttackContext, TargetView};
pub use declaration::{AttackDeclaration, AttackKind, Side, TargetRef, WeaponFire};
pub use error::AttackError;
pub use guard::{GuardChain, Verdict};
pub use kinds::{
    AttackVariant, ChargeAttack, ClubAttack, DeathFromAboveAttack, Evaluation, GrappleAttack,
    KickAttack, PunchAttack, PushAttack, SwarmRetargetAttack, WeaponAttack,
};
pub use record::{
    Base, Classification, Cover, HitTable, Ledger, MAX_ROLL, Modifier, ResolutionRecord,
    SideTable, TerminalStatus,
};

use crate::env::BattleEnv;

/// Hands the variant implementing `kind` to `f`.
fn with_variant<R>(kind: AttackKind, f: impl FnOnce(&dyn AttackVariant) -> R) -> R {
    match kind {
        AttackKind::WeaponFire(fire) => f(&WeaponAttack::new(fire)),
        AttackKind::SwarmRetarget {
            weapon,
            original_target,
        } => f(&SwarmRetargetAttack::new(weapon, original_target)),
        AttackKind::Punch { arm } => f(&PunchAttack::new(arm)),
        AttackKind::Kick { leg } => f(&KickAttack::new(leg)),
        AttackKind::Club { club } => f(&ClubAttack::new(club)),
        AttackKind::Push => f(&PushAttack),
        AttackKind::Charge => f(&ChargeAttack),
        AttackKind::DeathFromAbove => f(&DeathFromAboveAttack),
        AttackKind::Grapple => f(&GrappleAttack),
    }
}

/// Evaluates one attack declaration.
///
/// Illegal attacks are not errors: they come back as records whose status is
/// [`TerminalStatus::Impossible`].
///
/// # Errors
///
/// Returns an [`AttackError`] when the declaration references something that
/// does not exist or the environment lacks a required oracle.
pub fn evaluate(
    declaration: &AttackDeclaration,
    env: &BattleEnv<'_>,
) -> Result<ResolutionRecord, AttackError> {
    let ctx = AttackContext::build(declaration, env)?;
    let evaluation = with_variant(declaration.kind, |variant| variant.run(&ctx))?;
    Ok(evaluation.into_record())
}

/// Guard names of a variant in evaluation order.
pub fn guard_order(kind: &AttackKind) -> Vec<&'static str> {
    with_variant(*kind, |variant| variant.guards().names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::{ATTACKER, TARGET, duel, eval};

    #[test]
    fn every_direct_attack_starts_with_the_common_guards() {
        let kinds = [
            AttackKind::WeaponFire(WeaponFire::new(0)),
            AttackKind::Punch { arm: Side::Left },
            AttackKind::Kick { leg: Side::Right },
            AttackKind::Club { club: 0 },
            AttackKind::Push,
            AttackKind::Charge,
            AttackKind::DeathFromAbove,
            AttackKind::Grapple,
        ];
        for kind in kinds {
            let order = guard_order(&kind);
            assert_eq!(
                &order[..4],
                ["self_target", "attacker_shutdown", "target_destroyed", "friendly_target"],
                "{}",
                kind.as_ref()
            );
        }
    }

    #[test]
    fn counter_grapple_precedes_posture_and_range() {
        let order = guard_order(&AttackKind::Grapple);
        let position = |name| order.iter().position(|guard| *guard == name);
        assert!(position("counter_grapple") < position("attacker_prone"));
        assert!(position("counter_grapple") < position("range"));
        assert!(position("counter_grapple") < position("arc"));
    }

    #[test]
    fn self_targeting_is_refused() {
        let declaration = AttackDeclaration::weapon(
            ATTACKER,
            TargetRef::Unit(ATTACKER),
            WeaponFire::new(0),
        );
        let record = eval(&duel(3), declaration);
        assert_eq!(record.reason(), Some("You can't target yourself"));
    }

    #[test]
    fn friendly_fire_option_lifts_the_friendly_guard() {
        use crate::config::{GameOption, OptionValue};
        let mut snapshot = duel(3);
        if let Some(target) = snapshot.unit_mut(TARGET) {
            target.team = crate::state::TeamId(0);
        }
        let declaration =
            AttackDeclaration::weapon(ATTACKER, TargetRef::Unit(TARGET), WeaponFire::new(0));
        assert_eq!(
            eval(&snapshot, declaration).status,
            TerminalStatus::Impossible(
                "A friendly unit can never be the target of a direct attack.".into()
            )
        );

        let snapshot = snapshot.with_option(GameOption::FriendlyFire, OptionValue::Bool(true));
        assert!(!eval(&snapshot, declaration).is_terminal());
    }
}
