//! Attack variant catalog.
//!
//! Every variant supplies a guard chain, a base value, a modifier pipeline and
//! a classification. [`AttackVariant::run`] ties them together:
//!
//! 1. guards, in order, first terminal verdict wins
//! 2. base value
//! 3. modifiers, appended in rule order
//! 4. classification
//!
//! The late "more than 12" rule is applied when the ledger is finished.
mod charge;
mod club;
mod dfa;
mod grapple;
mod kick;
mod punch;
mod push;
mod swarm;
mod weapon;

use core::ops::RangeInclusive;

pub use charge::ChargeAttack;
pub use club::ClubAttack;
pub use dfa::DeathFromAboveAttack;
pub use grapple::GrappleAttack;
pub use kick::KickAttack;
pub use punch::PunchAttack;
pub use push::PushAttack;
pub use swarm::SwarmRetargetAttack;
pub use weapon::WeaponAttack;

use super::context::AttackContext;
use super::error::AttackError;
use super::guard::{GuardChain, Verdict};
use super::record::{Base, Classification, Ledger, ResolutionRecord};
use crate::config::GameOption;
use crate::state::{Actuators, Arc, Facing, Location, UnitStatus};

/// Result of running a variant before the ledger is finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// A guard decided the outcome.
    Terminal(ResolutionRecord),
    /// Legal attack with its completed ledger.
    Open {
        ledger: Ledger,
        classification: Classification,
    },
}

impl Evaluation {
    pub fn into_record(self) -> ResolutionRecord {
        match self {
            Evaluation::Terminal(record) => record,
            Evaluation::Open {
                ledger,
                classification,
            } => ledger.finish(classification),
        }
    }
}

/// One kind of attack.
pub trait AttackVariant {
    /// Legality checks in precedence order.
    fn guards(&self) -> GuardChain<'_>;

    /// Unmodified target number.
    fn base(&self, ctx: &AttackContext<'_>) -> Base;

    /// Appends situational modifiers in rule order.
    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger);

    /// Hit and side tables for the damage step.
    fn classify(&self, ctx: &AttackContext<'_>) -> Classification;

    /// Full evaluation: guards, base, modifiers, classification.
    ///
    /// # Errors
    ///
    /// Only variants that consult other targets can fail, when those targets
    /// cannot be resolved.
    fn run(&self, ctx: &AttackContext<'_>) -> Result<Evaluation, AttackError> {
        if let Some(record) = screen(&self.guards(), ctx, || self.classify(ctx)) {
            return Ok(Evaluation::Terminal(record));
        }
        let mut ledger = Ledger::new(self.base(ctx));
        self.modifiers(ctx, &mut ledger);
        Ok(Evaluation::Open {
            ledger,
            classification: self.classify(ctx),
        })
    }
}

/// Runs a guard chain and converts a terminal verdict into a record.
///
/// Automatic successes keep the classification so the damage step still knows
/// which tables to use.
pub(crate) fn screen(
    chain: &GuardChain<'_>,
    ctx: &AttackContext<'_>,
    classify: impl FnOnce() -> Classification,
) -> Option<ResolutionRecord> {
    match chain.run(ctx) {
        Verdict::Continue | Verdict::Pass => None,
        Verdict::Impossible(reason) => Some(ResolutionRecord::impossible(reason)),
        Verdict::AutomaticFail(reason) => Some(ResolutionRecord::automatic_fail(reason)),
        Verdict::AutomaticSuccess(reason) => {
            Some(ResolutionRecord::automatic_success(reason, classify()))
        }
    }
}

// ============================================================================
// Shared guards
// ============================================================================

pub(crate) const FRIENDLY_TARGET: &str =
    "A friendly unit can never be the target of a direct attack.";
pub(crate) const ADJACENT_BUILDING: &str = "Targeting adjacent building.";

/// Guards every direct attack starts with.
pub(crate) fn common_guards<'g>() -> GuardChain<'g> {
    GuardChain::new()
        .guard("self_target", |ctx| {
            Verdict::veto_if(
                ctx.target_unit()
                    .is_some_and(|unit| unit.id == ctx.attacker.id),
                "You can't target yourself",
            )
        })
        .guard("attacker_shutdown", |ctx| {
            Verdict::veto_if(
                ctx.attacker.is(UnitStatus::SHUTDOWN),
                "Attacker is shut down",
            )
        })
        .guard("target_destroyed", |ctx| {
            Verdict::veto_if(
                ctx.target_unit()
                    .is_some_and(|unit| unit.is(UnitStatus::DESTROYED)),
                "Target already destroyed",
            )
        })
        .guard("friendly_target", |ctx| {
            Verdict::veto_if(
                !ctx.flag(GameOption::FriendlyFire)
                    && ctx
                        .target_unit()
                        .is_some_and(|unit| unit.is_friendly_to(ctx.attacker)),
                FRIENDLY_TARGET,
            )
        })
}

pub(crate) fn within_range(ctx: &AttackContext<'_>, allowed: RangeInclusive<u32>) -> Verdict {
    Verdict::veto_if(!allowed.contains(&ctx.distance), "Target not in range")
}

pub(crate) fn within_elevation(ctx: &AttackContext<'_>, allowed: RangeInclusive<i32>) -> Verdict {
    Verdict::veto_if(
        !allowed.contains(&ctx.elevation_delta()),
        "Target elevation not in range",
    )
}

pub(crate) fn within_arc(ctx: &AttackContext<'_>, arc: Arc, facing: Facing) -> Verdict {
    Verdict::veto_if(
        !arc.covers(ctx.attacker.position, facing, ctx.target.position()),
        "Target not in arc",
    )
}

pub(crate) fn attacker_jumped(ctx: &AttackContext<'_>) -> Verdict {
    Verdict::veto_if(ctx.attacker.movement.jumped(), "Attacker jumped this turn")
}

pub(crate) fn attacker_prone(ctx: &AttackContext<'_>) -> Verdict {
    Verdict::veto_if(ctx.attacker.is_prone(), "Attacker is prone")
}

/// Buildings and fuel tanks next to the attacker cannot be missed.
pub(crate) fn adjacent_structure(ctx: &AttackContext<'_>) -> Verdict {
    if ctx.target.is_structure() && ctx.distance <= 1 {
        Verdict::AutomaticSuccess(ADJACENT_BUILDING.to_string())
    } else {
        Verdict::Continue
    }
}

/// The arm is attached and its shoulder still turns.
pub(crate) fn arm_usable(ctx: &AttackContext<'_>, arm: Location) -> Verdict {
    let state = ctx.attacker.location(arm);
    if state.destroyed {
        return Verdict::impossible("Arm missing");
    }
    Verdict::veto_if(!state.is_working(Actuators::SHOULDER), "Shoulder destroyed")
}

pub(crate) fn arm_not_fired(ctx: &AttackContext<'_>, arm: Location) -> Verdict {
    Verdict::veto_if(
        ctx.attacker.fired_from(arm),
        "Weapons fired from arm this turn",
    )
}

/// Runs `check` against both arms, left first.
pub(crate) fn both_arms(
    ctx: &AttackContext<'_>,
    check: impl Fn(&AttackContext<'_>, Location) -> Verdict,
) -> Verdict {
    [Location::LeftArm, Location::RightArm]
        .into_iter()
        .map(|arm| check(ctx, arm))
        .find(Verdict::is_terminal)
        .unwrap_or(Verdict::Continue)
}
