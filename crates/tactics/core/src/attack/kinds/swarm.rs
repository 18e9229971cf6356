//! Swarm missile retargeting.
//!
//! Swarm missiles that miss may fly on to a unit next to the original target.
//! The follow-up roll starts from the original attack's ledger: every
//! target-derived entry is cancelled and the new target's entries are
//! appended in its place.

use super::{AttackVariant, Evaluation, WeaponAttack, screen};
use crate::attack::context::AttackContext;
use crate::attack::declaration::{AttackKind, TargetRef, WeaponFire};
use crate::attack::error::AttackError;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, Ledger, Modifier};
use crate::state::{AmmoKind, EntityId, UnitStatus};

#[derive(Clone, Copy, Debug)]
pub struct SwarmRetargetAttack {
    weapon: usize,
    original_target: EntityId,
}

impl SwarmRetargetAttack {
    pub const fn new(weapon: usize, original_target: EntityId) -> Self {
        Self {
            weapon,
            original_target,
        }
    }

    fn delegate(&self) -> WeaponAttack {
        WeaponAttack::new(WeaponFire::new(self.weapon))
    }
}

impl AttackVariant for SwarmRetargetAttack {
    fn guards(&self) -> GuardChain<'_> {
        let weapon = self.weapon;
        let original = self.original_target;
        GuardChain::new()
            .guard("swarm_ammo", move |ctx| {
                Verdict::veto_if(
                    ctx.weapon(weapon)
                        .is_some_and(|mounted| mounted.ammo != AmmoKind::Swarm),
                    "Weapon is not loaded with swarm missiles",
                )
            })
            .guard("self_target", |ctx| {
                Verdict::veto_if(
                    ctx.target_unit()
                        .is_some_and(|unit| unit.id == ctx.attacker.id),
                    "You can't target yourself",
                )
            })
            .guard("same_target", move |ctx| {
                Verdict::veto_if(
                    ctx.target_unit().is_some_and(|unit| unit.id == original),
                    "Swarm missiles must switch to a new target",
                )
            })
            .guard("adjacent_to_original", move |ctx| {
                // Resolved when the context is built.
                let Some(previous) = ctx.unit(original) else {
                    return Verdict::Continue;
                };
                Verdict::veto_if(
                    previous.position.distance(ctx.target.position()) > 1,
                    "New target must be adjacent to the original target",
                )
            })
            .guard("target_destroyed", |ctx| {
                Verdict::veto_if(
                    ctx.target_unit()
                        .is_some_and(|unit| unit.is(UnitStatus::DESTROYED)),
                    "Target already destroyed",
                )
            })
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        self.delegate().base(ctx)
    }

    /// The new target's share of the ledger: only target-derived entries.
    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        let delegate = self.delegate();
        let mut scratch = Ledger::new(delegate.base(ctx));
        delegate.modifiers(ctx, &mut scratch);
        for entry in scratch.entries() {
            if entry.target_specific {
                ledger.push(entry.clone());
            }
        }
    }

    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        self.delegate().classify(ctx)
    }

    fn run(&self, ctx: &AttackContext<'_>) -> Result<Evaluation, AttackError> {
        if let Some(record) = screen(&self.guards(), ctx, || self.classify(ctx)) {
            return Ok(Evaluation::Terminal(record));
        }

        let delegate = self.delegate();
        let original = ctx.retarget(
            TargetRef::Unit(self.original_target),
            AttackKind::WeaponFire(WeaponFire::new(self.weapon)),
        )?;
        let mut ledger = match delegate.run(&original)? {
            Evaluation::Terminal(record) => return Ok(Evaluation::Terminal(record)),
            Evaluation::Open { ledger, .. } => ledger,
        };

        let cancelled: Vec<Modifier> = ledger
            .entries()
            .iter()
            .filter(|entry| entry.target_specific && entry.delta != 0)
            .map(|entry| Modifier::new(-entry.delta, format!("{} (original target)", entry.reason)))
            .collect();
        for entry in cancelled {
            ledger.push(entry);
        }
        self.modifiers(ctx, &mut ledger);

        Ok(Evaluation::Open {
            ledger,
            classification: self.classify(ctx),
        })
    }
}
