//! Legality guard chains.
//!
//! A chain is an ordered list of named predicates. Guards run in insertion
//! order and the first verdict other than [`Verdict::Continue`] ends the
//! chain, so later guards never observe a vetoed attack.

use super::context::AttackContext;

/// Outcome of a single guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No objection; run the next guard.
    Continue,
    /// Legal; skip every remaining guard.
    Pass,
    Impossible(String),
    AutomaticSuccess(String),
    AutomaticFail(String),
}

impl Verdict {
    pub fn impossible(reason: impl Into<String>) -> Self {
        Verdict::Impossible(reason.into())
    }

    /// `Impossible(reason)` when `vetoed`, otherwise `Continue`.
    pub fn veto_if(vetoed: bool, reason: &str) -> Self {
        if vetoed {
            Verdict::Impossible(reason.to_string())
        } else {
            Verdict::Continue
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Continue | Verdict::Pass)
    }
}

type GuardFn<'g> = Box<dyn Fn(&AttackContext<'_>) -> Verdict + 'g>;

struct Guard<'g> {
    name: &'static str,
    check: GuardFn<'g>,
}

/// Ordered legality checks for one attack variant.
#[derive(Default)]
pub struct GuardChain<'g> {
    guards: Vec<Guard<'g>>,
}

impl<'g> GuardChain<'g> {
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Appends a guard to the end of the chain.
    #[must_use]
    pub fn guard(
        mut self,
        name: &'static str,
        check: impl Fn(&AttackContext<'_>) -> Verdict + 'g,
    ) -> Self {
        self.guards.push(Guard {
            name,
            check: Box::new(check),
        });
        self
    }

    /// Guard names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.guards.iter().map(|guard| guard.name).collect()
    }

    /// Runs guards in order until one returns something other than `Continue`.
    pub fn run(&self, ctx: &AttackContext<'_>) -> Verdict {
        for guard in &self.guards {
            let verdict = (guard.check)(ctx);
            if verdict != Verdict::Continue {
                return verdict;
            }
        }
        Verdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::attack::declaration::{AttackDeclaration, AttackKind, TargetRef};
    use crate::env::BattlefieldSnapshot;
    use crate::state::{EntityId, HexCoord, TeamId, UnitKind, UnitState};

    fn snapshot() -> BattlefieldSnapshot {
        BattlefieldSnapshot::open_field(8, 8)
            .with_unit(UnitState::new(
                EntityId(1),
                UnitKind::BipedMech,
                HexCoord::new(2, 2),
            ))
            .with_unit(
                UnitState::new(EntityId(2), UnitKind::BipedMech, HexCoord::new(2, 1))
                    .on_team(TeamId(1)),
            )
    }

    #[test]
    fn first_terminal_verdict_wins() {
        let snapshot = snapshot();
        let declaration =
            AttackDeclaration::new(EntityId(1), TargetRef::Unit(EntityId(2)), AttackKind::Push);
        let ctx = AttackContext::build(&declaration, &snapshot.env()).expect("valid declaration");

        let later_ran = Cell::new(false);
        let chain = GuardChain::new()
            .guard("first", |_| Verdict::Continue)
            .guard("second", |_| Verdict::impossible("second"))
            .guard("third", |_| {
                later_ran.set(true);
                Verdict::impossible("third")
            });

        assert_eq!(chain.run(&ctx), Verdict::impossible("second"));
        assert!(!later_ran.get());
        assert_eq!(chain.names(), ["first", "second", "third"]);
    }

    #[test]
    fn pass_skips_remaining_guards() {
        let snapshot = snapshot();
        let declaration =
            AttackDeclaration::new(EntityId(1), TargetRef::Unit(EntityId(2)), AttackKind::Push);
        let ctx = AttackContext::build(&declaration, &snapshot.env()).expect("valid declaration");

        let chain = GuardChain::new()
            .guard("exception", |_| Verdict::Pass)
            .guard("veto", |_| Verdict::impossible("never"));

        assert_eq!(chain.run(&ctx), Verdict::Pass);
    }

    #[test]
    fn veto_if_maps_booleans() {
        assert_eq!(Verdict::veto_if(false, "x"), Verdict::Continue);
        assert_eq!(Verdict::veto_if(true, "x"), Verdict::impossible("x"));
        assert!(Verdict::AutomaticFail("x".into()).is_terminal());
        assert!(!Verdict::Pass.is_terminal());
    }
}
