//! Melee weapons and improvised clubs.

use super::{
    AttackVariant, adjacent_structure, arm_not_fired, attacker_jumped, attacker_prone, both_arms,
    common_guards, within_arc, within_elevation, within_range,
};
use crate::attack::classify::melee;
use crate::attack::clauses::{
    attacker_movement, attacker_terrain, limb_damage, melee_specialist, physical_base,
    target_movement, target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::state::{Actuators, Arc, ClubKind, Location, MountedClub};

const ARM_PENALTIES: [(Actuators, i32, &str); 2] = [
    (Actuators::UPPER_ARM, 2, "upper arm actuator destroyed"),
    (Actuators::LOWER_ARM, 2, "lower arm actuator destroyed"),
];

#[derive(Clone, Copy, Debug)]
pub struct ClubAttack {
    club: usize,
}

impl ClubAttack {
    pub const fn new(club: usize) -> Self {
        Self { club }
    }
}

/// Arms that swing the club. Improvised clubs take both hands.
fn swinging_arms(club: &MountedClub) -> &'static [Location] {
    match (club.kind, club.location) {
        (ClubKind::Improvised, _) => &[Location::LeftArm, Location::RightArm],
        (_, Location::LeftArm) => &[Location::LeftArm],
        (_, Location::RightArm) => &[Location::RightArm],
        _ => &[],
    }
}

fn club_guard(
    index: usize,
    check: impl Fn(&AttackContext<'_>, &MountedClub) -> Verdict,
) -> impl Fn(&AttackContext<'_>) -> Verdict {
    move |ctx| {
        ctx.club(index)
            .map_or(Verdict::Continue, |club| check(ctx, club))
    }
}

impl AttackVariant for ClubAttack {
    fn guards(&self) -> GuardChain<'_> {
        let index = self.club;
        common_guards()
            .guard("mech_only", |ctx| {
                Verdict::veto_if(!ctx.attacker.is_mech(), "Non-mechs can't club")
            })
            .guard(
                "club_destroyed",
                club_guard(index, |_, club| {
                    Verdict::veto_if(club.destroyed, "Club is destroyed")
                }),
            )
            .guard(
                "improvised_grip",
                club_guard(index, |ctx, club| {
                    if club.kind != ClubKind::Improvised {
                        return Verdict::Continue;
                    }
                    both_arms(ctx, |ctx, arm| {
                        Verdict::veto_if(
                            !ctx.attacker.actuator_working(arm, Actuators::HAND),
                            "Improvised clubs require both hands",
                        )
                    })
                }),
            )
            .guard(
                "arm_missing",
                club_guard(index, |ctx, club| {
                    Verdict::veto_if(
                        club.location.is_arm()
                            && ctx.attacker.is_location_destroyed(club.location),
                        "Arm missing",
                    )
                }),
            )
            .guard(
                "hand",
                club_guard(index, |ctx, club| {
                    Verdict::veto_if(
                        club.location.is_arm()
                            && !ctx.attacker.actuator_working(club.location, Actuators::HAND),
                        "Hand actuator destroyed",
                    )
                }),
            )
            .guard(
                "arm_fired",
                club_guard(index, |ctx, club| {
                    swinging_arms(club)
                        .iter()
                        .map(|&arm| arm_not_fired(ctx, arm))
                        .find(Verdict::is_terminal)
                        .unwrap_or(Verdict::Continue)
                }),
            )
            .guard("attacker_jumped", attacker_jumped)
            .guard("attacker_prone", attacker_prone)
            .guard("range", |ctx| within_range(ctx, 1..=1))
            .guard("elevation", |ctx| within_elevation(ctx, -1..=1))
            .guard(
                "arc",
                club_guard(index, |ctx, club| {
                    let arc = match (club.kind, club.location) {
                        (ClubKind::Improvised, _) => Arc::Forward,
                        (_, Location::LeftArm) => Arc::LeftArm,
                        (_, Location::RightArm) => Arc::RightArm,
                        _ => Arc::Forward,
                    };
                    within_arc(ctx, arc, ctx.attacker.torso_facing())
                }),
            )
            .guard("adjacent_structure", adjacent_structure)
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        physical_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        let Some(club) = ctx.club(self.club) else {
            return;
        };
        let accuracy = club.kind.accuracy();
        if accuracy != 0 {
            ledger.add(accuracy, club.kind.to_string());
        }
        attacker_movement(ctx, ledger);
        target_movement(ctx, ledger);
        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        for &arm in swinging_arms(club) {
            limb_damage(ctx.attacker, arm, &ARM_PENALTIES, ledger);
        }
        melee_specialist(ctx, ledger);
        target_type(ctx, ledger);
    }

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
    use crate::attack::fixtures::{ATTACKER, TARGET, enemy, eval, field, mech, reasons};
    use crate::state::{LocationState, UnitKind, UnitState};

    fn swing(attacker: UnitState) -> crate::attack::record::ResolutionRecord {
        let snapshot = field().with_unit(attacker).with_unit(enemy(TARGET, 4, 7));
        let declaration =
            AttackDeclaration::new(ATTACKER, TargetRef::Unit(TARGET), AttackKind::Club { club: 0 });
        eval(&snapshot, declaration)
    }

    #[test]
    fn sword_accuracy_follows_the_base() {
        let record = swing(
            mech(ATTACKER, 4, 8).with_club(MountedClub::new(ClubKind::Sword, Location::RightArm)),
        );
        assert_eq!(reasons(&record), ["sword"]);
        assert_eq!(record.target_number(), Some(3));
        assert_eq!(record.classification.hit_table, HitTable::Punch);
    }

    #[test]
    fn arm_mounted_clubs_need_the_hand() {
        let arm = LocationState::intact(UnitKind::BipedMech, Location::LeftArm)
            .with_damaged(Actuators::HAND);
        let record = swing(
            mech(ATTACKER, 4, 8)
                .with_location(arm)
                .with_club(MountedClub::new(ClubKind::Hatchet, Location::LeftArm)),
        );
        assert_eq!(record.reason(), Some("Hand actuator destroyed"));
    }

    #[test]
    fn improvised_clubs_need_both_hands() {
        let arm = LocationState::intact(UnitKind::BipedMech, Location::RightArm)
            .without(Actuators::HAND);
        let record = swing(
            mech(ATTACKER, 4, 8)
                .with_location(arm)
                .with_club(MountedClub::new(ClubKind::Improvised, Location::CenterTorso)),
        );
        assert_eq!(record.reason(), Some("Improvised clubs require both hands"));
    }

    #[test]
    fn destroyed_club_vetoes_first() {
        let mut mace = MountedClub::new(ClubKind::Mace, Location::RightArm);
        mace.destroyed = true;
        let record = swing(mech(ATTACKER, 4, 8).with_club(mace));
        assert_eq!(record.reason(), Some("Club is destroyed"));
    }

    #[test]
    fn improvised_swing_counts_damage_on_both_arms() {
        let left = LocationState::intact(UnitKind::BipedMech, Location::LeftArm)
            .with_damaged(Actuators::UPPER_ARM);
        let right = LocationState::intact(UnitKind::BipedMech, Location::RightArm)
            .with_damaged(Actuators::LOWER_ARM);
        let record = swing(
            mech(ATTACKER, 4, 8)
                .with_location(left)
                .with_location(right)
                .with_club(MountedClub::new(ClubKind::Improvised, Location::CenterTorso)),
        );
        assert_eq!(
            reasons(&record),
            ["left upper arm actuator destroyed", "right lower arm actuator destroyed"]
        );
        assert_eq!(record.target_number(), Some(9));
    }
}
