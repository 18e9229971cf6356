//! Ranged weapon fire.

use super::{AttackVariant, adjacent_structure, common_guards};
use crate::attack::classify::{geometric_side, partial_cover};
use crate::attack::clauses::{
    attacker_movement, attacker_terrain, gunnery_base, is_target_movement, own_movement,
    target_movement, target_terrain, target_type,
};
use crate::attack::context::AttackContext;
use crate::attack::declaration::WeaponFire;
use crate::attack::guard::{GuardChain, Verdict};
use crate::attack::record::{Base, Classification, HitTable, Ledger};
use crate::config::GameOption;
use crate::state::{
    Actuators, AmmoKind, Arc, CrewAbility, Facing, Location, MountedWeapon, RangeBracket,
    UnitKind, UnitState, UnitStatus, WeaponFlags,
};

/// Fires one mounted weapon at a unit, structure or hex.
#[derive(Clone, Copy, Debug)]
pub struct WeaponAttack {
    fire: WeaponFire,
}

impl WeaponAttack {
    pub const fn new(fire: WeaponFire) -> Self {
        Self { fire }
    }
}

/// Firing arc of a mounted weapon and the facing it is measured from.
pub fn weapon_arc(unit: &UnitState, weapon: &MountedWeapon) -> (Arc, Facing) {
    if weapon.rear_mounted {
        return (Arc::Rear, unit.torso_facing());
    }
    match unit.kind {
        UnitKind::BipedMech => match weapon.location {
            Location::LeftArm => (Arc::LeftArm, unit.torso_facing()),
            Location::RightArm => (Arc::RightArm, unit.torso_facing()),
            location if location.is_leg() => (Arc::Forward, unit.facing),
            _ => (Arc::Forward, unit.torso_facing()),
        },
        UnitKind::QuadMech | UnitKind::ProtoMech => (Arc::Forward, unit.facing),
        UnitKind::Vehicle => {
            let arc = match weapon.location {
                Location::LeftSide => Arc::LeftSide,
                Location::RightSide => Arc::RightSide,
                Location::Rear => Arc::Rear,
                Location::Turret => Arc::Turret,
                _ => Arc::Forward,
            };
            (arc, unit.facing)
        }
        UnitKind::BattleArmor | UnitKind::Infantry => (Arc::Turret, unit.facing),
    }
}

/// To-hit penalty from the attacker's heat level.
pub const fn heat_modifier(heat: u8, extended_scale: bool) -> i32 {
    match heat {
        0..=7 => 0,
        8..=12 => 1,
        13..=16 => 2,
        17..=23 => 3,
        24..=32 => 4,
        _ if extended_scale => 5,
        _ => 4,
    }
}

/// Wraps a guard that needs the declared weapon. The index is validated when
/// the context is built.
fn weapon_guard(
    index: usize,
    check: impl Fn(&AttackContext<'_>, &MountedWeapon) -> Verdict,
) -> impl Fn(&AttackContext<'_>) -> Verdict {
    move |ctx| {
        ctx.weapon(index)
            .map_or(Verdict::Continue, |weapon| check(ctx, weapon))
    }
}

fn spotter_guard(
    fire: WeaponFire,
    check: impl Fn(&AttackContext<'_>, &UnitState) -> Verdict,
) -> impl Fn(&AttackContext<'_>) -> Verdict {
    move |ctx| {
        fire.spotter
            .and_then(|id| ctx.unit(id))
            .map_or(Verdict::Continue, |spotter| check(ctx, spotter))
    }
}

const SECONDARY_TARGET: &str = "secondary target";
const MULTI_TASKER: &str = "multi-tasker";

fn is_secondary_surcharge(reason: &str) -> bool {
    reason.starts_with(SECONDARY_TARGET) || reason == MULTI_TASKER
}

impl WeaponAttack {
    fn is_secondary(&self, ctx: &AttackContext<'_>) -> bool {
        self.fire
            .primary_target
            .is_some_and(|primary| primary != ctx.declaration.target)
    }

    fn range_modifiers(ctx: &AttackContext<'_>, weapon: &MountedWeapon, ledger: &mut Ledger) {
        let bracket = weapon.ranges.bracket(ctx.distance);
        ledger.add_target(bracket.modifier(), bracket.label());
        let minimum = u32::from(weapon.ranges.minimum);
        if minimum > 0 && ctx.distance <= minimum {
            let delta = (minimum - ctx.distance + 1) as i32;
            ledger.add_target(delta, "minimum range");
        }
    }

    /// Special ammunition offsets the target movement entries already appended.
    fn ammunition(ctx: &AttackContext<'_>, weapon: &MountedWeapon, ledger: &mut Ledger) {
        let movement = ledger.sum_where(is_target_movement);
        if movement <= 0 {
            return;
        }
        match weapon.ammo {
            AmmoKind::Precision => {
                ledger.add_target(-movement.min(2), "precision ammunition");
            }
            AmmoKind::SemiGuided => {
                let tagged = ctx
                    .target_unit()
                    .is_some_and(|target| target.is(UnitStatus::TAGGED));
                if tagged && !ctx.target_ecm_protected() {
                    ledger.add_target(-movement, "semi-guided ammunition vs. TAG");
                }
            }
            AmmoKind::Standard | AmmoKind::Swarm => {}
        }
    }

    fn intervening_terrain(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        let los = match self.fire.spotter.and_then(|id| ctx.unit(id)) {
            Some(spotter) => ctx.sight_from(spotter),
            None => ctx.los,
        };
        let counts: [(u8, i32, &str); 5] = [
            (los.light_woods, 1, "intervening light woods"),
            (los.heavy_woods, 2, "intervening heavy woods"),
            (los.ultra_woods, 3, "intervening ultra-heavy woods"),
            (los.light_smoke, 1, "intervening light smoke"),
            (los.heavy_smoke, 2, "intervening heavy smoke"),
        ];
        for (count, points, label) in counts {
            if count > 0 {
                ledger.add_target(i32::from(count) * points, label);
            }
        }
    }

    fn arm_actuators(ctx: &AttackContext<'_>, weapon: &MountedWeapon, ledger: &mut Ledger) {
        if ctx.attacker.kind != UnitKind::BipedMech || !weapon.location.is_arm() {
            return;
        }
        let arm = ctx.attacker.location(weapon.location);
        if arm.is_damaged(Actuators::SHOULDER) {
            ledger.add(4, "shoulder actuator destroyed");
            return;
        }
        if arm.is_damaged(Actuators::UPPER_ARM) {
            ledger.add(1, "upper arm actuator destroyed");
        }
        if arm.is_damaged(Actuators::LOWER_ARM) {
            ledger.add(1, "lower arm actuator destroyed");
        }
    }

    fn specialists(ctx: &AttackContext<'_>, weapon: &MountedWeapon, ledger: &mut Ledger) {
        if !ctx.flag(GameOption::PilotAbilities) {
            return;
        }
        for ability in &ctx.attacker.crew.abilities {
            match ability {
                CrewAbility::WeaponSpecialist(name) if *name == weapon.name => {
                    ledger.add(-2, "weapon specialist");
                }
                CrewAbility::GunnerySpecialist(class) => {
                    let delta = if *class == weapon.class { -1 } else { 1 };
                    ledger.add(delta, "gunnery specialist");
                }
                CrewAbility::Sniper => {
                    let penalty = weapon.ranges.bracket(ctx.distance).modifier();
                    if penalty > 0 {
                        ledger.add_target(-(penalty / 2), "sniper");
                    }
                }
                _ => {}
            }
        }
    }

    fn secondary_target(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        if !self.is_secondary(ctx) {
            return;
        }
        let forward = Arc::Forward.covers(
            ctx.attacker.position,
            ctx.attacker.torso_facing(),
            ctx.target.position(),
        );
        if forward {
            ledger.add_target(1, SECONDARY_TARGET);
        } else {
            ledger.add_target(2, "secondary target outside forward arc");
        }
        if ctx.flag(GameOption::PilotAbilities)
            && ctx.attacker.crew.has(&CrewAbility::MultiTasker)
        {
            ledger.add(-1, MULTI_TASKER);
        }
        let friendly = ctx
            .target_unit()
            .is_some_and(|target| target.is_friendly_to(ctx.attacker));
        if friendly {
            ledger.zero_where(|entry| is_secondary_surcharge(&entry.reason));
        }
    }

    fn indirect(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        let Some(spotter) = self.fire.spotter.and_then(|id| ctx.unit(id)) else {
            return;
        };
        ledger.add(1, "indirect fire");
        if let Some((delta, verb)) = own_movement(&spotter.movement) {
            ledger.add(delta, format!("spotter {verb}"));
        }
        if spotter.is(UnitStatus::ATTACKING) {
            ledger.add(1, "spotter is making an attack");
        }
    }

    fn stealth(ctx: &AttackContext<'_>, weapon: &MountedWeapon, ledger: &mut Ledger) {
        let stealthy = ctx
            .target_unit()
            .is_some_and(|target| target.is(UnitStatus::STEALTH_ACTIVE));
        if !stealthy || !ctx.target_ecm_protected() {
            return;
        }
        match weapon.ranges.bracket(ctx.distance) {
            RangeBracket::Medium => ledger.add_target(1, "stealth armor"),
            RangeBracket::Long | RangeBracket::Extreme => ledger.add_target(2, "stealth armor"),
            RangeBracket::Short | RangeBracket::OutOfRange => {}
        }
    }
}

impl AttackVariant for WeaponAttack {
    fn guards(&self) -> GuardChain<'_> {
        let fire = self.fire;
        let index = fire.weapon;
        common_guards()
            .guard(
                "weapon_destroyed",
                weapon_guard(index, |_, weapon| {
                    Verdict::veto_if(
                        weapon.flags.contains(WeaponFlags::DESTROYED),
                        "Weapon destroyed",
                    )
                }),
            )
            .guard(
                "weapon_jammed",
                weapon_guard(index, |_, weapon| {
                    Verdict::veto_if(weapon.flags.contains(WeaponFlags::JAMMED), "Weapon jammed")
                }),
            )
            .guard(
                "weapon_empty",
                weapon_guard(index, |_, weapon| {
                    Verdict::veto_if(
                        weapon.flags.contains(WeaponFlags::EMPTY),
                        "Weapon out of ammo",
                    )
                }),
            )
            .guard(
                "weapon_fired",
                weapon_guard(index, |_, weapon| {
                    Verdict::veto_if(
                        weapon.flags.contains(WeaponFlags::FIRED),
                        "Weapon already fired this turn",
                    )
                }),
            )
            .guard("swarming_other", |ctx| {
                let target = ctx.target_unit().map(|unit| unit.id);
                Verdict::veto_if(
                    ctx.attacker
                        .swarming
                        .is_some_and(|swarmed| Some(swarmed) != target),
                    "Attacker is swarming another unit",
                )
            })
            .guard("swarm_target", |ctx| {
                let target = ctx.target_unit().map(|unit| unit.id);
                if ctx.attacker.swarming.is_some() && ctx.attacker.swarming == target {
                    Verdict::AutomaticSuccess("Attacker is swarming the target".to_string())
                } else {
                    Verdict::Continue
                }
            })
            .guard("indirect_option", move |ctx| {
                Verdict::veto_if(
                    fire.is_indirect() && !ctx.flag(GameOption::IndirectFire),
                    "Indirect fire option not enabled",
                )
            })
            .guard(
                "indirect_capable",
                weapon_guard(index, move |_, weapon| {
                    Verdict::veto_if(
                        fire.is_indirect() && !weapon.indirect,
                        "Weapon can't fire indirectly",
                    )
                }),
            )
            .guard(
                "spotter_friendly",
                spotter_guard(fire, |ctx, spotter| {
                    Verdict::veto_if(
                        !spotter.is_friendly_to(ctx.attacker),
                        "Spotter is not friendly",
                    )
                }),
            )
            .guard(
                "spotter_shutdown",
                spotter_guard(fire, |_, spotter| {
                    Verdict::veto_if(spotter.is(UnitStatus::SHUTDOWN), "Spotter is shut down")
                }),
            )
            .guard(
                "spotter_los",
                spotter_guard(fire, |ctx, spotter| {
                    Verdict::veto_if(
                        ctx.sight_from(spotter).blocked,
                        "Spotter has no line of sight to target",
                    )
                }),
            )
            .guard("line_of_sight", move |ctx| {
                Verdict::veto_if(
                    !fire.is_indirect() && ctx.los.blocked,
                    "No line of sight to target",
                )
            })
            .guard(
                "leg_weapon_prone",
                weapon_guard(index, |ctx, weapon| {
                    Verdict::veto_if(
                        weapon.location.is_leg() && ctx.attacker.is_prone(),
                        "Can't fire leg-mounted weapons while prone",
                    )
                }),
            )
            .guard(
                "leg_weapon_water",
                weapon_guard(index, |ctx, weapon| {
                    Verdict::veto_if(
                        weapon.location.is_leg()
                            && ctx.attacker.is_mech()
                            && ctx.attacker_hex.has_water(),
                        "Can't fire leg-mounted weapons underwater",
                    )
                }),
            )
            .guard(
                "range",
                weapon_guard(index, |ctx, weapon| {
                    let out = match weapon.ranges.bracket(ctx.distance) {
                        RangeBracket::OutOfRange => true,
                        RangeBracket::Extreme => !ctx.flag(GameOption::TacOpsRange),
                        _ => false,
                    };
                    Verdict::veto_if(out, "Target out of range")
                }),
            )
            .guard(
                "arc",
                weapon_guard(index, |ctx, weapon| {
                    let (arc, facing) = weapon_arc(ctx.attacker, weapon);
                    super::within_arc(ctx, arc, facing)
                }),
            )
            .guard("aimed_shot", move |ctx| {
                let Some(location) = fire.aimed_at else {
                    return Verdict::Continue;
                };
                let Some(target) = ctx.target_unit().filter(|unit| unit.is_mech()) else {
                    return Verdict::impossible("Aimed shots require a mech target");
                };
                if !target.is_immobile() {
                    return Verdict::impossible("Aimed shots require an immobile target");
                }
                let mech_location = matches!(
                    location,
                    Location::Head
                        | Location::CenterTorso
                        | Location::LeftTorso
                        | Location::RightTorso
                        | Location::LeftArm
                        | Location::RightArm
                        | Location::LeftLeg
                        | Location::RightLeg
                );
                Verdict::veto_if(
                    !mech_location || target.is_location_destroyed(location),
                    "Invalid aimed location",
                )
            })
            .guard("adjacent_structure", adjacent_structure)
    }

    fn base(&self, ctx: &AttackContext<'_>) -> Base {
        gunnery_base(ctx)
    }

    fn modifiers(&self, ctx: &AttackContext<'_>, ledger: &mut Ledger) {
        let Some(weapon) = ctx.weapon(self.fire.weapon) else {
            return;
        };

        Self::range_modifiers(ctx, weapon, ledger);
        attacker_movement(ctx, ledger);
        target_movement(ctx, ledger);
        Self::ammunition(ctx, weapon, ledger);

        attacker_terrain(ctx, ledger);
        target_terrain(ctx, ledger);
        if partial_cover(ctx).is_some() {
            ledger.add_target(1, "target has partial cover");
        }
        self.intervening_terrain(ctx, ledger);

        if weapon.to_hit != 0 {
            ledger.add(weapon.to_hit, "weapon accuracy");
        }
        if ctx.attacker.sensor_hits > 0 {
            ledger.add(2 * i32::from(ctx.attacker.sensor_hits), "sensor damage");
        }
        Self::arm_actuators(ctx, weapon, ledger);
        if ctx.attacker.targeting_computer && !self.fire.is_indirect() {
            ledger.add(-1, "targeting computer");
        }
        if ctx.attacker.is_prone() {
            ledger.add(2, "attacker prone");
        }

        let heat = heat_modifier(ctx.attacker.heat, ctx.flag(GameOption::TacOpsHeat));
        if heat > 0 {
            ledger.add(heat, "heat");
        }
        Self::specialists(ctx, weapon, ledger);

        target_type(ctx, ledger);
        if self.fire.aimed_at.is_some() {
            ledger.add_target(3, "aimed shot");
        }
        self.secondary_target(ctx, ledger);
        self.indirect(ctx, ledger);
        Self::stealth(ctx, weapon, ledger);
    }

    fn classify(&self, ctx: &AttackContext<'_>) -> Classification {
        let mut classification = Classification::new(HitTable::Normal, geometric_side(ctx));
        classification.aimed_location = self.fire.aimed_at;
        let Some(target) = ctx.target_unit() else {
            return classification;
        };
        if ctx.attacker.swarming == Some(target.id) {
            classification.hit_table = HitTable::Swarm;
            return classification;
        }
        if let Some(cover) = partial_cover(ctx) {
            classification.hit_table = HitTable::PartialCover;
            classification.cover = Some(cover);
        } else if ctx.los.interior_building.is_some() {
            let delta = ctx.elevation_delta();
            if delta < 0 {
                classification.hit_table = HitTable::Above;
            } else if delta > 0 {
                classification.hit_table = HitTable::Below;
            }
        }
        classification
    }
}
