//! Modifier clauses shared by several attack variants.
//!
//! Each clause appends zero or more entries to the ledger. Callers decide the
//! order; clauses never look ahead.

use super::context::AttackContext;
use super::record::{Base, Ledger, Modifier};
use crate::config::GameOption;
use crate::state::{
    Actuators, CrewAbility, Location, MovementMode, MovementReport, Smoke, UnitKind, UnitState,
    Woods,
};

pub(crate) const TARGET_MOVED: &str = "target moved";
pub(crate) const TARGET_JUMPED: &str = "target jumped";

/// Physical attacks roll against piloting unless a fixed base is configured.
pub(crate) fn physical_base(ctx: &AttackContext<'_>) -> Base {
    let fixed = ctx.int(GameOption::FixedPhysicalBase);
    if fixed > 0 {
        Base::new(fixed, "fixed physical base")
    } else {
        Base::new(i32::from(ctx.attacker.crew.piloting), "piloting skill")
    }
}

pub(crate) fn gunnery_base(ctx: &AttackContext<'_>) -> Base {
    Base::new(i32::from(ctx.attacker.crew.gunnery), "gunnery skill")
}

/// Penalty a mover imposes on its own attacks.
pub(crate) fn own_movement(movement: &MovementReport) -> Option<(i32, &'static str)> {
    match movement.mode {
        MovementMode::Stationary => None,
        MovementMode::Walked => Some((1, "walked")),
        MovementMode::Ran => Some((2, "ran")),
        MovementMode::Jumped => Some((3, "jumped")),
    }
}

pub(crate) fn attacker_movement(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    if let Some((delta, verb)) = own_movement(&ctx.attacker.movement) {
        ledger.add(delta, format!("attacker {verb}"));
    }
}

/// Target movement modifier by hexes moved.
pub(crate) const fn hexes_moved_modifier(hexes: u8) -> i32 {
    match hexes {
        0..=2 => 0,
        3..=4 => 1,
        5..=6 => 2,
        7..=9 => 3,
        10..=17 => 4,
        18..=24 => 5,
        _ => 6,
    }
}

pub(crate) fn target_movement(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    let Some(target) = ctx.target_unit() else {
        return;
    };
    if target.is_immobile() {
        return;
    }
    let moved = hexes_moved_modifier(target.movement.hexes);
    if moved != 0 {
        ledger.add_target(
            moved,
            format!("{TARGET_MOVED} {} hexes", target.movement.hexes),
        );
    }
    if target.movement.jumped() {
        ledger.add_target(1, TARGET_JUMPED);
    }
}

/// Entry appended by [`target_movement`].
pub(crate) fn is_target_movement(entry: &Modifier) -> bool {
    entry.reason.starts_with(TARGET_MOVED) || entry.reason == TARGET_JUMPED
}

pub(crate) fn attacker_terrain(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    if ctx.attacker_hex.has_water() {
        ledger.add(1, "attacker in water");
    }
}

pub(crate) fn target_terrain(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    if ctx.target_unit().is_none() {
        return;
    }
    let hex = ctx.target.hex;
    if let Some(woods) = hex.woods {
        let label = match woods {
            Woods::Light => "target in light woods",
            Woods::Heavy => "target in heavy woods",
            Woods::Ultra => "target in ultra-heavy woods",
        };
        ledger.add_target(woods.density(), label);
    }
    if let Some(smoke) = hex.smoke {
        let label = match smoke {
            Smoke::Light => "target in light smoke",
            Smoke::Heavy => "target in heavy smoke",
        };
        ledger.add_target(smoke.density(), label);
    }
}

/// Penalties for lost actuators on the limb doing the work.
pub(crate) fn limb_damage(
    unit: &UnitState,
    location: Location,
    penalties: &[(Actuators, i32, &str)],
    ledger: &mut Ledger,
) {
    let state = unit.location(location);
    for (actuator, delta, label) in penalties {
        if state.is_lost(*actuator) {
            ledger.add(*delta, format!("{} {label}", side_name(location)));
        }
    }
}

fn side_name(location: Location) -> &'static str {
    match location {
        Location::LeftArm | Location::LeftLeg | Location::LeftTorso | Location::LeftSide => "left",
        Location::RightArm | Location::RightLeg | Location::RightTorso | Location::RightSide => {
            "right"
        }
        _ => "center",
    }
}

pub(crate) fn melee_specialist(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    if ctx.flag(GameOption::PilotAbilities)
        && ctx.attacker.crew.has(&CrewAbility::MeleeSpecialist)
    {
        ledger.add(-1, "melee specialist");
    }
}

/// Size, posture and mobility of the target.
pub(crate) fn target_type(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    let Some(target) = ctx.target_unit() else {
        ledger.add_target(-4, "immobile target");
        return;
    };
    if target.is_prone() {
        if ctx.distance <= 1 {
            ledger.add_target(-2, "target prone and adjacent");
        } else {
            ledger.add_target(1, "target prone at range");
        }
    }
    if target.is_immobile() {
        ledger.add_target(-4, "target immobile");
    }
    match target.kind {
        UnitKind::BattleArmor => ledger.add_target(1, "battle armor target"),
        UnitKind::ProtoMech => ledger.add_target(1, "protomech target"),
        _ => {}
    }
}

pub(crate) fn piloting_differential(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    let Some(target) = ctx.target_unit() else {
        return;
    };
    let delta = i32::from(ctx.attacker.crew.piloting) - i32::from(target.crew.piloting);
    if delta != 0 {
        ledger.add_target(delta, "piloting skill differential");
    }
}

pub(crate) fn weight_class_difference(ctx: &AttackContext<'_>, ledger: &mut Ledger) {
    let Some(target) = ctx.target_unit() else {
        return;
    };
    let delta = target.weight_class().rank() - ctx.attacker.weight_class().rank();
    if delta != 0 {
        ledger.add_target(delta, "weight class difference");
    }
}
