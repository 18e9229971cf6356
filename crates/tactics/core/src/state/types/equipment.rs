//! Body locations, actuators and mounted equipment.
//!
//! The attack engine only reads this data. Damage application elsewhere is
//! responsible for flipping the destroyed flags.

use bitflags::bitflags;

use super::UnitKind;

/// Body location of a mech or section of a vehicle.
///
/// Quad mechs use the arm locations for their front legs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Location {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Front,
    LeftSide,
    RightSide,
    Rear,
    Turret,
    Body,
}

impl Location {
    pub const fn is_arm(self) -> bool {
        matches!(self, Location::LeftArm | Location::RightArm)
    }

    pub const fn is_leg(self) -> bool {
        matches!(self, Location::LeftLeg | Location::RightLeg)
    }

    /// Leg locations for the given unit kind. Quads stand on their arm locations too.
    pub fn legs(kind: UnitKind) -> &'static [Location] {
        match kind {
            UnitKind::QuadMech => &[
                Location::LeftArm,
                Location::RightArm,
                Location::LeftLeg,
                Location::RightLeg,
            ],
            UnitKind::BipedMech => &[Location::LeftLeg, Location::RightLeg],
            _ => &[],
        }
    }
}

bitflags! {
    /// Joint and manipulator systems fitted to a limb.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Actuators: u8 {
        const SHOULDER  = 1 << 0;
        const UPPER_ARM = 1 << 1;
        const LOWER_ARM = 1 << 2;
        const HAND      = 1 << 3;
        const HIP       = 1 << 4;
        const UPPER_LEG = 1 << 5;
        const LOWER_LEG = 1 << 6;
        const FOOT      = 1 << 7;

        const ARM = Self::SHOULDER.bits() | Self::UPPER_ARM.bits() | Self::LOWER_ARM.bits() | Self::HAND.bits();
        const LEG = Self::HIP.bits() | Self::UPPER_LEG.bits() | Self::LOWER_LEG.bits() | Self::FOOT.bits();
    }
}

impl Actuators {
    /// Factory-standard actuator fit for a location.
    pub fn standard(kind: UnitKind, location: Location) -> Self {
        match kind {
            UnitKind::BipedMech if location.is_arm() => Actuators::ARM,
            UnitKind::BipedMech | UnitKind::QuadMech if location.is_leg() => Actuators::LEG,
            UnitKind::QuadMech if location.is_arm() => Actuators::LEG,
            _ => Actuators::empty(),
        }
    }
}

/// Damage state of a single location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationState {
    pub location: Location,
    /// The whole location has been blown off.
    #[cfg_attr(feature = "serde", serde(default))]
    pub destroyed: bool,
    /// Actuators the location was built with.
    pub fitted: Actuators,
    /// Fitted actuators that have taken a critical hit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damaged: Actuators,
}

impl LocationState {
    pub fn intact(kind: UnitKind, location: Location) -> Self {
        Self {
            location,
            destroyed: false,
            fitted: Actuators::standard(kind, location),
            damaged: Actuators::empty(),
        }
    }

    #[must_use]
    pub fn with_damaged(mut self, actuators: Actuators) -> Self {
        self.damaged |= actuators;
        self
    }

    #[must_use]
    pub fn without(mut self, actuators: Actuators) -> Self {
        self.fitted.remove(actuators);
        self
    }

    #[must_use]
    pub fn blown_off(mut self) -> Self {
        self.destroyed = true;
        self
    }

    /// Actuator is fitted and undamaged.
    pub fn is_working(&self, actuator: Actuators) -> bool {
        !self.destroyed && self.fitted.contains(actuator) && !self.damaged.contains(actuator)
    }

    /// Actuator was never fitted or has been destroyed.
    pub fn is_lost(&self, actuator: Actuators) -> bool {
        !self.is_working(actuator)
    }

    /// Actuator was fitted and has since been destroyed.
    pub fn is_damaged(&self, actuator: Actuators) -> bool {
        self.fitted.contains(actuator) && (self.destroyed || self.damaged.contains(actuator))
    }
}

/// Broad weapon family, used by gunnery specializations.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponClass {
    Energy,
    Ballistic,
    Missile,
    Artillery,
}

/// Ammunition loaded into a weapon.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AmmoKind {
    #[default]
    Standard,
    Precision,
    Swarm,
    SemiGuided,
}

/// Range band of a weapon, in hexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeBands {
    #[cfg_attr(feature = "serde", serde(default))]
    pub minimum: u8,
    pub short: u8,
    pub medium: u8,
    pub long: u8,
}

impl RangeBands {
    pub const fn new(minimum: u8, short: u8, medium: u8, long: u8) -> Self {
        Self {
            minimum,
            short,
            medium,
            long,
        }
    }

    /// Extreme range reaches as far past long range as medium range does.
    pub const fn extreme(&self) -> u8 {
        self.long
            .saturating_add(self.long.saturating_sub(self.medium))
    }

    pub fn bracket(&self, distance: u32) -> RangeBracket {
        if distance <= u32::from(self.short) {
            RangeBracket::Short
        } else if distance <= u32::from(self.medium) {
            RangeBracket::Medium
        } else if distance <= u32::from(self.long) {
            RangeBracket::Long
        } else if distance <= u32::from(self.extreme()) {
            RangeBracket::Extreme
        } else {
            RangeBracket::OutOfRange
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RangeBracket {
    Short,
    Medium,
    Long,
    Extreme,
    OutOfRange,
}

impl RangeBracket {
    pub const fn modifier(self) -> i32 {
        match self {
            RangeBracket::Short => 0,
            RangeBracket::Medium => 2,
            RangeBracket::Long => 4,
            RangeBracket::Extreme | RangeBracket::OutOfRange => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RangeBracket::Short => "short range",
            RangeBracket::Medium => "medium range",
            RangeBracket::Long => "long range",
            RangeBracket::Extreme | RangeBracket::OutOfRange => "extreme range",
        }
    }
}

bitflags! {
    /// Per-turn and damage state of a mounted weapon.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WeaponFlags: u8 {
        const DESTROYED = 1 << 0;
        const JAMMED    = 1 << 1;
        const EMPTY     = 1 << 2;
        /// Already declared against a target this turn.
        const FIRED     = 1 << 3;
    }
}

/// A ranged weapon mounted on a unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountedWeapon {
    pub name: String,
    pub class: WeaponClass,
    pub location: Location,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rear_mounted: bool,
    pub ranges: RangeBands,
    /// Inherent accuracy modifier of the weapon itself.
    #[cfg_attr(feature = "serde", serde(default))]
    pub to_hit: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo: AmmoKind,
    /// Can fire at targets outside line of sight with a spotter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub indirect: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: WeaponFlags,
}

impl MountedWeapon {
    pub fn new(
        name: impl Into<String>,
        class: WeaponClass,
        location: Location,
        ranges: RangeBands,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            location,
            rear_mounted: false,
            ranges,
            to_hit: 0,
            ammo: AmmoKind::Standard,
            indirect: false,
            flags: WeaponFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_ammo(mut self, ammo: AmmoKind) -> Self {
        self.ammo = ammo;
        self
    }

    #[must_use]
    pub fn with_to_hit(mut self, to_hit: i32) -> Self {
        self.to_hit = to_hit;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: WeaponFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn indirect_capable(mut self) -> Self {
        self.indirect = true;
        self
    }

    #[must_use]
    pub fn rear(mut self) -> Self {
        self.rear_mounted = true;
        self
    }
}

/// Kind of melee weapon or improvised club.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClubKind {
    Hatchet,
    Sword,
    Mace,
    /// A tree, girder or limb picked up from the battlefield.
    Improvised,
}

impl ClubKind {
    pub const fn accuracy(self) -> i32 {
        match self {
            ClubKind::Hatchet => -1,
            ClubKind::Sword => -2,
            ClubKind::Mace => 1,
            ClubKind::Improvised => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountedClub {
    pub kind: ClubKind,
    pub location: Location,
    #[cfg_attr(feature = "serde", serde(default))]
    pub destroyed: bool,
}

impl MountedClub {
    pub const fn new(kind: ClubKind, location: Location) -> Self {
        Self {
            kind,
            location,
            destroyed: false,
        }
    }
}
