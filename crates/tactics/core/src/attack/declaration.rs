//! Attack declarations supplied by the caller.

use crate::state::{EntityId, HexCoord, Location};

/// What the attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    Unit(EntityId),
    Building(HexCoord),
    FuelTank(HexCoord),
    /// Bare hex, e.g. for area-effect fire.
    Hex(HexCoord),
}

impl TargetRef {
    pub const fn unit(self) -> Option<EntityId> {
        match self {
            TargetRef::Unit(id) => Some(id),
            _ => None,
        }
    }
}

impl core::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TargetRef::Unit(id) => write!(f, "unit {id}"),
            TargetRef::Building(coord) => write!(f, "building at {coord}"),
            TargetRef::FuelTank(coord) => write!(f, "fuel tank at {coord}"),
            TargetRef::Hex(coord) => write!(f, "hex {coord}"),
        }
    }
}

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
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn arm(self) -> Location {
        match self {
            Side::Left => Location::LeftArm,
            Side::Right => Location::RightArm,
        }
    }

    pub const fn leg(self) -> Location {
        match self {
            Side::Left => Location::LeftLeg,
            Side::Right => Location::RightLeg,
        }
    }
}

/// Parameters of a ranged weapon attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponFire {
    /// Index into the attacker's mounted weapons.
    pub weapon: usize,
    /// Primary target of the attacker this turn. Firing at anything else is a
    /// secondary-target attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_target: Option<TargetRef>,
    /// Friendly unit spotting for indirect fire.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spotter: Option<EntityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aimed_at: Option<Location>,
}

impl WeaponFire {
    pub const fn new(weapon: usize) -> Self {
        Self {
            weapon,
            primary_target: None,
            spotter: None,
            aimed_at: None,
        }
    }

    #[must_use]
    pub const fn secondary_to(mut self, primary: TargetRef) -> Self {
        self.primary_target = Some(primary);
        self
    }

    #[must_use]
    pub const fn spotted_by(mut self, spotter: EntityId) -> Self {
        self.spotter = Some(spotter);
        self
    }

    #[must_use]
    pub const fn aimed_at(mut self, location: Location) -> Self {
        self.aimed_at = Some(location);
        self
    }

    pub const fn is_indirect(&self) -> bool {
        self.spotter.is_some()
    }
}

/// Closed set of attack variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackKind {
    WeaponFire(WeaponFire),
    /// Swarm missiles that missed `original_target` redirected onto a unit next to it.
    SwarmRetarget {
        weapon: usize,
        original_target: EntityId,
    },
    Punch {
        arm: Side,
    },
    Kick {
        leg: Side,
    },
    Club {
        club: usize,
    },
    Push,
    Charge,
    DeathFromAbove,
    Grapple,
}

impl AttackKind {
    pub const fn is_physical(&self) -> bool {
        !matches!(
            self,
            AttackKind::WeaponFire(_) | AttackKind::SwarmRetarget { .. }
        )
    }
}

/// One attack order as declared by a player or AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackDeclaration {
    pub attacker: EntityId,
    pub target: TargetRef,
    pub kind: AttackKind,
}

impl AttackDeclaration {
    pub const fn new(attacker: EntityId, target: TargetRef, kind: AttackKind) -> Self {
        Self {
            attacker,
            target,
            kind,
        }
    }

    pub const fn weapon(attacker: EntityId, target: TargetRef, fire: WeaponFire) -> Self {
        Self::new(attacker, target, AttackKind::WeaponFire(fire))
    }
}

impl core::fmt::Display for AttackDeclaration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.attacker,
            self.target,
            self.kind.as_ref()
        )
    }
}
