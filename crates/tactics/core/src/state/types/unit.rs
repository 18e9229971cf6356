//! Unit state as seen by the attack engine.

use bitflags::bitflags;

use super::{
    Actuators, EntityId, Facing, HexCoord, Location, LocationState, MountedClub, MountedWeapon,
    TeamId, WeaponClass,
};

/// Chassis family of a unit.
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
pub enum UnitKind {
    BipedMech,
    QuadMech,
    Vehicle,
    ProtoMech,
    BattleArmor,
    Infantry,
}

impl UnitKind {
    pub const fn is_mech(self) -> bool {
        matches!(self, UnitKind::BipedMech | UnitKind::QuadMech)
    }

    pub const fn is_infantry(self) -> bool {
        matches!(self, UnitKind::BattleArmor | UnitKind::Infantry)
    }
}

/// Weight class derived from tonnage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum WeightClass {
    Ultralight,
    Light,
    Medium,
    Heavy,
    Assault,
    SuperHeavy,
}

impl WeightClass {
    pub const fn from_tonnage(tons: u16) -> Self {
        match tons {
            0..20 => WeightClass::Ultralight,
            20..40 => WeightClass::Light,
            40..60 => WeightClass::Medium,
            60..80 => WeightClass::Heavy,
            80..=100 => WeightClass::Assault,
            _ => WeightClass::SuperHeavy,
        }
    }

    pub const fn rank(self) -> i32 {
        self as i32
    }
}

bitflags! {
    /// Transient conditions of a unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitStatus: u8 {
        const PRONE          = 1 << 0;
        const SHUTDOWN       = 1 << 1;
        const IMMOBILE       = 1 << 2;
        const HULL_DOWN      = 1 << 3;
        const DESTROYED      = 1 << 4;
        const STEALTH_ACTIVE = 1 << 5;
        /// Illuminated by a friendly target designator this turn.
        const TAGGED         = 1 << 6;
        /// Already declared an attack this turn.
        const ATTACKING      = 1 << 7;
    }
}

/// Special pilot abilities that affect accuracy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrewAbility {
    MeleeSpecialist,
    Sniper,
    MultiTasker,
    /// Specialized in one named weapon.
    WeaponSpecialist(String),
    /// Specialized in one weapon family; every other family suffers.
    GunnerySpecialist(WeaponClass),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crew {
    pub gunnery: u8,
    pub piloting: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<CrewAbility>,
}

impl Crew {
    pub fn new(gunnery: u8, piloting: u8) -> Self {
        Self {
            gunnery,
            piloting,
            abilities: Vec::new(),
        }
    }

    pub fn has(&self, ability: &CrewAbility) -> bool {
        self.abilities.contains(ability)
    }
}

impl Default for Crew {
    fn default() -> Self {
        Self::new(4, 5)
    }
}

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
pub enum MovementMode {
    #[default]
    Stationary,
    Walked,
    Ran,
    Jumped,
}

/// Movement the unit performed during the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementReport {
    pub mode: MovementMode,
    pub hexes: u8,
}

impl MovementReport {
    pub const fn new(mode: MovementMode, hexes: u8) -> Self {
        Self { mode, hexes }
    }

    pub const fn jumped(&self) -> bool {
        matches!(self.mode, MovementMode::Jumped)
    }
}

/// Two units locked together by a grapple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrappleLink {
    pub partner: EntityId,
    /// This unit started the grapple.
    pub initiator: bool,
}

/// Complete read-only state of one unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: EntityId,
    pub name: String,
    pub team: TeamId,
    pub kind: UnitKind,
    pub tonnage: u16,
    pub position: HexCoord,
    /// Levels above the surface of the hex it stands in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facing: Facing,
    /// Torso twist. Equal to `facing` for units without a rotating torso.
    #[cfg_attr(feature = "serde", serde(default))]
    pub torso_facing: Option<Facing>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: UnitStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crew: Crew,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: MovementReport,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heat: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sensor_hits: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub targeting_computer: bool,
    /// Only damaged locations need to be listed; absent ones are intact.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locations: Vec<LocationState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<MountedWeapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub clubs: Vec<MountedClub>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grapple: Option<GrappleLink>,
    /// Unit this battle armor squad is swarming.
    #[cfg_attr(feature = "serde", serde(default))]
    pub swarming: Option<EntityId>,
}

impl UnitState {
    pub fn new(id: EntityId, kind: UnitKind, position: HexCoord) -> Self {
        Self {
            id,
            name: format!("{kind} {}", id.0),
            team: TeamId::default(),
            kind,
            tonnage: 50,
            position,
            elevation: 0,
            facing: Facing::North,
            torso_facing: None,
            status: UnitStatus::empty(),
            crew: Crew::default(),
            movement: MovementReport::default(),
            heat: 0,
            sensor_hits: 0,
            targeting_computer: false,
            locations: Vec::new(),
            weapons: Vec::new(),
            clubs: Vec::new(),
            grapple: None,
            swarming: None,
        }
    }

    pub fn is_mech(&self) -> bool {
        self.kind.is_mech()
    }

    pub fn is(&self, status: UnitStatus) -> bool {
        self.status.contains(status)
    }

    pub fn is_prone(&self) -> bool {
        self.is(UnitStatus::PRONE)
    }

    pub fn is_immobile(&self) -> bool {
        self.status
            .intersects(UnitStatus::IMMOBILE | UnitStatus::SHUTDOWN)
    }

    pub fn weight_class(&self) -> WeightClass {
        WeightClass::from_tonnage(self.tonnage)
    }

    pub fn torso_facing(&self) -> Facing {
        self.torso_facing.unwrap_or(self.facing)
    }

    /// Levels the unit occupies above its base. Standing mechs are two levels tall.
    pub fn height(&self) -> i32 {
        if self.is_mech() && !self.is_prone() { 1 } else { 0 }
    }

    /// Damage state of a location, falling back to an intact factory fit.
    pub fn location(&self, location: Location) -> LocationState {
        self.locations
            .iter()
            .find(|state| state.location == location)
            .copied()
            .unwrap_or_else(|| LocationState::intact(self.kind, location))
    }

    pub fn is_location_destroyed(&self, location: Location) -> bool {
        self.location(location).destroyed
    }

    pub fn actuator_working(&self, location: Location, actuator: Actuators) -> bool {
        self.location(location).is_working(actuator)
    }

    /// A weapon mounted in this location was fired this turn.
    pub fn fired_from(&self, location: Location) -> bool {
        self.weapons.iter().any(|weapon| {
            weapon.location == location && weapon.flags.contains(super::WeaponFlags::FIRED)
        })
    }

    pub fn is_friendly_to(&self, other: &UnitState) -> bool {
        self.team == other.team
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn on_team(mut self, team: TeamId) -> Self {
        self.team = team;
        self
    }

    #[must_use]
    pub fn with_tonnage(mut self, tonnage: u16) -> Self {
        self.tonnage = tonnage;
        self
    }

    #[must_use]
    pub fn facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status |= status;
        self
    }

    #[must_use]
    pub fn with_crew(mut self, crew: Crew) -> Self {
        self.crew = crew;
        self
    }

    #[must_use]
    pub fn with_movement(mut self, movement: MovementReport) -> Self {
        self.movement = movement;
        self
    }

    #[must_use]
    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    #[must_use]
    pub fn with_heat(mut self, heat: u8) -> Self {
        self.heat = heat;
        self
    }

    #[must_use]
    pub fn with_location(mut self, state: LocationState) -> Self {
        self.locations.retain(|existing| existing.location != state.location);
        self.locations.push(state);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: MountedWeapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    #[must_use]
    pub fn with_club(mut self, club: MountedClub) -> Self {
        self.clubs.push(club);
        self
    }

    #[must_use]
    pub fn grappling(mut self, link: GrappleLink) -> Self {
        self.grapple = Some(link);
        self
    }

    #[must_use]
    pub fn swarming(mut self, target: EntityId) -> Self {
        self.swarming = Some(target);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_class_boundaries() {
        assert_eq!(WeightClass::from_tonnage(15), WeightClass::Ultralight);
        assert_eq!(WeightClass::from_tonnage(35), WeightClass::Light);
        assert_eq!(WeightClass::from_tonnage(55), WeightClass::Medium);
        assert_eq!(WeightClass::from_tonnage(75), WeightClass::Heavy);
        assert_eq!(WeightClass::from_tonnage(100), WeightClass::Assault);
        assert_eq!(WeightClass::from_tonnage(150), WeightClass::SuperHeavy);
    }

    #[test]
    fn standing_mechs_are_one_level_tall() {
        let mech = UnitState::new(EntityId(1), UnitKind::BipedMech, HexCoord::new(0, 0));
        assert_eq!(mech.height(), 1);
        assert_eq!(mech.clone().with_status(UnitStatus::PRONE).height(), 0);

        let tank = UnitState::new(EntityId(2), UnitKind::Vehicle, HexCoord::new(0, 0));
        assert_eq!(tank.height(), 0);
    }

    #[test]
    fn unlisted_locations_are_intact() {
        let mech = UnitState::new(EntityId(1), UnitKind::BipedMech, HexCoord::new(0, 0))
            .with_location(
                LocationState::intact(UnitKind::BipedMech, Location::LeftLeg)
                    .with_damaged(Actuators::HIP),
            );
        assert!(mech.actuator_working(Location::RightLeg, Actuators::HIP));
        assert!(!mech.actuator_working(Location::LeftLeg, Actuators::HIP));
    }

    #[test]
    fn shutdown_units_count_as_immobile() {
        let mech = UnitState::new(EntityId(1), UnitKind::BipedMech, HexCoord::new(0, 0))
            .with_status(UnitStatus::SHUTDOWN);
        assert!(mech.is_immobile());
    }
}
