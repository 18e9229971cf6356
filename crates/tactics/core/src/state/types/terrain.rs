use super::HexCoord;

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
pub enum Woods {
    Light,
    Heavy,
    Ultra,
}

impl Woods {
    /// Line-of-sight points and to-hit penalty of standing in or shooting through these woods.
    pub const fn density(self) -> i32 {
        match self {
            Woods::Light => 1,
            Woods::Heavy => 2,
            Woods::Ultra => 3,
        }
    }
}

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
pub enum Smoke {
    Light,
    Heavy,
}

impl Smoke {
    pub const fn density(self) -> i32 {
        match self {
            Smoke::Light => 1,
            Smoke::Heavy => 2,
        }
    }
}

/// Building occupying a hex. Buildings spanning several hexes share an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingInfo {
    pub id: u32,
    /// Construction class, 1 (light) to 4 (hardened).
    pub class: u8,
    /// Levels above the hex surface.
    pub height: i32,
}

/// Static terrain of a single board hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexState {
    pub coord: HexCoord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub woods: Option<Woods>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub smoke: Option<Smoke>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub water_depth: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub building: Option<BuildingInfo>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_tank: bool,
}

impl HexState {
    /// A clear hex at ground level.
    pub const fn clear(coord: HexCoord) -> Self {
        Self {
            coord,
            level: 0,
            woods: None,
            smoke: None,
            water_depth: 0,
            building: None,
            fuel_tank: false,
        }
    }

    #[must_use]
    pub const fn at_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub const fn with_woods(mut self, woods: Woods) -> Self {
        self.woods = Some(woods);
        self
    }

    #[must_use]
    pub const fn with_smoke(mut self, smoke: Smoke) -> Self {
        self.smoke = Some(smoke);
        self
    }

    #[must_use]
    pub const fn with_water(mut self, depth: u8) -> Self {
        self.water_depth = depth;
        self
    }

    #[must_use]
    pub const fn with_building(mut self, building: BuildingInfo) -> Self {
        self.building = Some(building);
        self
    }

    #[must_use]
    pub const fn with_fuel_tank(mut self) -> Self {
        self.fuel_tank = true;
        self
    }

    /// Highest point of the hex: terrain plus any building standing on it.
    pub fn ceiling(&self) -> i32 {
        self.level + self.building.map_or(0, |building| building.height)
    }

    pub const fn has_water(&self) -> bool {
        self.water_depth > 0
    }

    /// Woods and smoke points that hinder line of sight through this hex.
    pub fn obstruction(&self) -> i32 {
        self.woods.map_or(0, Woods::density) + self.smoke.map_or(0, Smoke::density)
    }
}
