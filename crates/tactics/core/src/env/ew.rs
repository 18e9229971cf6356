use crate::state::{HexCoord, TeamId};

/// Electronic warfare coverage.
pub trait EwOracle: Send + Sync {
    /// Returns true when `coord` lies inside an ECM field fielded by `team`.
    fn ecm_protected(&self, coord: HexCoord, team: TeamId) -> bool;
}

/// Bubble of electronic countermeasures projected by one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcmField {
    pub center: HexCoord,
    pub radius: u32,
    pub team: TeamId,
}

impl EcmField {
    pub const fn new(center: HexCoord, radius: u32, team: TeamId) -> Self {
        Self {
            center,
            radius,
            team,
        }
    }

    pub fn covers(&self, coord: HexCoord) -> bool {
        self.center.distance(coord) <= self.radius
    }
}

impl EwOracle for Vec<EcmField> {
    fn ecm_protected(&self, coord: HexCoord, team: TeamId) -> bool {
        self.iter()
            .any(|field| field.team == team && field.covers(coord))
    }
}
