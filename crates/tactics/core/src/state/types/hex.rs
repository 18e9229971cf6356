//! Hex grid geometry.
//!
//! Boards use an odd-q offset layout: odd columns sit half a hex further south
//! than even columns. Distances are computed in cube space and bearings are
//! measured clockwise from north between hex centres, rounded to whole degrees
//! so arc boundaries are stable.

/// Offset coordinate of a single hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub col: i32,
    pub row: i32,
}

impl HexCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    fn to_cube(self) -> Cube {
        let x = self.col;
        let z = self.row - (self.col - (self.col & 1)) / 2;
        Cube { x, y: -x - z, z }
    }

    fn from_cube(cube: Cube) -> Self {
        let col = cube.x;
        let row = cube.z + (cube.x - (cube.x & 1)) / 2;
        Self { col, row }
    }

    /// Number of hex steps between two coordinates.
    pub fn distance(self, other: HexCoord) -> u32 {
        let a = self.to_cube();
        let b = other.to_cube();
        let dx = (a.x - b.x).unsigned_abs();
        let dy = (a.y - b.y).unsigned_abs();
        let dz = (a.z - b.z).unsigned_abs();
        dx.max(dy).max(dz)
    }

    /// Adjacent hex in the given direction.
    pub fn neighbor(self, direction: Facing) -> HexCoord {
        let odd = self.col & 1 == 1;
        let (dc, dr) = match (direction, odd) {
            (Facing::North, _) => (0, -1),
            (Facing::South, _) => (0, 1),
            (Facing::NorthEast, false) => (1, -1),
            (Facing::NorthEast, true) => (1, 0),
            (Facing::SouthEast, false) => (1, 0),
            (Facing::SouthEast, true) => (1, 1),
            (Facing::SouthWest, false) => (-1, 0),
            (Facing::SouthWest, true) => (-1, 1),
            (Facing::NorthWest, false) => (-1, -1),
            (Facing::NorthWest, true) => (-1, 0),
        };
        HexCoord::new(self.col + dc, self.row + dr)
    }

    pub fn neighbors(self) -> impl Iterator<Item = HexCoord> {
        Facing::ALL.into_iter().map(move |facing| self.neighbor(facing))
    }

    fn center(self) -> (f64, f64) {
        let x = 1.5 * f64::from(self.col);
        let y = 3f64.sqrt() * (f64::from(self.row) + 0.5 * f64::from(self.col & 1));
        (x, y)
    }

    /// Clockwise bearing in whole degrees (`0..360`) from this hex towards `other`.
    ///
    /// Identical coordinates have a bearing of 0.
    pub fn bearing_to(self, other: HexCoord) -> u16 {
        if self == other {
            return 0;
        }
        let (x0, y0) = self.center();
        let (x1, y1) = other.center();
        let degrees = (x1 - x0).atan2(y0 - y1).to_degrees().round() as i32;
        degrees.rem_euclid(360) as u16
    }

    /// Bearing towards `other` relative to a facing, in `0..360`.
    pub fn relative_bearing(self, facing: Facing, other: HexCoord) -> u16 {
        let absolute = i32::from(self.bearing_to(other));
        (absolute - i32::from(facing.degrees())).rem_euclid(360) as u16
    }

    /// Hexes crossed by a straight line from `self` to `other`, endpoints included.
    pub fn line_to(self, other: HexCoord) -> Vec<HexCoord> {
        let n = self.distance(other);
        if n == 0 {
            return vec![self];
        }
        let a = self.to_cube();
        let b = other.to_cube();
        // Nudge off hex edges so ties resolve consistently.
        let (ax, ay, az) = (
            f64::from(a.x) + 1e-6,
            f64::from(a.y) + 1e-6,
            f64::from(a.z) - 2e-6,
        );
        let (bx, by, bz) = (
            f64::from(b.x) + 1e-6,
            f64::from(b.y) + 1e-6,
            f64::from(b.z) - 2e-6,
        );
        (0..=n)
            .map(|i| {
                let t = f64::from(i) / f64::from(n);
                let cube = Cube::round(ax + (bx - ax) * t, ay + (by - ay) * t, az + (bz - az) * t);
                HexCoord::from_cube(cube)
            })
            .collect()
    }
}

impl core::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cube {
    x: i32,
    y: i32,
    z: i32,
}

impl Cube {
    fn round(x: f64, y: f64, z: f64) -> Self {
        let mut rx = x.round();
        let mut ry = y.round();
        let mut rz = z.round();
        let dx = (rx - x).abs();
        let dy = (ry - y).abs();
        let dz = (rz - z).abs();
        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }
        Self {
            x: rx as i32,
            y: ry as i32,
            z: rz as i32,
        }
    }
}

/// One of the six hex directions a unit can face.
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
pub enum Facing {
    #[default]
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::North,
        Facing::NorthEast,
        Facing::SouthEast,
        Facing::South,
        Facing::SouthWest,
        Facing::NorthWest,
    ];

    pub const fn index(self) -> u8 {
        match self {
            Facing::North => 0,
            Facing::NorthEast => 1,
            Facing::SouthEast => 2,
            Facing::South => 3,
            Facing::SouthWest => 4,
            Facing::NorthWest => 5,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 6) as usize]
    }

    pub const fn degrees(self) -> u16 {
        self.index() as u16 * 60
    }

    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Firing arc of a mounted weapon or limb, relative to the unit's facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Arc {
    Forward,
    LeftArm,
    RightArm,
    Rear,
    LeftSide,
    RightSide,
    Turret,
}

impl Arc {
    /// Returns true when a target at `relative_bearing` lies inside this arc.
    pub const fn contains(self, relative_bearing: u16) -> bool {
        let b = relative_bearing % 360;
        match self {
            Arc::Forward => b <= 60 || b >= 300,
            Arc::LeftArm => b >= 240 || b <= 60,
            Arc::RightArm => b >= 300 || b <= 120,
            Arc::Rear => b > 120 && b < 240,
            Arc::LeftSide => b >= 180 || b == 0,
            Arc::RightSide => b <= 180,
            Arc::Turret => true,
        }
    }

    /// Arc test between two positions. A target in the attacker's own hex is
    /// inside every arc.
    pub fn covers(self, from: HexCoord, facing: Facing, to: HexCoord) -> bool {
        from == to || self.contains(from.relative_bearing(facing, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_counts_hex_steps() {
        let origin = HexCoord::new(0, 0);
        assert_eq!(origin.distance(origin), 0);
        assert_eq!(origin.distance(HexCoord::new(0, 3)), 3);
        assert_eq!(origin.distance(HexCoord::new(3, 0)), 3);
        assert_eq!(HexCoord::new(1, 1).distance(HexCoord::new(2, 1)), 1);
        assert_eq!(HexCoord::new(1, 1).distance(HexCoord::new(2, 0)), 2);
    }

    #[test]
    fn neighbors_are_adjacent_in_both_column_parities() {
        for origin in [HexCoord::new(4, 4), HexCoord::new(5, 4)] {
            for neighbor in origin.neighbors() {
                assert_eq!(origin.distance(neighbor), 1, "{origin} -> {neighbor}");
            }
        }
    }

    #[test]
    fn bearing_to_neighbors_follows_facings() {
        let origin = HexCoord::new(4, 4);
        for facing in Facing::ALL {
            assert_eq!(origin.bearing_to(origin.neighbor(facing)), facing.degrees());
        }
    }

    #[test]
    fn relative_bearing_rotates_with_facing() {
        let origin = HexCoord::new(4, 4);
        let south = origin.neighbor(Facing::South);
        assert_eq!(origin.relative_bearing(Facing::North, south), 180);
        assert_eq!(origin.relative_bearing(Facing::South, south), 0);
    }

    #[test]
    fn forward_and_rear_arcs_partition_around_the_flanks() {
        assert!(Arc::Forward.contains(0));
        assert!(Arc::Forward.contains(60));
        assert!(!Arc::Forward.contains(61));
        assert!(Arc::Rear.contains(180));
        assert!(!Arc::Rear.contains(120));
        assert!(Arc::Turret.contains(200));
    }

    #[test]
    fn same_hex_is_inside_every_arc() {
        let hex = HexCoord::new(2, 2);
        assert!(Arc::Rear.covers(hex, Facing::North, hex));
    }

    #[test]
    fn line_includes_endpoints() {
        let from = HexCoord::new(0, 0);
        let to = HexCoord::new(0, 4);
        let line = from.line_to(to);
        assert_eq!(line.len(), 5);
        assert_eq!(line.first(), Some(&from));
        assert_eq!(line.last(), Some(&to));
    }

    #[test]
    fn facing_parses_from_snake_case() {
        let facing: Facing = "north_east".parse().expect("valid facing");
        assert_eq!(facing, Facing::NorthEast);
        assert_eq!(Facing::NorthEast.opposite(), Facing::SouthWest);
    }
}
