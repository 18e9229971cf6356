//! Scenario loader.
//!
//! A scenario is a serialized [`BattlefieldSnapshot`]: board dimensions and
//! sparse terrain features, units, and optional ECM fields and line-of-sight
//! overrides. Rule options may be embedded but usually come from the rules
//! file (see [`ContentFactory`](crate::ContentFactory)).

use std::collections::HashSet;
use std::path::Path;

use tactics_core::{BattlefieldSnapshot, BoardOracle};

use crate::loaders::{LoadResult, read_file};

/// Loader for battlefield scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<BattlefieldSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    /// Parse and validate a scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<BattlefieldSnapshot> {
        let snapshot: BattlefieldSnapshot = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::validate(&snapshot)?;
        Ok(snapshot)
    }

    /// Checks that the snapshot is internally consistent.
    ///
    /// Every unit must stand on the board and unit ids must be unique.
    pub fn validate(snapshot: &BattlefieldSnapshot) -> LoadResult<()> {
        let dimensions = snapshot.dimensions();
        if dimensions.width == 0 || dimensions.height == 0 {
            anyhow::bail!("Board must have at least one hex");
        }

        for hex in snapshot.board.features() {
            if !dimensions.contains(hex.coord) {
                anyhow::bail!("Terrain feature at {} lies outside the board", hex.coord);
            }
        }

        let mut seen = HashSet::new();
        for unit in &snapshot.units {
            if !seen.insert(unit.id) {
                anyhow::bail!("Duplicate unit id {}", unit.id);
            }
            if !dimensions.contains(unit.position) {
                anyhow::bail!(
                    "Unit {} ({}) stands outside the board at {}",
                    unit.id,
                    unit.name,
                    unit.position
                );
            }
            if let Some(partner) = unit.grapple.map(|link| link.partner) {
                if !snapshot.units.iter().any(|other| other.id == partner) {
                    anyhow::bail!("Unit {} is grappling unknown unit {}", unit.id, partner);
                }
            }
        }

        Ok(())
    }
}
