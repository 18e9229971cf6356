//! Attack order loader.
//!
//! Orders are a RON list of [`AttackDeclaration`]s:
//!
//! ```ron
//! [
//!     (attacker: EntityId(1), target: Unit(EntityId(2)), kind: WeaponFire((weapon: 0))),
//!     (attacker: EntityId(1), target: Unit(EntityId(2)), kind: Kick(leg: Left)),
//! ]
//! ```

use std::path::Path;

use tactics_core::{AttackDeclaration, BattlefieldSnapshot, UnitOracle};

use crate::loaders::{LoadResult, read_file};

/// Loader for attack orders from RON files.
pub struct OrdersLoader;

impl OrdersLoader {
    /// Load attack orders from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<AttackDeclaration>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid orders {}: {}", path.display(), e))
    }

    /// Parse attack orders from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<AttackDeclaration>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse orders RON: {}", e))
    }

    /// Checks that every order's attacker exists in the scenario.
    ///
    /// Deeper problems (missing weapons, unknown targets) surface as
    /// evaluation errors so they can be reported per order.
    pub fn validate(orders: &[AttackDeclaration], scenario: &BattlefieldSnapshot) -> LoadResult<()> {
        for (index, order) in orders.iter().enumerate() {
            if scenario.unit(order.attacker).is_none() {
                anyhow::bail!("Order {} names unknown attacker {}", index, order.attacker);
            }
        }
        Ok(())
    }
}
