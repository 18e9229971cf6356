//! Content factory for building battlefields from data files.

use std::path::{Path, PathBuf};

use tactics_core::{AttackDeclaration, BattlefieldSnapshot, RuleOptions};

use crate::loaders::{LoadResult, OptionsLoader, OrdersLoader, ScenarioLoader};

/// Content factory that loads all battlefield content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── scenarios/
/// │   └── ridge_skirmish.ron
/// └── orders/
///     └── ridge_skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rule options from `rules.toml`. A missing file means all defaults.
    pub fn load_rules(&self) -> LoadResult<RuleOptions> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RuleOptions::default());
        }
        OptionsLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    ///
    /// Options from `rules.toml` apply first; options embedded in the
    /// scenario override them.
    pub fn load_scenario(&self, name: &str) -> LoadResult<BattlefieldSnapshot> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        let mut snapshot = ScenarioLoader::load(&path)?;

        let mut options = self.load_rules()?;
        for (option, value) in snapshot.options.iter() {
            options.set(option, value);
        }
        snapshot.options = options;

        Ok(snapshot)
    }

    /// Load attack orders from `orders/{name}.ron`.
    pub fn load_orders(&self, name: &str) -> LoadResult<Vec<AttackDeclaration>> {
        let path = self.data_dir.join("orders").join(format!("{}.ron", name));
        OrdersLoader::load(&path)
    }

    /// Load a scenario together with its orders, checking that every order
    /// names an attacker present in the scenario.
    pub fn load_engagement(
        &self,
        name: &str,
    ) -> LoadResult<(BattlefieldSnapshot, Vec<AttackDeclaration>)> {
        let snapshot = self.load_scenario(name)?;
        let orders = self.load_orders(name)?;
        OrdersLoader::validate(&orders, &snapshot)
            .map_err(|e| anyhow::anyhow!("Orders for scenario `{}`: {}", name, e))?;
        Ok((snapshot, orders))
    }

    /// Names of every scenario in `scenarios/`, sorted.
    pub fn scenario_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("scenarios");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns true when `orders/{name}.ron` exists.
    pub fn has_orders(&self, name: &str) -> bool {
        self.data_dir
            .join("orders")
            .join(format!("{}.ron", name))
            .exists()
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
