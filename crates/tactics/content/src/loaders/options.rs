//! Rule option loader.
//!
//! Options live in an `[options]` table keyed by snake_case option name:
//!
//! ```toml
//! [options]
//! friendly_fire = false
//! tac_ops_range = true
//! fixed_physical_base = 0
//! ```
//!
//! Unknown names and values of the wrong type are load errors. Options that
//! are not listed keep their defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use strum::IntoEnumIterator;
use tactics_core::{GameOption, OptionValue, RuleOptions};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesToml {
    #[serde(default)]
    options: BTreeMap<String, toml::Value>,
}

/// Loader for rule options from TOML files.
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load rule options from a TOML file.
    pub fn load(path: &Path) -> LoadResult<RuleOptions> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid rules file {}: {}", path.display(), e))
    }

    /// Parse rule options from TOML text.
    pub fn parse(content: &str) -> LoadResult<RuleOptions> {
        let raw: RulesToml = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        let mut options = RuleOptions::new();
        for (name, value) in raw.options {
            let option: GameOption = name.parse().map_err(|_| {
                anyhow::anyhow!(
                    "Unknown rule option `{}` (expected one of: {})",
                    name,
                    known_options()
                )
            })?;
            options.set(option, option_value(option, &value)?);
        }

        Ok(options)
    }
}

fn option_value(option: GameOption, value: &toml::Value) -> LoadResult<OptionValue> {
    let parsed = match value {
        toml::Value::Boolean(flag) => OptionValue::Bool(*flag),
        toml::Value::Integer(number) => OptionValue::Int(i32::try_from(*number).map_err(|_| {
            anyhow::anyhow!("Value {} for option `{}` is out of range", number, option)
        })?),
        other => {
            anyhow::bail!(
                "Option `{}` must be a boolean or an integer, found {}",
                option,
                other.type_str()
            )
        }
    };

    if !parsed.matches_kind_of(option.default_value()) {
        anyhow::bail!(
            "Option `{}` expects a value like {:?}, found {:?}",
            option,
            option.default_value(),
            parsed
        );
    }
    Ok(parsed)
}

fn known_options() -> String {
    GameOption::iter()
        .map(|option| option.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
