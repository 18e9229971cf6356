//! Rule-option toggles consulted by the attack engine.
//!
//! Options are owned by the host application and are never mutated during an
//! evaluation. Unset options fall back to [`GameOption::default_value`].

use std::collections::BTreeMap;

/// Every rule toggle the engine understands.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameOption {
    /// Allow direct attacks against friendly units.
    FriendlyFire,
    /// Allow indirect fire with a spotter.
    IndirectFire,
    /// Extreme range bracket.
    TacOpsRange,
    /// Extended heat scale above 30.
    TacOpsHeat,
    /// Grapple attacks.
    TacOpsGrappling,
    /// Fixed base target number for physical attacks. Zero keeps the piloting skill.
    FixedPhysicalBase,
    /// Special pilot abilities.
    PilotAbilities,
}

impl GameOption {
    pub const fn default_value(self) -> OptionValue {
        match self {
            GameOption::FriendlyFire => OptionValue::Bool(false),
            GameOption::IndirectFire => OptionValue::Bool(true),
            GameOption::TacOpsRange => OptionValue::Bool(false),
            GameOption::TacOpsHeat => OptionValue::Bool(false),
            GameOption::TacOpsGrappling => OptionValue::Bool(false),
            GameOption::FixedPhysicalBase => OptionValue::Int(0),
            GameOption::PilotAbilities => OptionValue::Bool(true),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
}

impl OptionValue {
    pub const fn as_bool(self) -> bool {
        match self {
            OptionValue::Bool(value) => value,
            OptionValue::Int(value) => value != 0,
        }
    }

    pub const fn as_int(self) -> i32 {
        match self {
            OptionValue::Bool(value) => value as i32,
            OptionValue::Int(value) => value,
        }
    }

    /// Returns true if this value has the same shape as the option's default.
    pub const fn matches_kind_of(self, other: OptionValue) -> bool {
        matches!(
            (self, other),
            (OptionValue::Bool(_), OptionValue::Bool(_)) | (OptionValue::Int(_), OptionValue::Int(_))
        )
    }
}

/// Flat mapping from option to value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleOptions {
    values: BTreeMap<GameOption, OptionValue>,
}

impl RuleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, option: GameOption) -> OptionValue {
        self.values
            .get(&option)
            .copied()
            .unwrap_or_else(|| option.default_value())
    }

    pub fn flag(&self, option: GameOption) -> bool {
        self.get(option).as_bool()
    }

    pub fn int(&self, option: GameOption) -> i32 {
        self.get(option).as_int()
    }

    pub fn set(&mut self, option: GameOption, value: OptionValue) {
        self.values.insert(option, value);
    }

    #[must_use]
    pub fn with(mut self, option: GameOption, value: OptionValue) -> Self {
        self.set(option, value);
        self
    }

    /// Options explicitly set, in option order.
    pub fn iter(&self) -> impl Iterator<Item = (GameOption, OptionValue)> + '_ {
        self.values.iter().map(|(option, value)| (*option, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_options_use_defaults() {
        let options = RuleOptions::new();
        assert!(!options.flag(GameOption::FriendlyFire));
        assert!(options.flag(GameOption::IndirectFire));
        assert_eq!(options.int(GameOption::FixedPhysicalBase), 0);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let options = RuleOptions::new()
            .with(GameOption::FriendlyFire, OptionValue::Bool(true))
            .with(GameOption::FixedPhysicalBase, OptionValue::Int(5));
        assert!(options.flag(GameOption::FriendlyFire));
        assert_eq!(options.int(GameOption::FixedPhysicalBase), 5);
    }

    #[test]
    fn option_names_parse_case_insensitively() {
        let option: GameOption = "TAC_OPS_GRAPPLING".parse().expect("known option");
        assert_eq!(option, GameOption::TacOpsGrappling);
        assert!("laser_tag".parse::<GameOption>().is_err());
    }
}
