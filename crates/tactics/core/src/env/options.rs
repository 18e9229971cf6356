use crate::config::{GameOption, OptionValue, RuleOptions};

/// Externally owned rule-option set.
pub trait OptionsOracle: Send + Sync {
    fn option(&self, option: GameOption) -> OptionValue;

    fn flag(&self, option: GameOption) -> bool {
        self.option(option).as_bool()
    }

    fn int(&self, option: GameOption) -> i32 {
        self.option(option).as_int()
    }
}

impl OptionsOracle for RuleOptions {
    fn option(&self, option: GameOption) -> OptionValue {
        self.get(option)
    }
}
