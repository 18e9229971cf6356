//! Resolution record produced by every attack evaluation.
//!
//! A record is either terminal (impossible, automatic success, automatic
//! failure) with an empty ledger, or normal with a base value and an ordered
//! ledger of modifiers. The ledger is the audit trail shown to players, so
//! entries keep the order in which rules appended them.

use std::fmt::Write as _;

use crate::state::Location;

/// Highest result two six-sided dice can roll.
pub const MAX_ROLL: i32 = 12;

/// Body-location table consulted by the damage step.
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum HitTable {
    #[default]
    Normal,
    Punch,
    Kick,
    Above,
    Below,
    Swarm,
    PartialCover,
}

/// Facing table that determines which side of the target is struck.
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SideTable {
    #[default]
    Front,
    Left,
    Right,
    Rear,
    Random,
}

/// Source of partial cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Cover {
    Terrain,
    Water,
    HullDown,
}

/// Table selection handed to the damage step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    pub hit_table: HitTable,
    pub side_table: SideTable,
    pub cover: Option<Cover>,
    pub aimed_location: Option<Location>,
}

impl Classification {
    pub const fn new(hit_table: HitTable, side_table: SideTable) -> Self {
        Self {
            hit_table,
            side_table,
            cover: None,
            aimed_location: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminalStatus {
    #[default]
    Normal,
    Impossible(String),
    AutomaticSuccess(String),
    AutomaticFail(String),
}

impl TerminalStatus {
    pub const fn is_normal(&self) -> bool {
        matches!(self, TerminalStatus::Normal)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            TerminalStatus::Normal => None,
            TerminalStatus::Impossible(reason)
            | TerminalStatus::AutomaticSuccess(reason)
            | TerminalStatus::AutomaticFail(reason) => Some(reason),
        }
    }
}

/// Unmodified target number and where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base {
    pub value: i32,
    pub reason: String,
}

impl Base {
    pub fn new(value: i32, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: reason.into(),
        }
    }
}

/// One ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub delta: i32,
    pub reason: String,
    /// Derived from the target rather than the attacker or the weapon.
    pub target_specific: bool,
}

impl Modifier {
    pub fn new(delta: i32, reason: impl Into<String>) -> Self {
        Self {
            delta,
            reason: reason.into(),
            target_specific: false,
        }
    }

    pub fn target(delta: i32, reason: impl Into<String>) -> Self {
        Self {
            target_specific: true,
            ..Self::new(delta, reason)
        }
    }
}

/// Append-only accumulator used while the modifier pipeline runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    base: Base,
    entries: Vec<Modifier>,
}

impl Ledger {
    pub fn new(base: Base) -> Self {
        Self {
            base,
            entries: Vec::new(),
        }
    }

    pub fn base(&self) -> &Base {
        &self.base
    }

    pub fn entries(&self) -> &[Modifier] {
        &self.entries
    }

    pub fn push(&mut self, modifier: Modifier) {
        self.entries.push(modifier);
    }

    /// Appends an attacker- or weapon-derived entry.
    pub fn add(&mut self, delta: i32, reason: impl Into<String>) {
        self.push(Modifier::new(delta, reason));
    }

    /// Appends a target-derived entry.
    pub fn add_target(&mut self, delta: i32, reason: impl Into<String>) {
        self.push(Modifier::target(delta, reason));
    }

    /// Base plus every delta appended so far.
    pub fn running_total(&self) -> i32 {
        self.base.value + self.entries.iter().map(|entry| entry.delta).sum::<i32>()
    }

    /// Sum of the already-appended entries selected by `filter`.
    pub fn sum_where(&self, filter: impl Fn(&Modifier) -> bool) -> i32 {
        self.entries
            .iter()
            .filter(|entry| filter(entry))
            .map(|entry| entry.delta)
            .sum()
    }

    /// Zeroes already-appended entries in place. Their position and reason stay
    /// in the audit trail.
    pub fn zero_where(&mut self, filter: impl Fn(&Modifier) -> bool) {
        for entry in self.entries.iter_mut().filter(|entry| filter(entry)) {
            entry.delta = 0;
        }
    }

    /// Completes the record. A total above [`MAX_ROLL`] can never be rolled and
    /// turns the record into an automatic failure.
    pub fn finish(self, classification: Classification) -> ResolutionRecord {
        let total = self.running_total();
        if total > MAX_ROLL {
            return ResolutionRecord::automatic_fail(format!(
                "Target number {total} exceeds the maximum roll of {MAX_ROLL}"
            ));
        }
        ResolutionRecord {
            status: TerminalStatus::Normal,
            base: Some(self.base),
            modifiers: self.entries,
            classification,
        }
    }
}

/// Output of one attack evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionRecord {
    pub status: TerminalStatus,
    pub base: Option<Base>,
    pub modifiers: Vec<Modifier>,
    pub classification: Classification,
}

impl ResolutionRecord {
    fn terminal(status: TerminalStatus, classification: Classification) -> Self {
        Self {
            status,
            base: None,
            modifiers: Vec::new(),
            classification,
        }
    }

    pub fn impossible(reason: impl Into<String>) -> Self {
        Self::terminal(
            TerminalStatus::Impossible(reason.into()),
            Classification::default(),
        )
    }

    pub fn automatic_fail(reason: impl Into<String>) -> Self {
        Self::terminal(
            TerminalStatus::AutomaticFail(reason.into()),
            Classification::default(),
        )
    }

    /// Automatic hits still carry the tables the damage step needs.
    pub fn automatic_success(reason: impl Into<String>, classification: Classification) -> Self {
        Self::terminal(TerminalStatus::AutomaticSuccess(reason.into()), classification)
    }

    pub fn is_terminal(&self) -> bool {
        !self.status.is_normal()
    }

    pub fn is_impossible(&self) -> bool {
        matches!(self.status, TerminalStatus::Impossible(_))
    }

    /// The attack may be ordered: it either needs a roll or hits automatically.
    pub fn is_offerable(&self) -> bool {
        matches!(
            self.status,
            TerminalStatus::Normal | TerminalStatus::AutomaticSuccess(_)
        )
    }

    /// Base plus the sum of every modifier. Meaningless for terminal records.
    pub fn value(&self) -> i32 {
        self.base.as_ref().map_or(0, |base| base.value)
            + self.modifiers.iter().map(|entry| entry.delta).sum::<i32>()
    }

    /// Number the attacker must roll, or `None` when no roll happens.
    pub fn target_number(&self) -> Option<i32> {
        if self.is_terminal() {
            None
        } else {
            Some(self.value())
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.status.reason()
    }

    /// Human-readable audit trail, e.g. `4 (gunnery skill) + 2 (medium range) = 6`.
    pub fn description(&self) -> String {
        match (&self.status, &self.base) {
            (TerminalStatus::Normal, Some(base)) => {
                let mut text = format!("{} ({})", base.value, base.reason);
                for entry in &self.modifiers {
                    let sign = if entry.delta < 0 { '-' } else { '+' };
                    let _ = write!(
                        text,
                        " {sign} {} ({})",
                        entry.delta.unsigned_abs(),
                        entry.reason
                    );
                }
                let _ = write!(text, " = {}", self.value());
                text
            }
            (TerminalStatus::Impossible(reason), _) => format!("impossible: {reason}"),
            (TerminalStatus::AutomaticSuccess(reason), _) => {
                format!("automatic success: {reason}")
            }
            (TerminalStatus::AutomaticFail(reason), _) => format!("automatic failure: {reason}"),
            (TerminalStatus::Normal, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new(Base::new(4, "gunnery skill"));
        ledger.add(2, "medium range");
        ledger.add_target(-2, "target prone and adjacent");
        ledger
    }

    #[test]
    fn finish_keeps_ledger_order() {
        let record = ledger().finish(Classification::default());
        let reasons: Vec<_> = record.modifiers.iter().map(|m| m.reason.as_str()).collect();
        assert_eq!(reasons, ["medium range", "target prone and adjacent"]);
        assert_eq!(record.target_number(), Some(4));
    }

    #[test]
    fn totals_above_twelve_fail_automatically() {
        let mut ledger = ledger();
        ledger.add(9, "extreme everything");
        let record = ledger.finish(Classification::default());
        assert_eq!(
            record.status,
            TerminalStatus::AutomaticFail(
                "Target number 13 exceeds the maximum roll of 12".to_string()
            )
        );
        assert!(record.modifiers.is_empty());
        assert_eq!(record.target_number(), None);
    }

    #[test]
    fn zeroed_entries_keep_their_slot() {
        let mut ledger = ledger();
        ledger.add(1, "secondary target");
        ledger.zero_where(|entry| entry.reason == "secondary target");
        assert_eq!(ledger.entries().len(), 3);
        assert_eq!(ledger.entries()[2].delta, 0);
        assert_eq!(ledger.running_total(), 4);
    }

    #[test]
    fn description_renders_the_audit_trail() {
        let record = ledger().finish(Classification::default());
        assert_eq!(
            record.description(),
            "4 (gunnery skill) + 2 (medium range) - 2 (target prone and adjacent) = 4"
        );
    }

    #[test]
    fn terminal_records_have_empty_ledgers() {
        let record = ResolutionRecord::impossible("Arm missing");
        assert!(record.is_impossible());
        assert!(record.modifiers.is_empty());
        assert_eq!(record.reason(), Some("Arm missing"));
        assert!(!record.is_offerable());
    }
}
