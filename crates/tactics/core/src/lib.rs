//! Deterministic attack resolution for turn-based tactical combat.
//!
//! `tactics-core` decides whether an attack may be attempted and, if so, what
//! it takes to succeed: a base value, an ordered ledger of modifiers and the
//! hit and side tables the damage step needs. The battlefield is consumed
//! read-only through the oracle traits in [`env`]; [`env::BattlefieldSnapshot`]
//! implements all of them for callers that keep state in memory.
//!
//! Everything here is a pure function of its inputs. Nothing logs, nothing
//! mutates, and identical inputs yield identical records.
pub mod attack;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use attack::{
    AttackContext, AttackDeclaration, AttackError, AttackKind, AttackVariant, Base,
    Classification, Cover, Evaluation, GuardChain, HitTable, Ledger, MAX_ROLL, Modifier,
    ResolutionRecord, Side, SideTable, TargetRef, TerminalStatus, Verdict, WeaponFire, evaluate,
    guard_order,
};
pub use config::{GameOption, OptionValue, RuleOptions};
pub use env::{
    BattleEnv, BattlefieldSnapshot, BoardDimensions, BoardOracle, BoardSnapshot, EcmField, Env,
    EwOracle, LosEffects, LosEndpoint, LosOracle, LosOverride, OptionsOracle, OracleError,
    UnitOracle,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    Actuators, AmmoKind, Arc, BuildingInfo, ClubKind, Crew, CrewAbility, EntityId, Facing,
    GrappleLink, HexCoord, HexState, Location, LocationState, MountedClub, MountedWeapon,
    MovementMode, MovementReport, RangeBands, RangeBracket, Smoke, TeamId, UnitKind, UnitState,
    UnitStatus, WeaponClass, WeaponFlags, WeightClass, Woods,
};
