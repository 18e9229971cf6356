//! Content digest of a battlefield snapshot.

use std::fmt;

use sha2::{Digest, Sha256};
use tactics_core::BattlefieldSnapshot;

use crate::error::{Result, RuntimeError};

/// SHA-256 over the bincode encoding of a snapshot.
///
/// Equal snapshots always produce equal digests, so a digest identifies the
/// battlefield a cached record was evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotDigest([u8; 32]);

impl SnapshotDigest {
    pub fn of(snapshot: &BattlefieldSnapshot) -> Result<Self> {
        let bytes = bincode::serialize(snapshot).map_err(RuntimeError::Encode)?;
        Ok(Self(Sha256::digest(&bytes).into()))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for SnapshotDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{EntityId, HexCoord, UnitKind, UnitState};

    fn snapshot() -> BattlefieldSnapshot {
        BattlefieldSnapshot::open_field(8, 8).with_unit(UnitState::new(
            EntityId(1),
            UnitKind::BipedMech,
            HexCoord::new(2, 2),
        ))
    }

    #[test]
    fn equal_snapshots_share_a_digest() {
        let first = SnapshotDigest::of(&snapshot()).expect("digest");
        let second = SnapshotDigest::of(&snapshot()).expect("digest");
        assert_eq!(first, second);
        assert_eq!(first.to_string().len(), 64);
        assert_eq!(first.short().len(), 8);
    }

    #[test]
    fn any_change_moves_the_digest() {
        let base = SnapshotDigest::of(&snapshot()).expect("digest");
        let mut moved = snapshot();
        if let Some(unit) = moved.unit_mut(EntityId(1)) {
            unit.position = HexCoord::new(3, 2);
        }
        assert_ne!(base, SnapshotDigest::of(&moved).expect("digest"));
    }
}
