use crate::state::{EntityId, UnitState};

/// Read access to every unit on the battlefield.
pub trait UnitOracle: Send + Sync {
    fn unit(&self, id: EntityId) -> Option<&UnitState>;

    /// Ids of all units, in a stable order.
    fn unit_ids(&self) -> Vec<EntityId>;
}
