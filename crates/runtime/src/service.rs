//! Preview service: evaluates attack declarations against a published snapshot.
//!
//! The service holds the current [`BattlefieldSnapshot`] behind an `Arc`, so
//! readers never block a publisher and a batch always sees one consistent
//! battlefield even if a new snapshot is published while it runs. The record
//! cache belongs to one snapshot digest; publishing resets it and records from
//! batches still running against an older snapshot are refused.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::Semaphore;

use tactics_core::{
    AttackDeclaration, AttackKind, BattlefieldSnapshot, EntityId, ResolutionRecord, Side,
    TargetRef, WeaponFire, evaluate,
};

use crate::config::ServiceConfig;
use crate::digest::SnapshotDigest;
use crate::error::{Result, RuntimeError};

/// Records resolved against the snapshot with `digest`.
struct RecordCache {
    digest: SnapshotDigest,
    records: HashMap<AttackDeclaration, ResolutionRecord>,
}

impl RecordCache {
    fn new(digest: SnapshotDigest) -> Self {
        Self {
            digest,
            records: HashMap::new(),
        }
    }

    fn get(
        &self,
        digest: SnapshotDigest,
        declaration: &AttackDeclaration,
    ) -> Option<&ResolutionRecord> {
        if digest != self.digest {
            return None;
        }
        self.records.get(declaration)
    }

    /// Returns false when `digest` is no longer the cached snapshot.
    fn insert(
        &mut self,
        digest: SnapshotDigest,
        declaration: AttackDeclaration,
        record: ResolutionRecord,
    ) -> bool {
        if digest != self.digest {
            return false;
        }
        self.records.insert(declaration, record);
        true
    }

    fn reset(&mut self, digest: SnapshotDigest) {
        self.digest = digest;
        self.records.clear();
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// A snapshot together with its digest.
struct Published {
    snapshot: Arc<BattlefieldSnapshot>,
    digest: SnapshotDigest,
}

/// Everything one evaluation needs, cheap to clone into a worker.
#[derive(Clone)]
struct Session {
    published: Arc<Published>,
    cache: Option<Arc<Mutex<RecordCache>>>,
}

impl Session {
    fn resolve(&self, declaration: &AttackDeclaration) -> Result<ResolutionRecord> {
        let digest = self.published.digest;

        if let Some(cache) = &self.cache {
            let cached = cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(digest, declaration)
                .cloned();
            if let Some(record) = cached {
                tracing::trace!("Cache hit: snapshot={}, order={}", digest.short(), declaration);
                return Ok(record);
            }
        }

        let snapshot = &self.published.snapshot;
        let record = evaluate(declaration, &snapshot.env())?;
        tracing::debug!("Evaluated {}: {}", declaration, record.description());

        if let Some(cache) = &self.cache {
            let stored = cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(digest, *declaration, record.clone());
            if !stored {
                tracing::trace!("Not caching record of stale snapshot {}", digest.short());
            }
        }
        Ok(record)
    }
}

/// In-process attack preview service.
pub struct PreviewService {
    config: ServiceConfig,
    current: RwLock<Arc<Published>>,
    cache: Arc<Mutex<RecordCache>>,
    limiter: Arc<Semaphore>,
}

impl PreviewService {
    /// Create a service serving `snapshot`.
    pub fn new(config: ServiceConfig, snapshot: BattlefieldSnapshot) -> Result<Self> {
        let published = Self::seal(snapshot)?;
        tracing::info!(
            "Preview service started: snapshot={}, units={}, cache={}",
            published.digest.short(),
            published.snapshot.units.len(),
            config.cache_records
        );
        let cache = RecordCache::new(published.digest);
        Ok(Self {
            config,
            current: RwLock::new(Arc::new(published)),
            cache: Arc::new(Mutex::new(cache)),
            limiter: Arc::new(Semaphore::new(config.max_concurrency.max(1))),
        })
    }

    fn seal(snapshot: BattlefieldSnapshot) -> Result<Published> {
        let digest = SnapshotDigest::of(&snapshot)?;
        Ok(Published {
            snapshot: Arc::new(snapshot),
            digest,
        })
    }

    /// Replace the battlefield. Cached records of earlier snapshots are dropped.
    pub fn publish(&self, snapshot: BattlefieldSnapshot) -> Result<SnapshotDigest> {
        let published = Self::seal(snapshot)?;
        let digest = published.digest;

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(published);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset(digest);
        drop(current);

        tracing::info!("Published snapshot: digest={}", digest.short());
        Ok(digest)
    }

    /// The snapshot currently served.
    pub fn snapshot(&self) -> Arc<BattlefieldSnapshot> {
        Arc::clone(&self.published().snapshot)
    }

    pub fn digest(&self) -> SnapshotDigest {
        self.published().digest
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Number of cached records.
    pub fn cached_records(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn published(&self) -> Arc<Published> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn session(&self) -> Session {
        Session {
            published: self.published(),
            cache: self.config.cache_records.then(|| Arc::clone(&self.cache)),
        }
    }

    /// Evaluate one declaration against the current snapshot.
    pub fn evaluate(&self, declaration: &AttackDeclaration) -> Result<ResolutionRecord> {
        self.session().resolve(declaration)
    }

    /// Evaluate a batch concurrently on the blocking pool.
    ///
    /// Results come back in input order, one per declaration, so a malformed
    /// order does not hide the others. Every declaration in the batch is
    /// evaluated against the snapshot that was current when the call started.
    pub async fn evaluate_many(
        &self,
        declarations: Vec<AttackDeclaration>,
    ) -> Result<Vec<Result<ResolutionRecord>>> {
        let session = self.session();
        tracing::debug!(
            "Evaluating batch: snapshot={}, orders={}",
            session.published.digest.short(),
            declarations.len()
        );

        let mut handles = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let permit = Arc::clone(&self.limiter)
                .acquire_owned()
                .await
                .map_err(|_| RuntimeError::LimiterClosed)?;
            let session = session.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                session.resolve(&declaration)
            }));
        }

        let mut records = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Preview worker failed: {}", e);
                    return Err(RuntimeError::WorkerJoin(e));
                }
            }
        }
        Ok(records)
    }

    /// Every attack `attacker` could declare right now that needs a roll or
    /// hits automatically, with its record.
    pub async fn offerable_orders(
        &self,
        attacker: EntityId,
    ) -> Result<Vec<(AttackDeclaration, ResolutionRecord)>> {
        let candidates = candidate_orders(&self.snapshot(), attacker);
        let records = self.evaluate_many(candidates.clone()).await?;

        let mut offerable = Vec::new();
        for (declaration, record) in candidates.into_iter().zip(records) {
            let record = record?;
            if record.is_offerable() {
                offerable.push((declaration, record));
            }
        }
        Ok(offerable)
    }
}

/// Every declaration `attacker` could make against the other units on the
/// board: each weapon, each limb, each club and every whole-body attack.
pub fn candidate_orders(snapshot: &BattlefieldSnapshot, attacker: EntityId) -> Vec<AttackDeclaration> {
    let Some(unit) = snapshot.units.iter().find(|unit| unit.id == attacker) else {
        return Vec::new();
    };

    let mut kinds: Vec<AttackKind> = (0..unit.weapons.len())
        .map(|weapon| AttackKind::WeaponFire(WeaponFire::new(weapon)))
        .collect();
    for side in [Side::Left, Side::Right] {
        kinds.push(AttackKind::Punch { arm: side });
        kinds.push(AttackKind::Kick { leg: side });
    }
    kinds.extend((0..unit.clubs.len()).map(|club| AttackKind::Club { club }));
    kinds.extend([
        AttackKind::Push,
        AttackKind::Charge,
        AttackKind::DeathFromAbove,
        AttackKind::Grapple,
    ]);

    snapshot
        .units
        .iter()
        .filter(|target| target.id != attacker)
        .flat_map(|target| {
            kinds.iter().map(move |kind| {
                AttackDeclaration::new(attacker, TargetRef::Unit(target.id), *kind)
            })
        })
        .collect()
}
