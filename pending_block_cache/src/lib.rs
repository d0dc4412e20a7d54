use core::time::Duration;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use im::OrdMap;
use log::warn;
use parking_lot::{Mutex, MutexGuard};
use std_ext::ArcExt;
use tap::Pipe as _;
use thiserror::Error;
use types::phase0::{containers::SignedBeaconBlock, primitives::Slot};

const DEFAULT_TRY_LOCK_TIMEOUT: Duration = Duration::from_secs(1);

type BlockMap = OrdMap<Slot, Arc<SignedBeaconBlock>>;

#[derive(Debug, Error)]
enum CacheLockError {
    #[error("could not obtain pending block cache lock in {} ms", timeout.as_millis())]
    CacheLockTimeout { timeout: Duration },
}

/// Concurrent store of blocks that have not yet been confirmed by the
/// orchestrator, keyed by slot.
///
/// Inserting a block for a slot that is already present replaces the old
/// block. That happens when a more canonical block for the slot supersedes
/// one that was downloaded earlier.
pub struct PendingBlockCache {
    blocks: Mutex<BlockMap>,
    try_lock_timeout: Duration,
}

impl Default for PendingBlockCache {
    fn default() -> Self {
        Self::new(DEFAULT_TRY_LOCK_TIMEOUT)
    }
}

impl PendingBlockCache {
    #[must_use]
    pub fn new(try_lock_timeout: Duration) -> Self {
        Self {
            blocks: Mutex::new(OrdMap::new()),
            try_lock_timeout,
        }
    }

    pub fn add(&self, block: Arc<SignedBeaconBlock>) -> Result<()> {
        self.try_lock()?.insert(block.slot(), block);
        Ok(())
    }

    pub fn remove(&self, slot: Slot) -> Result<Option<Arc<SignedBeaconBlock>>> {
        self.try_lock()?.remove(&slot).pipe(Ok)
    }

    pub fn get(&self, slot: Slot) -> Result<Option<Arc<SignedBeaconBlock>>> {
        self.try_lock()?
            .get(&slot)
            .map(ArcExt::clone_arc)
            .pipe(Ok)
    }

    /// All cached blocks in ascending slot order.
    ///
    /// The snapshot is taken under the lock, so it never observes a partial
    /// insert or removal.
    pub fn sorted_blocks(&self) -> Result<Vec<Arc<SignedBeaconBlock>>> {
        self.try_lock()?
            .values()
            .map(ArcExt::clone_arc)
            .collect::<Vec<_>>()
            .pipe(Ok)
    }

    pub fn len(&self) -> Result<usize> {
        self.try_lock()?.len().pipe(Ok)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.try_lock()?.is_empty().pipe(Ok)
    }

    fn try_lock(&self) -> Result<MutexGuard<BlockMap>> {
        let timeout = self.try_lock_timeout;

        self.blocks.try_lock_for(timeout).ok_or_else(|| {
            let error = CacheLockError::CacheLockTimeout { timeout };

            warn!("{error:?}");

            anyhow!(error)
        })
    }
}
