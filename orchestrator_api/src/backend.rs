use core::ops::Range;
use std::{collections::BTreeMap, sync::Arc};

use anyhow::{anyhow, ensure, Result};
use helper_functions::misc;
use std_ext::ArcExt as _;
use types::{
    config::Config,
    phase0::{
        consts::GENESIS_SLOT,
        containers::{BeaconState, SignedBeaconBlock},
        primitives::{Epoch, PublicKeyBytes, Slot},
    },
};

/// Read side of the chain that the streaming handlers serve from. Block
/// storage and the state transition live behind this trait.
pub trait ChainBackend: Send + Sync {
    fn finalized_epoch(&self) -> Epoch;

    /// State as of `slot`, advanced through empty slots if necessary.
    fn state_at_slot(&self, slot: Slot) -> Result<Arc<BeaconState>>;

    /// One proposer key per slot of `epoch` that has a proposer, in slot
    /// order. The genesis slot has no proposer.
    fn proposer_assignments(
        &self,
        state: &BeaconState,
        epoch: Epoch,
    ) -> Result<Vec<PublicKeyBytes>>;

    /// All stored blocks with slots in `epoch`, in ascending slot order.
    fn blocks_by_epoch(&self, epoch: Epoch) -> Result<Vec<Arc<SignedBeaconBlock>>>;

    /// All stored blocks with slots in `slots`, in ascending slot order.
    fn blocks_by_slot_range(&self, slots: Range<Slot>) -> Result<Vec<Arc<SignedBeaconBlock>>>;
}

/// In-memory chain for tests. Proposer assignments are derived by cycling
/// through the state's validators.
pub struct MemoryBackend {
    config: Config,
    finalized_epoch: Epoch,
    blocks: BTreeMap<Slot, Arc<SignedBeaconBlock>>,
    states: BTreeMap<Slot, Arc<BeaconState>>,
}

impl MemoryBackend {
    #[must_use]
    pub const fn new(config: Config, finalized_epoch: Epoch) -> Self {
        Self {
            config,
            finalized_epoch,
            blocks: BTreeMap::new(),
            states: BTreeMap::new(),
        }
    }

    pub fn insert_block(&mut self, block: SignedBeaconBlock) {
        self.blocks.insert(block.slot(), Arc::new(block));
    }

    pub fn insert_state(&mut self, state: BeaconState) {
        self.states.insert(state.slot, Arc::new(state));
    }
}

impl ChainBackend for MemoryBackend {
    fn finalized_epoch(&self) -> Epoch {
        self.finalized_epoch
    }

    fn state_at_slot(&self, slot: Slot) -> Result<Arc<BeaconState>> {
        self.states
            .range(..=slot)
            .next_back()
            .map(|(_, state)| state.clone_arc())
            .ok_or_else(|| anyhow!("no state at or before slot {slot}"))
    }

    fn proposer_assignments(
        &self,
        state: &BeaconState,
        epoch: Epoch,
    ) -> Result<Vec<PublicKeyBytes>> {
        ensure!(
            !state.validators.is_empty(),
            "state at slot {} has no validators",
            state.slot,
        );

        let validator_count = u64::try_from(state.validators.len())?;

        let start_slot = misc::compute_start_slot_at_epoch(&self.config, epoch);
        let end_slot = misc::compute_end_slot_at_epoch(&self.config, epoch);

        (start_slot..=end_slot)
            .filter(|slot| *slot != GENESIS_SLOT)
            .map(|slot| {
                let index = usize::try_from(slot % validator_count)?;

                state
                    .validators
                    .get(index)
                    .copied()
                    .ok_or_else(|| anyhow!("no validator at index {index}"))
            })
            .collect()
    }

    fn blocks_by_epoch(&self, epoch: Epoch) -> Result<Vec<Arc<SignedBeaconBlock>>> {
        let start_slot = misc::compute_start_slot_at_epoch(&self.config, epoch);
        let end_slot = misc::compute_end_slot_at_epoch(&self.config, epoch);

        Ok(self
            .blocks
            .range(start_slot..=end_slot)
            .map(|(_, block)| block.clone_arc())
            .collect())
    }

    fn blocks_by_slot_range(&self, slots: Range<Slot>) -> Result<Vec<Arc<SignedBeaconBlock>>> {
        Ok(self
            .blocks
            .range(slots)
            .map(|(_, block)| block.clone_arc())
            .collect())
    }
}
