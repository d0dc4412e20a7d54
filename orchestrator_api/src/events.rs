use std::sync::Arc;

use log::debug;
use tokio::sync::broadcast::{self, Receiver, Sender};
use types::phase0::{
    containers::{BeaconState, SignedBeaconBlock},
    primitives::Slot,
};

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Payload of a block-verified notification: the slot of the verified block
/// and the post-state it produced.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockVerifiedData {
    pub slot: Slot,
    pub state: Arc<BeaconState>,
}

/// Fan-out channels connecting block processing to the streaming handlers.
/// Publishing with no subscribers is a no-op; slow subscribers lag and are
/// expected to reconnect.
pub struct EventChannels {
    unconfirmed_blocks: Sender<Arc<SignedBeaconBlock>>,
    verified_blocks: Sender<BlockVerifiedData>,
}

impl Default for EventChannels {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl EventChannels {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (unconfirmed_blocks, _) = broadcast::channel(capacity);
        let (verified_blocks, _) = broadcast::channel(capacity);

        Self {
            unconfirmed_blocks,
            verified_blocks,
        }
    }

    #[must_use]
    pub fn subscribe_to_unconfirmed_blocks(&self) -> Receiver<Arc<SignedBeaconBlock>> {
        self.unconfirmed_blocks.subscribe()
    }

    #[must_use]
    pub fn subscribe_to_verified_blocks(&self) -> Receiver<BlockVerifiedData> {
        self.verified_blocks.subscribe()
    }

    pub fn publish_unconfirmed_block(&self, block: Arc<SignedBeaconBlock>) {
        let slot = block.slot();

        if self.unconfirmed_blocks.send(block).is_err() {
            debug!("no subscribers for unconfirmed block event (slot: {slot})");
        }
    }

    pub fn publish_block_verified(&self, slot: Slot, state: Arc<BeaconState>) {
        let data = BlockVerifiedData { slot, state };

        if self.verified_blocks.send(data).is_err() {
            debug!("no subscribers for block verified event (slot: {slot})");
        }
    }
}
