use std::sync::Arc;

use futures::{channel::mpsc::UnboundedSender, select_biased, FutureExt as _};
use helper_functions::misc;
use log::debug;
use pending_block_cache::PendingBlockCache;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use types::{
    config::Config,
    phase0::{consts::GENESIS_SLOT, containers::SignedBeaconBlock, primitives::Slot},
};

use crate::{backend::ChainBackend, error::StreamError, messages::PendingBlocksRequest, sink};

/// Serves one pending-blocks streaming call. A reconnecting consumer gets a
/// gapless, slot-ordered view stitched from three sources: finalized blocks
/// from storage, unconfirmed blocks from the pending cache, and brand-new
/// blocks from the event bus.
///
/// `unconfirmed_blocks` must be subscribed before the call. Events buffered
/// during the replay are dropped by the slot window if the replay already
/// covered them.
pub async fn stream_new_pending_blocks(
    config: &Config,
    backend: &impl ChainBackend,
    cache: &PendingBlockCache,
    request: &PendingBlocksRequest,
    mut unconfirmed_blocks: Receiver<Arc<SignedBeaconBlock>>,
    sink: &UnboundedSender<Arc<SignedBeaconBlock>>,
    stream_done_rx: &async_channel::Receiver<()>,
    server_done_rx: &async_channel::Receiver<()>,
) -> Result<(), StreamError> {
    if let Some(block_root) = request.block_root_filter {
        debug!("ignoring block root filter (block root: {block_root:?})");
    }

    // Starting at the genesis slot makes the genesis block undeliverable.
    let mut sender = BlockSender {
        sink,
        last_sent_slot: GENESIS_SLOT,
    };

    // Finalized blocks from storage, one epoch at a time.
    let start_epoch = misc::compute_epoch_at_slot(config, request.from_slot);
    let end_epoch = backend.finalized_epoch();

    for epoch in start_epoch..=end_epoch {
        for block in backend.blocks_by_epoch(epoch)? {
            sender.send_if_new(block)?;
        }
    }

    // Storage blocks between the finalized range and the pending cache,
    // then the cache itself. The gap goes first to keep slots ordered.
    let cached_blocks = cache.sorted_blocks()?;

    if let Some(first_cached) = cached_blocks.first() {
        sender.fill_gap(backend, first_cached.slot())?;
    }

    for block in cached_blocks {
        sender.send_if_new(block)?;
    }

    let mut first_event = true;

    loop {
        select_biased! {
            _ = stream_done_rx.recv().fuse() => return Err(StreamError::StreamContextDone),
            _ = server_done_rx.recv().fuse() => return Err(StreamError::ServerContextDone),
            event = unconfirmed_blocks.recv().fuse() => {
                let block = match event {
                    Ok(block) => block,
                    Err(RecvError::Closed | RecvError::Lagged(_)) => {
                        return Err(StreamError::Aborted)
                    }
                };

                if core::mem::take(&mut first_event) {
                    // Blocks may have landed in storage between the replay
                    // above and this event.
                    sender.fill_gap(backend, block.slot())?;
                }

                sender.send_if_new(block)?;
            }
        }
    }
}

/// Enforces the at-most-once, non-decreasing-slot delivery window for one
/// streaming call.
struct BlockSender<'sink> {
    sink: &'sink UnboundedSender<Arc<SignedBeaconBlock>>,
    last_sent_slot: Slot,
}

impl BlockSender<'_> {
    /// Streams storage blocks with slots above the last sent one and below
    /// `until`. A no-op when the window is already past `until`.
    fn fill_gap(&mut self, backend: &impl ChainBackend, until: Slot) -> Result<(), StreamError> {
        let start = self.last_sent_slot + 1;

        if start >= until {
            return Ok(());
        }

        for block in backend.blocks_by_slot_range(start..until)? {
            self.send_if_new(block)?;
        }

        Ok(())
    }

    fn send_if_new(&mut self, block: Arc<SignedBeaconBlock>) -> Result<(), StreamError> {
        let slot = block.slot();

        if slot <= self.last_sent_slot {
            return Ok(());
        }

        sink::send(self.sink, block)?;
        self.last_sent_slot = slot;

        Ok(())
    }
}
