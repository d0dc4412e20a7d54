use std::collections::HashSet;

use anyhow::Result;
use futures::{channel::mpsc::UnboundedSender, select_biased, FutureExt as _};
use helper_functions::misc;
use log::debug;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use types::{
    config::Config,
    phase0::{
        consts::GENESIS_EPOCH,
        containers::BeaconState,
        primitives::{Epoch, PublicKeyBytes, UnixSeconds},
    },
};

use crate::{
    backend::ChainBackend,
    error::StreamError,
    events::BlockVerifiedData,
    messages::{EpochInfoRequest, MinimalConsensusInfo},
    sink,
};

/// Serves one epoch-info streaming call: a synchronous replay of proposer
/// snapshots up to the finalized epoch, then one snapshot per verified
/// block, one epoch ahead of the block's own epoch.
///
/// `verified_blocks` must be subscribed before the call. Events published
/// during the replay are buffered, and the ledger keeps them from being
/// delivered twice.
pub async fn stream_minimal_consensus_info(
    config: &Config,
    backend: &impl ChainBackend,
    request: &EpochInfoRequest,
    genesis_time: UnixSeconds,
    mut verified_blocks: Receiver<BlockVerifiedData>,
    sink: &UnboundedSender<MinimalConsensusInfo>,
    stream_done_rx: &async_channel::Receiver<()>,
    server_done_rx: &async_channel::Receiver<()>,
) -> Result<(), StreamError> {
    // Delivery ledger for this call only. A reconnecting consumer gets a
    // fresh, complete replay.
    let mut sent_epochs = HashSet::new();

    let start_epoch = request.from_epoch;
    let end_epoch = backend.finalized_epoch();
    let replayed = start_epoch <= end_epoch;

    if replayed {
        debug!("replaying epoch info (epochs: {start_epoch}..={end_epoch})");

        for epoch in start_epoch..=end_epoch {
            if !sent_epochs.insert(epoch) {
                continue;
            }

            let start_slot = misc::compute_start_slot_at_epoch(config, epoch);
            let state = backend.state_at_slot(start_slot)?;
            let info = epoch_info(config, backend, &state, epoch, genesis_time)?;

            sink::send(sink, info)?;
        }
    }

    let mut first_event = true;

    loop {
        select_biased! {
            _ = stream_done_rx.recv().fuse() => return Err(StreamError::StreamContextDone),
            _ = server_done_rx.recv().fuse() => return Err(StreamError::ServerContextDone),
            event = verified_blocks.recv().fuse() => {
                let data = match event {
                    Ok(data) => data,
                    Err(RecvError::Closed | RecvError::Lagged(_)) => {
                        return Err(StreamError::Aborted)
                    }
                };

                let event_epoch = misc::compute_epoch_at_slot(config, data.slot);

                if core::mem::take(&mut first_event) && replayed {
                    // Finalization may have advanced while the replay ran.
                    // Close the gap using the state attached to the event.
                    for epoch in end_epoch + 1..event_epoch {
                        if !sent_epochs.insert(epoch) {
                            continue;
                        }

                        let info =
                            epoch_info(config, backend, &data.state, epoch, genesis_time)?;

                        sink::send(sink, info)?;
                    }
                }

                // Assignments for the next epoch are determinable as soon as
                // a block of the current epoch is verified.
                let next_epoch = event_epoch + 1;

                if sent_epochs.insert(next_epoch) {
                    let info =
                        epoch_info(config, backend, &data.state, next_epoch, genesis_time)?;

                    sink::send(sink, info)?;
                }
            }
        }
    }
}

fn epoch_info(
    config: &Config,
    backend: &impl ChainBackend,
    state: &BeaconState,
    epoch: Epoch,
    genesis_time: UnixSeconds,
) -> Result<MinimalConsensusInfo> {
    let mut assignments = backend.proposer_assignments(state, epoch)?;

    let slots_per_epoch = usize::try_from(config.slots_per_epoch.get())?;

    // The genesis slot has no proposer. Pad the list with a placeholder key
    // so consumers can still index it by position within the epoch.
    if epoch == GENESIS_EPOCH && assignments.len() < slots_per_epoch {
        assignments.insert(0, PublicKeyBytes::zero());
    }

    let validator_list = assignments
        .iter()
        .map(|pubkey| pubkey.to_hex_string())
        .collect();

    let start_slot = misc::compute_start_slot_at_epoch(config, epoch);

    Ok(MinimalConsensusInfo {
        epoch,
        validator_list,
        epoch_start_time: misc::compute_timestamp_at_slot(config, genesis_time, start_slot),
        seconds_per_slot: config.seconds_per_slot.get(),
    })
}
