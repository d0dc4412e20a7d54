use types::phase0::primitives::{Epoch, Slot, UnixSeconds, H256};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EpochInfoRequest {
    pub from_epoch: Epoch,
}

/// Request for the pending-blocks stream. The block root filter is accepted
/// for wire compatibility but does not affect delivery; streamed content is
/// driven purely by slot ordering.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingBlocksRequest {
    pub from_slot: Slot,
    pub block_root_filter: Option<H256>,
}

/// One per-epoch snapshot of proposer assignments. `validator_list` contains
/// one hex-encoded public key per slot of the epoch, in slot order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MinimalConsensusInfo {
    pub epoch: Epoch,
    pub validator_list: Vec<String>,
    pub epoch_start_time: UnixSeconds,
    pub seconds_per_slot: u64,
}
