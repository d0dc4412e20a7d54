use thiserror::Error;
use types::phase0::primitives::Slot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("invalid block found in orchestrator")]
    InvalidBlock,
    #[error("block confirmation was interrupted by shutdown, reinitialize the wait")]
    Interrupted,
    #[error("maximum wait exceeded and orchestrator could not verify the block")]
    TryLimitExceeded,
    #[error("unknown confirmation status from orchestrator")]
    UnknownStatus,
    #[error("no orchestrator client was initialized")]
    MissingClient,
    #[error("empty confirmation response from orchestrator")]
    EmptyResponse,
    #[error("confirmation response slot {received} does not match requested slot {requested}")]
    SlotMismatch { requested: Slot, received: Slot },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShardInfoError {
    #[error("unknown current beacon block")]
    UnknownCurrentBlock,
    #[error("unknown parent beacon block")]
    UnknownParentBlock,
    #[error("invalid shard info (slot: {slot})")]
    InvalidShardInfo { slot: Slot },
}
