//! The node's side of the orchestrator-facing streaming API: event channels
//! fed by block processing, a chain read seam, and the two long-lived
//! streaming handlers built on top of them.

pub use crate::{
    backend::{ChainBackend, MemoryBackend},
    epoch_info::stream_minimal_consensus_info,
    error::StreamError,
    events::{BlockVerifiedData, EventChannels},
    messages::{EpochInfoRequest, MinimalConsensusInfo, PendingBlocksRequest},
    pending_blocks::stream_new_pending_blocks,
};

mod backend;
mod epoch_info;
mod error;
mod events;
mod messages;
mod pending_blocks;
mod sink;
