pub use crate::{
    confirmation::{
        ConfirmationService, CONFIRMATION_STATUS_FETCHING_INTERVAL, MAX_PENDING_BLOCK_TRY_LIMIT,
    },
    error::{ConfirmationError, ShardInfoError},
    shard_info::verify_shard_header_continuity,
};

mod confirmation;
mod error;
mod shard_info;
