use crate::phase0::primitives::{Epoch, Slot};

pub const GENESIS_SLOT: Slot = 0;
pub const GENESIS_EPOCH: Epoch = 0;

/// The first slot after genesis. A block in this slot has no parent shard
/// header to validate against.
pub const FIRST_POST_GENESIS_SLOT: Slot = GENESIS_SLOT + 1;
