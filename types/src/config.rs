use core::num::NonZeroU64;

use nonzero_ext::nonzero;

/// Chain parameters the confirmation core depends on.
///
/// Only the parameters actually consumed here are represented. The full
/// preset lives with the consensus engine, which is an external collaborator.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub slots_per_epoch: NonZeroU64,
    pub seconds_per_slot: NonZeroU64,
}

impl Config {
    #[must_use]
    pub const fn mainnet() -> Self {
        Self {
            slots_per_epoch: nonzero!(32_u64),
            seconds_per_slot: nonzero!(12_u64),
        }
    }

    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            slots_per_epoch: nonzero!(8_u64),
            seconds_per_slot: nonzero!(6_u64),
        }
    }
}
