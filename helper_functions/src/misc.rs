use types::{
    config::Config,
    phase0::primitives::{Epoch, Slot, UnixSeconds},
};

#[must_use]
pub const fn compute_epoch_at_slot(config: &Config, slot: Slot) -> Epoch {
    slot / config.slots_per_epoch.get()
}

#[must_use]
pub const fn compute_start_slot_at_epoch(config: &Config, epoch: Epoch) -> Slot {
    epoch * config.slots_per_epoch.get()
}

#[must_use]
pub const fn compute_end_slot_at_epoch(config: &Config, epoch: Epoch) -> Slot {
    compute_start_slot_at_epoch(config, epoch + 1) - 1
}

#[must_use]
pub const fn compute_timestamp_at_slot(
    config: &Config,
    genesis_time: UnixSeconds,
    slot: Slot,
) -> UnixSeconds {
    genesis_time + slot * config.seconds_per_slot.get()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0 => 0)]
    #[test_case(31 => 0)]
    #[test_case(32 => 1)]
    #[test_case(63 => 1)]
    #[test_case(64 => 2)]
    fn epoch_at_slot_with_mainnet_config(slot: Slot) -> Epoch {
        compute_epoch_at_slot(&Config::mainnet(), slot)
    }

    #[test_case(0 => 0)]
    #[test_case(1 => 32)]
    #[test_case(5 => 160)]
    fn start_slot_at_epoch_with_mainnet_config(epoch: Epoch) -> Slot {
        compute_start_slot_at_epoch(&Config::mainnet(), epoch)
    }

    #[test_case(0 => 31)]
    #[test_case(1 => 63)]
    fn end_slot_at_epoch_with_mainnet_config(epoch: Epoch) -> Slot {
        compute_end_slot_at_epoch(&Config::mainnet(), epoch)
    }

    #[test_case(0 => 7)]
    #[test_case(3 => 31)]
    fn end_slot_at_epoch_with_minimal_config(epoch: Epoch) -> Slot {
        compute_end_slot_at_epoch(&Config::minimal(), epoch)
    }

    #[test_case(0 => 1_600_000_000)]
    #[test_case(1 => 1_600_000_012)]
    #[test_case(32 => 1_600_000_384)]
    fn timestamp_at_slot_with_mainnet_config(slot: Slot) -> UnixSeconds {
        compute_timestamp_at_slot(&Config::mainnet(), 1_600_000_000, slot)
    }
}
