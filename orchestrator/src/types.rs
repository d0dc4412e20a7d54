use types::phase0::primitives::{Slot, H256};

/// Verdict of the orchestrator on a single block.
///
/// The wire format carries the status as an integer. Any value other than
/// the three defined ones maps to [`Unknown`], which callers must treat as
/// fatal rather than silently defaulting.
///
/// [`Unknown`]: Self::Unknown
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfirmationStatus {
    Pending,
    Verified,
    Invalid,
    Unknown,
}

impl ConfirmationStatus {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        match raw {
            0 => Self::Pending,
            1 => Self::Verified,
            2 => Self::Invalid,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConfirmationRequest {
    pub slot: Slot,
    pub block_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConfirmationResult {
    pub slot: Slot,
    pub block_root: H256,
    pub status: ConfirmationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_raw_statuses_round_trip() {
        assert_eq!(ConfirmationStatus::from_raw(0), ConfirmationStatus::Pending);
        assert_eq!(ConfirmationStatus::from_raw(1), ConfirmationStatus::Verified);
        assert_eq!(ConfirmationStatus::from_raw(2), ConfirmationStatus::Invalid);
    }

    #[test]
    fn undefined_raw_statuses_map_to_unknown() {
        assert_eq!(ConfirmationStatus::from_raw(3), ConfirmationStatus::Unknown);
        assert_eq!(
            ConfirmationStatus::from_raw(u64::MAX),
            ConfirmationStatus::Unknown,
        );
    }
}
