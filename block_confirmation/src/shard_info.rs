use anyhow::{ensure, Result};
use log::debug;
use types::phase0::{consts::FIRST_POST_GENESIS_SLOT, containers::SignedBeaconBlock};

use crate::error::ShardInfoError;

/// Validates the continuity of a block's embedded shard header against the
/// shard header of its parent.
///
/// Only the first shard header of each block is compared. The chains this
/// core targets embed one shard header per slot; the intent for blocks
/// carrying several is not defined, so additional headers are not inspected.
pub fn verify_shard_header_continuity(
    parent: Option<&SignedBeaconBlock>,
    current: Option<&SignedBeaconBlock>,
) -> Result<()> {
    let current = current.ok_or(ShardInfoError::UnknownCurrentBlock)?;

    // The first slot after genesis has no parent shard header to check.
    if current.slot() == FIRST_POST_GENESIS_SLOT {
        return Ok(());
    }

    let parent = parent.ok_or(ShardInfoError::UnknownParentBlock)?;

    let current_headers = &current.message.body.shard_headers;
    let parent_headers = &parent.message.body.shard_headers;

    // Shard inclusion is optional per block. Nothing to check if either
    // block carries no shard headers.
    let (Some(current_header), Some(parent_header)) =
        (current_headers.first(), parent_headers.first())
    else {
        return Ok(());
    };

    ensure!(
        current_header.parent_hash == parent_header.hash
            && current_header.block_number == parent_header.block_number + 1,
        ShardInfoError::InvalidShardInfo {
            slot: current.slot(),
        },
    );

    debug!(
        "verified shard header continuity (slot: {}, shard block number: {})",
        current.slot(),
        current_header.block_number,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use types::phase0::{
        containers::{BeaconBlock, ShardHeader},
        primitives::{ExecutionBlockNumber, Slot, H256},
    };

    use super::*;

    fn block(slot: Slot, headers: Vec<ShardHeader>) -> SignedBeaconBlock {
        let mut block = SignedBeaconBlock {
            message: BeaconBlock {
                slot,
                ..BeaconBlock::default()
            },
            ..SignedBeaconBlock::default()
        };

        block.message.body.shard_headers = headers;
        block
    }

    fn header(
        hash_byte: u8,
        parent_hash_byte: u8,
        block_number: ExecutionBlockNumber,
    ) -> ShardHeader {
        ShardHeader {
            hash: H256::repeat_byte(hash_byte),
            parent_hash: H256::repeat_byte(parent_hash_byte),
            block_number,
        }
    }

    fn error_of(result: Result<()>) -> ShardInfoError {
        result
            .expect_err("continuity check should fail")
            .downcast()
            .expect("error should be a ShardInfoError")
    }

    #[test]
    fn missing_current_block_is_an_error() {
        let parent = block(1, vec![]);

        assert_eq!(
            error_of(verify_shard_header_continuity(Some(&parent), None)),
            ShardInfoError::UnknownCurrentBlock,
        );
    }

    #[test]
    fn first_post_genesis_slot_is_exempt_even_without_a_parent() {
        let current = block(1, vec![header(1, 2, 3)]);

        verify_shard_header_continuity(None, Some(&current))
            .expect("slot 1 should not require a parent");
    }

    #[test]
    fn missing_parent_is_an_error_past_the_first_slot() {
        let current = block(2, vec![header(1, 2, 3)]);

        assert_eq!(
            error_of(verify_shard_header_continuity(None, Some(&current))),
            ShardInfoError::UnknownParentBlock,
        );
    }

    #[test_case(vec![], vec![]; "neither block carries shard headers")]
    #[test_case(vec![header(1, 0, 1)], vec![]; "current block carries no shard headers")]
    #[test_case(vec![], vec![header(2, 1, 2)]; "parent block carries no shard headers")]
    fn blocks_without_shard_headers_pass(
        parent_headers: Vec<ShardHeader>,
        current_headers: Vec<ShardHeader>,
    ) {
        let parent = block(4, parent_headers);
        let current = block(5, current_headers);

        verify_shard_header_continuity(Some(&parent), Some(&current))
            .expect("nothing to check without shard headers");
    }

    #[test]
    fn matching_hash_chain_passes() {
        let parent = block(4, vec![header(1, 0, 7)]);
        let current = block(5, vec![header(2, 1, 8)]);

        verify_shard_header_continuity(Some(&parent), Some(&current))
            .expect("continuous shard headers should pass");
    }

    #[test]
    fn only_first_headers_are_compared() {
        let parent = block(4, vec![header(1, 0, 7), header(9, 9, 9)]);
        let current = block(5, vec![header(2, 1, 8), header(8, 8, 8)]);

        verify_shard_header_continuity(Some(&parent), Some(&current))
            .expect("trailing shard headers should not be inspected");
    }

    #[test_case(header(1, 0, 7), header(2, 3, 8); "parent hash mismatch")]
    #[test_case(header(1, 0, 7), header(2, 1, 9); "block number not incremented by one")]
    #[test_case(header(1, 0, 7), header(2, 1, 7); "block number not advanced")]
    fn broken_hash_chain_fails(parent_header: ShardHeader, current_header: ShardHeader) {
        let parent = block(4, vec![parent_header]);
        let current = block(5, vec![current_header]);

        assert_eq!(
            error_of(verify_shard_header_continuity(Some(&parent), Some(&current))),
            ShardInfoError::InvalidShardInfo { slot: 5 },
        );
    }
}
