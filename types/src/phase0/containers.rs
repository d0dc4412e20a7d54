use hashing::{hash_bytes, hash_pair};

use crate::phase0::primitives::{
    ExecutionBlockNumber, PublicKeyBytes, SignatureBytes, Slot, ValidatorIndex, H256,
};

/// Compact header of an execution chain block embedded in a beacon block,
/// anchoring the beacon chain to its companion chain.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ShardHeader {
    pub hash: H256,
    pub parent_hash: H256,
    pub block_number: ExecutionBlockNumber,
}

impl ShardHeader {
    #[must_use]
    pub fn hash_tree_root(&self) -> H256 {
        hash_pair(
            hash_pair(self.hash, self.parent_hash),
            hash_bytes(self.block_number.to_le_bytes()),
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BeaconBlockBody {
    pub randao_reveal: SignatureBytes,
    pub graffiti: H256,
    pub shard_headers: Vec<ShardHeader>,
}

impl BeaconBlockBody {
    #[must_use]
    pub fn hash_tree_root(&self) -> H256 {
        let headers_root = self
            .shard_headers
            .iter()
            .map(ShardHeader::hash_tree_root)
            .fold(H256::zero(), hash_pair);

        hash_pair(
            hash_pair(hash_bytes(self.randao_reveal), self.graffiti),
            headers_root,
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BeaconBlock {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: H256,
    pub state_root: H256,
    pub body: BeaconBlockBody,
}

impl BeaconBlock {
    /// Content-addressed root of the block. A pure function of block
    /// contents, so replacing a block for a slot produces a new root.
    #[must_use]
    pub fn hash_tree_root(&self) -> H256 {
        let slot_and_proposer = hash_pair(
            hash_bytes(self.slot.to_le_bytes()),
            hash_bytes(self.proposer_index.to_le_bytes()),
        );

        hash_pair(
            hash_pair(slot_and_proposer, hash_pair(self.parent_root, self.state_root)),
            self.body.hash_tree_root(),
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
    pub signature: SignatureBytes,
}

impl SignedBeaconBlock {
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.message.slot
    }

    /// The root of the inner block. The signature is not part of the root.
    #[must_use]
    pub fn hash_tree_root(&self) -> H256 {
        self.message.hash_tree_root()
    }
}

/// The slice of a post-state that the orchestrator-facing streamers need.
/// Full states and state transitions live behind external collaborators.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BeaconState {
    pub slot: Slot,
    pub validators: Vec<PublicKeyBytes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_at_slot(slot: Slot) -> SignedBeaconBlock {
        SignedBeaconBlock {
            message: BeaconBlock {
                slot,
                ..BeaconBlock::default()
            },
            ..SignedBeaconBlock::default()
        }
    }

    #[test]
    fn block_root_is_deterministic() {
        assert_eq!(
            block_at_slot(7).hash_tree_root(),
            block_at_slot(7).hash_tree_root(),
        );
    }

    #[test]
    fn block_root_depends_on_slot() {
        assert_ne!(
            block_at_slot(7).hash_tree_root(),
            block_at_slot(8).hash_tree_root(),
        );
    }

    #[test]
    fn block_root_depends_on_shard_headers() {
        let mut with_header = block_at_slot(7);

        with_header.message.body.shard_headers.push(ShardHeader {
            hash: H256::repeat_byte(1),
            parent_hash: H256::repeat_byte(2),
            block_number: 3,
        });

        assert_ne!(
            with_header.hash_tree_root(),
            block_at_slot(7).hash_tree_root(),
        );
    }

    #[test]
    fn block_root_ignores_signature() {
        let mut signed = block_at_slot(7);
        signed.signature = SignatureBytes::repeat_byte(0xff);

        assert_eq!(signed.hash_tree_root(), block_at_slot(7).hash_tree_root());
    }
}
