use ethereum_types::H256;
use sha2::{Digest as _, Sha256};

/// Hashes an arbitrary byte string into a 32 byte digest.
#[must_use]
pub fn hash_bytes(bytes: impl AsRef<[u8]>) -> H256 {
    H256(Sha256::digest(bytes).into())
}

/// Hashes the concatenation of two 32 byte digests.
///
/// This is the combining step used to fold the fields of a container into a
/// single content-addressed root.
#[must_use]
pub fn hash_pair(left: H256, right: H256) -> H256 {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    H256(hasher.finalize().into())
}
