use fixed_hash::construct_fixed_hash;

pub use ethereum_types::H256;

pub type Slot = u64;
pub type Epoch = u64;
pub type UnixSeconds = u64;
pub type ValidatorIndex = u64;
pub type ExecutionBlockNumber = u64;

/// Length of a compressed BLS public key in bytes.
pub const PUBLIC_KEY_COMPRESSED_SIZE: usize = 48;

/// Length of a compressed BLS signature in bytes.
pub const SIGNATURE_COMPRESSED_SIZE: usize = 96;

construct_fixed_hash! {
    pub struct PublicKeyBytes(PUBLIC_KEY_COMPRESSED_SIZE);
}

construct_fixed_hash! {
    pub struct SignatureBytes(SIGNATURE_COMPRESSED_SIZE);
}

impl PublicKeyBytes {
    /// Full `0x`-prefixed lowercase hex encoding.
    ///
    /// `Display` for fixed hashes abbreviates the middle bytes, which is
    /// unusable on the wire.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encoding_covers_all_bytes() {
        let encoded = PublicKeyBytes::repeat_byte(0xab).to_hex_string();

        assert_eq!(encoded.len(), 2 + 2 * PUBLIC_KEY_COMPRESSED_SIZE);
        assert_eq!(encoded, format!("0x{}", "ab".repeat(48)));
    }

    #[test]
    fn zero_key_encodes_to_zero_digits() {
        assert_eq!(
            PublicKeyBytes::zero().to_hex_string(),
            format!("0x{}", "0".repeat(96)),
        );
    }
}
