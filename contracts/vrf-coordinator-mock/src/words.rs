use cosmwasm_std::Uint128;
use sha2::{Digest, Sha256};

/// Derive `num_words` pseudo-random words for a request.
///
/// word[i] = first 16 bytes of sha256(request_id_be || i_be), big-endian.
/// Deterministic so tests can predict the outcome of a fulfillment.
pub fn derive_words(request_id: u64, num_words: u32) -> Vec<Uint128> {
    (0..num_words)
        .map(|index| {
            let mut hasher = Sha256::new();
            hasher.update(request_id.to_be_bytes());
            hasher.update(index.to_be_bytes());
            let digest: [u8; 32] = hasher.finalize().into();
            let mut word = [0u8; 16];
            word.copy_from_slice(&digest[..16]);
            Uint128::new(u128::from_be_bytes(word))
        })
        .collect()
}
