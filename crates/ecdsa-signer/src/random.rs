use alloy_primitives::U256;
use rand::{CryptoRng, RngCore};
use rand_core::OsRng;
use tracing::trace;
use zeroize::Zeroizing;

/// Generates a fixed-size array of cryptographically secure random bytes.
pub fn random_bytes_fixed<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Draws a big-endian scalar uniformly from `[1, order - 1]`.
///
/// Candidates outside the range are discarded and redrawn. For both
/// supported curves the first draw succeeds with overwhelming probability.
/// Every candidate, kept or not, is wiped when it goes out of scope.
pub fn random_scalar_bytes<R: RngCore + CryptoRng>(
    rng: &mut R,
    order: U256,
) -> Zeroizing<[u8; 32]> {
    // Big-endian arrays of equal length order the same way as the numbers.
    let order = order.to_be_bytes::<32>();
    let mut attempts = 0u32;
    loop {
        let mut candidate = Zeroizing::new([0u8; 32]);
        rng.fill_bytes(candidate.as_mut_slice());
        if candidate.iter().any(|&b| b != 0) && *candidate < order {
            if attempts > 0 {
                trace!(attempts, "rejected out-of-range scalar candidates");
            }
            return candidate;
        }
        attempts += 1;
    }
}
