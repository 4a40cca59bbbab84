//! Deterministic key sampling and manifest name suffixes.
//!
//! Both draw from explicitly passed RNGs. Sampling runs use a fixed seed so
//! repeated invocations over the same listing pick the same keys; suffix
//! generation uses OS entropy so concurrent invocations cannot collide.

use rand::seq::SliceRandom;
use rand::Rng;

/// Sample `n` keys from `keys` using the provided RNG.
///
/// `n == 0` means all keys: the full list is returned in input order. The
/// same applies when `n` meets or exceeds the list length. Otherwise exactly
/// `n` keys are drawn; identically seeded RNGs over the same list yield the
/// same subset.
pub fn sample_keys(keys: &[String], n: usize, rng: &mut impl Rng) -> Vec<String> {
    if n == 0 || n >= keys.len() {
        return keys.to_vec();
    }

    keys.choose_multiple(rng, n).cloned().collect()
}

/// Random 8-character lowercase suffix for manifest object names.
pub fn manifest_suffix(rng: &mut impl Rng) -> String {
    (0..8).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}
