//! Seeded random streams.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source handed to systems that roll dice.
pub type SimRng = ChaCha8Rng;

/// Independent stream `stream` derived from `seed`, so systems sharing one
/// seed do not replay each other's rolls.
#[must_use]
pub fn seeded(seed: u64, stream: u64) -> SimRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}
