//! Seeded random-integer sources for reproducible experiments.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::strategy::Strategy;

/// Independent streams derived from one user-visible seed.
///
/// Each aggregation pass draws from its own stream, so adding trials to one
/// strategy never shifts the draws seen by the other.
#[derive(Debug, Clone)]
pub struct RngStreams {
    seed: u64,
    switch: CountingRng<ChaCha20Rng>,
    keep: CountingRng<ChaCha20Rng>,
    interleaved: CountingRng<ChaCha20Rng>,
}

impl RngStreams {
    /// Construct the streams from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            switch: CountingRng::from_seed_u64(derive_stream_seed(seed, b"switch")),
            keep: CountingRng::from_seed_u64(derive_stream_seed(seed, b"keep")),
            interleaved: CountingRng::from_seed_u64(derive_stream_seed(seed, b"interleaved")),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream dedicated to a single strategy's pass.
    pub fn strategy(&mut self, strategy: Strategy) -> &mut CountingRng<ChaCha20Rng> {
        match strategy {
            Strategy::Switch => &mut self.switch,
            Strategy::Keep => &mut self.keep,
        }
    }

    /// Stream shared by both strategies in an interleaved pass.
    pub fn interleaved(&mut self) -> &mut CountingRng<ChaCha20Rng> {
        &mut self.interleaved
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    #[must_use]
    pub fn from_seed_u64(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Domain-separate a user seed into a per-stream seed.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// Fresh seed from OS entropy, for runs that did not ask for one.
#[must_use]
pub fn entropy_seed() -> u64 {
    rand::random()
}
