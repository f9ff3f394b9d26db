//! 64-bit FNV-1a, the default way to turn raw bytes into a table key.
//!
//! The table itself never hashes; callers derive keys through a
//! [`KeyHasher`] and hand the resulting `u64` to the table.

use crate::hash_table::Key;
use core::hash::{BuildHasher, Hasher};

pub const FNV1_64_INIT: u64 = 0xcbf2_9ce4_8422_2325;
pub const FNV_64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over `bytes`: xor each octet into the low bits, then multiply
/// by the FNV prime modulo 2^64.
pub fn fnv1a_64(bytes: &[u8]) -> Key {
    fold(FNV1_64_INIT, bytes)
}

#[inline]
fn fold(seed: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(seed, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_64_PRIME))
}

/// Deterministic byte-to-key function injected by callers.
pub trait KeyHasher {
    fn hash_bytes(&self, bytes: &[u8]) -> Key;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> Key,
{
    fn hash_bytes(&self, bytes: &[u8]) -> Key {
        self(bytes)
    }
}

/// Streaming FNV-1a state for use with `core::hash::Hash`.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1aHasher(u64);

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Fnv1aHasher(FNV1_64_INIT)
    }
}

impl Hasher for Fnv1aHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = fold(self.0, bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BuildFnv1a;

impl BuildHasher for BuildFnv1a {
    type Hasher = Fnv1aHasher;

    fn build_hasher(&self) -> Self::Hasher {
        Fnv1aHasher::default()
    }
}

impl KeyHasher for BuildFnv1a {
    fn hash_bytes(&self, bytes: &[u8]) -> Key {
        fnv1a_64(bytes)
    }
}
