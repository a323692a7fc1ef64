//! Random alphabetic tokens for unique, non-secret identifiers.
//!
//! Letters are taken 6 bits at a time from a 63-bit draw. Groups that fall
//! outside the 52-letter alphabet are discarded without filling a slot, so
//! every letter is equally likely. Not suitable for secrets.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore as _, SeedableRng as _};

/// Output alphabet.
pub const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const GROUP_BITS: u32 = 6;
const GROUP_MASK: u64 = (1 << GROUP_BITS) - 1;
const GROUPS_PER_DRAW: u32 = 63 / GROUP_BITS;

/// A source of 63 random bits per draw.
pub trait BitSource {
    /// Return the next draw. Only the low 63 bits are used.
    fn next_bits(&mut self) -> u64;
}

/// Default source: a fresh generator seeded from the wall clock.
#[derive(Debug)]
pub struct TimeSeeded(StdRng);

impl TimeSeeded {
    /// Seed a new generator from the current time.
    ///
    /// A per-process counter is mixed into the seed so two generators created
    /// within the same clock tick still diverge.
    #[must_use]
    pub fn new() -> Self {
        static CALLS: AtomicU64 = AtomicU64::new(0);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX));
        let call = CALLS.fetch_add(1, Ordering::Relaxed);
        Self(StdRng::seed_from_u64(
            nanos ^ call.wrapping_mul(0x9E37_79B9_7F4A_7C15),
        ))
    }
}

impl Default for TimeSeeded {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for TimeSeeded {
    fn next_bits(&mut self) -> u64 {
        self.0.next_u64() >> 1
    }
}

/// Return a random token of `len` letters.
///
/// # Examples
///
/// ```
/// let token = realize_cli::random::token(12);
/// assert_eq!(token.len(), 12);
/// assert!(token.chars().all(|c| c.is_ascii_alphabetic()));
/// ```
#[must_use]
pub fn token(len: usize) -> String {
    token_from(&mut TimeSeeded::new(), len)
}

/// Return a token of `len` letters drawn from `source`.
///
/// Slots are filled from the last to the first. A new draw is taken only
/// after all groups of the current one are used; an empty token takes none.
pub fn token_from<S: BitSource + ?Sized>(source: &mut S, len: usize) -> String {
    let mut buf = vec![0u8; len];
    let mut cache = 0u64;
    let mut remain = 0u32;

    for slot in buf.iter_mut().rev() {
        loop {
            if remain == 0 {
                cache = source.next_bits();
                remain = GROUPS_PER_DRAW;
            }
            let group = usize::try_from(cache & GROUP_MASK).unwrap_or(usize::MAX);
            cache >>= GROUP_BITS;
            remain -= 1;
            if let Some(&letter) = LETTERS.get(group) {
                *slot = letter;
                break;
            }
        }
    }

    buf.into_iter().map(char::from).collect()
}
