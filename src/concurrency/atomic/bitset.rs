//! Word-packed atomic bitsets.
//!
//! This is a dense alternative to `Vec<AtomicBool>` for visited sets / flags.

use core::sync::atomic::Ordering;

use crossbeam_utils::Backoff;

use crate::sync::AtomicUsize;

/// A word-packed atomic bitset.
///
/// Bits only ever transition from cleared to set; a bitset is scoped to one
/// traversal and never cleared.
pub struct AtomicBitset {
    bits: usize,
    words: Box<[AtomicUsize]>,
}

impl AtomicBitset {
    /// Creates a new bitset with `bits` bits, all cleared.
    pub fn new(bits: usize) -> Self {
        let word_bits = usize::BITS as usize;
        let words_len = bits.div_ceil(word_bits);
        let words = (0..words_len).map(|_| AtomicUsize::new(0)).collect();
        Self { bits, words }
    }

    /// Number of bits.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    /// Returns whether `bit` is set. Out-of-range bits read as cleared.
    #[inline]
    pub fn is_set(&self, bit: usize) -> bool {
        if bit >= self.bits {
            return false;
        }
        let (word, mask) = bit_word_mask(bit);
        (self.words[word].load(Ordering::Acquire) & mask) != 0
    }

    /// Sets `bit` and returns `true` iff this call performed the 0 -> 1 transition.
    ///
    /// The word is read first and the call fails fast if the bit is already set.
    /// Otherwise the bit is installed with a compare-and-swap; when the CAS loses
    /// to a concurrent update of the same word, the freshly observed word is
    /// re-checked before retrying, since the competing update may have set this
    /// very bit. Out-of-range bits are never claimed.
    #[inline]
    pub fn claim(&self, bit: usize) -> bool {
        if bit >= self.bits {
            return false;
        }
        let (word, mask) = bit_word_mask(bit);
        let slot = &self.words[word];
        let backoff = Backoff::new();
        let mut current = slot.load(Ordering::Acquire);
        loop {
            if current & mask != 0 {
                return false;
            }
            match slot.compare_exchange(
                current,
                current | mask,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => {
                    current = observed;
                    backoff.spin();
                }
            }
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }
}

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    // `usize::BITS` is always a power-of-two (32 or 64), so use shifts/masks.
    // This is on the hot path for graph traversal.
    const WORD_SHIFT: u32 = usize::BITS.trailing_zeros();
    const BIT_MASK: usize = usize::BITS as usize - 1;
    (bit >> WORD_SHIFT, 1usize << (bit & BIT_MASK))
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn claim_sets_bit_once() {
        let b = AtomicBitset::new(130);
        assert_eq!(b.len_bits(), 130);

        assert!(!b.is_set(0));
        assert!(b.claim(0));
        assert!(b.is_set(0));
        assert!(!b.claim(0));

        assert!(b.claim(129));
        assert!(b.is_set(129));
        assert_eq!(b.count_ones(), 2);
    }

    #[test]
    fn out_of_range_is_never_claimed() {
        let b = AtomicBitset::new(10);
        assert!(!b.claim(10));
        assert!(!b.claim(usize::MAX));
        assert!(!b.is_set(10));
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn neighbouring_bits_in_one_word_are_independent() {
        let b = AtomicBitset::new(64);
        for bit in (0..64).step_by(2) {
            assert!(b.claim(bit));
        }
        for bit in (1..64).step_by(2) {
            assert!(!b.is_set(bit));
            assert!(b.claim(bit));
        }
        assert_eq!(b.count_ones(), 64);
    }

    #[test]
    fn empty_bitset_has_no_words() {
        let b = AtomicBitset::new(0);
        assert_eq!(b.len_bits(), 0);
        assert!(!b.claim(0));
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn racing_claims_on_shared_word_each_win_once() {
        // Every thread claims every bit of one word; each bit must have exactly one winner.
        let b = AtomicBitset::new(64);
        let wins: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| (0..64).filter(|&bit| b.claim(bit)).count())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(wins.iter().sum::<usize>(), 64);
        assert_eq!(b.count_ones(), 64);
    }
}
