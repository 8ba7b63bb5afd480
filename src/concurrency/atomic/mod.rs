//! Lock-free atomic primitives.
//!
//! Atomic RMW operations have inherent hardware cost; the bitset packs
//! `usize::BITS` flags per word so a visited set stays dense and cache-friendly.

/// Word-packed atomic bitsets.
pub mod bitset;

pub use bitset::AtomicBitset;
