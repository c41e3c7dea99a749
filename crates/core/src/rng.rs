//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer. Each bag holds one of each piece
//! (I, O, T, S, Z, J, L), shuffled with Fisher-Yates. The pending queue is
//! topped up with a whole new bag whenever fewer than seven pieces remain, so
//! previews never run dry and every bag-aligned window of seven draws is a
//! permutation of all kinds.
//!
//! The shuffle is driven by a seeded [`StdRng`], which makes a game fully
//! reproducible from its seed.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, BAG_SIZE};

/// Produce one uniformly shuffled bag of all seven kinds.
///
/// For i from the last index down to 1, pick j uniformly in `[0, i]` and swap.
pub fn next_bag<R: Rng>(rng: &mut R) -> [PieceKind; BAG_SIZE] {
    let mut bag = PieceKind::ALL;
    for i in (1..bag.len()).rev() {
        let j = rng.gen_range(0..=i);
        bag.swap(i, j);
    }
    bag
}

/// 7-bag piece queue
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Upcoming kinds, front is drawn next
    pending: VecDeque<PieceKind>,
    /// RNG for shuffling
    rng: StdRng,
    /// Seed the RNG was created with (for restarting with the same sequence)
    seed: u64,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u64) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(BAG_SIZE * 2),
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        queue.refill();
        queue
    }

    /// Create a queue whose first draws are `kinds`, followed by seeded bags.
    ///
    /// Intended for fixtures that need a known piece order.
    pub fn with_pending(seed: u64, kinds: &[PieceKind]) -> Self {
        let mut queue = Self {
            pending: kinds.iter().copied().collect(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        queue.refill();
        queue
    }

    /// Append fresh bags until at least one full bag is pending
    fn refill(&mut self) {
        while self.pending.len() < BAG_SIZE {
            let bag = next_bag(&mut self.rng);
            self.pending.extend(bag);
            log::trace!("piece queue refilled ({} pending)", self.pending.len());
        }
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        self.refill();
        let piece = self
            .pending
            .pop_front()
            .unwrap_or_else(|| unreachable!("queue refilled above"));
        self.refill();
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.pending[0]
    }

    /// Peek at the next `N` pieces.
    ///
    /// The queue always holds at least one bag, so `N` may be up to seven.
    pub fn preview<const N: usize>(&self) -> [PieceKind; N] {
        assert!(N <= BAG_SIZE, "preview longer than one bag");
        let out: ArrayVec<PieceKind, N> = self.pending.iter().copied().take(N).collect();
        out.into_inner()
            .unwrap_or_else(|_| unreachable!("queue holds at least one bag"))
    }

    /// Number of kinds currently pending
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending kind and start over with a fresh bag.
    ///
    /// The RNG keeps its state, so the next bag is not a repeat of the first.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.refill();
    }

    /// Get the seed this queue was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get current pending kinds for testing/debugging
    #[cfg(test)]
    pub fn pending(&self) -> &VecDeque<PieceKind> {
        &self.pending
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
