//! Upcoming-piece queue with a single storage slot.

use std::collections::VecDeque;

use track_builder_core::{PieceId, TrackGenerator, TrackPiece};

/// Pieces waiting to be placed: the current piece, an optional stored piece
/// and a fixed-length look-ahead of upcoming pieces.
#[derive(Clone, Debug)]
pub(crate) struct PieceQueue {
    current: TrackPiece,
    stored: Option<TrackPiece>,
    upcoming: VecDeque<TrackPiece>,
    length: usize,
    next_id: u32,
}

impl PieceQueue {
    /// Creates a queue filled from the generator.
    pub(crate) fn new(length: usize, generator: &mut dyn TrackGenerator) -> Self {
        let mut next_id = PieceId::START.get().saturating_add(1);
        let current = draw(&mut next_id, generator);
        let mut queue = Self {
            current,
            stored: None,
            upcoming: VecDeque::with_capacity(length),
            length,
            next_id,
        };
        queue.refill(generator);
        queue
    }

    /// Discards every held piece and draws a fresh set.
    ///
    /// Identifiers keep counting so pieces from earlier rounds are never reused.
    pub(crate) fn reset(&mut self, generator: &mut dyn TrackGenerator) {
        self.stored = None;
        self.upcoming.clear();
        self.current = draw(&mut self.next_id, generator);
        self.refill(generator);
    }

    pub(crate) fn current(&self) -> TrackPiece {
        self.current
    }

    pub(crate) fn stored(&self) -> Option<TrackPiece> {
        self.stored
    }

    pub(crate) fn upcoming(&self) -> impl Iterator<Item = TrackPiece> + '_ {
        self.upcoming.iter().copied()
    }

    /// Hands out the current piece and promotes the next upcoming one.
    pub(crate) fn take_current(&mut self, generator: &mut dyn TrackGenerator) -> TrackPiece {
        let taken = self.current;
        self.current = match self.upcoming.pop_front() {
            Some(piece) => piece,
            None => draw(&mut self.next_id, generator),
        };
        self.refill(generator);
        taken
    }

    /// Moves the current piece into the empty storage slot.
    ///
    /// Returns `false` without changes when storage is already occupied.
    pub(crate) fn store(&mut self, generator: &mut dyn TrackGenerator) -> bool {
        if self.stored.is_some() {
            return false;
        }

        let piece = self.take_current(generator);
        self.stored = Some(piece);
        true
    }

    /// Exchanges the current and stored pieces.
    ///
    /// Returns `false` without changes when storage is empty.
    pub(crate) fn swap(&mut self) -> bool {
        match self.stored.as_mut() {
            Some(stored) => {
                std::mem::swap(stored, &mut self.current);
                true
            }
            None => false,
        }
    }

    fn refill(&mut self, generator: &mut dyn TrackGenerator) {
        while self.upcoming.len() < self.length {
            let piece = draw(&mut self.next_id, generator);
            self.upcoming.push_back(piece);
        }
    }
}

fn draw(next_id: &mut u32, generator: &mut dyn TrackGenerator) -> TrackPiece {
    let id = PieceId::new(*next_id);
    *next_id = next_id.wrapping_add(1).max(1);
    TrackPiece::new(id, generator.next_shape())
}
