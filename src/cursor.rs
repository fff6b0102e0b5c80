//! Next/previous index selection for sequential and shuffled playback.
//!
//! The shuffle order is drawn once when shuffle is enabled and is not
//! redrawn when the playlist changes afterwards, so entries may point past
//! the end of a shrunken playlist. Callers treat such indices as unplayable.

use crate::error::PlaybackError;
use crate::model::PlaybackMode;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

#[derive(Debug)]
pub struct PlaybackCursor {
    mode: PlaybackMode,
    current_index: usize,
    shuffle_order: Vec<usize>,
    shuffle_position: Option<usize>,
    shuffle_rng: SmallRng,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    pub fn with_rng(shuffle_rng: SmallRng) -> Self {
        Self {
            mode: PlaybackMode::Sequential,
            current_index: 0,
            shuffle_order: Vec::new(),
            shuffle_position: None,
            shuffle_rng,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    pub fn shuffle_position(&self) -> Option<usize> {
        self.shuffle_position
    }

    pub fn current_shuffle_entry(&self) -> Option<usize> {
        self.shuffle_order.get(self.shuffle_position?).copied()
    }

    pub fn select(&mut self, index: usize) {
        self.current_index = index;
    }

    pub fn enable_shuffle(&mut self, playlist_len: usize) -> Result<(), PlaybackError> {
        if playlist_len == 0 {
            self.disable_shuffle();
            return Err(PlaybackError::EmptyPlaylist);
        }

        self.shuffle_order = (0..playlist_len).collect();
        self.shuffle_order.shuffle(&mut self.shuffle_rng);
        self.shuffle_position = Some(0);
        self.mode = PlaybackMode::Shuffled;
        Ok(())
    }

    pub fn disable_shuffle(&mut self) {
        self.mode = PlaybackMode::Sequential;
        self.shuffle_order.clear();
        self.shuffle_position = None;
    }

    pub fn next_index(&mut self, playlist_len: usize) -> Option<usize> {
        self.step(playlist_len, 1)
    }

    pub fn prev_index(&mut self, playlist_len: usize) -> Option<usize> {
        self.step(playlist_len, -1)
    }

    fn step(&mut self, playlist_len: usize, delta: isize) -> Option<usize> {
        if playlist_len == 0 {
            return None;
        }

        if self.mode == PlaybackMode::Shuffled && !self.shuffle_order.is_empty() {
            let from = self.shuffle_position.map_or(-1, |pos| pos as isize);
            let position = wrap(from + delta, self.shuffle_order.len());
            self.shuffle_position = Some(position);
            return self.shuffle_order.get(position).copied();
        }

        self.current_index = wrap(self.current_index as isize + delta, playlist_len);
        Some(self.current_index)
    }
}

fn wrap(value: isize, len: usize) -> usize {
    value.rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prop_assert_eq;
    use std::collections::HashSet;

    fn seeded() -> PlaybackCursor {
        PlaybackCursor::with_rng(SmallRng::seed_from_u64(42))
    }

    #[test]
    fn sequential_next_wraps() {
        let mut cursor = seeded();
        assert_eq!(cursor.next_index(3), Some(1));
        assert_eq!(cursor.next_index(3), Some(2));
        assert_eq!(cursor.next_index(3), Some(0));
    }

    #[test]
    fn sequential_prev_wraps_below_zero() {
        let mut cursor = seeded();
        assert_eq!(cursor.prev_index(3), Some(2));
        assert_eq!(cursor.prev_index(3), Some(1));
    }

    #[test]
    fn empty_playlist_yields_nothing() {
        let mut cursor = seeded();
        assert_eq!(cursor.next_index(0), None);
        assert_eq!(cursor.prev_index(0), None);
    }

    #[test]
    fn enable_shuffle_on_empty_playlist_fails() {
        let mut cursor = seeded();
        assert_eq!(cursor.enable_shuffle(0), Err(PlaybackError::EmptyPlaylist));
        assert_eq!(cursor.mode(), PlaybackMode::Sequential);
        assert!(cursor.shuffle_order().is_empty());
        assert_eq!(cursor.shuffle_position(), None);
    }

    #[test]
    fn enable_shuffle_builds_permutation_at_position_zero() {
        let mut cursor = seeded();
        cursor.enable_shuffle(3).expect("non-empty");
        assert_eq!(cursor.mode(), PlaybackMode::Shuffled);
        assert_eq!(cursor.shuffle_position(), Some(0));
        let entries: HashSet<usize> = cursor.shuffle_order().iter().copied().collect();
        assert_eq!(entries, HashSet::from([0, 1, 2]));
        assert_eq!(cursor.shuffle_order().len(), 3);
    }

    #[test]
    fn shuffled_next_visits_every_index_once_per_cycle() {
        let mut cursor = seeded();
        cursor.enable_shuffle(5).expect("non-empty");
        let order = cursor.shuffle_order().to_vec();
        let visited: Vec<usize> = (0..5).filter_map(|_| cursor.next_index(5)).collect();
        let expected: Vec<usize> = (1..=5).map(|step| order[step % 5]).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn shuffled_prev_walks_back_through_order() {
        let mut cursor = seeded();
        cursor.enable_shuffle(4).expect("non-empty");
        let order = cursor.shuffle_order().to_vec();
        assert_eq!(cursor.prev_index(4), Some(order[3]));
        assert_eq!(cursor.shuffle_position(), Some(3));
        assert_eq!(cursor.next_index(4), Some(order[0]));
    }

    #[test]
    fn disable_shuffle_returns_to_sequential() {
        let mut cursor = seeded();
        cursor.enable_shuffle(3).expect("non-empty");
        cursor.select(1);
        cursor.disable_shuffle();
        assert_eq!(cursor.mode(), PlaybackMode::Sequential);
        assert!(cursor.shuffle_order().is_empty());
        assert_eq!(cursor.next_index(3), Some(2));
    }

    #[test]
    fn shuffle_order_is_not_redrawn_when_playlist_shrinks() {
        let mut cursor = seeded();
        cursor.enable_shuffle(4).expect("non-empty");
        let order = cursor.shuffle_order().to_vec();
        let stepped: Vec<usize> = (0..4).filter_map(|_| cursor.next_index(2)).collect();
        assert_eq!(cursor.shuffle_order(), order.as_slice());
        assert!(stepped.iter().any(|idx| *idx >= 2));
    }

    proptest::proptest! {
        #[test]
        fn next_then_prev_round_trips(len in 2usize..64, start in 0usize..64) {
            let mut cursor = seeded();
            let start = start % len;
            cursor.select(start);
            let next = cursor.next_index(len).expect("non-empty");
            prop_assert_eq!(next, (start + 1) % len);
            prop_assert_eq!(cursor.prev_index(len), Some(start));
        }

        #[test]
        fn indices_stay_in_bounds(len in 1usize..40, steps in proptest::collection::vec(0u8..4, 1..100)) {
            let mut cursor = seeded();
            for step in steps {
                let idx = match step {
                    0 => cursor.next_index(len),
                    1 => cursor.prev_index(len),
                    2 => {
                        cursor.enable_shuffle(len).expect("non-empty");
                        cursor.current_shuffle_entry()
                    }
                    _ => {
                        cursor.disable_shuffle();
                        cursor.next_index(len)
                    }
                };
                let idx = idx.expect("non-empty playlist");
                proptest::prop_assert!(idx < len);
            }
        }
    }
}
