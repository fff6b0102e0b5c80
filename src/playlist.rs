//! Ordered, owning track collection.
//!
//! Tracks live in a contiguous vector in play order. A title lookup keeps the
//! index of the first track carrying each title, so `remove` and `position`
//! hit the same entry a head-to-tail scan would.

use crate::error::PlaylistError;
use crate::model::Track;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
    title_lookup: HashMap<String, usize>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
            title_lookup: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, title: &str) -> Option<usize> {
        self.title_lookup.get(title).copied()
    }

    pub fn add(&mut self, title: impl Into<String>, path: Option<PathBuf>) {
        let track = Track::new(title, path);
        let idx = self.tracks.len();
        self.title_lookup.entry(track.title.clone()).or_insert(idx);
        self.tracks.push(track);
    }

    pub fn remove(&mut self, title: &str) -> Result<Track, PlaylistError> {
        let Some(idx) = self.position(title) else {
            return Err(PlaylistError::NotFound {
                title: title.to_string(),
            });
        };

        let removed = self.tracks.remove(idx);
        self.title_lookup = build_title_lookup(&self.tracks);
        Ok(removed)
    }

    /// Removes `old_title` and appends `new_title` at the tail.
    ///
    /// The new track does not inherit the old position. When `old_title` is
    /// absent nothing changes and the removal error is returned.
    pub fn replace(
        &mut self,
        old_title: &str,
        new_title: impl Into<String>,
        path: Option<PathBuf>,
    ) -> Result<Track, PlaylistError> {
        let removed = self.remove(old_title)?;
        self.add(new_title, path);
        Ok(removed)
    }

    pub fn all_tracks(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    pub fn sequential_order(&self) -> Vec<String> {
        self.tracks.iter().map(|track| track.title.clone()).collect()
    }

    pub fn shuffled_order(&self) -> Vec<String> {
        self.shuffled_order_with(&mut SmallRng::from_os_rng())
    }

    pub fn shuffled_order_with(&self, rng: &mut SmallRng) -> Vec<String> {
        let mut titles = self.sequential_order();
        titles.shuffle(rng);
        titles
    }
}

pub fn removed_message(title: &str) -> String {
    format!("{title} removed from playlist.")
}

pub fn replaced_message(old_title: &str, new_title: &str) -> String {
    format!("{old_title} replaced with {new_title}.")
}

fn build_title_lookup(tracks: &[Track]) -> HashMap<String, usize> {
    let mut map = HashMap::with_capacity(tracks.len());
    for (idx, track) in tracks.iter().enumerate() {
        map.entry(track.title.clone()).or_insert(idx);
    }
    map
}
