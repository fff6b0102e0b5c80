use crate::console::Console;
use crate::demo;
use crate::error::PlaybackError;
use crate::library;
use crate::model::{PlaybackMode, Track};
use crate::player::MusicPlayer;
use crate::playlist::{self, Playlist};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DISPLAY_TITLE_LIMIT: usize = 50;
const TEST_TONE_HZ: u32 = 440;
const TEST_TONE_SECONDS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

pub struct PlayerCore {
    pub playlist: Playlist,
    pub player: MusicPlayer,
    pub console: Console,
    pub status: String,
    pub dirty: bool,
}

impl PlayerCore {
    pub fn new(playlist: Playlist, player: MusicPlayer) -> Self {
        Self {
            playlist,
            player,
            console: Console::new(),
            status: String::from("Ready"),
            dirty: true,
        }
    }

    pub fn announce_startup(&mut self, audio_failure: Option<&str>) {
        self.report("Music Playlist Manager started successfully!");
        if self.player.audio_available() {
            if let Some(name) = self.player.output_name() {
                info!("audio output: {name}");
            }
            self.report("Audio system initialized successfully.");
        } else {
            if let Some(reason) = audio_failure {
                warn!("audio backend disabled: {reason}");
            }
            self.report("WARNING: Audio playback is not available.");
        }
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.playlist.all_tracks()
    }

    pub fn listing(&self) -> Vec<String> {
        self.playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(idx, track)| format!("{}. {}", idx + 1, display_title(&track.title)))
            .collect()
    }

    pub fn now_playing(&self) -> String {
        match self.player.current_track() {
            Some(track) if self.player.is_playing() || self.player.is_paused() => {
                format!("Now Playing: {}", display_title(&track.title))
            }
            _ => String::from("No song selected"),
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.player.cursor.mode()
    }

    pub fn add_track(&mut self, title: &str, path: Option<PathBuf>) {
        let title = title.trim();
        if title.is_empty() {
            self.report("Please enter a song title!");
            return;
        }

        let note = match &path {
            Some(path) => format!("File path: {}", path.display()),
            None => String::from("Note: No file path provided - song cannot be played"),
        };
        self.playlist.add(title, path);
        self.report(format!("Added song: {title}"));
        self.report(note);
    }

    pub fn remove_track(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            self.report("Please enter a song title!");
            return;
        }

        match self.playlist.remove(title) {
            Ok(_) => self.report(playlist::removed_message(title)),
            Err(err) => self.report(err.to_string()),
        }
    }

    pub fn replace_track(&mut self, old_title: &str, new_title: &str, path: Option<PathBuf>) {
        let (old_title, new_title) = (old_title.trim(), new_title.trim());
        if old_title.is_empty() || new_title.is_empty() {
            self.report("Please enter a song title!");
            return;
        }

        match self.playlist.replace(old_title, new_title, path) {
            Ok(_) => self.report(playlist::replaced_message(old_title, new_title)),
            Err(err) => self.report(err.to_string()),
        }
    }

    pub fn import_folder(&mut self, root: &Path) {
        let found = library::scan_folder(root);
        let count = found.len();
        for track in found {
            self.playlist.add(track.title, track.path);
        }
        self.report(format!("Imported {count} tracks from {}", root.display()));
    }

    pub fn load_demo_tracks(&mut self, dir: &Path, duration_secs: u16) {
        self.report("Creating demo songs with test tones...");
        let demo_tracks = demo::create_demo_tracks(dir, duration_secs);
        if demo_tracks.is_empty() {
            for title in demo::SAMPLE_TITLES {
                self.playlist.add(*title, None);
            }
            self.report("Added sample songs (no audio files)");
            return;
        }

        let count = demo_tracks.len();
        for (title, path) in demo_tracks {
            self.playlist.add(title, Some(path));
        }
        self.report(format!("Added {count} demo songs with test tones"));
    }

    pub fn generate_test_tone(&mut self, dir: &Path) {
        self.report("Generating test tone...");
        let started = self
            .console
            .lines()
            .last()
            .map(|line| line.timestamp.clone())
            .unwrap_or_default();
        match demo::generate_test_tone(dir, TEST_TONE_HZ, TEST_TONE_SECONDS) {
            Ok(path) => {
                let title = format!("Test Tone - {TEST_TONE_HZ}Hz ({started})");
                self.playlist.add(title.clone(), Some(path));
                self.report(format!("Added test tone: {title}"));
            }
            Err(err) => {
                warn!("test tone generation failed: {err:#}");
                self.report("Error generating test tone");
            }
        }
    }

    pub fn play_index(&mut self, index: usize) -> Result<(), PlaybackError> {
        let Some(track) = self.playlist.get(index).cloned() else {
            self.report(format!("No song at position {}", index + 1));
            return Err(PlaybackError::NoPlayableTrack);
        };

        match self.player.play_track(&track) {
            Ok(()) => {
                self.player.cursor.select(index);
                self.report(format!("Playing: {}", track.title));
                Ok(())
            }
            Err(err @ PlaybackError::Unplayable { .. }) => {
                self.report(format!(
                    "Could not play: {} (file not found or no file path)",
                    track.title
                ));
                Err(err)
            }
            Err(err) => {
                self.report(format!("Error playing: {} ({err})", track.title));
                Err(err)
            }
        }
    }

    pub fn toggle_play_pause(&mut self, selection: Option<usize>) {
        if self.player.is_playing() || self.player.is_paused() {
            self.pause_or_resume();
        } else if !self.playlist.is_empty() {
            let _ = self.play_index(selection.unwrap_or(0));
        }
    }

    pub fn pause_or_resume(&mut self) {
        if self.player.is_playing() {
            if self.player.pause().is_ok() {
                self.report("Music paused");
            }
        } else if self.player.is_paused() {
            if self.player.resume().is_ok() {
                self.report("Music resumed");
            }
        } else {
            self.report("Nothing is playing.");
        }
    }

    pub fn stop(&mut self) {
        match self.player.stop() {
            Ok(()) => self.report("Music stopped"),
            Err(err) => self.report(err.to_string()),
        }
    }

    pub fn set_volume_percent(&mut self, percent: u8) {
        match self.player.set_volume(f32::from(percent) / 100.0) {
            Ok(()) => {
                let applied = (self.player.volume() * 100.0).round() as u8;
                self.report(format!("Volume set to {applied}%"));
            }
            Err(_) => self.report("Error setting volume"),
        }
    }

    pub fn next(&mut self) -> Result<usize, PlaybackError> {
        self.step(Direction::Next)
    }

    pub fn previous(&mut self) -> Result<usize, PlaybackError> {
        self.step(Direction::Previous)
    }

    pub fn play_sequential(&mut self) -> Result<usize, PlaybackError> {
        self.player.cursor.disable_shuffle();
        self.report("Shuffle disabled. Sequential mode active.");

        for index in 0..self.playlist.len() {
            match self.try_play(index) {
                Ok(title) => {
                    self.report(format!("Playing: {title}"));
                    return Ok(index);
                }
                Err(PlaybackError::AudioUnavailable) => {
                    return self.fail(PlaybackError::AudioUnavailable);
                }
                Err(_) => {}
            }
        }
        self.report("No playable songs found to start sequential playback.");
        Err(PlaybackError::NoPlayableTrack)
    }

    pub fn play_shuffled(&mut self) -> Result<usize, PlaybackError> {
        let len = self.playlist.len();
        if len == 0 {
            self.report("Playlist is empty.");
            return Err(PlaybackError::EmptyPlaylist);
        }
        if let Err(err) = self.player.cursor.enable_shuffle(len) {
            self.report("Could not enable shuffle (no songs).");
            return Err(err);
        }

        for _ in 0..len {
            if let Some(index) = self.player.cursor.current_shuffle_entry() {
                match self.try_play(index) {
                    Ok(title) => {
                        self.report(format!("Playing (Shuffled): {title}"));
                        return Ok(index);
                    }
                    Err(PlaybackError::AudioUnavailable) => {
                        return self.fail(PlaybackError::AudioUnavailable);
                    }
                    Err(_) => {}
                }
            }
            self.player.cursor.next_index(len);
        }
        self.report("No playable songs found for shuffle. Add songs with valid files.");
        Err(PlaybackError::NoPlayableTrack)
    }

    /// Moves one step in `direction`, skipping unplayable tracks. At most
    /// one full lap of the playlist is tried.
    fn step(&mut self, direction: Direction) -> Result<usize, PlaybackError> {
        let len = self.playlist.len();
        if len == 0 {
            self.report("Playlist is empty.");
            return Err(PlaybackError::EmptyPlaylist);
        }

        for _ in 0..len {
            let candidate = match direction {
                Direction::Next => self.player.cursor.next_index(len),
                Direction::Previous => self.player.cursor.prev_index(len),
            };
            let Some(index) = candidate else {
                break;
            };

            match self.try_play(index) {
                Ok(title) => {
                    let label = match (direction, self.mode()) {
                        (Direction::Next, PlaybackMode::Shuffled) => "Next (Shuffled)",
                        (Direction::Next, PlaybackMode::Sequential) => "Next song",
                        (Direction::Previous, PlaybackMode::Shuffled) => "Previous (Shuffled)",
                        (Direction::Previous, PlaybackMode::Sequential) => "Previous song",
                    };
                    self.report(format!("{label}: {title}"));
                    return Ok(index);
                }
                Err(PlaybackError::AudioUnavailable) => {
                    return self.fail(PlaybackError::AudioUnavailable);
                }
                Err(err) => info!("skipping index {index}: {err}"),
            }
        }

        self.fail(PlaybackError::NoPlayableTrack)
    }

    /// Plays `index` without reporting; stale indices count as unplayable.
    fn try_play(&mut self, index: usize) -> Result<String, PlaybackError> {
        let Some(track) = self.playlist.get(index).cloned() else {
            return Err(PlaybackError::Unplayable {
                title: format!("#{index}"),
            });
        };
        self.player.play_track(&track)?;
        self.player.cursor.select(index);
        Ok(track.title)
    }

    fn fail<T>(&mut self, err: PlaybackError) -> Result<T, PlaybackError> {
        self.report(err.to_string());
        Err(err)
    }

    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.console.push(message.clone());
        self.status = message;
        self.dirty = true;
    }
}

fn display_title(title: &str) -> String {
    if title.chars().count() > DISPLAY_TITLE_LIMIT {
        let cut: String = title.chars().take(DISPLAY_TITLE_LIMIT).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}
