use crate::audio::AudioBackend;
use crate::cursor::PlaybackCursor;
use crate::error::PlaybackError;
use crate::model::Track;
use tracing::{debug, warn};

pub struct MusicPlayer {
    backend: Box<dyn AudioBackend>,
    pub cursor: PlaybackCursor,
    current: Option<Track>,
    playing: bool,
    paused: bool,
    volume: f32,
}

impl MusicPlayer {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self::with_cursor(backend, PlaybackCursor::new())
    }

    pub fn with_cursor(backend: Box<dyn AudioBackend>, cursor: PlaybackCursor) -> Self {
        Self {
            backend,
            cursor,
            current: None,
            playing: false,
            paused: false,
            volume: 0.7,
        }
    }

    pub fn audio_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn output_name(&self) -> Option<String> {
        self.backend.output_name()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn play_track(&mut self, track: &Track) -> Result<(), PlaybackError> {
        let Some(path) = track.playable_path() else {
            return Err(PlaybackError::Unplayable {
                title: track.title.clone(),
            });
        };
        self.ensure_available()?;

        self.backend.load(path).map_err(|err| {
            warn!("failed to load {}: {err:#}", path.display());
            PlaybackError::audio(&err)
        })?;
        self.backend.play().map_err(|err| PlaybackError::audio(&err))?;

        debug!("playing {}", track.title);
        self.current = Some(track.clone());
        self.playing = true;
        self.paused = false;
        Ok(())
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        let Some(track) = self.current.clone() else {
            return Err(PlaybackError::NothingLoaded);
        };
        if self.playing {
            return Ok(());
        }
        self.play_track(&track)
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        if !self.playing {
            return Err(PlaybackError::NothingLoaded);
        }
        self.backend.pause().map_err(|err| PlaybackError::audio(&err))?;
        self.paused = true;
        self.playing = false;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        if !self.paused {
            return Err(PlaybackError::NothingLoaded);
        }
        self.backend.resume().map_err(|err| PlaybackError::audio(&err))?;
        self.paused = false;
        self.playing = true;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        self.backend.stop().map_err(|err| PlaybackError::audio(&err))?;
        self.playing = false;
        self.paused = false;
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        self.volume = volume.clamp(0.0, 1.0);
        self.backend
            .set_volume(self.volume)
            .map_err(|err| PlaybackError::audio(&err))
    }

    fn ensure_available(&self) -> Result<(), PlaybackError> {
        if self.backend.is_available() {
            Ok(())
        } else {
            Err(PlaybackError::AudioUnavailable)
        }
    }
}
