use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("{title} not found.")]
    NotFound { title: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Playlist is empty.")]
    EmptyPlaylist,

    #[error("{title} has no playable file.")]
    Unplayable { title: String },

    #[error("No playable track found.")]
    NoPlayableTrack,

    #[error("Audio playback is not available.")]
    AudioUnavailable,

    #[error("No track loaded.")]
    NothingLoaded,

    #[error("Audio error: {0}")]
    Audio(String),
}

impl PlaybackError {
    pub(crate) fn audio(err: &anyhow::Error) -> Self {
        Self::Audio(format!("{err:#}"))
    }
}
