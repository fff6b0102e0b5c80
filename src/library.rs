use crate::model::Track;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a", "aac", "opus"];

pub fn scan_folder(root: &Path) -> Vec<Track> {
    let mut tracks: Vec<Track> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_audio(entry.path()))
        .map(|entry| track_for_file(entry.path()))
        .collect();

    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    tracks
}

pub fn track_for_file(path: &Path) -> Track {
    let title = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("unknown")
        .to_string();
    Track::new(title, Some(PathBuf::from(path)))
}

pub fn is_audio(path: &Path) -> bool {
    let ext = path.extension().and_then(OsStr::to_str).unwrap_or_default();
    AUDIO_EXTENSIONS
        .iter()
        .any(|supported| ext.eq_ignore_ascii_case(supported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scan_filters_non_audio_files() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("nested")).expect("nested");
        fs::write(dir.path().join("b.MP3"), b"").expect("mp3");
        fs::write(dir.path().join("nested").join("a.flac"), b"").expect("flac");
        fs::write(dir.path().join("notes.txt"), b"").expect("txt");

        let tracks = scan_folder(dir.path());
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["b.MP3", "a.flac"]);
        assert!(tracks.iter().all(|t| t.path.is_some()));
    }

    #[test]
    fn missing_folder_yields_nothing() {
        assert!(scan_folder(Path::new("no-such-folder-for-mixtape")).is_empty());
    }
}
