#![no_main]

use libfuzzer_sys::fuzz_target;
use mixtape::cursor::PlaybackCursor;
use mixtape::model::PlaybackMode;
use mixtape::playlist::Playlist;

fuzz_target!(|data: &[u8]| {
    let mut playlist = Playlist::new("fuzz");
    let mut cursor = PlaybackCursor::new();
    let mut expected: Vec<String> = Vec::new();

    for byte in data {
        let title = format!("t{}", byte >> 4);
        match byte % 7 {
            0 | 1 => {
                playlist.add(title.clone(), None);
                expected.push(title);
            }
            2 => {
                let removed = playlist.remove(&title).is_ok();
                let position = expected.iter().position(|t| *t == title);
                assert_eq!(removed, position.is_some());
                if let Some(idx) = position {
                    expected.remove(idx);
                }
            }
            3 => {
                let shuffled = cursor.enable_shuffle(playlist.len()).is_ok();
                assert_eq!(shuffled, !playlist.is_empty());
            }
            4 => cursor.disable_shuffle(),
            5 => {
                let next = cursor.next_index(playlist.len());
                assert_eq!(next.is_none(), playlist.is_empty());
                if cursor.mode() == PlaybackMode::Sequential {
                    assert!(next.is_none_or(|idx| idx < playlist.len()));
                }
            }
            _ => {
                let prev = cursor.prev_index(playlist.len());
                assert_eq!(prev.is_none(), playlist.is_empty());
            }
        }
        assert_eq!(playlist.sequential_order(), expected);
    }
});
