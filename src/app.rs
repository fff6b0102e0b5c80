use crate::audio;
use crate::config;
use crate::core::PlayerCore;
use crate::model::Settings;
use crate::player::MusicPlayer;
use crate::playlist::Playlist;
use anyhow::Result;
use std::io::{BufRead, Write, stdin, stdout};
use std::path::PathBuf;
use tracing::warn;

const HELP: &str = "Commands: add <title> [| <path>] | remove <title> | replace <old> | <new> [| <path>] | import <folder> | list | play [n] | pause | stop | next | prev | seq | shuffle | volume <0-100> | tone | order | help | quit";

#[derive(Debug, Default)]
pub struct AppStartupOptions {
    pub audio_disabled: bool,
    pub skip_demo: bool,
    pub playlist_name: Option<String>,
    pub volume_percent: Option<u8>,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_with_startup(options: AppStartupOptions) -> Result<()> {
    let settings = config::load_settings().unwrap_or_else(|err| {
        warn!("using default settings: {err:#}");
        Settings::default()
    });
    let mut core = build_core(&settings, &options);

    let input = stdin();
    let mut out = stdout();
    let mut seen = 0;
    render(&mut core, &mut out, &mut seen)?;
    writeln!(out, "{HELP}")?;

    for line in input.lock().lines() {
        let line = line?;
        if run_command(&mut core, &line) == Flow::Quit {
            break;
        }
        render(&mut core, &mut out, &mut seen)?;
    }

    if let Err(err) = core.player.stop() {
        tracing::debug!("stop on exit: {err}");
    }
    Ok(())
}

fn build_core(settings: &Settings, options: &AppStartupOptions) -> PlayerCore {
    let (backend, audio_failure) =
        audio::open_default(options.audio_disabled || settings.audio_disabled);
    let name = options
        .playlist_name
        .clone()
        .unwrap_or_else(|| settings.playlist_name.clone());
    let mut core = PlayerCore::new(Playlist::new(name), MusicPlayer::new(backend));
    core.announce_startup(audio_failure.as_deref());

    if core.player.audio_available() {
        match options.volume_percent {
            Some(percent) => core.set_volume_percent(percent),
            None => core.set_volume_percent((settings.volume.clamp(0.0, 1.0) * 100.0).round() as u8),
        }
    }

    if settings.demo_tones && !options.skip_demo {
        match config::tones_dir() {
            Ok(dir) => core.load_demo_tracks(&dir, settings.demo_tone_seconds),
            Err(err) => warn!("no directory for demo tones: {err:#}"),
        }
    }
    core
}

fn render(core: &mut PlayerCore, out: &mut impl Write, seen: &mut usize) -> Result<()> {
    if !core.dirty {
        return Ok(());
    }

    for line in core.console.since(*seen) {
        writeln!(out, "{line}")?;
    }
    *seen = core.console.pushed();
    writeln!(out, "-- {} ({}) --", core.playlist.name(), core.mode().label())?;
    for line in core.listing() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out, "{}", core.now_playing())?;
    out.flush()?;
    core.dirty = false;
    Ok(())
}

fn run_command(core: &mut PlayerCore, raw: &str) -> Flow {
    let input = raw.trim();
    if input.is_empty() {
        return Flow::Continue;
    }

    let mut command_split = input.splitn(2, char::is_whitespace);
    let command = command_split.next().unwrap_or_default();
    let rest = command_split.next().unwrap_or("").trim();

    match command {
        "help" => {
            core.report(HELP);
        }
        "quit" | "exit" => return Flow::Quit,
        "add" => {
            let mut parts = rest.splitn(2, '|');
            let title = parts.next().unwrap_or_default();
            let path = optional_path(parts.next());
            core.add_track(title, path);
        }
        "remove" => core.remove_track(rest),
        "replace" => {
            let mut parts = rest.splitn(3, '|');
            let old = parts.next().unwrap_or_default();
            let Some(new) = parts.next() else {
                core.report("Usage: replace <old> | <new> [| <path>]");
                return Flow::Continue;
            };
            let path = optional_path(parts.next());
            core.replace_track(old, new, path);
        }
        "import" => {
            if rest.is_empty() {
                core.report("Usage: import <folder>");
            } else {
                core.import_folder(&PathBuf::from(rest));
            }
        }
        "list" => core.dirty = true,
        "play" => {
            if rest.is_empty() {
                core.toggle_play_pause(None);
            } else {
                match rest.parse::<usize>() {
                    Ok(position) if position >= 1 => {
                        let _ = core.play_index(position - 1);
                    }
                    _ => {
                        core.report("Usage: play [position]");
                    }
                }
            }
        }
        "pause" => core.pause_or_resume(),
        "stop" => core.stop(),
        "next" => {
            let _ = core.next();
        }
        "prev" => {
            let _ = core.previous();
        }
        "seq" => {
            let _ = core.play_sequential();
        }
        "shuffle" => {
            let _ = core.play_shuffled();
        }
        "order" => {
            core.report(format!("Shuffled order: {}", core.playlist.shuffled_order().join(", ")));
        }
        "volume" => match rest.parse::<u8>() {
            Ok(percent) if percent <= 100 => core.set_volume_percent(percent),
            _ => {
                core.report("Usage: volume <0-100>");
            }
        },
        "tone" => match config::tones_dir() {
            Ok(dir) => core.generate_test_tone(&dir),
            Err(err) => {
                core.report(format!("tone error: {err:#}"));
            }
        },
        _ => {
            core.report("Unknown command. Use help");
        }
    }
    Flow::Continue
}

fn optional_path(raw: Option<&str>) -> Option<PathBuf> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
