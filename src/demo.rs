use anyhow::{Context, Result, bail};
use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

const SAMPLE_RATE: u32 = 44_100;
const BITS_PER_SAMPLE: u16 = 16;
// RIFF sizes are u32 and the header takes 36 bytes of that budget.
const MAX_DATA_BYTES: u64 = u32::MAX as u64 - 36;
const DEMO_NOTES: &[(u32, &str)] = &[
    (440, "A4 Note - 440Hz"),
    (523, "C5 Note - 523Hz"),
    (659, "E5 Note - 659Hz"),
    (784, "G5 Note - 784Hz"),
    (880, "A5 Note - 880Hz"),
];

pub const SAMPLE_TITLES: &[&str] = &[
    "Uchiha Madara Speech (AMV).mp3",
    "Top 10 Attitude Background Music.mp3",
    "Tum Hi Ho - Aashiqui 2.mp3",
];

pub fn generate_test_tone(dir: &Path, frequency: u32, duration_secs: u16) -> Result<PathBuf> {
    let total_samples = SAMPLE_RATE * u32::from(duration_secs);
    let data_bytes = u64::from(total_samples) * u64::from(BITS_PER_SAMPLE / 8);
    if data_bytes > MAX_DATA_BYTES {
        bail!("a {duration_secs}s tone does not fit in a WAV file");
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_millis();
    let mut path = dir.join(format!("tone_{frequency}Hz_{stamp}.wav"));
    let mut suffix = 1_u32;
    while path.exists() {
        path = dir.join(format!("tone_{frequency}Hz_{stamp}_{suffix}.wav"));
        suffix += 1;
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for n in 0..total_samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = ((2.0 * PI * frequency as f32 * t).sin() * f32::from(i16::MAX)) as i16;
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn create_demo_tracks(dir: &Path, duration_secs: u16) -> Vec<(String, PathBuf)> {
    DEMO_NOTES
        .iter()
        .filter_map(
            |(frequency, title)| match generate_test_tone(dir, *frequency, duration_secs) {
                Ok(path) => Some((title.to_string(), path)),
                Err(err) => {
                    warn!("failed to generate demo tone {frequency}Hz: {err:#}");
                    None
                }
            },
        )
        .collect()
}
