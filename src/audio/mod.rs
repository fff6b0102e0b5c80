use anyhow::{Context, Result};
use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
#[cfg(unix)]
use std::ffi::CString;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub trait AudioBackend {
    fn is_available(&self) -> bool;
    fn load(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn set_volume(&mut self, volume: f32) -> Result<()>;
    fn output_name(&self) -> Option<String>;
}

/// Opens the default output device, or a disabled backend when that fails.
///
/// The second value carries the startup failure so the caller can surface it
/// once.
pub fn open_default(disabled: bool) -> (Box<dyn AudioBackend>, Option<String>) {
    if disabled {
        return (Box::new(NullAudioBackend::new()), None);
    }

    match RodioAudioBackend::new() {
        Ok(backend) => (Box::new(backend), None),
        Err(err) => {
            warn!("audio initialization failed: {err:#}");
            (Box::new(NullAudioBackend::new()), Some(format!("{err:#}")))
        }
    }
}

pub struct RodioAudioBackend {
    stream: OutputStream,
    sink: Sink,
    current: Option<PathBuf>,
    volume: f32,
}

impl RodioAudioBackend {
    pub fn new() -> Result<Self> {
        let (stream, sink) = Self::open_output_stream()?;
        Ok(Self {
            stream,
            sink,
            current: None,
            volume: 1.0,
        })
    }

    fn open_output_stream() -> Result<(OutputStream, Sink)> {
        let mut stream = with_silenced_stderr(|| {
            match OutputStreamBuilder::from_default_device()
                .context("failed to open default system output stream")
                .and_then(|builder| {
                    builder
                        .with_error_callback(|_| {})
                        .open_stream_or_fallback()
                        .context("failed to start default output stream")
                }) {
                Ok(stream) => Ok(stream),
                Err(default_err) => {
                    let host = rodio::cpal::default_host();
                    let mut started: Option<OutputStream> = None;
                    for device in host.output_devices().ok().into_iter().flatten() {
                        let name = device.name().unwrap_or_default();
                        let opened = OutputStreamBuilder::from_device(device)
                            .context("failed to open fallback output device")
                            .and_then(|builder| {
                                builder
                                    .with_error_callback(|_| {})
                                    .open_stream_or_fallback()
                                    .context("failed to start fallback output stream")
                            });
                        match opened {
                            Ok(stream) => {
                                debug!("using fallback output device {name}");
                                started = Some(stream);
                                break;
                            }
                            Err(err) => debug!("output device {name} unusable: {err:#}"),
                        }
                    }

                    started.with_context(|| {
                        format!(
                            "unable to start any audio output stream after default failed: {default_err:#}"
                        )
                    })
                }
            }
        })?;
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        Ok((stream, sink))
    }
}

impl AudioBackend for RodioAudioBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let file =
            File::open(path).with_context(|| format!("failed to open track {}", path.display()))?;
        let source = Decoder::try_from(file)
            .with_context(|| format!("failed to decode {}", path.display()))?;

        self.sink.stop();
        self.sink = Sink::connect_new(self.stream.mixer());
        self.sink.pause();
        self.sink.append(source);
        self.sink.set_volume(self.volume);
        self.current = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.current.is_none() {
            anyhow::bail!("no track loaded");
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.sink.play();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.sink.stop();
        self.current = None;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
        Ok(())
    }

    fn output_name(&self) -> Option<String> {
        Some(format!(
            "System default output ({} ch)",
            self.stream.config().channel_count()
        ))
    }
}

#[cfg(unix)]
fn with_silenced_stderr<T>(operation: impl FnOnce() -> T) -> T {
    let saved = unsafe { libc::dup(libc::STDERR_FILENO) };
    if saved < 0 {
        return operation();
    }

    let devnull = CString::new("/dev/null")
        .ok()
        .map(|path| unsafe { libc::open(path.as_ptr(), libc::O_WRONLY) })
        .unwrap_or(-1);

    if devnull >= 0 {
        unsafe {
            libc::dup2(devnull, libc::STDERR_FILENO);
            libc::close(devnull);
        }
    }

    let result = operation();

    unsafe {
        libc::dup2(saved, libc::STDERR_FILENO);
        libc::close(saved);
    }

    result
}

#[cfg(not(unix))]
fn with_silenced_stderr<T>(operation: impl FnOnce() -> T) -> T {
    operation()
}

#[derive(Default)]
pub struct NullAudioBackend;

impl NullAudioBackend {
    pub fn new() -> Self {
        Self
    }
}

impl AudioBackend for NullAudioBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        anyhow::bail!("audio disabled, cannot load {}", path.display())
    }

    fn play(&mut self) -> Result<()> {
        anyhow::bail!("audio disabled")
    }

    fn pause(&mut self) -> Result<()> {
        anyhow::bail!("audio disabled")
    }

    fn resume(&mut self) -> Result<()> {
        anyhow::bail!("audio disabled")
    }

    fn stop(&mut self) -> Result<()> {
        anyhow::bail!("audio disabled")
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        anyhow::bail!("audio disabled")
    }

    fn output_name(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioBackend, NullAudioBackend, open_default};
    use std::path::Path;

    #[test]
    fn null_backend_is_unavailable() {
        let mut backend = NullAudioBackend::new();
        assert!(!backend.is_available());
        assert!(backend.load(Path::new("song.wav")).is_err());
        assert!(backend.play().is_err());
        assert!(backend.stop().is_err());
        assert!(backend.set_volume(0.5).is_err());
        assert_eq!(backend.output_name(), None);
    }

    #[test]
    fn disabled_flag_skips_device_probe() {
        let (backend, warning) = open_default(true);
        assert!(!backend.is_available());
        assert_eq!(warning, None);
    }
}
