use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which end of the waterfall is drawn as row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Newest integration at the top, scrolling down.
    #[default]
    NewestFirst,
    /// Oldest integration at the top, scrolling up.
    OldestFirst,
}

/// Spectrometer input to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antenna {
    #[default]
    Auto0,
    Auto1,
    /// Cross-correlation of both inputs. Phase display is not supported.
    Cross,
}

impl Antenna {
    /// Name of the device memory holding this input's power spectrum.
    ///
    /// Returns `None` for [`Antenna::Cross`], which has no real-valued
    /// power spectrum to show.
    pub fn source_id(self) -> Option<String> {
        match self {
            Self::Auto0 | Self::Auto1 => Some(format!("spec_{self}_real")),
            Self::Cross => None,
        }
    }
}

impl fmt::Display for Antenna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto0 => "auto0",
            Self::Auto1 => "auto1",
            Self::Cross => "cross",
        };
        f.write_str(name)
    }
}

/// Configuration for the spectrometer backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceConfig {
    /// Synthetic spectra: a half sine across the band plus unit gaussian noise.
    Debug {
        channels: usize,
        poll_interval: Duration,
        /// Fixed noise seed for reproducible runs.
        seed: Option<u64>,
    },
    /// Replay little-endian f32 frames from a capture file.
    File {
        path: PathBuf,
        channels: usize,
        poll_interval: Duration,
        loop_on_eof: bool,
    },
}

impl DeviceConfig {
    pub fn channels(&self) -> usize {
        match self {
            Self::Debug { channels, .. } | Self::File { channels, .. } => *channels,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig::Debug {
            channels: 1024,
            poll_interval: Duration::from_millis(250),
            seed: None,
        }
    }
}

/// Configuration for the display worker.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Initial number of integrations in the waterfall.
    pub depth: usize,
    pub orientation: Orientation,
    /// Device memory to read frames from, see [`Antenna::source_id`].
    pub source_id: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            depth: 500,
            orientation: Orientation::default(),
            source_id: "spec_auto0_real".to_owned(),
        }
    }
}
