use std::fmt;

/// Frequency in Hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hertz(pub u64);

impl fmt::Display for Hertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1_000_000 {
            write!(f, "{:.3} MHz", self.0 as f64 / 1e6)
        } else if self.0 >= 1_000 {
            write!(f, "{:.3} kHz", self.0 as f64 / 1e3)
        } else {
            write!(f, "{} Hz", self.0)
        }
    }
}

/// Maps channel indices to sky frequencies.
///
/// The spectrometer splits `bandwidth` into `channels` equal bins. Sampling in
/// Nyquist zone `z` (1-based) shifts the band up by `(z - 1) * bandwidth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelAxis {
    bandwidth_hz: f64,
    nyquist_zone: u32,
    channels: usize,
}

impl ChannelAxis {
    pub fn new(bandwidth_hz: f64, nyquist_zone: u32, channels: usize) -> Self {
        Self {
            bandwidth_hz,
            nyquist_zone: nyquist_zone.max(1),
            channels: channels.max(1),
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Width of a single channel.
    pub fn resolution(&self) -> Hertz {
        Hertz((self.bandwidth_hz / self.channels as f64).round() as u64)
    }

    /// Lower edge of `channel`. `channel == channels` gives the top of the band.
    pub fn frequency(&self, channel: usize) -> Hertz {
        let base = f64::from(self.nyquist_zone - 1) * self.bandwidth_hz;
        let offset = self.bandwidth_hz * channel as f64 / self.channels as f64;
        Hertz((base + offset).round() as u64)
    }
}
