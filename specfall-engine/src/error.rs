use std::io;
use thiserror::Error;

/// Errors from the rolling waterfall buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaterfallError {
    #[error("frame has {actual} channels, waterfall expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("waterfall depth must be at least one integration")]
    InvalidDepth,
    #[error("waterfall needs at least one channel")]
    NoChannels,
    #[error("{depth} integrations of {channels} channels will not fit in memory")]
    DepthTooLarge { depth: usize, channels: usize },
    #[error("channel window {start}..{end} is outside 0..{channels}")]
    InvalidWindow {
        start: usize,
        end: usize,
        channels: usize,
    },
}

/// A control command the worker refused to apply. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("channel range {start}..{end} is empty after clamping to the band")]
    EmptyChannelRange { start: usize, end: usize },
    #[error("number of integrations must be positive, got {0}")]
    InvalidDepth(i64),
    #[error("cannot keep {0} integrations: {1}")]
    DepthTooLarge(i64, WaterfallError),
}

/// Errors from a spectrometer adapter.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// A single read failed; the next poll may succeed.
    #[error("transient device error: {0}")]
    Transient(String),
    #[error("device disconnected: {0}")]
    Disconnected(String),
    #[error("capture exhausted after {frames} frames")]
    Exhausted { frames: u64 },
    #[error("device I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl DeviceError {
    /// Whether the worker should skip this cycle and keep polling.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transient(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
            Self::Disconnected(_) | Self::Exhausted { .. } => false,
        }
    }
}

/// Errors from a render sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Nobody is looking at the output any more.
    #[error("render sink closed")]
    Closed,
    #[error("render failed: {0}")]
    Render(String),
}
