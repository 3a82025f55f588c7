use std::collections::VecDeque;
use std::ops::Range;

use specfall_messages::{Orientation, WaterfallImage};

use crate::error::WaterfallError;

/// One spectral power vector, as read from the device.
pub type Frame = Vec<f32>;

/// Most samples the waterfall will hold, 1 GiB of `f32`.
pub const MAX_SAMPLES: usize = 1 << 28;

/// Rolling buffer of the most recent integrations.
///
/// Rows are stored newest first. `depth()` rows of `channel_count()` samples
/// each are present at all times; rows that have not been filled yet are zero.
#[derive(Debug, Clone)]
pub struct Waterfall {
    rows: VecDeque<Box<[f32]>>,
    channel_count: usize,
    orientation: Orientation,
}

impl Waterfall {
    pub fn new(
        depth: usize,
        channel_count: usize,
        orientation: Orientation,
    ) -> Result<Self, WaterfallError> {
        if depth == 0 {
            return Err(WaterfallError::InvalidDepth);
        }
        if channel_count == 0 {
            return Err(WaterfallError::NoChannels);
        }
        let mut waterfall = Self {
            rows: VecDeque::new(),
            channel_count,
            orientation,
        };
        waterfall.grow(depth)?;
        Ok(waterfall)
    }

    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Insert `frame` as the newest row and evict the oldest one.
    pub fn push(&mut self, frame: Frame) -> Result<(), WaterfallError> {
        if frame.len() != self.channel_count {
            return Err(WaterfallError::ShapeMismatch {
                expected: self.channel_count,
                actual: frame.len(),
            });
        }
        self.rows.pop_back();
        self.rows.push_front(frame.into_boxed_slice());
        Ok(())
    }

    /// Change the number of rows, dropping or zero-padding at the oldest end.
    pub fn resize(&mut self, depth: usize) -> Result<(), WaterfallError> {
        if depth == 0 {
            return Err(WaterfallError::InvalidDepth);
        }
        if depth < self.rows.len() {
            self.rows.truncate(depth);
            Ok(())
        } else {
            self.grow(depth)
        }
    }

    /// Zero-pad at the oldest end up to `depth` rows. Nothing changes on error.
    fn grow(&mut self, depth: usize) -> Result<(), WaterfallError> {
        let too_large = WaterfallError::DepthTooLarge {
            depth,
            channels: self.channel_count,
        };
        match depth.checked_mul(self.channel_count) {
            Some(samples) if samples <= MAX_SAMPLES => {}
            _ => return Err(too_large),
        }
        let missing = depth.saturating_sub(self.rows.len());
        self.rows.try_reserve(missing).map_err(|_| too_large)?;
        for _ in 0..missing {
            self.rows.push_back(zero_row(self.channel_count));
        }
        Ok(())
    }

    /// Borrow columns `[start, end)` of every row.
    pub fn window(&self, channels: Range<usize>) -> Result<WaterfallWindow<'_>, WaterfallError> {
        if channels.start >= channels.end || channels.end > self.channel_count {
            return Err(WaterfallError::InvalidWindow {
                start: channels.start,
                end: channels.end,
                channels: self.channel_count,
            });
        }
        Ok(WaterfallWindow::new(self, channels))
    }

    /// Full rows in display order.
    pub fn rows(&self) -> Box<dyn Iterator<Item = &[f32]> + '_> {
        let rows = self.rows.iter().map(|row| &row[..]);
        match self.orientation {
            Orientation::NewestFirst => Box::new(rows),
            Orientation::OldestFirst => Box::new(rows.rev()),
        }
    }
}

fn zero_row(channels: usize) -> Box<[f32]> {
    vec![0.0; channels].into_boxed_slice()
}

/// Read-only projection of a channel range across the whole waterfall.
#[derive(Debug, Clone)]
pub struct WaterfallWindow<'a> {
    waterfall: &'a Waterfall,
    channels: Range<usize>,
}

impl<'a> WaterfallWindow<'a> {
    /// Callers guarantee `channels` is a non-empty range inside the band.
    pub(crate) fn new(waterfall: &'a Waterfall, channels: Range<usize>) -> Self {
        debug_assert!(channels.start < channels.end && channels.end <= waterfall.channel_count);
        Self {
            waterfall,
            channels,
        }
    }

    pub fn channels(&self) -> Range<usize> {
        self.channels.clone()
    }

    pub fn width(&self) -> usize {
        self.channels.len()
    }

    pub fn height(&self) -> usize {
        self.waterfall.depth()
    }

    pub fn orientation(&self) -> Orientation {
        self.waterfall.orientation
    }

    /// Windowed rows in display order, row 0 first.
    pub fn rows(&self) -> impl Iterator<Item = &'a [f32]> + '_ {
        let waterfall: &'a Waterfall = self.waterfall;
        waterfall.rows().map(|row| &row[self.channels.clone()])
    }

    /// Copy the window out, for sinks that hand the image to another thread.
    pub fn to_image(&self) -> WaterfallImage {
        let mut samples = Vec::with_capacity(self.width() * self.height());
        for row in self.rows() {
            samples.extend_from_slice(row);
        }
        WaterfallImage {
            channels: self.channels(),
            rows: self.height(),
            orientation: self.orientation(),
            samples,
        }
    }
}
