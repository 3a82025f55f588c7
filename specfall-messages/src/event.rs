use std::ops::Range;

use crate::Orientation;

/// Events sent from the display worker to the UI.
#[derive(Debug)]
pub enum Event {
    /// A flushed waterfall image, ready to be uploaded as a texture.
    Waterfall(WaterfallImage),
}

/// Owned copy of the visible part of the waterfall.
///
/// `samples` is row-major, `rows` rows of `channels.len()` values each, with
/// row 0 at the top of the display.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallImage {
    pub channels: Range<usize>,
    pub rows: usize,
    pub orientation: Orientation,
    pub samples: Vec<f32>,
}

impl WaterfallImage {
    pub fn width(&self) -> usize {
        self.channels.len()
    }

    /// One row of the image, top to bottom.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let width = self.width();
        self.samples.get(index * width..(index + 1) * width)
    }

    /// Smallest and largest finite sample, if there is one.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> WaterfallImage {
        WaterfallImage {
            channels: 2..5,
            rows: 2,
            orientation: Orientation::NewestFirst,
            samples: vec![1.0, 2.0, 3.0, -4.0, f32::NAN, 6.0],
        }
    }

    #[test]
    fn test_rows_are_sliced_by_channel_width() {
        let image = image();
        assert_eq!(image.width(), 3);
        assert_eq!(image.row(0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(image.row(1).map(|r| r[0]), Some(-4.0));
        assert_eq!(image.row(2), None);
    }

    #[test]
    fn test_value_range_skips_non_finite_samples() {
        assert_eq!(image().value_range(), Some((-4.0, 6.0)));

        let empty = WaterfallImage {
            samples: vec![f32::NAN],
            ..image()
        };
        assert_eq!(empty.value_range(), None);
    }
}
