use std::ops::Range;

use log::info;
use specfall_messages::Orientation;

use super::RenderSink;
use crate::error::SinkError;
use crate::waterfall::WaterfallWindow;

/// What a flush reports about the newest visible row.
#[derive(Debug, Clone, PartialEq)]
struct RowSummary {
    channels: Range<usize>,
    rows: usize,
    /// Channel index of the strongest sample.
    peak_channel: usize,
    peak_power: f32,
    mean_power: f32,
}

/// Headless sink that logs one line per flushed image instead of drawing it.
#[derive(Debug, Default)]
pub struct SummarySink {
    staged: Option<RowSummary>,
    flushed: u64,
}

impl SummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of images flushed so far.
    pub fn flushed(&self) -> u64 {
        self.flushed
    }

    fn summarize(window: &WaterfallWindow<'_>) -> Option<RowSummary> {
        let channels = window.channels();
        let newest = match window.orientation() {
            Orientation::NewestFirst => window.rows().next(),
            Orientation::OldestFirst => window.rows().last(),
        }?;

        let (peak_offset, peak_power) = newest
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
        let mean_power = newest.iter().sum::<f32>() / newest.len() as f32;

        Some(RowSummary {
            peak_channel: channels.start + peak_offset,
            channels,
            rows: window.height(),
            peak_power,
            mean_power,
        })
    }
}

impl RenderSink for SummarySink {
    fn draw(&mut self, window: &WaterfallWindow<'_>) -> Result<(), SinkError> {
        self.staged = Self::summarize(window);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if let Some(summary) = self.staged.take() {
            self.flushed += 1;
            info!(
                "channels {}..{} x {} rows | peak {:.2} at channel {} | mean {:.2}",
                summary.channels.start,
                summary.channels.end,
                summary.rows,
                summary.peak_power,
                summary.peak_channel,
                summary.mean_power
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waterfall::Waterfall;

    #[test]
    fn test_reports_the_newest_row_in_either_orientation() {
        for orientation in [Orientation::NewestFirst, Orientation::OldestFirst] {
            let mut waterfall = Waterfall::new(3, 6, orientation).unwrap();
            waterfall.push(vec![9.0; 6]).unwrap();
            waterfall.push(vec![0.0, 1.0, 5.0, 2.0, 0.0, 0.0]).unwrap();

            let summary = SummarySink::summarize(&waterfall.window(1..4).unwrap()).unwrap();
            assert_eq!(summary.channels, 1..4);
            assert_eq!(summary.rows, 3);
            assert_eq!(summary.peak_channel, 2);
            assert_eq!(summary.peak_power, 5.0);
            assert!((summary.mean_power - 8.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_counts_only_flushes_after_a_draw() {
        let waterfall = Waterfall::new(1, 2, Orientation::NewestFirst).unwrap();
        let mut sink = SummarySink::new();

        sink.flush().unwrap();
        assert_eq!(sink.flushed(), 0);

        sink.draw(&waterfall.window(0..2).unwrap()).unwrap();
        sink.flush().unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.flushed(), 1);
    }
}
