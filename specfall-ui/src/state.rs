use std::ops::Range;

use crate::waterfall::Waterfall;
use specfall_messages::{ChannelAxis, Event, Orientation};

/// Local UI state derived from worker events.
pub(super) struct UiState {
    /// Frequency axis of the spectrometer, for labelling the view
    pub axis: ChannelAxis,

    /// Channel range of the last image
    pub channels: Option<Range<usize>>,

    /// Integrations in the last image
    pub rows: usize,

    pub orientation: Orientation,

    /// Waterfall widget state
    pub waterfall: Waterfall,
}

impl UiState {
    pub fn new(axis: ChannelAxis) -> Self {
        Self {
            axis,
            channels: None,
            rows: 0,
            orientation: Orientation::default(),
            waterfall: Waterfall::new(),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Waterfall(image) => {
                self.waterfall.set_image(&image);
                self.rows = image.rows;
                self.orientation = image.orientation;
                self.channels = Some(image.channels);
            }
        }
    }

    /// Lines describing the current view, for the info panel.
    pub fn describe(&self) -> Vec<String> {
        let Some(channels) = &self.channels else {
            return vec!["No data yet".to_owned()];
        };
        let time_axis = match self.orientation {
            Orientation::NewestFirst => "newest on top",
            Orientation::OldestFirst => "oldest on top",
        };
        vec![
            format!("Channels {}..{}", channels.start, channels.end),
            format!(
                "{} to {}",
                self.axis.frequency(channels.start),
                self.axis.frequency(channels.end)
            ),
            format!("Resolution {}", self.axis.resolution()),
            format!("{} integrations, {time_axis}", self.rows),
        ]
    }
}
