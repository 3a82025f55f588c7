use flume::{Sender, TrySendError};
use log::trace;

use specfall_messages::{Event, WaterfallImage};

use super::RenderSink;
use crate::error::SinkError;
use crate::waterfall::WaterfallWindow;

/// A sink that copies each drawn window and sends it to the UI via flume channel.
pub struct ChannelSink {
    event_tx: Sender<Event>,
    staged: Option<WaterfallImage>,
}

impl ChannelSink {
    pub fn new(event_tx: Sender<Event>) -> Self {
        Self {
            event_tx,
            staged: None,
        }
    }
}

impl RenderSink for ChannelSink {
    fn draw(&mut self, window: &WaterfallWindow<'_>) -> Result<(), SinkError> {
        self.staged = Some(window.to_image());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let Some(image) = self.staged.take() else {
            return Ok(());
        };

        // Never block acquisition on the UI; a newer image follows next cycle
        match self.event_tx.try_send(Event::Waterfall(image)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                trace!("UI is behind, dropping waterfall image");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Closed),
        }
    }
}
