mod channel;
mod summary;

pub use channel::ChannelSink;
pub use summary::SummarySink;

use crate::error::SinkError;
use crate::waterfall::WaterfallWindow;

/// Surface the display worker paints on.
///
/// A draw only becomes visible after the following [`RenderSink::flush`].
pub trait RenderSink {
    /// Stage `window` for display. Its orientation and channel range come with it.
    fn draw(&mut self, window: &WaterfallWindow<'_>) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError>;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn draw(&mut self, window: &WaterfallWindow<'_>) -> Result<(), SinkError> {
        (**self).draw(window)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}
