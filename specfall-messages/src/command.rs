/// Commands sent from the operator dispatcher to the display worker.
///
/// Arguments are carried exactly as the operator typed them. Range clamping and
/// depth validation happen in the worker, which owns the channel count and the
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show channels `[start, end)`. Out-of-range bounds are clamped.
    SetChannelRange { start: i64, end: i64 },
    /// Change the number of integrations kept in the waterfall.
    SetDepth(i64),
    /// Show the full channel range again.
    Reset,
    /// Stop repainting. Frames are still acquired and buffered.
    Pause,
    /// Start repainting again.
    Resume,
}
