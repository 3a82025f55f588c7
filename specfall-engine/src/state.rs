use std::ops::Range;

use log::debug;
use specfall_messages::Command;

use crate::error::{CommandError, WaterfallError};
use crate::waterfall::{Frame, Waterfall, WaterfallWindow};

/// Whether flushed frames are repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Updating,
    Paused,
}

/// Half-open range of channels shown on screen. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    start: usize,
    end: usize,
}

impl ViewWindow {
    pub fn full(channel_count: usize) -> Self {
        Self {
            start: 0,
            end: channel_count,
        }
    }

    /// Clamp both bounds into `0..=channel_count`, refusing what ends up empty.
    pub fn clamped(start: i64, end: i64, channel_count: usize) -> Result<Self, CommandError> {
        let limit = i64::try_from(channel_count).unwrap_or(i64::MAX);
        let start = start.clamp(0, limit) as usize;
        let end = end.clamp(0, limit) as usize;
        if start >= end {
            return Err(CommandError::EmptyChannelRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Everything the display worker mutates, owned by the worker alone.
#[derive(Debug)]
pub struct DisplayState {
    waterfall: Waterfall,
    window: ViewWindow,
    run_state: RunState,
}

impl DisplayState {
    pub fn new(waterfall: Waterfall) -> Self {
        let window = ViewWindow::full(waterfall.channel_count());
        Self {
            waterfall,
            window,
            run_state: RunState::default(),
        }
    }

    pub fn waterfall(&self) -> &Waterfall {
        &self.waterfall
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_updating(&self) -> bool {
        self.run_state == RunState::Updating
    }

    pub fn push(&mut self, frame: Frame) -> Result<(), WaterfallError> {
        self.waterfall.push(frame)
    }

    /// The part of the waterfall selected by the view window.
    pub fn visible(&self) -> WaterfallWindow<'_> {
        WaterfallWindow::new(&self.waterfall, self.window.range())
    }

    /// Apply one operator command. A refused command leaves the state untouched.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::SetChannelRange { start, end } => {
                let window = ViewWindow::clamped(start, end, self.waterfall.channel_count())?;
                debug!("Showing channels {}..{}", window.start, window.end);
                self.window = window;
            }
            Command::SetDepth(depth) => {
                let rows = usize::try_from(depth)
                    .ok()
                    .filter(|&rows| rows > 0)
                    .ok_or(CommandError::InvalidDepth(depth))?;
                self.waterfall
                    .resize(rows)
                    .map_err(|e| CommandError::DepthTooLarge(depth, e))?;
                debug!("Waterfall depth is now {rows}");
            }
            Command::Reset => {
                self.window = ViewWindow::full(self.waterfall.channel_count());
                debug!("Channel range reset");
            }
            Command::Pause => self.run_state = RunState::Paused,
            Command::Resume => self.run_state = RunState::Updating,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specfall_messages::Orientation;

    fn state(channels: usize) -> DisplayState {
        DisplayState::new(Waterfall::new(3, channels, Orientation::NewestFirst).unwrap())
    }

    #[test]
    fn test_starts_updating_with_the_full_band() {
        let state = state(512);
        assert_eq!(state.run_state(), RunState::Updating);
        assert_eq!(state.window().range(), 0..512);
    }

    #[test]
    fn test_channel_range_is_clamped_to_the_band() {
        let mut state = state(512);
        state
            .apply(Command::SetChannelRange { start: -3, end: 999 })
            .unwrap();
        assert_eq!(state.window().range(), 0..512);

        state
            .apply(Command::SetChannelRange { start: 100, end: 200 })
            .unwrap();
        assert_eq!(state.window().range(), 100..200);
        assert_eq!(state.visible().width(), 100);
    }

    #[test]
    fn test_empty_channel_range_is_refused() {
        let mut state = state(512);
        state
            .apply(Command::SetChannelRange { start: 10, end: 20 })
            .unwrap();

        for (start, end) in [(5, 5), (30, 7), (600, 700), (-9, -1)] {
            assert!(matches!(
                state.apply(Command::SetChannelRange { start, end }),
                Err(CommandError::EmptyChannelRange { .. })
            ));
            assert_eq!(state.window().range(), 10..20);
        }
    }

    #[test]
    fn test_reset_restores_the_full_band() {
        let mut state = state(64);
        state
            .apply(Command::SetChannelRange { start: 1, end: 2 })
            .unwrap();
        state.apply(Command::Reset).unwrap();
        assert_eq!(state.window(), ViewWindow::full(64));
    }

    #[test]
    fn test_non_positive_depth_is_refused() {
        let mut state = state(8);
        assert_eq!(
            state.apply(Command::SetDepth(0)),
            Err(CommandError::InvalidDepth(0))
        );
        assert_eq!(
            state.apply(Command::SetDepth(-1)),
            Err(CommandError::InvalidDepth(-1))
        );
        assert_eq!(state.waterfall().depth(), 3);

        state.apply(Command::SetDepth(10)).unwrap();
        assert_eq!(state.waterfall().depth(), 10);
    }

    #[test]
    fn test_huge_depth_is_refused() {
        let mut state = state(1024);
        for depth in [i64::MAX, 100_000_000] {
            assert!(matches!(
                state.apply(Command::SetDepth(depth)),
                Err(CommandError::DepthTooLarge(d, WaterfallError::DepthTooLarge { .. })) if d == depth
            ));
            assert_eq!(state.waterfall().depth(), 3);
        }
    }

    #[test]
    fn test_pause_and_resume_are_idempotent() {
        let mut state = state(8);
        for _ in 0..2 {
            state.apply(Command::Pause).unwrap();
            assert!(!state.is_updating());
        }
        for _ in 0..2 {
            state.apply(Command::Resume).unwrap();
            assert!(state.is_updating());
        }
    }

    #[test]
    fn test_commands_do_not_touch_other_fields() {
        let mut state = state(16);
        state.apply(Command::Pause).unwrap();
        state.apply(Command::SetDepth(5)).unwrap();
        state
            .apply(Command::SetChannelRange { start: 2, end: 4 })
            .unwrap();
        assert_eq!(state.run_state(), RunState::Paused);
        assert_eq!(state.waterfall().depth(), 5);
        assert_eq!(state.window().range(), 2..4);
    }
}
