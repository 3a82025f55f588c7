pub mod device;
mod error;
pub mod sinks;
mod state;
mod waterfall;

pub use device::Spectrometer;
pub use error::{CommandError, DeviceError, SinkError, WaterfallError};
pub use sinks::RenderSink;
pub use state::{DisplayState, RunState, ViewWindow};
pub use waterfall::{Frame, MAX_SAMPLES, Waterfall, WaterfallWindow};

use anyhow::{Context, Result};
use flume::{Receiver, TryRecvError};
use log::{debug, info, warn};
use specfall_messages::{Command, DisplayConfig};

/// What the run loop does after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// The acquisition/display worker.
/// Owns the device, the render sink and the waterfall, and applies commands
/// from the dispatcher between frames.
pub struct DisplayWorker<D, S> {
    device: D,
    sink: S,
    cmd_rx: Receiver<Command>,
    source_id: String,
    state: DisplayState,
    cycles: u64,
}

impl<D: Spectrometer, S: RenderSink> DisplayWorker<D, S> {
    /// Create a new worker with an empty waterfall sized from `config`.
    pub fn new(
        device: D,
        sink: S,
        cmd_rx: Receiver<Command>,
        config: &DisplayConfig,
    ) -> Result<Self> {
        let waterfall = Waterfall::new(config.depth, device.channel_count(), config.orientation)
            .context("Cannot build the waterfall")?;
        debug!(
            "Constructing a display worker: {} rows x {} channels from {}",
            waterfall.depth(),
            waterfall.channel_count(),
            config.source_id
        );
        Ok(Self {
            device,
            sink,
            cmd_rx,
            source_id: config.source_id.clone(),
            state: DisplayState::new(waterfall),
            cycles: 0,
        })
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Run the worker (blocking).
    /// Returns once the dispatcher hangs up or the sink closes, or with the
    /// first fatal error.
    pub fn run(mut self) -> Result<()> {
        let start = self
            .device
            .read_register(device::ACCUMULATION_REGISTER)
            .context("Cannot read the accumulation counter")?;
        info!("Display worker started at accumulation {start}");

        while self.cycle()? == Flow::Continue {}

        info!("Display worker stopped after {} cycles", self.cycles);
        Ok(())
    }

    /// One poll cycle: at most one command, one frame, one repaint.
    pub fn cycle(&mut self) -> Result<Flow> {
        match self.cmd_rx.try_recv() {
            Ok(command) => self.apply(command),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                debug!("Command channel closed");
                return Ok(Flow::Stop);
            }
        }

        match self.device.read_frame(&self.source_id) {
            Ok(frame) => {
                self.state.push(frame).context("Frame does not fit the waterfall")?;
                if self.state.is_updating() && self.repaint()? == Flow::Stop {
                    return Ok(Flow::Stop);
                }
            }
            Err(e) if e.is_recoverable() => warn!("Skipping frame: {e}"),
            Err(e) => return Err(e).context("Cannot read a frame from the spectrometer"),
        }

        self.device.poll().context("Spectrometer poll failed")?;
        self.cycles += 1;
        Ok(Flow::Continue)
    }

    fn apply(&mut self, command: Command) {
        debug!("Display worker received command: {command:?}");
        if let Err(e) = self.state.apply(command) {
            warn!("Ignoring {command:?}: {e}");
        }
    }

    fn repaint(&mut self) -> Result<Flow> {
        let visible = self.state.visible();
        let drawn = self.sink.draw(&visible).and_then(|()| self.sink.flush());
        match drawn {
            Ok(()) => Ok(Flow::Continue),
            Err(SinkError::Closed) => {
                info!("Display closed");
                Ok(Flow::Stop)
            }
            Err(e) => Err(e).context("Cannot repaint the waterfall"),
        }
    }
}
