use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, ValueEnum};
use specfall_messages::{Antenna, ChannelAxis, DeviceConfig, DisplayConfig, Orientation};

/// Live waterfall plot of a spectrometer, controlled from the terminal.
#[derive(Debug, Parser)]
#[command(name = "specfall", version)]
pub struct Args {
    /// Antenna to plot.
    #[arg(short, long, value_enum, default_value_t = AntennaArg::Auto0)]
    pub antenna: AntennaArg,

    /// Bandwidth of the spectrometer in Hz.
    #[arg(short, long, default_value_t = 12.5e6)]
    pub bandwidth: f64,

    /// Nyquist zone of the spectrum.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub nyquist: u32,

    /// Number of integrations to plot at a time.
    #[arg(short = 'N', long, default_value_t = 500)]
    pub num_integ: usize,

    /// Which spectrometer backend to use.
    #[arg(short, long, value_enum, default_value_t = SpecMode::Dbg)]
    pub spec: SpecMode,

    /// Capture file to replay with `--spec file`.
    #[arg(short, long, required_if_eq("spec", "file"))]
    pub file: Option<PathBuf>,

    /// Number of spectrometer channels.
    #[arg(short, long, default_value_t = 1024)]
    pub channels: usize,

    /// Time between integrations, in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub poll_ms: u64,

    /// Seed for the debug backend's noise.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop at the end of the capture file instead of starting over.
    #[arg(long)]
    pub no_loop: bool,

    /// Draw the oldest integration at the top.
    #[arg(long)]
    pub oldest_first: bool,

    /// Log a summary of each image instead of opening a window.
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AntennaArg {
    Auto0,
    Auto1,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpecMode {
    /// Synthetic spectra, no hardware needed.
    Dbg,
    /// Replay a capture file of little-endian f32 frames.
    File,
}

impl From<AntennaArg> for Antenna {
    fn from(arg: AntennaArg) -> Self {
        match arg {
            AntennaArg::Auto0 => Antenna::Auto0,
            AntennaArg::Auto1 => Antenna::Auto1,
            AntennaArg::Cross => Antenna::Cross,
        }
    }
}

impl Args {
    pub fn device_config(&self) -> Result<DeviceConfig> {
        ensure!(self.channels > 0, "--channels must be at least 1");
        let poll_interval = Duration::from_millis(self.poll_ms);

        let config = match self.spec {
            SpecMode::Dbg => DeviceConfig::Debug {
                channels: self.channels,
                poll_interval,
                seed: self.seed,
            },
            SpecMode::File => DeviceConfig::File {
                path: self
                    .file
                    .clone()
                    .context("--file is required with --spec file")?,
                channels: self.channels,
                poll_interval,
                loop_on_eof: !self.no_loop,
            },
        };
        Ok(config)
    }

    pub fn display_config(&self) -> Result<DisplayConfig> {
        ensure!(self.num_integ > 0, "--num-integ must be at least 1");
        let antenna = Antenna::from(self.antenna);
        let Some(source_id) = antenna.source_id() else {
            bail!("Cross-correlation phase display is not supported, pick auto0 or auto1");
        };

        Ok(DisplayConfig {
            depth: self.num_integ,
            orientation: if self.oldest_first {
                Orientation::OldestFirst
            } else {
                Orientation::NewestFirst
            },
            source_id,
        })
    }

    pub fn axis(&self) -> ChannelAxis {
        ChannelAxis::new(self.bandwidth, self.nyquist, self.channels)
    }
}
