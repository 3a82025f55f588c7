use std::f32::consts::PI;
use std::thread;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use super::{ACCUMULATION_REGISTER, Spectrometer};
use crate::error::DeviceError;
use crate::waterfall::Frame;

/// Peak of the synthetic half-sine passband.
const SIGNAL_AMPLITUDE: f32 = 10.0;

/// Stand-in spectrometer that needs no hardware.
///
/// Every frame is a half sine across the band plus unit gaussian noise, and
/// every poll waits `poll_interval` before counting one more integration.
pub struct DebugSpectrometer {
    channels: usize,
    poll_interval: Duration,
    accumulations: i64,
    rng: StdRng,
}

impl DebugSpectrometer {
    pub fn new(channels: usize, poll_interval: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            channels,
            poll_interval,
            accumulations: 0,
            rng,
        }
    }
}

fn passband(channel: usize, channels: usize) -> f32 {
    SIGNAL_AMPLITUDE * (PI * channel as f32 / channels as f32).sin()
}

impl Spectrometer for DebugSpectrometer {
    fn channel_count(&self) -> usize {
        self.channels
    }

    fn poll(&mut self) -> Result<(), DeviceError> {
        if !self.poll_interval.is_zero() {
            thread::sleep(self.poll_interval);
        }
        self.accumulations += 1;
        Ok(())
    }

    fn read_frame(&mut self, _source: &str) -> Result<Frame, DeviceError> {
        let channels = self.channels;
        let rng = &mut self.rng;
        let frame = (0..channels)
            .map(|channel| {
                let noise: f32 = StandardNormal.sample(&mut *rng);
                passband(channel, channels) + noise
            })
            .collect();
        Ok(frame)
    }

    fn read_register(&mut self, name: &str) -> Result<i64, DeviceError> {
        match name {
            ACCUMULATION_REGISTER => Ok(self.accumulations),
            _ => Ok(0),
        }
    }
}
