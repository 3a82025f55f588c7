//! Spectrometer adapters.
//!
//! The display worker only sees the [`Spectrometer`] trait. Each backend owns
//! its own poll interval, so the worker loop never sleeps on its own.

mod debug;
mod file;

pub use debug::DebugSpectrometer;
pub use file::FileSpectrometer;

use specfall_messages::DeviceConfig;

use crate::error::DeviceError;
use crate::waterfall::Frame;

/// Register holding the device's integration counter.
pub const ACCUMULATION_REGISTER: &str = "acc_num";

/// Abstraction for spectrometer backends (hardware, capture files, mock data).
pub trait Spectrometer {
    /// Number of channels in every frame. Fixed for the session.
    fn channel_count(&self) -> usize;

    /// Wait for the next integration and advance device-side counters.
    fn poll(&mut self) -> Result<(), DeviceError>;

    /// Read the current spectrum from the memory named `source`.
    fn read_frame(&mut self, source: &str) -> Result<Frame, DeviceError>;

    /// Read an integer register.
    fn read_register(&mut self, name: &str) -> Result<i64, DeviceError>;

    fn check_connected(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn is_running(&mut self) -> Result<bool, DeviceError> {
        Ok(true)
    }

    /// Start integrating. Only called when [`Spectrometer::is_running`] is false.
    fn initialize(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }
}

impl<S: Spectrometer + ?Sized> Spectrometer for Box<S> {
    fn channel_count(&self) -> usize {
        (**self).channel_count()
    }

    fn poll(&mut self) -> Result<(), DeviceError> {
        (**self).poll()
    }

    fn read_frame(&mut self, source: &str) -> Result<Frame, DeviceError> {
        (**self).read_frame(source)
    }

    fn read_register(&mut self, name: &str) -> Result<i64, DeviceError> {
        (**self).read_register(name)
    }

    fn check_connected(&mut self) -> Result<(), DeviceError> {
        (**self).check_connected()
    }

    fn is_running(&mut self) -> Result<bool, DeviceError> {
        (**self).is_running()
    }

    fn initialize(&mut self) -> Result<(), DeviceError> {
        (**self).initialize()
    }
}

/// Open the backend described by `config` and make sure it is integrating.
pub fn open(config: &DeviceConfig) -> Result<Box<dyn Spectrometer + Send>, DeviceError> {
    let mut device: Box<dyn Spectrometer + Send> = match config {
        DeviceConfig::Debug {
            channels,
            poll_interval,
            seed,
        } => Box::new(DebugSpectrometer::new(*channels, *poll_interval, *seed)),
        DeviceConfig::File {
            path,
            channels,
            poll_interval,
            loop_on_eof,
        } => Box::new(FileSpectrometer::new(
            path,
            *channels,
            *poll_interval,
            *loop_on_eof,
        )?),
    };

    device.check_connected()?;
    if !device.is_running()? {
        log::info!("Spectrometer is idle, initializing");
        device.initialize()?;
    }
    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_opens_the_debug_backend() {
        let config = DeviceConfig::Debug {
            channels: 16,
            poll_interval: Duration::ZERO,
            seed: Some(1),
        };
        let mut device = open(&config).unwrap();
        assert_eq!(device.channel_count(), 16);
        assert_eq!(device.read_frame("spec_auto0_real").unwrap().len(), 16);
    }

    #[test]
    fn test_missing_capture_file_is_fatal() {
        let config = DeviceConfig::File {
            path: "/nonexistent/path/to/capture.f32".into(),
            channels: 16,
            poll_interval: Duration::ZERO,
            loop_on_eof: true,
        };
        let err = open(&config).err().unwrap();
        assert!(!err.is_recoverable());
    }
}
