use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::debug;

use super::{ACCUMULATION_REGISTER, Spectrometer};
use crate::error::DeviceError;
use crate::waterfall::Frame;

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

/// Spectrometer that replays a capture file.
///
/// The file holds consecutive frames of `channels` little-endian f32 samples.
/// A trailing partial frame counts as the end of the capture. Every source id
/// reads from the same file.
#[derive(Debug)]
pub struct FileSpectrometer {
    reader: BufReader<File>,
    channels: usize,
    poll_interval: Duration,
    loop_on_eof: bool,
    frames_read: u64,
    accumulations: i64,
    byte_buf: Vec<u8>,
}

impl FileSpectrometer {
    /// Open a capture at `path`.
    /// If `loop_on_eof` is true, the capture restarts from the beginning at its end.
    pub fn new<P: AsRef<Path>>(
        path: P,
        channels: usize,
        poll_interval: Duration,
        loop_on_eof: bool,
    ) -> Result<Self, DeviceError> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            channels,
            poll_interval,
            loop_on_eof,
            frames_read: 0,
            accumulations: 0,
            byte_buf: vec![0u8; channels * SAMPLE_BYTES],
        })
    }

    /// Fill `byte_buf` with one frame. Returns false on a short read.
    fn fill_frame(&mut self) -> io::Result<bool> {
        let bytes_needed = self.byte_buf.len();
        let mut total_read = 0;

        while total_read < bytes_needed {
            match self.reader.read(&mut self.byte_buf[total_read..]) {
                Ok(0) => return Ok(false),
                Ok(n) => total_read += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

impl Spectrometer for FileSpectrometer {
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
        if !self.fill_frame()? {
            if !self.loop_on_eof || self.frames_read == 0 {
                return Err(DeviceError::Exhausted {
                    frames: self.frames_read,
                });
            }
            debug!("Capture ended after {} frames, rewinding", self.frames_read);
            self.reader.seek(SeekFrom::Start(0))?;
            if !self.fill_frame()? {
                return Err(DeviceError::Exhausted {
                    frames: self.frames_read,
                });
            }
        }
        self.frames_read += 1;

        let frame = self
            .byte_buf
            .chunks_exact(SAMPLE_BYTES)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temp capture with the given samples
    fn create_capture(samples: &[f32]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for &val in samples {
            temp_file.write_all(&val.to_le_bytes()).unwrap();
        }
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_reads_consecutive_frames() {
        let temp_file = create_capture(&[
            1.0, 2.0, 3.0, // frame 1
            4.0, 5.0, 6.0, // frame 2
        ]);

        let mut device = FileSpectrometer::new(temp_file.path(), 3, Duration::ZERO, false).unwrap();

        assert_eq!(device.read_frame("spec_auto0_real").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(device.read_frame("spec_auto0_real").unwrap(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_end_of_capture_without_loop_is_fatal() {
        let temp_file = create_capture(&[1.0, 2.0]);

        let mut device = FileSpectrometer::new(temp_file.path(), 2, Duration::ZERO, false).unwrap();
        device.read_frame("x").unwrap();

        let err = device.read_frame("x").unwrap_err();
        assert!(matches!(err, DeviceError::Exhausted { frames: 1 }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_end_of_capture_with_loop_rewinds() {
        let temp_file = create_capture(&[1.0, 2.0]);

        let mut device = FileSpectrometer::new(temp_file.path(), 2, Duration::ZERO, true).unwrap();

        assert_eq!(device.read_frame("x").unwrap(), vec![1.0, 2.0]);
        assert_eq!(device.read_frame("x").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_trailing_partial_frame_counts_as_end() {
        // One full frame of 2 channels followed by a single stray sample
        let temp_file = create_capture(&[1.0, 2.0, 3.0]);

        let mut device = FileSpectrometer::new(temp_file.path(), 2, Duration::ZERO, true).unwrap();

        assert_eq!(device.read_frame("x").unwrap(), vec![1.0, 2.0]);
        assert_eq!(device.read_frame("x").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_capture_shorter_than_one_frame_is_fatal_even_when_looping() {
        let temp_file = create_capture(&[1.0]);

        let mut device = FileSpectrometer::new(temp_file.path(), 4, Duration::ZERO, true).unwrap();

        assert!(matches!(
            device.read_frame("x"),
            Err(DeviceError::Exhausted { frames: 0 })
        ));
    }

    #[test]
    fn test_file_not_found() {
        let result = FileSpectrometer::new("/nonexistent/path/to/file.f32", 4, Duration::ZERO, false);
        match result {
            Err(DeviceError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_poll_counts_accumulations() {
        let temp_file = create_capture(&[0.0]);
        let mut device = FileSpectrometer::new(temp_file.path(), 1, Duration::ZERO, true).unwrap();
        device.poll().unwrap();
        assert_eq!(device.read_register(ACCUMULATION_REGISTER).unwrap(), 1);
    }
}
