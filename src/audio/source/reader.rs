//! `ReaderSource` — raw little-endian `i16` PCM from any `io::Read`.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::warn;

use crate::audio::{AudioStream, sample::Sample};

pub struct ReaderSource<R> {
    reader: R,
    stereo: bool,
    eof: bool,
    samples_read: u64,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, stereo: bool) -> Self {
        Self {
            reader,
            stereo,
            eof: false,
            samples_read: 0,
        }
    }

    /// Total samples decoded so far.
    pub fn samples_read(&self) -> u64 {
        self.samples_read
    }
}

impl<R: Read> AudioStream for ReaderSource<R> {
    fn read_buffer(&mut self, buf: &mut [Sample]) -> usize {
        let mut filled = 0;
        while filled < buf.len() && !self.eof {
            match self.reader.read_i16::<LittleEndian>() {
                Ok(s) => {
                    buf[filled] = s;
                    filled += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => self.eof = true,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("PCM read failed, treating as end of stream: {}", e);
                    self.eof = true;
                }
            }
        }
        self.samples_read += filled as u64;
        filled
    }

    fn is_stereo(&self) -> bool {
        self.stereo
    }

    fn end_of_data(&self) -> bool {
        self.eof
    }
}
