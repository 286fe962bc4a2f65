//! `AudioStream` trait — the pull contract every converter input implements.
//!
//! # Module layout
//!
//! ```text
//! src/audio/source/
//! ├── mod.rs      ← AudioStream trait + SliceSource
//! ├── channel.rs  ← ChannelSource (PCM chunks over a flume channel)
//! └── reader.rs   ← ReaderSource  (little-endian i16 from any io::Read)
//! ```
//!
//! # Choosing a source
//!
//! | Use case                                  | Source            |
//! |-------------------------------------------|-------------------|
//! | Samples already in memory, tests          | [`SliceSource`]   |
//! | Decoder running on another thread         | [`ChannelSource`] |
//! | Raw PCM file or pipe                      | [`ReaderSource`]  |

pub mod channel;
pub mod reader;

pub use channel::ChannelSource;
pub use reader::ReaderSource;

use crate::audio::sample::Sample;

// ─── AudioStream trait ────────────────────────────────────────────────────────

/// A pull-based producer of raw PCM samples at the converter's input rate.
///
/// Stereo streams are interleaved `L, R, L, R, ...`.
pub trait AudioStream {
    /// Fill up to `buf.len()` samples and return how many were written.
    ///
    /// Returning fewer than requested (including zero) is an underrun, not an
    /// error; the caller may ask again later.
    fn read_buffer(&mut self, buf: &mut [Sample]) -> usize;

    /// Whether the samples are interleaved stereo.
    fn is_stereo(&self) -> bool;

    /// `true` once no further samples will ever be produced.
    fn end_of_data(&self) -> bool;
}

// ─── SliceSource ──────────────────────────────────────────────────────────────

/// Serves samples from a borrowed slice.
///
/// `max_per_read` caps every read, which is how tests simulate a producer
/// that delivers in small, uneven batches.
pub struct SliceSource<'a> {
    samples: &'a [Sample],
    pos: usize,
    stereo: bool,
    max_per_read: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(samples: &'a [Sample], stereo: bool) -> Self {
        Self {
            samples,
            pos: 0,
            stereo,
            max_per_read: usize::MAX,
        }
    }

    pub fn with_max_per_read(mut self, max: usize) -> Self {
        self.max_per_read = max.max(1);
        self
    }

    /// Samples not yet handed out.
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.pos
    }
}

impl AudioStream for SliceSource<'_> {
    fn read_buffer(&mut self, buf: &mut [Sample]) -> usize {
        let n = buf.len().min(self.remaining()).min(self.max_per_read);
        buf[..n].copy_from_slice(&self.samples[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    fn is_stereo(&self) -> bool {
        self.stereo
    }

    fn end_of_data(&self) -> bool {
        self.remaining() == 0
    }
}
