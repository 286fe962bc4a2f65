//! Frame plumbing shared by every converter strategy: the input side pulls
//! whole frames out of an [`AudioStream`], the output side applies volume,
//! routing and saturation.

use crate::audio::{
    AudioStream,
    constants::{INPUT_BUFFER_SAMPLES, OUTPUT_CHANNELS},
    sample::{self, Sample, SampleFormat, Volume},
};

use super::OutputMode;

/// One instant of audio: `[left, right]`. Mono input is duplicated.
pub type Frame = [Sample; 2];

// ─── InputBuffer ─────────────────────────────────────────────────────────────

/// Fixed-size staging buffer between the source and a converter.
///
/// Allocated once; refills compact the unread tail to the front so a stereo
/// frame split across two reads is reassembled.
pub struct InputBuffer {
    buf: Box<[Sample]>,
    start: usize,
    end: usize,
    channels: usize,
}

impl InputBuffer {
    pub fn new(stereo: bool) -> Self {
        Self {
            buf: vec![0; INPUT_BUFFER_SAMPLES].into_boxed_slice(),
            start: 0,
            end: 0,
            channels: if stereo { 2 } else { 1 },
        }
    }

    /// Next frame, refilling from `src` until a whole frame is buffered.
    /// `None` means a read came back empty before a frame was complete.
    pub fn next_frame<S: AudioStream + ?Sized>(&mut self, src: &mut S) -> Option<Frame> {
        loop {
            if let Some(frame) = self.pop_buffered() {
                return Some(frame);
            }
            if self.refill(src) == 0 {
                return None;
            }
        }
    }

    /// Next frame already held in the buffer; never touches the source.
    pub fn pop_buffered(&mut self) -> Option<Frame> {
        if self.end - self.start < self.channels {
            return None;
        }
        let left = self.buf[self.start];
        let right = if self.channels == 2 {
            self.buf[self.start + 1]
        } else {
            left
        };
        self.start += self.channels;
        Some([left, right])
    }

    /// Whole frames held in the buffer.
    pub fn buffered_frames(&self) -> usize {
        (self.end - self.start) / self.channels
    }

    /// Samples appended by one read.
    fn refill<S: AudioStream + ?Sized>(&mut self, src: &mut S) -> usize {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        let n = src
            .read_buffer(&mut self.buf[self.end..])
            .min(self.buf.len() - self.end);
        self.end += n;
        n
    }
}

// ─── FrameWriter ─────────────────────────────────────────────────────────────

/// Final write stage: volume → routing → saturation.
#[derive(Debug, Clone, Copy)]
pub struct FrameWriter {
    pub reverse_stereo: bool,
    pub format: SampleFormat,
    pub mode: OutputMode,
}

impl FrameWriter {
    /// Number of whole output frames `out` can take, capped at `requested`.
    #[inline]
    pub fn capacity(out: &[Sample], requested: usize) -> usize {
        requested.min(out.len() / OUTPUT_CHANNELS)
    }

    /// Write one frame at frame index `index`.
    ///
    /// `left`/`right` are source channels; the volumes follow the source
    /// channel, `reverse_stereo` only changes the destination slot.
    #[inline]
    pub fn write(
        &self,
        out: &mut [Sample],
        index: usize,
        left: i32,
        right: i32,
        vol_l: Volume,
        vol_r: Volume,
    ) {
        let base = index * OUTPUT_CHANNELS;
        let (l_slot, r_slot) = if self.reverse_stereo {
            (base + 1, base)
        } else {
            (base, base + 1)
        };
        let l = sample::scale_volume(left, vol_l);
        let r = sample::scale_volume(right, vol_r);

        match self.mode {
            OutputMode::Replace => {
                sample::store(&mut out[l_slot], l, self.format);
                sample::store(&mut out[r_slot], r, self.format);
            }
            OutputMode::Mix => {
                sample::clamped_add(&mut out[l_slot], l, self.format);
                sample::clamped_add(&mut out[r_slot], r, self.format);
            }
        }
    }

    #[inline]
    pub fn write_frame(
        &self,
        out: &mut [Sample],
        index: usize,
        frame: Frame,
        vol_l: Volume,
        vol_r: Volume,
    ) {
        self.write(out, index, frame[0] as i32, frame[1] as i32, vol_l, vol_r);
    }
}
