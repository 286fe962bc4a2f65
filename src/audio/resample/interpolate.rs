//! `resample/interpolate.rs` — general converter for arbitrary rate ratios.
//!
//! The read position is kept as an exact fraction `frac / den` of an input
//! frame, advanced by `num / den = input_rate / output_rate` (lowest terms)
//! per output frame. Integer arithmetic means no drift, however long the
//! stream runs.
//!
//! Two kernels share the same window bookkeeping:
//!
//! | Kernel     | Taps | Output lies between |
//! |------------|------|---------------------|
//! | `Linear`   | 2    | `w[0]` and `w[1]`   |
//! | `Hermite`  | 4    | `w[1]` and `w[2]`   |

use tracing::trace;

use crate::audio::{
    AudioStream,
    constants::{HERMITE_TAPS, LINEAR_TAPS},
    sample::{Sample, Volume, clamp_sample},
};

use super::{
    Interpolation,
    frames::{Frame, FrameWriter, InputBuffer},
};

pub struct InterpolatingRateConverter {
    interpolation: Interpolation,
    input: InputBuffer,
    writer: FrameWriter,

    /// Step numerator (reduced input rate).
    num: u64,
    /// Step denominator (reduced output rate).
    den: u64,
    /// Fractional read position within the current interval, `< den`.
    frac: u64,
    /// Input frames to shift into the window before the next output.
    pending: u64,

    /// Interpolation history, newest frame at `taps - 1`.
    window: [Frame; HERMITE_TAPS],
    taps: usize,
    /// Past-the-end frames synthesized while draining.
    held: usize,
}

impl InterpolatingRateConverter {
    /// `num / den` must already be reduced and both non-zero.
    pub fn new(
        num: u64,
        den: u64,
        interpolation: Interpolation,
        stereo: bool,
        writer: FrameWriter,
    ) -> Self {
        let taps = match interpolation {
            Interpolation::Linear => LINEAR_TAPS,
            Interpolation::Hermite => HERMITE_TAPS,
        };
        Self {
            interpolation,
            input: InputBuffer::new(stereo),
            writer,
            num,
            den,
            frac: 0,
            // Fill the window up to and including the anchor frame's successor.
            pending: (taps - Self::anchor(taps)) as u64,
            window: [[0, 0]; HERMITE_TAPS],
            taps,
            held: 0,
        }
    }

    /// Window index of the frame at or just before the read position.
    #[inline]
    fn anchor(taps: usize) -> usize {
        taps / 2 - 1
    }

    /// Frames that may be synthesized past the end of input while keeping
    /// the anchor on a real frame.
    #[inline]
    fn max_held(&self) -> usize {
        self.taps - Self::anchor(self.taps) - 1
    }

    pub fn flow<S: AudioStream + ?Sized>(
        &mut self,
        src: &mut S,
        out: &mut [Sample],
        frames: usize,
        vol_l: Volume,
        vol_r: Volume,
    ) -> usize {
        let frames = FrameWriter::capacity(out, frames);
        for i in 0..frames {
            while self.pending > 0 {
                let Some(frame) = self.input.next_frame(src) else {
                    trace!(produced = i, requested = frames, "input underrun");
                    return i;
                };
                self.push(frame);
            }
            self.emit(out, i, vol_l, vol_r);
        }
        frames
    }

    pub fn drain(&mut self, out: &mut [Sample], frames: usize, vol: Volume) -> usize {
        let frames = FrameWriter::capacity(out, frames);
        for i in 0..frames {
            while self.pending > 0 {
                if let Some(frame) = self.input.pop_buffered() {
                    self.push(frame);
                } else if self.held < self.max_held() {
                    // Hold the last frame so the final interval can be emitted.
                    self.push(self.window[self.taps - 1]);
                    self.held += 1;
                } else {
                    trace!(produced = i, "drain complete");
                    return i;
                }
            }
            self.emit(out, i, vol, vol);
        }
        frames
    }

    #[inline]
    fn push(&mut self, frame: Frame) {
        self.window.copy_within(1..self.taps, 0);
        self.window[self.taps - 1] = frame;
        self.pending -= 1;
    }

    #[inline]
    fn emit(&mut self, out: &mut [Sample], index: usize, vol_l: Volume, vol_r: Volume) {
        let left = self.interpolate(0);
        let right = self.interpolate(1);
        self.writer.write(out, index, left, right, vol_l, vol_r);

        let pos = self.frac + self.num;
        self.pending += pos / self.den;
        self.frac = pos % self.den;
    }

    #[inline]
    fn interpolate(&self, ch: usize) -> i32 {
        match self.interpolation {
            Interpolation::Linear => {
                let a = self.window[0][ch] as i64;
                let b = self.window[1][ch] as i64;
                let den = self.den as i64;
                let delta = ((b - a) * self.frac as i64 + den / 2).div_euclid(den);
                (a + delta) as i32
            }
            Interpolation::Hermite => {
                let p = [
                    self.window[0][ch] as f64,
                    self.window[1][ch] as f64,
                    self.window[2][ch] as f64,
                    self.window[3][ch] as f64,
                ];
                let t = self.frac as f64 / self.den as f64;
                clamp_sample(hermite(p, t).round() as i32) as i32
            }
        }
    }
}

/// Catmull-Rom cubic through four evenly spaced points; the result lies
/// between `p[1]` (t = 0) and `p[2]` (t = 1).
#[inline]
fn hermite(p: [f64; 4], t: f64) -> f64 {
    let c0 = p[1];
    let c1 = 0.5 * (p[2] - p[0]);
    let c2 = p[0] - 2.5 * p[1] + 2.0 * p[2] - 0.5 * p[3];
    let c3 = 0.5 * (p[3] - p[0]) + 1.5 * (p[1] - p[2]);
    ((c3 * t + c2) * t + c1) * t + c0
}
