//! `resample/simple.rs` — exact converters for integer rate ratios.
//!
//! Upsampling by K repeats every input frame K times; downsampling by K keeps
//! the first frame of every group of K. Neither keeps a fractional position,
//! so output length is exact over any stream length.

use crate::audio::{
    AudioStream,
    sample::{Sample, Volume},
};

use super::frames::{Frame, FrameWriter, InputBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `output_rate = K * input_rate`
    Up,
    /// `input_rate = K * output_rate`
    Down,
}

pub struct SimpleRateConverter {
    direction: Direction,
    factor: u32,
    input: InputBuffer,
    writer: FrameWriter,
    /// Frame being repeated (upsampling).
    current: Frame,
    /// Repeats of `current` still owed (upsampling).
    repeats_left: u32,
    /// Input frames to discard before the next kept one (downsampling).
    skip: u32,
}

impl SimpleRateConverter {
    pub fn new(direction: Direction, factor: u32, stereo: bool, writer: FrameWriter) -> Self {
        Self {
            direction,
            factor: factor.max(1),
            input: InputBuffer::new(stereo),
            writer,
            current: [0, 0],
            repeats_left: 0,
            skip: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn flow<S: AudioStream + ?Sized>(
        &mut self,
        src: &mut S,
        out: &mut [Sample],
        frames: usize,
        vol_l: Volume,
        vol_r: Volume,
    ) -> usize {
        self.run(out, frames, vol_l, vol_r, |input| input.next_frame(src))
    }

    pub fn drain(&mut self, out: &mut [Sample], frames: usize, vol: Volume) -> usize {
        self.run(out, frames, vol, vol, InputBuffer::pop_buffered)
    }

    fn run(
        &mut self,
        out: &mut [Sample],
        frames: usize,
        vol_l: Volume,
        vol_r: Volume,
        mut pull: impl FnMut(&mut InputBuffer) -> Option<Frame>,
    ) -> usize {
        let frames = FrameWriter::capacity(out, frames);
        for i in 0..frames {
            let frame = match self.direction {
                Direction::Up => {
                    if self.repeats_left == 0 {
                        let Some(next) = pull(&mut self.input) else {
                            return i;
                        };
                        self.current = next;
                        self.repeats_left = self.factor;
                    }
                    self.repeats_left -= 1;
                    self.current
                }
                Direction::Down => {
                    while self.skip > 0 {
                        if pull(&mut self.input).is_none() {
                            return i;
                        }
                        self.skip -= 1;
                    }
                    let Some(next) = pull(&mut self.input) else {
                        return i;
                    };
                    self.skip = self.factor - 1;
                    next
                }
            };
            self.writer.write_frame(out, i, frame, vol_l, vol_r);
        }
        frames
    }
}
