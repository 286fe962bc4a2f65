//! `resample/copy.rs` — identity converter for equal input and output rates.
//!
//! No phase state: every input frame maps to exactly one output frame, only
//! volume, routing and saturation are applied.

use crate::audio::{
    AudioStream,
    sample::{Sample, Volume},
};

use super::frames::{Frame, FrameWriter, InputBuffer};

pub struct CopyRateConverter {
    input: InputBuffer,
    writer: FrameWriter,
}

impl CopyRateConverter {
    pub fn new(stereo: bool, writer: FrameWriter) -> Self {
        Self {
            input: InputBuffer::new(stereo),
            writer,
        }
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
            let Some(frame) = pull(&mut self.input) else {
                return i;
            };
            self.writer.write_frame(out, i, frame, vol_l, vol_r);
        }
        frames
    }
}
