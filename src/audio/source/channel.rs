//! `ChannelSource` — PCM chunks delivered over a `flume` channel.
//!
//! Lets a decoder on another thread feed a converter living on the render
//! thread. Reads never block: an empty channel is an underrun.

use flume::{Receiver, TryRecvError};

use crate::audio::{AudioStream, buffer::PooledBuffer, sample::Sample};

pub struct ChannelSource {
    rx: Receiver<PooledBuffer>,
    /// Chunk currently being handed out.
    pending: PooledBuffer,
    pending_pos: usize,
    stereo: bool,
    /// Set once the sender has disconnected.
    disconnected: bool,
}

impl ChannelSource {
    pub fn new(rx: Receiver<PooledBuffer>, stereo: bool) -> Self {
        Self {
            rx,
            pending: Vec::new(),
            pending_pos: 0,
            stereo,
            disconnected: false,
        }
    }

    fn refill(&mut self) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(chunk) if chunk.is_empty() => continue,
                Ok(chunk) => {
                    self.pending = chunk;
                    self.pending_pos = 0;
                    return true;
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    return false;
                }
            }
        }
    }
}

impl AudioStream for ChannelSource {
    fn read_buffer(&mut self, buf: &mut [Sample]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            if self.pending_pos >= self.pending.len() && !self.refill() {
                break;
            }
            let n = (buf.len() - filled).min(self.pending.len() - self.pending_pos);
            buf[filled..filled + n]
                .copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
            self.pending_pos += n;
            filled += n;
        }
        filled
    }

    fn is_stereo(&self) -> bool {
        self.stereo
    }

    fn end_of_data(&self) -> bool {
        self.disconnected && self.pending_pos >= self.pending.len() && self.rx.is_empty()
    }
}
