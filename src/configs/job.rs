use serde::{Deserialize, Serialize};

use crate::audio::constants::{DEFAULT_CHUNK_FRAMES, VOLUME_UNITY};

/// `[job]` table: one raw PCM file converted to another.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct JobConfig {
    #[serde(default = "default_input")]
    pub input: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_input_rate")]
    pub input_rate: u32,
    #[serde(default = "default_output_rate")]
    pub output_rate: u32,
    #[serde(default = "default_stereo")]
    pub stereo: bool,
    #[serde(default = "default_volume")]
    pub volume_left: u16,
    #[serde(default = "default_volume")]
    pub volume_right: u16,
    #[serde(default = "default_chunk_frames")]
    pub chunk_frames: usize,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            input_rate: default_input_rate(),
            output_rate: default_output_rate(),
            stereo: default_stereo(),
            volume_left: default_volume(),
            volume_right: default_volume(),
            chunk_frames: default_chunk_frames(),
        }
    }
}

fn default_input() -> String {
    "input.pcm".to_string()
}

fn default_output() -> String {
    "output.pcm".to_string()
}

fn default_input_rate() -> u32 {
    44_100
}

fn default_output_rate() -> u32 {
    48_000
}

fn default_stereo() -> bool {
    true
}

fn default_volume() -> u16 {
    VOLUME_UNITY
}

fn default_chunk_frames() -> usize {
    DEFAULT_CHUNK_FRAMES
}
