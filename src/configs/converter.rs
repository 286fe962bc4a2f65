use serde::{Deserialize, Serialize};

use crate::audio::{ConverterConfig, Interpolation, OutputMode, SampleFormat};

/// `[converter]` table: options that do not depend on the stream itself.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConverterSettings {
    pub interpolation: Interpolation,
    pub sample_format: SampleFormat,
    pub output_mode: OutputMode,
    pub reverse_stereo: bool,
}

impl ConverterSettings {
    /// Combine with the stream's channel layout.
    pub fn to_converter_config(self, stereo: bool) -> ConverterConfig {
        ConverterConfig {
            stereo,
            reverse_stereo: self.reverse_stereo,
            sample_format: self.sample_format,
            output_mode: self.output_mode,
            interpolation: self.interpolation,
        }
    }
}
