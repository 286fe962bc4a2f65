//! Sample arithmetic: volume scaling and saturating writes.
//!
//! Every value that leaves the converter passes through [`clamped_add`] or
//! [`store`], so out-of-range results saturate instead of wrapping.

use serde::{Deserialize, Serialize};

use crate::audio::constants::{SAMPLE_MAX, SAMPLE_MIN, UNSIGNED_FLIP, VOLUME_SHIFT};

/// One channel's amplitude at one instant.
pub type Sample = i16;

/// Per-channel gain, `VOLUME_UNITY` = 1.0.
pub type Volume = u16;

/// How samples are represented in the output buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Two's complement, silence is `0`.
    #[default]
    Signed,
    /// Offset binary stored in the `i16` bit pattern, silence is `0x8000`.
    Unsigned,
}

impl SampleFormat {
    /// Decode a stored output sample into its signed value.
    #[inline]
    pub fn decode(self, stored: Sample) -> i32 {
        match self {
            Self::Signed => stored as i32,
            Self::Unsigned => ((stored as u16) ^ UNSIGNED_FLIP) as i16 as i32,
        }
    }

    /// Encode an in-range signed value into the stored representation.
    #[inline]
    pub fn encode(self, value: Sample) -> Sample {
        match self {
            Self::Signed => value,
            Self::Unsigned => ((value as u16) ^ UNSIGNED_FLIP) as i16,
        }
    }

    /// The stored value of digital silence.
    pub fn silence(self) -> Sample {
        self.encode(0)
    }
}

/// Saturate a wide intermediate to the sample range.
#[inline]
pub fn clamp_sample(value: i32) -> Sample {
    value.clamp(SAMPLE_MIN, SAMPLE_MAX) as Sample
}

/// `sample * volume / VOLUME_UNITY`, rounded to nearest (half up).
///
/// The result is not clamped; at volumes above unity it can leave the
/// sample range.
#[inline]
pub fn scale_volume(sample: i32, volume: Volume) -> i32 {
    let half = 1i32 << (VOLUME_SHIFT - 1);
    (sample * volume as i32 + half) >> VOLUME_SHIFT
}

/// Saturating add of `value` onto the stored sample `dst`.
#[inline]
pub fn clamped_add(dst: &mut Sample, value: i32, format: SampleFormat) {
    let sum = format.decode(*dst) + value;
    *dst = format.encode(clamp_sample(sum));
}

/// Saturating overwrite of the stored sample `dst`.
#[inline]
pub fn store(dst: &mut Sample, value: i32, format: SampleFormat) {
    *dst = format.encode(clamp_sample(value));
}
