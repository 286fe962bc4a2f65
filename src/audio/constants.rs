//! Central constants for the rate converter.
//!
//! All magic numbers in `src/audio/**` live here so they can be tuned in one
//! place and remain consistent across modules.

// ── Sample / PCM ─────────────────────────────────────────────────────────────

/// Largest value a sample can hold.
pub const SAMPLE_MAX: i32 = 0x7fff;

/// Smallest value a sample can hold.
pub const SAMPLE_MIN: i32 = -SAMPLE_MAX - 1;

/// XOR mask converting between signed and offset-binary (unsigned) samples.
pub const UNSIGNED_FLIP: u16 = 0x8000;

/// Output is always interleaved stereo.
pub const OUTPUT_CHANNELS: usize = 2;

// ── Volume ───────────────────────────────────────────────────────────────────

/// Volume that leaves a sample unchanged.
pub const VOLUME_UNITY: u16 = 256;

/// `log2(VOLUME_UNITY)`, the right shift applied after volume multiplication.
pub const VOLUME_SHIFT: u32 = 8;

// ── Converter buffers ────────────────────────────────────────────────────────

/// Samples pulled from the source per refill of the converter's input buffer.
/// Allocated once per converter; must hold at least one stereo frame.
pub const INPUT_BUFFER_SAMPLES: usize = 512;

/// Frames of history kept by the linear interpolator.
pub const LINEAR_TAPS: usize = 2;

/// Frames of history kept by the cubic Hermite interpolator.
pub const HERMITE_TAPS: usize = 4;

// ── Conversion job ───────────────────────────────────────────────────────────

/// Output frames requested per `flow` call when the config leaves it unset.
pub const DEFAULT_CHUNK_FRAMES: usize = 1_024;
