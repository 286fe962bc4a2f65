//! PCM sample-rate conversion — one strategy per ratio class:
//!
//! | Ratio                         | Strategy                          | Phase state |
//! |-------------------------------|-----------------------------------|-------------|
//! | `in == out`                   | [`CopyRateConverter`]             | none        |
//! | `out = K·in` or `in = K·out`  | [`SimpleRateConverter`]           | repeat/skip counter |
//! | anything else                 | [`InterpolatingRateConverter`]    | exact fraction |
//!
//! Every strategy writes interleaved stereo frames and shares one
//! `flow`/`drain` contract; [`RateConverter`] picks the strategy at
//! construction and owns the Active → Draining state.

pub mod copy;
pub mod frames;
pub mod interpolate;
pub mod simple;

pub use copy::CopyRateConverter;
pub use interpolate::InterpolatingRateConverter;
pub use simple::{Direction, SimpleRateConverter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::audio::{
    AudioStream,
    sample::{Sample, SampleFormat, Volume},
};

use frames::FrameWriter;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Kernel used by the general (non-integer ratio) converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Two-point linear interpolation.
    #[default]
    Linear,
    /// Four-point Catmull-Rom. Smoother, one extra frame of latency.
    Hermite,
}

/// How converted frames land in the caller's buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Overwrite the buffer contents.
    #[default]
    Replace,
    /// Saturating-add onto the buffer contents.
    Mix,
}

/// Per-instance converter options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterConfig {
    pub stereo: bool,
    pub reverse_stereo: bool,
    pub sample_format: SampleFormat,
    pub output_mode: OutputMode,
    pub interpolation: Interpolation,
}

impl ConverterConfig {
    pub fn new(stereo: bool, reverse_stereo: bool) -> Self {
        Self {
            stereo,
            reverse_stereo,
            ..Self::default()
        }
    }

    fn writer(&self) -> FrameWriter {
        FrameWriter {
            reverse_stereo: self.reverse_stereo,
            format: self.sample_format,
            mode: self.output_mode,
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("invalid rate pair {input} Hz -> {output} Hz: rates must be non-zero")]
    InvalidRate { input: u32, output: u32 },
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Which strategy a rate pair calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateClass {
    Identity,
    Integer { direction: Direction, factor: u32 },
    /// `num / den = input / output` in lowest terms.
    Fractional { num: u64, den: u64 },
}

impl RateClass {
    pub fn of(input_rate: u32, output_rate: u32) -> Result<Self, RateError> {
        if input_rate == 0 || output_rate == 0 {
            return Err(RateError::InvalidRate {
                input: input_rate,
                output: output_rate,
            });
        }

        if input_rate == output_rate {
            return Ok(Self::Identity);
        }
        if output_rate % input_rate == 0 {
            return Ok(Self::Integer {
                direction: Direction::Up,
                factor: output_rate / input_rate,
            });
        }
        if input_rate % output_rate == 0 {
            return Ok(Self::Integer {
                direction: Direction::Down,
                factor: input_rate / output_rate,
            });
        }

        let g = gcd(input_rate, output_rate);
        Ok(Self::Fractional {
            num: (input_rate / g) as u64,
            den: (output_rate / g) as u64,
        })
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

// ─── RateConverter ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterState {
    /// Accepting `flow` calls.
    Active,
    /// End of input signalled; only `drain` produces output.
    Draining,
}

/// Strategy chosen at construction.
pub enum Strategy {
    Copy(CopyRateConverter),
    Simple(SimpleRateConverter),
    Interpolating(InterpolatingRateConverter),
}

/// A streaming converter for one rate pair and channel layout.
///
/// Not `Sync` by intent: every call takes `&mut self` and must happen in
/// stream order. Output is always interleaved stereo; counts are in frames.
pub struct RateConverter {
    strategy: Strategy,
    state: ConverterState,
    input_rate: u32,
    output_rate: u32,
    stereo: bool,
    layout_warned: bool,
    finish_warned: bool,
}

/// Build a converter with default options. See [`RateConverter::with_config`].
pub fn make_rate_converter(
    input_rate: u32,
    output_rate: u32,
    stereo: bool,
    reverse_stereo: bool,
) -> Result<RateConverter, RateError> {
    RateConverter::with_config(
        input_rate,
        output_rate,
        &ConverterConfig::new(stereo, reverse_stereo),
    )
}

impl RateConverter {
    pub fn with_config(
        input_rate: u32,
        output_rate: u32,
        config: &ConverterConfig,
    ) -> Result<Self, RateError> {
        let class = RateClass::of(input_rate, output_rate)?;
        let writer = config.writer();

        let strategy = match class {
            RateClass::Identity => Strategy::Copy(CopyRateConverter::new(config.stereo, writer)),
            RateClass::Integer { direction, factor } => Strategy::Simple(
                SimpleRateConverter::new(direction, factor, config.stereo, writer),
            ),
            RateClass::Fractional { num, den } => {
                Strategy::Interpolating(InterpolatingRateConverter::new(
                    num,
                    den,
                    config.interpolation,
                    config.stereo,
                    writer,
                ))
            }
        };

        debug!(
            "Rate converter {} Hz -> {} Hz: {:?} (stereo={}, reverse={}, format={:?}, mode={:?})",
            input_rate,
            output_rate,
            class,
            config.stereo,
            config.reverse_stereo,
            config.sample_format,
            config.output_mode
        );

        Ok(Self {
            strategy,
            state: ConverterState::Active,
            input_rate,
            output_rate,
            stereo: config.stereo,
            layout_warned: false,
            finish_warned: false,
        })
    }

    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    pub fn is_stereo(&self) -> bool {
        self.stereo
    }

    pub fn state(&self) -> ConverterState {
        self.state
    }

    /// Short name of the active strategy, for logs.
    pub fn strategy_name(&self) -> &'static str {
        match &self.strategy {
            Strategy::Copy(_) => "copy",
            Strategy::Simple(s) => match s.direction() {
                Direction::Up => "repeat",
                Direction::Down => "decimate",
            },
            Strategy::Interpolating(_) => "interpolate",
        }
    }

    /// Convert up to `frames` output frames from `input` into `out`.
    ///
    /// Returns the frames produced: fewer than requested on input underrun,
    /// zero once the converter is draining.
    pub fn flow<S: AudioStream + ?Sized>(
        &mut self,
        input: &mut S,
        out: &mut [Sample],
        frames: usize,
        vol_l: Volume,
        vol_r: Volume,
    ) -> usize {
        if self.state == ConverterState::Draining {
            if !self.finish_warned {
                warn!("flow() called after end of input; use drain()");
                self.finish_warned = true;
            }
            return 0;
        }
        if input.is_stereo() != self.stereo && !self.layout_warned {
            warn!(
                "Source layout (stereo={}) differs from converter (stereo={}); using converter layout",
                input.is_stereo(),
                self.stereo
            );
            self.layout_warned = true;
        }

        match &mut self.strategy {
            Strategy::Copy(c) => c.flow(input, out, frames, vol_l, vol_r),
            Strategy::Simple(c) => c.flow(input, out, frames, vol_l, vol_r),
            Strategy::Interpolating(c) => c.flow(input, out, frames, vol_l, vol_r),
        }
    }

    /// Signal that no more input will arrive. One-way.
    pub fn finish(&mut self) {
        if self.state == ConverterState::Active {
            debug!(
                "Rate converter {} Hz -> {} Hz draining",
                self.input_rate, self.output_rate
            );
            self.state = ConverterState::Draining;
        }
    }

    /// Emit frames derivable from input already pulled into the converter.
    ///
    /// Never reads the source. Returns zero once everything is flushed.
    pub fn drain(&mut self, out: &mut [Sample], frames: usize, vol: Volume) -> usize {
        self.finish();
        match &mut self.strategy {
            Strategy::Copy(c) => c.drain(out, frames, vol),
            Strategy::Simple(c) => c.drain(out, frames, vol),
            Strategy::Interpolating(c) => c.drain(out, frames, vol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{constants::VOLUME_UNITY, source::SliceSource};

    fn left(out: &[Sample]) -> Vec<Sample> {
        out.chunks(2).map(|f| f[0]).collect()
    }

    fn convert_in_chunks(
        conv: &mut RateConverter,
        data: &[Sample],
        stereo: bool,
        chunk: usize,
    ) -> Vec<Sample> {
        let mut src = SliceSource::new(data, stereo).with_max_per_read(7);
        let mut out = vec![0i16; chunk * 2];
        let mut all = Vec::new();
        loop {
            let n = conv.flow(&mut src, &mut out, chunk, VOLUME_UNITY, VOLUME_UNITY);
            all.extend_from_slice(&out[..n * 2]);
            if n < chunk {
                break;
            }
        }
        loop {
            let n = conv.drain(&mut out, chunk, VOLUME_UNITY);
            if n == 0 {
                break;
            }
            all.extend_from_slice(&out[..n * 2]);
        }
        all
    }

    fn ramp(len: usize) -> Vec<Sample> {
        (0..len).map(|i| ((i * 37) % 2000) as Sample - 1000).collect()
    }

    #[test]
    fn rejects_zero_rates() {
        assert_eq!(
            make_rate_converter(0, 48_000, true, false).err(),
            Some(RateError::InvalidRate {
                input: 0,
                output: 48_000
            })
        );
        assert!(make_rate_converter(44_100, 0, false, false).is_err());
    }

    #[test]
    fn classifies_rate_pairs() {
        assert_eq!(RateClass::of(48_000, 48_000), Ok(RateClass::Identity));
        assert_eq!(
            RateClass::of(22_050, 44_100),
            Ok(RateClass::Integer {
                direction: Direction::Up,
                factor: 2
            })
        );
        assert_eq!(
            RateClass::of(48_000, 16_000),
            Ok(RateClass::Integer {
                direction: Direction::Down,
                factor: 3
            })
        );
        assert_eq!(
            RateClass::of(44_100, 48_000),
            Ok(RateClass::Fractional { num: 147, den: 160 })
        );
    }

    #[test]
    fn gcd_reduces() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(160, 147), 1);
        assert_eq!(gcd(7, 7), 7);
    }

    #[test]
    fn strategy_follows_ratio() {
        let name = |i, o| make_rate_converter(i, o, false, false).unwrap().strategy_name();
        assert_eq!(name(8_000, 8_000), "copy");
        assert_eq!(name(11_025, 22_050), "repeat");
        assert_eq!(name(32_000, 8_000), "decimate");
        assert_eq!(name(44_100, 48_000), "interpolate");
    }

    #[test]
    fn identity_matches_input_regardless_of_chunking() {
        let data = ramp(300);
        for chunk in [1, 10, 64, 300] {
            let mut conv = make_rate_converter(22_050, 22_050, false, false).unwrap();
            let out = convert_in_chunks(&mut conv, &data, false, chunk);
            assert_eq!(left(&out), data, "chunk size {chunk}");
        }
    }

    #[test]
    fn identity_applies_volume_and_clamps() {
        let data = [20_000, -20_000, 100, -100];
        let mut src = SliceSource::new(&data, true);
        let mut conv = make_rate_converter(8_000, 8_000, true, false).unwrap();
        let mut out = [0i16; 4];

        assert_eq!(conv.flow(&mut src, &mut out, 2, 512, 128), 2);
        assert_eq!(out, [i16::MAX, -10_000, 200, -50]);
    }

    /// `ceil(n * output_rate / input_rate)`, the length every strategy must
    /// reach once drained.
    fn expected_frames(input_rate: u32, output_rate: u32, n: usize) -> usize {
        (n as u64 * output_rate as u64).div_ceil(input_rate as u64) as usize
    }

    #[test]
    fn chunking_is_bit_identical() {
        let pairs = [
            (22_050, 22_050),
            (11_025, 22_050),
            (8_000, 24_000),
            (44_100, 22_050),
            (48_000, 16_000),
            (44_100, 48_000),
            (48_000, 44_100),
            (8_000, 11_025),
            (22_050, 16_000),
        ];
        for interpolation in [Interpolation::Linear, Interpolation::Hermite] {
            for stereo in [false, true] {
                let config = ConverterConfig {
                    interpolation,
                    ..ConverterConfig::new(stereo, false)
                };
                let channels = if stereo { 2 } else { 1 };

                for (input_rate, output_rate) in pairs {
                    for frames in [0, 1, 2, 7, 160, 441] {
                        let data = ramp(frames * channels);
                        let mut whole =
                            RateConverter::with_config(input_rate, output_rate, &config).unwrap();
                        let reference = convert_in_chunks(&mut whole, &data, stereo, 4_096);
                        let case = format!(
                            "{interpolation:?} stereo={stereo} {input_rate}->{output_rate} frames={frames}"
                        );
                        assert_eq!(
                            reference.len() / 2,
                            expected_frames(input_rate, output_rate, frames),
                            "{case}"
                        );

                        for chunk in [1, 3, 10, 257] {
                            let mut conv =
                                RateConverter::with_config(input_rate, output_rate, &config).unwrap();
                            let out = convert_in_chunks(&mut conv, &data, stereo, chunk);
                            assert_eq!(out, reference, "{case} chunk {chunk}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn single_sample_reads_fill_the_whole_request() {
        let data: Vec<Sample> = (0..40).collect();
        let pairs = [(8_000, 8_000), (8_000, 16_000), (16_000, 8_000), (44_100, 48_000)];
        for (input_rate, output_rate) in pairs {
            let mut src = SliceSource::new(&data, true).with_max_per_read(1);
            let mut conv = make_rate_converter(input_rate, output_rate, true, false).unwrap();
            let mut out = [0i16; 20];

            let n = conv.flow(&mut src, &mut out, 10, VOLUME_UNITY, VOLUME_UNITY);
            assert_eq!(n, 10, "{input_rate}->{output_rate}");
        }

        let mut src = SliceSource::new(&data, true).with_max_per_read(1);
        let mut conv = make_rate_converter(8_000, 8_000, true, false).unwrap();
        let mut out = [0i16; 20];
        conv.flow(&mut src, &mut out, 10, VOLUME_UNITY, VOLUME_UNITY);
        assert_eq!(&out[..], &data[..20]);
    }

    #[test]
    fn doubling_has_no_drift_over_a_million_frames() {
        let mut conv = make_rate_converter(24_000, 48_000, false, false).unwrap();
        let block: Vec<Sample> = (0..1_000).map(|i| i as Sample).collect();
        let mut out = vec![0i16; 4_096];
        let mut produced = 0usize;

        // 1,000 blocks of 1,000 input frames, requested in odd-sized pieces.
        for _ in 0..1_000 {
            let mut src = SliceSource::new(&block, false);
            loop {
                let n = conv.flow(&mut src, &mut out, 1_999, VOLUME_UNITY, VOLUME_UNITY);
                produced += n;
                if n < 1_999 {
                    break;
                }
            }
        }
        produced += conv.drain(&mut out, 2_048, VOLUME_UNITY);
        assert_eq!(produced, 2_000_000);
    }

    #[test]
    fn doubling_maps_each_frame_to_two_positions() {
        let data = [1, 2, 3];
        let mut src = SliceSource::new(&data, false);
        let mut conv = make_rate_converter(11_025, 22_050, false, false).unwrap();
        let mut out = [0i16; 12];

        assert_eq!(conv.flow(&mut src, &mut out, 6, VOLUME_UNITY, VOLUME_UNITY), 6);
        assert_eq!(left(&out), vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn drain_completes_expected_duration() {
        let data = ramp(441);
        let mut conv = make_rate_converter(44_100, 48_000, false, false).unwrap();
        let out = convert_in_chunks(&mut conv, &data, false, 100);
        // 441 frames at 44.1 kHz is exactly 480 frames at 48 kHz.
        assert_eq!(out.len() / 2, 480);

        let mut buf = [0i16; 8];
        assert_eq!(conv.drain(&mut buf, 4, VOLUME_UNITY), 0);
        assert_eq!(conv.drain(&mut buf, 4, VOLUME_UNITY), 0);
    }

    #[test]
    fn flow_after_finish_produces_nothing() {
        let data = [1, 2, 3, 4];
        let mut src = SliceSource::new(&data, false);
        let mut conv = make_rate_converter(8_000, 8_000, false, false).unwrap();
        let mut out = [0i16; 8];

        conv.finish();
        assert_eq!(conv.state(), ConverterState::Draining);
        assert_eq!(conv.flow(&mut src, &mut out, 4, VOLUME_UNITY, VOLUME_UNITY), 0);
        assert_eq!(src.remaining(), 4);
    }

    #[test]
    fn underrun_resumes_without_a_seam() {
        let data = ramp(200);
        let mut reference = make_rate_converter(44_100, 32_000, false, false).unwrap();
        let expected = convert_in_chunks(&mut reference, &data, false, 1_000);

        // Feed the same samples in two separate sources with a dry spell between.
        let mut conv = make_rate_converter(44_100, 32_000, false, false).unwrap();
        let mut out = vec![0i16; 2_000];
        let mut got = Vec::new();

        let mut first = SliceSource::new(&data[..90], false);
        let n = conv.flow(&mut first, &mut out, 1_000, VOLUME_UNITY, VOLUME_UNITY);
        got.extend_from_slice(&out[..n * 2]);

        let mut empty = SliceSource::new(&[], false);
        assert_eq!(conv.flow(&mut empty, &mut out, 1_000, VOLUME_UNITY, VOLUME_UNITY), 0);

        let mut second = SliceSource::new(&data[90..], false);
        let n = conv.flow(&mut second, &mut out, 1_000, VOLUME_UNITY, VOLUME_UNITY);
        got.extend_from_slice(&out[..n * 2]);
        let n = conv.drain(&mut out, 1_000, VOLUME_UNITY);
        got.extend_from_slice(&out[..n * 2]);

        assert_eq!(got, expected);
    }

    #[test]
    fn stereo_order_is_preserved() {
        let data = [1_000, 0, 2_000, 0, 3_000, 0];
        let mut src = SliceSource::new(&data, true);
        let mut conv = make_rate_converter(44_100, 48_000, true, false).unwrap();
        let mut out = [0i16; 6];

        assert_eq!(conv.flow(&mut src, &mut out, 3, VOLUME_UNITY, VOLUME_UNITY), 3);
        assert!(out.chunks(2).all(|f| f[1] == 0));
        assert_eq!(out[0], 1_000);
    }

    #[test]
    fn reverse_stereo_moves_left_tone_to_right() {
        let tone: Vec<Sample> = (0..400)
            .flat_map(|i| [((i % 50) * 400) as Sample, 0])
            .collect();

        let mut plain = make_rate_converter(44_100, 48_000, true, false).unwrap();
        let straight = convert_in_chunks(&mut plain, &tone, true, 64);
        let mut swapped = make_rate_converter(44_100, 48_000, true, true).unwrap();
        let reversed = convert_in_chunks(&mut swapped, &tone, true, 64);

        assert_eq!(straight.len(), reversed.len());
        for (a, b) in straight.chunks(2).zip(reversed.chunks(2)) {
            assert_eq!(b[0], 0);
            assert_eq!(b[1], a[0]);
        }
        assert!(reversed.chunks(2).any(|f| f[1] != 0));
    }

    #[test]
    fn mono_fans_out_with_per_channel_volume() {
        let data = [1_000, 2_000];
        let mut src = SliceSource::new(&data, false);
        let mut conv = make_rate_converter(16_000, 16_000, false, false).unwrap();
        let mut out = [0i16; 4];

        assert_eq!(conv.flow(&mut src, &mut out, 2, VOLUME_UNITY, 0), 2);
        assert_eq!(out, [1_000, 0, 2_000, 0]);
    }

    #[test]
    fn mix_mode_adds_onto_existing_output() {
        let config = ConverterConfig {
            output_mode: OutputMode::Mix,
            ..ConverterConfig::new(false, false)
        };
        let data = [30_000, -5];
        let mut src = SliceSource::new(&data, false);
        let mut conv = RateConverter::with_config(8_000, 8_000, &config).unwrap();
        let mut out = [10_000i16, 10_000, 5, 5];

        assert_eq!(conv.flow(&mut src, &mut out, 2, VOLUME_UNITY, VOLUME_UNITY), 2);
        assert_eq!(out, [i16::MAX, i16::MAX, 0, 0]);
    }

    #[test]
    fn short_output_buffer_truncates_request() {
        let data = ramp(64);
        let mut src = SliceSource::new(&data, false);
        let mut conv = make_rate_converter(8_000, 8_000, false, false).unwrap();
        let mut out = [0i16; 5];

        assert_eq!(conv.flow(&mut src, &mut out, 10, VOLUME_UNITY, VOLUME_UNITY), 2);
    }
}
