//! Streaming PCM sample-rate conversion.
//!
//! ```no_run
//! use rateconv::audio::{SliceSource, make_rate_converter, constants::VOLUME_UNITY};
//!
//! let input = vec![0i16; 4410];
//! let mut src = SliceSource::new(&input, false);
//! let mut conv = make_rate_converter(44_100, 48_000, false, false)?;
//! let mut out = vec![0i16; 2 * 512];
//! let produced = conv.flow(&mut src, &mut out, 512, VOLUME_UNITY, VOLUME_UNITY);
//! # let _ = produced;
//! # Ok::<(), rateconv::audio::RateError>(())
//! ```

pub mod audio;
pub mod common;
pub mod configs;
pub mod job;
