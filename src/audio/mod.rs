pub mod buffer;
pub mod constants;
pub mod resample;
pub mod sample;
pub mod source;

pub use buffer::PooledBuffer;
pub use resample::{
    ConverterConfig, ConverterState, Interpolation, OutputMode, RateConverter, RateError,
    make_rate_converter,
};
pub use sample::{Sample, SampleFormat, Volume};
pub use source::{AudioStream, ChannelSource, ReaderSource, SliceSource};
