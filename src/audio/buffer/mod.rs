/// PCM chunk type passed from a decoder thread to a [`ChannelSource`].
/// A plain `Vec<i16>` of interleaved samples; no custom pool needed.
///
/// [`ChannelSource`]: crate::audio::source::ChannelSource
pub type PooledBuffer = Vec<i16>;
