use thiserror::Error;

/// Errors that can occur while slicing or subdividing audio files.
#[derive(Debug, Error)]
pub enum SliceError {
    /// Error returned when the requested window size is smaller than one frame.
    #[error("chunk size must be at least one frame")]
    InvalidChunkSize,

    /// Error returned when a subdivision count is zero or exceeds the
    /// number of frames in the source.
    #[error("cannot subdivide {frames} frame(s) into {requested} segment(s)")]
    InvalidSubdivision { requested: u64, frames: u64 },

    /// Invariant failure: the source returned more frames than requested.
    #[error("source returned {actual} frames for a read of {requested}")]
    OversizedRead { requested: usize, actual: usize },

    /// Invariant failure: the source produced data after a short read had
    /// already signalled end of stream.
    #[error("source produced data after the trailing remainder")]
    DataAfterRemainder,

    /// Invariant failure: two chunks with different channel counts were
    /// concatenated.
    #[error("channel counts differ: {left} vs {right}")]
    ChannelMismatch { left: u16, right: u16 },

    /// Error returned when a sample buffer does not divide evenly into
    /// whole frames.
    #[error("buffer of {samples} sample(s) is not a whole number of {channels}-channel frames")]
    RaggedBuffer { samples: usize, channels: u16 },

    /// Wrapper around errors produced by the WAV codec.
    #[error(transparent)]
    Wav(#[from] hound::Error),

    /// Wrapper around IO errors encountered while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
