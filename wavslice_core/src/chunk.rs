use crate::error::SliceError;

/// A contiguous run of audio frames produced by one read call.
///
/// Samples are stored interleaved, so the buffer length is always
/// `frames * channels`. The shape is kept alongside the buffer to make
/// frame-wise concatenation checkable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    samples: Vec<i16>,
    channels: u16,
}

impl Chunk {
    /// Build a chunk from an interleaved sample buffer.
    ///
    /// Fails with [`SliceError::RaggedBuffer`] if the buffer does not
    /// divide evenly into whole `channels`-wide frames.
    pub fn from_interleaved(samples: Vec<i16>, channels: u16) -> Result<Self, SliceError> {
        if channels == 0 || samples.len() % channels as usize != 0 {
            return Err(SliceError::RaggedBuffer {
                samples: samples.len(),
                channels,
            });
        }

        Ok(Self { samples, channels })
    }

    /// Number of frames held by this chunk.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Number of interleaved channels per frame.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// The interleaved sample buffer.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append another chunk frame-wise onto the end of this one.
    ///
    /// Both chunks must carry the same channel count; mismatches fail with
    /// [`SliceError::ChannelMismatch`].
    pub fn append(&mut self, other: Chunk) -> Result<(), SliceError> {
        if self.channels != other.channels {
            return Err(SliceError::ChannelMismatch {
                left: self.channels,
                right: other.channels,
            });
        }

        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }
}
