use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::chunk::Chunk;
use crate::error::SliceError;

/// A readable audio stream that can be consumed in frame-sized reads.
///
/// `frames`, `channels` and `sample_rate` describe the whole source and do
/// not change as data is consumed. `read` returns up to `n` frames; a short
/// or empty chunk signals end of stream.
pub trait FrameSource {
    /// Total number of frames in the source.
    fn frames(&self) -> u64;

    /// Number of interleaved channels per frame.
    fn channels(&self) -> u16;

    /// Sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Read up to `n` frames from the current position.
    fn read(&mut self, n: usize) -> Result<Chunk, SliceError>;
}

/// A [`FrameSource`] backed by a WAV file on disk.
///
/// Samples are decoded as 16-bit integers; wider encodings are rejected by
/// the codec when the first read is attempted.
pub struct WavSource {
    reader: WavReader<BufReader<File>>,
    total: u64,
    remaining: u64,
}

impl WavSource {
    /// Open a WAV file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SliceError> {
        let reader = WavReader::open(path)?;
        let total = u64::from(reader.duration());
        Ok(Self {
            reader,
            total,
            remaining: total,
        })
    }
}

impl FrameSource for WavSource {
    fn frames(&self) -> u64 {
        self.total
    }

    fn channels(&self) -> u16 {
        self.reader.spec().channels
    }

    fn sample_rate(&self) -> u32 {
        self.reader.spec().sample_rate
    }

    fn read(&mut self, n: usize) -> Result<Chunk, SliceError> {
        let channels = self.channels();
        let take = (n as u64).min(self.remaining) as usize;
        let wanted = take * channels as usize;

        let mut samples = Vec::with_capacity(wanted);
        for sample in self.reader.samples::<i16>().take(wanted) {
            samples.push(sample?);
        }

        self.remaining -= take as u64;
        debug!("read {} of {} requested frame(s)", take, n);
        Chunk::from_interleaved(samples, channels)
    }
}

/// Write a chunk to `path` as a 16-bit integer PCM WAV file.
///
/// The file carries the chunk's channel count and the given sample rate and
/// is finalized before returning.
pub fn write_chunk<P: AsRef<Path>>(
    path: P,
    chunk: &Chunk,
    sample_rate: u32,
) -> Result<(), SliceError> {
    debug!(
        "writing {} frame(s) to {}",
        chunk.frames(),
        path.as_ref().display()
    );

    let spec = WavSpec {
        channels: chunk.channels(),
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in chunk.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(())
}
