//! Frame-windowed slicing and subdivision of WAV files.
//!
//! The crate reads an audio source in fixed-size frame windows and writes
//! each window out as its own 16-bit PCM WAV file. Two operations are built
//! on the same iterator: [`slice_every_n`] emits one file per window and
//! keeps the trailing remainder as a final shorter file, while
//! [`subdivide_by_n`] splits the source into a fixed count of near-equal
//! segments and folds the remainder into the last one.

mod chunk;
mod error;
mod naming;
mod source;
mod window;

pub use chunk::Chunk;
pub use error::SliceError;
pub use naming::{num_width, PathTemplate};
pub use source::{write_chunk, FrameSource, WavSource};
pub use window::{FrameWindows, WindowedChunk};

use std::path::{Path, PathBuf};

use log::info;

/// Split `source` into windows of `n` frames, one output file per window.
///
/// The trailing remainder, if any, becomes a final shorter file. Output
/// files are named `<dest_prefix><index>.wav` with the index zero-padded
/// for the expected file count. Returns the written paths in order.
pub fn slice_every_n<S: FrameSource>(
    source: &mut S,
    n: usize,
    dest_prefix: &str,
) -> Result<Vec<PathBuf>, SliceError> {
    slice_every_n_with(source, n, dest_prefix, |_, _| {})
}

/// [`slice_every_n`], invoking `observer` with each written path and its
/// index as soon as the file has been finalized.
pub fn slice_every_n_with<S, F>(
    source: &mut S,
    n: usize,
    dest_prefix: &str,
    mut observer: F,
) -> Result<Vec<PathBuf>, SliceError>
where
    S: FrameSource,
    F: FnMut(&Path, u64),
{
    if n < 1 {
        return Err(SliceError::InvalidChunkSize);
    }

    let total = source.frames();
    let sample_rate = source.sample_rate();
    let template = PathTemplate::new(dest_prefix, total / n as u64 + 1);
    info!("slicing {total} frame(s) into windows of {n}");

    let mut written = Vec::new();
    for item in FrameWindows::new(source, n)? {
        let item = item?;
        let index = item.index();
        let chunk = item.into_chunk();

        let path = template.path(index);
        write_chunk(&path, &chunk, sample_rate)?;
        observer(&path, index);
        written.push(path);
    }

    info!("wrote {} file(s)", written.len());
    Ok(written)
}

/// Segment size and leftover frame count for splitting `frames` into `n`
/// near-equal parts.
///
/// Fails with [`SliceError::InvalidSubdivision`] if `n` is zero or exceeds
/// the frame count.
pub fn subdivision_size_for_n(frames: u64, n: u64) -> Result<(u64, u64), SliceError> {
    if n < 1 || n > frames {
        return Err(SliceError::InvalidSubdivision {
            requested: n,
            frames,
        });
    }

    Ok((frames / n, frames % n))
}

/// Split `source` into exactly `n` consecutive near-equal segments.
///
/// Leftover frames are appended onto the last segment rather than emitted
/// as an extra file, so exactly `n` files are produced, named with a
/// template sized for `n`. Returns `(segment size, remainder size)`.
pub fn subdivide_by_n<S: FrameSource>(
    source: &mut S,
    n: u64,
    dest_prefix: &str,
) -> Result<(u64, u64), SliceError> {
    subdivide_by_n_with(source, n, dest_prefix, |_, _| {})
}

/// [`subdivide_by_n`], invoking `observer` with each written path and its
/// index.
pub fn subdivide_by_n_with<S, F>(
    source: &mut S,
    n: u64,
    dest_prefix: &str,
    mut observer: F,
) -> Result<(u64, u64), SliceError>
where
    S: FrameSource,
    F: FnMut(&Path, u64),
{
    let (size, remainder) = subdivision_size_for_n(source.frames(), n)?;
    let sample_rate = source.sample_rate();
    let template = PathTemplate::new(dest_prefix, n);
    info!(
        "subdividing {} frame(s) into {n} segment(s) of {size} (+{remainder})",
        source.frames()
    );

    let mut segments: Vec<Chunk> = Vec::with_capacity(n as usize);
    for item in FrameWindows::new(source, size as usize)? {
        match item? {
            WindowedChunk::Full { chunk, .. } => {
                if segments.len() as u64 == n {
                    // Leftover met or exceeded the segment size, so the tail
                    // arrives as further full windows. They belong to the
                    // last segment.
                    if let Some(last) = segments.last_mut() {
                        last.append(chunk)?;
                    }
                } else {
                    segments.push(chunk);
                }
            }
            WindowedChunk::Remainder { chunk, .. } => {
                if let Some(last) = segments.last_mut() {
                    last.append(chunk)?;
                } else {
                    segments.push(chunk);
                }
            }
        }
    }

    for (index, segment) in segments.iter().enumerate() {
        let path = template.path(index as u64);
        write_chunk(&path, segment, sample_rate)?;
        observer(&path, index as u64);
    }

    Ok((size, remainder))
}

/// Output paths a [`slice_every_n`] run would produce, without any I/O.
pub fn plan_slices(frames: u64, n: usize, dest_prefix: &str) -> Result<Vec<PathBuf>, SliceError> {
    if n < 1 {
        return Err(SliceError::InvalidChunkSize);
    }

    let n = n as u64;
    let template = PathTemplate::new(dest_prefix, frames / n + 1);
    let count = (frames + n - 1) / n;
    Ok((0..count).map(|index| template.path(index)).collect())
}

/// Output paths a [`subdivide_by_n`] run would produce, without any I/O.
pub fn plan_subdivisions(frames: u64, n: u64, dest_prefix: &str) -> Result<Vec<PathBuf>, SliceError> {
    subdivision_size_for_n(frames, n)?;

    let template = PathTemplate::new(dest_prefix, n);
    Ok((0..n).map(|index| template.path(index)).collect())
}
