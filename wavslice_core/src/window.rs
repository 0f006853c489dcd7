use crate::chunk::Chunk;
use crate::error::SliceError;
use crate::source::FrameSource;

/// One item produced by [`FrameWindows`].
///
/// The trailing short chunk gets its own variant so consumers that treat it
/// differently (subdivision merges it into the previous segment) can match
/// on it instead of checking frame counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowedChunk {
    /// A chunk holding exactly the requested number of frames.
    Full { chunk: Chunk, index: u64 },
    /// The final chunk, shorter than the requested window size.
    Remainder { chunk: Chunk, index: u64 },
}

impl WindowedChunk {
    /// Position of this chunk in the produced sequence.
    pub fn index(&self) -> u64 {
        match self {
            WindowedChunk::Full { index, .. } | WindowedChunk::Remainder { index, .. } => *index,
        }
    }

    pub fn chunk(&self) -> &Chunk {
        match self {
            WindowedChunk::Full { chunk, .. } | WindowedChunk::Remainder { chunk, .. } => chunk,
        }
    }

    pub fn into_chunk(self) -> Chunk {
        match self {
            WindowedChunk::Full { chunk, .. } | WindowedChunk::Remainder { chunk, .. } => chunk,
        }
    }
}

/// Iterator reading a [`FrameSource`] in strides of a fixed frame count.
///
/// Every exactly-sized read is yielded as [`WindowedChunk::Full`]. A short
/// read is held back until the following read confirms end of stream, then
/// yielded as [`WindowedChunk::Remainder`]. Indices are a contiguous
/// 0-based sequence, one per yielded chunk, remainder included.
///
/// The source must behave like a file at end of stream: once it returns a
/// short chunk, every later read must be empty. Violations, like a read
/// returning more frames than requested, end the iteration with an error
/// and the iterator stays exhausted afterwards.
pub struct FrameWindows<'a, S> {
    source: &'a mut S,
    size: usize,
    next_index: u64,
    pending: Option<Chunk>,
    done: bool,
}

impl<'a, S: FrameSource> FrameWindows<'a, S> {
    /// Create a windowed iterator over `source`.
    ///
    /// Fails with [`SliceError::InvalidChunkSize`] before any read occurs
    /// if `size` is zero.
    pub fn new(source: &'a mut S, size: usize) -> Result<Self, SliceError> {
        if size < 1 {
            return Err(SliceError::InvalidChunkSize);
        }

        Ok(Self {
            source,
            size,
            next_index: 0,
            pending: None,
            done: false,
        })
    }

    fn emit(&mut self, item: WindowedChunk) -> Option<Result<WindowedChunk, SliceError>> {
        self.next_index += 1;
        Some(Ok(item))
    }
}

impl<'a, S: FrameSource> Iterator for FrameWindows<'a, S> {
    type Item = Result<WindowedChunk, SliceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let chunk = match self.source.read(self.size) {
                Ok(chunk) => chunk,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            if let Some(pending) = self.pending.take() {
                self.done = true;
                if !chunk.is_empty() {
                    return Some(Err(SliceError::DataAfterRemainder));
                }
                let index = self.next_index;
                return self.emit(WindowedChunk::Remainder {
                    chunk: pending,
                    index,
                });
            }

            let frames = chunk.frames();
            if frames > self.size {
                self.done = true;
                return Some(Err(SliceError::OversizedRead {
                    requested: self.size,
                    actual: frames,
                }));
            }

            if frames == self.size {
                let index = self.next_index;
                return self.emit(WindowedChunk::Full { chunk, index });
            }

            if frames == 0 {
                self.done = true;
                return None;
            }

            // Short read: hold it back until the next read confirms end of
            // stream.
            self.pending = Some(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory source handing out mono frames from a buffer.
    struct MemorySource {
        data: Vec<i16>,
        pos: usize,
        reads: usize,
    }

    impl MemorySource {
        fn new(frames: usize) -> Self {
            Self {
                data: (0..frames as i16).collect(),
                pos: 0,
                reads: 0,
            }
        }
    }

    impl FrameSource for MemorySource {
        fn frames(&self) -> u64 {
            self.data.len() as u64
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            8_000
        }

        fn read(&mut self, n: usize) -> Result<Chunk, SliceError> {
            self.reads += 1;
            let take = n.min(self.data.len() - self.pos);
            let samples = self.data[self.pos..self.pos + take].to_vec();
            self.pos += take;
            Chunk::from_interleaved(samples, 1)
        }
    }

    /// Source that ignores the requested size and returns too many frames.
    struct OversizedSource;

    impl FrameSource for OversizedSource {
        fn frames(&self) -> u64 {
            100
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            8_000
        }

        fn read(&mut self, n: usize) -> Result<Chunk, SliceError> {
            Chunk::from_interleaved(vec![0; n + 1], 1)
        }
    }

    /// Source that keeps producing data after a short read.
    struct ChattySource {
        reads: usize,
    }

    impl FrameSource for ChattySource {
        fn frames(&self) -> u64 {
            100
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            8_000
        }

        fn read(&mut self, n: usize) -> Result<Chunk, SliceError> {
            self.reads += 1;
            let frames = if self.reads == 1 { n / 2 } else { n };
            Chunk::from_interleaved(vec![0; frames], 1)
        }
    }

    fn collect(source: &mut MemorySource, size: usize) -> Vec<WindowedChunk> {
        FrameWindows::new(source, size)
            .unwrap()
            .map(|item| item.unwrap())
            .collect()
    }

    #[test]
    fn yields_full_chunks_and_a_remainder() {
        let mut source = MemorySource::new(10);
        let items = collect(&mut source, 3);

        assert_eq!(items.len(), 4);
        assert!(matches!(items[0], WindowedChunk::Full { .. }));
        assert!(matches!(items[3], WindowedChunk::Remainder { .. }));

        let total: usize = items.iter().map(|item| item.chunk().frames()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn indices_are_contiguous_including_the_remainder() {
        let mut source = MemorySource::new(10);
        let indices: Vec<u64> = collect(&mut source, 3)
            .into_iter()
            .map(|item| item.index())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn exact_multiple_yields_no_remainder() {
        let mut source = MemorySource::new(9);
        let items = collect(&mut source, 3);

        assert_eq!(items.len(), 3);
        assert!(items
            .iter()
            .all(|item| matches!(item, WindowedChunk::Full { .. })));
    }

    #[test]
    fn source_shorter_than_the_window_yields_one_remainder() {
        let mut source = MemorySource::new(2);
        let items = collect(&mut source, 5);

        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], WindowedChunk::Remainder { index: 0, .. }));
        assert_eq!(items[0].chunk().frames(), 2);
    }

    #[test]
    fn empty_source_yields_nothing() {
        let mut source = MemorySource::new(0);
        assert!(collect(&mut source, 4).is_empty());
    }

    #[test]
    fn zero_window_size_fails_before_any_read() {
        let mut source = MemorySource::new(10);
        let err = match FrameWindows::new(&mut source, 0) {
            Err(err) => err,
            Ok(_) => panic!("expected invalid chunk size"),
        };
        assert!(matches!(err, SliceError::InvalidChunkSize));
        assert_eq!(source.reads, 0);
    }

    #[test]
    fn oversized_reads_abort_the_iteration() {
        let mut source = OversizedSource;
        let mut windows = FrameWindows::new(&mut source, 4).unwrap();

        let err = windows.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            SliceError::OversizedRead {
                requested: 4,
                actual: 5
            }
        ));
        assert!(windows.next().is_none());
    }

    #[test]
    fn data_after_the_remainder_aborts_the_iteration() {
        let mut source = ChattySource { reads: 0 };
        let mut windows = FrameWindows::new(&mut source, 4).unwrap();

        let err = windows.next().unwrap().unwrap_err();
        assert!(matches!(err, SliceError::DataAfterRemainder));
        assert!(windows.next().is_none());
    }
}
