//! Reassembly of PTY output chunks into terminator-delimited records.
//!
//! Reads from a PTY deliver arbitrary slices of the child's output. The
//! [`Reassembler`] buffers the unterminated tail of each chunk, so a record is
//! handed to the [`RecordSink`] exactly once no matter where the chunk
//! boundaries fall.

use std::io::{ErrorKind, Read};

use dotpty_core::{Result, StreamSettings};
use tracing::{debug, trace};

/// Receives complete records in stream order.
pub trait RecordSink {
    /// Handle one record. The slice excludes the terminator.
    ///
    /// Errors abort the stream and are returned from the reassembler.
    fn record(&mut self, record: &[u8]) -> Result<()>;
}

impl RecordSink for Vec<Vec<u8>> {
    fn record(&mut self, record: &[u8]) -> Result<()> {
        self.push(record.to_vec());
        Ok(())
    }
}

/// Record boundary convention of the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    /// Byte that ends a record
    pub terminator: u8,
    /// Bytes dropped after each terminator
    pub skip: usize,
}

impl Framing {
    /// `\r\n` line endings as produced by a terminal line discipline.
    ///
    /// The byte after every `\r` is dropped unseen. A stream that ends lines
    /// with a lone `\r` loses the first byte of the following record.
    pub const CRLF: Framing = Framing {
        terminator: b'\r',
        skip: 1,
    };

    /// Create a framing with a custom terminator and skip count.
    pub fn new(terminator: u8, skip: usize) -> Self {
        Self { terminator, skip }
    }
}

impl Default for Framing {
    fn default() -> Self {
        Self::CRLF
    }
}

impl From<&StreamSettings> for Framing {
    fn from(settings: &StreamSettings) -> Self {
        Self::new(settings.terminator, settings.skip)
    }
}

/// Default number of bytes requested per read.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Splits a chunked byte stream into records.
#[derive(Debug)]
pub struct Reassembler {
    /// Unterminated tail carried over between chunks
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no terminator
    scanned: usize,
    /// Skip bytes owed by a terminator at the very end of the previous chunk
    pending_skip: usize,
    framing: Framing,
    chunk_size: usize,
}

impl Reassembler {
    /// Create a reassembler with the given framing.
    pub fn new(framing: Framing) -> Self {
        Self::with_chunk_size(framing, DEFAULT_CHUNK_SIZE)
    }

    /// Create a reassembler that reads at most `chunk_size` bytes at a time.
    pub fn with_chunk_size(framing: Framing, chunk_size: usize) -> Self {
        Self {
            buffer: Vec::new(),
            scanned: 0,
            pending_skip: 0,
            framing,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Create a reassembler from stream settings.
    pub fn from_settings(settings: &StreamSettings) -> Self {
        Self::with_chunk_size(Framing::from(settings), settings.chunk_size)
    }


    /// Bytes currently buffered without a terminator.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Perform one read from `source` and dispatch every record it completes.
    ///
    /// Returns the bytes read, or an empty vector once the source reports an
    /// error or EOF. At that point any buffered residue has been dispatched as
    /// a final record. The read error itself is not an error of the stream: a
    /// PTY reports EIO when the child's side closes.
    pub fn read<R, S>(&mut self, source: &mut R, sink: &mut S) -> Result<Vec<u8>>
    where
        R: Read + ?Sized,
        S: RecordSink + ?Sized,
    {
        let mut chunk = vec![0u8; self.chunk_size];
        let n = loop {
            match source.read(&mut chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("Read source closed: {}", e);
                    break 0;
                }
            }
        };

        if n == 0 {
            debug!("End of stream, {} residual bytes", self.buffer.len());
            self.finish(sink)?;
            return Ok(Vec::new());
        }

        chunk.truncate(n);
        trace!("Read {} bytes", n);
        self.feed(&chunk, sink)?;
        Ok(chunk)
    }

    /// Append `chunk` and dispatch every record it completes.
    pub fn feed<S>(&mut self, chunk: &[u8], sink: &mut S) -> Result<()>
    where
        S: RecordSink + ?Sized,
    {
        let mut chunk = chunk;
        if self.pending_skip > 0 {
            let owed = self.pending_skip.min(chunk.len());
            chunk = &chunk[owed..];
            self.pending_skip -= owed;
        }
        self.buffer.extend_from_slice(chunk);

        let terminator = self.framing.terminator;
        let mut start = 0;
        let mut cursor = self.scanned;
        let mut outcome = Ok(());

        while let Some(pos) = self
            .buffer
            .get(cursor..)
            .and_then(|rest| rest.iter().position(|&b| b == terminator))
        {
            let end = cursor + pos;
            let dispatched = sink.record(&self.buffer[start..end]);
            start = end + 1 + self.framing.skip;
            cursor = start;
            if let Err(e) = dispatched {
                outcome = Err(e);
                break;
            }
        }

        if start > self.buffer.len() {
            self.pending_skip = start - self.buffer.len();
            self.buffer.clear();
        } else {
            self.buffer.drain(..start);
        }
        self.scanned = if outcome.is_ok() { self.buffer.len() } else { 0 };

        outcome
    }

    /// Dispatch buffered residue as a final record and reset.
    pub fn finish<S>(&mut self, sink: &mut S) -> Result<()>
    where
        S: RecordSink + ?Sized,
    {
        self.scanned = 0;
        self.pending_skip = 0;
        if self.buffer.is_empty() {
            return Ok(());
        }
        let residue = std::mem::take(&mut self.buffer);
        sink.record(&residue)
    }
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new(Framing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotpty_core::Error;
    use std::collections::VecDeque;
    use std::io;

    /// Yields the given chunks one per read, then fails like a closed PTY.
    struct ChunkedSource {
        chunks: VecDeque<Vec<u8>>,
    }

    impl ChunkedSource {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            }
        }
    }

    impl Read for ChunkedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => Err(io::Error::from_raw_os_error(5)),
            }
        }
    }

    struct FailingSink;

    impl RecordSink for FailingSink {
        fn record(&mut self, _record: &[u8]) -> Result<()> {
            Err(Error::Render {
                path: "TaskGraph.png".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
        }
    }

    fn feed_all(chunks: &[&[u8]]) -> Vec<Vec<u8>> {
        let mut reassembler = Reassembler::default();
        let mut records: Vec<Vec<u8>> = Vec::new();
        for chunk in chunks {
            reassembler.feed(chunk, &mut records).unwrap();
        }
        records
    }

    #[test]
    fn test_splits_crlf_lines() {
        let records = feed_all(&[b"first\r\nsecond\r\nthird"]);
        assert_eq!(records, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn test_tail_is_kept_for_next_chunk() {
        let mut reassembler = Reassembler::default();
        let mut records: Vec<Vec<u8>> = Vec::new();

        reassembler.feed(b"partial rec", &mut records).unwrap();
        assert!(records.is_empty());
        assert_eq!(reassembler.pending(), b"partial rec");

        reassembler.feed(b"ord\r\nnext", &mut records).unwrap();
        assert_eq!(records, vec![b"partial record".to_vec()]);
        assert_eq!(reassembler.pending(), b"next");
    }

    #[test]
    fn test_terminator_at_chunk_end() {
        let records = feed_all(&[b"one\r", b"\ntwo\r\n"]);
        assert_eq!(records, vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_terminator_alone_in_chunk() {
        let records = feed_all(&[b"one", b"\r", b"\n", b"two\r\n"]);
        assert_eq!(records, vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_empty_lines_are_records() {
        let records = feed_all(&[b"\r\n\r\nx\r\n"]);
        assert_eq!(records, vec![Vec::new(), Vec::new(), b"x".to_vec()]);
    }

    #[test]
    fn test_byte_after_terminator_is_dropped() {
        // A lone '\r' costs the next record its first byte.
        let records = feed_all(&[b"a\rbcd\r\n"]);
        assert_eq!(records, vec![b"a".to_vec(), b"cd".to_vec()]);
    }

    #[test]
    fn test_custom_framing() {
        let mut reassembler = Reassembler::new(Framing::new(b'\n', 0));
        let mut records: Vec<Vec<u8>> = Vec::new();

        reassembler.feed(b"a\nb\n\nc", &mut records).unwrap();
        assert_eq!(records, vec![b"a".to_vec(), b"b".to_vec(), Vec::new()]);
        assert_eq!(reassembler.pending(), b"c");
    }

    #[test]
    fn test_framing_from_settings() {
        let settings = StreamSettings {
            terminator: b'\n',
            skip: 0,
            chunk_size: 16,
        };
        let mut reassembler = Reassembler::from_settings(&settings);
        let mut records: Vec<Vec<u8>> = Vec::new();
        reassembler.feed(b"one\ntwo\r\n", &mut records).unwrap();

        assert_eq!(records, vec![b"one".to_vec(), b"two\r".to_vec()]);
        assert_eq!(Framing::default(), Framing::CRLF);
    }

    #[test]
    fn test_read_returns_chunk_and_dispatches() {
        let mut reassembler = Reassembler::default();
        let mut source = ChunkedSource::new(&[b"hello\r\nwor", b"ld\r\n"]);
        let mut records: Vec<Vec<u8>> = Vec::new();

        let chunk = reassembler.read(&mut source, &mut records).unwrap();
        assert_eq!(chunk, b"hello\r\nwor");
        assert_eq!(records, vec![b"hello".to_vec()]);

        let chunk = reassembler.read(&mut source, &mut records).unwrap();
        assert_eq!(chunk, b"ld\r\n");
        assert_eq!(records, vec![b"hello".to_vec(), b"world".to_vec()]);

        let chunk = reassembler.read(&mut source, &mut records).unwrap();
        assert!(chunk.is_empty());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_error_flushes_residue() {
        let mut reassembler = Reassembler::default();
        let mut source = ChunkedSource::new(&[b"line\r\nunterminated"]);
        let mut records: Vec<Vec<u8>> = Vec::new();

        reassembler.read(&mut source, &mut records).unwrap();
        let chunk = reassembler.read(&mut source, &mut records).unwrap();

        assert!(chunk.is_empty());
        assert_eq!(records, vec![b"line".to_vec(), b"unterminated".to_vec()]);
        assert!(reassembler.pending().is_empty());
    }

    #[test]
    fn test_eof_flushes_residue() {
        let mut reassembler = Reassembler::default();
        let mut source = io::Cursor::new(b"digraph{}".to_vec());
        let mut records: Vec<Vec<u8>> = Vec::new();

        while !reassembler.read(&mut source, &mut records).unwrap().is_empty() {}

        assert_eq!(records, vec![b"digraph{}".to_vec()]);
    }

    #[test]
    fn test_small_chunk_size() {
        let mut reassembler = Reassembler::with_chunk_size(Framing::CRLF, 3);
        let mut source = io::Cursor::new(b"ab\r\ncdef\r\ngh".to_vec());
        let mut records: Vec<Vec<u8>> = Vec::new();

        while !reassembler.read(&mut source, &mut records).unwrap().is_empty() {}

        assert_eq!(
            records,
            vec![b"ab".to_vec(), b"cdef".to_vec(), b"gh".to_vec()]
        );
    }

    #[test]
    fn test_finish_on_empty_buffer_dispatches_nothing() {
        let mut reassembler = Reassembler::default();
        let mut records: Vec<Vec<u8>> = Vec::new();

        reassembler.feed(b"done\r\n", &mut records).unwrap();
        reassembler.finish(&mut records).unwrap();

        assert_eq!(records, vec![b"done".to_vec()]);
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut reassembler = Reassembler::default();

        let result = reassembler.feed(b"graph\r\n", &mut FailingSink);
        assert!(matches!(result, Err(Error::Render { .. })));

        let mut source = ChunkedSource::new(&[]);
        reassembler.feed(b"residue", &mut Vec::<Vec<u8>>::new()).unwrap();
        let result = reassembler.read(&mut source, &mut FailingSink);
        assert!(result.is_err());
    }
}
