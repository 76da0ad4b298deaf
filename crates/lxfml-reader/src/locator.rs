//! Line/column tracking for the byte stream under the XML reader.

use std::fmt;
use std::io::{self, BufRead, Read};

/// Position of a node in the source document.
///
/// Columns count bytes from the start of the line, so a line holding
/// non-ASCII text before the node reports a larger column than a
/// character count would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    /// 1-based line and byte column.
    At { line: u64, column: u64 },
    /// The position could not be determined.
    Unknown,
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At { line, column } => write!(f, "{},{}", line, column),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// A `BufRead` adaptor that counts lines as bytes are consumed through it,
/// so byte offsets reported by the XML reader can be turned into
/// line/column pairs after the bytes themselves are gone.
///
/// Lookups must move forward through the input. Newlines behind the last
/// lookup are folded into a running line count, so only the newlines seen
/// since then are kept.
#[derive(Debug)]
pub(crate) struct LineTracker<R> {
    inner: R,
    consumed: u64,
    /// Newlines folded into the count, i.e. the 0-based index of the line
    /// starting at `line_start`.
    line_base: u64,
    line_start: u64,
    /// Offsets of newlines at or after `line_start`.
    newlines: Vec<u64>,
}

impl<R> LineTracker<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            consumed: 0,
            line_base: 0,
            line_start: 0,
            newlines: Vec::new(),
        }
    }

    /// Convert a byte offset into a [`Locator`].
    ///
    /// Offsets past the consumed input, or on a line before the last
    /// lookup, are unknown.
    pub(crate) fn locate(&mut self, offset: u64) -> Locator {
        if offset > self.consumed || offset < self.line_start {
            return Locator::Unknown;
        }

        let passed = self.newlines.partition_point(|&nl| nl < offset);
        if passed > 0 {
            self.line_base += passed as u64;
            self.line_start = self.newlines[passed - 1] + 1;
            self.newlines.drain(..passed);
        }

        Locator::At {
            line: self.line_base + 1,
            column: offset - self.line_start + 1,
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_newlines(&self) -> usize {
        self.newlines.len()
    }

    fn record(&mut self, bytes: &[u8]) {
        for i in memchr::memchr_iter(b'\n', bytes) {
            self.newlines.push(self.consumed + i as u64);
        }
        self.consumed += bytes.len() as u64;
    }
}

impl<R: Read> Read for LineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.record(&buf[..n]);
        Ok(n)
    }
}

impl<R: BufRead> BufRead for LineTracker<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if amt > 0 {
            // Already buffered, so this does no I/O.
            if let Ok(buffered) = self.inner.fill_buf() {
                let end = amt.min(buffered.len());
                for i in memchr::memchr_iter(b'\n', &buffered[..end]) {
                    self.newlines.push(self.consumed + i as u64);
                }
            }
        }
        self.consumed += amt as u64;
        self.inner.consume(amt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<R: BufRead>(tracker: &mut LineTracker<R>) {
        loop {
            let len = tracker.fill_buf().unwrap().len();
            if len == 0 {
                break;
            }
            tracker.consume(len);
        }
    }

    #[test]
    fn test_locate_single_line() {
        let mut tracker = LineTracker::new("<LXFML/>".as_bytes());
        drain(&mut tracker);
        assert_eq!(tracker.locate(0), Locator::At { line: 1, column: 1 });
        assert_eq!(tracker.locate(1), Locator::At { line: 1, column: 2 });
    }

    #[test]
    fn test_locate_multiline() {
        let text = "<a>\n  <b/>\n<c/>";
        let mut tracker = LineTracker::new(text.as_bytes());
        drain(&mut tracker);

        // The newline itself belongs to the line it ends.
        assert_eq!(tracker.locate(3), Locator::At { line: 1, column: 4 });

        let b = text.find("<b").unwrap() as u64;
        assert_eq!(tracker.locate(b), Locator::At { line: 2, column: 3 });

        let c = text.find("<c").unwrap() as u64;
        assert_eq!(tracker.locate(c), Locator::At { line: 3, column: 1 });
    }

    #[test]
    fn test_locate_same_line_after_later_offset() {
        let text = "<a>\n<b/><c/>";
        let mut tracker = LineTracker::new(text.as_bytes());
        drain(&mut tracker);

        let c = text.find("<c").unwrap() as u64;
        assert_eq!(tracker.locate(c), Locator::At { line: 2, column: 5 });
        let b = text.find("<b").unwrap() as u64;
        assert_eq!(tracker.locate(b), Locator::At { line: 2, column: 1 });

        // Earlier lines are gone.
        assert_eq!(tracker.locate(0), Locator::Unknown);
    }

    #[test]
    fn test_locate_through_small_buffer() {
        let text = "line one\nline two\nline three\n";
        let mut tracker = LineTracker::new(io::BufReader::with_capacity(4, text.as_bytes()));
        drain(&mut tracker);

        let offset = text.find("three").unwrap() as u64;
        assert_eq!(tracker.locate(offset), Locator::At { line: 3, column: 6 });
    }

    #[test]
    fn test_locate_folds_passed_newlines() {
        let text = "<x/>\n".repeat(10_000);
        let mut tracker = LineTracker::new(text.as_bytes());
        drain(&mut tracker);
        assert_eq!(tracker.tracked_newlines(), 10_000);

        let last = text.rfind("<x").unwrap() as u64;
        assert_eq!(tracker.locate(last), Locator::At { line: 10_000, column: 1 });
        assert_eq!(tracker.tracked_newlines(), 1);
    }

    #[test]
    fn test_column_counts_bytes() {
        let text = "<a name=\"caf\u{e9}\"/><b/>";
        let mut tracker = LineTracker::new(text.as_bytes());
        drain(&mut tracker);

        // "é" is two bytes in UTF-8.
        let b = text.find("<b").unwrap() as u64;
        assert_eq!(tracker.locate(b), Locator::At { line: 1, column: 18 });
    }

    #[test]
    fn test_locate_beyond_consumed() {
        let mut tracker = LineTracker::new("abc".as_bytes());
        assert_eq!(tracker.locate(2), Locator::Unknown);
    }

    #[test]
    fn test_read_records_newlines() {
        let mut tracker = LineTracker::new("a\nb".as_bytes());
        let mut out = String::new();
        tracker.read_to_string(&mut out).unwrap();
        assert_eq!(tracker.locate(2), Locator::At { line: 2, column: 1 });
    }

    #[test]
    fn test_display() {
        assert_eq!(Locator::At { line: 4, column: 12 }.to_string(), "4,12");
        assert_eq!(Locator::Unknown.to_string(), "unknown");
    }
}
