//! Line stream holding a header
use crate::header::Header;
use std::io::BufRead;

/// [HeaderStream] is what the [crate::header::Parser] needs from a stream:
/// it supplies lines, counts them and holds the [Header] being read.
pub trait HeaderStream {
    /// Returns next line, stripped of its terminator, None once exhausted
    fn next_line(&mut self) -> std::io::Result<Option<String>>;
    /// Number of lines consumed so far
    fn line_number(&self) -> usize;
    /// [Header] of this stream
    fn header(&self) -> &Header;
    /// Mutable access to [Header] of this stream
    fn header_mut(&mut self) -> &mut Header;
    /// True once [Header] was entirely read
    fn header_read(&self) -> bool;
    /// Marks [Header] as entirely read
    fn set_header_read(&mut self);
}

/// [HeaderStream] over any [BufRead]able interface
#[derive(Debug)]
pub struct Reader<R: BufRead> {
    inner: R,
    line_number: usize,
    header: Header,
    header_read: bool,
}

impl<R: BufRead> Reader<R> {
    /// Builds a new [Reader]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
            header: Header::default(),
            header_read: false,
        }
    }

    /// Returns [Header] that was read
    pub fn into_header(self) -> Header {
        self.header
    }

    /// Returns the underlying interface, positioned
    /// right after the last line that was consumed
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> HeaderStream for Reader<R> {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::with_capacity(81);
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    fn header_read(&self) -> bool {
        self.header_read
    }

    fn set_header_read(&mut self) {
        self.header_read = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_stream() {
        let content = "first line\r\nsecond line\n\nlast";
        let mut reader = Reader::new(content.as_bytes());
        assert_eq!(reader.line_number(), 0);
        assert_eq!(reader.next_line().unwrap(), Some("first line".to_string()));
        assert_eq!(reader.next_line().unwrap(), Some("second line".to_string()));
        assert_eq!(reader.next_line().unwrap(), Some("".to_string()));
        assert_eq!(reader.next_line().unwrap(), Some("last".to_string()));
        assert_eq!(reader.line_number(), 4);
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 4);
    }

    #[test]
    fn header_state() {
        let mut reader = Reader::new("".as_bytes());
        assert!(!reader.header_read());
        reader.header_mut().marker_name = "A 9080".to_string();
        reader.set_header_read();
        assert!(reader.header_read());
        assert_eq!(reader.header().marker_name, "A 9080");
        assert_eq!(reader.into_header().marker_name, "A 9080");
    }
}
