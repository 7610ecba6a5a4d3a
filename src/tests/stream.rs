use crate::{prelude::*, tests::toolkit::test_resource};

use std::{
    fs::File,
    io::{BufRead, BufReader},
};

#[test]
fn reader_stops_at_end_of_header() {
    let registry = Registry::default();
    let fd = File::open(test_resource("A9080-BODY.06O")).unwrap();
    let mut reader = Reader::new(BufReader::new(fd));

    let mut parser = Parser::new(&registry);
    parser.read_header(&mut reader).unwrap();
    assert!(reader.header_read());
    assert_eq!(reader.line_number(), 6);
    assert_eq!(reader.header().marker_name, "A 9080");

    // body is left untouched
    let mut inner = reader.into_inner();
    let mut line = String::new();
    inner.read_line(&mut line).unwrap();
    assert!(line.starts_with("> 2006 03 24 13 10 36.0000000"));
}

#[test]
fn header_is_read_once() {
    let registry = Registry::default();
    let fd = File::open(test_resource("A9080-BODY.06O")).unwrap();
    let mut reader = Reader::new(BufReader::new(fd));

    let mut parser = Parser::new(&registry);
    parser.read_header(&mut reader).unwrap();
    let header = reader.header().clone();

    // second attempt does not consume anything
    parser.read_header(&mut reader).unwrap();
    assert_eq!(reader.line_number(), 6);
    assert_eq!(reader.header(), &header);
    assert_eq!(reader.next_line().unwrap().map(|l| l.starts_with('>')), Some(true));
}

#[test]
fn custom_stream() {
    /// Serves header lines from memory
    struct Lines {
        lines: Vec<String>,
        consumed: usize,
        header: Header,
        header_read: bool,
    }

    impl HeaderStream for Lines {
        fn next_line(&mut self) -> std::io::Result<Option<String>> {
            let line = self.lines.get(self.consumed).cloned();
            if line.is_some() {
                self.consumed += 1;
            }
            Ok(line)
        }
        fn line_number(&self) -> usize {
            self.consumed
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

    let content = std::fs::read_to_string(test_resource("FULL0840.06O")).unwrap();
    let mut stream = Lines {
        lines: content.lines().map(|l| l.to_string()).collect(),
        consumed: 0,
        header: Header::default().with_comment("leftover"),
        header_read: false,
    };

    let registry = Registry::default();
    Parser::new(&registry).read_header(&mut stream).unwrap();
    assert!(stream.header_read());
    assert_eq!(stream.line_number(), 43);
    assert_eq!(stream.header().comments.len(), 2);
    assert_eq!(stream.header().validity, Validity::all());
}
