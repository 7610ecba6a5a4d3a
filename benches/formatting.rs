//! Benchmarking header formatting
//! using a tiny and a complete header
extern crate criterion;
use criterion::{criterion_group, criterion_main, Criterion};

use std::io::{BufWriter, Write};

use rinex_obs_header::prelude::{Header, Registry};

#[derive(Debug)]
pub struct Utf8Buffer {
    pub inner: Vec<u8>,
}

impl Write for Utf8Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        for b in buf {
            self.inner.push(*b);
        }
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.clear();
        Ok(())
    }
}

impl Utf8Buffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }
}

fn header_formatting<W: Write>(header: &Header, registry: &Registry, w: &mut BufWriter<W>) {
    header.format(registry, w).unwrap();
    w.flush().unwrap();
}

fn benchmark(c: &mut Criterion) {
    let mut formatting_grp = c.benchmark_group("formatting");
    let registry = Registry::default();

    let mut buffer = BufWriter::new(Utf8Buffer::new(4096));

    // Minimal header
    let header = Header::from_file("test_resources/OBS/V3/A9080.06O", &registry).unwrap();

    formatting_grp.bench_function("OBS/V3/minimal", |b| {
        b.iter(|| {
            header_formatting(&header, &registry, &mut buffer);
        })
    });

    // Header with every section
    let header = Header::from_file("test_resources/OBS/V3/FULL0840.06O", &registry).unwrap();

    formatting_grp.bench_function("OBS/V3/full", |b| {
        b.iter(|| {
            header_formatting(&header, &registry, &mut buffer);
        })
    });

    formatting_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
