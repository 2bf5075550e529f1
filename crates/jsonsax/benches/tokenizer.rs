//! Benchmark – `jsonsax::JsonTokenizer`
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonsax::{JsonListener, JsonTokenizer, NumberMode, ParseStatus, ParserOptions};

/// Produce a deterministic document of records mixing every kind of token.
fn make_json_payload(records: usize) -> String {
    let mut s = String::from("{\"records\":[");
    for i in 0..records {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            "{{\"id\":{i},\"name\":\"record \\u00e9 {i}\",\"score\":{}.25,\"tags\":[\"a\",\"b\"],\"ok\":{},\"parent\":null}}",
            i % 100,
            i % 2 == 0
        )
        .unwrap();
    }
    s.push_str("]}");
    s
}

/// Counts events without storing them, so the benchmark measures the
/// tokenizer rather than allocation in the listener.
#[derive(Default)]
struct Counter(usize);

impl JsonListener for Counter {
    fn start_block(&mut self, _name: &str) {
        self.0 += 1;
    }
    fn end_block(&mut self, _name: &str) {
        self.0 += 1;
    }
    fn start_array(&mut self, _name: &str) {
        self.0 += 1;
    }
    fn end_array(&mut self, _name: &str) {
        self.0 += 1;
    }
    fn string_token(&mut self, value: &str) {
        self.0 += value.len();
    }
    fn numeric_token(&mut self, _value: f64) {
        self.0 += 1;
    }
    fn long_token(&mut self, _value: i64) {
        self.0 += 1;
    }
    fn boolean_token(&mut self, _value: bool) {
        self.0 += 1;
    }
    fn key_value(&mut self, _key: &str, _value: &str) {
        self.0 += 1;
    }
}

/// Feed `payload` in `parts` chunks and return the listener's count.
fn run_tokenizer(payload: &str, parts: usize, number_mode: NumberMode) -> usize {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);

    let mut counter = Counter::default();
    let mut tokenizer = JsonTokenizer::new(
        &mut counter,
        ParserOptions {
            number_mode,
            ..Default::default()
        },
    );
    // The payload is ASCII apart from escapes, so byte chunks are valid UTF-8.
    for chunk in payload.as_bytes().chunks(chunk_size) {
        tokenizer
            .feed(std::str::from_utf8(chunk).expect("chunk is valid UTF-8"))
            .unwrap();
    }
    assert_eq!(tokenizer.finish(), Ok(ParseStatus::Complete));
    counter.0
}

fn bench_tokenizer_split(c: &mut Criterion) {
    let payload = make_json_payload(500);

    let mut group = c.benchmark_group("tokenizer_split");
    for &parts in &[1usize, 100, 1_000] {
        for &mode in &[NumberMode::Longs, NumberMode::Doubles] {
            let name = format!("{mode:?}").to_lowercase();
            group.bench_with_input(BenchmarkId::new(parts.to_string(), name), &mode, |b, &m| {
                b.iter(|| {
                    let count = run_tokenizer(black_box(&payload), parts, m);
                    black_box(count);
                });
            });
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_tokenizer_split }
criterion_main!(benches);
