//! Performance benchmarks for stream decoding
//!
//! Measures line decoding and classification for replies of different sizes
//! and chunk granularities.
//! Run with: cargo bench

use chatline::sse::{classify_line, LineDecoder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate an SSE reply with `fragments` content deltas
fn generate_reply(fragments: usize) -> Vec<u8> {
    let mut body = String::from("event: message\ndata: {\"conversation_id\":\"bench-1\"}\n\n");
    for i in 0..fragments {
        body.push_str(&format!(
            "data: {{\"type\":\"text_delta\",\"text\":\"token {} héllo 世界 \"}}\n\n",
            i
        ));
    }
    body.push_str("data: {\"message_count\":2}\n\n");
    body.into_bytes()
}

fn decode(body: &[u8], chunk_size: usize) -> usize {
    let mut decoder = LineDecoder::new();
    let mut records = 0;
    for chunk in body.chunks(chunk_size) {
        for line in decoder.feed(chunk) {
            if classify_line(&line).is_some() {
                records += 1;
            }
        }
    }
    if let Some(line) = decoder.finish() {
        if classify_line(&line).is_some() {
            records += 1;
        }
    }
    records
}

/// Benchmark decoding by reply size with network-sized chunks
fn bench_decode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_size");

    for fragments in [10, 100, 1000].iter() {
        let body = generate_reply(*fragments);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fragments), &body, |b, body| {
            b.iter(|| decode(black_box(body), 1024))
        });
    }

    group.finish();
}

/// Benchmark decoding by chunk size, down to one byte per chunk
fn bench_decode_by_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_chunk_size");
    let body = generate_reply(200);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [1, 7, 64, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &chunk_size| b.iter(|| decode(black_box(&body), chunk_size)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode_by_size, bench_decode_by_chunk_size);
criterion_main!(benches);
