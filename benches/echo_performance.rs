use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use echo_lambda::event::ProxyRequest;
use echo_lambda::handler::EchoHandler;
use echo_lambda::local::protocol::{encode_response, parse_request};

fn request_with(headers: usize, body_size: usize) -> ProxyRequest {
    let mut request = ProxyRequest::new("POST", "/api/test").with_query_param("name", "World");
    for i in 0..headers {
        request = request.with_header(format!("X-Header-{i}"), format!("value-{i}"));
    }
    request.with_body("x".repeat(body_size))
}

fn bench_handle(c: &mut Criterion) {
    let handler = EchoHandler::new();
    let mut group = c.benchmark_group("handle");

    // Test different body sizes
    for size in [0, 256, 4096, 65536] {
        let request = request_with(8, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("body", size), &request, |b, request| {
            b.iter(|| handler.handle(black_box(request)))
        });
    }

    // Test different header counts
    for count in [0, 16, 64] {
        let request = request_with(count, 64);
        group.bench_with_input(BenchmarkId::new("headers", count), &request, |b, request| {
            b.iter(|| handler.handle(black_box(request)))
        });
    }

    group.finish();
}

fn bench_gateway_event(c: &mut Criterion) {
    let handler = EchoHandler::new();
    let event = serde_json::to_string(&request_with(12, 512)).unwrap();

    c.bench_function("decode_handle_encode", |b| {
        b.iter(|| {
            let request: ProxyRequest = serde_json::from_str(black_box(&event)).unwrap();
            serde_json::to_string(&handler.handle(&request)).unwrap()
        })
    });
}

fn bench_local_protocol(c: &mut Criterion) {
    let raw = b"POST /api/test?name=World HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 15\r\n\r\n{\"test\":\"data\"}";
    let handler = EchoHandler::new();

    c.bench_function("local_roundtrip", |b| {
        b.iter(|| {
            let request = parse_request(black_box(raw), 1024 * 1024).unwrap().unwrap();
            encode_response(&handler.handle(&request))
        })
    });
}

criterion_group!(benches, bench_handle, bench_gateway_event, bench_local_protocol);
criterion_main!(benches);
