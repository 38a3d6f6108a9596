use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

use swarm_client::services::pipeline::parse_response;
use swarm_client::transport::HttpResponse;
use swarm_client::{ApiResponse, SearchPartResponse};

fn search_body(parts: usize) -> String {
    let parts: Vec<serde_json::Value> = (0..parts)
        .map(|i| {
            serde_json::json!({
                "basePartNumber": format!("LM358-{}", i),
                "manufacturer": "Texas Instruments",
                "supplier": "DigiKey",
                "cost": 0.42,
                "quantityAvailable": i,
                "keywords": ["op amp", "dual"],
                "datasheetUrls": ["https://www.ti.com/lit/ds/lm358.pdf"]
            })
        })
        .collect();
    serde_json::json!({ "response": { "parts": parts }, "errors": [] }).to_string()
}

fn response(status: u16, headers: &[(&str, &str)], body: String) -> HttpResponse {
    HttpResponse {
        status,
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
        body: Bytes::from(body),
    }
}

fn benchmark_parse_success(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_success");

    for parts in [1_usize, 25, 250] {
        let resp = response(200, &[], search_body(parts));
        group.bench_with_input(BenchmarkId::from_parameter(parts), &resp, |b, resp| {
            b.iter(|| {
                let parsed: ApiResponse<SearchPartResponse> = parse_response(black_box(resp));
                black_box(parsed)
            });
        });
    }

    group.finish();
}

fn benchmark_parse_throttled(c: &mut Criterion) {
    let resp = response(
        429,
        &[("retry-after", "12")],
        r#"{"message":"Too many requests","details":"limit 10/min"}"#.to_string(),
    );

    c.bench_function("parse_throttled", |b| {
        b.iter(|| {
            let parsed: ApiResponse<SearchPartResponse> = parse_response(black_box(&resp));
            black_box(parsed)
        });
    });
}

criterion_group!(benches, benchmark_parse_success, benchmark_parse_throttled);
criterion_main!(benches);
