//! Benchmarks for the per-exchange CPU work
//!
//! This benchmark measures:
//! - Prompt construction
//! - Request body serialization with the full catalog
//! - Interpretation of typical completion results

use calendar_chat::client::wire::GenerateRequest;
use calendar_chat::client::{CompletionResult, Part};
use calendar_chat::{interpret, prompt, FunctionCatalog};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn bench_prompt(c: &mut Criterion) {
    let now = NaiveDate::from_ymd_opt(2025, 8, 3)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid date");
    let mut group = c.benchmark_group("prompt");
    for len in [16usize, 256, 4096] {
        let message = "일".repeat(len);
        group.bench_with_input(BenchmarkId::new("build", len), &message, |b, m| {
            b.iter(|| prompt::build(black_box(m), 42, now))
        });
    }
    group.finish();

    c.bench_function("request_body_serialize", |b| {
        let catalog = FunctionCatalog::calendar();
        b.iter(|| {
            let body = GenerateRequest::new(black_box("내일 오전 10시에 팀 미팅"), catalog.to_tools());
            serde_json::to_vec(&body).expect("serializable")
        })
    });
}

fn bench_interpret(c: &mut Criterion) {
    let invocation = CompletionResult::from_parts(vec![
        Part::text("일정을 만들게요"),
        Part::function_call(
            "create_calendar_event",
            json!({"title": "팀 미팅", "start_time": "2025-08-04T10:00:00", "duration": 60, "category": "WORK"}),
        ),
    ]);
    let text = CompletionResult::from_parts(vec![Part::text("안녕하세요!"), Part::text("무엇을 도와드릴까요?")]);
    let raw = serde_json::to_string(&invocation).expect("serializable");

    let mut group = c.benchmark_group("interpret");
    group.bench_function("invocation", |b| b.iter(|| interpret(black_box(&invocation))));
    group.bench_function("plain_text", |b| b.iter(|| interpret(black_box(&text))));
    group.bench_function("decode_and_interpret", |b| {
        b.iter(|| {
            let parsed: CompletionResult = serde_json::from_str(black_box(&raw)).expect("decodable");
            interpret(&parsed)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_prompt, bench_interpret);
criterion_main!(benches);
