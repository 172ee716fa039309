use std::hint::black_box;
use std::io::Write;

use ai_conversation_analyzer::parsers::conversation::parse_conversation_file;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tempfile::NamedTempFile;

/// Generate a synthetic linear conversation log with N messages
fn generate_conversation_file(num_messages: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, r#"{{"type":"summary","summary":"Bench","leafUuid":"m{}"}}"#, num_messages - 1)
        .unwrap();
    for i in 0..num_messages {
        let parent = if i == 0 { "null".to_string() } else { format!(r#""m{}""#, i - 1) };
        let line = if i % 2 == 0 {
            format!(
                r#"{{"type":"user","uuid":"m{}","parentUuid":{},"timestamp":"2024-01-{:02}T12:00:00Z","message":{{"role":"user","content":"Test prompt {}"}}}}"#,
                i,
                parent,
                (i % 28) + 1,
                i
            )
        } else {
            format!(
                r#"{{"type":"assistant","uuid":"m{}","parentUuid":{},"timestamp":"2024-01-{:02}T12:00:01Z","message":{{"model":"claude-sonnet-4","content":[{{"type":"text","text":"Answer {}"}},{{"type":"tool_use","id":"t{}","name":"Read","input":{{"path":"/tmp/x"}}}}],"usage":{{"input_tokens":100,"output_tokens":50}}}},"costUSD":0.001,"durationMs":250}}"#,
                i,
                parent,
                (i % 28) + 1,
                i,
                i
            )
        };
        writeln!(file, "{}", line).unwrap();
    }

    file.flush().unwrap();
    file
}

fn bench_parse_conversation(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_conversation_file");

    for size in [100, 1_000, 10_000, 50_000].iter() {
        let file = generate_conversation_file(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_conversation_file(black_box(file.path())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_conversation);
criterion_main!(benches);
