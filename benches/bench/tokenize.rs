// std imports
use std::{hint::black_box, time::Duration};

// third-party imports
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group};

// workspace imports
use chartok::{MultiConditionParser, Settings, TextCursor, Token};

// local imports
use super::{GROUP, ND, samples};

criterion_group!(benches, bench);

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("{GROUP}{ND}tokenize"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));

    let settings = Settings::embedded().unwrap();

    for repeat in [1, 16, 256] {
        let text = samples::source(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("tokens", repeat), &text, |b, text| {
            let mut tokenizer = settings.tokenizer().unwrap();
            b.iter(|| black_box(tokenizer.tokenize(text).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("tree", repeat), &text, |b, text| {
            let mut tokenizer = settings.tokenizer().unwrap();
            b.iter(|| black_box(tokenizer.tokenize_tree(text).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("driver", repeat), &text, |b, text| {
            b.iter_batched_ref(
                || MultiConditionParser::new(settings.build_factories().unwrap()),
                |parser| {
                    let mut count = 0;
                    let mut consumer = |_: usize, _: Token| count += 1;
                    let mut cursor = TextCursor::new(text);
                    while let Some(ch) = cursor.next_char() {
                        parser.parse(ch, &mut cursor, &mut consumer).unwrap();
                    }
                    parser.finish();
                    count
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}
