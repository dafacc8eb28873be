use ansiflow::{WordWrap, WordWrapHeight, WordWrapOptions, Wrap, WrapHeight, WrapOptions};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn styled_corpus() -> String {
    let line = "\x1b[38;2;249;38;114mThe quick brown\x1b[0m fox jumps over the \x1b]8;;https://example.com\x1b\\lazy dog\x1b]8;;\x1b\\ 日本語 well-known text\n";
    line.repeat(256)
}

fn bench_wrap(c: &mut Criterion) {
    let corpus = styled_corpus();

    c.bench_function("wrap_styled", |b| {
        b.iter(|| {
            let mut wrap = Wrap::new(WrapOptions::new(20).break_ansi(true));
            wrap.write_str(black_box(&corpus)).unwrap();
            black_box(wrap.finish().unwrap().len())
        });
    });

    c.bench_function("wrap_height_styled", |b| {
        b.iter(|| {
            let mut height = WrapHeight::new(WrapOptions::new(20));
            height.write_str(black_box(&corpus));
            black_box(height.height())
        });
    });
}

fn bench_word_wrap(c: &mut Criterion) {
    let corpus = styled_corpus();

    c.bench_function("word_wrap_styled", |b| {
        b.iter(|| {
            let mut wrap = WordWrap::new(WordWrapOptions::new(20).break_ansi(true));
            wrap.write_str(black_box(&corpus)).unwrap();
            black_box(wrap.finish().unwrap().len())
        });
    });

    c.bench_function("word_wrap_height_styled", |b| {
        b.iter(|| {
            let mut height = WordWrapHeight::new(WordWrapOptions::new(20));
            height.write_str(black_box(&corpus));
            black_box(height.height())
        });
    });
}

criterion_group!(wrap, bench_wrap, bench_word_wrap);
criterion_main!(wrap);
