//! Parser benchmarks.
//!
//! Run with: `cargo bench --package crossc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crossc_lex::{tokenize_cs, tokenize_js};
use crossc_par::{parse_cs, parse_js};
use crossc_util::{Handler, Metrics};

const JS_SOURCE: &str = r#"
function fib(n) {
    if (n <= 1) { return n; }
    return fib(n - 1) + fib(n - 2);
}
for (let i = 0; i < 20; i++) {
    console.log(fib(i));
}
"#;

const CS_SOURCE: &str = r#"
using System;

public class Counter
{
    public int Total { get; set; }

    public Counter(int seed) { this.Total = seed; }

    public void Run()
    {
        for (var i = 0; i < 20; i++) { this.Total += i; }
        Console.WriteLine(this.Total);
    }
}
"#;

fn bench_parse_js(c: &mut Criterion) {
    c.bench_function("parse_js", |b| {
        b.iter(|| {
            let handler = Handler::new();
            let mut metrics = Metrics::new();
            parse_js(tokenize_js(black_box(JS_SOURCE)), &handler, &mut metrics)
        })
    });
}

fn bench_parse_cs(c: &mut Criterion) {
    c.bench_function("parse_cs", |b| {
        b.iter(|| {
            let handler = Handler::new();
            let mut metrics = Metrics::new();
            parse_cs(tokenize_cs(black_box(CS_SOURCE)), &handler, &mut metrics)
        })
    });
}

criterion_group!(benches, bench_parse_js, bench_parse_cs);
criterion_main!(benches);
