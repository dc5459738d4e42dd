//! Scanner Benchmarks
//!
//! Measures span scanning and comment stripping throughput.
//! Run with: `cargo bench --package cscan-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cscan_lex::{scan, strip_source, ReassemblyPolicy, ScanRules};

const JAVA_SOURCE: &str = r#"
package com.example;

import java.util.List; // utilities

/**
 * A small class with a bit of everything.
 */
public class Example {
    private static final String URL = "http://example.com/*not*/"; // constant
    private final char sep = '/';

    /* counts things */
    public int count(List<String> items) {
        int n = 0;
        for (String s : items) {
            if (s.contains("\"//\"")) { // escaped quotes
                n++;
            }
        }
        return n / 2; // halve
    }
}
"#;

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let rules = ScanRules::default();

    group.throughput(Throughput::Bytes(JAVA_SOURCE.len() as u64));
    group.bench_function("java_class", |b| {
        b.iter(|| scan(black_box(JAVA_SOURCE), &rules).len())
    });

    let code_only = "int x = a + b * c - d;\n".repeat(200);
    group.throughput(Throughput::Bytes(code_only.len() as u64));
    group.bench_function("code_only", |b| {
        b.iter(|| scan(black_box(&code_only), &rules).len())
    });

    let comment_heavy = "/* a */ x; // b\n".repeat(200);
    group.throughput(Throughput::Bytes(comment_heavy.len() as u64));
    group.bench_function("comment_heavy", |b| {
        b.iter(|| scan(black_box(&comment_heavy), &rules).len())
    });

    group.finish();
}

fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip");
    let rules = ScanRules::default();
    let large = JAVA_SOURCE.repeat(100);

    group.throughput(Throughput::Bytes(large.len() as u64));
    for policy in [ReassemblyPolicy::PreserveLines, ReassemblyPolicy::CollapseLines] {
        group.bench_function(policy.name(), |b| {
            b.iter(|| strip_source(black_box(&large), &rules, policy))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scan, bench_strip);
criterion_main!(benches);
