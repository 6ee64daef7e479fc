//! Benchmarks for the preview pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsx_live_preview::prelude::*;
use jsx_live_preview::{extract_imports, load, strip_imports, TemplateLibrary};

/// A module-style source with `lines` components and a header of imports.
fn module_source(lines: usize) -> String {
    let mut source = String::from(
        "import React, { useState } from 'react';\nimport { Body, Text } from '@react-email/components';\n\n",
    );
    for i in 0..lines {
        source.push_str(&format!(
            "function Part{i}() {{ return <Text className=\"p-{i}\">part {i}</Text>; }}\n"
        ));
    }
    source.push_str("function Page() { return <Body><Part0 /></Body>; }\nexport default Page;\n");
    source
}

/// Benchmark import extraction and removal.
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for lines in [10, 100, 1000] {
        let source = module_source(lines);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract_imports", lines), &source, |b, s| {
            b.iter(|| black_box(extract_imports(s)))
        });
        group.bench_with_input(BenchmarkId::new("strip_imports", lines), &source, |b, s| {
            b.iter(|| black_box(strip_imports(s)))
        });
    }

    group.finish();
}

/// Benchmark full document assembly for every bundled template.
fn bench_compile_templates(c: &mut Criterion) {
    let config = PreviewConfig::default();
    let mut group = c.benchmark_group("compile");

    for template in TemplateLibrary::global().entries() {
        group.bench_with_input(
            BenchmarkId::new("template", template.key),
            template.source,
            |b, source| b.iter(|| black_box(compile(source, &config))),
        );
    }

    let source = module_source(500);
    group.bench_function("module_500", |b| {
        b.iter(|| black_box(compile(&source, &config)))
    });

    group.finish();
}

/// Benchmark compile plus a full frame replacement.
fn bench_reload(c: &mut Criterion) {
    let config = PreviewConfig::default();
    let source = TemplateLibrary::global().get("loginEmail").unwrap().source;
    let mut frame = MemoryFrame::attached();

    c.bench_function("reload_login_email", |b| {
        b.iter(|| {
            let document = compile(source, &config);
            black_box(load(&mut frame, &document).unwrap())
        })
    });
}

criterion_group!(benches, bench_normalize, bench_compile_templates, bench_reload);

criterion_main!(benches);
