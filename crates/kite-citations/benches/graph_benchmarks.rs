//! Performance benchmarks for the citation graph's PageRank-style
//! influence computation (§4.6).
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kite_citations::CitationGraph;
use kite_core::{Case, Citation, CitationFormat, CitationParts};

/// A linear citation chain: case `i` cites case `i - 1`, so PageRank has
/// to propagate influence across the whole chain each iteration.
fn chain_of(size: usize) -> (Vec<Case>, Vec<Citation>) {
    let cases: Vec<Case> = (0..size)
        .map(|i| Case::new(format!("Case {i}"), "Court", "UK"))
        .collect();

    let citations = cases
        .windows(2)
        .map(|pair| {
            let mut citation = Citation::new(
                format!("citing {}", pair[0].case_name),
                CitationFormat::Other,
                CitationParts::default(),
                pair[1].id,
                0.9,
            );
            citation.cited_case_id = Some(pair[0].id);
            citation
        })
        .collect();

    (cases, citations)
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("citation_graph_build");

    for size in [10, 100, 1000] {
        let (cases, citations) = chain_of(size);
        group.bench_with_input(BenchmarkId::new("build", size), &size, |b, _| {
            b.iter(|| black_box(CitationGraph::build(&cases, &citations)))
        });
    }

    group.finish();
}

fn bench_citation_chain(c: &mut Criterion) {
    let (cases, citations) = chain_of(500);
    let graph = CitationGraph::build(&cases, &citations);
    let from = cases.last().unwrap().id;
    let to = cases.first().unwrap().id;

    c.bench_function("citation_chain_500_node_traversal", |b| {
        b.iter(|| black_box(graph.citation_chain(from, to)))
    });
}

criterion_group!(benches, bench_graph_build, bench_citation_chain);
criterion_main!(benches);
