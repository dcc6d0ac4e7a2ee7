use criterion::{black_box, criterion_group, criterion_main, Criterion};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::SeedableRng;
use subgrapher::graph::from_edge_list;
use subgrapher::{Layout, PageGraph, Sampler};

fn scale_free_graph(pages: usize) -> PageGraph {
    let mut rng = StdRng::seed_from_u64(42);
    let generated: petgraph::Graph<(), (), petgraph::Undirected> =
        petgraph_gen::barabasi_albert_graph(&mut rng, pages, 30, None);
    from_edge_list(generated.edge_references().map(|link| {
        (link.source().index() as u32, link.target().index() as u32)
    }))
}

fn bench_sampling(c: &mut Criterion) {
    let graph = scale_free_graph(10_000);
    let sampler = Sampler::builder().sample_size(80).build();

    c.bench_function("sample_80_of_10k_pages", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| sampler.sample(black_box(&graph), &mut rng).unwrap())
    });
}

fn bench_layout(c: &mut Criterion) {
    let graph = scale_free_graph(10_000);
    let mut rng = StdRng::seed_from_u64(7);
    let sample = Sampler::builder()
        .sample_size(80)
        .build()
        .sample(&graph, &mut rng)
        .unwrap();
    let layout = Layout::builder().build();

    c.bench_function("layout_80_pages", |b| {
        b.iter(|| layout.run(black_box(&sample)))
    });
}

criterion_group!(benches, bench_sampling, bench_layout);
criterion_main!(benches);
