//! # Example
//! ```no_run
//!use petgraph::visit::EdgeRef;
//!use rand::SeedableRng;
//!use rand::rngs::StdRng;
//!use subgrapher::graph::from_edge_list;
//!
//!let mut rng = StdRng::seed_from_u64(7);
//!let generated: petgraph::Graph<(), (), petgraph::Undirected> =
//!    petgraph_gen::barabasi_albert_graph(&mut rng, 5000, 30, None);
//!let graph = from_edge_list(generated.edge_references().map(|link| {
//!    (link.source().index() as u32, link.target().index() as u32)
//!}));
//!
//!let overview = subgrapher::visualize(&graph, 80, &mut rng).unwrap();
//!std::fs::write("pagenet.svg", &overview.svg).unwrap();
//! ```

use rand::Rng;

pub mod classify;
pub mod error;
pub mod graph;
pub mod layout;
pub mod renderer;
pub mod sampler;

pub use classify::{summarize, Classification, Classifier, Summary};
pub use error::Error;
pub use graph::{from_edge_list, PageGraph, PageId};
pub use layout::{Layout, LayoutBuilder};
pub use renderer::{render_svg, render_to_file, Style};
pub use sampler::{Sampler, SamplerBuilder};

/// Everything one pass over a graph produces.
pub struct Overview {
    /// The sampled induced subgraph.
    pub sample: PageGraph,
    /// Which pages are popular and which are regular.
    pub classification: Classification,
    /// The statistics that were printed to the console.
    pub summary: Summary,
    /// The finished SVG document.
    pub svg: String,
}

/// Samples a neighborhood of `graph`, prints its summary statistics to the
/// console and renders it with default settings.
///
/// The seed page is drawn with `rng`. Layout and rendering are seeded
/// internally, so the drawing only varies with the sampled pages.
///
/// Fails when the graph is empty or when no page falls into the default
/// seed degree band.
pub fn visualize<R: Rng + ?Sized>(
    graph: &PageGraph,
    sample_size: usize,
    rng: &mut R,
) -> Result<Overview, Error> {
    let sample = Sampler::builder()
        .sample_size(sample_size)
        .build()
        .sample(graph, rng)?;
    let classification = Classifier::default().classify(&sample)?;
    let summary = summarize(&sample, &classification);
    let positions = Layout::builder().build().run(&sample);
    let svg = render_svg(&sample, &positions, &classification, &Style::default());
    println!("{summary}");

    Ok(Overview {
        sample,
        classification,
        summary,
        svg,
    })
}
