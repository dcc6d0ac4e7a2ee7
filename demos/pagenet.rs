use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::BufReader;
use subgrapher::graph::{from_edge_list, PageGraph};

/// Edge list of a page network, as `{"edges": [[a, b], ...]}`.
#[derive(Deserialize)]
struct PageLinks {
    edges: Vec<(u32, u32)>,
}

fn load_graph(path: &str) -> PageGraph {
    let reader = BufReader::new(File::open(path).expect("could not open the edge list"));
    let links: PageLinks = serde_json::from_reader(reader).expect("could not parse the edge list");
    from_edge_list(links.edges)
}

fn generate_graph(rng: &mut StdRng) -> PageGraph {
    let generated: petgraph::Graph<(), (), petgraph::Undirected> =
        petgraph_gen::barabasi_albert_graph(rng, 5000, 30, None);
    from_edge_list(generated.edge_references().map(|link| {
        (link.source().index() as u32, link.target().index() as u32)
    }))
}

fn main() {
    env_logger::init();

    let mut rng = StdRng::from_entropy();
    let graph = match env::args().nth(1) {
        Some(path) => load_graph(&path),
        None => generate_graph(&mut rng),
    };

    let overview = match subgrapher::visualize(&graph, 80, &mut rng) {
        Ok(overview) => overview,
        Err(error) => {
            eprintln!("sampling failed: {error}");
            std::process::exit(1);
        }
    };

    std::fs::write("pagenet.svg", &overview.svg).expect("could not write pagenet.svg");
    println!("\nWrote pagenet.svg ({} pages drawn)", overview.sample.node_count());
}
