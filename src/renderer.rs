//! Static SVG rendering of a laid out sample.

use crate::classify::Classification;
use crate::error::Error;
use crate::graph::{degree, PageGraph, PageId};
use glam::Vec2;
use log::info;
use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

/// Canvas dimensions and colors for a rendering.
#[derive(Debug, Clone)]
pub struct Style {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Fill color of popular pages.
    pub popular_color: String,
    /// Fill color of regular pages.
    pub regular_color: String,
    /// Stroke color of the links.
    pub link_color: String,
    /// Canvas background color.
    pub background_color: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            popular_color: "red".to_owned(),
            regular_color: "lightblue".to_owned(),
            link_color: "lightgray".to_owned(),
            background_color: "white".to_owned(),
        }
    }
}

/// Draws the sampled pages as an SVG document.
///
/// Links are drawn under the pages. Popular pages are filled with
/// `style.popular_color` and drawn larger than regular ones, and every page
/// grows with its link count. A title and a legend annotate the drawing.
///
/// Panics when `positions` is missing a page of `graph`.
pub fn render_svg(
    graph: &PageGraph,
    positions: &HashMap<PageId, Vec2>,
    classes: &Classification,
    style: &Style,
) -> String {
    let plot_left = 50.0;
    let plot_top = 110.0;
    let plot_width = style.width as f32 - 2.0 * plot_left;
    let plot_height = style.height as f32 - plot_top - 50.0;

    let mut low = Vec2::splat(f32::INFINITY);
    let mut high = Vec2::splat(f32::NEG_INFINITY);
    for position in positions.values() {
        low = low.min(*position);
        high = high.max(*position);
    }
    if positions.is_empty() {
        low = Vec2::ZERO;
        high = Vec2::ZERO;
    }
    // A lone page or a perfectly collinear layout spans zero width; the
    // padded box keeps its midpoint.
    let span = (high - low).max(Vec2::splat(1.0));
    let mid = (low + high) / 2.0;
    let low = mid - span / 2.0;
    let high = mid + span / 2.0;
    let scale = (plot_width / span.x).min(plot_height / span.y);
    let offset = Vec2::new(
        plot_left + (plot_width - span.x * scale) / 2.0,
        plot_top + (plot_height - span.y * scale) / 2.0,
    );
    let place = |position: Vec2| {
        Vec2::new(
            offset.x + (position.x - low.x) * scale,
            offset.y + (high.y - position.y) * scale,
        )
    };

    let center = style.width as f32 / 2.0;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = style.width,
        h = style.height,
    ));
    svg.push_str(&format!(
        "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        style.background_color,
    ));
    svg.push_str(&format!(
        "  <text x=\"{center}\" y=\"30\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"20\">Page Network Sample</text>\n",
    ));
    svg.push_str(&format!(
        "  <text x=\"{center}\" y=\"54\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"13\">Red = popular pages (many links), Blue = regular pages (fewer links)</text>\n",
    ));
    svg.push_str(&format!(
        "  <text x=\"{center}\" y=\"74\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"13\">{} pages, {} links</text>\n",
        graph.node_count(),
        graph.edge_count(),
    ));

    for (a, b, _) in graph.all_edges() {
        let from = place(positions[&a]);
        let to = place(positions[&b]);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"0.8\" stroke-opacity=\"0.6\"/>\n",
            from.x, from.y, to.x, to.y, style.link_color,
        ));
    }

    let popular: HashSet<PageId> = classes.popular.iter().copied().collect();
    for page in graph.nodes() {
        let links = degree(graph, page);
        let spot = place(positions[&page]);
        let (fill, radius) = if popular.contains(&page) {
            (style.popular_color.as_str(), popular_radius(links))
        } else {
            (style.regular_color.as_str(), regular_radius(links))
        };
        svg.push_str(&format!(
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" fill=\"{}\" fill-opacity=\"0.8\" stroke=\"black\" stroke-width=\"0.5\"/>\n",
            spot.x, spot.y, radius, fill,
        ));
    }

    let legend_x = style.width as f32 - 190.0;
    svg.push_str(&format!(
        "  <rect x=\"{legend_x}\" y=\"92\" width=\"170\" height=\"58\" fill=\"white\" fill-opacity=\"0.85\" stroke=\"lightgray\"/>\n",
    ));
    svg.push_str(&format!(
        "  <circle cx=\"{:.1}\" cy=\"112\" r=\"6\" fill=\"{}\"/>\n",
        legend_x + 18.0,
        style.popular_color,
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"116\" font-family=\"sans-serif\" font-size=\"12\">Popular pages ({})</text>\n",
        legend_x + 32.0,
        classes.popular.len(),
    ));
    svg.push_str(&format!(
        "  <circle cx=\"{:.1}\" cy=\"136\" r=\"5\" fill=\"{}\"/>\n",
        legend_x + 18.0,
        style.regular_color,
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"140\" font-family=\"sans-serif\" font-size=\"12\">Regular pages ({})</text>\n",
        legend_x + 32.0,
        classes.regular.len(),
    ));
    svg.push_str("</svg>\n");

    svg
}

/// Renders `graph` and writes the drawing to `path`.
pub fn render_to_file<P: AsRef<Path>>(
    path: P,
    graph: &PageGraph,
    positions: &HashMap<PageId, Vec2>,
    classes: &Classification,
    style: &Style,
) -> Result<(), Error> {
    let svg = render_svg(graph, positions, classes, style);
    fs::write(path.as_ref(), svg)?;
    info!("wrote rendering to {}", path.as_ref().display());
    Ok(())
}

// Marker area, not radius, grows linearly with the link count.

fn popular_radius(links: usize) -> f32 {
    ((100.0 + 8.0 * links as f32) / PI).sqrt()
}

fn regular_radius(links: usize) -> f32 {
    ((50.0 + 5.0 * links as f32) / PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::graph::from_edge_list;
    use crate::layout::Layout;

    fn rendered(edges: &[(PageId, PageId)]) -> (PageGraph, Classification, String) {
        let graph = from_edge_list(edges.iter().copied());
        let positions = Layout::builder().build().run(&graph);
        let classes = Classifier::default().classify(&graph).unwrap();
        let svg = render_svg(&graph, &positions, &classes, &Style::default());
        (graph, classes, svg)
    }

    #[test]
    fn one_circle_per_page_plus_the_legend_dots() {
        let (graph, _, svg) = rendered(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        assert_eq!(svg.matches("<circle").count(), graph.node_count() + 2);
    }

    #[test]
    fn one_line_per_link() {
        let (graph, _, svg) = rendered(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        assert_eq!(svg.matches("<line").count(), graph.edge_count());
    }

    #[test]
    fn title_reports_the_sample_size() {
        let (_, _, svg) = rendered(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        assert!(svg.contains("4 pages, 4 links"));
    }

    #[test]
    fn legend_counts_each_group() {
        let (_, classes, svg) = rendered(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        assert!(svg.contains(&format!("Popular pages ({})", classes.popular.len())));
        assert!(svg.contains(&format!("Regular pages ({})", classes.regular.len())));
    }

    #[test]
    fn lone_page_is_drawn_at_the_plot_center() {
        let mut graph = PageGraph::new();
        graph.add_node(9);
        let positions = HashMap::from([(9, Vec2::ZERO)]);
        let classes = Classifier::default().classify(&graph).unwrap();

        let svg = render_svg(&graph, &positions, &classes, &Style::default());
        // Plot area of the default canvas: x in 50..950, y in 110..750.
        assert!(svg.contains("<circle cx=\"500.0\" cy=\"430.0\""));
        assert!(!svg.contains("NaN") && !svg.contains("inf"));
        assert!(svg.contains("1 pages, 0 links"));
    }

    #[test]
    fn empty_sample_still_produces_a_document() {
        let graph = PageGraph::new();
        let classes = Classification {
            popular: Vec::new(),
            regular: Vec::new(),
            threshold: 0.0,
        };

        let svg = render_svg(&graph, &HashMap::new(), &classes, &Style::default());
        assert!(svg.contains("0 pages, 0 links"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn render_to_file_writes_the_document() {
        let graph = from_edge_list([(1, 2), (2, 3)]);
        let positions = Layout::builder().build().run(&graph);
        let classes = Classifier::default().classify(&graph).unwrap();
        let style = Style::default();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.svg");

        render_to_file(&path, &graph, &positions, &classes, &style).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_svg(&graph, &positions, &classes, &style));
    }

    #[test]
    fn render_to_file_reports_a_missing_directory() {
        let graph = from_edge_list([(1, 2)]);
        let positions = Layout::builder().build().run(&graph);
        let classes = Classifier::default().classify(&graph).unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("sample.svg");

        let result = render_to_file(&path, &graph, &positions, &classes, &Style::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn custom_colors_reach_the_markup() {
        let graph = from_edge_list([(1, 2), (2, 3)]);
        let positions = Layout::builder().build().run(&graph);
        let classes = Classifier::default().classify(&graph).unwrap();
        let style = Style {
            popular_color: "tomato".to_owned(),
            ..Style::default()
        };

        let svg = render_svg(&graph, &positions, &classes, &style);
        assert!(svg.contains("tomato"));
    }
}
