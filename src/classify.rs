//! Degree based classification of sampled pages.

use crate::error::Error;
use crate::graph::{self, PageGraph, PageId};
use log::debug;
use std::fmt;

/// Default degree percentile splitting popular from regular pages.
pub const DEFAULT_PERCENTILE: f64 = 70.0;

/// Splits a sampled subgraph into popular and regular pages by a degree
/// percentile.
///
/// Degrees are taken inside the subgraph, not the full graph, so the split
/// reflects local connectivity of the sample.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    percentile: f64,
}

impl Classifier {
    /// A classifier splitting at the given degree percentile.
    ///
    /// Pages at or above the percentile's degree value count as popular, the
    /// rest as regular.
    ///
    /// Panics when `percentile` is outside `0..=100`
    pub fn new(percentile: f64) -> Self {
        if !(0.0..=100.0).contains(&percentile) {
            panic!("percentile must lie in 0..=100!");
        }
        Self { percentile }
    }

    /// Partitions every page of `graph` into exactly one of the two groups.
    pub fn classify(&self, graph: &PageGraph) -> Result<Classification, Error> {
        if graph.node_count() == 0 {
            return Err(Error::EmptyGraph);
        }

        let degrees: Vec<(PageId, usize)> = graph
            .nodes()
            .map(|page| (page, graph::degree(graph, page)))
            .collect();
        let mut sorted: Vec<usize> = degrees.iter().map(|&(_, degree)| degree).collect();
        sorted.sort_unstable();
        let threshold = percentile(&sorted, self.percentile);

        let mut popular = Vec::new();
        let mut regular = Vec::new();
        for (page, degree) in degrees {
            if degree as f64 >= threshold {
                popular.push(page);
            } else {
                regular.push(page);
            }
        }
        debug!(
            "degree threshold {:.2}: {} popular, {} regular pages",
            threshold,
            popular.len(),
            regular.len()
        );

        Ok(Classification {
            popular,
            regular,
            threshold,
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
        }
    }
}

/// The two-way split of a sampled subgraph.
///
/// Every page of the subgraph is in exactly one of the groups; ties at the
/// threshold land in `popular` (inclusive comparison), so the nominal "top
/// 30%" is approximate when many pages share the threshold degree.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Pages whose degree reaches the threshold, in subgraph order.
    pub popular: Vec<PageId>,
    /// Pages below the threshold, in subgraph order.
    pub regular: Vec<PageId>,
    /// The degree value splitting the groups.
    pub threshold: f64,
}

/// The `p`-th percentile of an ascending sequence, interpolating linearly
/// between the two closest ranks.
///
/// Panics when `sorted` is empty or `p` is outside `0..=100`
pub fn percentile(sorted: &[usize], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty sequence");
    assert!((0.0..=100.0).contains(&p), "percentile must lie in 0..=100");

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let lower = sorted[below] as f64;
    let upper = sorted[above] as f64;
    lower + (upper - lower) * (rank - below as f64)
}

/// Headline numbers of a sampled subgraph, printable as the console summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Pages in the sample.
    pub pages: usize,
    /// Links in the sample.
    pub links: usize,
    /// Size of the popular group.
    pub popular_pages: usize,
    /// Size of the regular group.
    pub regular_pages: usize,
    /// Mean degree of the popular group, absent when the group is empty.
    pub popular_mean_degree: Option<f64>,
    /// Mean degree of the regular group, absent when the group is empty.
    pub regular_mean_degree: Option<f64>,
    /// Highest degree in the sample.
    pub max_degree: usize,
    /// The degree threshold used for the split.
    pub threshold: f64,
}

/// Computes the summary statistics for a classified sample.
pub fn summarize(graph: &PageGraph, classes: &Classification) -> Summary {
    let mean_degree = |pages: &[PageId]| -> Option<f64> {
        if pages.is_empty() {
            return None;
        }
        let total: usize = pages.iter().map(|&page| graph::degree(graph, page)).sum();
        Some(total as f64 / pages.len() as f64)
    };

    Summary {
        pages: graph.node_count(),
        links: graph.edge_count(),
        popular_pages: classes.popular.len(),
        regular_pages: classes.regular.len(),
        popular_mean_degree: mean_degree(&classes.popular),
        regular_mean_degree: mean_degree(&classes.regular),
        max_degree: graph
            .nodes()
            .map(|page| graph::degree(graph, page))
            .max()
            .unwrap_or(0),
        threshold: classes.threshold,
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== WHAT THIS SHOWS ===")?;
        writeln!(f, "✓ Pages form a network, some link to each other more than others")?;
        writeln!(f, "✓ Popular pages (red) have many links, they act as hubs")?;
        writeln!(f, "✓ Regular pages (blue) have fewer links")?;
        writeln!(f)?;
        writeln!(f, "Numbers:")?;
        match self.popular_mean_degree {
            Some(mean) => writeln!(
                f,
                "• {} popular pages average {:.1} links each",
                self.popular_pages, mean
            )?,
            None => writeln!(f, "• No popular pages in this sample")?,
        }
        match self.regular_mean_degree {
            Some(mean) => writeln!(
                f,
                "• {} regular pages average {:.1} links each",
                self.regular_pages, mean
            )?,
            None => writeln!(f, "• No regular pages in this sample")?,
        }
        write!(f, "• The most linked page has {} links", self.max_degree)
    }
}
