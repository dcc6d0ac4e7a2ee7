//! Seeded breadth-first sampling of a bounded neighborhood.

use crate::error::Error;
use crate::graph::{self, PageGraph, PageId};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::ops::RangeInclusive;

/// Default upper bound on the number of sampled pages.
pub const DEFAULT_SAMPLE_SIZE: usize = 80;

/// Samples a connected, diverse neighborhood out of a full page graph.
///
/// The walk starts at a moderately connected page and expands breadth first,
/// shuffling each adjacency list, until the configured bound is reached. The
/// result is the subgraph induced by the visited pages.
pub struct Sampler {
    sample_size: usize,
    seed_degrees: RangeInclusive<usize>,
}

impl Sampler {
    pub fn builder() -> SamplerBuilder {
        SamplerBuilder::default()
    }

    /// Samples a bounded neighborhood of `graph` and returns the induced
    /// subgraph over the visited pages.
    ///
    /// All randomness (seed choice and neighbor order) comes from `rng`, so
    /// an equally seeded generator reproduces the sample exactly.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        graph: &PageGraph,
        rng: &mut R,
    ) -> Result<PageGraph, Error> {
        let seed = self.pick_seed(graph, rng)?;
        let visited = self.expand(graph, seed, rng);
        debug!(
            "sampled {} of {} pages starting at page {}",
            visited.len(),
            graph.node_count(),
            seed
        );
        Ok(graph::induced_subgraph(graph, &visited))
    }

    /// Picks the starting page: a uniform choice among the pages whose degree
    /// falls inside the configured band.
    ///
    /// The band keeps the walk away from fringe pages, which have too few
    /// links to produce a rich sample, and from super hubs, whose ego-network
    /// would dominate it.
    fn pick_seed<R: Rng + ?Sized>(&self, graph: &PageGraph, rng: &mut R) -> Result<PageId, Error> {
        if graph.node_count() == 0 {
            return Err(Error::EmptyGraph);
        }

        let mut highest = 0;
        let mut candidates = Vec::new();
        for page in graph.nodes() {
            let degree = graph::degree(graph, page);
            highest = highest.max(degree);
            if self.seed_degrees.contains(&degree) {
                candidates.push(page);
            }
        }

        let seed = candidates.choose(rng).copied().ok_or(Error::NoSeedCandidate {
            min: *self.seed_degrees.start(),
            max: *self.seed_degrees.end(),
            highest,
        })?;
        debug!(
            "picked seed page {} (degree {}) from {} candidates",
            seed,
            graph::degree(graph, seed),
            candidates.len()
        );
        Ok(seed)
    }

    /// Breadth-first expansion from `seed`, bounded by the sample size.
    ///
    /// Each adjacency list is shuffled before admission; without that the
    /// walk would always follow edge insertion order and sample the same
    /// corner of every neighborhood. Returns the pages in visit order.
    fn expand<R: Rng + ?Sized>(&self, graph: &PageGraph, seed: PageId, rng: &mut R) -> Vec<PageId> {
        let mut visited = vec![seed];
        let mut seen: HashSet<PageId> = HashSet::from([seed]);
        let mut queue: VecDeque<PageId> = VecDeque::from([seed]);

        while let Some(current) = queue.pop_front() {
            if visited.len() >= self.sample_size {
                break;
            }
            let mut neighbors: Vec<PageId> = graph.neighbors(current).collect();
            neighbors.shuffle(rng);
            for neighbor in neighbors {
                if visited.len() >= self.sample_size {
                    break;
                }
                if seen.insert(neighbor) {
                    visited.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        visited
    }
}

/// Builder for `Sampler`
pub struct SamplerBuilder {
    sample_size: usize,
    seed_degrees: RangeInclusive<usize>,
}

impl SamplerBuilder {
    /// Get a Instance of `SamplerBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound on the number of pages in the sample.
    ///
    /// If the seed's connected component is smaller than this, the sample is
    /// the whole component.
    ///
    /// Panics when `sample_size` is `0`
    ///
    /// Default: `80`
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        if sample_size == 0 {
            panic!("sample_size may not be 0!");
        }
        self.sample_size = sample_size;
        self
    }

    /// Inclusive degree band a seed page must fall in.
    ///
    /// Small graphs may need a wider band than the default; a band nothing
    /// falls into makes sampling fail with [`Error::NoSeedCandidate`].
    ///
    /// Panics when `min` is greater than `max`
    ///
    /// Default: `20..=100`
    pub fn seed_degrees(mut self, min: usize, max: usize) -> Self {
        if min > max {
            panic!("seed degree band may not be empty!");
        }
        self.seed_degrees = min..=max;
        self
    }

    /// Constructs a instance of `Sampler`
    pub fn build(self) -> Sampler {
        Sampler {
            sample_size: self.sample_size,
            seed_degrees: self.seed_degrees,
        }
    }
}

impl Default for SamplerBuilder {
    /// Get a Instance of `SamplerBuilder` with default values
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed_degrees: 20..=100,
        }
    }
}
