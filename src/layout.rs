//! Force directed placement of sampled pages.

use crate::graph::{PageGraph, PageId};
use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// One-shot force directed layout.
///
/// Runs a spring/repulsion/gravity simulation for a bounded number of steps
/// and returns the final position of every page. The pass is deterministic
/// for a given graph and seed, so a rendering can be reproduced exactly.
pub struct Layout {
    spring_stiffness: f32,
    spring_neutral_length: f32,
    repel_force: f32,
    gravity_force: f32,
    delta_time: f32,
    damping: f32,
    iterations: usize,
    settle_threshold: f32,
    rng_seed: u64,
}

impl Layout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    /// Computes a position for every page of `graph`.
    pub fn run(&self, graph: &PageGraph) -> HashMap<PageId, Vec2> {
        let pages: Vec<PageId> = graph.nodes().collect();
        let count = pages.len();
        if count == 0 {
            return HashMap::new();
        }

        let index: HashMap<PageId, usize> = pages
            .iter()
            .enumerate()
            .map(|(position, &page)| (page, position))
            .collect();
        let edges: Vec<(usize, usize)> = graph
            .all_edges()
            .map(|(a, b, _)| (index[&a], index[&b]))
            .collect();

        let mut rng = StdRng::seed_from_u64(self.rng_seed);
        let mut positions: Vec<Vec2> = (0..count)
            .map(|_| {
                Vec2::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0))
            })
            .collect();
        // Pages with many links carry more mass and move with more inertia.
        let masses: Vec<f32> = pages
            .iter()
            .map(|&page| 1.0 + graph.neighbors(page).count() as f32)
            .collect();
        let mut velocities = vec![Vec2::ZERO; count];

        for step in 0..self.iterations {
            let mut forces = vec![Vec2::ZERO; count];

            // Pairwise repulsion. Samples stay small, so the quadratic loop
            // beats maintaining a space partition per step.
            // TODO: Bring back a Barnes-Hut pass if samples ever grow past a
            // few hundred pages.
            for a in 0..count {
                for b in (a + 1)..count {
                    let repel = Self::repel_force(
                        positions[a],
                        positions[b],
                        masses[a],
                        masses[b],
                        self.repel_force,
                    );
                    forces[a] += repel;
                    forces[b] -= repel;
                }
            }

            // Springs along the links.
            for &(a, b) in &edges {
                let direction_vec = positions[b] - positions[a];
                let force_magnitude =
                    self.spring_stiffness * (direction_vec.length() - self.spring_neutral_length);
                let spring_force = direction_vec.normalize_or(Vec2::ZERO) * force_magnitude;
                forces[a] += spring_force;
                forces[b] -= spring_force;
            }

            // Pull everything toward the center.
            for (i, force) in forces.iter_mut().enumerate() {
                *force += -positions[i] * masses[i] * self.gravity_force;
            }

            let mut top_speed = 0.0f32;
            for i in 0..count {
                velocities[i] += forces[i] / masses[i] * self.delta_time;
                velocities[i] *= self.damping;
                positions[i] += velocities[i] * self.delta_time;
                top_speed = top_speed.max(velocities[i].length());
            }

            if self.settle_threshold >= 0.0 && top_speed < self.settle_threshold {
                debug!("layout settled after {} steps", step + 1);
                break;
            }
        }

        pages.into_iter().zip(positions).collect()
    }

    /// Computes the repel force between two pages.
    fn repel_force(pos1: Vec2, pos2: Vec2, mass1: f32, mass2: f32, repel_force: f32) -> Vec2 {
        let dir_vec = pos2 - pos1;
        let length_sqr = dir_vec.length_squared();
        if length_sqr == 0.0 {
            return Vec2::ZERO;
        }

        let f = -repel_force * (mass1 * mass2).abs() / length_sqr;
        let force = dir_vec.normalize_or(Vec2::ZERO) * f;

        force.clamp(Vec2::splat(-100_000.0), Vec2::splat(100_000.0))
    }
}

/// Builder for `Layout`
pub struct LayoutBuilder {
    spring_stiffness: f32,
    spring_neutral_length: f32,
    repel_force: f32,
    gravity_force: f32,
    delta_time: f32,
    damping: f32,
    iterations: usize,
    settle_threshold: f32,
    rng_seed: u64,
}

impl LayoutBuilder {
    /// Get a Instance of `LayoutBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// How strong the spring force should be.
    ///
    /// Default: `1.0`
    pub fn spring_stiffness(mut self, spring_stiffness: f32) -> Self {
        self.spring_stiffness = spring_stiffness;
        self
    }

    /// Length of a edge in neutral position.
    ///
    /// If edge is shorter it pushes apart.
    /// If edge is longer it pulls together.
    ///
    /// Set to `0` if edges should always pull together.
    ///
    /// Default: `30.0`
    pub fn spring_neutral_length(mut self, neutral_length: f32) -> Self {
        self.spring_neutral_length = neutral_length;
        self
    }

    /// How strong pages should push others away.
    ///
    /// Default: `5000.0`
    pub fn repel_force(mut self, repel_force_const: f32) -> Self {
        self.repel_force = repel_force_const;
        self
    }

    /// How strong the pull to the center should be.
    ///
    /// Default: `1.0`
    pub fn gravity_force(mut self, gravity_force: f32) -> Self {
        self.gravity_force = gravity_force;
        self
    }

    /// Amount of damping that should be applied to the page's movement
    ///
    /// `1.0` -> No Damping
    ///
    /// `0.0` -> No Movement
    ///
    /// Default: `0.9`
    pub fn damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// How much time a simulation step should simulate. (euler method)
    ///
    /// Bigger time steps settle faster, but less accurate or even wrong
    /// placements.
    ///
    /// Panics when delta time is `0` or below
    ///
    /// Default: `0.05`
    pub fn delta_time(mut self, delta_time: f32) -> Self {
        if delta_time <= 0.0 {
            panic!("delta_time may not be 0 or below!");
        }
        self.delta_time = delta_time;
        self
    }

    /// Upper bound on simulation steps for one pass.
    ///
    /// Default: `300`
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Stop early once every page moves slower than `settle_threshold`.
    /// Set to `-1` to disable
    ///
    /// Default: `0.1`
    pub fn settle_threshold(mut self, settle_threshold: f32) -> Self {
        self.settle_threshold = settle_threshold;
        self
    }

    /// Seed for the generator producing the starting positions.
    ///
    /// Runs with the same seed and the same graph place every page
    /// identically.
    ///
    /// Default: `42`
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Constructs a instance of `Layout`
    pub fn build(self) -> Layout {
        Layout {
            spring_stiffness: self.spring_stiffness,
            spring_neutral_length: self.spring_neutral_length,
            repel_force: self.repel_force,
            gravity_force: self.gravity_force,
            delta_time: self.delta_time,
            damping: self.damping,
            iterations: self.iterations,
            settle_threshold: self.settle_threshold,
            rng_seed: self.rng_seed,
        }
    }
}

impl Default for LayoutBuilder {
    /// Get a Instance of `LayoutBuilder` with default values
    fn default() -> Self {
        Self {
            spring_stiffness: 1.0,
            spring_neutral_length: 30.0,
            repel_force: 5000.0,
            gravity_force: 1.0,
            delta_time: 0.05,
            damping: 0.9,
            iterations: 300,
            settle_threshold: 0.1,
            rng_seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::from_edge_list;

    #[test]
    fn equal_seeds_reproduce_every_coordinate() {
        let graph = from_edge_list([(1, 2), (2, 3), (3, 4), (4, 1), (1, 3)]);
        let layout = Layout::builder().rng_seed(42).build();

        let first = layout.run(&graph);
        let second = layout.run(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_move_the_pages() {
        let graph = from_edge_list([(1, 2), (2, 3), (3, 4), (4, 5)]);
        let first = Layout::builder().rng_seed(1).build().run(&graph);
        let second = Layout::builder().rng_seed(2).build().run(&graph);

        assert!(graph.nodes().any(|page| first[&page] != second[&page]));
    }

    #[test]
    fn every_page_gets_a_finite_position() {
        let graph = from_edge_list([(1, 2), (2, 3), (3, 1), (3, 4), (4, 5)]);
        let positions = Layout::builder().build().run(&graph);

        assert_eq!(positions.len(), graph.node_count());
        for position in positions.values() {
            assert!(position.x.is_finite() && position.y.is_finite());
        }
    }

    #[test]
    fn empty_graph_yields_an_empty_layout() {
        let graph = PageGraph::new();
        assert!(Layout::builder().build().run(&graph).is_empty());
    }

    #[test]
    fn lone_page_gravitates_to_the_center() {
        let mut graph = PageGraph::new();
        graph.add_node(7);
        let positions = Layout::builder().build().run(&graph);

        assert!(positions[&7].length() < 5.0);
    }

    #[test]
    fn repulsion_vanishes_for_coincident_pages() {
        let spot = Vec2::new(3.0, -4.0);
        let force = Layout::repel_force(spot, spot, 2.0, 2.0, 5000.0);
        assert_eq!(force, Vec2::ZERO);
    }
}
