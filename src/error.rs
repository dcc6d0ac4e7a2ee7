//! Errors reported by the sampling pipeline.

use thiserror::Error;

/// Failures a sampling or rendering call can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation needs at least one page to work with.
    #[error("the graph has no pages")]
    EmptyGraph,

    /// No page qualifies as a starting point for the sample.
    ///
    /// Carries the requested degree band and the highest degree actually
    /// present, so the caller can widen the band and retry.
    #[error(
        "no page with degree in {min}..={max} to seed the sample \
         (highest degree in the graph is {highest})"
    )]
    NoSeedCandidate {
        /// Lower end of the requested degree band.
        min: usize,
        /// Upper end of the requested degree band.
        max: usize,
        /// Highest degree present in the full graph.
        highest: usize,
    },

    /// Writing the rendered document failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
