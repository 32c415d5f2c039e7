// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tracery_detector --heading-base-level=0

//! Tracery Detector: incremental matching of drawn paths against a reference shape.
//!
//! This crate decides whether the path a pointer draws matches a
//! [`Shape`](tracery_shape::Shape), fully or partially, traced forward or
//! backward, while the path is still being drawn. It is split into two
//! layers:
//!
//! - [`tracker`]: one [`Hypothesis`] follows a single candidate alignment
//!   (a starting shape vertex plus a traversal direction). Feeding it raw
//!   position samples either deepens the match by one shape edge at a time
//!   or kills the hypothesis the moment the path strays too far.
//! - [`session`]: a [`ShapeDetector`] owns all live hypotheses across any
//!   number of pointers, seeds them on pointer-down (every vertex is a
//!   candidate start when the shape is closed), culls them on every move,
//!   and reports the outcome on pointer-up.
//!
//! ## Design Philosophy
//!
//! Like the other Tracery crates, the detector is a headless state machine:
//!
//! - **No event system**: the caller registers with whatever pointer source
//!   it has and forwards `(pointer, position)` samples explicitly.
//! - **No coordinate policy**: matching happens in whatever 2D space the
//!   samples arrive in (typically device pixels), and is translation
//!   invariant: only the headings and proportions of the path matter.
//! - **Results are returned, not dispatched**: [`ShapeDetector::pointer_up`]
//!   returns `Option<ShapeMatch>`; there are no callbacks to wire up.
//!
//! Failure is not an error here. A hypothesis that deviates from the shape
//! is silently discarded, and "no match" is simply a `None` on pointer-up.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use tracery_detector::{MatchParams, ShapeDetector};
//! use tracery_shape::Shape;
//!
//! // An L stroke: right 100, then up 100.
//! let shape = Shape::new(
//!     vec![
//!         Point::new(0.0, 0.0),
//!         Point::new(100.0, 0.0),
//!         Point::new(100.0, 100.0),
//!     ],
//!     false,
//! )
//! .unwrap();
//!
//! let mut detector = ShapeDetector::new(shape, MatchParams::default());
//!
//! // Drive it with a scripted pointer (id type is caller-defined).
//! detector.pointer_down(0_u32, Point::new(0.0, 0.0));
//! for i in 1..=20 {
//!     detector.pointer_move(0, Point::new(f64::from(i) * 5.0, 0.0));
//! }
//! for i in 1..=20 {
//!     detector.pointer_move(0, Point::new(100.0, f64::from(i) * 5.0));
//! }
//!
//! let matched = detector.pointer_up(0).expect("path traces the shape");
//! assert_eq!(matched.points.len(), 3);
//! assert!(!matched.reverse);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod session;
pub mod tracker;

pub use session::{ShapeDetector, ShapeMatch};
pub use tracker::Hypothesis;

/// Which traversal directions of the shape are candidates for matching.
///
/// Forward follows the shape's authored vertex order; backward walks it from
/// the end. Checking both doubles the number of seeded hypotheses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Only match paths tracing the shape in authored vertex order.
    Forward,
    /// Only match paths tracing the shape from its last vertex backward.
    Backward,
    /// Match either traversal direction.
    #[default]
    ForwardAndBackward,
}

impl Direction {
    /// Returns `true` if forward hypotheses should be seeded.
    #[must_use]
    pub fn includes_forward(self) -> bool {
        matches!(self, Self::Forward | Self::ForwardAndBackward)
    }

    /// Returns `true` if backward hypotheses should be seeded.
    #[must_use]
    pub fn includes_backward(self) -> bool {
        matches!(self, Self::Backward | Self::ForwardAndBackward)
    }
}

/// Tuning parameters for shape matching.
///
/// The defaults are calibrated for paths sampled in device pixels; when
/// matching in another coordinate space, scale the three length-valued
/// fields accordingly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchParams {
    /// Minimum movement, from the last buffered sample, before a new raw
    /// sample is buffered at all. Keeps slow or jittery pointers from
    /// flooding the buffer.
    pub step_threshold: f64,
    /// Minimum length of each detected edge. A corner candidate closer than
    /// this to either end of the buffered run never qualifies as a pivot.
    pub min_edge_length: f64,
    /// Minimum cosine similarity between a candidate edge and the expected
    /// shape edge. Higher values demand more faithful tracing.
    pub direction_precision: f64,
    /// How far any buffered sample may stray from the straight line of the
    /// edge currently being traced before the hypothesis is discarded.
    pub deviation_tolerance: f64,
    /// Opt-in partial matching: the number of confirmed points that counts
    /// as a match. Only values below the shape's own requirement have any
    /// effect; `None` requires the full shape.
    pub minimum_points: Option<usize>,
    /// Which traversal directions to consider.
    pub direction: Direction,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            step_threshold: 1.0,
            min_edge_length: 5.0,
            direction_precision: 0.85,
            deviation_tolerance: 20.0,
            minimum_points: None,
            direction: Direction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_direction_checks_both_ways() {
        let direction = Direction::default();
        assert!(direction.includes_forward());
        assert!(direction.includes_backward());
    }

    #[test]
    fn single_directions_exclude_the_other() {
        assert!(Direction::Forward.includes_forward());
        assert!(!Direction::Forward.includes_backward());
        assert!(Direction::Backward.includes_backward());
        assert!(!Direction::Backward.includes_forward());
    }

    #[test]
    fn default_params_require_the_full_shape() {
        let params = MatchParams::default();
        assert_eq!(params.minimum_points, None);
        assert!(params.direction_precision < 1.0);
    }
}
