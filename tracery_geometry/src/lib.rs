// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tracery_geometry --heading-base-level=0

//! Tracery Geometry: scalar primitives for path-to-shape matching.
//!
//! This crate provides the two measurements the Tracery matcher is built on:
//!
//! - [`segment_distance`]: Euclidean distance from a point to a line segment,
//!   with the projection clamped to the segment's endpoints.
//! - [`direction_alignment`]: cosine similarity between two heading vectors,
//!   floored at zero and defined for degenerate (zero-length) inputs.
//!
//! Both operate on plain [`kurbo`] types in whatever 2D coordinate space the
//! caller samples pointers in (typically device pixels). There is no notion
//! of a shape or a gesture at this level; higher layers
//! (`tracery_shape`, `tracery_detector`) compose these primitives into the
//! actual matching state machines.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use tracery_geometry::{direction_alignment, segment_distance};
//!
//! // A point one unit above the middle of a horizontal segment.
//! let d = segment_distance(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 1.0));
//! assert!((d - 1.0).abs() < 1e-12);
//!
//! // Two headings 45 degrees apart.
//! let a = direction_alignment(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0));
//! assert!((a - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
//!
//! // Opposed headings align at zero, not a negative value.
//! assert_eq!(direction_alignment(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)), 0.0);
//! ```
//!
//! This crate is `no_std` compatible: disable the `std` feature and enable
//! `libm` to use it without the standard library.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point, Vec2};

/// Distance from `p` to the segment from `a` to `b`.
///
/// The projection of `p` onto the infinite line through `a` and `b` is
/// clamped to the segment, so points whose projection falls outside it get
/// the distance to the nearer endpoint. A degenerate segment (`a == b`)
/// reduces to the plain point distance.
#[must_use]
pub fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    Line::new(a, b).nearest(p, 0.).distance_sq.sqrt()
}

/// Cosine similarity of two heading vectors, floored at zero.
///
/// Returns the dot product of the normalized inputs when it is positive, and
/// `0.0` otherwise. Zero-length inputs have no heading and also yield `0.0`,
/// so callers can feed raw (unnormalized) deltas without guarding them.
#[must_use]
pub fn direction_alignment(u: Vec2, v: Vec2) -> f64 {
    let scale = u.hypot() * v.hypot();
    if scale <= 0.0 {
        return 0.0;
    }
    let dot = u.dot(v) / scale;
    if dot > 0.0 { dot } else { 0.0 }
}
