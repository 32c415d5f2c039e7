// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tracery_shape --heading-base-level=0

//! Tracery Shape: the reference shape a drawn path is matched against.
//!
//! A [`Shape`] is an ordered list of 2D vertices plus a closure flag. Open
//! shapes are polylines; closed shapes are polygons whose last vertex
//! connects back to the first through an implicit wrap edge.
//!
//! The shape is configured once, up front, and is read-only for the lifetime
//! of a matching session. Construction is the only place validation happens:
//! a shape needs at least two vertices to describe an edge, and
//! [`Shape::new`] returns `None` for anything smaller, so an invalid
//! configuration can never reach the matcher.
//!
//! The one non-trivial operation is [`Shape::point`], which resolves a
//! possibly out-of-range vertex index. Matching walks the shape with steadily
//! increasing indices (and walks it from the far end when tracing in
//! reverse), so index resolution (wrapping for closed shapes, clamping for
//! open ones) lives here rather than in every caller.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use tracery_shape::Shape;
//!
//! let square = Shape::new(
//!     vec![
//!         Point::new(0.0, 0.0),
//!         Point::new(1.0, 0.0),
//!         Point::new(1.0, 1.0),
//!         Point::new(0.0, 1.0),
//!     ],
//!     true,
//! )
//! .unwrap();
//!
//! // Closed shapes wrap: index 4 resolves back to the first vertex.
//! assert_eq!(square.point(4, false), Point::new(0.0, 0.0));
//!
//! // Tracing in reverse walks the vertex list backward from the end.
//! assert_eq!(square.point(0, true), Point::new(0.0, 1.0));
//!
//! // A full match around a closed square needs all 4 vertices plus the wrap edge.
//! assert_eq!(square.required_points(), 5);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

/// An ordered sequence of vertices, optionally closed into a polygon.
///
/// Immutable once constructed; all matching state lives in the detector, and
/// any number of concurrent hypotheses may read the same shape.
#[derive(Clone, Debug)]
pub struct Shape {
    points: Vec<Point>,
    closed: bool,
}

impl Shape {
    /// Creates a shape from its vertices.
    ///
    /// Returns `None` when fewer than two vertices are given; such a shape
    /// has no edges to trace and matching against it is meaningless.
    #[must_use]
    pub fn new(points: Vec<Point>, closed: bool) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points, closed })
    }

    /// Returns the vertices in authored order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the shape has no vertices.
    ///
    /// Always `false` for a constructed shape; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the last vertex connects back to the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Resolves a possibly out-of-range vertex index.
    ///
    /// With `reverse` set, the list is walked backward from the end, so index
    /// 0 is the last vertex. Closed shapes wrap the resolved index modulo the
    /// vertex count (in either direction); open shapes clamp it to the valid
    /// range, so indices past the end keep returning the final vertex.
    #[must_use]
    pub fn point(&self, index: usize, reverse: bool) -> Point {
        let len = self.points.len() as isize;
        let mut i = index as isize;
        if reverse {
            i = len - 1 - i;
        }
        let i = if self.closed {
            i.rem_euclid(len)
        } else {
            i.clamp(0, len - 1)
        };
        self.points[i as usize]
    }

    /// The number of confirmed path points a full match needs.
    ///
    /// Open shapes need every vertex. Closed shapes need every vertex plus
    /// one more for the wrap edge back to the starting vertex.
    #[must_use]
    pub fn required_points(&self) -> usize {
        if self.closed {
            self.points.len() + 1
        } else {
            self.points.len()
        }
    }
}
