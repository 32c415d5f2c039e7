// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-hypothesis tracking: follow one candidate alignment of path to shape.
//!
//! A [`Hypothesis`] assumes the pointer started at a particular shape vertex
//! and is tracing in a particular direction. Each raw sample fed to
//! [`Hypothesis::extend`] either keeps the assumption alive (possibly
//! confirming the next corner of the shape) or refutes it, at which point
//! the caller discards the hypothesis.
//!
//! Corner detection is an online simplification of the raw path: samples
//! accumulate in a buffer until some interior sample splits the buffered run
//! into two legs that both align with the next pair of expected shape edges.
//! That sample is confirmed as a pivot, the buffer restarts from the run's
//! end, and the hypothesis is one edge deeper into the shape.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use tracery_geometry::{direction_alignment, segment_distance};
use tracery_shape::Shape;

use crate::MatchParams;

/// How many raw samples the pivot buffer holds before spilling to the heap.
const BUFFER_INLINE: usize = 8;

/// One candidate alignment of the drawn path against the shape.
///
/// Invariants, maintained by [`reset`](Self::reset) and
/// [`extend`](Self::extend):
///
/// - `confirmed` always holds at least two points; the last entry is the
///   tentative current vertex and tracks the live pointer position, while
///   everything before it is settled.
/// - `buffer` is never empty; it holds the raw samples accumulated since the
///   last confirmed pivot, starting with that pivot's closing sample.
#[derive(Clone, Debug)]
pub struct Hypothesis {
    start_index: usize,
    reverse: bool,
    confirmed: Vec<Point>,
    buffer: SmallVec<[Point; BUFFER_INLINE]>,
}

impl Hypothesis {
    /// Creates a hypothesis assuming the path begins at shape vertex
    /// `start_index`, traced in reverse when `reverse` is set, with the
    /// pointer currently at `position`.
    #[must_use]
    pub fn new(start_index: usize, reverse: bool, position: Point) -> Self {
        let mut hypothesis = Self {
            start_index: 0,
            reverse: false,
            confirmed: Vec::new(),
            buffer: SmallVec::new(),
        };
        hypothesis.reset(start_index, reverse, position);
        hypothesis
    }

    /// Re-arms this hypothesis for a fresh path, keeping its allocations.
    ///
    /// The confirmed path starts as the initial sample duplicated: the first
    /// entry is the settled starting point, the second is the tentative
    /// current vertex.
    pub fn reset(&mut self, start_index: usize, reverse: bool, position: Point) {
        self.start_index = start_index;
        self.reverse = reverse;
        self.confirmed.clear();
        self.buffer.clear();
        self.buffer.push(position);
        self.confirmed.push(position);
        self.confirmed.push(position);
    }

    /// The shape vertex this hypothesis assumes the path started from.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Returns `true` if this hypothesis walks the shape backward.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// The confirmed path so far. The last entry is tentative and follows
    /// the live pointer position.
    #[must_use]
    pub fn confirmed_points(&self) -> &[Point] {
        &self.confirmed
    }

    /// The raw samples buffered since the last confirmed pivot.
    #[must_use]
    pub fn buffer(&self) -> &[Point] {
        &self.buffer
    }

    /// The tentative current vertex (the path's tip).
    #[must_use]
    pub fn end_point(&self) -> Point {
        self.confirmed[self.confirmed.len() - 1]
    }

    /// The heading of the edge currently being traced, from the last settled
    /// point to the path's tip. Zero before the tip first moves.
    #[must_use]
    pub fn end_vector(&self) -> Vec2 {
        self.confirmed[self.confirmed.len() - 1] - self.confirmed[self.confirmed.len() - 2]
    }

    /// Consumes one raw position sample.
    ///
    /// Returns `false` when the path has strayed outside
    /// [`MatchParams::deviation_tolerance`] of the edge being traced; the
    /// hypothesis is then dead and the caller must discard it. Returns
    /// `true` otherwise, whether or not a new pivot was confirmed.
    pub fn extend(&mut self, shape: &Shape, params: &MatchParams, sample: Point) -> bool {
        let tip = self.confirmed.len() - 1;
        self.confirmed[tip] = sample;

        // Ignore sub-threshold movement so a resting pointer doesn't flood
        // the buffer with near-duplicate samples.
        let tail = self.buffer[self.buffer.len() - 1];
        if (sample - tail).hypot() < params.step_threshold {
            return true;
        }
        self.buffer.push(sample);

        // Every buffered sample must stay near the straight line from the
        // last settled point to the tip. If one is out of bounds, a corner
        // should have been confirmed before the path got this far.
        let settled = self.confirmed[self.confirmed.len() - 2];
        if self.out_of_bounds(settled, sample, 0, self.buffer.len(), params) {
            return false;
        }

        self.try_pivot(shape, params);
        true
    }

    /// Returns `true` if any buffered sample in `range` strays more than the
    /// deviation tolerance from the segment `a..b`.
    fn out_of_bounds(
        &self,
        a: Point,
        b: Point,
        from: usize,
        to: usize,
        params: &MatchParams,
    ) -> bool {
        self.buffer[from..to]
            .iter()
            .any(|&sample| segment_distance(a, b, sample) > params.deviation_tolerance)
    }

    /// Searches the buffered run for the next corner and confirms it if one
    /// qualifies.
    ///
    /// A qualifying interior sample splits the run into two legs that are
    /// each at least `min_edge_length` long and that each align (beyond
    /// `direction_precision`) with the corresponding expected shape edge.
    /// The best product of the two alignment scores wins; the scan runs from
    /// the end of the buffer backward, so ties keep the candidate nearest
    /// the end.
    fn try_pivot(&mut self, shape: &Shape, params: &MatchParams) {
        if self.buffer.len() <= 2 {
            return;
        }

        let first = self.buffer[0];
        let last = self.buffer[self.buffer.len() - 1];

        // The two shape edges adjacent to the next expected vertex. The
        // indices advance with the confirmed count, so the hypothesis always
        // compares against the next unconfirmed edge pair. Past an open
        // shape's final vertex the second heading degenerates to zero and no
        // further pivot can qualify.
        let shape_a = shape.point(self.start_index + self.confirmed.len() - 2, self.reverse);
        let shape_b = shape.point(self.start_index + self.confirmed.len() - 1, self.reverse);
        let shape_c = shape.point(self.start_index + self.confirmed.len(), self.reverse);
        let expected_a = shape_b - shape_a;
        let expected_b = shape_c - shape_b;

        let mut best_score = -1.0;
        let mut best_index = 0;
        let mut best_middle = Point::ZERO;

        for i in (1..self.buffer.len() - 1).rev() {
            let middle = self.buffer[i];

            if (middle - first).hypot() >= params.min_edge_length
                && (last - middle).hypot() >= params.min_edge_length
            {
                let score_a = direction_alignment(middle - first, expected_a);
                let score_b = direction_alignment(last - middle, expected_b);
                let score = score_a * score_b;

                if score_a > params.direction_precision
                    && score_b > params.direction_precision
                    && score > best_score
                {
                    best_score = score;
                    best_index = i;
                    best_middle = middle;
                }
            }
        }

        if best_index == 0 {
            return;
        }

        // Both legs must independently pass the straight-line bound before
        // the corner is settled.
        if self.out_of_bounds(first, best_middle, 0, best_index, params)
            || self.out_of_bounds(best_middle, last, best_index, self.buffer.len(), params)
        {
            return;
        }

        let tip = self.confirmed.len() - 1;
        self.confirmed.insert(tip, best_middle);
        self.buffer.clear();
        self.buffer.push(last);
    }
}
