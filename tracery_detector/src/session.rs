// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session management: seed, cull, and settle hypotheses across pointers.
//!
//! A [`ShapeDetector`] is the long-lived half of the matcher. Pointers come
//! and go; the detector translates their lifecycle into hypothesis
//! bookkeeping:
//!
//! - **Down**: seed hypotheses for the pointer. An open shape can only be
//!   traced from its first vertex (or its last, in reverse), but on a closed
//!   shape the start is ambiguous, so every vertex is seeded as a candidate.
//! - **Move**: extend every hypothesis owned by the pointer; refuted ones
//!   are dropped on the spot.
//! - **Up**: pick the first surviving hypothesis with enough confirmed
//!   points and report it; either way the pointer's hypotheses are released.
//!
//! Pointer identity is a caller-supplied id type compared by equality: an
//! index from a touch framework, or any other `Copy + PartialEq` value.
//! No hashing or ordering is imposed, and hypotheses live in a flat list
//! scanned linearly; even a closed shape checked in both directions seeds
//! only `2 * vertex_count` entries per pointer.
//!
//! Retired hypotheses (refuted, lifted, or manually removed) keep their
//! allocations in a free list and are re-armed on the next seed, so steady
//! state matching does not allocate per gesture.

use alloc::vec::Vec;

use kurbo::Point;
use tracery_shape::Shape;

use crate::MatchParams;
use crate::tracker::Hypothesis;

/// A reported match: the alignment that survived and the path that made it.
#[derive(Clone, Debug)]
pub struct ShapeMatch {
    /// The shape vertex the path started from.
    pub start_index: usize,
    /// Whether the shape was traced backward.
    pub reverse: bool,
    /// The confirmed path, one entry per matched shape vertex. The last
    /// entry is the position the pointer lifted at.
    pub points: Vec<Point>,
}

#[derive(Debug)]
struct Entry<P> {
    pointer: P,
    hypothesis: Hypothesis,
}

/// Matches pointer paths against one shape, across any number of pointers.
///
/// The shape and parameters are fixed at construction and read-only for the
/// detector's lifetime; all mutable state is per-pointer and transient.
#[derive(Debug)]
pub struct ShapeDetector<P> {
    shape: Shape,
    params: MatchParams,
    entries: Vec<Entry<P>>,
    pool: Vec<Hypothesis>,
}

impl<P: Copy + PartialEq> ShapeDetector<P> {
    /// Creates a detector matching against `shape` with the given tuning.
    #[must_use]
    pub fn new(shape: Shape, params: MatchParams) -> Self {
        Self {
            shape,
            params,
            entries: Vec::new(),
            pool: Vec::new(),
        }
    }

    /// The shape being matched against.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The tuning parameters in effect.
    #[must_use]
    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    /// Handles a pointer beginning to trace at `position`.
    ///
    /// Equivalent to [`add_pointer`](Self::add_pointer); provided so callers
    /// forwarding a down/move/up event stream read naturally.
    pub fn pointer_down(&mut self, pointer: P, position: Point) {
        self.add_pointer(pointer, position);
    }

    /// Starts tracking a pointer, discarding any hypotheses it already had.
    ///
    /// Closed shapes seed one candidate start per vertex (in descending
    /// vertex order); open shapes seed only vertex 0. Each candidate start
    /// gets one hypothesis per traversal direction configured in
    /// [`MatchParams::direction`].
    pub fn add_pointer(&mut self, pointer: P, position: Point) {
        self.remove_pointer(pointer);

        if self.shape.is_closed() {
            for index in (0..self.shape.len()).rev() {
                self.seed(pointer, index, position);
            }
        } else {
            self.seed(pointer, 0, position);
        }
    }

    fn seed(&mut self, pointer: P, index: usize, position: Point) {
        if self.params.direction.includes_forward() {
            self.seed_one(pointer, index, false, position);
        }
        if self.params.direction.includes_backward() {
            self.seed_one(pointer, index, true, position);
        }
    }

    fn seed_one(&mut self, pointer: P, index: usize, reverse: bool, position: Point) {
        let hypothesis = match self.pool.pop() {
            Some(mut recycled) => {
                recycled.reset(index, reverse, position);
                recycled
            }
            None => Hypothesis::new(index, reverse, position),
        };
        self.entries.push(Entry {
            pointer,
            hypothesis,
        });
    }

    /// Handles a pointer position sample.
    ///
    /// Every live hypothesis owned by the pointer is extended; refuted ones
    /// are removed immediately and silently. Unknown pointers are ignored.
    pub fn pointer_move(&mut self, pointer: P, position: Point) {
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].pointer == pointer
                && !self.entries[i]
                    .hypothesis
                    .extend(&self.shape, &self.params, position)
            {
                let entry = self.entries.remove(i);
                self.pool.push(entry.hypothesis);
            } else {
                i += 1;
            }
        }
    }

    /// Handles a pointer lifting, settling its outcome.
    ///
    /// A match needs the shape's full requirement of confirmed points
    /// ([`Shape::required_points`]), or [`MatchParams::minimum_points`] when
    /// that is configured below it. The first surviving hypothesis (in seed
    /// order) that meets the bar is reported; survivors are not ranked. All
    /// of the pointer's hypotheses are released regardless of the outcome.
    pub fn pointer_up(&mut self, pointer: P) -> Option<ShapeMatch> {
        let mut minimum = self.shape.required_points();
        if let Some(configured) = self.params.minimum_points {
            if configured > 0 && configured < minimum {
                minimum = configured;
            }
        }

        let mut result = None;
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].pointer == pointer {
                let entry = self.entries.remove(i);
                if result.is_none() && entry.hypothesis.confirmed_points().len() >= minimum {
                    result = Some(ShapeMatch {
                        start_index: entry.hypothesis.start_index(),
                        reverse: entry.hypothesis.is_reverse(),
                        points: entry.hypothesis.confirmed_points().to_vec(),
                    });
                }
                self.pool.push(entry.hypothesis);
            } else {
                i += 1;
            }
        }
        result
    }

    /// Stops tracking a pointer without settling an outcome.
    pub fn remove_pointer(&mut self, pointer: P) {
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].pointer == pointer {
                let entry = self.entries.remove(i);
                self.pool.push(entry.hypothesis);
            } else {
                i += 1;
            }
        }
    }

    /// Stops tracking every pointer.
    pub fn remove_all_pointers(&mut self) {
        while let Some(entry) = self.entries.pop() {
            self.pool.push(entry.hypothesis);
        }
    }

    /// Iterates over all live hypotheses with their owning pointer ids.
    ///
    /// Read-only introspection for visualization layers: each hypothesis
    /// exposes its confirmed path and raw sample buffer.
    pub fn hypotheses(&self) -> impl Iterator<Item = (P, &Hypothesis)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.pointer, &entry.hypothesis))
    }

    /// The number of live hypotheses across all pointers.
    #[must_use]
    pub fn hypothesis_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pointer is currently being tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;
    use alloc::vec;

    fn open_square() -> Shape {
        Shape::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
            false,
        )
        .unwrap()
    }

    fn closed_square() -> Shape {
        Shape::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
            true,
        )
        .unwrap()
    }

    #[test]
    fn open_shape_seeds_one_start_per_direction() {
        let mut detector = ShapeDetector::new(open_square(), MatchParams::default());
        detector.pointer_down(0_u32, Point::ZERO);
        assert_eq!(detector.hypothesis_count(), 2);
    }

    #[test]
    fn closed_shape_seeds_every_vertex() {
        let mut detector = ShapeDetector::new(closed_square(), MatchParams::default());
        detector.pointer_down(0_u32, Point::ZERO);
        assert_eq!(detector.hypothesis_count(), 8);

        let forward_only = MatchParams {
            direction: Direction::Forward,
            ..MatchParams::default()
        };
        let mut detector = ShapeDetector::new(closed_square(), forward_only);
        detector.pointer_down(0_u32, Point::ZERO);
        assert_eq!(detector.hypothesis_count(), 4);
        assert!(detector.hypotheses().all(|(_, h)| !h.is_reverse()));
    }

    #[test]
    fn closed_shape_seeds_in_descending_start_order() {
        let forward_only = MatchParams {
            direction: Direction::Forward,
            ..MatchParams::default()
        };
        let mut detector = ShapeDetector::new(closed_square(), forward_only);
        detector.pointer_down(0_u32, Point::ZERO);

        let starts: Vec<usize> = detector.hypotheses().map(|(_, h)| h.start_index()).collect();
        assert_eq!(starts, vec![3, 2, 1, 0]);
    }

    #[test]
    fn re_down_reseeds_from_scratch() {
        let mut detector = ShapeDetector::new(closed_square(), MatchParams::default());
        detector.pointer_down(0_u32, Point::ZERO);
        detector.pointer_move(0, Point::new(50.0, 0.0));

        detector.pointer_down(0, Point::new(10.0, 10.0));
        assert_eq!(detector.hypothesis_count(), 8);
        for (_, hypothesis) in detector.hypotheses() {
            assert_eq!(hypothesis.confirmed_points().len(), 2);
            assert_eq!(hypothesis.end_point(), Point::new(10.0, 10.0));
        }
    }

    #[test]
    fn unknown_pointer_events_are_ignored() {
        let mut detector = ShapeDetector::new(open_square(), MatchParams::default());
        detector.pointer_move(9_u32, Point::new(50.0, 0.0));
        assert!(detector.pointer_up(9).is_none());
        assert!(detector.is_empty());
    }

    #[test]
    fn remove_pointer_only_touches_its_own_hypotheses() {
        let mut detector = ShapeDetector::new(open_square(), MatchParams::default());
        detector.pointer_down(0_u32, Point::ZERO);
        detector.pointer_down(1_u32, Point::ZERO);
        assert_eq!(detector.hypothesis_count(), 4);

        detector.remove_pointer(0);
        assert_eq!(detector.hypothesis_count(), 2);
        assert!(detector.hypotheses().all(|(pointer, _)| pointer == 1));

        detector.remove_all_pointers();
        assert!(detector.is_empty());
    }

    #[test]
    fn pooled_hypotheses_are_reused_across_gestures() {
        let mut detector = ShapeDetector::new(closed_square(), MatchParams::default());
        detector.pointer_down(0_u32, Point::ZERO);
        let seeded = detector.hypothesis_count();
        assert!(detector.pointer_up(0).is_none());

        // A second gesture re-arms the pooled hypotheses.
        detector.pointer_down(0, Point::new(5.0, 5.0));
        assert_eq!(detector.hypothesis_count(), seeded);
        for (_, hypothesis) in detector.hypotheses() {
            assert_eq!(hypothesis.confirmed_points().len(), 2);
            assert_eq!(hypothesis.buffer().len(), 1);
        }
    }
}
