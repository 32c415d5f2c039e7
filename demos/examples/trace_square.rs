// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape detection basics.
//!
//! Drive a `ShapeDetector` with two scripted pointer gestures over a closed
//! square: a clean trace around the outline, and one that cuts the first
//! corner too widely.
//!
//! Run:
//! - `cargo run -p tracery_demos --example trace_square`

use kurbo::Point;
use tracery_demos::sample_polyline;
use tracery_detector::{MatchParams, ShapeDetector};
use tracery_shape::Shape;

fn main() {
    let square = Shape::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ],
        true,
    )
    .expect("a square has enough vertices");

    let mut detector = ShapeDetector::new(square, MatchParams::default());

    let gestures: [(&str, Vec<Point>); 2] = [
        (
            "clean loop",
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
                Point::new(0.0, 0.0),
            ],
        ),
        (
            "wide corner cut",
            vec![
                Point::new(0.0, 0.0),
                Point::new(50.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
                Point::new(0.0, 0.0),
            ],
        ),
    ];

    for (label, corners) in gestures {
        detector.pointer_down(0_u32, corners[0]);
        for sample in sample_polyline(&corners, 2.0) {
            detector.pointer_move(0, sample);
        }

        let live = detector.hypothesis_count();
        match detector.pointer_up(0) {
            Some(matched) => println!(
                "{label}: matched with {} points (start {}, {}), {live} hypotheses alive at lift",
                matched.points.len(),
                matched.start_index,
                if matched.reverse { "backward" } else { "forward" },
            ),
            None => println!("{label}: no match, {live} hypotheses alive at lift"),
        }
    }
}
