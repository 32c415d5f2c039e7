// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Tracery demos.

use kurbo::Point;

/// Samples along a polyline corner list, roughly `step` units apart,
/// emulating the move events a real pointer would produce.
pub fn sample_polyline(corners: &[Point], step: f64) -> Vec<Point> {
    let mut samples = Vec::new();
    for pair in corners.windows(2) {
        let distance = (pair[1] - pair[0]).hypot();
        let steps = (distance / step).ceil().max(1.0) as usize;
        for i in 1..=steps {
            samples.push(pair[0].lerp(pair[1], i as f64 / steps as f64));
        }
    }
    samples
}
