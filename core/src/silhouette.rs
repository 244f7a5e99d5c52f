//! Brace glyph outline used as the particle convergence target.

use rand::Rng;

/// Tilt applied to the whole glyph, radians.
pub const SILHOUETTE_ROTATION: f32 = -0.14;
/// Fraction of sampled points that receive a jittered duplicate.
pub const DENSIFY_RATIO: f64 = 0.35;
/// Jitter radius for duplicates, relative to glyph height.
pub const DENSIFY_JITTER: f32 = 0.012;

type Point = (f32, f32);

/// Cubic segments in glyph space: unit height, centered on the origin,
/// y grows downward. Traced top to bottom along the `{` outline.
const SEGMENTS: [[Point; 4]; 7] = [
    // top hook
    [(0.20, -0.50), (0.11, -0.50), (0.05, -0.47), (0.05, -0.40)],
    // upper stem
    [(0.05, -0.40), (0.05, -0.31), (0.05, -0.21), (0.05, -0.12)],
    // upper shoulder
    [(0.05, -0.12), (0.05, -0.07), (0.02, -0.04), (-0.04, -0.03)],
    // nose
    [(-0.04, -0.03), (-0.17, -0.01), (-0.17, 0.01), (-0.04, 0.03)],
    // lower shoulder
    [(-0.04, 0.03), (0.02, 0.04), (0.05, 0.07), (0.05, 0.12)],
    // lower stem
    [(0.05, 0.12), (0.05, 0.21), (0.05, 0.31), (0.05, 0.40)],
    // bottom hook
    [(0.05, 0.40), (0.05, 0.47), (0.11, 0.50), (0.20, 0.50)],
];

fn cubic(segment: &[Point; 4], t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * segment[0].0 + b * segment[1].0 + c * segment[2].0 + d * segment[3].0,
        a * segment[0].1 + b * segment[1].1 + c * segment[2].1 + d * segment[3].1,
    )
}

/// Samples `count` points along the outline, ordered top to bottom, scaled to
/// `height` and centered on `center`. Pure: identical inputs give identical
/// points.
pub fn sample_outline(center: Point, height: f32, count: usize) -> Vec<Point> {
    if count == 0 || height <= 0.0 {
        return Vec::new();
    }
    let (sin, cos) = SILHOUETTE_ROTATION.sin_cos();
    let segments = SEGMENTS.len();
    let mut points = Vec::with_capacity(count);
    for segment_index in 0..segments {
        // Spread the remainder over the leading segments.
        let share = count / segments + usize::from(segment_index < count % segments);
        let segment = &SEGMENTS[segment_index];
        for step in 0..share {
            let t = (step as f32 + 0.5) / share as f32;
            let (gx, gy) = cubic(segment, t);
            let rx = gx * cos - gy * sin;
            let ry = gx * sin + gy * cos;
            points.push((center.0 + rx * height, center.1 + ry * height));
        }
    }
    points
}

/// Appends one jittered copy for roughly [`DENSIFY_RATIO`] of the points.
pub fn densify<R: Rng>(points: &[Point], height: f32, rng: &mut R) -> Vec<Point> {
    let jitter = (height * DENSIFY_JITTER).max(0.0);
    let mut out = Vec::with_capacity(points.len() + points.len() / 2);
    for &(x, y) in points {
        out.push((x, y));
        if rng.random_bool(DENSIFY_RATIO) {
            let dx = rng.random_range(-1.0..=1.0f32) * jitter;
            let dy = rng.random_range(-1.0..=1.0f32) * jitter;
            out.push((x + dx, y + dy));
        }
    }
    out
}

/// Full target set: the sampled outline plus jittered duplicates.
pub fn build_targets<R: Rng>(center: Point, height: f32, count: usize, rng: &mut R) -> Vec<Point> {
    let outline = sample_outline(center, height, count);
    densify(&outline, height, rng)
}
