//! Distance functions for spatial calculations.

/// Euclidean distance between two points.
#[inline]
pub fn dist(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    let dx = x - cx;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}

/// Locate a point relative to the segment from `a` to `b`.
///
/// Returns `(s, d)` where `s` is the position along the segment (0 at `a`,
/// 1 at `b`, unclamped) and `d` the distance to the nearest point of the
/// segment itself. A degenerate segment reports `s = 0` and the distance
/// to `a`.
pub fn segment_distance(x: f32, y: f32, ax: f32, ay: f32, bx: f32, by: f32) -> (f32, f32) {
    let ex = bx - ax;
    let ey = by - ay;
    let len_sq = ex * ex + ey * ey;
    if len_sq < 1e-12 {
        return (0.0, dist(x, y, ax, ay));
    }
    let s = ((x - ax) * ex + (y - ay) * ey) / len_sq;
    let t = s.clamp(0.0, 1.0);
    (s, dist(x, y, ax + ex * t, ay + ey * t))
}
