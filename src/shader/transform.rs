//! Coordinate transformation functions.

/// Rotate a point around the origin.
///
/// # Parameters
/// - `x`, `y`: Point coordinates
/// - `angle`: Rotation angle in radians (counter-clockwise)
///
/// # Returns
/// Rotated (x, y) coordinates
#[inline]
pub fn rotate(x: f32, y: f32, angle: f32) -> (f32, f32) {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

/// Map a pixel index to the normalized coordinate of its center.
///
/// Pixel (0, 0) maps to `(0.5 / width, 0.5 / height)`; `v` grows downward.
#[inline]
pub fn pixel_to_uv(x: usize, y: usize, width: usize, height: usize) -> (f32, f32) {
    (
        (x as f32 + 0.5) / width as f32,
        (y as f32 + 0.5) / height as f32,
    )
}

/// Convert Cartesian coordinates to polar.
///
/// # Returns
/// (radius, angle) where angle is in radians [-PI, PI]
#[inline]
pub fn cart_to_polar(x: f32, y: f32) -> (f32, f32) {
    let r = (x * x + y * y).sqrt();
    let theta = y.atan2(x);
    (r, theta)
}

/// Convert polar coordinates to Cartesian.
#[inline]
pub fn polar_to_cart(r: f32, theta: f32) -> (f32, f32) {
    (r * theta.cos(), r * theta.sin())
}

/// Apply domain warping to coordinates.
///
/// Offsets the input coordinates by warp values scaled by amount.
#[inline]
pub fn warp(x: f32, y: f32, warp_x: f32, warp_y: f32, amount: f32) -> (f32, f32) {
    (x + warp_x * amount, y + warp_y * amount)
}
