//! Bezier evaluation for path segments.
//!
//! Curved path segments are cubic curves whose two inner control points
//! coincide. That shape bulges less than a quadratic with the same control
//! point, and it is what both the curve solver and the sampler evaluate.

use glam::Vec2;

/// Evaluates a quadratic Bezier curve at parameter `t`.
///
/// # Example
///
/// ```
/// use stray_vector::bezier::quadratic_point;
/// use glam::Vec2;
///
/// let mid = quadratic_point(Vec2::ZERO, Vec2::new(0.5, 1.0), Vec2::X, 0.5);
/// assert_eq!(mid, Vec2::new(0.5, 0.5));
/// ```
#[inline]
pub fn quadratic_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

/// Evaluates a cubic Bezier curve at parameter `t`.
#[inline]
pub fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    p0 * (mt2 * mt) + p1 * (3.0 * mt2 * t) + p2 * (3.0 * mt * t2) + p3 * (t2 * t)
}

/// Evaluates a cubic curve from `start` to `end` with both inner control
/// points at `control`.
#[inline]
pub fn shared_control_point(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    cubic_point(start, control, control, end, t)
}

/// Perpendicular control offset for a segment, scaled by `amount`.
///
/// The offset is the segment vector rotated a quarter turn, so its length is
/// `amount` times the segment length.
#[inline]
pub fn perpendicular_offset(start: Vec2, end: Vec2, amount: f32) -> Vec2 {
    (end - start).perp() * amount
}
