use nalgebra::{Point2, Point3, Vector3};

/// Normalizes `v`, returning the zero vector for zero-length input.
#[inline]
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

/// Signed double area of the screen triangle `(v0, v1, v2)`.
///
/// Zero means the triangle is degenerate and covers no pixels.
#[inline]
pub fn edge_denominator(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> f32 {
    (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y)
}

/// Barycentric weights (w0, w1, w2) of point `p` with respect to `(v0, v1, v2)`.
///
/// `denom` must be the non-zero value returned by [`edge_denominator`] for the
/// same triangle. `w2` is derived as `1 - w0 - w1`.
#[inline]
pub fn barycentric_weights(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    denom: f32,
) -> Vector3<f32> {
    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    Vector3::new(w0, w1, 1.0 - w0 - w1)
}

/// Inclusive test: points exactly on an edge count as inside.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

/// Linear interpolation of screen-space depth.
#[inline]
pub fn interpolate_depth(bary: Vector3<f32>, z0: f32, z1: f32, z2: f32) -> f32 {
    bary.x * z0 + bary.y * z1 + bary.z * z2
}

/// Interpolates vertex normals and renormalizes the result.
#[inline]
pub fn interpolate_normal(
    bary: Vector3<f32>,
    n0: Vector3<f32>,
    n1: Vector3<f32>,
    n2: Vector3<f32>,
) -> Vector3<f32> {
    normalize_or_zero(&(n0 * bary.x + n1 * bary.y + n2 * bary.z))
}

/// Affine interpolation of positions (no renormalization).
#[inline]
pub fn interpolate_position(
    bary: Vector3<f32>,
    p0: Point3<f32>,
    p1: Point3<f32>,
    p2: Point3<f32>,
) -> Point3<f32> {
    Point3::from(p0.coords * bary.x + p1.coords * bary.y + p2.coords * bary.z)
}
