//! 3D transforms.

use cgmath::{Matrix4, Point2, Point3, Rad, SquareMatrix, Transform, Vector3, Vector4};

/// A 4×4 homogeneous transform.
///
/// Points are column vectors; applying `a` and then `b` is the matrix product `b * a`.
/// Use [`Transform3D::then`] instead of multiplying matrices by hand to keep the order straight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D(Matrix4<f64>);

impl Transform3D {
    /// The identity transform.
    pub fn identity() -> Transform3D {
        Transform3D(Matrix4::identity())
    }

    /// Wraps a matrix.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Transform3D {
        Transform3D(matrix)
    }

    /// Returns the underlying matrix.
    pub fn matrix(&self) -> Matrix4<f64> {
        self.0
    }

    /// A pure translation.
    pub fn translation(x: f64, y: f64, z: f64) -> Transform3D {
        Transform3D(Matrix4::from_translation(Vector3::new(x, y, z)))
    }

    /// A (possibly non-uniform) scale.
    pub fn scale(x: f64, y: f64, z: f64) -> Transform3D {
        Transform3D(Matrix4::from_nonuniform_scale(x, y, z))
    }

    /// A rotation around the z axis.
    pub fn rotation_z(radians: f64) -> Transform3D {
        Transform3D(Matrix4::from_angle_z(Rad(radians)))
    }

    /// Returns true if this is exactly the identity.
    pub fn is_identity(&self) -> bool {
        self.0 == Matrix4::identity()
    }

    /// Returns true if every matrix entry is finite.
    pub fn is_finite(&self) -> bool {
        self.columns()
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite() && c.z.is_finite() && c.w.is_finite())
    }

    /// Returns true if the bottom row is (0, 0, 0, 1), i.e. there is no perspective component.
    pub fn is_affine(&self) -> bool {
        self.0.x.w == 0. && self.0.y.w == 0. && self.0.z.w == 0. && self.0.w.w == 1.
    }

    /// Concatenation: returns the transform that applies `self` first and then `next`.
    pub fn then(&self, next: &Transform3D) -> Transform3D {
        // identity fast paths; the product below gives the same result
        if self.is_identity() {
            *next
        } else if next.is_identity() {
            *self
        } else {
            Transform3D(next.0 * self.0)
        }
    }

    /// Returns this transform followed by a translation.
    pub fn translated(&self, x: f64, y: f64, z: f64) -> Transform3D {
        self.then(&Transform3D::translation(x, y, z))
    }

    /// Decomposes the transform into its translation and the remaining linear part, such that
    /// `linear.translated(t.x, t.y, t.z) == self` for affine transforms.
    pub fn split(&self) -> (Vector3<f64>, Transform3D) {
        let translation = self.0.w.truncate();
        let mut linear = self.0;
        linear.w = Vector4::new(0., 0., 0., self.0.w.w);
        (translation, Transform3D(linear))
    }

    /// Returns the transform without its translation.
    pub fn linear_part(&self) -> Transform3D {
        self.split().1
    }

    /// Applies the transform to a point in the z = 0 plane and projects the result back onto it.
    pub fn transform_point(&self, point: Point2<f64>) -> Point2<f64> {
        if self.is_identity() {
            return point;
        }
        let p = self.0.transform_point(Point3::new(point.x, point.y, 0.));
        Point2::new(p.x, p.y)
    }

    /// Compares all entries within an absolute tolerance.
    pub fn approx_eq(&self, other: &Transform3D, epsilon: f64) -> bool {
        self.columns()
            .iter()
            .zip(other.columns().iter())
            .all(|(a, b)| {
                (a.x - b.x).abs() <= epsilon
                    && (a.y - b.y).abs() <= epsilon
                    && (a.z - b.z).abs() <= epsilon
                    && (a.w - b.w).abs() <= epsilon
            })
    }

    fn columns(&self) -> [Vector4<f64>; 4] {
        [self.0.x, self.0.y, self.0.z, self.0.w]
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Transform3D::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn then_applies_self_first() {
        let t = Transform3D::scale(2., 2., 1.).then(&Transform3D::translation(10., 0., 0.));
        assert_eq!(t.transform_point(Point2::new(1., 1.)), Point2::new(12., 2.));

        let u = Transform3D::translation(10., 0., 0.).then(&Transform3D::scale(2., 2., 1.));
        assert_eq!(u.transform_point(Point2::new(1., 1.)), Point2::new(22., 2.));
    }

    #[test]
    fn split_recomposes() {
        let t = Transform3D::rotation_z(0.3)
            .then(&Transform3D::scale(1.5, 0.5, 1.))
            .translated(4., -7., 0.);
        let (translation, linear) = t.split();
        assert_eq!(translation, Vector3::new(4., -7., 0.));
        assert!(linear
            .translated(translation.x, translation.y, translation.z)
            .approx_eq(&t, 1e-12));
        assert_eq!(linear.transform_point(Point2::new(0., 0.)), Point2::new(0., 0.));
    }

    #[test]
    fn finiteness() {
        assert!(Transform3D::identity().is_finite());
        assert!(!Transform3D::translation(f64::NAN, 0., 0.).is_finite());
        assert!(!Transform3D::scale(f64::INFINITY, 1., 1.).is_finite());
    }
}
