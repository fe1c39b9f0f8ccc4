//! Per-node geometry.

use crate::error::GeometryError;
use crate::rect::{Rect, Size};
use crate::transform::Transform3D;
use cgmath::{EuclideanSpace, Point2, Vector2};

/// Position, size, transform and opacity of one node, in its parent’s coordinate space.
///
/// Every field is finite at all times. The `try_set_*` methods reject non-finite values and leave
/// the attributes unchanged; the `set_*` methods and constructors panic on them instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutAttributes {
    center: Point2<f64>,
    bounds: Rect,
    transform: Transform3D,
    alpha: f64,
}

fn reject(result: Result<(), GeometryError>) {
    if let Err(err) = result {
        panic!("{}", err);
    }
}

fn finite_point(point: Point2<f64>) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

impl LayoutAttributes {
    /// Creates attributes that place a node at `frame`, with an identity transform and full
    /// opacity. The bounds origin is zero.
    ///
    /// # Panics
    /// - if the frame is not finite
    pub fn new(frame: Rect) -> LayoutAttributes {
        let mut attributes = LayoutAttributes {
            center: Point2::origin(),
            bounds: Rect::zero(),
            transform: Transform3D::identity(),
            alpha: 1.,
        };
        attributes.set_frame(frame);
        attributes
    }

    /// Creates attributes for a node of the given size at the origin.
    pub fn with_size(size: Size) -> LayoutAttributes {
        LayoutAttributes::new(Rect::from_size(size))
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn transform(&self) -> Transform3D {
        self.transform
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn try_set_center(&mut self, center: Point2<f64>) -> Result<(), GeometryError> {
        if !finite_point(center) {
            return Err(GeometryError::NonFinite { field: "center" });
        }
        self.center = center;
        Ok(())
    }

    pub fn try_set_bounds(&mut self, bounds: Rect) -> Result<(), GeometryError> {
        if !bounds.is_finite() {
            return Err(GeometryError::NonFinite { field: "bounds" });
        }
        self.bounds = bounds;
        Ok(())
    }

    pub fn try_set_transform(&mut self, transform: Transform3D) -> Result<(), GeometryError> {
        if !transform.is_finite() {
            return Err(GeometryError::NonFinite { field: "transform" });
        }
        self.transform = transform;
        Ok(())
    }

    pub fn try_set_alpha(&mut self, alpha: f64) -> Result<(), GeometryError> {
        if !alpha.is_finite() {
            return Err(GeometryError::NonFinite { field: "alpha" });
        }
        self.alpha = alpha;
        Ok(())
    }

    /// Sets the center and the bounds size from a frame. The transform is left alone.
    pub fn try_set_frame(&mut self, frame: Rect) -> Result<(), GeometryError> {
        if !frame.is_finite() {
            return Err(GeometryError::NonFinite { field: "frame" });
        }
        self.center = frame.center();
        self.bounds.size = frame.size;
        Ok(())
    }

    /// # Panics
    /// - if the center is not finite
    pub fn set_center(&mut self, center: Point2<f64>) {
        reject(self.try_set_center(center));
    }

    /// # Panics
    /// - if the bounds are not finite
    pub fn set_bounds(&mut self, bounds: Rect) {
        reject(self.try_set_bounds(bounds));
    }

    /// # Panics
    /// - if the transform is not finite
    pub fn set_transform(&mut self, transform: Transform3D) {
        reject(self.try_set_transform(transform));
    }

    /// # Panics
    /// - if alpha is not finite
    pub fn set_alpha(&mut self, alpha: f64) {
        reject(self.try_set_alpha(alpha));
    }

    /// # Panics
    /// - if the frame is not finite
    pub fn set_frame(&mut self, frame: Rect) {
        reject(self.try_set_frame(frame));
    }

    /// The axis-aligned box the node covers in its parent’s coordinate space, including its
    /// transform.
    pub fn frame(&self) -> Rect {
        let half = self.bounds.size / 2.;
        if self.transform.is_identity() {
            return Rect::new(self.center - half, self.bounds.size);
        }

        let corners = [
            Point2::new(-half.x, -half.y),
            Point2::new(half.x, -half.y),
            Point2::new(-half.x, half.y),
            Point2::new(half.x, half.y),
        ];
        let center = self.center.to_vec();
        Rect::bounding(
            corners
                .iter()
                .map(|corner| self.transform.transform_point(*corner) + center),
        )
        .unwrap_or_else(|| Rect::new(self.center, Vector2::new(0., 0.)))
    }

    /// Expresses these attributes, given in `parent`’s coordinate space, in the coordinate space
    /// that `parent` itself lives in.
    ///
    /// The center is taken relative to the parent’s bounds midpoint, run through the parent’s
    /// transform and re-centered at the parent’s center. The parent’s translation thus arrives
    /// through the center; only its linear part is appended to the transform. Alpha multiplies
    /// and the bounds stay as they are.
    ///
    /// For affine transforms, `a.within(b).within(c)` equals `a.within(b.within(c))` up to
    /// floating-point error.
    ///
    /// # Panics
    /// - if the composition overflows to a non-finite value
    pub fn within(&self, parent: &LayoutAttributes) -> LayoutAttributes {
        let relative = self.center - parent.bounds.center().to_vec();
        let center = parent.transform.transform_point(relative) + parent.center.to_vec();

        let mut result = *self;
        result.set_center(center);
        result.set_transform(self.transform.then(&parent.transform.linear_part()));
        result.set_alpha(self.alpha * parent.alpha);
        result
    }

    /// Returns true if the two are equal within an absolute tolerance.
    pub fn approx_eq(&self, other: &LayoutAttributes, epsilon: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= epsilon;
        close(self.center.x, other.center.x)
            && close(self.center.y, other.center.y)
            && close(self.bounds.origin.x, other.bounds.origin.x)
            && close(self.bounds.origin.y, other.bounds.origin.y)
            && close(self.bounds.size.x, other.bounds.size.x)
            && close(self.bounds.size.y, other.bounds.size.y)
            && close(self.alpha, other.alpha)
            && self.transform.approx_eq(&other.transform, epsilon)
    }
}

impl Default for LayoutAttributes {
    fn default() -> Self {
        LayoutAttributes::new(Rect::zero())
    }
}
