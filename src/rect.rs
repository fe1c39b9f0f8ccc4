//! Rectangles and sizes.

use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use std::ops;

/// A width and a height.
pub type Size = Vector2<f64>;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Size,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Size) -> Rect {
        Rect { origin, size }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Returns a rectangle of the given size at the origin.
    pub fn from_size(size: Size) -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size,
        }
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f64> {
        self.origin + self.size / 2.
    }

    /// Returns the corner opposite to the origin.
    pub fn max(&self) -> Point2<f64> {
        self.origin + self.size
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.origin.x.is_finite()
            && self.origin.y.is_finite()
            && self.size.x.is_finite()
            && self.size.y.is_finite()
    }

    /// Returns true if the point is inside the rectangle.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < max.x && point.y < max.y
    }

    /// Returns true if the two rectangles intersect.
    pub fn intersects(&self, rect: Rect) -> bool {
        let own_opposite = self.max();
        let rect_opposite = rect.max();

        self.origin.x < rect_opposite.x
            && self.origin.y < rect_opposite.y
            && rect.origin.x < own_opposite.x
            && rect.origin.y < own_opposite.y
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(&self, rect: Rect) -> Rect {
        let min_x = self.origin.x.min(rect.origin.x);
        let min_y = self.origin.y.min(rect.origin.y);
        let (own_max, rect_max) = (self.max(), rect.max());
        let max_x = own_max.x.max(rect_max.x);
        let max_y = own_max.y.max(rect_max.y);

        Rect {
            origin: Point2::new(min_x, min_y),
            size: Vector2::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Returns the smallest rectangle containing all of the given points.
    ///
    /// Returns None for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Point2<f64>>>(points: I) -> Option<Rect> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Some(Rect {
            origin: min,
            size: max - min,
        })
    }
}

impl ops::Add<Vector2<f64>> for Rect {
    type Output = Rect;
    fn add(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

impl ops::Add<Point2<f64>> for Rect {
    type Output = Rect;
    fn add(self, point: Point2<f64>) -> Rect {
        self + point.to_vec()
    }
}

#[test]
fn test_rect_union() {
    let a = Rect::new(Point2::new(0., 0.), Vector2::new(10., 10.));
    let b = Rect::new(Point2::new(5., -5.), Vector2::new(20., 5.));
    let u = a.union(b);
    assert_eq!(u.origin, Point2::new(0., -5.), "union origin");
    assert_eq!(u.size, Vector2::new(25., 15.), "union size");
    assert!(a.intersects(u) && u.contains(Point2::new(24., 9.)));
}
