//! Size constraints offered to elements during measurement.

use crate::rect::Size;
use cgmath::Vector2;

/// The range one axis of a measured size may take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Axis {
    /// Any size goes; elements should report their natural size.
    Unconstrained,
    /// The size should lie within `min..=max`.
    Bounded { min: f64, max: f64 },
}

impl Axis {
    /// At most `max`.
    pub fn at_most(max: f64) -> Axis {
        Axis::Bounded { min: 0., max }
    }

    /// Exactly `value`.
    pub fn exactly(value: f64) -> Axis {
        Axis::Bounded {
            min: value,
            max: value,
        }
    }

    pub fn minimum(&self) -> f64 {
        match self {
            Axis::Unconstrained => 0.,
            Axis::Bounded { min, .. } => *min,
        }
    }

    /// The largest allowed value; infinite if unconstrained.
    pub fn maximum(&self) -> f64 {
        match self {
            Axis::Unconstrained => f64::INFINITY,
            Axis::Bounded { max, .. } => *max,
        }
    }

    /// Returns the maximum if it is finite.
    pub fn bounded_maximum(&self) -> Option<f64> {
        match self {
            Axis::Unconstrained => None,
            Axis::Bounded { max, .. } => Some(*max),
        }
    }

    /// Clamps a value into this axis’ range.
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            Axis::Unconstrained => value,
            Axis::Bounded { min, max } => value.max(*min).min(*max),
        }
    }

    /// Shrinks the range by `amount`, e.g. for insets. Never goes below zero.
    pub fn inset(&self, amount: f64) -> Axis {
        match self {
            Axis::Unconstrained => Axis::Unconstrained,
            Axis::Bounded { min, max } => Axis::Bounded {
                min: (min - amount).max(0.),
                max: (max - amount).max(0.),
            },
        }
    }

    fn key(&self) -> (u64, u64) {
        match self {
            Axis::Unconstrained => (u64::MAX, u64::MAX),
            Axis::Bounded { min, max } => (min.to_bits(), max.to_bits()),
        }
    }
}

/// Independent width and height ranges offered to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraint {
    pub width: Axis,
    pub height: Axis,
}

impl SizeConstraint {
    pub const UNCONSTRAINED: SizeConstraint = SizeConstraint {
        width: Axis::Unconstrained,
        height: Axis::Unconstrained,
    };

    /// At most `size` on both axes.
    pub fn new(size: Size) -> SizeConstraint {
        SizeConstraint {
            width: Axis::at_most(size.x),
            height: Axis::at_most(size.y),
        }
    }

    /// Exactly `size`.
    pub fn exactly(size: Size) -> SizeConstraint {
        SizeConstraint {
            width: Axis::exactly(size.x),
            height: Axis::exactly(size.y),
        }
    }

    /// Constrains only the width.
    pub fn width(width: f64) -> SizeConstraint {
        SizeConstraint {
            width: Axis::at_most(width),
            height: Axis::Unconstrained,
        }
    }

    /// Constrains only the height.
    pub fn height(height: f64) -> SizeConstraint {
        SizeConstraint {
            width: Axis::Unconstrained,
            height: Axis::at_most(height),
        }
    }

    /// The largest allowed size; infinite on unconstrained axes.
    pub fn maximum(&self) -> Size {
        Vector2::new(self.width.maximum(), self.height.maximum())
    }

    pub fn minimum(&self) -> Size {
        Vector2::new(self.width.minimum(), self.height.minimum())
    }

    pub fn clamp(&self, size: Size) -> Size {
        Vector2::new(self.width.clamp(size.x), self.height.clamp(size.y))
    }

    pub fn inset(&self, width: f64, height: f64) -> SizeConstraint {
        SizeConstraint {
            width: self.width.inset(width),
            height: self.height.inset(height),
        }
    }

    /// A hashable form of this constraint, for memoizing measurements.
    pub(crate) fn key(&self) -> [u64; 4] {
        let (a, b) = self.width.key();
        let (c, d) = self.height.key();
        [a, b, c, d]
    }
}

impl From<Size> for SizeConstraint {
    fn from(size: Size) -> Self {
        SizeConstraint::new(size)
    }
}
