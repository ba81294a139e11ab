//! Geometric primitives for pathway diagrams.
//!
//! # Overview
//!
//! - [`Coordinate`] - A point in board space
//! - [`Size`] - Width and height, never negative
//! - [`Bounds`] - An axis aligned rectangle, used to derive group extents
//!
//! GPML boards use the screen convention: origin at the top-left corner, x
//! growing rightward and y growing downward.

/// A point in board coordinates.
///
/// # Examples
///
/// ```
/// # use gpml_core::geometry::Coordinate;
/// let p = Coordinate::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.with_y(5.0).y(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    x: f64,
    y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }
}

/// Width and height of a shaped element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a size.
    ///
    /// # Errors
    ///
    /// Returns an error when either dimension is negative or not a number.
    pub fn new(width: f64, height: f64) -> Result<Self, String> {
        if !(width >= 0.0) || !(height >= 0.0) {
            return Err(format!(
                "dimensions must be non-negative, got {width} x {height}"
            ));
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis aligned rectangle described by its minimum and maximum corners.
///
/// # Examples
///
/// ```
/// # use gpml_core::geometry::{Bounds, Coordinate, Size};
/// let a = Bounds::from_center(Coordinate::new(10.0, 10.0), Size::new(4.0, 4.0).unwrap());
/// let b = Bounds::from_center(Coordinate::new(20.0, 10.0), Size::new(2.0, 2.0).unwrap());
/// let merged = a.merge(&b);
/// assert_eq!(merged.min_x(), 8.0);
/// assert_eq!(merged.max_x(), 21.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Bounds of a rectangle centred on `center`.
    pub fn from_center(center: Coordinate, size: Size) -> Self {
        let half_w = size.width() / 2.0;
        let half_h = size.height() / 2.0;
        Self::new(
            center.x() - half_w,
            center.y() - half_h,
            center.x() + half_w,
            center.y() + half_h,
        )
    }

    /// Smallest bounds containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            let single = Bounds::new(p.x(), p.y(), p.x(), p.y());
            Some(match acc {
                Some(bounds) => bounds.merge(&single),
                None => single,
            })
        })
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.max_x - self.min_x,
            height: self.max_y - self.min_y,
        }
    }

    /// Returns the smallest bounds containing both rectangles.
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `padding` on every side.
    pub fn inflate(&self, padding: f64) -> Self {
        Self::new(
            self.min_x - padding,
            self.min_y - padding,
            self.max_x + padding,
            self.max_y + padding,
        )
    }
}
