//! Placement geometry.
//!
//! Positions and sizes are opaque to propagation. The engine uses them
//! only for rectangle hit-testing of interactive components and for
//! handing socket anchor points to a render collaborator.

use crate::socket::SocketKind;

/// A point in board space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a component's body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Construct a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    /// 60 × 50, the standard body of every built-in component.
    fn default() -> Self {
        Self::new(60.0, 50.0)
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent from the origin.
    pub size: Size,
}

impl Rect {
    /// Construct a rectangle from its top-left corner and size.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Half-open containment: the left and top edges are inside,
    /// the right and bottom edges are not.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y < self.origin.y + self.size.height
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }
}

/// Where a component sits on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Top-left corner of the body.
    pub position: Point,
    /// Body size.
    pub size: Size,
}

impl Placement {
    /// A default-sized body at `(x, y)`.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            size: Size::default(),
        }
    }

    /// The body as a rectangle, used for hit-testing.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Anchor point of the `index`-th socket of `kind`.
    ///
    /// Inputs sit on the left edge and outputs on the right edge, the
    /// n-th of each stacked `spacing` units below the previous one,
    /// starting one `spacing` below the top.
    pub fn socket_anchor(&self, kind: SocketKind, index: usize, spacing: f32) -> Point {
        let x = match kind {
            SocketKind::Input => self.position.x,
            SocketKind::Output => self.position.x + self.size.width,
        };
        Point::new(x, self.position.y + (index as f32 + 1.0) * spacing)
    }
}
