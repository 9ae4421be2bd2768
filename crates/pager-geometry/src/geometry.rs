//! Geometric primitives: Point, Size, Rect

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// True when either dimension is zero, negative, or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Size of a strip of `count` pages laid side by side.
    pub fn strip(&self, count: usize) -> Size {
        Size {
            width: self.width * count as f32,
            height: self.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::from_origin_size(Point::ZERO, size)
    }

    /// Frame of page `index` in a horizontal strip of `page_size` pages.
    pub fn page_slot(index: usize, page_size: Size) -> Self {
        Self {
            x: index as f32 * page_size.width,
            y: 0.0,
            width: page_size.width,
            height: page_size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
