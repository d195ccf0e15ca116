/// Axis-aligned rectangles and the handful of vector helpers the game needs.
use glam::Vec2;

/// Screen-space rectangle, `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis containment test against a `width` × `height` arena anchored at
/// the origin. Returns `(inside_x, inside_y)`.
pub fn bounds_check(rect: &Rect, width: f32, height: f32) -> (bool, bool) {
    let inside_x = !(rect.left() < 0.0 || width < rect.right());
    let inside_y = !(rect.top() < 0.0 || height < rect.bottom());
    (inside_x, inside_y)
}

/// Both axes of `rect` lie inside the arena.
pub fn in_arena(rect: &Rect, arena: Vec2) -> bool {
    bounds_check(rect, arena.x, arena.y) == (true, true)
}

/// At least part of `rect` is still over the arena.
pub fn overlaps_arena(rect: &Rect, arena: Vec2) -> bool {
    rect.intersects(&Rect::new(0.0, 0.0, arena.x, arena.y))
}

/// Unit vector from the centre of `origin` to the centre of `target`.
///
/// The result is NaN when both centres coincide; callers that cannot rule
/// that out must check `is_finite()`.
pub fn direction_to(origin: &Rect, target: &Rect) -> Vec2 {
    let diff = target.center() - origin.center();
    diff / diff.length()
}

/// Bounding box of an east-facing sprite of `size` once rotated to point
/// along the unit vector `direction`.
pub fn rotated_extent(size: Vec2, direction: Vec2) -> Vec2 {
    let (cos, sin) = (direction.x.abs(), direction.y.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
