/// Edge length, in pixels, of one tile.
///
/// All dirty tracking and compositing happens at this granularity. A tile takes up
/// `TILE_SIZE * TILE_SIZE * 4` bytes while it is being rendered.
pub const TILE_SIZE: i32 = 8;

/// Number of pixels in one tile.
pub const TILE_PIXELS: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// Largest magnitude an object coordinate can have.
///
/// Positions, sizes and line endpoints passed to the engine are clamped to
/// `[-COORD_LIMIT, COORD_LIMIT]`, which leaves room for layer offsets and tile arithmetic
/// without overflowing `i32`.
pub const COORD_LIMIT: i32 = 1 << 24;

/// Clamp one coordinate to `[-COORD_LIMIT, COORD_LIMIT]`.
#[inline]
pub(crate) fn clamp_coord(v: i32) -> i32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Display dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Axis-aligned box `[x1, x2) x [y1, y2)` in some object's parent coordinate space.
///
/// The upper bounds are exclusive, so `(2, 2, 3, 4)` covers exactly two pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32, // exclusive
    pub y2: i32, // exclusive
}

impl Bounds {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a box from an origin and a size. Negative sizes collapse to zero and both corners
    /// are clamped to [`COORD_LIMIT`].
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: clamp_coord(x),
            y1: clamp_coord(y),
            x2: clamp_coord(x.saturating_add(width.max(0))),
            y2: clamp_coord(y.saturating_add(height.max(0))),
        }
    }

    pub fn width(self) -> i32 {
        self.x2.saturating_sub(self.x1).max(0)
    }

    pub fn height(self) -> i32 {
        self.y2.saturating_sub(self.y1).max(0)
    }

    /// Return `true` when the box covers no pixels.
    pub fn is_empty(self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Half-open overlap test: boxes that only share an edge do not overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Shift the box. Saturates at the `i32` range instead of wrapping.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
            x2: self.x2.saturating_add(dx),
            y2: self.y2.saturating_add(dy),
        }
    }

    /// Intersection of two boxes. The result may be empty.
    pub fn intersect(self, other: Self) -> Self {
        Self {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
    }

    /// The tile window `[x, x+TILE_SIZE) x [y, y+TILE_SIZE)`.
    pub fn tile_at(x: i32, y: i32) -> Self {
        Self::new(
            x,
            y,
            x.saturating_add(TILE_SIZE),
            y.saturating_add(TILE_SIZE),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
