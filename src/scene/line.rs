use crate::foundation::color::{Color, apply_alpha, blend};
use crate::foundation::core::{Bounds, TILE_SIZE, clamp_coord};
use crate::render::grid::DirtyGrid;
use crate::render::tile::Tile;

const TILE: i64 = TILE_SIZE as i64;

/// An antialiased one-pixel line between two inclusive endpoints.
///
/// The endpoints are stored with `x1 <= x2`; the y coordinates may be in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub(crate) x1: i32,
    pub(crate) y1: i32,
    pub(crate) x2: i32,
    pub(crate) y2: i32,
    pub(crate) color: Color,
}

impl Line {
    /// Endpoints are clamped to [`COORD_LIMIT`](crate::COORD_LIMIT).
    pub(crate) fn new(x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Self {
        let (x1, y1, x2, y2) = (
            clamp_coord(x1),
            clamp_coord(y1),
            clamp_coord(x2),
            clamp_coord(y2),
        );
        if x1 > x2 {
            Self {
                x1: x2,
                y1: y2,
                x2: x1,
                y2: y1,
                color,
            }
        } else {
            Self {
                x1,
                y1,
                x2,
                y2,
                color,
            }
        }
    }

    /// Box around both endpoints, converted to the exclusive convention.
    ///
    /// A diagonal line covers far fewer pixels than this.
    pub(crate) fn bounding_box(&self) -> Bounds {
        let (y1, y2) = if self.y1 > self.y2 {
            (self.y2, self.y1)
        } else {
            (self.y1, self.y2)
        };
        Bounds::new(
            self.x1,
            y1,
            self.x2.saturating_add(1),
            y2.saturating_add(1),
        )
    }

    // Tile-relative math runs in i64: the tile origin of a deeply nested layer can sit anywhere
    // in the i32 range.
    pub(crate) fn paint(&self, tile: &mut Tile, tile_x: i32, tile_y: i32) {
        let (tx, ty) = (i64::from(tile_x), i64::from(tile_y));
        if self.x1 == self.x2 {
            let (y1, y2) = if self.y1 > self.y2 {
                (self.y2, self.y1)
            } else {
                (self.y1, self.y2)
            };
            let x = i64::from(self.x1) - tx;
            if !(0..TILE).contains(&x) {
                return;
            }
            let y1 = (i64::from(y1) - ty).max(0);
            let y2 = (i64::from(y2) - ty).min(TILE - 1);
            for y in y1..=y2 {
                self.paint_solid(tile, x, y);
            }
        } else if self.y1 == self.y2 {
            let y = i64::from(self.y1) - ty;
            if !(0..TILE).contains(&y) {
                return;
            }
            let x1 = (i64::from(self.x1) - tx).max(0);
            let x2 = (i64::from(self.x2) - tx).min(TILE - 1);
            for x in x1..=x2 {
                self.paint_solid(tile, x, y);
            }
        } else {
            self.paint_wu(tile, tx, ty);
        }
    }

    /// `x` and `y` must lie inside the tile.
    #[inline]
    fn paint_solid(&self, tile: &mut Tile, x: i64, y: i64) {
        let (x, y) = (x as i32, y as i32);
        if self.color.is_opaque() {
            tile.set(x, y, self.color);
        } else {
            tile.set(x, y, blend(tile.get(x, y), self.color));
        }
    }

    /// Wu's antialiasing, restricted to one tile.
    ///
    /// The minor-axis position is recomputed from the step index at every step instead of
    /// accumulated, so the walk can start at any offset into the line and still hit the same
    /// pixels as a walk from the real start point.
    fn paint_wu(&self, tile: &mut Tile, tile_x: i64, tile_y: i64) {
        let mut x1 = i64::from(self.x1) - tile_x;
        let mut x2 = i64::from(self.x2) - tile_x;
        let mut y1 = i64::from(self.y1) - tile_y;
        let mut y2 = i64::from(self.y2) - tile_y;

        let width = x2 - x1;
        let height = (y2 - y1).abs();

        if width > height {
            // Mostly horizontal. Q16 fixed-point y step per x step.
            let y_inc_q16 = ((y2 - y1) << 16) / width;
            let x_start = x1;
            for x in x1.max(0)..=x2.min(TILE - 1) {
                let y_q16 = (x - x_start) * y_inc_q16;
                let y = y1 + (y_q16 >> 16);
                let frac = (y_q16 >> 8) as u8;
                self.paint_pixel(tile, x, y, 255 - frac);
                self.paint_pixel(tile, x, y + 1, frac);
            }
        } else {
            // Mostly vertical: walk downwards.
            if y1 > y2 {
                std::mem::swap(&mut y1, &mut y2);
                std::mem::swap(&mut x1, &mut x2);
            }
            let x_inc_q16 = ((x2 - x1) << 16) / (y2 - y1);
            let y_start = y1;
            for y in y1.max(0)..=y2.min(TILE - 1) {
                let x_q16 = (y - y_start) * x_inc_q16;
                let x = x1 + (x_q16 >> 16);
                let frac = (x_q16 >> 8) as u8;
                self.paint_pixel(tile, x, y, 255 - frac);
                self.paint_pixel(tile, x + 1, y, frac);
            }
        }
    }

    #[inline]
    fn paint_pixel(&self, tile: &mut Tile, x: i64, y: i64, weight: u8) {
        if weight == 0 || !(0..TILE).contains(&x) || !(0..TILE).contains(&y) {
            return;
        }
        let (x, y) = (x as i32, y as i32);
        tile.set(x, y, blend(tile.get(x, y), apply_alpha(self.color, weight)));
    }
}

/// Mutable access to one line. Every change marks the affected tiles dirty.
#[derive(Debug)]
pub struct LineMut<'a> {
    pub(crate) line: &'a mut Line,
    pub(crate) grid: &'a mut DirtyGrid,
    /// Screen position of the parent layer's origin.
    pub(crate) origin: (i32, i32),
}

impl LineMut<'_> {
    // Whole bounding box, not just the tiles the line crosses.
    fn invalidate(&mut self) {
        let b = self.line.bounding_box();
        self.grid
            .invalidate(b.translate(self.origin.0, self.origin.1));
    }

    /// Endpoints as stored, left point first.
    pub fn endpoints(&self) -> ((i32, i32), (i32, i32)) {
        ((self.line.x1, self.line.y1), (self.line.x2, self.line.y2))
    }

    pub fn color(&self) -> Color {
        self.line.color
    }

    /// Move both endpoints. The order of the points does not matter.
    pub fn move_to(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.invalidate();
        *self.line = Line::new(x1, y1, x2, y2, self.line.color);
        self.invalidate();
    }

    pub fn set_color(&mut self, color: Color) {
        if self.line.color == color {
            return;
        }
        self.line.color = color;
        self.invalidate();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/line.rs"]
mod tests;
