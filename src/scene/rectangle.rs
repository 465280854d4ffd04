use crate::foundation::color::{Color, blend};
use crate::foundation::core::Bounds;
use crate::render::grid::DirtyGrid;
use crate::render::tile::Tile;

/// A solid (possibly translucent) rectangle.
///
/// Also serves as the background descriptor of a [`Layer`](super::Layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub(crate) bounds: Bounds,
    pub(crate) color: Color,
}

impl Rectangle {
    pub(crate) fn new(bounds: Bounds, color: Color) -> Self {
        Self { bounds, color }
    }

    pub(crate) fn bounding_box(&self) -> Bounds {
        self.bounds
    }

    /// Paint into `tile`, whose origin sits at `(tile_x, tile_y)` in this rectangle's parent
    /// space. Translucent colors blend with what is already in the tile.
    pub(crate) fn paint(&self, tile: &mut Tile, tile_x: i32, tile_y: i32) {
        let area = self
            .bounds
            .translate(tile_x.saturating_neg(), tile_y.saturating_neg())
            .intersect(Bounds::tile_at(0, 0));
        if area.is_empty() {
            return;
        }

        if self.color.is_opaque() {
            for y in area.y1..area.y2 {
                for x in area.x1..area.x2 {
                    tile.set(x, y, self.color);
                }
            }
        } else {
            for y in area.y1..area.y2 {
                for x in area.x1..area.x2 {
                    tile.set(x, y, blend(tile.get(x, y), self.color));
                }
            }
        }
    }
}

/// Report the area that changes when a box moves from `old` to `new`.
///
/// Disjoint boxes are reported whole. Overlapping boxes only report the pixels in exactly one
/// of them, as up to four strips: left and right strips inside the shared vertical band, plus a
/// top and a bottom strip. The stable interior is never reported.
pub(crate) fn move_damage(old: Bounds, new: Bounds, mut damage: impl FnMut(Bounds)) {
    if new.x1 > old.x2 || new.y1 > old.y2 || new.x2 < old.x1 || new.y2 < old.y1 {
        damage(old);
        damage(new);
        return;
    }

    let max_y1 = old.y1.max(new.y1);
    let min_y2 = old.y2.min(new.y2);

    if new.x1 != old.x1 {
        damage(Bounds::new(
            new.x1.min(old.x1),
            max_y1,
            new.x1.max(old.x1),
            min_y2,
        ));
    }
    if new.x2 != old.x2 {
        damage(Bounds::new(
            new.x2.min(old.x2),
            max_y1,
            new.x2.max(old.x2),
            min_y2,
        ));
    }
    if new.y1 > old.y1 {
        damage(Bounds::new(old.x1, old.y1, old.x2, new.y1));
    } else if new.y1 < old.y1 {
        damage(Bounds::new(new.x1, new.y1, new.x2, old.y1));
    }
    if new.y2 > old.y2 {
        damage(Bounds::new(new.x1, old.y2, new.x2, new.y2));
    } else if new.y2 < old.y2 {
        damage(Bounds::new(old.x1, new.y2, old.x2, old.y2));
    }
}

/// Mutable access to one rectangle. Every change marks the affected tiles dirty.
#[derive(Debug)]
pub struct RectangleMut<'a> {
    pub(crate) rect: &'a mut Rectangle,
    pub(crate) grid: &'a mut DirtyGrid,
    /// Screen position of the parent layer's origin.
    pub(crate) origin: (i32, i32),
}

impl RectangleMut<'_> {
    fn invalidate(&mut self, local: Bounds) {
        self.grid
            .invalidate(local.translate(self.origin.0, self.origin.1));
    }

    /// Current position and size, in the parent layer's coordinates.
    pub fn bounds(&self) -> Bounds {
        self.rect.bounds
    }

    pub fn color(&self) -> Color {
        self.rect.color
    }

    /// Move and/or resize. Only the area that actually changes is invalidated.
    pub fn move_to(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let old = self.rect.bounds;
        let new = Bounds::from_xywh(x, y, width, height);
        let (dx, dy) = self.origin;
        let grid = &mut *self.grid;
        move_damage(old, new, |b| grid.invalidate(b.translate(dx, dy)));
        self.rect.bounds = new;
    }

    pub fn set_color(&mut self, color: Color) {
        if self.rect.color == color {
            return;
        }
        self.rect.color = color;
        self.invalidate(self.rect.bounds);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rectangle.rs"]
mod tests;
