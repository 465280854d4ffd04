use super::line::Line;
use super::rectangle::{Rectangle, move_damage};
use super::{LayerId, LineId, NodeId, Object, RectangleId, Scene};
use crate::foundation::color::{Color, blend};
use crate::foundation::core::Bounds;
use crate::foundation::error::TileResult;
use crate::render::grid::DirtyGrid;
use crate::render::tile::{Tile, TilePool};

/// A container that clips its children to its own rectangle and composites them over its
/// background color.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Position, size and background of the layer itself, in the parent's space.
    pub(crate) rect: Rectangle,
    /// Paint order: later entries are drawn on top.
    pub(crate) children: Vec<NodeId>,
}

impl Layer {
    pub(crate) fn new(bounds: Bounds, background: Color) -> Self {
        Self {
            rect: Rectangle::new(bounds, background),
            children: Vec::new(),
        }
    }

    pub(crate) fn bounding_box(&self) -> Bounds {
        self.rect.bounds
    }

    /// Composite this layer into `tile`, whose origin is `(tile_x, tile_y)` in the parent space.
    pub(crate) fn paint(
        &self,
        scene: &Scene,
        tile: &mut Tile,
        tile_x: i32,
        tile_y: i32,
        pool: &mut TilePool,
    ) {
        let mut sub = pool.get();
        // Blending with the parent happens below, not here.
        sub.fill(self.rect.color);

        let local_x = tile_x.saturating_sub(self.rect.bounds.x1);
        let local_y = tile_y.saturating_sub(self.rect.bounds.y1);
        let window = Bounds::tile_at(local_x, local_y);

        for &child in &self.children {
            let Ok(object) = scene.object(child) else {
                continue;
            };
            if !object.bounding_box().overlaps(window) {
                continue;
            }
            scene.paint(object, &mut sub, local_x, local_y, pool);
        }

        // Only the part of the tile inside this layer may reach the parent.
        let visible = Bounds::new(0, 0, self.rect.bounds.width(), self.rect.bounds.height())
            .translate(local_x.saturating_neg(), local_y.saturating_neg())
            .intersect(Bounds::tile_at(0, 0));

        if !visible.is_empty() {
            if self.rect.color.is_opaque() {
                for y in visible.y1..visible.y2 {
                    for x in visible.x1..visible.x2 {
                        tile.set(x, y, sub.get(x, y));
                    }
                }
            } else {
                for y in visible.y1..visible.y2 {
                    for x in visible.x1..visible.x2 {
                        tile.set(x, y, blend(tile.get(x, y), sub.get(x, y)));
                    }
                }
            }
        }

        pool.put(sub);
    }
}

/// Mutable access to one layer: move it, recolor it, and add children to it.
///
/// Every change marks the affected tiles dirty; nothing is drawn until
/// [`Engine::flush`](crate::Engine::flush).
#[derive(Debug)]
pub struct LayerMut<'a> {
    pub(crate) scene: &'a mut Scene,
    pub(crate) grid: &'a mut DirtyGrid,
    pub(crate) id: NodeId,
}

impl LayerMut<'_> {
    pub fn id(&self) -> LayerId {
        LayerId(self.id)
    }

    fn layer(&self) -> Option<&Layer> {
        self.scene.layer(self.id)
    }

    /// Position and size in the parent layer's coordinates.
    pub fn bounds(&self) -> Bounds {
        self.layer().map(|l| l.rect.bounds).unwrap_or_default()
    }

    pub fn background_color(&self) -> Color {
        self.layer().map(|l| l.rect.color).unwrap_or_default()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.layer().map_or(0, |l| l.children.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_background_color(&mut self, color: Color) {
        let Some(layer) = self.scene.layer_mut(self.id) else {
            return;
        };
        if layer.rect.color == color {
            return;
        }
        layer.rect.color = color;
        let bounds = layer.rect.bounds;
        self.scene.invalidate(self.grid, self.id, bounds);
    }

    /// Move and/or resize the layer.
    ///
    /// When the origin changes every descendant shifts on screen, so the whole old extent is
    /// invalidated. A pure resize only invalidates the strips that appear or disappear.
    pub fn move_to(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let Some(layer) = self.scene.layer(self.id) else {
            return;
        };
        let old = layer.rect.bounds;
        let new = Bounds::from_xywh(x, y, width, height);
        let (dx, dy) = self.scene.origin_of(self.scene.parent(self.id));

        if new.x1 != old.x1 || new.y1 != old.y1 {
            self.grid.invalidate(old.translate(dx, dy));
        }
        let grid = &mut *self.grid;
        move_damage(old, new, |b| grid.invalidate(b.translate(dx, dy)));

        if let Some(layer) = self.scene.layer_mut(self.id) {
            layer.rect.bounds = new;
        }
    }

    /// Reborrow as a handle to the direct child layer `id`.
    pub(crate) fn child(&mut self, id: LayerId) -> LayerMut<'_> {
        LayerMut {
            scene: &mut *self.scene,
            grid: &mut *self.grid,
            id: id.0,
        }
    }

    fn add(&mut self, object: Object) -> TileResult<NodeId> {
        let bounds = object.bounding_box();
        let id = self.scene.push(self.id, object)?;
        self.scene.invalidate(self.grid, id, bounds);
        Ok(id)
    }

    /// Add a rectangle on top of the existing children. Coordinates are relative to this layer.
    pub fn new_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> TileResult<RectangleId> {
        let rect = Rectangle::new(Bounds::from_xywh(x, y, width, height), color);
        self.add(Object::Rectangle(rect)).map(RectangleId)
    }

    /// Add a nested layer on top of the existing children.
    pub fn new_layer(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        background: Color,
    ) -> TileResult<LayerId> {
        let layer = Layer::new(Bounds::from_xywh(x, y, width, height), background);
        self.add(Object::Layer(layer)).map(LayerId)
    }

    /// Add an antialiased line. Both endpoints are inclusive and may be given in any order.
    pub fn new_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> TileResult<LineId> {
        self.add(Object::Line(Line::new(x1, y1, x2, y2, color))).map(LineId)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;
