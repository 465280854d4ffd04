//! Scene graph: an arena of rectangles, lines and layers.
//!
//! Every object lives in one arena owned by the [`Scene`]. A layer's child list holds ids (and
//! thereby owns its children); the parent link stored next to each object is a plain id used to
//! translate local coordinates to screen coordinates. Nothing is ever removed, so ids stay
//! valid for the lifetime of the scene.

pub(crate) mod layer;
pub(crate) mod line;
pub(crate) mod rectangle;

use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::color::Color;
use crate::foundation::core::Bounds;
use crate::foundation::error::{TileError, TileResult};
use crate::render::grid::DirtyGrid;
use crate::render::tile::{Tile, TilePool};

pub use layer::{Layer, LayerMut};
pub use line::{Line, LineMut};
pub use rectangle::{Rectangle, RectangleMut};

static NEXT_SCENE_TAG: AtomicU32 = AtomicU32::new(1);

/// Index of an object in a particular scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    scene: u32,
    index: u32,
}

impl NodeId {
    fn index(self) -> usize {
        self.index as usize
    }
}

/// Handle to a layer created by an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) NodeId);

/// Handle to a rectangle created by an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RectangleId(pub(crate) NodeId);

/// Handle to a line created by an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineId(pub(crate) NodeId);

/// The closed set of drawable things.
#[derive(Debug, Clone)]
pub(crate) enum Object {
    Rectangle(Rectangle),
    Line(Line),
    Layer(Layer),
}

impl Object {
    /// Bounding box in the parent's coordinate space, exclusive upper bound.
    pub(crate) fn bounding_box(&self) -> Bounds {
        match self {
            Self::Rectangle(r) => r.bounding_box(),
            Self::Line(l) => l.bounding_box(),
            Self::Layer(l) => l.bounding_box(),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>, // None for the root
    object: Object,
}

/// Object arena with the root layer at index 0.
#[derive(Debug)]
pub(crate) struct Scene {
    tag: u32,
    nodes: Vec<Node>,
}

impl Scene {
    pub(crate) fn new(root: Bounds, background: Color) -> Self {
        Self {
            tag: NEXT_SCENE_TAG.fetch_add(1, Ordering::Relaxed),
            nodes: vec![Node {
                parent: None,
                object: Object::Layer(Layer::new(root, background)),
            }],
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId {
            scene: self.tag,
            index: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> TileResult<&Node> {
        if id.scene != self.tag {
            return Err(TileError::scene("object handle belongs to a different engine"));
        }
        self.nodes
            .get(id.index())
            .ok_or_else(|| TileError::scene("object handle out of range"))
    }

    pub(crate) fn object(&self, id: NodeId) -> TileResult<&Object> {
        self.node(id).map(|n| &n.object)
    }

    pub(crate) fn object_mut(&mut self, id: NodeId) -> TileResult<&mut Object> {
        self.node(id)?;
        Ok(&mut self.nodes[id.index()].object)
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Append `object` to the child list of the layer `parent`.
    ///
    /// Fails without touching the arena when `parent` is not a layer of this scene.
    pub(crate) fn push(&mut self, parent: NodeId, object: Object) -> TileResult<NodeId> {
        let id = NodeId {
            scene: self.tag,
            index: u32::try_from(self.nodes.len())
                .map_err(|_| TileError::scene("too many objects in one scene"))?,
        };
        match self.object_mut(parent)? {
            Object::Layer(layer) => layer.children.push(id),
            _ => return Err(TileError::scene("children can only be added to layers")),
        }
        self.nodes.push(Node {
            parent: Some(parent),
            object,
        });
        Ok(id)
    }

    pub(crate) fn layer(&self, id: NodeId) -> Option<&Layer> {
        match self.object(id) {
            Ok(Object::Layer(l)) => Some(l),
            _ => None,
        }
    }

    pub(crate) fn layer_mut(&mut self, id: NodeId) -> Option<&mut Layer> {
        match self.object_mut(id) {
            Ok(Object::Layer(l)) => Some(l),
            _ => None,
        }
    }

    /// Screen position of the origin of `layer`'s coordinate space.
    ///
    /// `None` stands for the space the root layer itself is positioned in.
    pub(crate) fn origin_of(&self, mut layer: Option<NodeId>) -> (i32, i32) {
        let (mut x, mut y) = (0, 0);
        while let Some(id) = layer {
            let Some(node) = self.nodes.get(id.index()) else {
                break;
            };
            if let Object::Layer(l) = &node.object {
                x = l.rect.bounds.x1.saturating_add(x);
                y = l.rect.bounds.y1.saturating_add(y);
            }
            layer = node.parent;
        }
        (x, y)
    }

    /// Mark the tiles under `local` (in the parent space of `id`) as dirty.
    pub(crate) fn invalidate(&self, grid: &mut DirtyGrid, id: NodeId, local: Bounds) {
        let (dx, dy) = self.origin_of(self.parent(id));
        grid.invalidate(local.translate(dx, dy));
    }

    /// Paint `object` into `tile`, whose origin is `(tile_x, tile_y)` in the object's parent
    /// space.
    pub(crate) fn paint(
        &self,
        object: &Object,
        tile: &mut Tile,
        tile_x: i32,
        tile_y: i32,
        pool: &mut TilePool,
    ) {
        match object {
            Object::Rectangle(r) => r.paint(tile, tile_x, tile_y),
            Object::Line(l) => l.paint(tile, tile_x, tile_y),
            Object::Layer(l) => l.paint(self, tile, tile_x, tile_y, pool),
        }
    }

    /// Composite the whole tree into `tile`, whose origin is `(tile_x, tile_y)` on screen.
    pub(crate) fn paint_root(&self, tile: &mut Tile, tile_x: i32, tile_y: i32, pool: &mut TilePool) {
        if let Some(root) = self.layer(self.root()) {
            root.paint(self, tile, tile_x, tile_y, pool);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
