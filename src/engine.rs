use crate::display::Display;
use crate::foundation::color::Color;
use crate::foundation::core::{Bounds, Size, TILE_SIZE};
use crate::foundation::error::{TileError, TileResult};
use crate::render::grid::DirtyGrid;
use crate::render::tile::{Tile, TilePool, TilePoolOpts, TilePoolStats};
use crate::scene::{
    LayerId, LayerMut, LineId, LineMut, Object, RectangleId, RectangleMut, Scene,
};

/// Engine construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineOpts {
    /// Background of the root layer. The alpha channel is ignored.
    pub background: Color,
    pub pool: TilePoolOpts,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            pool: TilePoolOpts::default(),
        }
    }
}

/// What one [`Engine::flush`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Tiles repainted and written successfully.
    pub tiles_drawn: usize,
    /// Tiles whose write failed; they stay dirty.
    pub tiles_failed: usize,
}

/// Tile-based partial-redraw renderer for one display.
///
/// Build a scene with the `new_*` factories, change it through the handles returned by
/// [`Engine::layer`], [`Engine::rectangle`] and [`Engine::line`], then call [`Engine::flush`]
/// to send exactly the tiles that changed. Mutations are cheap: they only mark tiles dirty.
/// It pays to batch many changes into one flush.
#[derive(Debug)]
pub struct Engine<D: Display> {
    display: D,
    size: Size,
    grid: DirtyGrid,
    scene: Scene,
    pool: TilePool,
    /// Staging buffer for partial tiles on the right and bottom edge.
    edge: Vec<Color>,
}

impl<D: Display> Engine<D> {
    pub fn new(display: D) -> Self {
        Self::with_opts(display, EngineOpts::default())
    }

    pub fn with_opts(display: D, opts: EngineOpts) -> Self {
        let size = display.size();
        let root = Bounds::from_xywh(
            0,
            0,
            i32::try_from(size.width).unwrap_or(i32::MAX),
            i32::try_from(size.height).unwrap_or(i32::MAX),
        );
        tracing::debug!(width = size.width, height = size.height, "engine created");
        Self {
            display,
            size,
            grid: DirtyGrid::new(size),
            scene: Scene::new(root, opts.background.opaque()),
            pool: TilePool::new(opts.pool),
            edge: Vec::with_capacity((TILE_SIZE * TILE_SIZE) as usize),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Direct access to the display. Anything drawn through it is overwritten by later flushes
    /// of the same tiles; call [`Engine::invalidate_all`] to repaint everything.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// The layer spanning the whole display.
    pub fn root(&self) -> LayerId {
        LayerId(self.scene.root())
    }

    fn root_layer(&mut self) -> LayerMut<'_> {
        LayerMut {
            id: self.scene.root(),
            scene: &mut self.scene,
            grid: &mut self.grid,
        }
    }

    /// Set the display background. It is always painted fully opaque.
    pub fn set_background_color(&mut self, color: Color) {
        self.root_layer().set_background_color(color.opaque());
    }

    pub fn new_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> TileResult<RectangleId> {
        self.root_layer().new_rectangle(x, y, width, height, color)
    }

    pub fn new_layer(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        background: Color,
    ) -> TileResult<LayerId> {
        self.root_layer().new_layer(x, y, width, height, background)
    }

    pub fn new_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> TileResult<LineId> {
        self.root_layer().new_line(x1, y1, x2, y2, color)
    }

    pub fn layer(&mut self, id: LayerId) -> TileResult<LayerMut<'_>> {
        if self.scene.layer(id.0).is_none() {
            self.scene.object(id.0)?;
            return Err(TileError::scene("handle does not refer to a layer"));
        }
        Ok(LayerMut {
            scene: &mut self.scene,
            grid: &mut self.grid,
            id: id.0,
        })
    }

    pub fn rectangle(&mut self, id: RectangleId) -> TileResult<RectangleMut<'_>> {
        let origin = self.scene.origin_of(self.scene.parent(id.0));
        match self.scene.object_mut(id.0)? {
            Object::Rectangle(rect) => Ok(RectangleMut {
                rect,
                grid: &mut self.grid,
                origin,
            }),
            _ => Err(TileError::scene("handle does not refer to a rectangle")),
        }
    }

    pub fn line(&mut self, id: LineId) -> TileResult<LineMut<'_>> {
        let origin = self.scene.origin_of(self.scene.parent(id.0));
        match self.scene.object_mut(id.0)? {
            Object::Line(line) => Ok(LineMut {
                line,
                grid: &mut self.grid,
                origin,
            }),
            _ => Err(TileError::scene("handle does not refer to a line")),
        }
    }

    /// Mark every tile dirty, e.g. after the physical screen lost its contents.
    pub fn invalidate_all(&mut self) {
        self.grid.invalidate_all();
    }

    /// Number of tiles the next flush will repaint.
    pub fn dirty_tile_count(&self) -> usize {
        self.grid.dirty_count()
    }

    /// Number of objects in the scene, root layer included.
    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    pub fn pool_stats(&self) -> TilePoolStats {
        self.pool.stats()
    }

    /// Repaint every dirty tile and send it to the display, then flush the display once.
    ///
    /// Tiles are visited row by row. A failed tile write does not stop the loop: the tile stays
    /// dirty so the next flush retries it, and the first error is returned once all tiles and
    /// the display flush have been attempted.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn flush(&mut self) -> TileResult<FlushStats> {
        let Self {
            display,
            size,
            grid,
            scene,
            pool,
            edge,
        } = self;

        let mut stats = FlushStats::default();
        let mut first_err: Option<TileError> = None;
        let mut tile = pool.get();

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if grid.is_clean(col, row) {
                    continue;
                }

                let x = col * TILE_SIZE;
                let y = row * TILE_SIZE;
                // A translucent root background blends over black.
                tile.fill(Color::BLACK);
                scene.paint_root(&mut tile, x, y, pool);

                match write_tile(display, edge, *size, &tile, x, y) {
                    Ok(()) => {
                        grid.mark_clean(col, row);
                        stats.tiles_drawn += 1;
                    }
                    Err(err) => {
                        tracing::warn!(x, y, error = %err, "tile write failed");
                        stats.tiles_failed += 1;
                        first_err.get_or_insert(err);
                    }
                }
            }
        }
        pool.put(tile);

        tracing::debug!(
            tiles_drawn = stats.tiles_drawn,
            tiles_failed = stats.tiles_failed,
            "flushed tiles"
        );

        let flushed = display.flush();
        match first_err {
            Some(err) => {
                if let Err(flush_err) = flushed {
                    tracing::warn!(error = %flush_err, "display flush failed");
                }
                Err(err)
            }
            None => flushed.map(|()| stats),
        }
    }
}

/// Send one tile, cropping it when it hangs over the display edge.
fn write_tile<D: Display>(
    display: &mut D,
    edge: &mut Vec<Color>,
    size: Size,
    tile: &Tile,
    x: i32,
    y: i32,
) -> TileResult<()> {
    let width = (i64::from(size.width) - i64::from(x)).clamp(0, i64::from(TILE_SIZE)) as u32;
    let height = (i64::from(size.height) - i64::from(y)).clamp(0, i64::from(TILE_SIZE)) as u32;

    if width == TILE_SIZE as u32 && height == TILE_SIZE as u32 {
        return display.fill_rectangle_with_buffer(x, y, width, height, tile.pixels());
    }

    edge.clear();
    for row in 0..height as i32 {
        edge.extend_from_slice(&tile.row(row)[..width as usize]);
    }
    display.fill_rectangle_with_buffer(x, y, width, height, edge)
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
