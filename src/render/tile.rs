use crate::foundation::color::Color;
use crate::foundation::core::{TILE_PIXELS, TILE_SIZE};

/// One `TILE_SIZE x TILE_SIZE` block of pixels in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pixels: [Color; TILE_PIXELS],
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            pixels: [Color::TRANSPARENT; TILE_PIXELS],
        }
    }
}

impl Tile {
    #[inline]
    fn index(x: i32, y: i32) -> usize {
        debug_assert!(
            (0..TILE_SIZE).contains(&x) && (0..TILE_SIZE).contains(&y),
            "tile coordinate out of range: ({x}, {y})"
        );
        (y * TILE_SIZE + x) as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Color {
        self.pixels[Self::index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, c: Color) {
        self.pixels[Self::index(x, y)] = c;
    }

    pub fn fill(&mut self, c: Color) {
        self.pixels.fill(c);
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// One row of the tile.
    pub fn row(&self, y: i32) -> &[Color] {
        let start = Self::index(0, y);
        &self.pixels[start..start + TILE_SIZE as usize]
    }
}

/// Pool configuration for retained tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TilePoolOpts {
    /// Maximum number of free tiles kept around. Tiles returned beyond this are dropped.
    pub max_retained: usize,
}

impl Default for TilePoolOpts {
    fn default() -> Self {
        // One tile per nesting level is needed during a flush; 16 levels is plenty.
        Self { max_retained: 16 }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TilePoolStats {
    /// Tiles currently sitting in the free list.
    pub retained: usize,
    /// Tiles currently handed out.
    pub outstanding: usize,
    /// Tiles allocated over the pool's lifetime.
    pub allocated: u64,
    /// Tiles dropped on return because the free list was full.
    pub dropped_on_put: u64,
}

/// Free list of tile buffers.
///
/// A flush borrows one tile per layer nesting level and gives it back when that layer is done,
/// so after the first frame no allocation happens. A borrowed tile holds garbage from its
/// previous user and must be fully overwritten.
#[derive(Debug, Default)]
pub struct TilePool {
    opts: TilePoolOpts,
    stats: TilePoolStats,
    free: Vec<Box<Tile>>,
}

impl TilePool {
    pub fn new(opts: TilePoolOpts) -> Self {
        Self {
            opts,
            stats: TilePoolStats::default(),
            free: Vec::with_capacity(opts.max_retained),
        }
    }

    pub fn stats(&self) -> TilePoolStats {
        self.stats
    }

    /// Borrow a tile. Returns a previously freed one when available.
    pub fn get(&mut self) -> Box<Tile> {
        self.stats.outstanding = self.stats.outstanding.saturating_add(1);
        if let Some(t) = self.free.pop() {
            self.stats.retained = self.free.len();
            return t;
        }
        self.stats.allocated = self.stats.allocated.saturating_add(1);
        Box::default()
    }

    /// Give a tile back. The caller must not return the same tile twice.
    pub fn put(&mut self, tile: Box<Tile>) {
        self.stats.outstanding = self.stats.outstanding.saturating_sub(1);
        if self.free.len() >= self.opts.max_retained {
            self.stats.dropped_on_put = self.stats.dropped_on_put.saturating_add(1);
            return;
        }
        self.free.push(tile);
        self.stats.retained = self.free.len();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tile.rs"]
mod tests;
