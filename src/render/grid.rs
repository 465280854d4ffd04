use crate::foundation::core::{Bounds, Size, TILE_SIZE};

/// Per-tile "clean" flags for the whole display.
///
/// A flag is `false` whenever any pixel of that tile may be stale. It only turns `true` right
/// after the tile has been repainted and written to the display.
#[derive(Debug, Clone)]
pub struct DirtyGrid {
    cols: i32,
    rows: i32,
    clean: Vec<bool>,
}

impl DirtyGrid {
    /// Create a grid covering `size`, with every tile dirty.
    ///
    /// Partial tiles on the right and bottom edge get their own cell.
    pub fn new(size: Size) -> Self {
        let cols = tiles_for(size.width);
        let rows = tiles_for(size.height);
        Self {
            cols,
            rows,
            clean: vec![false; (cols as usize) * (rows as usize)],
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> usize {
        (row * self.cols + col) as usize
    }

    pub fn is_clean(&self, col: i32, row: i32) -> bool {
        self.clean[self.index(col, row)]
    }

    pub fn mark_clean(&mut self, col: i32, row: i32) {
        let i = self.index(col, row);
        self.clean[i] = true;
    }

    pub fn dirty_count(&self) -> usize {
        self.clean.iter().filter(|c| !**c).count()
    }

    pub fn invalidate_all(&mut self) {
        self.clean.fill(false);
    }

    /// Mark every tile touched by `abs` (absolute screen coordinates) as dirty.
    pub fn invalidate(&mut self, abs: Bounds) {
        if abs.is_empty() {
            return;
        }

        let col1 = abs.x1.div_euclid(TILE_SIZE).max(0);
        let row1 = abs.y1.div_euclid(TILE_SIZE).max(0);
        let col2 = ceil_div(abs.x2).min(self.cols);
        let row2 = ceil_div(abs.y2).min(self.rows);

        if col1 >= col2 || row1 >= row2 {
            return;
        }

        tracing::trace!(col1, row1, col2, row2, "invalidate tiles");

        for row in row1..row2 {
            let start = self.index(col1, row);
            let end = self.index(col2, row);
            self.clean[start..end].fill(false);
        }
    }
}

fn tiles_for(pixels: u32) -> i32 {
    let pixels = i32::try_from(pixels).unwrap_or(i32::MAX);
    ceil_div(pixels).max(0)
}

#[inline]
fn ceil_div(v: i32) -> i32 {
    v.div_euclid(TILE_SIZE) + i32::from(v.rem_euclid(TILE_SIZE) != 0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
