use std::collections::BTreeSet;

use super::Display;
use super::image_display::ImageDisplay;
use crate::foundation::color::Color;
use crate::foundation::core::{Bounds, Size};
use crate::foundation::error::{TileError, TileResult};

/// A display wrapper that records every write and can inject failures.
///
/// Meant for tests and debugging: it tells exactly which regions a flush sent to the screen.
#[derive(Debug)]
pub struct RecordingDisplay<D = ImageDisplay> {
    inner: D,
    writes: Vec<Bounds>,
    flushes: u64,
    fail_once: BTreeSet<(i32, i32)>,
    fail_flush: bool,
}

impl RecordingDisplay<ImageDisplay> {
    /// Record writes into a fresh in-memory image.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(ImageDisplay::new(width, height))
    }
}

impl<D: Display> RecordingDisplay<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            writes: Vec::new(),
            flushes: 0,
            fail_once: BTreeSet::new(),
            fail_flush: false,
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }

    /// Regions written with buffer fills, in call order.
    pub fn writes(&self) -> &[Bounds] {
        &self.writes
    }

    /// Forget the recorded writes.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Make the next buffer fill whose origin is `(x, y)` fail with an I/O error.
    pub fn fail_next_write_at(&mut self, x: i32, y: i32) {
        self.fail_once.insert((x, y));
    }

    /// Make every [`Display::flush`] call fail until reset.
    pub fn set_fail_flush(&mut self, fail: bool) {
        self.fail_flush = fail;
    }
}

impl<D: Display> Display for RecordingDisplay<D> {
    fn size(&self) -> Size {
        self.inner.size()
    }

    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> TileResult<()> {
        self.inner.fill_rectangle(x, y, width, height, color)
    }

    fn fill_rectangle_with_buffer(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        buffer: &[Color],
    ) -> TileResult<()> {
        if self.fail_once.remove(&(x, y)) {
            return Err(TileError::Io(std::io::Error::other(format!(
                "injected write failure at ({x}, {y})"
            ))));
        }
        self.inner
            .fill_rectangle_with_buffer(x, y, width, height, buffer)?;
        self.writes.push(Bounds::from_xywh(
            x,
            y,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        ));
        Ok(())
    }

    fn flush(&mut self) -> TileResult<()> {
        self.flushes += 1;
        if self.fail_flush {
            return Err(TileError::Io(std::io::Error::other(
                "injected flush failure",
            )));
        }
        self.inner.flush()
    }
}
