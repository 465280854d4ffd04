//! The boundary between the engine and a physical (or simulated) screen.

pub(crate) mod image_display;
pub(crate) mod recording;

use crate::foundation::color::Color;
use crate::foundation::core::Size;
use crate::foundation::error::{TileError, TileResult};

/// A screen the engine can push tiles to.
///
/// Implementations may write through immediately or buffer until [`Display::flush`]. The
/// engine only ever calls [`Display::fill_rectangle_with_buffer`] (once per dirty tile) and
/// [`Display::flush`] (once per frame).
pub trait Display {
    /// Size in pixels. Must never change.
    fn size(&self) -> Size;

    /// Fill a rectangle with one color.
    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> TileResult<()>;

    /// Fill a rectangle from a row-major buffer of exactly `width * height` pixels.
    fn fill_rectangle_with_buffer(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        buffer: &[Color],
    ) -> TileResult<()>;

    /// Commit buffered writes, if the implementation buffers at all.
    fn flush(&mut self) -> TileResult<()> {
        Ok(())
    }
}

impl<D: Display + ?Sized> Display for &mut D {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> TileResult<()> {
        (**self).fill_rectangle(x, y, width, height, color)
    }

    fn fill_rectangle_with_buffer(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        buffer: &[Color],
    ) -> TileResult<()> {
        (**self).fill_rectangle_with_buffer(x, y, width, height, buffer)
    }

    fn flush(&mut self) -> TileResult<()> {
        (**self).flush()
    }
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> TileResult<()> {
        (**self).fill_rectangle(x, y, width, height, color)
    }

    fn fill_rectangle_with_buffer(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        buffer: &[Color],
    ) -> TileResult<()> {
        (**self).fill_rectangle_with_buffer(x, y, width, height, buffer)
    }

    fn flush(&mut self) -> TileResult<()> {
        (**self).flush()
    }
}

/// Check that `buffer` holds exactly `width * height` pixels.
pub fn check_buffer_len(width: u32, height: u32, buffer: &[Color]) -> TileResult<()> {
    let expected = (width as usize).saturating_mul(height as usize);
    if buffer.len() != expected {
        return Err(TileError::buffer_size_mismatch(expected, buffer.len()));
    }
    Ok(())
}
