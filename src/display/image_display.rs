use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{Display, check_buffer_len};
use crate::foundation::color::Color;
use crate::foundation::core::Size;
use crate::foundation::error::TileResult;

/// A screen backed by an in-memory RGBA image.
///
/// Writes go straight into the image and are clipped to it, so [`Display::flush`] is a no-op.
/// Useful for tests and for rendering scenes to PNG.
#[derive(Debug, Clone)]
pub struct ImageDisplay {
    image: RgbaImage,
}

impl ImageDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Color at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::from_array(p.0))
    }

    /// Write the current contents as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> TileResult<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn put(&mut self, x: i64, y: i64, c: Color) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            *p = Rgba(c.to_array());
        }
    }
}

impl Display for ImageDisplay {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> TileResult<()> {
        for py in 0..i64::from(height) {
            for px in 0..i64::from(width) {
                self.put(i64::from(x) + px, i64::from(y) + py, color);
            }
        }
        Ok(())
    }

    fn fill_rectangle_with_buffer(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        buffer: &[Color],
    ) -> TileResult<()> {
        check_buffer_len(width, height, buffer)?;
        if width == 0 {
            return Ok(());
        }
        for (row, line) in buffer.chunks_exact(width as usize).enumerate() {
            for (col, c) in line.iter().enumerate() {
                self.put(i64::from(x) + col as i64, i64::from(y) + row as i64, *c);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/image_display.rs"]
mod tests;
