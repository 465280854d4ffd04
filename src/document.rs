use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::display::Display;
use crate::display::image_display::ImageDisplay;
use crate::engine::Engine;
use crate::foundation::color::Color;
use crate::foundation::core::COORD_LIMIT;
use crate::foundation::error::{TileError, TileResult};
use crate::scene::LayerMut;

/// Largest accepted document width or height, in pixels.
const MAX_DIMENSION: u32 = 16_384;
/// Deepest accepted layer nesting.
const MAX_DEPTH: usize = 32;

/// JSON-facing description of a static scene.
///
/// ```json
/// {
///   "width": 64, "height": 32,
///   "background": { "r": 0, "g": 0, "b": 64 },
///   "objects": [
///     { "kind": "rect", "x": 2, "y": 2, "width": 10, "height": 6, "color": { "r": 255, "g": 255, "b": 0 } },
///     { "kind": "layer", "x": 20, "y": 4, "width": 30, "height": 20, "background": { "r": 40, "g": 40, "b": 40 },
///       "children": [ { "kind": "line", "x1": 0, "y1": 0, "x2": 29, "y2": 19, "color": { "r": 255, "g": 255, "b": 255 } } ] }
///   ]
/// }
/// ```
///
/// Colors omit `a` to mean fully opaque. Coordinates of children are relative to the enclosing
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

/// One object in a [`SceneDocument`], in paint order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ObjectDesc {
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    },
    Layer {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        background: Color,
        #[serde(default)]
        children: Vec<ObjectDesc>,
    },
}

fn default_background() -> Color {
    Color::BLACK
}

impl SceneDocument {
    /// Parse and validate a document from JSON text.
    pub fn from_json_str(s: &str) -> TileResult<Self> {
        let doc: Self = serde_json::from_str(s)
            .map_err(|e| TileError::scene(format!("parse scene JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TileResult<Self> {
        let doc: Self = serde_json::from_reader(r)
            .map_err(|e| TileError::scene(format!("parse scene JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TileResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TileError::scene(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_string(&self) -> TileResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TileError::scene(format!("serialize scene JSON: {e}")))
    }

    /// Check dimensions, coordinate ranges, object sizes and nesting depth.
    pub fn validate(&self) -> TileResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TileError::scene(format!(
                "document size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(TileError::scene(format!(
                "document size {}x{} exceeds the {MAX_DIMENSION} pixel limit",
                self.width, self.height
            )));
        }
        validate_objects(&self.objects, "objects", 1)
    }

    /// Add the document's objects to `engine`'s root layer and set its background.
    ///
    /// Objects already in the engine stay below the new ones.
    pub fn build<D: Display>(&self, engine: &mut Engine<D>) -> TileResult<()> {
        engine.set_background_color(self.background);
        let root = engine.root();
        let mut layer = engine.layer(root)?;
        add_objects(&mut layer, &self.objects)?;
        tracing::debug!(objects = engine.object_count(), "scene document built");
        Ok(())
    }

    /// Render the document once into a fresh in-memory image.
    #[tracing::instrument(level = "debug", skip(self), fields(width = self.width, height = self.height))]
    pub fn render(&self) -> TileResult<ImageDisplay> {
        self.validate()?;
        let mut engine = Engine::new(ImageDisplay::new(self.width, self.height));
        self.build(&mut engine)?;
        engine.flush()?;
        Ok(engine.into_display())
    }
}

fn validate_objects(objects: &[ObjectDesc], path: &str, depth: usize) -> TileResult<()> {
    if depth > MAX_DEPTH {
        return Err(TileError::scene(format!(
            "{path}: layers nested deeper than {MAX_DEPTH}"
        )));
    }
    for (i, obj) in objects.iter().enumerate() {
        let here = format!("{path}[{i}]");
        match obj {
            ObjectDesc::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                check_coords(&here, &[*x, *y, *width, *height])?;
                check_size(&here, *width, *height)?;
            }
            ObjectDesc::Line { x1, y1, x2, y2, .. } => {
                check_coords(&here, &[*x1, *y1, *x2, *y2])?;
            }
            ObjectDesc::Layer {
                x,
                y,
                width,
                height,
                children,
                ..
            } => {
                check_coords(&here, &[*x, *y, *width, *height])?;
                check_size(&here, *width, *height)?;
                validate_objects(children, &format!("{here}.children"), depth + 1)?;
            }
        }
    }
    Ok(())
}

fn check_coords(path: &str, values: &[i32]) -> TileResult<()> {
    if let Some(v) = values.iter().find(|v| v.unsigned_abs() > COORD_LIMIT.unsigned_abs()) {
        return Err(TileError::scene(format!(
            "{path}: coordinate {v} outside +/-{COORD_LIMIT}"
        )));
    }
    Ok(())
}

fn check_size(path: &str, width: i32, height: i32) -> TileResult<()> {
    if width < 0 || height < 0 {
        return Err(TileError::scene(format!(
            "{path}: negative size {width}x{height}"
        )));
    }
    Ok(())
}

fn add_objects(layer: &mut LayerMut<'_>, objects: &[ObjectDesc]) -> TileResult<()> {
    for obj in objects {
        match obj {
            ObjectDesc::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                layer.new_rectangle(*x, *y, *width, *height, *color)?;
            }
            ObjectDesc::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                layer.new_line(*x1, *y1, *x2, *y2, *color)?;
            }
            ObjectDesc::Layer {
                x,
                y,
                width,
                height,
                background,
                children,
            } => {
                let id = layer.new_layer(*x, *y, *width, *height, *background)?;
                add_objects(&mut layer.child(id), children)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/document.rs"]
mod tests;
