//! Tilegraphics is a small retained-mode 2D renderer for slow displays.
//!
//! The screen is split into 8x8 pixel tiles. Changing the scene only marks tiles dirty, and
//! [`Engine::flush`] repaints and sends exactly those tiles. That keeps the amount of data
//! pushed over a slow link (an SPI panel, a serial console, a PNG on disk) proportional to what
//! actually changed on screen.
//!
//! - Create an [`Engine`] on top of a [`Display`]
//! - Add rectangles, antialiased lines and clipping layers
//! - Move and recolor them through the handles, then [`Engine::flush`]
#![forbid(unsafe_code)]

mod document;
mod engine;
mod foundation;
mod render;
mod scene;

/// Display adapters.
pub mod display;

pub use crate::display::image_display::ImageDisplay;
pub use crate::display::recording::RecordingDisplay;
pub use crate::display::{Display, check_buffer_len};
pub use crate::document::{ObjectDesc, SceneDocument};
pub use crate::engine::{Engine, EngineOpts, FlushStats};
pub use crate::foundation::color::{Color, apply_alpha, blend, decode_gamma, encode_gamma};
pub use crate::foundation::core::{Bounds, COORD_LIMIT, Size, TILE_PIXELS, TILE_SIZE};
pub use crate::foundation::error::{TileError, TileResult};
pub use crate::render::tile::{TilePoolOpts, TilePoolStats};
pub use crate::scene::{LayerId, LayerMut, LineId, LineMut, RectangleId, RectangleMut};
