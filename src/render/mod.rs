//! Tile storage and dirty tracking used by [`Engine::flush`](crate::Engine::flush).

pub(crate) mod grid;
pub(crate) mod tile;
