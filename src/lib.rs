// Animated particle background for the Zoul chat screens. The engine in
// `field` is renderer agnostic; `web` hooks it up to a browser canvas.

mod utils;
pub mod log;

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod surface;
pub mod web;

use wasm_bindgen::prelude::*;

pub use color::Color;
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{Connection, ParticleField};
pub use particle::Particle;
pub use surface::{CanvasSurface, DrawCommand, RecordingSurface, RenderSurface};
pub use web::ParticleBackground;

// Use `wee_alloc` as the global allocator when the feature is enabled.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}
