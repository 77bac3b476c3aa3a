//! 2D rendering module
//!
//! Every scene draws through the [`Surface`] trait. In the browser that is a
//! Canvas 2D context; headless runs and tests record commands instead.

pub mod alloys;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;
pub mod common;
pub mod hammer;
pub mod recorder;
pub mod sea;
pub mod surface;
pub mod wire;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use color::{Color, palette};
pub use recorder::{CommandRecorder, DrawCommand};
pub use surface::{Blend, Font, Paint, Path, Stroke, Surface};
