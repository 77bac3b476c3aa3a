//! Metal Lab - animated scenes about metallic bonding
//!
//! Core modules:
//! - `sim`: Deterministic scene simulation (lattices, electrons, phases)
//! - `renderer`: Drawing surface contract and per-scene draw routines
//! - `scene`: Scene contract and the set of all scenes
//! - `lab`: Controller owning the active scene, run flag and frame clock
//! - `content`: Scene text, quiz bank and scoring
//! - `settings`: Start-up configuration

pub mod content;
pub mod error;
pub mod lab;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{LabError, Result};
pub use lab::{FrameClock, Lab, LabCommand, LabStatus};
pub use scene::{Scene, SceneKey, SceneSet};
pub use settings::Settings;

/// Canvas and layout constants
pub mod consts {
    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 520.0;

    /// Default seed for native runs and tests
    pub const DEFAULT_SEED: u64 = 0x5EED;
}

/// Sanitize a frame delta: negative, NaN or infinite values become 0.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(0.0), 0.0);
        assert_eq!(sanitize_dt(-1.0), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    }
}
