//! Deterministic scene simulation
//!
//! All animation state lives here. This module must stay pure:
//! - Seeded RNG only (one generator per scene)
//! - No rendering or platform dependencies
//! - Numeric state is clamped, never rejected

pub mod alloys;
pub mod easing;
pub mod hammer;
pub mod particles;
pub mod region;
pub mod sea;
pub mod wire;

pub use alloys::{AlloyScene, CollisionPhase};
pub use easing::{ease_out_bounce, ease_out_cubic, ease_out_quad, lerp};
pub use hammer::{HammerPhase, HammerScene};
pub use particles::{CarbonAtom, DriftElectron, Electron, Fragment, Ion};
pub use region::Region;
pub use sea::SeaScene;
pub use wire::WireScene;
