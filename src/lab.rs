//! Lab controller: active scene, run flag and the render loop driver

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEED;
use crate::renderer::Surface;
use crate::scene::{SceneKey, SceneSet};
use crate::settings::Settings;

/// Turns `requestAnimationFrame` timestamps into frame deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous timestamp. The first frame, a clock that
    /// went backwards and a non-finite timestamp all give 0.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) if timestamp_ms > last => ((timestamp_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last = Some(timestamp_ms);
        dt
    }
}

/// Everything the page can ask of the lab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum LabCommand {
    SelectScene(SceneKey),
    TogglePlay,
    Reset,
    ToggleVoltage,
    ToggleHeating,
    TriggerImpact,
    SetCarbonPercent(f32),
    SetFoldCount(u32),
}

/// Runtime flags the page mirrors in its controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabStatus {
    pub active: SceneKey,
    pub running: bool,
    pub voltage_on: bool,
    pub heating: bool,
    pub carbon_percent: f32,
    pub fold_count: u32,
    pub shear_strength: f32,
    pub carbon_count: usize,
}

/// Application state: the scenes, which one is shown, and whether time runs
#[derive(Debug, Clone)]
pub struct Lab {
    scenes: SceneSet,
    active: SceneKey,
    running: bool,
    clock: FrameClock,
}

impl Lab {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        let mut scenes = SceneSet::new(seed);
        scenes.alloys.set_carbon_percent(settings.carbon_percent);
        scenes.alloys.set_fold_count(settings.fold_count);

        log::info!(
            "lab ready: scene={} autoplay={} seed={:#x}",
            settings.start_scene,
            settings.autoplay,
            seed
        );

        Self {
            scenes,
            active: settings.start_scene,
            running: settings.autoplay,
            clock: FrameClock::new(),
        }
    }

    pub fn scenes(&self) -> &SceneSet {
        &self.scenes
    }

    pub fn active(&self) -> SceneKey {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Switch scenes. The newly shown scene always starts from a reset;
    /// the previous one simply stops updating.
    pub fn select_scene(&mut self, key: SceneKey) {
        if key != self.active {
            log::info!("scene {} -> {}", self.active, key);
        }
        self.active = key;
        self.scenes.get_mut(key).reset();
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        log::debug!("running = {}", self.running);
        self.running
    }

    pub fn reset_active(&mut self) {
        log::info!("reset {}", self.active);
        self.scenes.get_mut(self.active).reset();
    }

    pub fn toggle_voltage(&mut self) -> bool {
        self.scenes.wire.toggle_voltage();
        self.scenes.wire.voltage_on()
    }

    pub fn toggle_heating(&mut self) -> bool {
        self.scenes.sea.toggle_heating();
        self.scenes.sea.heating()
    }

    /// Swing the blades; false while a collision is still playing out
    pub fn trigger_impact(&mut self) -> bool {
        self.scenes.alloys.trigger_impact()
    }

    pub fn set_carbon_percent(&mut self, percent: f32) {
        self.scenes.alloys.set_carbon_percent(percent);
    }

    pub fn set_fold_count(&mut self, folds: u32) {
        self.scenes.alloys.set_fold_count(folds);
    }

    pub fn apply(&mut self, command: LabCommand) {
        match command {
            LabCommand::SelectScene(key) => self.select_scene(key),
            LabCommand::TogglePlay => {
                self.toggle_running();
            }
            LabCommand::Reset => self.reset_active(),
            LabCommand::ToggleVoltage => {
                self.toggle_voltage();
            }
            LabCommand::ToggleHeating => {
                self.toggle_heating();
            }
            LabCommand::TriggerImpact => {
                self.trigger_impact();
            }
            LabCommand::SetCarbonPercent(p) => self.set_carbon_percent(p),
            LabCommand::SetFoldCount(n) => self.set_fold_count(n),
        }
    }

    /// Advance the active scene by `dt` if the lab is running
    pub fn step(&mut self, dt: f32) {
        if self.running {
            self.scenes.get_mut(self.active).update(dt);
        }
    }

    /// One render loop iteration: update (when running), then draw.
    /// Returns the delta that was derived from the timestamp.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> f32 {
        let dt = self.clock.delta(timestamp_ms);
        self.step(dt);
        self.scenes.get(self.active).draw(surface);
        dt
    }

    pub fn status(&self) -> LabStatus {
        let alloys = &self.scenes.alloys;
        LabStatus {
            active: self.active,
            running: self.running,
            voltage_on: self.scenes.wire.voltage_on(),
            heating: self.scenes.sea.heating(),
            carbon_percent: alloys.carbon_percent(),
            fold_count: alloys.fold_count(),
            shear_strength: alloys.shear_strength(),
            carbon_count: alloys.carbon.len(),
        }
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;

    #[test]
    fn test_clock_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_clock_backwards_is_zero() {
        let mut clock = FrameClock::new();
        clock.delta(500.0);
        assert_eq!(clock.delta(400.0), 0.0);
        assert!((clock.delta(500.0) - 0.1).abs() < 1e-6);
        assert_eq!(clock.delta(f64::NAN), 0.0);
    }

    #[test]
    fn test_paused_lab_still_draws() {
        let mut lab = Lab::default();
        lab.toggle_running();
        let mut rec = CommandRecorder::default();
        lab.frame(0.0, &mut rec);
        lab.frame(100.0, &mut rec);
        assert_eq!(lab.scenes().sea.time, 0.0);
        assert!(!rec.is_empty());
    }

    #[test]
    fn test_running_lab_updates_active_only() {
        let mut lab = Lab::default();
        let mut rec = CommandRecorder::default();
        lab.frame(0.0, &mut rec);
        lab.frame(250.0, &mut rec);
        assert!((lab.scenes().sea.time - 0.25).abs() < 1e-6);
        assert_eq!(lab.scenes().hammer.time, 0.0);
    }

    #[test]
    fn test_select_resets_target() {
        let mut lab = Lab::default();
        lab.apply(LabCommand::SelectScene(SceneKey::Hammer));
        lab.step(3.0);
        assert!(lab.scenes().hammer.time > 0.0);
        lab.apply(LabCommand::SelectScene(SceneKey::Wire));
        lab.apply(LabCommand::SelectScene(SceneKey::Hammer));
        assert_eq!(lab.scenes().hammer.time, 0.0);
        assert_eq!(lab.active(), SceneKey::Hammer);
    }

    #[test]
    fn test_status_reflects_commands() {
        let mut lab = Lab::default();
        lab.apply(LabCommand::ToggleVoltage);
        lab.apply(LabCommand::ToggleHeating);
        lab.apply(LabCommand::SetCarbonPercent(2.0));
        lab.apply(LabCommand::SetFoldCount(40));
        let status = lab.status();
        assert!(status.voltage_on);
        assert!(status.heating);
        assert_eq!(status.carbon_percent, 2.0);
        assert_eq!(status.fold_count, crate::sim::alloys::MAX_FOLD_COUNT);
        assert_eq!(status.carbon_count, lab.scenes().alloys.max_carbon_count());
    }

    #[test]
    fn test_command_json() {
        let cmd: LabCommand =
            serde_json::from_str(r#"{"command":"select_scene","value":"alloys"}"#).unwrap();
        assert_eq!(cmd, LabCommand::SelectScene(SceneKey::Alloys));
        let cmd: LabCommand = serde_json::from_str(r#"{"command":"reset"}"#).unwrap();
        assert_eq!(cmd, LabCommand::Reset);
    }
}
