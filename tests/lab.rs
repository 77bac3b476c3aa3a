//! Controller, render loop and quiz behaviour through the public API

use metal_lab::content::{ContentBank, QuizFeedback, render_scene_html, score_quiz};
use metal_lab::renderer::CommandRecorder;
use metal_lab::sim::{CollisionPhase, HammerPhase};
use metal_lab::{Lab, LabCommand, SceneKey, Settings};

/// Drive the lab at 60 fps for `seconds`, starting at `start_ms`
fn run(lab: &mut Lab, start_ms: f64, seconds: f64) -> f64 {
    let mut rec = CommandRecorder::default();
    let frames = (seconds * 60.0).round() as u32;
    let mut t = start_ms;
    for _ in 0..=frames {
        rec.clear();
        lab.frame(t, &mut rec);
        assert!(rec.is_balanced());
        t += 1000.0 / 60.0;
    }
    t
}

fn lab_on(scene: SceneKey) -> Lab {
    let settings = Settings {
        start_scene: scene,
        seed: Some(11),
        ..Settings::default()
    };
    Lab::new(&settings)
}

#[test]
fn hammer_cycle_through_render_loop() {
    let mut lab = lab_on(SceneKey::Hammer);
    run(&mut lab, 0.0, 2.6);
    assert_eq!(lab.scenes().hammer.phase, HammerPhase::Strike);
}

#[test]
fn pause_freezes_and_resume_continues() {
    let mut lab = lab_on(SceneKey::Wire);
    let t = run(&mut lab, 0.0, 1.0);
    let before = lab.scenes().wire.time;

    lab.apply(LabCommand::TogglePlay);
    let t = run(&mut lab, t, 2.0);
    assert_eq!(lab.scenes().wire.time, before);

    lab.apply(LabCommand::TogglePlay);
    run(&mut lab, t, 0.5);
    assert!(lab.scenes().wire.time > before);
    // No catch-up for the paused stretch
    assert!(lab.scenes().wire.time < before + 1.0);
}

#[test]
fn wire_current_through_commands() {
    let mut lab = lab_on(SceneKey::Wire);
    lab.apply(LabCommand::ToggleVoltage);
    run(&mut lab, 0.0, 2.0);
    let wire = &lab.scenes().wire;
    assert!((wire.mean_drift_velocity() - wire.mean_base_speed()).abs() < 1e-3);
    assert!(wire.mean_displacement() > 0.0);
}

#[test]
fn alloy_impact_and_cooldown() {
    let settings = Settings {
        start_scene: SceneKey::Alloys,
        carbon_percent: 1.2,
        fold_count: 5,
        seed: Some(3),
        ..Settings::default()
    };
    let mut lab = Lab::new(&settings);
    let status = lab.status();
    assert_eq!(status.carbon_percent, 1.2);
    assert_eq!(status.fold_count, 5);
    assert!(status.carbon_count > 0);

    assert!(lab.trigger_impact());
    assert!(!lab.trigger_impact());
    run(&mut lab, 0.0, 1.0);
    assert!(lab.scenes().alloys.pure_blade_broken());
    assert!(!lab.scenes().alloys.fragments.is_empty());

    run(&mut lab, 2000.0, 4.0);
    assert_eq!(lab.scenes().alloys.phase(), CollisionPhase::Ready);
    assert!(lab.trigger_impact());
}

#[test]
fn switching_scene_resets_it() {
    let mut lab = lab_on(SceneKey::Sea);
    lab.apply(LabCommand::ToggleHeating);
    run(&mut lab, 0.0, 1.0);
    assert!(lab.scenes().sea.heat_front() > 0.0);

    lab.apply(LabCommand::SelectScene(SceneKey::Hammer));
    lab.apply(LabCommand::SelectScene(SceneKey::Sea));
    assert_eq!(lab.scenes().sea.heat_front(), 0.0);
    assert!(!lab.status().heating);
}

#[test]
fn reset_only_touches_active_scene() {
    let mut lab = lab_on(SceneKey::Wire);
    lab.apply(LabCommand::ToggleVoltage);
    run(&mut lab, 0.0, 0.5);
    lab.apply(LabCommand::SelectScene(SceneKey::Hammer));
    run(&mut lab, 1000.0, 0.5);
    lab.apply(LabCommand::Reset);
    assert_eq!(lab.scenes().hammer.time, 0.0);
    assert!(lab.scenes().wire.time > 0.0);
}

#[test]
fn reset_turns_scene_toggles_off_in_panel() {
    let bank = ContentBank::load().unwrap();
    for (scene, command) in [
        (SceneKey::Sea, LabCommand::ToggleHeating),
        (SceneKey::Wire, LabCommand::ToggleVoltage),
    ] {
        let mut lab = lab_on(scene);
        let info = bank.scene(scene).unwrap();
        lab.apply(command);
        let html = render_scene_html(scene, info, &lab.status());
        assert!(html.contains("secondary-btn on"));

        lab.apply(LabCommand::Reset);
        let status = lab.status();
        assert!(!status.heating && !status.voltage_on);
        let html = render_scene_html(scene, info, &status);
        assert!(!html.contains("secondary-btn on"));
    }
}

#[test]
fn quiz_scoring() {
    let bank = ContentBank::load().unwrap();
    let quiz = &bank.scene(SceneKey::Sea).unwrap().quiz;
    let answers: Vec<Option<usize>> = quiz.iter().map(|q| Some(q.correct)).collect();

    assert_eq!(score_quiz(quiz, &answers), QuizFeedback::Perfect { total: 3 });
    assert_eq!(score_quiz(quiz, &[None, None, None]), QuizFeedback::NoAnswer);
    assert_eq!(
        score_quiz(quiz, &[]).message(),
        "Choose at least one answer first."
    );

    let mut two_right = answers.clone();
    two_right[2] = Some((quiz[2].correct + 1) % quiz[2].options.len());
    let feedback = score_quiz(quiz, &two_right);
    assert_eq!(feedback, QuizFeedback::Partial { correct: 2, total: 3 });
    assert!(feedback.message().contains("2 out of 3"));
}

#[test]
fn status_serialises() {
    let lab = lab_on(SceneKey::Alloys);
    let json = serde_json::to_value(lab.status()).unwrap();
    assert_eq!(json["active"], "alloys");
    assert_eq!(json["running"], true);
}
