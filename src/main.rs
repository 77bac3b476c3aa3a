//! Metal Lab entry point
//!
//! In the browser this wires the page up and runs the animation loop.
//! Natively it steps the lab headlessly and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_lab {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement};

    use metal_lab::content::{ContentBank, render_quiz_html, render_scene_html, score_quiz};
    use metal_lab::renderer::CanvasSurface;
    use metal_lab::{Lab, LabCommand, LabError, Result, SceneKey, Settings};

    /// Everything the page callbacks share
    struct App {
        lab: Lab,
        surface: CanvasSurface,
        content: ContentBank,
        document: Document,
    }

    impl App {
        fn apply(&mut self, command: LabCommand) {
            self.lab.apply(command);
            // Reset clears scene toggles, so the panel buttons need redrawing too
            if matches!(command, LabCommand::SelectScene(_) | LabCommand::Reset) {
                self.refresh_panels();
            }
        }

        /// Scene text, quiz, nav highlight and play button for the active scene
        fn refresh_panels(&self) {
            let key = self.lab.active();
            let info = match self.content.scene(key) {
                Ok(info) => info,
                Err(e) => {
                    log::error!("{e}");
                    return;
                }
            };

            if let Some(el) = self.document.get_element_by_id("sceneText") {
                el.set_inner_html(&render_scene_html(key, info, &self.lab.status()));
            }
            if let Some(el) = self.document.get_element_by_id("quizContainer") {
                el.set_inner_html(&render_quiz_html(&info.quiz));
            }
            if let Some(el) = self.document.get_element_by_id("quizFeedback") {
                el.set_text_content(Some(""));
                let _ = el.class_list().remove_2("good", "bad");
            }

            for (button, scene) in nav_buttons(&self.document) {
                let _ = button.class_list().toggle_with_force("active", scene == key);
            }
            self.sync_play_button();
        }

        fn sync_play_button(&self) {
            if let Some(btn) = self.document.get_element_by_id("playPauseBtn") {
                let label = if self.lab.is_running() { "Pause" } else { "Play" };
                btn.set_text_content(Some(label));
            }
        }

        fn check_answers(&self) {
            let Ok(info) = self.content.scene(self.lab.active()) else {
                return;
            };
            if info.quiz.is_empty() {
                return;
            }

            let selections: Vec<Option<usize>> = info
                .quiz
                .iter()
                .map(|q| {
                    self.document
                        .query_selector(&format!("input[name=\"{}\"]:checked", q.id))
                        .ok()
                        .flatten()
                        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                        .and_then(|input| input.value().parse().ok())
                })
                .collect();

            let feedback = score_quiz(&info.quiz, &selections);
            if let Some(el) = self.document.get_element_by_id("quizFeedback") {
                el.set_text_content(Some(&feedback.message()));
                let (add, remove) = if feedback.is_good() {
                    ("good", "bad")
                } else {
                    ("bad", "good")
                };
                let _ = el.class_list().remove_1(remove);
                let _ = el.class_list().add_1(add);
            }
        }
    }

    /// `.nav-button` elements paired with the scene in their `data-scene`
    fn nav_buttons(document: &Document) -> Vec<(Element, SceneKey)> {
        let Ok(list) = document.query_selector_all(".nav-button") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|el| {
                let scene = el.get_attribute("data-scene")?.parse().ok()?;
                Some((el, scene))
            })
            .collect()
    }

    pub fn run() -> Result<()> {
        let window = web_sys::window().ok_or_else(|| LabError::Canvas("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| LabError::Canvas("no document".into()))?;
        let canvas = document
            .get_element_by_id("labCanvas")
            .ok_or_else(|| LabError::Canvas("#labCanvas not found".into()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| LabError::Canvas("#labCanvas is not a canvas".into()))?;

        let settings = Settings::from_location();
        let app = Rc::new(RefCell::new(App {
            lab: Lab::new(&settings),
            surface: CanvasSurface::new(&canvas)?,
            content: ContentBank::load()?,
            document,
        }));
        app.borrow().refresh_panels();

        setup_nav(app.clone());
        setup_transport(app.clone());
        setup_scene_controls(app.clone());
        setup_quiz(app.clone());

        request_animation_frame(app);
        log::info!("Metal Lab running!");
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { lab, surface, .. } = &mut *a;
            lab.frame(time, surface);
        }
        request_animation_frame(app);
    }

    fn on_click(target: &Element, app: Rc<RefCell<App>>, f: fn(&mut App, &web_sys::Event)) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            f(&mut app.borrow_mut(), &event);
        });
        let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_nav(app: Rc<RefCell<App>>) {
        let buttons = nav_buttons(&app.borrow().document);
        for (button, scene) in buttons {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().apply(LabCommand::SelectScene(scene));
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_transport(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();

        if let Some(btn) = document.get_element_by_id("playPauseBtn") {
            on_click(&btn, app.clone(), |a, _| {
                a.apply(LabCommand::TogglePlay);
                a.sync_play_button();
            });
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            on_click(&btn, app, |a, _| a.apply(LabCommand::Reset));
        }
    }

    /// The scene panel is re-rendered on every switch, so its buttons and
    /// sliders are handled by delegation on the panel itself
    fn setup_scene_controls(app: Rc<RefCell<App>>) {
        let Some(panel) = app.borrow().document.get_element_by_id("sceneText") else {
            return;
        };

        on_click(&panel, app.clone(), |a, event| {
            let Some(button) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("button").ok().flatten())
            else {
                return;
            };
            let on = match button.id().as_str() {
                "toggleVoltageBtn" => {
                    a.apply(LabCommand::ToggleVoltage);
                    a.lab.status().voltage_on
                }
                "toggleHeatBtn" => {
                    a.apply(LabCommand::ToggleHeating);
                    a.lab.status().heating
                }
                "impactBtn" => {
                    a.apply(LabCommand::TriggerImpact);
                    return;
                }
                _ => return,
            };
            let _ = button.class_list().toggle_with_force("on", on);
        });

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let mut a = app.borrow_mut();
            let (output_id, text) = match input.id().as_str() {
                "carbonSlider" => {
                    let Ok(percent) = input.value().parse::<f32>() else {
                        return;
                    };
                    a.apply(LabCommand::SetCarbonPercent(percent));
                    ("carbonValue", format!("{:.1}%", a.lab.status().carbon_percent))
                }
                "foldSlider" => {
                    let Ok(folds) = input.value().parse::<u32>() else {
                        return;
                    };
                    a.apply(LabCommand::SetFoldCount(folds));
                    ("foldValue", a.lab.status().fold_count.to_string())
                }
                _ => return,
            };
            if let Some(output) = a.document.get_element_by_id(output_id) {
                output.set_text_content(Some(&text));
            }
        });
        let _ = panel.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_quiz(app: Rc<RefCell<App>>) {
        let Some(btn) = app.borrow().document.get_element_by_id("checkAnswersBtn") else {
            return;
        };
        on_click(&btn, app, |a, _| a.check_answers());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_lab::run() {
        log::error!("Metal Lab failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use metal_lab::content::ContentBank;
    use metal_lab::renderer::CommandRecorder;
    use metal_lab::{Lab, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Metal Lab (native) starting...");

    // `frames=N` is a runner option, everything else is a setting
    let (frame_args, setting_args): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a.starts_with("frames="));
    let frames = frame_args
        .last()
        .and_then(|a| a.trim_start_matches("frames=").parse::<u32>().ok())
        .unwrap_or(600);

    let settings = Settings::from_args(&setting_args);

    let content = match ContentBank::load() {
        Ok(content) => content,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut lab = Lab::new(&settings);
    let mut recorder = CommandRecorder::default();
    let mut draw_calls = 0;
    for i in 0..frames {
        recorder.clear();
        lab.frame(f64::from(i) * 1000.0 / 60.0, &mut recorder);
        draw_calls += recorder.len();
    }

    let status = lab.status();
    if let Ok(title) = content.scene(status.active).map(|info| info.title.as_str()) {
        log::info!("{title}");
    }
    log::info!(
        "{} frames, {} draw calls ({} in the last frame, max depth {})",
        frames,
        draw_calls,
        recorder.len(),
        recorder.max_depth()
    );
    match serde_json::to_string(&status) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("status: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
