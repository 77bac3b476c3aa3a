//! Scene text, quiz bank and quiz scoring
//!
//! The text lives in `assets/content.json`, embedded at compile time. The
//! browser shell injects the HTML produced here into the side panel.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};
use crate::lab::LabStatus;
use crate::scene::SceneKey;
use crate::sim::alloys::{MAX_CARBON_PERCENT, MAX_FOLD_COUNT};

const CONTENT_JSON: &str = include_str!("../assets/content.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Radio group name in the page
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneInfo {
    pub title: String,
    pub body: Vec<String>,
    pub bullets: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
}

/// Text and quizzes for every scene
#[derive(Debug, Clone)]
pub struct ContentBank {
    scenes: HashMap<SceneKey, SceneInfo>,
}

impl ContentBank {
    /// Parse the embedded document
    pub fn load() -> Result<Self> {
        Self::from_json(CONTENT_JSON)
    }

    /// Parse a content document; every scene must be present
    pub fn from_json(json: &str) -> Result<Self> {
        let scenes: HashMap<SceneKey, SceneInfo> = serde_json::from_str(json)?;
        if let Some(missing) = SceneKey::ALL.into_iter().find(|k| !scenes.contains_key(k)) {
            return Err(LabError::MissingContent(missing));
        }
        Ok(Self { scenes })
    }

    pub fn scene(&self, key: SceneKey) -> Result<&SceneInfo> {
        self.scenes.get(&key).ok_or(LabError::MissingContent(key))
    }
}

/// Outcome of checking a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizFeedback {
    NoAnswer,
    Perfect { total: usize },
    Partial { correct: usize, total: usize },
}

impl QuizFeedback {
    pub fn message(&self) -> String {
        match self {
            QuizFeedback::NoAnswer => "Choose at least one answer first.".to_string(),
            QuizFeedback::Perfect { total } => {
                format!("Nice work – you got all {total} correct!")
            }
            QuizFeedback::Partial { correct, total } => format!(
                "You scored {correct} out of {total}. Check your answers and try again."
            ),
        }
    }

    /// Whether the feedback is styled as good news
    pub fn is_good(&self) -> bool {
        matches!(self, QuizFeedback::Perfect { .. })
    }
}

/// Score selected option indices against the answers. Missing selections
/// count as unanswered.
pub fn score_quiz(questions: &[QuizQuestion], selections: &[Option<usize>]) -> QuizFeedback {
    let mut answered = 0;
    let mut correct = 0;
    for (i, q) in questions.iter().enumerate() {
        if let Some(choice) = selections.get(i).copied().flatten() {
            answered += 1;
            if choice == q.correct {
                correct += 1;
            }
        }
    }

    let total = questions.len();
    if answered == 0 {
        QuizFeedback::NoAnswer
    } else if correct == total {
        QuizFeedback::Perfect { total }
    } else {
        QuizFeedback::Partial { correct, total }
    }
}

/// Scene text panel with the controls that belong to the scene
pub fn render_scene_html(key: SceneKey, info: &SceneInfo, status: &LabStatus) -> String {
    let mut html = String::new();
    let _ = write!(html, "<h2>{}</h2>", escape_html(&info.title));
    for p in &info.body {
        let _ = write!(html, "<p>{}</p>", escape_html(p));
    }
    html.push_str("<ul>");
    for b in &info.bullets {
        let _ = write!(html, "<li>{}</li>", escape_html(b));
    }
    html.push_str("</ul>");

    match key {
        SceneKey::Sea => html.push_str(&toggle_button(
            "toggleHeatBtn",
            "🔥",
            "Heat one end",
            status.heating,
        )),
        SceneKey::Wire => html.push_str(&toggle_button(
            "toggleVoltageBtn",
            "⚡",
            "Toggle potential difference",
            status.voltage_on,
        )),
        SceneKey::Alloys => {
            html.push_str(
                r#"<button id="impactBtn" class="secondary-btn"><span class="icon">⚔</span><span>Clash the blades</span></button>"#,
            );
            let _ = write!(
                html,
                r#"<label class="slider">Carbon <output id="carbonValue">{:.1}%</output><input id="carbonSlider" type="range" min="0" max="{}" step="0.1" value="{:.1}" /></label>"#,
                status.carbon_percent, MAX_CARBON_PERCENT, status.carbon_percent
            );
            let _ = write!(
                html,
                r#"<label class="slider">Folds <output id="foldValue">{}</output><input id="foldSlider" type="range" min="0" max="{}" step="1" value="{}" /></label>"#,
                status.fold_count, MAX_FOLD_COUNT, status.fold_count
            );
        }
        SceneKey::Hammer => {}
    }
    html
}

fn toggle_button(id: &str, icon: &str, label: &str, on: bool) -> String {
    let class = if on { "secondary-btn on" } else { "secondary-btn" };
    format!(
        r#"<button id="{id}" class="{class}"><span class="icon">{icon}</span><span>{label}</span></button>"#
    )
}

/// Quiz panel: one radio group per question, named by question id
pub fn render_quiz_html(questions: &[QuizQuestion]) -> String {
    let mut html = String::new();
    for (qi, q) in questions.iter().enumerate() {
        let _ = write!(
            html,
            r#"<article class="quiz-question"><h3>Q{}. {}</h3><ul class="quiz-options">"#,
            qi + 1,
            escape_html(&q.question)
        );
        for (oi, opt) in q.options.iter().enumerate() {
            let _ = write!(
                html,
                r#"<li><label><input type="radio" name="{}" value="{}" /><span>{}</span></label></li>"#,
                escape_html(&q.id),
                oi,
                escape_html(opt)
            );
        }
        html.push_str("</ul></article>");
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
