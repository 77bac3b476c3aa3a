//! A surface that records draw calls instead of rasterizing them
//!
//! Used by the native headless runner and by tests that inspect what a scene
//! drew.

use glam::Vec2;

use super::surface::{Blend, Font, Paint, Path, Stroke, Surface};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::Region;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Alpha(f32),
    Blend(Blend),
    LineDash(Vec<f32>),
    FillRect(Region, Paint),
    StrokeRect(Region, Stroke),
    FillPath(Path, Paint),
    StrokePath(Path, Stroke),
    Clip(Path),
    Text { text: String, pos: Vec2, font: Font, paint: Paint },
}

#[derive(Debug, Clone)]
pub struct CommandRecorder {
    size: Vec2,
    commands: Vec<DrawCommand>,
    depth: i32,
    max_depth: i32,
    unbalanced: bool,
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }
}

impl CommandRecorder {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
            depth: 0,
            max_depth: 0,
            unbalanced: false,
        }
    }

    /// Drop recorded commands (start of a new frame)
    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
        self.unbalanced = false;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every save had a matching restore, in order
    pub fn is_balanced(&self) -> bool {
        !self.unbalanced && self.depth == 0
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// All text drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of filled or stroked shapes (rects and paths)
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::FillRect(..)
                        | DrawCommand::StrokeRect(..)
                        | DrawCommand::FillPath(..)
                        | DrawCommand::StrokePath(..)
                )
            })
            .count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth -= 1;
        if self.depth < 0 {
            self.unbalanced = true;
        }
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.push(DrawCommand::Rotate(angle));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.push(DrawCommand::Alpha(alpha));
    }

    fn set_blend(&mut self, blend: Blend) {
        self.push(DrawCommand::Blend(blend));
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        self.push(DrawCommand::LineDash(segments.to_vec()));
    }

    fn fill_rect(&mut self, rect: Region, paint: &Paint) {
        self.push(DrawCommand::FillRect(rect, paint.clone()));
    }

    fn stroke_rect(&mut self, rect: Region, stroke: &Stroke) {
        self.push(DrawCommand::StrokeRect(rect, stroke.clone()));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.push(DrawCommand::FillPath(path.clone(), paint.clone()));
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.push(DrawCommand::StrokePath(path.clone(), stroke.clone()));
    }

    fn clip(&mut self, path: &Path) {
        self.push(DrawCommand::Clip(path.clone()));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &Font, paint: &Paint) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: *font,
            paint: paint.clone(),
        });
    }
}
