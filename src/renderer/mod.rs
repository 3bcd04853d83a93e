//! Rendering seam
//!
//! The simulation never draws. A frontend implements `Renderer` and
//! `ImageLoader`; `draw_scene` turns a `GameState` into draw calls.

pub mod cache;
pub mod scene;

pub use cache::{ImageCache, ImageKey, ImageLoader, MemoryLoader};
pub use scene::{draw_scene, enemy_sprite, preload_sprites};

use glam::Vec2;

/// RGB color
pub type Color = [u8; 3];

pub const BLACK: Color = [0, 0, 0];
pub const GREEN: Color = [0, 255, 0];

/// Axis-aligned rectangle (top-left anchor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }
}

/// Rectangle drawing style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    /// Outline with the given line width
    Outline(u32),
}

/// Draw target for image handles of type `H`
pub trait Renderer<H> {
    /// Blit an image with its top-left corner at `pos`
    fn draw(&mut self, image: &H, pos: Vec2);
    fn draw_rect(&mut self, rect: Rect, color: Color, fill: Fill);
    fn draw_text(&mut self, text: &str, pos: Vec2);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<H> {
    Image { image: H, pos: Vec2 },
    Rect { rect: Rect, color: Color, fill: Fill },
    Text { text: String, pos: Vec2 },
}

/// Renderer that records calls instead of drawing (headless runs and tests)
#[derive(Debug, Clone)]
pub struct DrawList<H> {
    pub commands: Vec<DrawCommand<H>>,
}

impl<H> Default for DrawList<H> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<H> DrawList<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<H: Clone> Renderer<H> for DrawList<H> {
    fn draw(&mut self, image: &H, pos: Vec2) {
        self.commands.push(DrawCommand::Image {
            image: image.clone(),
            pos,
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, fill: Fill) {
        self.commands.push(DrawCommand::Rect { rect, color, fill });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
    }
}
