//! Platform abstraction layer
//!
//! The simulation never touches the browser directly. Everything it needs from
//! the outside world goes through these traits:
//! - `Display`: immediate-mode 2D drawing
//! - `Audio`: fire-and-forget sound
//! - `Ui`: HUD text, panels and modal dialogs

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{HeadlessPlatform, PlatformCall};
#[cfg(target_arch = "wasm32")]
pub use web::{DomUi, WebPlatform};

use glam::Vec2;

use crate::tuning::Theme;

/// RGBA colour, channels in 0-255 with a 0.0-1.0 alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0x00, 0x95, 0xDD);
    pub const AMBER: Color = Color::rgb(0xDD, 0x95, 0x00);
    pub const RED: Color = Color::rgb(0xDD, 0x00, 0x00);

    /// CSS `rgba()` string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict containment: points on the border are outside
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.pos.x && p.x < self.right() && p.y > self.pos.y && p.y < self.bottom()
    }
}

/// Severity icon for a modal dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Warning,
    Error,
    Success,
}

/// A blocking-looking (but asynchronous) dialog; the host calls
/// `Game::acknowledge` once the player dismisses it
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub title: String,
    pub message: String,
    pub kind: ModalKind,
    pub confirm_label: String,
}

/// Toggleable UI panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    ThemeSelect,
    DifficultySelect,
    Canvas,
    ScoreBoard,
    TimeBoard,
    LivesBoard,
    LevelComplete,
}

impl PanelId {
    /// DOM element id in the page shell
    pub fn element_id(&self) -> &'static str {
        match self {
            PanelId::ThemeSelect => "themeSelect",
            PanelId::DifficultySelect => "difficultySelect",
            PanelId::Canvas => "gameCanvas",
            PanelId::ScoreBoard => "scoreBoard",
            PanelId::TimeBoard => "timeBoard",
            PanelId::LivesBoard => "livesBoard",
            PanelId::LevelComplete => "levelComplete",
        }
    }
}

/// Player controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` / `.code` pair
    pub fn from_dom(key: &str, code: &str) -> Option<Self> {
        match key {
            "Right" | "ArrowRight" => Some(Key::Right),
            "Left" | "ArrowLeft" => Some(Key::Left),
            _ if code == "Space" => Some(Key::Jump),
            _ => None,
        }
    }
}

pub trait Display {
    fn clear_frame(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color);
}

pub trait Audio {
    fn play_hit_sound(&mut self);
    fn play_background_music(&mut self);
    fn pause_background_music(&mut self);
}

pub trait Ui {
    fn show_modal(&mut self, modal: Modal);
    fn set_score_text(&mut self, score: u32);
    fn set_lives_text(&mut self, lives: u32);
    fn set_time_text(&mut self, seconds: u32);
    fn show_panel(&mut self, panel: PanelId);
    fn hide_panel(&mut self, panel: PanelId);
    fn set_theme_background(&mut self, theme: Theme);
}

/// Everything the game needs from its host
pub trait Platform: Display + Audio + Ui {}

impl<T: Display + Audio + Ui> Platform for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_strict_containment() {
        let r = Rect::new(30.0, 30.0, 100.0, 30.0);
        assert!(r.contains_strict(Vec2::new(80.0, 45.0)));
        assert!(!r.contains_strict(Vec2::new(30.0, 45.0)));
        assert!(!r.contains_strict(Vec2::new(80.0, 60.0)));
        assert_eq!(r.center(), Vec2::new(80.0, 45.0));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft", "ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("Right", ""), Some(Key::Right));
        assert_eq!(Key::from_dom(" ", "Space"), Some(Key::Jump));
        assert_eq!(Key::from_dom("a", "KeyA"), None);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgba(255, 255, 0, 0.5).to_css(), "rgba(255, 255, 0, 0.5)");
    }
}
