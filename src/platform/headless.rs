//! Headless platform
//!
//! Records every collaborator call instead of drawing or playing anything.
//! Used by the native demo binary and by tests.

use glam::Vec2;

use super::{Audio, Color, Display, Modal, PanelId, Rect, Ui};
use crate::tuning::Theme;

/// One recorded non-drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    HitSound,
    MusicPlay,
    MusicPause,
    Modal(Modal),
    Score(u32),
    Lives(u32),
    Time(u32),
    Show(PanelId),
    Hide(PanelId),
    Background(Theme),
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    /// UI/audio calls in order
    pub calls: Vec<PlatformCall>,
    /// Shapes drawn since the last `clear_frame`
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: Vec<String>,
    pub frames_cleared: u64,
    pub music_playing: bool,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent modal shown, if any
    pub fn last_modal(&self) -> Option<&Modal> {
        self.calls.iter().rev().find_map(|c| match c {
            PlatformCall::Modal(m) => Some(m),
            _ => None,
        })
    }

    pub fn count(&self, call: &PlatformCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Display for HeadlessPlatform {
    fn clear_frame(&mut self, _color: Color) {
        self.frames_cleared += 1;
        self.rects_drawn = 0;
        self.circles_drawn = 0;
        self.texts_drawn.clear();
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects_drawn += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.circles_drawn += 1;
    }

    fn fill_text(&mut self, text: &str, _pos: Vec2, _color: Color) {
        self.texts_drawn.push(text.to_string());
    }
}

impl Audio for HeadlessPlatform {
    fn play_hit_sound(&mut self) {
        self.calls.push(PlatformCall::HitSound);
    }

    fn play_background_music(&mut self) {
        self.music_playing = true;
        self.calls.push(PlatformCall::MusicPlay);
    }

    fn pause_background_music(&mut self) {
        self.music_playing = false;
        self.calls.push(PlatformCall::MusicPause);
    }
}

impl Ui for HeadlessPlatform {
    fn show_modal(&mut self, modal: Modal) {
        log::info!("[modal] {}: {}", modal.title, modal.message);
        self.calls.push(PlatformCall::Modal(modal));
    }

    fn set_score_text(&mut self, score: u32) {
        self.calls.push(PlatformCall::Score(score));
    }

    fn set_lives_text(&mut self, lives: u32) {
        self.calls.push(PlatformCall::Lives(lives));
    }

    fn set_time_text(&mut self, seconds: u32) {
        self.calls.push(PlatformCall::Time(seconds));
    }

    fn show_panel(&mut self, panel: PanelId) {
        self.calls.push(PlatformCall::Show(panel));
    }

    fn hide_panel(&mut self, panel: PanelId) {
        self.calls.push(PlatformCall::Hide(panel));
    }

    fn set_theme_background(&mut self, theme: Theme) {
        self.calls.push(PlatformCall::Background(theme));
    }
}
