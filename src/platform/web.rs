//! Browser platform: canvas drawing, Web Audio and DOM panels

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlCanvasElement};

use super::{Audio, Color, Display, Modal, PanelId, Rect, Ui};
use crate::audio::AudioManager;
use crate::renderer::CanvasRenderer;
use crate::settings::Settings;
use crate::tuning::Theme;

/// Modal overlay element ids
pub const MODAL_ID: &str = "modal";
pub const MODAL_TITLE_ID: &str = "modalTitle";
pub const MODAL_MESSAGE_ID: &str = "modalMessage";
pub const MODAL_CONFIRM_ID: &str = "modalConfirm";

const HIDDEN_CLASS: &str = "hidden";

fn background_url(theme: Theme) -> &'static str {
    match theme {
        Theme::NightSky => {
            "url('https://images.unsplash.com/photo-1528818955841-a7f1425131b5?fm=jpg&q=60&w=3000')"
        }
        Theme::Forest => {
            "url('https://media.istockphoto.com/id/1419410282/photo/silent-forest-in-spring-with-beautiful-bright-sun-rays.jpg?s=612x612&w=0&k=20&c=UHeb1pGOw6ozr6utsenXHhV19vW6oiPIxDqhKCS2Llk=')"
        }
    }
}

/// HUD text, panels and the modal overlay, all looked up by element id
pub struct DomUi {
    document: Document,
}

impl DomUi {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("Missing #{id} element");
        }
        el
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        let Some(el) = self.element(id) else { return };
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1(HIDDEN_CLASS)
        } else {
            classes.remove_1(HIDDEN_CLASS)
        };
    }

    /// Close the modal overlay after the player confirms it
    pub fn dismiss_modal(&self) {
        self.set_hidden(MODAL_ID, true);
    }
}

impl Ui for DomUi {
    fn show_modal(&mut self, modal: Modal) {
        self.set_text(MODAL_TITLE_ID, &modal.title);
        self.set_text(MODAL_MESSAGE_ID, &modal.message);
        self.set_text(MODAL_CONFIRM_ID, &modal.confirm_label);
        if let Some(el) = self.element(MODAL_ID) {
            let kind = format!("{:?}", modal.kind).to_lowercase();
            let _ = el.set_attribute("data-kind", &kind);
        }
        self.set_hidden(MODAL_ID, false);
    }

    fn set_score_text(&mut self, score: u32) {
        self.set_text(PanelId::ScoreBoard.element_id(), &format!("Score: {score}"));
    }

    fn set_lives_text(&mut self, lives: u32) {
        self.set_text(PanelId::LivesBoard.element_id(), &format!("Lives: {lives}"));
    }

    fn set_time_text(&mut self, seconds: u32) {
        self.set_text(
            PanelId::TimeBoard.element_id(),
            &format!("Time Remaining: {seconds}s"),
        );
    }

    fn show_panel(&mut self, panel: PanelId) {
        self.set_hidden(panel.element_id(), false);
    }

    fn hide_panel(&mut self, panel: PanelId) {
        self.set_hidden(panel.element_id(), true);
    }

    fn set_theme_background(&mut self, theme: Theme) {
        let Some(body) = self.document.body() else { return };
        if let Err(err) = body
            .style()
            .set_property("background-image", background_url(theme))
        {
            log::warn!("Could not set {theme} background: {err:?}");
        }
    }
}

/// Everything wired to the live page
pub struct WebPlatform {
    pub renderer: CanvasRenderer,
    pub audio: AudioManager,
    pub ui: DomUi,
}

impl WebPlatform {
    pub fn new(
        document: Document,
        canvas: &HtmlCanvasElement,
        settings: &Settings,
    ) -> Result<Self, JsValue> {
        Ok(Self {
            renderer: CanvasRenderer::new(canvas)?,
            audio: AudioManager::new(settings),
            ui: DomUi::new(document),
        })
    }
}

impl Display for WebPlatform {
    fn clear_frame(&mut self, color: Color) {
        self.renderer.clear_frame(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.renderer.fill_rect(rect, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.renderer.fill_circle(center, radius, color);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.renderer.fill_text(text, pos, color);
    }
}

impl Audio for WebPlatform {
    fn play_hit_sound(&mut self) {
        self.audio.play_hit_sound();
    }

    fn play_background_music(&mut self) {
        self.audio.play_background_music();
    }

    fn pause_background_music(&mut self) {
        self.audio.pause_background_music();
    }
}

impl Ui for WebPlatform {
    fn show_modal(&mut self, modal: Modal) {
        self.ui.show_modal(modal);
    }

    fn set_score_text(&mut self, score: u32) {
        self.ui.set_score_text(score);
    }

    fn set_lives_text(&mut self, lives: u32) {
        self.ui.set_lives_text(lives);
    }

    fn set_time_text(&mut self, seconds: u32) {
        self.ui.set_time_text(seconds);
    }

    fn show_panel(&mut self, panel: PanelId) {
        self.ui.show_panel(panel);
    }

    fn hide_panel(&mut self, panel: PanelId) {
        self.ui.hide_panel(panel);
    }

    fn set_theme_background(&mut self, theme: Theme) {
        self.ui.set_theme_background(theme);
    }
}
