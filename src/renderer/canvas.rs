//! `Display` over a `CanvasRenderingContext2d`

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::platform::{Color, Display, Rect};

/// Font used for brick durability digits
const LABEL_FONT: &str = "16px Arial";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Take the 2D context of `canvas`, sizing it to the playfield
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        ctx.set_font(LABEL_FONT);

        Ok(Self {
            ctx,
            width: f64::from(CANVAS_WIDTH),
            height: f64::from(CANVAS_HEIGHT),
        })
    }
}

impl Display for CanvasRenderer {
    fn clear_frame(&mut self, color: Color) {
        // A translucent fill leaves the previous frames showing as a trail
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(rect.pos.x),
            f64::from(rect.pos.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        self.ctx
            .arc(
                f64::from(center.x),
                f64::from(center.y),
                f64::from(radius),
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_text(text, f64::from(pos.x), f64::from(pos.y))
            .ok();
    }
}
