//! Canvas 2D backend

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{HAlign, Scene, TextItem, VAlign};
use crate::consts::FONT_FAMILY;

/// Draws scenes into a canvas, scaled to its backing size
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    size: (u32, u32),
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            size: (canvas.width(), canvas.height()),
        })
    }

    pub fn render(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let sx = self.size.0 as f64 / scene.size.x as f64;
        let sy = self.size.1 as f64 / scene.size.y as f64;

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.set_fill_style_str(&scene.background.to_css());
        ctx.fill_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);

        // Scene units from here on
        ctx.scale(sx, sy)?;

        for text in scene.texts() {
            self.draw_text(&text)?;
        }

        for paddle in &scene.paddles {
            ctx.set_fill_style_str(&paddle.color.to_css());
            ctx.fill_rect(
                paddle.pos.x as f64,
                paddle.pos.y as f64,
                paddle.size.x as f64,
                paddle.size.y as f64,
            );
        }

        let ball = &scene.ball;
        let center = ball.center();
        ctx.set_fill_style_str(&ball.color.to_css());
        ctx.begin_path();
        ctx.arc(
            center.x as f64,
            center.y as f64,
            ball.radius as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        ctx.fill();

        Ok(())
    }

    fn draw_text(&self, item: &TextItem) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_font(&format!("{}px {}", item.size, FONT_FAMILY));
        ctx.set_fill_style_str(&item.color.to_css());
        ctx.set_text_baseline("top");

        let metrics = ctx.measure_text(&item.text)?;
        let width = metrics.width();
        let height = metrics.actual_bounding_box_ascent() + metrics.actual_bounding_box_descent();

        let x = match item.h_align {
            HAlign::Left => item.anchor.x as f64,
            HAlign::Center => item.anchor.x as f64 - width / 2.0,
        };
        let y = match item.v_align {
            VAlign::Top => item.anchor.y as f64,
            VAlign::Middle => item.anchor.y as f64 - height / 2.0,
        };
        ctx.fill_text(&item.text, x, y)
    }
}
