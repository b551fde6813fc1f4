//! Canvas 2D and DOM output surfaces.
//!
//! - `ParticleSurface` paints simulation sprites onto a DPR-aware canvas.
//! - `mask` owns the torch/spot elements and the UV visibility classes.
//! - `capture` turns the outgoing logo into seed pixels for a dispersion.

pub mod capture;
pub mod mask;

use crate::dom;
use anyhow::anyhow;
use std::f64::consts::TAU;
use torch_core::Sprite;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct ParticleSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    dpr: f64,
}

impl ParticleSurface {
    pub fn from_id(document: &web::Document, id: &str) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| anyhow!("missing #{}", id))?
            .dyn_into()
            .map_err(|e| anyhow!("#{} is not a canvas: {:?}", id, e))?;
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow!("no 2d context on #{}", id))?
            .dyn_into()
            .map_err(|e| anyhow!("{:?}", e))?;
        let mut surface = Self {
            canvas,
            ctx,
            dpr: 1.0,
        };
        surface.resize();
        Ok(surface)
    }

    /// Match the backing store to CSS size * devicePixelRatio.
    pub fn resize(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        self.dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    }

    /// Size in CSS px, the space simulations run in.
    pub fn css_size(&self) -> [f32; 2] {
        let rect = self.canvas.get_bounding_client_rect();
        [rect.width().max(1.0) as f32, rect.height().max(1.0) as f32]
    }

    pub fn clear(&self) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    pub fn paint(&self, sprites: &[Sprite]) -> anyhow::Result<()> {
        self.clear();
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(|e| anyhow!("set_transform: {:?}", e))?;
        let mut last_color: Option<[f32; 3]> = None;
        for s in sprites {
            if last_color != Some(s.color) {
                self.ctx.set_fill_style_str(&rgb_css(s.color));
                last_color = Some(s.color);
            }
            self.ctx.set_global_alpha(s.alpha.clamp(0.0, 1.0) as f64);
            self.ctx.begin_path();
            self.ctx
                .arc(s.x as f64, s.y as f64, s.radius as f64, 0.0, TAU)
                .map_err(|e| anyhow!("arc: {:?}", e))?;
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }
}

#[inline]
fn rgb_css(c: [f32; 3]) -> String {
    let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({},{},{})", to8(c[0]), to8(c[1]), to8(c[2]))
}
