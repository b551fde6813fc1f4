use crate::constants::{DISPERSE_ALPHA_THRESHOLD, DISPERSE_SAMPLE_STEP, DISPERSE_SELECTOR};
use anyhow::anyhow;
use torch_core::{AnchorRect, Seeding, SourceImage};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Seeding for the element marked `data-disperse`: its image pixels when
/// readable, its rectangle otherwise, the whole viewport if absent.
pub fn dispersion_seeding(document: &web::Document) -> Seeding {
    let el = match document.query_selector(DISPERSE_SELECTOR) {
        Ok(Some(el)) => el,
        _ => {
            log::debug!("[transition] no {} element, seeding viewport", DISPERSE_SELECTOR);
            return Seeding::Uniform;
        }
    };
    let rect = el.get_bounding_client_rect();
    let anchor = AnchorRect {
        x: rect.left() as f32,
        y: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    };
    let Some(img) = el.dyn_ref::<web::HtmlImageElement>() else {
        return Seeding::Rect(anchor);
    };
    match capture_image(document, img) {
        Ok(image) => {
            let points = image.decompose(DISPERSE_SAMPLE_STEP, DISPERSE_ALPHA_THRESHOLD);
            log::debug!("[transition] decomposed logo into {} points", points.len());
            Seeding::Image { anchor, points }
        }
        Err(e) => {
            // Tainted cross-origin images cannot be read back.
            log::debug!("[transition] logo capture failed: {:?}", e);
            Seeding::Rect(anchor)
        }
    }
}

fn capture_image(
    document: &web::Document,
    img: &web::HtmlImageElement,
) -> anyhow::Result<SourceImage> {
    let (w, h) = (img.natural_width(), img.natural_height());
    if w == 0 || h == 0 {
        return Err(anyhow!("image not loaded"));
    }
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    ctx.draw_image_with_html_image_element(img, 0.0, 0.0)
        .map_err(|e| anyhow!("draw_image: {:?}", e))?;
    let data = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(|e| anyhow!("get_image_data: {:?}", e))?;
    Ok(SourceImage::new(w, h, data.data().0)?)
}
