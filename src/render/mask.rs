use crate::constants::{SPOT_LAYER_STYLE, TORCH_MASK_ID, TORCH_SPOT_ID, UV_VISIBLE_CLASS};
use anyhow::anyhow;
use torch_core::{MaskFrame, UvDiff};
use wasm_bindgen::JsCast;
use web_sys as web;

const LAYER_STYLE: &str =
    "position:fixed;inset:0;pointer-events:none;will-change:background,mask-image;";

/// The torch/spot element pair. Elements exist only while the torch is on.
#[derive(Default)]
pub struct MaskElements {
    torch: Option<web::HtmlElement>,
    spot: Option<web::HtmlElement>,
}

impl MaskElements {
    pub fn apply(
        &mut self,
        document: &web::Document,
        frame: Option<MaskFrame>,
    ) -> anyhow::Result<()> {
        let Some(frame) = frame else {
            self.remove();
            return Ok(());
        };
        if self.torch.is_none() {
            self.torch = Some(create_layer(document, TORCH_MASK_ID, 9998, "")?);
        }
        if self.spot.is_none() {
            self.spot = Some(create_layer(document, TORCH_SPOT_ID, 9999, SPOT_LAYER_STYLE)?);
        }
        if let Some(el) = &self.torch {
            _ = el.style().set_property("background", &frame.torch.to_css());
        }
        if let Some(el) = &self.spot {
            let css = frame.spot.to_css();
            let style = el.style();
            _ = style.set_property("mask-image", &css);
            _ = style.set_property("-webkit-mask-image", &css);
        }
        Ok(())
    }

    pub fn remove(&mut self) {
        for el in [self.torch.take(), self.spot.take()].into_iter().flatten() {
            el.remove();
        }
    }
}

/// `extra` is appended to the shared layer style. The spot layer brightens
/// what lies under it; its mask keeps that to the beam.
fn create_layer(
    document: &web::Document,
    id: &str,
    z: i32,
    extra: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el: web::HtmlElement = document
        .create_element("div")
        .map_err(|e| anyhow!("create {}: {:?}", id, e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    el.set_id(id);
    _ = el.set_attribute("aria-hidden", "true");
    _ = el.set_attribute("style", &format!("{}{}z-index:{};", LAYER_STYLE, extra, z));
    let body = document.body().ok_or_else(|| anyhow!("no body"))?;
    body.append_child(&el).map_err(|e| anyhow!("{:?}", e))?;
    Ok(el)
}

/// Apply a UV scan diff; ids index into `elements`.
pub fn apply_uv_diff(elements: &[web::Element], diff: &UvDiff) {
    for &id in &diff.show {
        if let Some(el) = elements.get(id as usize) {
            _ = el.class_list().add_1(UV_VISIBLE_CLASS);
        }
    }
    for &id in &diff.hide {
        if let Some(el) = elements.get(id as usize) {
            _ = el.class_list().remove_1(UV_VISIBLE_CLASS);
        }
    }
}
