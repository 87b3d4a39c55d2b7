//! DOM-backed render surface: a canvas for the backdrop and gauge, absolutely positioned
//! spans for the falling symbols.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use super::assets::Images;
use crate::constants::{MOON_SIZE, WIN_ANIMATION_SRC};
use crate::error::{GameError, GameResult, describe_js};
use crate::game::{FallingItem, Gauge, RenderSurface, VisualHandle};
use crate::symbol::Symbol;

pub(crate) const ITEM_ID_ATTR: &str = "data-item-id";
const MISSED_CONTAINER_ID: &str = "missingLetters";
const WIN_ANIMATION_ID: &str = "win-animation";

pub struct DomSurface {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Images,
    visuals: HashMap<VisualHandle, HtmlElement>,
    next_handle: u32,
}

impl DomSurface {
    pub fn new(document: Document, canvas: HtmlCanvasElement, images: Images) -> GameResult<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(GameError::dom)?
            .ok_or_else(|| GameError::Dom("no 2d context".into()))?
            .dyn_into()
            .map_err(|_| GameError::Dom("2d context has unexpected type".into()))?;
        Ok(Self {
            document,
            canvas,
            ctx,
            images,
            visuals: HashMap::new(),
            next_handle: 0,
        })
    }

    fn create_html(&self, tag: &str) -> Result<HtmlElement, JsValue> {
        self.document.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
    }

    fn missed_container(&self) -> Result<Element, JsValue> {
        if let Some(el) = self.document.get_element_by_id(MISSED_CONTAINER_ID) {
            return Ok(el);
        }
        let div = self.document.create_element("div")?;
        div.set_id(MISSED_CONTAINER_ID);
        body(&self.document)?.append_child(&div)?;
        Ok(div)
    }

    fn draw_image(&self, img: &HtmlImageElement, x: f64, y: f64, w: f64, h: f64) {
        // Skip images that are still loading or failed to decode.
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        if let Err(err) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h) {
            warn("drawImage", err);
        }
    }

    fn spawn_span(&mut self, item: &FallingItem) -> Result<HtmlElement, JsValue> {
        let span = self.create_html("span")?;
        span.set_class_name("fallingElement");
        span.set_inner_text(&item.symbol().to_string());
        span.set_attribute(ITEM_ID_ATTR, &item.id().0.to_string())?;
        let style = span.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{}px", item.x()))?;
        style.set_property("top", &format!("{}px", item.y()))?;
        body(&self.document)?.append_child(&span)?;
        Ok(span)
    }

    fn spawn_win_animation(&self) -> Result<(), JsValue> {
        let lottie = self.create_html("dotlottie-player")?;
        lottie.set_id(WIN_ANIMATION_ID);
        lottie.set_attribute("src", WIN_ANIMATION_SRC)?;
        lottie.set_attribute("background", "transparent")?;
        lottie.set_attribute("speed", "1")?;
        lottie.set_attribute("autoplay", "true")?;
        let style = lottie.style();
        for (name, value) in [
            ("position", "absolute"),
            ("left", "0"),
            ("top", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("z-index", "1000"),
            ("pointer-events", "none"),
        ] {
            style.set_property(name, value)?;
        }
        body(&self.document)?.append_child(&lottie)?;
        Ok(())
    }
}

impl RenderSurface for DomSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.draw_image(&self.images.background, 0.0, 0.0, w, h);
        self.draw_image(&self.images.moon, 0.0, 0.0, MOON_SIZE, MOON_SIZE);
    }

    fn draw_gauge(&mut self, gauge: &Gauge) {
        let bar = gauge.bar(self.width(), self.height());
        self.ctx.set_fill_style_str("#DDD");
        self.ctx.fill_rect(bar.x, bar.track_top, bar.width, bar.track_height);
        self.ctx.set_fill_style_str("#FF0000");
        self.ctx.fill_rect(bar.x, bar.fill_top, bar.width, bar.fill_height);

        self.ctx.set_font("16px 'Fira Code', monospace");
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str("#222");
        let label_y = (bar.fill_top - 8.0).max(18.0);
        if let Err(err) = self.ctx.fill_text(&gauge.label, bar.x + bar.width / 2.0, label_y) {
            warn("gauge label", err);
        }
    }

    fn spawn_visual(&mut self, item: &FallingItem) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        match self.spawn_span(item) {
            Ok(span) => {
                self.visuals.insert(handle, span);
            }
            Err(err) => warn("spawn item", err),
        }
        handle
    }

    fn update_visual_position(&mut self, handle: VisualHandle, x: f64, y: f64) {
        let Some(span) = self.visuals.get(&handle) else {
            return;
        };
        let style = span.style();
        if let Err(err) = style
            .set_property("left", &format!("{x}px"))
            .and_then(|_| style.set_property("top", &format!("{y}px")))
        {
            warn("move item", err);
        }
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if let Some(span) = self.visuals.remove(&handle) {
            span.remove();
        }
    }

    fn flag_visual_as_wrong(&mut self, handle: VisualHandle) {
        if let Some(span) = self.visuals.get(&handle) {
            if let Err(err) = span.style().set_property("color", "#FF0000") {
                warn("flag item", err);
            }
        }
    }

    fn append_missed(&mut self, symbol: Symbol) {
        let result = self.missed_container().and_then(|container| {
            let span = self.document.create_element("span")?;
            span.set_text_content(Some(&symbol.to_string()));
            container.append_child(&span)?;
            Ok(())
        });
        if let Err(err) = result {
            warn("missed panel", err);
        }
    }

    fn clear_missed(&mut self) {
        if let Some(container) = self.document.get_element_by_id(MISSED_CONTAINER_ID) {
            container.set_inner_html("");
        }
    }

    fn play_win_animation(&mut self) {
        if let Err(err) = self.spawn_win_animation() {
            warn("win animation", err);
        }
    }

    fn remove_win_animation(&mut self) {
        if let Some(el) = self.document.get_element_by_id(WIN_ANIMATION_ID) {
            el.remove();
        }
    }
}

fn body(document: &Document) -> Result<HtmlElement, JsValue> {
    document.body().ok_or_else(|| JsValue::from_str("no body"))
}

fn warn(what: &str, err: JsValue) {
    tracing::warn!(err = %describe_js(&err), "{what} failed");
}
