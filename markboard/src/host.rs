//! Browser host adapter: binds a [`Board`] to a `<canvas>` element.
//!
//! This module is the only place that touches `web_sys`. It mounts the board
//! on a canvas found by selector, keeps the backing store sized to the CSS
//! box times the device pixel ratio, decodes background images
//! asynchronously, applies [`Action`]s returned by the board, and draws
//! through [`render::draw`] via a [`Surface`] over the 2D context.
//!
//! All fallible browser calls map their `JsValue` error to
//! [`BoardError::Host`]; nothing here panics.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Path2d};

use crate::board::{Action, BackgroundLoad, Board};
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::path::PathData;
use crate::render::{self, Surface};
use crate::transform::{Point, Size, Transform};

fn host_error(err: JsValue) -> BoardError {
    BoardError::Host(format!("{err:?}"))
}

// =============================================================
// Surface over CanvasRenderingContext2d
// =============================================================

/// A [`Surface`] drawing into a 2D context whose backing store is scaled by
/// the device pixel ratio.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    image: Option<&'a HtmlImageElement>,
    dpr: f64,
}

impl<'a> CanvasSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d, image: Option<&'a HtmlImageElement>, dpr: f64) -> Self {
        Self { ctx, image, dpr }
    }
}

fn to_path2d(path: &PathData) -> Result<Path2d, JsValue> {
    Path2d::new_with_path_string(&path.to_string())
}

impl Surface for CanvasSurface<'_> {
    type Error = JsValue;

    fn clear(&mut self, viewport: Size) -> Result<(), JsValue> {
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        Ok(())
    }

    fn set_transform(&mut self, t: &Transform) -> Result<(), JsValue> {
        let d = self.dpr;
        self.ctx.set_transform(t.a * d, t.b * d, t.c * d, t.d * d, t.e * d, t.f * d)
    }

    fn draw_background(&mut self, size: Size) -> Result<(), JsValue> {
        match self.image {
            Some(image) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, size.width, size.height),
            None => Ok(()),
        }
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn stroke_path(&mut self, path: &PathData) -> Result<(), JsValue> {
        self.ctx.stroke_with_path(&to_path2d(path)?);
        Ok(())
    }

    fn fill_path(&mut self, path: &PathData) -> Result<(), JsValue> {
        self.ctx.fill_with_path_2d(&to_path2d(path)?);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), JsValue> {
        self.ctx.fill_text(text, at.x, at.y)
    }
}

// =============================================================
// Background decode
// =============================================================

/// An image decode in flight. Holds no borrow of the engine, so the host can
/// await it while the board keeps handling input.
pub struct BackgroundDecode {
    load: BackgroundLoad,
    image: HtmlImageElement,
}

impl BackgroundDecode {
    /// Wait for the browser to decode the image.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Host`] if the image fails to load or decode.
    pub async fn finish(self) -> Result<DecodedBackground, BoardError> {
        let decoded: js_sys::Promise = self.image.decode();
        JsFuture::from(decoded).await.map_err(host_error)?;
        let size = Size::new(f64::from(self.image.natural_width()), f64::from(self.image.natural_height()));
        Ok(DecodedBackground { load: self.load, image: self.image, size })
    }
}

/// A decoded background ready for [`Engine::apply_background`].
pub struct DecodedBackground {
    load: BackgroundLoad,
    image: HtmlImageElement,
    size: Size,
}

impl DecodedBackground {
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

// =============================================================
// Engine
// =============================================================

/// The mounted board. Wraps [`Board`] and owns the browser canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: Option<HtmlImageElement>,
    dpr: f64,
    pub board: Board,
}

impl Engine {
    /// Mount a board on the canvas matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Configuration`] when there is no document, no
    /// element matches, the element is not a canvas, or it has no 2D context.
    pub fn mount(selector: &str, config: BoardConfig) -> Result<Self, BoardError> {
        let window = web_sys::window().ok_or_else(|| BoardError::Configuration("no window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| BoardError::Configuration("no document".to_owned()))?;
        let element = document
            .query_selector(selector)
            .map_err(|e| BoardError::Configuration(format!("bad selector `{selector}`: {e:?}")))?
            .ok_or_else(|| BoardError::Configuration(format!("no element matches `{selector}`")))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BoardError::Configuration(format!("`{selector}` is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| BoardError::Configuration(format!("2d context unavailable: {e:?}")))?
            .ok_or_else(|| BoardError::Configuration("2d context unavailable".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BoardError::Configuration("2d context has unexpected type".to_owned()))?;

        let mut engine = Self { canvas, ctx, image: None, dpr: window.device_pixel_ratio(), board: Board::new(config) };
        engine.resize();
        info!(selector, "board mounted");
        Ok(engine)
    }

    /// Resize the backing store to the canvas's CSS box and refit.
    pub fn resize(&mut self) {
        if let Some(window) = web_sys::window() {
            self.dpr = window.device_pixel_ratio();
        }
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.canvas.set_width(backing_pixels(width, self.dpr));
        self.canvas.set_height(backing_pixels(height, self.dpr));
        self.board.set_viewport(width, height);
        self.render_or_warn();
    }

    /// Start loading a new background. The current image and transform stay
    /// until the returned decode finishes and is applied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Host`] if the image element cannot be created.
    pub fn set_background_image(&mut self, url: &str) -> Result<BackgroundDecode, BoardError> {
        let image = HtmlImageElement::new().map_err(host_error)?;
        image.set_cross_origin(Some("anonymous"));
        image.set_src(url);
        let load = self.board.begin_background(url);
        Ok(BackgroundDecode { load, image })
    }

    /// Apply a decoded background, fit it, and redraw.
    pub fn apply_background(&mut self, decoded: DecodedBackground) {
        self.image = Some(decoded.image);
        self.board.complete_background(decoded.load, decoded.size);
        self.render_or_warn();
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Host`] if a canvas call fails.
    pub fn render(&self) -> Result<(), BoardError> {
        let mut surface = CanvasSurface::new(&self.ctx, self.image.as_ref(), self.dpr);
        render::draw(&mut surface, &self.board).map_err(host_error)
    }

    /// Carry out directives returned by the board's input handlers.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Host`] if setting the cursor or drawing fails.
    pub fn apply(&self, actions: &[Action]) -> Result<(), BoardError> {
        let mut redraw = false;
        for action in actions {
            match action {
                Action::SetCursor(cursor) => {
                    self.canvas.style().set_property("cursor", cursor).map_err(host_error)?;
                }
                Action::RenderNeeded => redraw = true,
            }
        }
        if redraw {
            self.render()?;
        }
        Ok(())
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.board.on_pointer_down(screen, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        self.board.on_pointer_move(screen, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.board.on_pointer_up(screen, button, modifiers)
    }

    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        self.board.on_double_click(screen)
    }

    /// A non-empty result means the wheel was consumed and the page should
    /// not scroll.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.board.on_wheel(screen, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.board.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.board.on_key_up(key, modifiers)
    }

    pub fn on_context_menu(&mut self, screen: Point) {
        self.board.on_context_menu(screen);
    }

    /// Tear down: detach listeners, drop shapes and image, blank the canvas.
    pub fn destroy(&mut self) {
        if self.board.is_destroyed() {
            return;
        }
        self.board.destroy();
        self.image = None;
        let viewport = self.board.viewport();
        let mut surface = CanvasSurface::new(&self.ctx, None, self.dpr);
        if let Err(e) = surface.clear(viewport) {
            warn!(error = ?e, "failed to clear canvas on destroy");
        }
    }

    fn render_or_warn(&self) {
        if let Err(e) = self.render() {
            warn!(error = %e, "render failed");
        }
    }
}

/// Backing-store size in device pixels for a CSS length.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_pixels(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(0.0) as u32
}

/// Load `url` as the background of a shared engine. Decode failures are
/// logged and leave the previous background in place.
pub fn load_background(engine: &Rc<RefCell<Engine>>, url: &str) {
    let decode = match engine.borrow_mut().set_background_image(url) {
        Ok(decode) => decode,
        Err(e) => {
            warn!(url, error = %e, "background load not started");
            return;
        }
    };
    let engine = Rc::clone(engine);
    let url = url.to_owned();
    wasm_bindgen_futures::spawn_local(async move {
        match decode.finish().await {
            Ok(decoded) => engine.borrow_mut().apply_background(decoded),
            Err(e) => warn!(url = %url, error = %e, "background decode failed"),
        }
    });
}
