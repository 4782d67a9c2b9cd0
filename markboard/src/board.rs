//! Board controller: owns the view transform, the ordered shape list, the
//! selection, and the drawing state machine.
//!
//! DESIGN
//! ======
//! The list order is the z-order: later shapes draw on top and are hit-tested
//! first. When a draw type is armed the board keeps an empty `Drawing`
//! placeholder at the end of the list; the first pointer-down puts it under
//! construction. At most one shape is ever `Drawing` and it is always last.
//!
//! The selection is an id, not a reference. It is re-validated whenever the
//! list changes, so deleting a shape can never leave it dangling.
//!
//! Input handlers return [`Action`]s for the host (cursor changes, redraw
//! requests). Everything a consumer might react to is published on the
//! board's [`EventBus`].

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::consts::{
    CLOSE_TOLERANCE_PX, DRAG_SLOP_PX, HANDLE_RADIUS_PX, MAX_RECORD_ID, POLYLINE_HIT_PX, ZOOM_IN_STEP,
    ZOOM_OUT_STEP,
};
use crate::error::BoardError;
use crate::events::{BoardEvent, CompletionRequest, EventBus, EventKind, SubscriptionId};
use crate::hit::{self, HitPart, Tolerance};
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::record::{LabelData, ShapeRecord};
use crate::registry::ShapeRegistry;
use crate::shape::{Shape, ShapeId, ShapeKind};
use crate::transform::{FitLayout, Point, Size, Transform};

/// Directives returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetCursor(String),
    RenderNeeded,
}

fn cursor(name: &str) -> Action {
    Action::SetCursor(name.to_owned())
}

/// Ticket for a background image whose decode is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundLoad {
    seq: u64,
    url: String,
}

impl BackgroundLoad {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The decoded background image.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    pub url: String,
    /// Natural pixel size.
    pub size: Size,
}

/// Outcome of [`Board::load_shape_records`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records turned into shapes.
    pub loaded: usize,
    /// One error per skipped record.
    pub skipped: Vec<BoardError>,
}

/// One annotation session.
#[derive(Debug)]
pub struct Board {
    shapes: Vec<Shape>,
    registry: ShapeRegistry,
    events: EventBus,
    config: BoardConfig,
    transform: Transform,
    fit: FitLayout,
    viewport: Size,
    background: Option<BackgroundImage>,
    latest_load: u64,
    ui: UiState,
    input: InputState,
    next_id: ShapeId,
    destroyed: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Board {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_registry(config, ShapeRegistry::new())
    }

    /// A board that resolves type tags through `registry`.
    #[must_use]
    pub fn with_registry(config: BoardConfig, registry: ShapeRegistry) -> Self {
        Self {
            shapes: Vec::new(),
            registry,
            events: EventBus::new(),
            config,
            transform: Transform::identity(),
            fit: FitLayout::default(),
            viewport: Size::default(),
            background: None,
            latest_load: 0,
            ui: UiState::default(),
            input: InputState::Idle,
            next_id: 1,
            destroyed: false,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Every shape in z-order, including a trailing drawing shape.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// The trailing `Drawing` shape, if a draw type is armed.
    #[must_use]
    pub fn drawing_shape(&self) -> Option<&Shape> {
        self.shapes.last().filter(|s| s.is_drawing())
    }

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn draw_type(&self) -> Option<&str> {
        self.ui.draw_type.as_deref()
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn fit_layout(&self) -> FitLayout {
        self.fit
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Natural size of the current background, or zero before one loads.
    #[must_use]
    pub fn resolution(&self) -> Size {
        self.background.as_ref().map(|b| b.size).unwrap_or_default()
    }

    #[must_use]
    pub fn is_pan_mode(&self) -> bool {
        self.ui.pan_mode
    }

    /// Last pointer position in image space.
    #[must_use]
    pub fn last_pointer(&self) -> Point {
        self.ui.last_pointer
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // --- Events ---

    /// A handle to the board's bus, for handlers that publish or subscribe
    /// re-entrantly.
    #[must_use]
    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    pub fn subscribe(&self, kind: EventKind, handler: impl Fn(&BoardEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // --- Registry ---

    /// Make `tag` construct/import as `kind` on this board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyShapeTag`] for a blank tag.
    pub fn register_shape_variant(&mut self, tag: &str, kind: ShapeKind) -> Result<(), BoardError> {
        self.registry.register(tag, kind)
    }

    #[must_use]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    // --- Draw type ---

    /// Arm a draw type (`None` or `""` disarms). Any unfinished construction
    /// is destroyed first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedShapeType`] when `draw_type` has no
    /// registered variant. The board is left disarmed.
    pub fn set_draw_type(&mut self, draw_type: Option<&str>) -> Result<(), BoardError> {
        if self.destroyed {
            return Ok(());
        }
        self.discard_drawing();
        let result = match draw_type.filter(|t| !t.is_empty()) {
            None => {
                self.ui.draw_type = None;
                Ok(())
            }
            Some(tag) => match self.registry.resolve(tag) {
                Ok(_) => {
                    self.ui.draw_type = Some(tag.to_owned());
                    self.arm_placeholder();
                    Ok(())
                }
                Err(e) => {
                    warn!(tag, "draw type has no registered variant");
                    self.ui.draw_type = None;
                    Err(e)
                }
            },
        };
        debug!(draw_type = ?self.ui.draw_type, "draw type changed");
        self.events.publish(&BoardEvent::ShapesChanged);
        self.events.publish(&BoardEvent::DrawTypeChanged { draw_type: self.ui.draw_type.clone() });
        result
    }

    // --- Background / viewport ---

    /// Start replacing the background image. The previous image and
    /// transform stay in effect until [`complete_background`] is called.
    ///
    /// [`complete_background`]: Board::complete_background
    pub fn begin_background(&mut self, url: &str) -> BackgroundLoad {
        self.latest_load += 1;
        info!(url, seq = self.latest_load, "background load started");
        BackgroundLoad { seq: self.latest_load, url: url.to_owned() }
    }

    /// Apply a decoded background: record its natural size and fit it to the
    /// viewport.
    ///
    /// Completions apply in arrival order, so when two loads overlap the one
    /// that finishes last wins, even if it was started first.
    pub fn complete_background(&mut self, load: BackgroundLoad, natural: Size) {
        if self.destroyed {
            return;
        }
        if load.seq < self.latest_load {
            debug!(url = %load.url, seq = load.seq, latest = self.latest_load, "older background load finished last");
        }
        info!(url = %load.url, width = natural.width, height = natural.height, "background loaded");
        self.background = Some(BackgroundImage { url: load.url, size: natural });
        self.resize();
    }

    /// Set the viewport size in CSS pixels and refit.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
        self.resize();
    }

    /// Recompute the fit layout from the current viewport and image and
    /// reset the transform to it. Safe to call repeatedly.
    pub fn resize(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(fit) = FitLayout::compute(self.viewport, self.resolution()) {
            self.fit = fit;
            self.transform = fit.transform();
        }
        self.publish_transform();
    }

    /// Reset the transform to the fit layout (the double-click gesture).
    pub fn fit_to_view(&mut self) {
        if self.destroyed {
            return;
        }
        self.transform = self.fit.transform();
        self.publish_transform();
    }

    // --- Records ---

    /// Records of every finished shape, in list order. Recomputed on each
    /// call; nothing is cached across list mutations.
    pub fn shape_records(&self) -> impl Iterator<Item = ShapeRecord> + '_ {
        let resolution = self.resolution();
        self.shapes
            .iter()
            .filter(|s| !s.is_drawing())
            .map(move |s| s.to_record(resolution))
    }

    /// Replace the shape list with `records`. Any construction in progress is
    /// discarded first. Records with an unknown type are skipped and
    /// reported; the rest still load.
    pub fn load_shape_records(&mut self, records: impl IntoIterator<Item = ShapeRecord>) -> LoadReport {
        let mut report = LoadReport::default();
        if self.destroyed {
            return report;
        }
        self.discard_drawing();
        self.shapes.clear();
        for mut record in records {
            let kind = match self.registry.resolve(&record.tag) {
                Ok(kind) => kind,
                Err(e) => {
                    warn!(tag = %record.tag, id = record.id, "skipping record with unsupported type");
                    report.skipped.push(e);
                    continue;
                }
            };
            if record.id > MAX_RECORD_ID {
                let fresh = self.allocate_id();
                warn!(id = record.id, fresh, "out-of-range record id reassigned");
                record.id = fresh;
            } else if self.shapes.iter().any(|s| s.id() == record.id) {
                let fresh = self.allocate_id();
                warn!(id = record.id, fresh, "duplicate record id reassigned");
                record.id = fresh;
            } else {
                self.next_id = self.next_id.max(record.id + 1);
            }
            self.shapes.push(Shape::from_record(&record, kind));
            report.loaded += 1;
        }
        self.revalidate_selection();
        self.arm_placeholder();
        debug!(loaded = report.loaded, skipped = report.skipped.len(), "records loaded");
        self.events.publish(&BoardEvent::ShapesChanged);
        report
    }

    // --- Shape operations ---

    /// Select a finished shape by id. Unknown ids are ignored.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        if !self.shape(id).is_some_and(|s| !s.is_drawing()) {
            return false;
        }
        self.ui.selected_id = Some(id);
        self.events.publish(&BoardEvent::ShapesChanged);
        true
    }

    /// Remove a finished shape. The order of the rest is preserved. Unknown
    /// ids are ignored.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        let Some(index) = self.shapes.iter().position(|s| s.id() == id && !s.is_drawing()) else {
            return false;
        };
        self.shapes.remove(index);
        if matches!(self.input, InputState::Pressing { id: pressed, .. } if pressed == id) {
            self.input = InputState::Idle;
        }
        self.revalidate_selection();
        debug!(id, "shape deleted");
        self.events.publish(&BoardEvent::ShapesChanged);
        true
    }

    /// Relabel/recolor a shape. Unknown ids are ignored.
    pub fn set_shape_label_color(&mut self, id: ShapeId, data: LabelData) -> bool {
        let Some(shape) = self.shape_mut(id) else {
            return false;
        };
        shape.set_label_color(data);
        self.events.publish(&BoardEvent::ShapesChanged);
        true
    }

    /// Remove every shape, including any construction in progress.
    pub fn clear_shapes(&mut self) {
        if self.destroyed {
            return;
        }
        self.shapes.clear();
        self.ui.selected_id = None;
        self.input = InputState::Idle;
        self.arm_placeholder();
        debug!("shapes cleared");
        self.events.publish(&BoardEvent::ShapesCleared);
        self.events.publish(&BoardEvent::ShapesChanged);
    }

    /// Ask the host to finalize the drawing shape.
    ///
    /// Publishes [`BoardEvent::ShapeCompleted`]; if a handler confirms with
    /// label data the shape becomes `Normal` and a fresh placeholder is armed.
    /// Returns whether the shape was finalized.
    pub fn complete_drawing(&mut self) -> bool {
        let Some(index) = self.drawing_index() else {
            return false;
        };
        let shape = &self.shapes[index];
        if !shape.can_complete() {
            return false;
        }
        let event = BoardEvent::ShapeCompleted(CompletionRequest::new(shape.id(), shape.tag()));
        self.events.publish(&event);
        let reply = match event {
            BoardEvent::ShapeCompleted(request) => request.into_reply(),
            _ => None,
        };
        let Some(data) = reply else {
            debug!("completion not confirmed; shape stays in drawing state");
            return false;
        };
        let shape = &mut self.shapes[index];
        shape.finalize(data);
        debug!(id = shape.id(), tag = shape.tag(), "shape completed");
        self.input = InputState::Idle;
        self.arm_placeholder();
        self.events.publish(&BoardEvent::ShapesChanged);
        true
    }

    /// Enter or leave pan mode. Returns whether the mode changed.
    pub fn set_pan_mode(&mut self, active: bool) -> bool {
        if self.destroyed || (active && self.config.disable_pan) || self.ui.pan_mode == active {
            return false;
        }
        self.ui.pan_mode = active;
        if !active && matches!(self.input, InputState::Panning { .. }) {
            self.input = InputState::Idle;
        }
        self.events.publish(&BoardEvent::PanChanged { active });
        true
    }

    /// Detach every listener and drop all shapes. Later input is ignored.
    /// Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.events.clear();
        self.shapes.clear();
        self.background = None;
        self.ui = UiState::default();
        self.input = InputState::Idle;
        info!("board destroyed");
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        let p = self.transform.map_to_image_space(screen);
        self.ui.last_pointer = p;

        if self.ui.pan_mode {
            self.input = InputState::Panning { button, last_screen: screen };
            return vec![cursor("grabbing")];
        }
        match button {
            Button::Secondary => return self.undo_vertex(),
            Button::Middle => return Vec::new(),
            Button::Primary => {}
        }

        if let Some(index) = self.drawing_index() {
            if self.shapes[index].is_under_construction() {
                return self.continue_construction(index, p);
            }
        }

        if let Some(hit) = hit::hit_test(p, &self.shapes, self.ui.selected_id, self.tolerance()) {
            let anchor = match hit.part {
                HitPart::Handle(i) => self.shape(hit.shape_id).and_then(|s| s.handle_anchor(i)),
                HitPart::Body => None,
            };
            self.input = InputState::Pressing {
                id: hit.shape_id,
                part: hit.part,
                anchor,
                start_screen: screen,
                last_image: p,
                dragging: false,
            };
            return Vec::new();
        }

        if let Some(index) = self.drawing_index() {
            return self.start_construction(index, p);
        }
        self.input = InputState::Idle;
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        let p = self.transform.map_to_image_space(screen);
        self.ui.last_pointer = p;

        match self.input {
            InputState::Panning { button, last_screen } => {
                self.transform.translate_by(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { button, last_screen: screen };
                self.publish_transform();
                vec![Action::RenderNeeded]
            }
            InputState::Constructing { id } => {
                if let Some(index) = self.drawing_index().filter(|&i| self.shapes[i].id() == id) {
                    self.shapes[index].extend(p);
                }
                vec![Action::RenderNeeded]
            }
            InputState::Pressing { id, part, anchor, start_screen, last_image, dragging } => {
                if !dragging && start_screen.distance(screen) <= DRAG_SLOP_PX {
                    return Vec::new();
                }
                let Some(shape) = self.shape_mut(id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                match part {
                    HitPart::Body => shape.move_by(p.x - last_image.x, p.y - last_image.y),
                    HitPart::Handle(i) => shape.move_handle(i, anchor, p),
                }
                self.ui.selected_id = Some(id);
                self.input = InputState::Pressing { id, part, anchor, start_screen, last_image: p, dragging: true };
                vec![cursor("move"), Action::RenderNeeded]
            }
            InputState::Idle | InputState::PlacingVertex => {
                let mut actions = vec![cursor(self.idle_cursor())];
                if let Some(index) = self.drawing_index() {
                    let shape = &mut self.shapes[index];
                    if shape.is_under_construction() && !shape.kind().is_two_point() {
                        shape.extend(p);
                        actions.push(Action::RenderNeeded);
                    }
                }
                actions
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        let p = self.transform.map_to_image_space(screen);
        self.ui.last_pointer = p;

        if self.input.button().is_some_and(|owner| owner != button) {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Panning { .. } => vec![cursor(self.idle_cursor())],
            InputState::Constructing { id } => self.finish_drag_construction(id, p),
            InputState::PlacingVertex => Vec::new(),
            InputState::Pressing { dragging: true, .. } => {
                self.events.publish(&BoardEvent::ShapesChanged);
                vec![cursor(self.idle_cursor()), Action::RenderNeeded]
            }
            InputState::Pressing { dragging: false, .. } | InputState::Idle => {
                if button == Button::Primary {
                    self.select_at(p)
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Double-click resets the view to the fit layout.
    pub fn on_double_click(&mut self, _screen: Point) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        self.fit_to_view();
        vec![Action::RenderNeeded]
    }

    /// Zoom about the cursor, only with ctrl/meta/alt held. An empty result
    /// means the wheel was not consumed and the page may scroll.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed || self.config.disable_zoom || !modifiers.zoom_modifier() || delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { ZOOM_OUT_STEP } else { ZOOM_IN_STEP };
        self.transform.scale_around(screen, factor);
        self.publish_transform();
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if key.is_space() {
            if self.set_pan_mode(true) {
                actions.push(cursor("grab"));
            }
        } else if key.is_enter() {
            if self.complete_drawing() {
                actions.push(Action::RenderNeeded);
            }
        } else if key.is_escape() {
            if self.cancel_construction() {
                actions.push(Action::RenderNeeded);
            }
        } else if key.is_backspace() && self.has_vertex_construction() {
            actions.extend(self.undo_vertex());
        } else if key.is_delete() {
            if let Some(id) = self.ui.selected_id {
                if self.delete_shape(id) {
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        self.events.publish(&BoardEvent::KeyPressed { key, modifiers });
        actions
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed || !key.is_space() {
            return Vec::new();
        }
        if self.set_pan_mode(false) {
            return vec![cursor(self.idle_cursor())];
        }
        Vec::new()
    }

    /// Publish the context-menu request at the pointer's image-space position.
    pub fn on_context_menu(&mut self, screen: Point) {
        if self.destroyed {
            return;
        }
        let point = self.transform.map_to_image_space(screen);
        self.ui.last_pointer = point;
        self.events.publish(&BoardEvent::ContextMenu { point });
    }

    // --- Internals ---

    fn allocate_id(&mut self) -> ShapeId {
        let id = self.next_id;
        match id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => warn!(id, "shape id counter exhausted"),
        }
        id
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    fn drawing_index(&self) -> Option<usize> {
        self.shapes
            .last()
            .filter(|s| s.is_drawing())
            .map(|_| self.shapes.len() - 1)
    }

    fn has_vertex_construction(&self) -> bool {
        self.drawing_shape()
            .is_some_and(|s| s.is_under_construction() && !s.kind().is_two_point())
    }

    /// Remove the trailing drawing shape, if any.
    fn discard_drawing(&mut self) -> bool {
        if self.drawing_index().is_none() {
            return false;
        }
        if let Some(shape) = self.shapes.pop() {
            debug!(id = shape.id(), tag = shape.tag(), "unfinished shape discarded");
        }
        if matches!(self.input, InputState::Constructing { .. } | InputState::PlacingVertex) {
            self.input = InputState::Idle;
        }
        true
    }

    /// Append an empty drawing shape for the armed draw type.
    fn arm_placeholder(&mut self) {
        if self.drawing_index().is_some() {
            return;
        }
        let Some(tag) = self.ui.draw_type.clone() else {
            return;
        };
        match self.registry.resolve(&tag) {
            Ok(kind) => {
                let id = self.allocate_id();
                let color = self.config.draw_color.clone();
                self.shapes.push(Shape::new(id, tag, kind, color));
            }
            Err(_) => {
                warn!(tag = %tag, "armed draw type no longer registered; disarming");
                self.ui.draw_type = None;
            }
        }
    }

    fn revalidate_selection(&mut self) {
        if let Some(id) = self.ui.selected_id {
            if !self.shape(id).is_some_and(|s| !s.is_drawing()) {
                self.ui.selected_id = None;
            }
        }
    }

    fn tolerance(&self) -> Tolerance {
        Tolerance {
            handle: self.transform.viewport_dist_to_image(HANDLE_RADIUS_PX),
            stroke: self.transform.viewport_dist_to_image(POLYLINE_HIT_PX),
        }
    }

    fn idle_cursor(&self) -> &'static str {
        if self.ui.pan_mode {
            "grab"
        } else if self.drawing_index().is_some() {
            "crosshair"
        } else {
            "default"
        }
    }

    fn publish_transform(&self) {
        self.events.publish(&BoardEvent::TransformChanged { transform: self.transform });
    }

    fn start_construction(&mut self, index: usize, p: Point) -> Vec<Action> {
        if self.ui.selected_id.take().is_some() {
            self.events.publish(&BoardEvent::ShapesChanged);
        }
        let shape = &mut self.shapes[index];
        shape.begin(p);
        debug!(id = shape.id(), tag = shape.tag(), "construction started");
        self.input = if shape.kind().is_two_point() {
            InputState::Constructing { id: shape.id() }
        } else {
            InputState::PlacingVertex
        };
        vec![cursor("crosshair"), Action::RenderNeeded]
    }

    fn continue_construction(&mut self, index: usize, p: Point) -> Vec<Action> {
        if self.shapes[index].kind().is_two_point() {
            // An earlier release was not confirmed: start the drag over.
            return self.start_construction(index, p);
        }
        self.input = InputState::PlacingVertex;
        let tolerance = self.transform.viewport_dist_to_image(CLOSE_TOLERANCE_PX);
        if self.shapes[index].closes_at(p, tolerance) {
            self.complete_drawing();
            self.input = InputState::PlacingVertex;
        } else {
            self.shapes[index].add_vertex(p);
        }
        vec![Action::RenderNeeded]
    }

    fn finish_drag_construction(&mut self, id: ShapeId, p: Point) -> Vec<Action> {
        let Some(index) = self.drawing_index().filter(|&i| self.shapes[i].id() == id) else {
            return Vec::new();
        };
        self.shapes[index].extend(p);
        if self.shapes[index].is_degenerate() {
            self.shapes[index].reset();
            debug!(id, "zero-area shape discarded");
            return vec![Action::RenderNeeded];
        }
        self.complete_drawing();
        vec![cursor(self.idle_cursor()), Action::RenderNeeded]
    }

    /// Right-click / Backspace during a multi-point construction.
    fn undo_vertex(&mut self) -> Vec<Action> {
        if !self.has_vertex_construction() {
            return Vec::new();
        }
        let Some(index) = self.drawing_index() else {
            return Vec::new();
        };
        let remaining = self.shapes[index].remove_last_vertex();
        if remaining == 0 {
            debug!("construction discarded");
        }
        self.input = InputState::PlacingVertex;
        vec![Action::RenderNeeded]
    }

    fn cancel_construction(&mut self) -> bool {
        let Some(index) = self.drawing_index() else {
            return false;
        };
        if !self.shapes[index].is_under_construction() {
            return false;
        }
        self.shapes[index].reset();
        self.input = InputState::Idle;
        debug!("construction cancelled");
        true
    }

    fn select_at(&mut self, p: Point) -> Vec<Action> {
        if self.drawing_shape().is_some_and(Shape::is_under_construction) {
            return Vec::new();
        }
        let candidates = hit::candidates(p, &self.shapes, self.tolerance().stroke);
        let next = hit::arbitrate(&candidates, &self.shapes, self.ui.selected_id);
        if next != self.ui.selected_id {
            self.ui.selected_id = next;
            self.events.publish(&BoardEvent::ShapesChanged);
        }
        vec![Action::RenderNeeded]
    }
}
