//! Drawing context tying a device to its state stack and font registry.
//!
//! The [`DrawingContext`] coordinates:
//! - the working graphics state and its save/restore stack
//! - font family resolution through a shared [`FamilyRegistry`]
//! - forwarding of path, paint and text operations to the [`Device`]

use std::sync::Arc;

use super::device::{Device, Paint, PathDrawMode};
use super::graphics_state::{Color, FillRule, GraphicsState, IDENTITY_MATRIX, LineCap, LineJoin};
use super::state_stack::{SavedState, StateStack};
use crate::core::error::{DrawError, DrawResult};
use crate::text::{FamilyKey, FamilyRegistry, FontFamily};

/// Run-time configuration of a drawing context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOptions {
    /// Family selected before any `set_font` call
    pub default_family: Option<String>,
    pub default_font_size: f64,
    /// Transform applied to the baseline state, e.g. a y-axis flip
    pub initial_matrix: [f64; 6],
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions {
            default_family: None,
            default_font_size: 12.0,
            initial_matrix: IDENTITY_MATRIX,
        }
    }
}

impl ContextOptions {
    pub fn with_default_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.default_family = Some(family.into());
        self.default_font_size = size;
        self
    }

    pub fn with_initial_matrix(mut self, matrix: [f64; 6]) -> Self {
        self.initial_matrix = matrix;
        self
    }
}

/// A drawing context over a device.
///
/// Every `save` returns a frame handle. Restoring a frame brings the working
/// state back to what it was at that save and unwinds every frame saved after
/// it, keeping the device's own save depth in step.
///
/// A context does no locking of its own. It is `Send` when its device is, so
/// it can be moved to another thread or wrapped in a mutex; the registry it
/// resolves fonts through is shared.
pub struct DrawingContext<D: Device> {
    device: D,
    state: GraphicsState,
    stack: StateStack<GraphicsState>,
    registry: Arc<FamilyRegistry>,
    options: ContextOptions,
}

impl<D: Device> DrawingContext<D> {
    /// Create a context with default options over the process-wide registry.
    pub fn new(device: D) -> Self {
        Self::from_parts(
            device,
            Arc::clone(FamilyRegistry::global()),
            ContextOptions::default(),
            GraphicsState::default(),
        )
    }

    /// Create a context resolving fonts through `registry`.
    ///
    /// Fails if `options.default_font_size` is not a positive number or
    /// `options.default_family` is not a usable family name.
    pub fn with_registry(
        mut device: D,
        registry: Arc<FamilyRegistry>,
        options: ContextOptions,
    ) -> DrawResult<Self> {
        let mut state = GraphicsState {
            ctm: options.initial_matrix,
            font_size: options.default_font_size,
            ..GraphicsState::default()
        };

        check_font_size(options.default_font_size)?;
        if let Some(name) = options.default_family.as_deref() {
            state.font = Some(resolve_family(&registry, &mut device, name)?);
        }
        if options.initial_matrix != IDENTITY_MATRIX {
            device.concat_matrix(&options.initial_matrix);
        }

        Ok(Self::from_parts(device, registry, options, state))
    }

    fn from_parts(
        device: D,
        registry: Arc<FamilyRegistry>,
        options: ContextOptions,
        state: GraphicsState,
    ) -> Self {
        DrawingContext {
            device,
            stack: StateStack::new(state.clone()),
            state,
            registry,
            options,
        }
    }

    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GraphicsState {
        &mut self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    pub fn registry(&self) -> &Arc<FamilyRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Page (width, height) of the underlying device.
    pub fn page_bounds(&self) -> (f64, f64) {
        self.device.page_bounds()
    }

    /// Number of saves not yet restored.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The innermost saved frame, or the baseline if nothing is saved.
    pub fn current_frame(&self) -> &SavedState<GraphicsState> {
        self.stack.current()
    }

    // === Save / Restore ===

    /// Snapshot the working state and push it.
    pub fn save(&mut self) -> SavedState<GraphicsState> {
        let frame = self.stack.push_new(self.state.clone());
        self.device.save_state();
        frame
    }

    /// Restore the working state captured by `frame`.
    ///
    /// Frames saved after `frame` are unwound as well. Returns how many frames
    /// were popped. On error neither the working state nor the device is
    /// touched.
    pub fn restore(&mut self, frame: &SavedState<GraphicsState>) -> DrawResult<usize> {
        let popped = self.stack.restore(frame)?;
        self.state = frame.snapshot().clone();
        for _ in 0..popped {
            self.device.restore_state();
        }
        Ok(popped)
    }

    /// Restore the innermost saved frame.
    pub fn restore_last(&mut self) -> DrawResult<()> {
        let Some(top) = self.stack.top().cloned() else {
            return Err(DrawError::invalid_argument(
                "restore without a matching save",
            ));
        };
        self.restore(&top).map(|_| ())
    }

    // === Transform ===

    pub fn concat_matrix(&mut self, matrix: &[f64; 6]) {
        self.state.concat_matrix(matrix);
        self.device.concat_matrix(matrix);
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.concat_matrix(&[1.0, 0.0, 0.0, 1.0, tx, ty]);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concat_matrix(&[sx, 0.0, 0.0, sy, 0.0, 0.0]);
    }

    // === Paint State ===

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    pub fn set_line_width(&mut self, width: f64) -> DrawResult<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(DrawError::invalid_argument(format!(
                "line width must be a non-negative number, got {}",
                width
            )));
        }
        self.state.stroke_props.line_width = width;
        Ok(())
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.stroke_props.line_cap = cap;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.stroke_props.line_join = join;
    }

    /// Set the dash pattern. An empty array means a solid line.
    pub fn set_dash(&mut self, dash_array: Vec<f64>, dash_offset: f64) -> DrawResult<()> {
        if dash_array.iter().any(|len| !len.is_finite() || *len < 0.0) {
            return Err(DrawError::invalid_argument(
                "dash lengths must be non-negative numbers",
            ));
        }
        if !dash_array.is_empty() && dash_array.iter().all(|len| *len == 0.0) {
            return Err(DrawError::invalid_argument("dash lengths are all zero"));
        }
        self.state.stroke_props.dash_array = dash_array;
        self.state.stroke_props.dash_offset = dash_offset;
        Ok(())
    }

    // === Fonts ===

    /// Select family `name` at `size` for subsequent text.
    pub fn set_font(&mut self, name: &str, size: f64) -> DrawResult<Arc<FontFamily>> {
        check_font_size(size)?;
        let family = self.resolve_family(name)?;
        self.state.font = Some(Arc::clone(&family));
        self.state.font_size = size;
        Ok(family)
    }

    /// The canonical family for `name`, realising it on the device if the
    /// registry has not seen it yet.
    pub fn resolve_family(&mut self, name: &str) -> DrawResult<Arc<FontFamily>> {
        resolve_family(&self.registry, &mut self.device, name)
    }

    // === Paths ===

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.device.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.device.line_to(x, y);
    }

    pub fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.device.curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.device.rect(x, y, width, height);
    }

    pub fn close_path(&mut self) {
        self.device.close_path();
    }

    pub fn fill(&mut self, rule: FillRule) -> DrawResult<()> {
        let paint = Paint::from_color(self.state.fill_color);
        self.device
            .draw_path(PathDrawMode::Fill(rule), &paint, &self.state.stroke_props)
    }

    pub fn stroke(&mut self) -> DrawResult<()> {
        let paint = Paint::from_color(self.state.stroke_color);
        self.device
            .draw_path(PathDrawMode::Stroke, &paint, &self.state.stroke_props)
    }

    /// Fill then stroke the current path. The device receives the fill paint.
    pub fn fill_and_stroke(&mut self, rule: FillRule) -> DrawResult<()> {
        let paint = Paint::from_color(self.state.fill_color);
        self.device
            .draw_path(PathDrawMode::FillStroke(rule), &paint, &self.state.stroke_props)
    }

    pub fn clip(&mut self, rule: FillRule) -> DrawResult<()> {
        self.device.clip_path(rule)
    }

    // === Text ===

    /// Draw `text` with the selected font and fill color.
    ///
    /// Returns the advance width reported by the device.
    pub fn show_text(&mut self, text: &str) -> DrawResult<f64> {
        let Some(family) = self.state.font.as_deref() else {
            return Err(DrawError::invalid_argument("no font selected"));
        };
        let paint = Paint::from_color(self.state.fill_color);
        self.device
            .draw_text(text, family, self.state.font_size, &paint)
    }
}

fn check_font_size(size: f64) -> DrawResult<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(DrawError::invalid_argument(format!(
            "font size must be positive, got {}",
            size
        )))
    }
}

fn resolve_family<D: Device>(
    registry: &FamilyRegistry,
    device: &mut D,
    name: &str,
) -> DrawResult<Arc<FontFamily>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DrawError::invalid_argument("empty font family name"));
    }

    if let Some(family) = registry.lookup(name) {
        return Ok(family);
    }

    let mut candidate = device.create_family(name);
    if candidate.key() != FamilyKey::new(name) {
        // Cache under the requested name so later lookups hit
        log::debug!(
            "device realised family '{}' for requested name '{}'",
            candidate.name(),
            name
        );
        candidate = candidate.renamed(name);
    }
    Ok(registry.cache_or_get(Arc::new(candidate)))
}
