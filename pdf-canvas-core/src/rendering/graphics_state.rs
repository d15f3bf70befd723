//! Drawing settings captured at every save point.
//!
//! [`GraphicsState`] is the snapshot a [`DrawingContext`](super::DrawingContext)
//! pushes onto its state stack. It follows the PDF graphics state
//! (ISO 32000-1 section 8.4) restricted to what the device layer consumes.

use std::sync::Arc;

use crate::text::FontFamily;

/// Identity transform `[a b c d e f]`.
pub const IDENTITY_MATRIX: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Line cap style (ISO 32000-1 8.4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Stroke is squared off at the endpoint
    #[default]
    Butt = 0,
    /// Semicircular arc centered at the endpoint
    Round = 1,
    /// Stroke continues half a line width beyond the endpoint
    ProjectingSquare = 2,
}

/// Line join style (ISO 32000-1 8.4.3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

/// Fill rule for path filling and clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Nonzero winding number rule
    #[default]
    NonZero,
    EvenOdd,
}

/// Stroke properties for path rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeProps {
    /// Line width in user space units (default: 1.0)
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Maximum ratio of miter length to line width before a bevel is used
    pub miter_limit: f64,
    /// Dash lengths alternating on/off; empty means solid
    pub dash_array: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for StrokeProps {
    fn default() -> Self {
        StrokeProps {
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            dash_array: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

/// Color in one of the device color spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// 0.0 = black, 1.0 = white
    Gray(f64),
    RGB(f64, f64, f64),
    CMYK(f64, f64, f64, f64),
}

impl Color {
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    pub fn white() -> Self {
        Color::Gray(1.0)
    }

    /// Create an RGB color from byte components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::RGB(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Get RGBA components as u8 values.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match *self {
            Color::Gray(g) => {
                let v = byte(g);
                (v, v, v, 255)
            }
            Color::RGB(r, g, b) => (byte(r), byte(g), byte(b), 255),
            Color::CMYK(c, m, y, k) => {
                let k = 1.0 - k.clamp(0.0, 1.0);
                (
                    byte((1.0 - c.clamp(0.0, 1.0)) * k),
                    byte((1.0 - m.clamp(0.0, 1.0)) * k),
                    byte((1.0 - y.clamp(0.0, 1.0)) * k),
                    255,
                )
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

/// Settings of a drawing context at one point in time.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current Transformation Matrix `[a b c d e f]`:
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub ctm: [f64; 6],
    pub stroke_color: Color,
    pub fill_color: Color,
    pub stroke_props: StrokeProps,
    /// Canonical family from the registry, if a font was selected
    pub font: Option<Arc<FontFamily>>,
    pub font_size: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState {
            ctm: IDENTITY_MATRIX,
            stroke_color: Color::black(),
            fill_color: Color::black(),
            stroke_props: StrokeProps::default(),
            font: None,
            font_size: 12.0,
        }
    }
}

impl GraphicsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate `transform` onto the CTM (`CTM = transform x CTM`).
    pub fn concat_matrix(&mut self, transform: &[f64; 6]) {
        self.ctm = multiply(transform, &self.ctm);
    }

    pub fn set_matrix(&mut self, matrix: &[f64; 6]) {
        self.ctm = *matrix;
    }

    pub fn reset_matrix(&mut self) {
        self.ctm = IDENTITY_MATRIX;
    }

    /// Map a user space point into device space.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.ctm;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// Name of the selected family, if any.
    pub fn font_name(&self) -> Option<&str> {
        self.font.as_deref().map(FontFamily::name)
    }
}

/// Product of two affine matrices, `lhs` applied first.
pub fn multiply(lhs: &[f64; 6], rhs: &[f64; 6]) -> [f64; 6] {
    let [a, b, c, d, e, f] = *lhs;
    let [ra, rb, rc, rd, re, rf] = *rhs;
    [
        a * ra + b * rc,
        a * rb + b * rd,
        c * ra + d * rc,
        c * rb + d * rd,
        e * ra + f * rc + re,
        e * rb + f * rd + rf,
    ]
}
