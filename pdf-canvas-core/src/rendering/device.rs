//! Device trait for rendering backend abstraction.
//!
//! A [`Device`] is the drawable surface behind a drawing context. Backends
//! (raster, PDF writer, GPU) implement it; the context only talks to this
//! trait, so the same drawing code runs against any of them.

use super::graphics_state::{Color, FillRule, StrokeProps};
use crate::core::error::DrawResult;
use crate::text::FontFamily;

/// How to draw a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDrawMode {
    Fill(FillRule),
    Stroke,
    FillStroke(FillRule),
}

/// Paint for drawing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
}

impl Paint {
    pub fn black() -> Self {
        Paint::Solid(Color::black())
    }

    pub fn from_color(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::black()
    }
}

/// A surface that can carry out drawing operations.
///
/// Path construction calls build the device's current path; `draw_path` and
/// `clip_path` consume it. `save_state`/`restore_state` are always called in
/// matched pairs by the context, once per frame.
pub trait Device {
    /// Move the current point to (x, y) starting a new subpath.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight line segment from the current point to (x, y).
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a cubic Bezier curve from the current point.
    fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn close_path(&mut self);

    /// Paint the current path and start a new one.
    fn draw_path(
        &mut self,
        mode: PathDrawMode,
        paint: &Paint,
        stroke_props: &StrokeProps,
    ) -> DrawResult<()>;

    /// Intersect the clip region with the current path.
    fn clip_path(&mut self, rule: FillRule) -> DrawResult<()>;

    fn save_state(&mut self);

    fn restore_state(&mut self);

    /// Concatenate a transformation matrix `[a b c d e f]` to the device CTM.
    fn concat_matrix(&mut self, matrix: &[f64; 6]);

    /// Draw `text` at the current text position.
    ///
    /// Returns the advance width in user space units.
    fn draw_text(
        &mut self,
        text: &str,
        family: &FontFamily,
        font_size: f64,
        paint: &Paint,
    ) -> DrawResult<f64>;

    /// Page (width, height) in user space units.
    fn page_bounds(&self) -> (f64, f64);

    /// Realise a font family for this backend.
    ///
    /// Called only when the registry has no family of that name yet. The
    /// returned descriptor may still lose against a concurrent insertion, so
    /// creating it must have no side effects a caller could observe.
    fn create_family(&mut self, name: &str) -> FontFamily {
        FontFamily::generic(name)
    }
}

#[cfg(feature = "recording-device")]
pub use recording::{RecordedFamily, RecordingDevice};

#[cfg(feature = "recording-device")]
mod recording {
    use std::any::Any;

    use super::*;
    use crate::text::{FamilyHandle, FamilyKey};

    /// Handle produced by [`RecordingDevice::create_family`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordedFamily {
        /// Order in which the device realised this family, starting at 1
        pub serial: u32,
    }

    impl FamilyHandle for RecordedFamily {
        fn backend_name(&self) -> &'static str {
            "recording"
        }

        fn debug_label(&self) -> String {
            format!("serial {}", self.serial)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Device that records every call instead of drawing.
    ///
    /// Useful for tests and as a reference implementation of [`Device`].
    #[derive(Debug, Default)]
    pub struct RecordingDevice {
        page_width: f64,
        page_height: f64,
        depth: usize,
        families_created: u32,
        substitutes: Vec<(FamilyKey, String)>,
        operations: Vec<String>,
    }

    impl RecordingDevice {
        pub fn new(width: f64, height: f64) -> Self {
            RecordingDevice {
                page_width: width,
                page_height: height,
                ..Default::default()
            }
        }

        /// Realise `realised` whenever `requested` is asked for, the way a
        /// backend falls back to an installed font.
        pub fn with_substitute(mut self, requested: &str, realised: impl Into<String>) -> Self {
            self.substitutes
                .push((FamilyKey::new(requested), realised.into()));
            self
        }

        pub fn operations(&self) -> &[String] {
            &self.operations
        }

        pub fn clear_operations(&mut self) {
            self.operations.clear();
        }

        /// Current nesting of `save_state` calls.
        pub fn depth(&self) -> usize {
            self.depth
        }

        pub fn families_created(&self) -> u32 {
            self.families_created
        }

        fn record(&mut self, op: String) {
            self.operations.push(op);
        }
    }

    impl Device for RecordingDevice {
        fn move_to(&mut self, x: f64, y: f64) {
            self.record(format!("move_to({},{})", x, y));
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.record(format!("line_to({},{})", x, y));
        }

        fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
            self.record(format!(
                "curve_to({},{},{},{},{},{})",
                cp1x, cp1y, cp2x, cp2y, x, y
            ));
        }

        fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.record(format!("rect({},{},{},{})", x, y, width, height));
        }

        fn close_path(&mut self) {
            self.record("close_path".to_string());
        }

        fn draw_path(
            &mut self,
            mode: PathDrawMode,
            _paint: &Paint,
            stroke_props: &StrokeProps,
        ) -> DrawResult<()> {
            let op = match mode {
                PathDrawMode::Fill(rule) => format!("draw_path(fill, {:?})", rule),
                PathDrawMode::Stroke => format!("draw_path(stroke, {})", stroke_props.line_width),
                PathDrawMode::FillStroke(rule) => format!("draw_path(fill_stroke, {:?})", rule),
            };
            self.record(op);
            Ok(())
        }

        fn clip_path(&mut self, rule: FillRule) -> DrawResult<()> {
            self.record(format!("clip_path({:?})", rule));
            Ok(())
        }

        fn save_state(&mut self) {
            self.depth += 1;
            self.record("save_state".to_string());
        }

        fn restore_state(&mut self) {
            self.depth = self.depth.saturating_sub(1);
            self.record("restore_state".to_string());
        }

        fn concat_matrix(&mut self, matrix: &[f64; 6]) {
            self.record(format!("concat_matrix({:?})", matrix));
        }

        fn draw_text(
            &mut self,
            text: &str,
            family: &FontFamily,
            font_size: f64,
            _paint: &Paint,
        ) -> DrawResult<f64> {
            self.record(format!("draw_text({}, {}, {:?})", family.name(), font_size, text));
            // Half an em per character
            Ok(text.chars().count() as f64 * font_size * 0.5)
        }

        fn page_bounds(&self) -> (f64, f64) {
            (self.page_width, self.page_height)
        }

        fn create_family(&mut self, name: &str) -> FontFamily {
            self.families_created += 1;
            self.record(format!("create_family({})", name));
            let key = FamilyKey::new(name);
            let realised = self
                .substitutes
                .iter()
                .find(|(requested, _)| *requested == key)
                .map_or(name, |(_, realised)| realised.as_str());
            FontFamily::new(
                realised,
                RecordedFamily {
                    serial: self.families_created,
                },
            )
        }
    }
}

#[cfg(all(test, feature = "recording-device"))]
mod tests {
    use super::*;

    #[test]
    fn test_device_operations() {
        let mut device = RecordingDevice::new(612.0, 792.0);

        device.move_to(100.0, 200.0);
        device.line_to(300.0, 400.0);
        device
            .draw_path(PathDrawMode::Stroke, &Paint::black(), &StrokeProps::default())
            .unwrap();

        let ops = device.operations();
        assert_eq!(ops[0], "move_to(100,200)");
        assert_eq!(ops[1], "line_to(300,400)");
        assert_eq!(ops[2], "draw_path(stroke, 1)");
    }

    #[test]
    fn test_state_depth() {
        let mut device = RecordingDevice::new(612.0, 792.0);

        device.save_state();
        device.save_state();
        assert_eq!(device.depth(), 2);
        device.restore_state();
        device.restore_state();
        device.restore_state();
        assert_eq!(device.depth(), 0);
    }

    #[test]
    fn test_create_family_serials() {
        let mut device = RecordingDevice::new(612.0, 792.0);

        let first = device.create_family("Helvetica");
        let second = device.create_family("Courier");

        assert_eq!(first.handle_as::<RecordedFamily>(), Some(&RecordedFamily { serial: 1 }));
        assert_eq!(second.debug_label(), "recording (serial 2)");
        assert_eq!(device.families_created(), 2);
    }

    #[test]
    fn test_create_family_substitutes() {
        let mut device = RecordingDevice::new(612.0, 792.0).with_substitute("Helvetica", "Arial");

        assert_eq!(device.create_family("HELVETICA").name(), "Arial");
        assert_eq!(device.create_family("Courier").name(), "Courier");
        assert_eq!(device.operations()[0], "create_family(HELVETICA)");
    }

    #[test]
    fn test_draw_text_advance() {
        let mut device = RecordingDevice::new(612.0, 792.0);
        let family = FontFamily::generic("Times");

        let advance = device.draw_text("abcd", &family, 10.0, &Paint::black()).unwrap();
        assert_eq!(advance, 20.0);
        assert_eq!(device.operations()[0], "draw_text(Times, 10, \"abcd\")");
    }
}
