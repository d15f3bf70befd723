//! Device abstraction layer.
//!
//! This module provides the pieces a drawing API needs on top of a backend:
//! - A Device trait for backend abstraction
//! - Graphics state and its save/restore stack
//! - A drawing context that ties them to the font family registry

pub mod context;
pub mod device;
pub mod graphics_state;
pub mod state_stack;

// Re-export key types
pub use context::{ContextOptions, DrawingContext};
pub use device::{Device, Paint, PathDrawMode};
pub use graphics_state::{
    Color, FillRule, GraphicsState, IDENTITY_MATRIX, LineCap, LineJoin, StrokeProps,
};
pub use state_stack::{FrameId, FrameStatus, SavedState, StateStack};

#[cfg(feature = "recording-device")]
pub use device::{RecordedFamily, RecordingDevice};
