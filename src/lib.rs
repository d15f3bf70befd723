//! # PDF-Canvas: device abstraction for a PDF-oriented drawing API
//!
//! PDF-Canvas sits between drawing code and a rendering backend. Drawing code
//! talks to a [`DrawingContext`]; the backend implements [`Device`]. The
//! context keeps the two pieces of state every backend needs in the same
//! shape:
//!
//! - **Graphics state stack**: nested save/restore. Restoring an outer frame
//!   unwinds every frame saved after it, so a caller can bail out of several
//!   levels of nesting in one call.
//! - **Font family registry**: one canonical [`FontFamily`] per
//!   case-insensitive name, shared by every context and every thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use pdf_canvas::{ContextOptions, DrawingContext, FamilyRegistry, RecordingDevice};
//!
//! let registry = Arc::new(FamilyRegistry::new());
//! let mut ctx = DrawingContext::with_registry(
//!     RecordingDevice::new(612.0, 792.0),
//!     registry,
//!     ContextOptions::default(),
//! )?;
//!
//! let outer = ctx.save();
//! ctx.set_font("Helvetica", 12.0)?;
//! ctx.save();
//! ctx.translate(72.0, 720.0);
//! ctx.show_text("Hello")?;
//!
//! // Closes both saves at once
//! assert_eq!(ctx.restore(&outer)?, 2);
//! assert!(ctx.state().font.is_none());
//! # Ok::<(), pdf_canvas::DrawError>(())
//! ```
//!
//! ## Errors
//!
//! Restoring a frame twice, or a frame that belongs to another context, is a
//! bug in the caller's save/restore pairing and fails with
//! [`DrawError::AlreadyRestored`] or [`DrawError::InvalidTarget`]. Such
//! restores are never silently ignored.
//!
//! ## Logging
//!
//! The crates log through the `log` facade. Install any logger (for example
//! `env_logger`) and set `RUST_LOG=pdf_canvas_core=debug` to see registry
//! insertions and multi-frame unwinds.

pub use pdf_canvas_core::core;
pub use pdf_canvas_core::rendering;
pub use pdf_canvas_core::text;

// Re-export main types for convenience
pub use pdf_canvas_core::{
    ContextOptions, Device, DrawError, DrawResult, DrawingContext, FamilyHandle, FamilyRegistry,
    FontFamily, FrameStatus, GraphicsState, SavedState, StateStack,
};

#[cfg(feature = "recording-device")]
pub use pdf_canvas_core::RecordingDevice;
