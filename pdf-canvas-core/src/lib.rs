//! Core of the pdf-canvas drawing API.
//!
//! Two pieces carry the invariants of the device layer:
//!
//! - [`StateStack`]: nested save/restore for one drawing context, including
//!   restoring straight to an outer frame, which unwinds every frame saved
//!   after it.
//! - [`FamilyRegistry`]: a thread-safe cache handing out one canonical
//!   [`FontFamily`] per case-insensitive name.
//!
//! [`DrawingContext`] consumes both on behalf of a [`Device`] backend.

pub mod core;
pub mod rendering;
pub mod text;

pub use crate::core::{DrawError, DrawResult};
pub use rendering::{
    ContextOptions, Device, DrawingContext, FrameStatus, GraphicsState, SavedState, StateStack,
};
pub use text::{FamilyHandle, FamilyRegistry, FontFamily};

#[cfg(feature = "recording-device")]
pub use rendering::RecordingDevice;
