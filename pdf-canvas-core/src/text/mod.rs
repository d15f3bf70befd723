//! Font family descriptors and their shared registry.

pub mod family;
pub mod registry;

pub use family::{FamilyHandle, FamilyKey, FontFamily, GenericFamily};
pub use registry::FamilyRegistry;
