//! Font family descriptors.
//!
//! A [`FontFamily`] pairs a family name with whatever the backend needs to
//! realise it. Names are compared ignoring case, so "Arial" and "ARIAL" are
//! the same family.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Backend-specific realization of a font family.
///
/// Handles are shared across threads through the registry and must not
/// expose interior mutability that needs the caller's lock.
pub trait FamilyHandle: fmt::Debug + Send + Sync {
    /// Short identifier of the backend that produced this handle.
    fn backend_name(&self) -> &'static str;

    /// Human readable description used in registry dumps.
    fn debug_label(&self) -> String {
        format!("{self:?}")
    }

    fn as_any(&self) -> &dyn Any;
}

/// Handle for devices without native font support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenericFamily;

impl FamilyHandle for GenericFamily {
    fn backend_name(&self) -> &'static str {
        "generic"
    }

    fn debug_label(&self) -> String {
        "unrealized".to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Case-folded family name, the registry's map key.
///
/// Folding is per character, so context-dependent rules such as the Greek
/// final sigma do not make two spellings of one name compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FamilyKey(String);

impl FamilyKey {
    pub fn new(name: &str) -> Self {
        FamilyKey(name.chars().flat_map(char::to_lowercase).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FamilyKey {
    fn from(name: &str) -> Self {
        FamilyKey::new(name)
    }
}

/// A named font family and its backend handle.
pub struct FontFamily {
    name: String,
    handle: Box<dyn FamilyHandle>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, handle: impl FamilyHandle + 'static) -> Self {
        FontFamily {
            name: name.into(),
            handle: Box::new(handle),
        }
    }

    /// A family with no backend realization.
    pub fn generic(name: impl Into<String>) -> Self {
        FontFamily::new(name, GenericFamily)
    }

    /// The same backend handle under a different name.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        FontFamily {
            name: name.into(),
            handle: self.handle,
        }
    }

    /// The name as given when the family was created.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> FamilyKey {
        FamilyKey::new(&self.name)
    }

    pub fn handle(&self) -> &dyn FamilyHandle {
        self.handle.as_ref()
    }

    /// Borrow the handle as its concrete backend type.
    pub fn handle_as<T: FamilyHandle + 'static>(&self) -> Option<&T> {
        self.handle.as_any().downcast_ref::<T>()
    }

    /// Whether both descriptors name the same family, ignoring case.
    pub fn same_family(&self, other: &FontFamily) -> bool {
        self.key() == other.key()
    }

    pub fn debug_label(&self) -> String {
        format!("{} ({})", self.handle.backend_name(), self.handle.debug_label())
    }
}

impl PartialEq for FontFamily {
    fn eq(&self, other: &Self) -> bool {
        self.same_family(other)
    }
}

impl Eq for FontFamily {}

impl Hash for FontFamily {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFamily")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .finish()
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
