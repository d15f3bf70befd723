//! Shared registry of font family descriptors.
//!
//! The registry hands out exactly one [`FontFamily`] per case-insensitive
//! name for as long as it lives. Entries are never evicted: descriptors are
//! immutable and cheap to keep around.
//!
//! Registries can be created and injected explicitly. A process-wide one is
//! also available through [`FamilyRegistry::global`]; it is created on first
//! access and never torn down.

use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::family::{FamilyKey, FontFamily};

static GLOBAL_REGISTRY: OnceCell<Arc<FamilyRegistry>> = OnceCell::new();

/// Thread-safe map from case-folded family name to its canonical descriptor.
#[derive(Default)]
pub struct FamilyRegistry {
    families: Mutex<FxHashMap<FamilyKey, Arc<FontFamily>>>,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Arc<FamilyRegistry> {
        GLOBAL_REGISTRY.get_or_init(|| {
            log::debug!("initializing process-wide font family registry");
            Arc::new(FamilyRegistry::new())
        })
    }

    /// Find the cached family for `name`, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<Arc<FontFamily>> {
        let key = FamilyKey::new(name);
        self.families.lock().get(&key).cloned()
    }

    /// Return the canonical descriptor for `candidate`'s name.
    ///
    /// If the name is already cached the existing descriptor wins and
    /// `candidate` is dropped. Otherwise `candidate` becomes the canonical
    /// descriptor. Concurrent callers racing on one name all get the same
    /// winner.
    pub fn cache_or_get(&self, candidate: Arc<FontFamily>) -> Arc<FontFamily> {
        let key = candidate.key();

        let (canonical, discarded) = {
            let mut families = self.families.lock();
            match families.entry(key) {
                Entry::Occupied(entry) => (Arc::clone(entry.get()), Some(candidate)),
                Entry::Vacant(entry) => (Arc::clone(entry.insert(candidate)), None),
            }
        };

        // Dropped outside the lock: the handle's destructor is backend code.
        match discarded {
            Some(loser) => {
                log::trace!(
                    "family '{}' already cached as '{}'",
                    loser.name(),
                    canonical.name()
                );
                drop(loser);
            }
            None => log::debug!("cached font family '{}'", canonical.name()),
        }

        canonical
    }

    pub fn contains(&self, name: &str) -> bool {
        self.families.lock().contains_key(&FamilyKey::new(name))
    }

    pub fn len(&self) -> usize {
        self.families.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.lock().is_empty()
    }

    /// Canonical names in case-insensitive alphabetical order.
    pub fn names(&self) -> Vec<String> {
        self.sorted_families()
            .iter()
            .map(|family| family.name().to_string())
            .collect()
    }

    /// Sorted listing of every cached family with its debug label.
    ///
    /// Meant for diagnostics; the output is stable for a given set of
    /// families.
    pub fn dump_state(&self) -> String {
        let families = self.sorted_families();

        let mut out = format!("FamilyRegistry ({} families)\n", families.len());
        for family in &families {
            out.push_str(&format!("  {}: {}\n", family.name(), family.debug_label()));
        }
        out
    }

    /// Snapshot the map under the lock, then sort outside it.
    fn sorted_families(&self) -> Vec<Arc<FontFamily>> {
        let mut families: Vec<(FamilyKey, Arc<FontFamily>)> = self
            .families
            .lock()
            .iter()
            .map(|(key, family)| (key.clone(), Arc::clone(family)))
            .collect();

        families.sort_by(|(a_key, a), (b_key, b)| {
            a_key.cmp(b_key).then_with(|| a.name().cmp(b.name()))
        });
        families.into_iter().map(|(_, family)| family).collect()
    }
}

impl fmt::Display for FamilyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump_state())
    }
}

impl fmt::Debug for FamilyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilyRegistry")
            .field("families", &self.names())
            .finish()
    }
}
