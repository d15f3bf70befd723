//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pdf_canvas_core::text::FontFamily;
use pdf_canvas_core::{SavedState, StateStack};

/// Route `log` output through the test harness. Enable with `RUST_LOG=debug`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Push one fresh frame per snapshot, returning the handles bottom to top.
pub fn push_all<S: Clone>(stack: &mut StateStack<S>, snapshots: &[S]) -> Vec<SavedState<S>> {
    snapshots
        .iter()
        .map(|snapshot| stack.push_new(snapshot.clone()))
        .collect()
}

pub fn family(name: &str) -> Arc<FontFamily> {
    Arc::new(FontFamily::generic(name))
}
