//! Property-based tests for the state stack and family registry.
//!
//! These tests use proptest to generate random inputs and verify invariants.

mod test_utils;

use std::sync::Arc;

use pdf_canvas_core::{DrawError, FamilyRegistry, StateStack};
use proptest::prelude::*;
use test_utils::*;

// ============================================================================
// State Stack Property Tests
// ============================================================================

/// Property: restoring frame k pops n-k+1 frames and exposes frame k-1
proptest! {
    #[test]
    fn prop_restore_pops_down_to_target((n, k) in (1usize..40).prop_flat_map(|n| (Just(n), 1..=n))) {
        let mut stack = StateStack::new(0usize);
        let snapshots: Vec<usize> = (1..=n).collect();
        let frames = push_all(&mut stack, &snapshots);

        prop_assert_eq!(stack.current(), &frames[n - 1]);

        let popped = stack.restore(&frames[k - 1]);
        prop_assert_eq!(popped, Ok(n - k + 1));
        prop_assert_eq!(stack.depth(), k - 1);

        if k == 1 {
            prop_assert_eq!(stack.current(), stack.baseline());
        } else {
            prop_assert_eq!(stack.current(), &frames[k - 2]);
        }
    }
}

/// Property: exactly the frames below the target stay valid
proptest! {
    #[test]
    fn prop_restore_invalidates_target_and_above((n, k) in (1usize..40).prop_flat_map(|n| (Just(n), 1..=n))) {
        let mut stack = StateStack::new(0usize);
        let snapshots: Vec<usize> = (1..=n).collect();
        let frames = push_all(&mut stack, &snapshots);

        stack.restore(&frames[k - 1]).unwrap();

        for (i, frame) in frames.iter().enumerate() {
            prop_assert_eq!(frame.is_valid(), i < k - 1);
        }
        for frame in &frames[k - 1..] {
            prop_assert_eq!(
                stack.restore(frame),
                Err(DrawError::AlreadyRestored { frame: frame.id() })
            );
        }
    }
}

// ============================================================================
// Registry Property Tests
// ============================================================================

/// Property: every case variant of a name resolves to the first cached instance
proptest! {
    #[test]
    fn prop_case_variants_are_idempotent(name in "[a-zA-Z][a-zA-Z ]{0,15}", flips in prop::collection::vec(any::<bool>(), 1..8)) {
        let registry = FamilyRegistry::new();
        let first = registry.cache_or_get(family(&name));

        for flip in flips {
            let variant = if flip { name.to_uppercase() } else { name.to_lowercase() };
            let cached = registry.cache_or_get(family(&variant));
            prop_assert!(Arc::ptr_eq(&cached, &first));

            let found = registry.lookup(&variant);
            prop_assert!(found.is_some_and(|found| Arc::ptr_eq(&found, &first)));
        }
        prop_assert_eq!(registry.len(), 1);
    }
}
