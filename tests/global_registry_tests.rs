//! Contexts built with `DrawingContext::new` share the process-wide registry.

use std::sync::Arc;

use pdf_canvas::{DrawingContext, FamilyRegistry, RecordingDevice};

#[test]
fn test_default_contexts_share_global_registry() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut first = DrawingContext::new(RecordingDevice::new(612.0, 792.0));
    let mut second = DrawingContext::new(RecordingDevice::new(612.0, 792.0));

    assert!(Arc::ptr_eq(first.registry(), FamilyRegistry::global()));

    // A name no other test in this binary uses
    let a = first.set_font("Global Registry Sans", 10.0).unwrap();
    let b = second.set_font("GLOBAL REGISTRY SANS", 10.0).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(second.device().families_created(), 0);

    let found = FamilyRegistry::global()
        .lookup("global registry sans")
        .expect("family cached globally");
    assert!(Arc::ptr_eq(&found, &a));
    assert!(FamilyRegistry::global().dump_state().contains("Global Registry Sans: recording"));
}
