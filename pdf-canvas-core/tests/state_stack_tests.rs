//! Save/restore behaviour of the state stack.

mod test_utils;

use pdf_canvas_core::{DrawError, FrameStatus, SavedState, StateStack};
use test_utils::*;

#[test]
fn test_fresh_stack_has_baseline() {
    init_logging();
    let stack = StateStack::new("baseline");

    assert_eq!(stack.depth(), 0);
    assert_eq!(*stack.current().snapshot(), "baseline");
    assert!(stack.current().is_valid());
}

#[test]
fn test_current_is_last_pushed() {
    let mut stack = StateStack::new(0);
    let frames = push_all(&mut stack, &[1, 2, 3, 4]);

    assert_eq!(stack.depth(), 4);
    assert_eq!(stack.current(), &frames[3]);
    assert_eq!(*stack.current().snapshot(), 4);
}

#[test]
fn test_restore_to_middle_frame() {
    init_logging();
    let mut stack = StateStack::new("base");
    let frames = push_all(&mut stack, &["A", "B", "C"]);
    let (a, b, c) = (&frames[0], &frames[1], &frames[2]);

    assert_eq!(stack.restore(b), Ok(2));
    assert_eq!(stack.current(), a);
    assert_eq!(stack.depth(), 1);

    assert!(a.is_valid());
    assert!(!b.is_valid());
    assert!(!c.is_valid());
    assert_eq!(b.status(), FrameStatus::Restored);
    assert_eq!(c.status(), FrameStatus::Unwound);
}

#[test]
fn test_restore_first_frame_reaches_baseline() {
    let mut stack = StateStack::new("base");
    let frames = push_all(&mut stack, &["A", "B", "C", "D", "E"]);

    assert_eq!(stack.restore(&frames[0]), Ok(5));
    assert_eq!(stack.current(), stack.baseline());
    assert!(stack.is_empty());
    assert!(frames.iter().all(|frame| !frame.is_valid()));
}

#[test]
fn test_restore_in_lifo_order() {
    let mut stack = StateStack::new("base");
    let frames = push_all(&mut stack, &["A", "B", "C"]);

    for frame in frames.iter().rev() {
        assert_eq!(stack.restore(frame), Ok(1));
        assert_eq!(frame.status(), FrameStatus::Restored);
    }
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_already_restored_frames_fail() {
    let mut stack = StateStack::new("base");
    let frames = push_all(&mut stack, &["A", "B", "C"]);

    stack.restore(&frames[1]).unwrap();

    for frame in &frames[1..] {
        assert_eq!(
            stack.restore(frame),
            Err(DrawError::AlreadyRestored { frame: frame.id() })
        );
    }
    // The failed calls must not disturb what is left
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.current(), &frames[0]);
}

#[test]
fn test_frame_from_other_stack_is_invalid_target() {
    let mut first = StateStack::new("first");
    let mut second = StateStack::new("second");
    let theirs = push_all(&mut second, &["X"]);
    push_all(&mut first, &["A"]);

    let err = first.restore(&theirs[0]).unwrap_err();
    assert_eq!(err, DrawError::InvalidTarget { frame: theirs[0].id() });
    assert!(err.is_stack_misuse());
    assert!(theirs[0].is_valid());
    assert_eq!(first.depth(), 1);
}

#[test]
fn test_unpushed_frame_is_invalid_target() {
    let mut stack = StateStack::new("base");
    let loose = SavedState::new("loose");

    assert!(matches!(
        stack.restore(&loose),
        Err(DrawError::InvalidTarget { .. })
    ));
    assert_eq!(loose.status(), FrameStatus::Created);
}

#[test]
fn test_stack_usable_after_unwind() {
    let mut stack = StateStack::new("base");
    let old = push_all(&mut stack, &["A", "B"]);
    stack.restore(&old[0]).unwrap();

    let fresh = push_all(&mut stack, &["C"]);
    assert_eq!(stack.current(), &fresh[0]);
    assert_eq!(stack.restore(&fresh[0]), Ok(1));
}

#[test]
fn test_unwound_frames_stay_invalid_after_repush() {
    let mut stack = StateStack::new("base");
    let frames = push_all(&mut stack, &["A", "B"]);
    stack.restore(&frames[0]).unwrap();

    for frame in &frames {
        assert_eq!(
            stack.push(frame.clone()),
            Err(DrawError::AlreadyRestored { frame: frame.id() })
        );
        assert!(!frame.is_valid());
    }
    assert!(stack.is_empty());
    assert_eq!(frames[1].status(), FrameStatus::Unwound);
}

#[test]
fn test_baseline_survives_misuse() {
    let mut stack = StateStack::new("base");
    let baseline = stack.baseline().clone();

    assert!(matches!(
        stack.push(baseline.clone()),
        Err(DrawError::InvalidTarget { .. })
    ));
    assert!(matches!(
        stack.restore(&baseline),
        Err(DrawError::InvalidTarget { .. })
    ));
    assert_eq!(stack.current(), &baseline);
    assert_eq!(baseline.status(), FrameStatus::Baseline);
}
