//! Save/restore stack for drawing contexts.
//!
//! A drawing context captures its settings into a [`SavedState`] at every
//! save point and pushes it here. Restoring a frame pops it together with
//! every frame saved after it, the same way closing an outer scope closes
//! all the scopes nested inside it.
//!
//! Frames are compared by identity, never by content. A frame is valid only
//! while it physically sits on the stack; once popped it stays invalid
//! forever.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::core::error::{DrawError, DrawResult};

/// Frames kept inline before the stack spills to the heap.
const INLINE_DEPTH: usize = 8;

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a saved frame, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    fn next() -> Self {
        FrameId(NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a raw value. Only useful for diagnostics and tests.
    pub fn from_raw(raw: u64) -> Self {
        FrameId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle position of a saved frame.
///
/// `Created -> Pushed -> (Restored | Unwound)`. The last two are terminal.
/// The baseline frame of a stack is `Baseline` for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameStatus {
    /// The never-popped bottom of a stack
    Baseline,
    /// Captured but not yet pushed
    Created,
    /// On a stack
    Pushed,
    /// Popped as the explicit target of a restore
    Restored,
    /// Popped because a frame below it was restored
    Unwound,
}

impl FrameStatus {
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            FrameStatus::Baseline | FrameStatus::Created | FrameStatus::Pushed
        )
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => FrameStatus::Baseline,
            1 => FrameStatus::Created,
            2 => FrameStatus::Pushed,
            3 => FrameStatus::Restored,
            _ => FrameStatus::Unwound,
        }
    }
}

struct Frame<S> {
    id: FrameId,
    snapshot: S,
    status: AtomicU8,
}

/// Handle to a snapshot captured at a save point.
///
/// Cloning the handle does not copy the frame: every clone refers to the same
/// frame and observes the same status. Handles are `Send` when the snapshot
/// is, but a frame's status only changes through the stack that owns it.
pub struct SavedState<S> {
    frame: Arc<Frame<S>>,
}

impl<S> SavedState<S> {
    /// Capture a new frame around `snapshot`.
    pub fn new(snapshot: S) -> Self {
        Self::with_status(snapshot, FrameStatus::Created)
    }

    fn baseline(snapshot: S) -> Self {
        Self::with_status(snapshot, FrameStatus::Baseline)
    }

    fn with_status(snapshot: S, status: FrameStatus) -> Self {
        SavedState {
            frame: Arc::new(Frame {
                id: FrameId::next(),
                snapshot,
                status: AtomicU8::new(status as u8),
            }),
        }
    }

    pub fn id(&self) -> FrameId {
        self.frame.id
    }

    /// The settings captured when this frame was saved.
    pub fn snapshot(&self) -> &S {
        &self.frame.snapshot
    }

    pub fn status(&self) -> FrameStatus {
        FrameStatus::from_u8(self.frame.status.load(Ordering::Acquire))
    }

    pub fn is_valid(&self) -> bool {
        self.status().is_valid()
    }

    /// `Created -> Pushed`. Any other starting status is refused and left as is.
    fn mark_pushed(&self) -> DrawResult<()> {
        match self.frame.status.compare_exchange(
            FrameStatus::Created as u8,
            FrameStatus::Pushed as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(raw) if FrameStatus::from_u8(raw).is_valid() => {
                Err(DrawError::InvalidTarget { frame: self.id() })
            }
            Err(_) => Err(DrawError::AlreadyRestored { frame: self.id() }),
        }
    }

    fn mark_popped(&self, status: FrameStatus) {
        debug_assert!(!status.is_valid());
        self.frame.status.store(status as u8, Ordering::Release);
    }
}

impl<S> Clone for SavedState<S> {
    fn clone(&self) -> Self {
        SavedState {
            frame: Arc::clone(&self.frame),
        }
    }
}

impl<S> PartialEq for SavedState<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frame, &other.frame)
    }
}

impl<S> Eq for SavedState<S> {}

impl<S: fmt::Debug> fmt::Debug for SavedState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedState")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("snapshot", self.snapshot())
            .finish()
    }
}

/// Stack of saved frames on top of a fixed baseline.
///
/// Owned by a single drawing context. It does no locking; sharing a context
/// across threads needs external synchronisation.
pub struct StateStack<S> {
    baseline: SavedState<S>,
    frames: SmallVec<[SavedState<S>; INLINE_DEPTH]>,
}

impl<S> StateStack<S> {
    /// Create an empty stack whose `current()` is `baseline`.
    pub fn new(baseline: S) -> Self {
        StateStack {
            baseline: SavedState::baseline(baseline),
            frames: SmallVec::new(),
        }
    }

    /// Push `state` on top of the stack.
    ///
    /// Only a freshly created frame can be pushed. The stack is left unchanged
    /// otherwise.
    ///
    /// # Errors
    ///
    /// * [`DrawError::AlreadyRestored`] if `state` was popped before.
    /// * [`DrawError::InvalidTarget`] if `state` is already on a stack or is a
    ///   baseline.
    pub fn push(&mut self, state: SavedState<S>) -> DrawResult<()> {
        if let Err(err) = state.mark_pushed() {
            log::warn!("refused push of frame {}: {}", state.id(), err);
            return Err(err);
        }
        log::trace!("push frame {} at depth {}", state.id(), self.frames.len());
        self.frames.push(state);
        Ok(())
    }

    /// Capture `snapshot` in a new frame and push it.
    pub fn push_new(&mut self, snapshot: S) -> SavedState<S> {
        let state = SavedState::with_status(snapshot, FrameStatus::Pushed);
        log::trace!("push frame {} at depth {}", state.id(), self.frames.len());
        self.frames.push(state.clone());
        state
    }

    /// Pop every frame down to and including `target`.
    ///
    /// Returns the number of frames popped, which is at least one. Frames
    /// above `target` are marked [`FrameStatus::Unwound`] and `target` itself
    /// [`FrameStatus::Restored`].
    ///
    /// # Errors
    ///
    /// * [`DrawError::AlreadyRestored`] if `target` was popped before.
    /// * [`DrawError::InvalidTarget`] if `target` is not on this stack.
    pub fn restore(&mut self, target: &SavedState<S>) -> DrawResult<usize> {
        if !target.is_valid() {
            log::warn!("restore of frame {} which was already popped", target.id());
            return Err(DrawError::AlreadyRestored { frame: target.id() });
        }

        let Some(index) = self.frames.iter().rposition(|frame| frame == target) else {
            log::warn!("restore of frame {} which is not on this stack", target.id());
            return Err(DrawError::InvalidTarget { frame: target.id() });
        };

        let popped = self.frames.len() - index;
        for frame in self.frames.drain(index..).rev() {
            if frame == *target {
                frame.mark_popped(FrameStatus::Restored);
            } else {
                log::trace!("unwind frame {} above {}", frame.id(), target.id());
                frame.mark_popped(FrameStatus::Unwound);
            }
        }

        if popped > 1 {
            log::debug!(
                "restore of frame {} unwound {} frames",
                target.id(),
                popped
            );
        }
        Ok(popped)
    }

    /// The most recently pushed frame, or the baseline when empty.
    pub fn current(&self) -> &SavedState<S> {
        self.frames.last().unwrap_or(&self.baseline)
    }

    /// The most recently pushed frame, if any.
    pub fn top(&self) -> Option<&SavedState<S>> {
        self.frames.last()
    }

    /// The bottom frame. It can be inspected but never pushed or restored.
    pub fn baseline(&self) -> &SavedState<S> {
        &self.baseline
    }

    /// Number of pushed frames. The baseline does not count.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<S: fmt::Debug> fmt::Debug for StateStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStack")
            .field("baseline", &self.baseline.id())
            .field(
                "frames",
                &self.frames.iter().map(SavedState::id).collect::<Vec<_>>(),
            )
            .finish()
    }
}
