use crate::rendering::state_stack::FrameId;

/// Universal error type for drawing operations.
///
/// Stack misuse (`InvalidTarget`, `AlreadyRestored`) signals a bug in the
/// caller's save/restore pairing. It is never recovered internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    /// Restore was requested for a frame that is not on this stack.
    #[error("frame {frame} is not on the state stack")]
    InvalidTarget { frame: FrameId },

    /// Restore was requested for a frame that has already been popped.
    #[error("frame {frame} has already been restored")]
    AlreadyRestored { frame: FrameId },

    /// A drawing argument was rejected before reaching the device.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend failed to carry out an operation.
    #[error("device error: {0}")]
    Device(String),
}

impl DrawError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DrawError::InvalidArgument(msg.into())
    }

    /// Create a device error.
    pub fn device(msg: impl Into<String>) -> Self {
        DrawError::Device(msg.into())
    }

    /// Whether this error reports misuse of the save/restore discipline.
    pub fn is_stack_misuse(&self) -> bool {
        matches!(
            self,
            DrawError::InvalidTarget { .. } | DrawError::AlreadyRestored { .. }
        )
    }
}

/// Result type alias for drawing operations
pub type DrawResult<T> = Result<T, DrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_misuse_classification() {
        let frame = FrameId::from_raw(7);
        assert!(DrawError::InvalidTarget { frame }.is_stack_misuse());
        assert!(DrawError::AlreadyRestored { frame }.is_stack_misuse());
        assert!(!DrawError::device("lost surface").is_stack_misuse());
        assert!(!DrawError::invalid_argument("negative width").is_stack_misuse());
    }

    #[test]
    fn test_display() {
        let frame = FrameId::from_raw(3);
        assert_eq!(
            DrawError::AlreadyRestored { frame }.to_string(),
            "frame #3 has already been restored"
        );
        assert_eq!(
            DrawError::device("out of memory").to_string(),
            "device error: out of memory"
        );
    }
}
