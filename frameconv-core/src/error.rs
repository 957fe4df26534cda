/// Errors raised while building axis sets and coordinate frames
use thiserror::Error;

/// Failure to build an [`AxisSet`](crate::AxisSet) or
/// [`CoordinateFrame`](crate::CoordinateFrame) from a description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The descriptor is not three `[+-]?[XYZ]` tokens.
    #[error("axis set '{0}' must be formed of three axis descriptions '[+-][XYZ]'")]
    Format(String),

    /// The middle axis repeats the first or the last axis.
    #[error("the middle axis in axis set '{0}' cannot repeat a neighbouring axis")]
    RedundantMiddle(String),

    /// A spatial axis set names the same axis twice.
    #[error("axis set '{0}' must not assign two directions to the same axis")]
    RedundantAxes(String),
}

impl FrameError {
    /// Whether the descriptor itself was malformed
    pub fn is_format(&self) -> bool {
        matches!(self, FrameError::Format(_))
    }

    /// Whether the descriptor parsed but broke an axis uniqueness rule
    pub fn is_redundancy(&self) -> bool {
        matches!(
            self,
            FrameError::RedundantMiddle(_) | FrameError::RedundantAxes(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(FrameError::Format("-+XYZ".into()).is_format());
        assert!(!FrameError::Format("-+XYZ".into()).is_redundancy());
        assert!(FrameError::RedundantMiddle("XXZ".into()).is_redundancy());
        assert!(FrameError::RedundantAxes("XYX".into()).is_redundancy());
    }

    #[test]
    fn test_error_message_names_descriptor() {
        let err = FrameError::RedundantAxes("+X+Y+X".into());
        assert!(err.to_string().contains("'+X+Y+X'"));
    }
}
