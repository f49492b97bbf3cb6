use crate::SkeletonKind;
use thiserror::Error;

/// Broad classification of [`Error`] values.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or undersized input. The caller should skip or report it.
    Validation,
    /// The operation is not valid for the current state of the object.
    State,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected at least {expected} keypoints for {kind}, got {actual}")]
    TooFewKeypoints {
        kind: SkeletonKind,
        expected: usize,
        actual: usize,
    },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("{operation} requires the {kind} to be added to a canvas first")]
    NotOnCanvas {
        kind: SkeletonKind,
        operation: &'static str,
    },

    #[error("{kind} is locked")]
    Locked { kind: SkeletonKind },

    #[error("{operation} requires the {kind} to be grouped")]
    NotGrouped {
        kind: SkeletonKind,
        operation: &'static str,
    },

    #[error("{operation} cannot be applied while the {kind} is grouped")]
    Grouped {
        kind: SkeletonKind,
        operation: &'static str,
    },

    #[error("{kind} cannot be flipped")]
    NotFlippable { kind: SkeletonKind },

    #[error("{body} does not support attaching a {part}")]
    UnsupportedAttachment {
        body: SkeletonKind,
        part: SkeletonKind,
    },

    #[error("expected a {expected} but got a {actual}")]
    WrongKind {
        expected: &'static str,
        actual: SkeletonKind,
    },

    #[error("unknown keypoint '{name}' in {kind}")]
    UnknownKeypoint { kind: SkeletonKind, name: String },

    #[error("invalid keypoint index {index} for {kind} with {len} keypoints")]
    InvalidKeypointIndex {
        kind: SkeletonKind,
        index: usize,
        len: usize,
    },

    #[cfg(feature = "json")]
    #[error("failed to parse pose JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("invalid keypoint array '{field}': length {len} is not a multiple of 3")]
    JsonKeypointArray { field: String, len: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooFewKeypoints { .. } | Self::InvalidValue { .. } => ErrorKind::Validation,
            #[cfg(feature = "json")]
            Self::JsonParse { .. } | Self::JsonKeypointArray { .. } => ErrorKind::Validation,
            _ => ErrorKind::State,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
