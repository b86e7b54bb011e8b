//! Error types for decoding and API operations.

use std::fmt;

use crate::constants::STATUS_INTERNAL;

/// Error returned when a delta-time array is malformed
///
/// Every variant describes bad input for a single series. Decoding stops at the
/// first error and no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The series itself is not a JSON array
    NotAnArray { found: &'static str },
    /// A point of the series is not a JSON array
    ElementNotAnArray { index: usize, found: &'static str },
    /// A point has no leading timestamp or delta
    EmptyElement { index: usize },
    /// The leading field cannot be converted to an integer
    InvalidTimestamp { index: usize, reason: String },
    /// Accumulated deltas overflow the timestamp range
    TimestampOverflow { index: usize },
}

impl DecodeError {
    /// Index of the offending point, if the error is tied to one
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::NotAnArray { .. } => None,
            Self::ElementNotAnArray { index, .. }
            | Self::EmptyElement { index }
            | Self::InvalidTimestamp { index, .. }
            | Self::TimestampOverflow { index } => Some(*index),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray { found } => write!(f, "parent: list expected but found {found}"),
            Self::ElementNotAnArray { index, found } => {
                write!(f, "element: list expected but found {found} (at {index})")
            }
            Self::EmptyElement { index } => {
                write!(f, "element {index} has no timestamp or delta")
            }
            Self::InvalidTimestamp { index, reason } => {
                write!(f, "element {index}: invalid timestamp or delta: {reason}")
            }
            Self::TimestampOverflow { index } => {
                write!(f, "element {index}: timestamp overflow")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error returned by the client layer
///
/// Carries an HTTP-like status code: 400 for missing credentials, 403 for
/// authentication failures, 404 for unknown devices or empty data, 500 for
/// everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    pub status_code: u16,
    pub description: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            description: None,
        }
    }

    /// Error with the default status code (500)
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, STATUS_INTERNAL)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError: {}: {}", self.status_code, self.message)?;
        if let Some(description) = &self.description {
            write!(f, " ({description})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Failure reported by a [`crate::Transport`] implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::internal("API call failed").with_description(err.0)
    }
}
