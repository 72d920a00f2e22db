use serde::Serialize;
use thiserror::Error;

use crate::controller::Playback;
use crate::zone::ZoneId;

/// Rejected zone data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("zone {id} has an invalid dwell time ({dwell_seconds}s)")]
    InvalidDwell { id: ZoneId, dwell_seconds: f64 },
    #[error("duplicate zone id {0}")]
    DuplicateId(ZoneId),
    #[error("zone {id} has an invalid camera pose: {reason}")]
    InvalidPose { id: ZoneId, reason: &'static str },
}

/// Errors returned synchronously by registry lookups and controller commands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no zones are loaded")]
    EmptyRegistry,
    #[error("zone {0} not found")]
    NotFound(ZoneId),
    #[error("no interior session is active")]
    NoSession,
    #[error("cannot {command} while playback is {playback}")]
    InvalidState {
        command: &'static str,
        playback: Playback,
    },
}

/// A camera transition that did not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionFailure {
    #[error("renderer rejected the transition: {0}")]
    Rejected(String),
    #[error("transition did not complete within {waited_s:.1}s")]
    TimedOut { waited_s: f64 },
}

/// Zone list could not be fetched. Always recovered by falling back to the default zones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no zone backend configured")]
    Unavailable,
    #[error("zone request failed: {0}")]
    Request(String),
    #[error("zone request returned HTTP {0}")]
    Status(u16),
    #[error("zone list is empty")]
    Empty,
    #[error("zone list could not be decoded: {0}")]
    Decode(String),
}

/// Category carried by error notifications.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TransitionRejected,
    TransitionTimedOut,
}

impl From<&TransitionFailure> for ErrorKind {
    fn from(failure: &TransitionFailure) -> Self {
        match failure {
            TransitionFailure::Rejected(_) => ErrorKind::TransitionRejected,
            TransitionFailure::TimedOut { .. } => ErrorKind::TransitionTimedOut,
        }
    }
}
