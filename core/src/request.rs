//! Request lifecycle for features that load data in response to input.
//!
//! A feature that fetches something owns one [`RequestState`] and replaces it
//! wholesale on every transition:
//!
//! ```text
//! Idle ──(non-empty input)──► Pending ──(ok)──► Resolved(T)
//!   ▲                            │
//!   └──────(empty input)─────────┴──(err)──► Rejected(E)
//! ```
//!
//! Every request is tagged with a [`RequestId`]. A continuation whose tag is
//! not the one the feature is currently waiting for belongs to a superseded
//! request and must be dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Discrete phase of a request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Nothing requested yet
    Idle,
    /// Waiting for the collaborator
    Pending,
    /// Collaborator succeeded
    Resolved,
    /// Collaborator failed
    Rejected,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        };
        f.write_str(status)
    }
}

/// Lifecycle of a single outstanding request
///
/// `result` and `error` exist only in the `Resolved` and `Rejected` phases
/// respectively, so the two can never both be present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum RequestState<T, E> {
    /// Nothing requested yet
    Idle,
    /// Waiting for the collaborator
    Pending,
    /// Collaborator succeeded with this payload
    Resolved(T),
    /// Collaborator failed with this error
    Rejected(E),
}

impl<T, E> Default for RequestState<T, E> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T, E> RequestState<T, E> {
    /// Build the terminal state for a finished request
    pub fn settle(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Resolved(value),
            Err(error) => Self::Rejected(error),
        }
    }

    /// Current phase
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Idle => Status::Idle,
            Self::Pending => Status::Pending,
            Self::Resolved(_) => Status::Resolved,
            Self::Rejected(_) => Status::Rejected,
        }
    }

    /// Payload, if resolved
    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        match self {
            Self::Resolved(value) => Some(value),
            _ => None,
        }
    }

    /// Error, if rejected
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Rejected(error) => Some(error),
            _ => None,
        }
    }

    /// True before anything has been requested
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while waiting for the collaborator
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once the collaborator succeeded
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// True once the collaborator failed
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Tag identifying one issued request
///
/// Ids are unique for the lifetime of the process, so a continuation from a
/// feature instance that has since been recreated can never match a tag
/// issued by its replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Issue a fresh id, greater than every id issued before it
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
