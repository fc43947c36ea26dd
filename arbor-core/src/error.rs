use thiserror::Error;

use crate::types::{ResourceId, ResourceKind};

/// Why a handle supplied by guest code was refused.
///
/// The split is diagnostic only; every variant denies the call the same way
/// and the guest sees nothing but the integer sentinel.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("handle {id} is not registered (stale or never allocated)")]
    NotFound { id: ResourceId },

    #[error("handle {id} is not authorized for the calling environment")]
    NotAuthorized { id: ResourceId },

    #[error("handle {id} is a {actual}, expected {expected}")]
    TypeMismatch {
        id: ResourceId,
        expected: ResourceKind,
        actual: ResourceKind,
    },
}

/// Host-internal failure of an ABI call. Never fatal, never crosses the
/// boundary: the dispatcher logs it and hands the guest a sentinel.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("{value} is not a valid {what}")]
    InvalidEnum { what: &'static str, value: u32 },

    #[error("malformed parameter block: {reason}")]
    Decode { reason: String },

    #[error("access of {len} bytes at offset {offset} is outside the {buf_len}-byte buffer")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buf_len: usize,
    },

    #[error("environment resource quota of {quota} exceeded")]
    QuotaExceeded { quota: usize },

    #[error("no loaded environment with id {env}")]
    UnknownEnvironment { env: u32 },
}

impl HostError {
    pub fn decode(reason: impl Into<String>) -> Self {
        HostError::Decode {
            reason: reason.into(),
        }
    }
}
