//! Authorization capability mapping.
//!
//! The platform permission system owns the [`AuthorizationState`]; this
//! crate only reads it. The effective [`Capability`] is re-derived from the
//! store's reported state before every operation, and gates each entry
//! point: reads require full access and degrade to empty results without
//! it, writes accept write-only access and fail explicitly without it.

use serde::{Deserialize, Serialize};

/// The permission domains the external store can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDomain {
    /// Calendar events.
    Events,
    /// Reminders.
    Reminders,
}

/// Platform permission state, as reported by the external store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// Access is restricted by policy (e.g. parental controls).
    Restricted,
    /// The user declined access.
    Denied,
    /// Full read/write access.
    FullAccess,
    /// The app may add records but not read existing ones.
    WriteOnly,
}

/// The effective permission level derived from an authorization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// No access at all.
    None,
    /// Read access only. No platform state currently maps here; the variant
    /// exists so the capability model covers the full permission lattice.
    ReadOnly,
    /// Write access without read access.
    WriteOnly,
    /// Full read/write access.
    Full,
}

impl Capability {
    /// Derives the capability granted by a platform state.
    pub fn from_state(state: AuthorizationState) -> Self {
        match state {
            AuthorizationState::FullAccess => Self::Full,
            AuthorizationState::WriteOnly => Self::WriteOnly,
            AuthorizationState::NotDetermined
            | AuthorizationState::Restricted
            | AuthorizationState::Denied => Self::None,
        }
    }

    /// True if read operations are permitted.
    pub fn allows_read(&self) -> bool {
        matches!(self, Self::Full | Self::ReadOnly)
    }

    /// True if write operations are permitted.
    pub fn allows_write(&self) -> bool {
        matches!(self, Self::Full | Self::WriteOnly)
    }

    /// Returns a stable name for this capability, for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ReadOnly => "read_only",
            Self::WriteOnly => "write_only",
            Self::Full => "full",
        }
    }
}
