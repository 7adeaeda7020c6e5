//! Session authorization. A logged-in identity is exchanged for a grant
//! before any protected operation runs; possession of a grant proves the
//! caller was authorized when the request started. Admin-only operations
//! require the separate [`AdminGrant`] type.

use crate::user::{Role, Username};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("access denied")]
pub struct AccessDenied;

/// Proof that a session belongs to a registered user.
#[derive(Debug)]
pub struct UserGrant {
    pub username: Username,
    pub role: Role,
}

/// Proof that a session belongs to an account under the reserved admin key.
#[derive(Debug)]
pub struct AdminGrant {
    pub username: Username,
}
