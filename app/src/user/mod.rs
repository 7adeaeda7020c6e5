use crate::{auth, store::Store};
use thiserror::Error;

mod entities;

pub use entities::{PasswordHash, Role, User, Username};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("username is reserved")]
    UsernameReserved,
}

#[derive(Debug, Error)]
#[error("invalid credentials")]
pub struct InvalidCredentials;

#[derive(Debug, Error)]
pub enum PromoteError {
    #[error("unknown user")]
    UnknownUser,
    #[error("user is already an admin")]
    AlreadyAdmin,
}

/// Creates a new regular account. The username must not collide with any
/// existing account, regular or admin, nor with the reserved admin key.
pub fn register(store: &Store, username: &Username, password: &str) -> Result<User, RegisterError> {
    if username.0 == documents::ADMIN_KEY {
        return Err(RegisterError::UsernameReserved);
    }
    let mut doc = documents::load(store);
    if doc.role_of(&username.0).is_some() {
        return Err(RegisterError::UserAlreadyExists);
    }
    let hash = PasswordHash::generate(password);
    doc.regular.insert(username.0.clone(), hash.as_str().to_owned());
    documents::save(store, &doc);
    Ok(User {
        username: username.clone(),
        role: Role::Regular,
    })
}

/// Checks a username and password against both partitions of the users
/// document.
pub fn login(store: &Store, username: &Username, password: &str) -> Result<User, InvalidCredentials> {
    let doc = documents::load(store);
    let role = doc.role_of(&username.0).ok_or(InvalidCredentials)?;
    let stored = doc.stored_password(&username.0).ok_or(InvalidCredentials)?;
    if !PasswordHash::from_stored(stored).verify(password) {
        return Err(InvalidCredentials);
    }
    Ok(User {
        username: username.clone(),
        role,
    })
}

/// Moves an account from the regular partition into the admin partition,
/// keeping the stored password untouched.
pub fn promote(
    _grant: &auth::AdminGrant,
    store: &Store,
    username: &Username,
) -> Result<User, PromoteError> {
    let mut doc = documents::load(store);
    if doc.admin.contains_key(&username.0) {
        return Err(PromoteError::AlreadyAdmin);
    }
    let stored = doc
        .regular
        .remove(&username.0)
        .ok_or(PromoteError::UnknownUser)?;
    doc.admin.insert(username.0.clone(), stored);
    documents::save(store, &doc);
    Ok(User {
        username: username.clone(),
        role: Role::Admin,
    })
}

pub(crate) fn role_of(store: &Store, username: &str) -> Option<Role> {
    documents::load(store).role_of(username)
}

pub(crate) fn all(store: &Store) -> Vec<User> {
    documents::load(store).into_users()
}

mod documents {
    use super::{Role, User, Username};
    use crate::store::{self, Store};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    /// Reserved key partitioning admin accounts from regular ones.
    pub(super) const ADMIN_KEY: &str = "admin";

    /// On-disk layout of the users document: admin accounts live under the
    /// reserved key, every other top-level key is a regular account mapped to
    /// its stored password.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub(super) struct UsersDoc {
        #[serde(default)]
        pub admin: BTreeMap<String, String>,
        #[serde(flatten)]
        pub regular: BTreeMap<String, String>,
    }

    impl UsersDoc {
        pub(super) fn role_of(&self, username: &str) -> Option<Role> {
            if self.admin.contains_key(username) {
                Some(Role::Admin)
            } else if self.regular.contains_key(username) {
                Some(Role::Regular)
            } else {
                None
            }
        }

        pub(super) fn stored_password(&self, username: &str) -> Option<&str> {
            self.regular
                .get(username)
                .or_else(|| self.admin.get(username))
                .map(String::as_str)
        }

        pub(super) fn into_users(self) -> Vec<User> {
            let regular = self.regular.into_keys().map(|username| User {
                username: Username(username),
                role: Role::Regular,
            });
            let admin = self.admin.into_keys().map(|username| User {
                username: Username(username),
                role: Role::Admin,
            });
            regular.chain(admin).collect()
        }
    }

    pub(super) fn load(store: &Store) -> UsersDoc {
        store::read(store.users_path())
    }

    pub(super) fn save(store: &Store, doc: &UsersDoc) {
        store::write(store.users_path(), doc);
    }
}
