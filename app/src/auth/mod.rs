use crate::store::Store;
use crate::user::{self, Role, Username};

mod entities;

pub use entities::{AccessDenied, AdminGrant, UserGrant};

pub fn get_user_grant(store: &Store, username: &str) -> Result<UserGrant, AccessDenied> {
    match user::role_of(store, username) {
        Some(role) => Ok(UserGrant {
            username: Username(username.to_owned()),
            role,
        }),
        None => Err(AccessDenied),
    }
}

pub fn get_admin_grant(store: &Store, username: &str) -> Result<AdminGrant, AccessDenied> {
    match user::role_of(store, username) {
        Some(Role::Admin) => Ok(AdminGrant {
            username: Username(username.to_owned()),
        }),
        _ => Err(AccessDenied),
    }
}
