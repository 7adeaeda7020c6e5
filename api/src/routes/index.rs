//! Route for the landing page.

use rocket::{get, serde::json::Json};
use schemars::JsonSchema;
use serde::Serialize;

use super::RoleModel;
use crate::access;

#[derive(Debug, Serialize, JsonSchema)]
struct SessionModel {
    /// Identity of the logged-in user.
    username: String,
    /// Role of the logged-in user.
    role: RoleModel,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct IndexResponse {
    /// The logged-in user, if any.
    user: Option<SessionModel>,
}

/// The landing page: who is currently logged in, if anyone.
#[get("/")]
pub(super) async fn get(guard: Option<access::UserGuard>) -> Json<IndexResponse> {
    Json(IndexResponse {
        user: guard.map(|guard| {
            let grant = guard.grant();
            SessionModel {
                username: grant.username.0.clone(),
                role: RoleModel::from_entity(grant.role),
            }
        }),
    })
}
