//! Routes restricted to admin accounts. Non-admin sessions reaching these
//! routes are terminated by the guard and forwarded to the redirect
//! fallbacks below.

use rocket::{get, post, response::Redirect, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use app::donation;
use app::user::{self, Username};

use super::RoleModel;
use crate::{
    access,
    error::{self, JsonResult},
    state::RocketState,
};

#[derive(Debug, Serialize, JsonSchema)]
struct UserTotalModel {
    /// Identity of the user.
    username: String,
    /// Role of the user.
    role: RoleModel,
    /// Sum of this user's donations.
    total: f64,
    /// Number of donations recorded for this user.
    count: usize,
}

impl UserTotalModel {
    fn from_entity(user_total: &donation::UserTotal) -> Self {
        Self {
            username: user_total.username.0.clone(),
            role: RoleModel::from_entity(user_total.role),
            total: user_total.total,
            count: user_total.count,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct AllUsersResponse {
    users: Vec<UserTotalModel>,
    /// Total donated across all users.
    total: f64,
}

/// View every user's donation total, plus the grand total.
#[openapi(tag = "Admin")]
#[get("/view-all-users")]
pub(super) async fn list_users(
    state: &State<RocketState>,
    guard: access::AdminGuard,
) -> Json<AllUsersResponse> {
    let aggregate = donation::aggregate(guard.grant(), &state.store);
    Json(AllUsersResponse {
        users: aggregate
            .users
            .iter()
            .map(UserTotalModel::from_entity)
            .collect(),
        total: aggregate.total,
    })
}

#[get("/view-all-users", rank = 2)]
pub(super) async fn list_users_redirect() -> Redirect {
    Redirect::to("/")
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct PromoteRequest {
    /// Identity of the account to promote.
    user: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct PromotedModel {
    /// Identity of the promoted account.
    username: String,
    /// Role after promotion.
    role: RoleModel,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct PromoteResponse {
    user: PromotedModel,
}

/// Error during promotion.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum PromoteError {
    /// No user with this identity exists.
    UnknownUser,
    /// The user is already an admin.
    AlreadyAdmin,
}

/// Move a regular account into the admin partition.
#[openapi(tag = "Admin")]
#[post("/make-user-admin", data = "<req>")]
pub(super) async fn promote(
    state: &State<RocketState>,
    guard: access::AdminGuard,
    req: Json<PromoteRequest>,
) -> JsonResult<PromoteResponse, PromoteError> {
    let username = Username(req.into_inner().user);
    let promoted = user::promote(guard.grant(), &state.store, &username).map_err(|e| match e {
        user::PromoteError::UnknownUser => {
            error::bad_request(PromoteError::UnknownUser, "no such user".to_owned())
        }
        user::PromoteError::AlreadyAdmin => error::bad_request(
            PromoteError::AlreadyAdmin,
            "user is already an admin".to_owned(),
        ),
    })?;
    log::info!("promoted user {:?} to admin", promoted.username.0);
    Ok(Json(PromoteResponse {
        user: PromotedModel {
            username: promoted.username.0,
            role: RoleModel::from_entity(promoted.role),
        },
    }))
}

#[post("/make-user-admin", rank = 2)]
pub(super) async fn promote_redirect() -> Redirect {
    Redirect::to("/")
}
