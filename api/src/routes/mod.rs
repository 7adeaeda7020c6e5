//! Top-level routes, one submodule per resource.

use crate::state::RocketState;
use rocket::{routes, Build, Rocket};
use rocket_okapi::{
    openapi_get_routes,
    swagger_ui::{make_swagger_ui, DefaultModelRendering, SwaggerUIConfig},
};
use schemars::JsonSchema;
use serde::Serialize;

mod admin;
mod donations;
mod index;
mod users;

/// Account role as exposed by the API.
#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleModel {
    /// Regular account.
    Regular,
    /// Administrator account.
    Admin,
}

impl RoleModel {
    fn from_entity(role: app::user::Role) -> Self {
        match role {
            app::user::Role::Regular => Self::Regular,
            app::user::Role::Admin => Self::Admin,
        }
    }
}

pub fn register(rocket: Rocket<Build>, state: RocketState) -> Rocket<Build> {
    let rocket = rocket.manage(state);
    let rocket = rocket.mount(
        "/",
        openapi_get_routes![donations::list, admin::list_users, admin::promote],
    );
    let rocket = rocket.mount(
        "/",
        routes![
            index::get,
            users::register,
            users::login,
            users::logout,
            donations::post,
            admin::list_users_redirect,
            admin::promote_redirect,
        ],
    );
    mount_swagger(rocket)
}

pub fn mount_swagger(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount(
        "/swagger",
        make_swagger_ui(&SwaggerUIConfig {
            url: "../openapi.json".to_owned(),
            default_model_rendering: DefaultModelRendering::Model,
            show_extensions: true,
            ..Default::default()
        }),
    )
}
