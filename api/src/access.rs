use app::auth::{self, AccessDenied};
use okapi::openapi3::{Object, SecurityRequirement, SecurityScheme, SecuritySchemeData};
use rocket::{
    async_trait,
    http::{Cookie, CookieJar, Status},
    request::{FromRequest, Outcome},
    Request,
};
use rocket_okapi::{
    gen::OpenApiGenerator,
    request::{OpenApiFromRequest, RequestHeaderInput},
};
use thiserror::Error;

use crate::state::RocketState;

const SESSION_COOKIE: &str = "session";

/// Guard for routes that require any logged-in user.
pub struct UserGuard(auth::UserGrant);

impl UserGuard {
    pub fn grant(&self) -> &auth::UserGrant {
        &self.0
    }
}

/// Guard for routes restricted to admin accounts. A logged-in session that
/// is not an admin is terminated and the request forwarded, so these routes
/// pair with a lower-ranked redirect fallback.
pub struct AdminGuard(auth::AdminGrant);

impl AdminGuard {
    pub fn grant(&self) -> &auth::AdminGrant {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("access denied")]
    AccessDenied(#[from] AccessDenied),
}

pub fn start_session(cookies: &CookieJar<'_>, user: &app::user::User) {
    cookies.add_private(Cookie::new(SESSION_COOKIE, user.username.0.clone()));
}

pub fn end_session(cookies: &CookieJar<'_>) {
    cookies.remove_private(SESSION_COOKIE);
}

#[async_trait]
impl<'r> FromRequest<'r> for UserGuard {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = req.cookies();
        let Some(cookie) = cookies.get_private(SESSION_COOKIE) else {
            return Outcome::Error((Status::Unauthorized, AccessDenied.into()));
        };
        let state = req.rocket().state::<RocketState>().unwrap();
        match auth::get_user_grant(&state.store, cookie.value()) {
            Ok(grant) => Outcome::Success(Self(grant)),
            Err(e) => {
                // The session references an identity that no longer exists.
                cookies.remove_private(SESSION_COOKIE);
                Outcome::Error((Status::Unauthorized, e.into()))
            }
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for AdminGuard {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = req.cookies();
        let Some(cookie) = cookies.get_private(SESSION_COOKIE) else {
            return Outcome::Error((Status::Unauthorized, AccessDenied.into()));
        };
        let state = req.rocket().state::<RocketState>().unwrap();
        match auth::get_admin_grant(&state.store, cookie.value()) {
            Ok(grant) => Outcome::Success(Self(grant)),
            Err(AccessDenied) => {
                log::info!("terminating non-admin session for {:?}", cookie.value());
                cookies.remove_private(SESSION_COOKIE);
                Outcome::Forward(Status::SeeOther)
            }
        }
    }
}

impl<'a> OpenApiFromRequest<'a> for UserGuard {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(openapi_session_auth())
    }
}

impl<'a> OpenApiFromRequest<'a> for AdminGuard {
    fn from_request_input(
        _: &mut OpenApiGenerator,
        _: String,
        _: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(openapi_session_auth())
    }
}

fn openapi_session_auth() -> RequestHeaderInput {
    let security_scheme = SecurityScheme {
        description: Some(format!(
            "Requires the \"{}\" cookie set by the login route.",
            SESSION_COOKIE
        )),
        data: SecuritySchemeData::ApiKey {
            name: SESSION_COOKIE.to_owned(),
            location: "cookie".to_owned(),
        },
        extensions: Object::default(),
    };
    let mut security_req = SecurityRequirement::new();
    security_req.insert(SESSION_COOKIE.to_owned(), Vec::new());
    RequestHeaderInput::Security(SESSION_COOKIE.to_owned(), security_scheme, security_req)
}
