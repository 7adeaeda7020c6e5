//! Routes for registration, login and logout.

use rocket::{form::Form, get, http::CookieJar, post, response::Redirect, FromForm, State};
use schemars::JsonSchema;
use serde::Serialize;

use app::user::{self, Username};

use crate::{
    access,
    error::{self, JsonError},
    state::RocketState,
};

const USERNAME_MIN_CHARS: usize = 4;
const USERNAME_MAX_CHARS: usize = 25;
const PASSWORD_MIN_CHARS: usize = 6;
const PASSWORD_MAX_CHARS: usize = 35;

#[derive(FromForm)]
pub(super) struct RegisterRequest {
    username: Option<String>,
    password: Option<String>,
}

/// Error during registration.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum RegisterError {
    /// Username was not provided.
    MissingUsername,
    /// Username is shorter than the minimum length.
    UsernameTooShort,
    /// Username is longer than the maximum length.
    UsernameTooLong,
    /// Username is reserved and cannot be registered.
    UsernameReserved,
    /// Password was not provided.
    MissingPassword,
    /// Password is shorter than the minimum length.
    PasswordTooShort,
    /// Password is longer than the maximum length.
    PasswordTooLong,
    /// A user with this username already exists.
    DuplicateUser,
}

impl RegisterRequest {
    fn credentials(self) -> Result<(Username, String), JsonError<RegisterError>> {
        let username = self.username.unwrap_or_default();
        if username.is_empty() {
            return Err(error::bad_request(
                RegisterError::MissingUsername,
                "username is required".to_owned(),
            ));
        }
        if username.chars().count() < USERNAME_MIN_CHARS {
            return Err(error::bad_request(
                RegisterError::UsernameTooShort,
                format!("username must be at least {} characters", USERNAME_MIN_CHARS),
            ));
        }
        if username.chars().count() > USERNAME_MAX_CHARS {
            return Err(error::bad_request(
                RegisterError::UsernameTooLong,
                format!("username can be at most {} characters", USERNAME_MAX_CHARS),
            ));
        }
        let password = self.password.unwrap_or_default();
        if password.is_empty() {
            return Err(error::bad_request(
                RegisterError::MissingPassword,
                "password is required".to_owned(),
            ));
        }
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(error::bad_request(
                RegisterError::PasswordTooShort,
                format!("password must be at least {} characters", PASSWORD_MIN_CHARS),
            ));
        }
        if password.chars().count() > PASSWORD_MAX_CHARS {
            return Err(error::bad_request(
                RegisterError::PasswordTooLong,
                format!("password can be at most {} characters", PASSWORD_MAX_CHARS),
            ));
        }
        Ok((Username(username), password))
    }
}

/// Register a new account and log it in.
#[post("/register", data = "<req>")]
pub(super) async fn register(
    state: &State<RocketState>,
    cookies: &CookieJar<'_>,
    req: Form<RegisterRequest>,
) -> Result<Redirect, JsonError<RegisterError>> {
    let (username, password) = req.into_inner().credentials()?;
    let registered = user::register(&state.store, &username, &password).map_err(|e| match e {
        user::RegisterError::UserAlreadyExists => error::bad_request(
            RegisterError::DuplicateUser,
            "a user with this username already exists".to_owned(),
        ),
        user::RegisterError::UsernameReserved => error::bad_request(
            RegisterError::UsernameReserved,
            "this username is reserved".to_owned(),
        ),
    })?;
    access::start_session(cookies, &registered);
    Ok(Redirect::to("/"))
}

#[derive(FromForm)]
pub(super) struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

/// Error during login.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum LoginError {
    /// Username was not provided.
    MissingUsername,
    /// Password was not provided.
    MissingPassword,
    /// Unknown username or wrong password.
    InvalidCredentials,
}

impl LoginRequest {
    fn credentials(self) -> Result<(Username, String), JsonError<LoginError>> {
        let username = self.username.unwrap_or_default();
        if username.is_empty() {
            return Err(error::bad_request(
                LoginError::MissingUsername,
                "username is required".to_owned(),
            ));
        }
        let password = self.password.unwrap_or_default();
        if password.is_empty() {
            return Err(error::bad_request(
                LoginError::MissingPassword,
                "password is required".to_owned(),
            ));
        }
        Ok((Username(username), password))
    }
}

/// Log an existing account in.
#[post("/login", data = "<req>")]
pub(super) async fn login(
    state: &State<RocketState>,
    cookies: &CookieJar<'_>,
    req: Form<LoginRequest>,
) -> Result<Redirect, JsonError<LoginError>> {
    let (username, password) = req.into_inner().credentials()?;
    let user = user::login(&state.store, &username, &password).map_err(|_| {
        error::forbidden(
            LoginError::InvalidCredentials,
            "unknown username or wrong password".to_owned(),
        )
    })?;
    access::start_session(cookies, &user);
    Ok(Redirect::to("/"))
}

/// Log the current session out.
#[get("/logout")]
pub(super) async fn logout(_guard: access::UserGuard, cookies: &CookieJar<'_>) -> Redirect {
    access::end_session(cookies);
    Redirect::to("/")
}
