use rocket::{http::Status, serde::json::Json};
use schemars::JsonSchema;
use serde::Serialize;

/// Envelope wrapping every JSON error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Error<E: Serialize> {
    pub error: Details<E>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct Details<E: Serialize> {
    pub code: u16,
    pub description: String,
    pub reason: Option<&'static str>,
    pub kind: E,
}

impl<E: Serialize> Error<E> {
    fn new(http_status: Status, description: String, kind: E) -> Self {
        Self {
            error: Details {
                code: http_status.code,
                description,
                reason: http_status.reason(),
                kind,
            },
        }
    }
}

pub type JsonError<E> = (Status, Json<Error<E>>);

pub type JsonResult<T, E> = Result<Json<T>, JsonError<E>>;

pub fn bad_request<E: Serialize>(kind: E, description: String) -> JsonError<E> {
    (
        Status::BadRequest,
        Json(Error::new(Status::BadRequest, description, kind)),
    )
}

pub fn forbidden<E: Serialize>(kind: E, description: String) -> JsonError<E> {
    (
        Status::Forbidden,
        Json(Error::new(Status::Forbidden, description, kind)),
    )
}
