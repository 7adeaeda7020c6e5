//! Routes for recording and listing the caller's donations.

use rocket::{form::Form, get, post, serde::json::Json, FromForm, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;

use app::donation::{self, Amount, Donation};

use crate::{
    access,
    error::{self, JsonError, JsonResult},
    state::RocketState,
};

#[derive(FromForm)]
pub(super) struct DonationRequest {
    amount: Option<String>,
}

/// Error during donation.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum DonationError {
    /// Donation amount was not provided.
    MissingAmount,
    /// Donation amount is not a number.
    InvalidAmount,
    /// Donation amount must be positive.
    AmountNotPositive,
}

impl DonationRequest {
    fn amount(self) -> Result<Amount, JsonError<DonationError>> {
        let raw = self.amount.unwrap_or_default();
        if raw.is_empty() {
            return Err(error::bad_request(
                DonationError::MissingAmount,
                "donation amount is required".to_owned(),
            ));
        }
        let value: f64 = raw.trim().parse().map_err(|_| {
            error::bad_request(
                DonationError::InvalidAmount,
                "donation amount is not a number".to_owned(),
            )
        })?;
        Amount::new(value).map_err(|_| {
            error::bad_request(
                DonationError::AmountNotPositive,
                "donation amount must be positive".to_owned(),
            )
        })
    }
}

#[derive(Debug, Serialize, JsonSchema)]
struct DonationModel {
    /// Donated amount.
    amount: f64,
    /// Donation creation time.
    timestamp: String,
}

impl DonationModel {
    fn from_entity(donation: &Donation) -> Self {
        Self {
            amount: donation.amount.get(),
            timestamp: donation
                .timestamp
                .format(donation::TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct DonationResponse {
    donation: DonationModel,
    /// Confirmation message for display.
    message: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct DonationsResponse {
    donations: Vec<DonationModel>,
    /// Sum of all listed donations.
    total: f64,
}

/// Record a donation by the logged-in user.
#[post("/donate", data = "<req>")]
pub(super) async fn post(
    state: &State<RocketState>,
    guard: access::UserGuard,
    req: Form<DonationRequest>,
) -> JsonResult<DonationResponse, DonationError> {
    let amount = req.into_inner().amount()?;
    let donation = donation::record(guard.grant(), &state.store, amount);
    Ok(Json(DonationResponse {
        message: format!(
            "You have made a donation of {:.2}. Thank you.",
            donation.amount.get()
        ),
        donation: DonationModel::from_entity(&donation),
    }))
}

/// List all donations made by the logged-in user, with their sum.
#[openapi(tag = "Donations")]
#[get("/your-donations")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::UserGuard,
) -> Json<DonationsResponse> {
    let donations = donation::list(guard.grant(), &state.store);
    Json(DonationsResponse {
        total: donation::total(&donations),
        donations: donations.iter().map(DonationModel::from_entity).collect(),
    })
}
