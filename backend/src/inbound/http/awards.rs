//! Awards HTTP handlers.
//!
//! ```text
//! GET  /api/awards
//! POST /api/awards
//! PUT  /api/awards
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Award, AwardPatch, AwardValidationError, Error, NewAward, RecordStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, double_option, invalid_field_error, invalid_field_value_error, missing_field_error,
};

const NAME: FieldName = FieldName::new("name");
const STATUS: FieldName = FieldName::new("status");
const QUANTITY: FieldName = FieldName::new("quantity");
const ID: FieldName = FieldName::new("id");

/// Request payload for creating an award.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardCreateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

/// Request payload for partially updating an award.
///
/// `id` selects the row; every other field is optional. For nullable
/// columns an explicit JSON `null` clears the value while an absent key
/// leaves it untouched.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardUpdateRequest {
    pub id: Option<i32>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

pub(crate) fn parse_status(value: String) -> Result<RecordStatus, Error> {
    value.parse().map_err(|_| {
        invalid_field_value_error(
            STATUS,
            "status must be one of planned, ordered, approved, delivered, received",
            value,
        )
    })
}

fn map_validation_error(error: AwardValidationError) -> Error {
    match error {
        AwardValidationError::EmptyName => invalid_field_error(NAME, "name must not be empty"),
        AwardValidationError::NegativeQuantity => {
            invalid_field_error(QUANTITY, "quantity must not be negative")
        }
    }
}

fn parse_create_request(payload: AwardCreateRequest) -> Result<NewAward, Error> {
    let name = payload.name.ok_or_else(|| missing_field_error(NAME))?;
    let status = payload.status.map(parse_status).transpose()?;
    NewAward::try_new(
        name,
        payload.description,
        status,
        payload.quantity,
        payload.image_url,
    )
    .map_err(map_validation_error)
}

fn parse_update_request(payload: AwardUpdateRequest) -> Result<(i32, AwardPatch), Error> {
    let id = payload.id.ok_or_else(|| missing_field_error(ID))?;
    let status = payload.status.map(parse_status).transpose()?;
    let patch = AwardPatch {
        name: payload.name,
        description: payload.description,
        status,
        quantity: payload.quantity,
        image_url: payload.image_url,
    };
    patch.validate().map_err(map_validation_error)?;
    Ok((id, patch))
}

/// List all awards, newest first.
#[utoipa::path(
    get,
    path = "/api/awards",
    responses(
        (status = 200, description = "Award inventory", body = [Award]),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["awards"],
    operation_id = "listAwards"
)]
#[get("/awards")]
pub async fn list_awards(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let awards = state.awards.list().await?;
    Ok(HttpResponse::Ok().json(awards))
}

/// Create an award record.
#[utoipa::path(
    post,
    path = "/api/awards",
    request_body = AwardCreateRequest,
    responses(
        (status = 200, description = "Stored award", body = Award),
        (status = 400, description = "Validation failure", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["awards"],
    operation_id = "createAward"
)]
#[post("/awards")]
pub async fn create_award(
    state: web::Data<HttpState>,
    payload: web::Json<AwardCreateRequest>,
) -> ApiResult<HttpResponse> {
    let new = parse_create_request(payload.into_inner())?;
    let award = state.awards.create(new).await?;
    Ok(HttpResponse::Ok().json(award))
}

/// Partially update an award selected by the `id` field in the body.
#[utoipa::path(
    put,
    path = "/api/awards",
    request_body = AwardUpdateRequest,
    responses(
        (status = 200, description = "Updated award", body = Award),
        (status = 400, description = "Validation failure", body = Error),
        (status = 404, description = "No award with that id", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["awards"],
    operation_id = "updateAward"
)]
#[put("/awards")]
pub async fn update_award(
    state: web::Data<HttpState>,
    payload: web::Json<AwardUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let (id, patch) = parse_update_request(payload.into_inner())?;
    let award = state.awards.update(id, patch).await?;
    Ok(HttpResponse::Ok().json(award))
}

#[cfg(test)]
#[path = "awards_tests.rs"]
mod tests;
