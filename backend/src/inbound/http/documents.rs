//! Documents HTTP handlers.
//!
//! ```text
//! GET  /api/documents?entityKind=award&entityId=7
//! POST /api/documents
//! ```
//!
//! File bytes never pass through this API. Uploads happen against the
//! external file host; clients then record the returned URL here.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Document, DocumentValidationError, EntityKind, Error, NewDocument};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, invalid_field_value_error, missing_field_error,
};

const FILE_NAME: FieldName = FieldName::new("fileName");
const FILE_URL: FieldName = FieldName::new("fileUrl");
const FILE_TYPE: FieldName = FieldName::new("fileType");
const FILE_SIZE: FieldName = FieldName::new("fileSize");
const ENTITY_KIND: FieldName = FieldName::new("entityKind");
const ENTITY_ID: FieldName = FieldName::new("entityId");

/// Query parameters selecting the record a listing is scoped to.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    pub entity_kind: Option<String>,
    pub entity_id: Option<i32>,
}

/// Request payload for recording a completed upload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateRequest {
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub entity_kind: Option<String>,
    pub entity_id: Option<i32>,
}

fn parse_entity_kind(value: String) -> Result<EntityKind, Error> {
    value.parse().map_err(|_| {
        invalid_field_value_error(ENTITY_KIND, "entity kind must be award or invoice", value)
    })
}

fn map_validation_error(error: DocumentValidationError) -> Error {
    match error {
        DocumentValidationError::EmptyFileName => {
            invalid_field_error(FILE_NAME, "file name must not be empty")
        }
        DocumentValidationError::EmptyFileUrl => {
            invalid_field_error(FILE_URL, "file URL must not be empty")
        }
        DocumentValidationError::EmptyFileType => {
            invalid_field_error(FILE_TYPE, "file type must not be empty")
        }
        DocumentValidationError::NonPositiveFileSize => {
            invalid_field_error(FILE_SIZE, "file size must be a positive byte count")
        }
    }
}

fn parse_list_query(query: DocumentListQuery) -> Result<(EntityKind, i32), Error> {
    let kind = query
        .entity_kind
        .ok_or_else(|| missing_field_error(ENTITY_KIND))?;
    let entity_id = query
        .entity_id
        .ok_or_else(|| missing_field_error(ENTITY_ID))?;
    Ok((parse_entity_kind(kind)?, entity_id))
}

fn parse_create_request(payload: DocumentCreateRequest) -> Result<NewDocument, Error> {
    let file_name = payload
        .file_name
        .ok_or_else(|| missing_field_error(FILE_NAME))?;
    let file_url = payload
        .file_url
        .ok_or_else(|| missing_field_error(FILE_URL))?;
    let file_type = payload
        .file_type
        .ok_or_else(|| missing_field_error(FILE_TYPE))?;
    let file_size = payload
        .file_size
        .ok_or_else(|| missing_field_error(FILE_SIZE))?;
    let entity_kind = payload
        .entity_kind
        .ok_or_else(|| missing_field_error(ENTITY_KIND))?;
    let entity_id = payload
        .entity_id
        .ok_or_else(|| missing_field_error(ENTITY_ID))?;

    NewDocument::try_new(
        file_name,
        file_url,
        file_type,
        file_size,
        parse_entity_kind(entity_kind)?,
        entity_id,
    )
    .map_err(map_validation_error)
}

/// List documents attached to one award or invoice, newest first.
#[utoipa::path(
    get,
    path = "/api/documents",
    params(DocumentListQuery),
    responses(
        (status = 200, description = "Attached documents", body = [Document]),
        (status = 400, description = "Validation failure", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    query: web::Query<DocumentListQuery>,
) -> ApiResult<HttpResponse> {
    let (kind, entity_id) = parse_list_query(query.into_inner())?;
    let documents = state.documents.list_for_entity(kind, entity_id).await?;
    Ok(HttpResponse::Ok().json(documents))
}

/// Record a completed upload against an existing award or invoice.
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = DocumentCreateRequest,
    responses(
        (status = 200, description = "Stored document record", body = Document),
        (status = 400, description = "Validation failure or unknown record", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    payload: web::Json<DocumentCreateRequest>,
) -> ApiResult<HttpResponse> {
    let new = parse_create_request(payload.into_inner())?;
    let document = state.documents.create(new).await?;
    Ok(HttpResponse::Ok().json(document))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::awards::create_award;
    use crate::inbound::http::state::HttpStatePorts;

    #[rstest]
    fn list_query_requires_both_parameters() {
        let err = parse_list_query(DocumentListQuery {
            entity_kind: Some("award".to_owned()),
            entity_id: None,
        })
        .expect_err("missing entityId");
        let details = err
            .details()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("field").and_then(|v| v.as_str()),
            Some("entityId")
        );
    }

    #[rstest]
    fn unknown_entity_kind_is_rejected_with_the_value() {
        let err = parse_entity_kind("contract".to_owned()).expect_err("unknown kind");
        let details = err
            .details()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("value").and_then(|v| v.as_str()),
            Some("contract")
        );
    }

    async fn fixture_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let state = web::Data::new(HttpState::from(HttpStatePorts::default()));
        actix_test::init_service(
            App::new().app_data(state).service(
                web::scope("/api")
                    .service(create_award)
                    .service(list_documents)
                    .service(create_document),
            ),
        )
        .await
    }

    #[actix_web::test]
    async fn attach_and_list_against_an_existing_award() {
        let app = fixture_app().await;

        let req = actix_test::TestRequest::post()
            .uri("/api/awards")
            .set_json(json!({ "name": "MVP Trophy" }))
            .to_request();
        let award: Value = actix_test::call_and_read_body_json(&app, req).await;
        let award_id = award["id"].as_i64().expect("id");

        let req = actix_test::TestRequest::post()
            .uri("/api/documents")
            .set_json(json!({
                "fileName": "po-4411.pdf",
                "fileUrl": "https://files.example/heliix-awards/po-4411.pdf",
                "fileType": "application/pdf",
                "fileSize": 4096,
                "entityKind": "award",
                "entityId": award_id
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let uri = format!("/api/documents?entityKind=award&entityId={award_id}");
        let req = actix_test::TestRequest::get().uri(&uri).to_request();
        let listed: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn attaching_to_a_missing_record_is_rejected() {
        let app = fixture_app().await;

        let req = actix_test::TestRequest::post()
            .uri("/api/documents")
            .set_json(json!({
                "fileName": "receipt.pdf",
                "fileUrl": "https://files.example/heliix-invoices/receipt.pdf",
                "fileType": "application/pdf",
                "fileSize": 2048,
                "entityKind": "invoice",
                "entityId": 99
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "unknown_entity");
    }
}
