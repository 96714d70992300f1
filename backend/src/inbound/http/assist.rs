//! AI-assist HTTP handlers.
//!
//! ```text
//! POST /api/assist/award-category
//! POST /api/assist/invoice-extraction
//! ```
//!
//! Suggestions are advisory: nothing is written to the record store.
//! Clients feed accepted suggestions back through the normal create and
//! update endpoints as if a person had typed them.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::SuggestionSourceError;
use crate::domain::{AwardCategorySuggestion, Error, InvoiceExtraction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

const TEXT: FieldName = FieldName::new("text");

/// Request payload shared by both assist endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssistRequest {
    pub text: Option<String>,
}

fn parse_assist_request(payload: AssistRequest) -> Result<String, Error> {
    let text = payload.text.ok_or_else(|| missing_field_error(TEXT))?;
    if text.trim().is_empty() {
        return Err(invalid_field_error(TEXT, "text must not be empty"));
    }
    Ok(text)
}

/// Suggestion failures never expose prompts or provider payloads; the
/// detail stays in the log and the client sees an upstream envelope.
fn map_suggestion_error(error: SuggestionSourceError) -> Error {
    warn!(%error, "suggestion source failed");
    Error::upstream("suggestion service failed")
}

/// Suggest a category, subcategory, and tags for an award description.
#[utoipa::path(
    post,
    path = "/api/assist/award-category",
    request_body = AssistRequest,
    responses(
        (status = 200, description = "Category suggestion", body = AwardCategorySuggestion),
        (status = 400, description = "Validation failure", body = Error),
        (status = 502, description = "Suggestion service failed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assist"],
    operation_id = "suggestAwardCategory"
)]
#[post("/assist/award-category")]
pub async fn suggest_award_category(
    state: web::Data<HttpState>,
    payload: web::Json<AssistRequest>,
) -> ApiResult<HttpResponse> {
    let text = parse_assist_request(payload.into_inner())?;
    let suggestion = state
        .suggestions
        .categorise_award(&text)
        .await
        .map_err(map_suggestion_error)?;
    Ok(HttpResponse::Ok().json(suggestion))
}

/// Extract structured invoice fields from free-form text.
#[utoipa::path(
    post,
    path = "/api/assist/invoice-extraction",
    request_body = AssistRequest,
    responses(
        (status = 200, description = "Extracted invoice fields", body = InvoiceExtraction),
        (status = 400, description = "Validation failure", body = Error),
        (status = 502, description = "Suggestion service failed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assist"],
    operation_id = "extractInvoiceFields"
)]
#[post("/assist/invoice-extraction")]
pub async fn extract_invoice_fields(
    state: web::Data<HttpState>,
    payload: web::Json<AssistRequest>,
) -> ApiResult<HttpResponse> {
    let text = parse_assist_request(payload.into_inner())?;
    let extraction = state
        .suggestions
        .extract_invoice(&text)
        .await
        .map_err(map_suggestion_error)?;
    Ok(HttpResponse::Ok().json(extraction))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSuggestionSource;
    use crate::inbound::http::state::{HttpState, HttpStatePorts};

    #[rstest]
    fn blank_text_is_rejected() {
        let err = parse_assist_request(AssistRequest {
            text: Some("   ".to_owned()),
        })
        .expect_err("blank text");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn suggestion_failures_become_upstream_errors() {
        let err = map_suggestion_error(SuggestionSourceError::status("status 429"));
        assert_eq!(err.code(), ErrorCode::UpstreamError);
        assert!(!err.message().contains("429"));
    }

    async fn app_with_source(
        source: Arc<dyn crate::domain::ports::SuggestionSource>,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let ports = HttpStatePorts {
            suggestions: source,
            ..HttpStatePorts::default()
        };
        let state = web::Data::new(HttpState::from(ports));
        actix_test::init_service(
            App::new().app_data(state).service(
                web::scope("/api")
                    .service(suggest_award_category)
                    .service(extract_invoice_fields),
            ),
        )
        .await
    }

    #[actix_web::test]
    async fn fixture_source_answers_award_category() {
        let app =
            app_with_source(Arc::new(crate::domain::ports::FixtureSuggestionSource)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/assist/award-category")
            .set_json(json!({ "text": "Walnut plaque for coach of the year" }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["category"], "trophy");
    }

    #[actix_web::test]
    async fn transport_failure_surfaces_as_502() {
        let mut source = MockSuggestionSource::new();
        source
            .expect_extract_invoice()
            .return_once(|_| Err(SuggestionSourceError::transport("connection refused")));
        let app = app_with_source(Arc::new(source)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/assist/invoice-extraction")
            .set_json(json!({ "text": "Crown Trophy invoice 4411 total $123.45" }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "upstream_error");
    }
}
