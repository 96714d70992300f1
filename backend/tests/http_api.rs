//! End-to-end tests over the fixture-backed HTTP surface.
//!
//! Exercises the same wiring the server uses: correlation middleware,
//! the `/api` scope, and the health probes, all against in-memory ports.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use heliix::Correlation;
use heliix::inbound::http::assist::{extract_invoice_fields, suggest_award_category};
use heliix::inbound::http::awards::{create_award, list_awards, update_award};
use heliix::inbound::http::documents::{create_document, list_documents};
use heliix::inbound::http::health::{HealthState, live, ready};
use heliix::inbound::http::invoices::{create_invoice, list_invoices, update_invoice};
use heliix::inbound::http::state::{HttpState, HttpStatePorts};

fn parse_instant(value: &Value) -> chrono::DateTime<chrono::Utc> {
    value
        .as_str()
        .expect("timestamp string")
        .parse()
        .expect("RFC 3339 timestamp")
}

async fn fixture_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl actix_web::body::MessageBody>,
    Error = actix_web::Error,
> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    let http_state = web::Data::new(HttpState::from(HttpStatePorts::default()));

    test::init_service(
        App::new()
            .app_data(health_state)
            .app_data(http_state)
            .wrap(Correlation)
            .service(
                web::scope("/api")
                    .service(list_awards)
                    .service(create_award)
                    .service(update_award)
                    .service(list_invoices)
                    .service(create_invoice)
                    .service(update_invoice)
                    .service(list_documents)
                    .service(create_document)
                    .service(suggest_award_category)
                    .service(extract_invoice_fields),
            )
            .service(ready)
            .service(live),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn created_award_appears_in_listing_with_defaults() {
    let app = fixture_app().await;

    let create = test::TestRequest::post()
        .uri("/api/awards")
        .set_json(json!({"name": "MVP Trophy", "quantity": 10}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, create).await;
    assert_eq!(created["name"], "MVP Trophy");
    assert_eq!(created["status"], "planned");
    assert_eq!(created["quantity"], 10);

    let list = test::TestRequest::get().uri("/api/awards").to_request();
    let listed: Value = test::call_and_read_body_json(&app, list).await;
    let awards = listed.as_array().expect("array");
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0]["id"], created["id"]);
}

#[rstest]
#[actix_web::test]
async fn status_only_invoice_update_preserves_other_fields() {
    let app = fixture_app().await;

    let create = test::TestRequest::post()
        .uri("/api/invoices")
        .set_json(json!({
            "invoiceNumber": "INV-100",
            "vendorName": "Crown Trophy",
            "amountCents": 125_000,
            "invoiceDate": "2026-04-01"
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, create).await;

    let update = test::TestRequest::put()
        .uri("/api/invoices")
        .set_json(json!({"id": created["id"], "status": "approved"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, update).await;

    assert_eq!(updated["status"], "approved");
    assert_eq!(updated["invoiceNumber"], "INV-100");
    assert_eq!(updated["vendorName"], "Crown Trophy");
    assert_eq!(updated["amountCents"], 125_000);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let stamped_before = parse_instant(&created["updatedAt"]);
    let stamped_after = parse_instant(&updated["updatedAt"]);
    assert!(stamped_after > stamped_before);
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id_header() {
    let app = fixture_app().await;

    let ok = test::TestRequest::get().uri("/api/awards").to_request();
    let ok_response = test::call_service(&app, ok).await;
    assert!(ok_response.headers().contains_key("trace-id"));

    let bad = test::TestRequest::post()
        .uri("/api/awards")
        .set_json(json!({"quantity": 1}))
        .to_request();
    let bad_response = test::call_service(&app, bad).await;
    assert_eq!(bad_response.status(), 400);
    assert!(bad_response.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_web::test]
async fn validation_failures_use_the_error_envelope() {
    let app = fixture_app().await;

    let request = test::TestRequest::post()
        .uri("/api/invoices")
        .set_json(json!({"invoiceNumber": "INV-7"}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(!body["error"].as_str().expect("message").is_empty());
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn unknown_award_update_returns_not_found() {
    let app = fixture_app().await;

    let request = test::TestRequest::put()
        .uri("/api/awards")
        .set_json(json!({"id": 4040, "name": "Replacement"}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 404);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn documents_attach_to_records_and_list_by_entity() {
    let app = fixture_app().await;

    let create_award_request = test::TestRequest::post()
        .uri("/api/awards")
        .set_json(json!({"name": "Championship Ring"}))
        .to_request();
    let award: Value = test::call_and_read_body_json(&app, create_award_request).await;

    let attach = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({
            "fileName": "ring-spec.pdf",
            "fileUrl": "https://files.example/ring-spec.pdf",
            "fileType": "application/pdf",
            "fileSize": 52_430,
            "entityKind": "award",
            "entityId": award["id"]
        }))
        .to_request();
    let attached: Value = test::call_and_read_body_json(&app, attach).await;
    assert_eq!(attached["fileName"], "ring-spec.pdf");

    let list = test::TestRequest::get()
        .uri(&format!(
            "/api/documents?entityKind=award&entityId={}",
            award["id"]
        ))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    let other = test::TestRequest::get()
        .uri("/api/documents?entityKind=invoice&entityId=1")
        .to_request();
    let empty: Value = test::call_and_read_body_json(&app, other).await;
    assert!(empty.as_array().expect("array").is_empty());
}

#[rstest]
#[actix_web::test]
async fn document_for_missing_entity_is_rejected() {
    let app = fixture_app().await;

    let attach = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({
            "fileName": "orphan.pdf",
            "fileUrl": "https://files.example/orphan.pdf",
            "fileType": "application/pdf",
            "fileSize": 100,
            "entityKind": "invoice",
            "entityId": 999
        }))
        .to_request();
    let response = test::call_service(&app, attach).await;
    assert_eq!(response.status(), 400);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "unknown_entity");
}

#[rstest]
#[actix_web::test]
async fn assist_endpoints_answer_from_the_fixture_source() {
    let app = fixture_app().await;

    let categorise = test::TestRequest::post()
        .uri("/api/assist/award-category")
        .set_json(json!({"text": "24in engraved champions trophy"}))
        .to_request();
    let suggestion: Value = test::call_and_read_body_json(&app, categorise).await;
    assert_eq!(suggestion["category"], "trophy");

    let extract = test::TestRequest::post()
        .uri("/api/assist/invoice-extraction")
        .set_json(json!({"text": "Invoice INV-9 from Crown Trophy"}))
        .to_request();
    let response = test::call_service(&app, extract).await;
    assert!(response.status().is_success());
}

#[rstest]
#[actix_web::test]
async fn health_probes_report_server_state() {
    let app = fixture_app().await;

    let ready_response = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert!(ready_response.status().is_success());

    let live_response = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;
    assert!(live_response.status().is_success());
}
