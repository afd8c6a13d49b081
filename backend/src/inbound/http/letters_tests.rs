//! Tests for letter HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    CreateLetterResponse, LetterCommand, LetterQuery, MockLetterCommand, MockLetterQuery,
};
use crate::domain::{Error, GeoPoint, LetterId, LetterService};
use crate::inbound::http::error::{json_config, query_config};
use crate::outbound::memory::InMemoryLetterStore;

fn test_app(
    command: Arc<dyn LetterCommand>,
    query: Arc<dyn LetterQuery>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(command, query)))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(NormalizePath::trim())
        .service(root)
        .service(create_letter)
        .service(list_letters)
        .service(nearby_letters)
}

fn in_memory_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = Arc::new(LetterService::new(Arc::new(InMemoryLetterStore::new())));
    test_app(service.clone(), service)
}

fn unused_query() -> Arc<dyn LetterQuery> {
    let mut query = MockLetterQuery::new();
    query.expect_list_all().times(0);
    query.expect_find_nearby().times(0);
    Arc::new(query)
}

fn unused_command() -> Arc<dyn LetterCommand> {
    let mut command = MockLetterCommand::new();
    command.expect_create().times(0);
    Arc::new(command)
}

fn sample_view(id: i64, content: Option<&str>, distance_metres: f64) -> NearbyLetterView {
    NearbyLetterView {
        id: LetterId::new(id),
        content: content.map(str::to_owned),
        location: GeoPoint::new(139.767, 35.681).expect("valid point"),
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid time"),
        distance_metres,
    }
}

#[actix_web::test]
async fn root_greets() {
    let app = actix_test::init_service(test_app(unused_command(), unused_query())).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": "Hello, world!"}));
}

#[actix_web::test]
async fn create_letter_forwards_payload_and_confirms() {
    let mut command = MockLetterCommand::new();
    command
        .expect_create()
        .withf(|request| {
            request.content == "hello" && request.latitude == 35.681 && request.longitude == 139.767
        })
        .times(1)
        .return_once(|_| {
            Ok(CreateLetterResponse {
                letter_id: LetterId::new(1),
            })
        });
    let app = actix_test::init_service(test_app(Arc::new(command), unused_query())).await;

    let request = actix_test::TestRequest::post()
        .uri("/letters")
        .set_json(json!({"content": "hello", "latitude": 35.681, "longitude": 139.767}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": "letter left"}));
}

#[rstest]
#[case::unavailable(Error::service_unavailable("letter store is temporarily unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::internal(Error::internal("insert letter failed: boom"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn create_letter_maps_domain_errors(#[case] failure: Error, #[case] status: StatusCode) {
    let mut command = MockLetterCommand::new();
    command
        .expect_create()
        .times(1)
        .return_once(move |_| Err(failure));
    let app = actix_test::init_service(test_app(Arc::new(command), unused_query())).await;

    let request = actix_test::TestRequest::post()
        .uri("/letters")
        .set_json(json!({"content": "hello", "latitude": 35.681, "longitude": 139.767}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("error").is_some());
    assert_ne!(body["error"], "insert letter failed: boom");
}

#[rstest]
#[case::missing_field(json!({"content": "hello", "latitude": 35.681}))]
#[case::wrong_type(json!({"content": "hello", "latitude": "north", "longitude": 139.767}))]
#[actix_web::test]
async fn create_letter_rejects_malformed_body(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(unused_command(), unused_query())).await;

    let request = actix_test::TestRequest::post()
        .uri("/letters")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "body");
}

#[actix_web::test]
async fn create_letter_rejects_blank_content_through_service() {
    let app = actix_test::init_service(in_memory_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/letters")
        .set_json(json!({"content": "   ", "latitude": 35.681, "longitude": 139.767}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "content");
}

#[actix_web::test]
async fn list_letters_uses_snake_case_fields() {
    let app = actix_test::init_service(in_memory_app()).await;

    let create = actix_test::TestRequest::post()
        .uri("/letters")
        .set_json(json!({"content": "hello", "latitude": 35.681, "longitude": 139.767}))
        .to_request();
    assert!(actix_test::call_service(&app, create).await.status().is_success());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/letters").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let letter = &body["letters"][0];
    assert_eq!(letter["id"], 1);
    assert_eq!(letter["content"], "hello");
    assert_eq!(letter["latitude"], 35.681);
    assert_eq!(letter["longitude"], 139.767);
    assert!(
        letter["date_time"]
            .as_str()
            .is_some_and(|value| chrono::DateTime::parse_from_rfc3339(value).is_ok())
    );
}

#[actix_web::test]
async fn nearby_letters_serialises_redacted_content_as_null() {
    let mut query = MockLetterQuery::new();
    query
        .expect_find_nearby()
        .withf(|request| {
            request.latitude == 35.681
                && request.longitude == 139.767
                && request.radius_metres == Some(100.0)
        })
        .times(1)
        .return_once(|_| {
            Ok(FindNearbyLettersResponse {
                letters: vec![
                    sample_view(1, Some("close"), 3.0),
                    sample_view(2, None, 40.0),
                ],
            })
        });
    let app = actix_test::init_service(test_app(unused_command(), Arc::new(query))).await;

    let request = actix_test::TestRequest::get()
        .uri("/nearby_letters?latitude=35.681&longitude=139.767&max_distance=100")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["letters"][0]["content"], "close");
    assert_eq!(body["letters"][0]["distance"], 3.0);
    assert!(body["letters"][1]["content"].is_null());
    assert_eq!(body["letters"][1]["date_time"], "2024-05-01T12:00:00+00:00");
}

#[actix_web::test]
async fn nearby_letters_omitted_radius_is_passed_as_none() {
    let mut query = MockLetterQuery::new();
    query
        .expect_find_nearby()
        .withf(|request| request.radius_metres.is_none())
        .times(1)
        .return_once(|_| Ok(FindNearbyLettersResponse { letters: vec![] }));
    let app = actix_test::init_service(test_app(unused_command(), Arc::new(query))).await;

    let request = actix_test::TestRequest::get()
        .uri("/nearby_letters?latitude=35.681&longitude=139.767")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"letters": []}));
}

#[rstest]
#[case::missing_latitude("/nearby_letters?longitude=139.767")]
#[case::not_a_number("/nearby_letters?latitude=north&longitude=139.767")]
#[actix_web::test]
async fn nearby_letters_rejects_bad_query(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(unused_command(), unused_query())).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "query");
}

#[rstest]
#[case("/letters/")]
#[case("/nearby_letters/?latitude=35.681&longitude=139.767")]
#[actix_web::test]
async fn trailing_slash_routes_are_accepted(#[case] uri: &str) {
    let app = actix_test::init_service(in_memory_app()).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
}
