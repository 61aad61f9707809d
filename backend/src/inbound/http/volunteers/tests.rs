//! Handler tests for the volunteer endpoints.

use std::sync::Arc;

use super::*;
use crate::Trace;
use crate::domain::ports::{MockVolunteerCommand, MockVolunteerQuery};
use crate::domain::{PhoneNumber, VolunteerId, VolunteerStatus, Ward};
use crate::inbound::http::validation::{json_config, query_config};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

fn volunteer(id: i64, status: VolunteerStatus) -> Volunteer {
    let at = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 15, 0)
        .single()
        .expect("valid timestamp");
    Volunteer {
        id: VolunteerId::new(id),
        name: "Jane".to_owned(),
        phone: PhoneNumber::new("0711000111").expect("valid phone"),
        email: Some("jane@x.com".to_owned()),
        ward: Ward::new("Kibra").expect("valid ward"),
        interest: Some("Health".to_owned()),
        status,
        created_at: at,
        updated_at: at,
    }
}

fn test_app(
    command: MockVolunteerCommand,
    query: MockVolunteerQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(command), Arc::new(query));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(volunteers_scope())
}

async fn call(
    command: MockVolunteerCommand,
    query: MockVolunteerQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(command, query)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[actix_web::test]
async fn register_returns_created_with_location() {
    let mut command = MockVolunteerCommand::new();
    command
        .expect_register()
        .withf(|request| request.phone == "0711000111" && request.ward == "Kibra")
        .times(1)
        .return_once(|_| Ok(volunteer(1, VolunteerStatus::Active)));

    let app = actix_test::init_service(test_app(command, MockVolunteerQuery::new())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/volunteers")
        .set_json(json!({
            "name": "Jane",
            "phone": "0711000111",
            "email": "jane@x.com",
            "ward": "Kibra",
            "interest": "Health",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/api/v1/volunteers/1")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["status"], json!("ACTIVE"));
}

#[actix_web::test]
async fn register_duplicate_maps_to_conflict() {
    let mut command = MockVolunteerCommand::new();
    command.expect_register().return_once(|_| {
        Err(Error::conflict("phone number is already registered")
            .with_details(json!({"field": "phone", "code": "duplicate_phone"})))
    });

    let (status, body) = call(
        command,
        MockVolunteerQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/volunteers")
            .set_json(json!({"name": "Jane", "phone": "0711000111", "ward": "Kibra"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(body["details"]["code"], json!("duplicate_phone"));
    assert!(body.get("traceId").is_some());
}

#[actix_web::test]
async fn malformed_body_uses_error_envelope() {
    let mut command = MockVolunteerCommand::new();
    command.expect_register().never();

    let (status, body) = call(
        command,
        MockVolunteerQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/volunteers")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["code"], json!("invalid_body"));
}

#[rstest]
#[case("/api/v1/volunteers/abc")]
#[case("/api/v1/volunteers/0")]
#[actix_web::test]
async fn invalid_ids_are_rejected_before_the_port(#[case] uri: &str) {
    let mut query = MockVolunteerQuery::new();
    query.expect_get_by_id().never();

    let (status, body) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("id"));
}

#[actix_web::test]
async fn get_unknown_volunteer_is_not_found() {
    let mut query = MockVolunteerQuery::new();
    query
        .expect_get_by_id()
        .with(eq(VolunteerId::new(9)))
        .return_once(|_| Err(Error::not_found("volunteer 9 not found")));

    let (status, body) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/volunteers/9"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("volunteer 9 not found"));
}

#[actix_web::test]
async fn update_status_parses_body_status() {
    let mut command = MockVolunteerCommand::new();
    command
        .expect_update_status()
        .with(eq(VolunteerId::new(1)), eq(VolunteerStatus::Suspended))
        .times(1)
        .return_once(|_, _| Ok(volunteer(1, VolunteerStatus::Suspended)));

    let (status, body) = call(
        command,
        MockVolunteerQuery::new(),
        actix_test::TestRequest::put()
            .uri("/api/v1/volunteers/1/status")
            .set_json(json!({"status": "suspended"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("SUSPENDED"));
}

#[actix_web::test]
async fn update_status_rejects_unknown_status() {
    let mut command = MockVolunteerCommand::new();
    command.expect_update_status().never();

    let (status, body) = call(
        command,
        MockVolunteerQuery::new(),
        actix_test::TestRequest::put()
            .uri("/api/v1/volunteers/1/status")
            .set_json(json!({"status": "RETIRED"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("unknown_status"));
}

#[actix_web::test]
async fn update_profile_forwards_present_fields() {
    let mut command = MockVolunteerCommand::new();
    command
        .expect_update_profile()
        .withf(|id, request| {
            *id == VolunteerId::new(1)
                && request.ward.as_deref() == Some("Langata")
                && request.name.is_none()
        })
        .return_once(|_, _| Ok(volunteer(1, VolunteerStatus::Active)));

    let (status, _) = call(
        command,
        MockVolunteerQuery::new(),
        actix_test::TestRequest::put()
            .uri("/api/v1/volunteers/1")
            .set_json(json!({"ward": "Langata"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn delete_returns_no_content() {
    let mut command = MockVolunteerCommand::new();
    command
        .expect_delete()
        .with(eq(VolunteerId::new(5)))
        .return_once(|_| Ok(()));

    let (status, body) = call(
        command,
        MockVolunteerQuery::new(),
        actix_test::TestRequest::delete().uri("/api/v1/volunteers/5"),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn list_all_applies_paging_defaults() {
    let mut query = MockVolunteerQuery::new();
    query
        .expect_list_all()
        .with(eq(PageRequest::default()))
        .return_once(|request| {
            Ok(Page::new(
                vec![volunteer(1, VolunteerStatus::Active)],
                request,
                1,
            ))
        });

    let (status, body) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/volunteers"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], json!(0));
    assert_eq!(body["size"], json!(10));
    assert_eq!(body["totalItems"], json!(1));
    assert_eq!(body["totalPages"], json!(1));
}

#[actix_web::test]
async fn active_without_paging_returns_array() {
    let mut query = MockVolunteerQuery::new();
    query
        .expect_list_active()
        .return_once(|| Ok(vec![volunteer(1, VolunteerStatus::Active)]));
    query.expect_list_active_page().never();

    let (status, body) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/volunteers/active"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn active_with_paging_returns_page() {
    let mut query = MockVolunteerQuery::new();
    query.expect_list_active().never();
    query
        .expect_list_active_page()
        .with(eq(PageRequest::new(Some(2), Some(5))))
        .return_once(|request| Ok(Page::new(Vec::new(), request, 7)));

    let (status, body) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/volunteers/active?page=2&size=5"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPages"], json!(2));
}

#[actix_web::test]
async fn invalid_paging_query_is_rejected() {
    let (status, body) = call(
        MockVolunteerCommand::new(),
        MockVolunteerQuery::new(),
        actix_test::TestRequest::get().uri("/api/v1/volunteers?page=minus"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_query"));
}

#[actix_web::test]
async fn active_ward_route_is_not_parsed_as_id() {
    let mut query = MockVolunteerQuery::new();
    query
        .expect_list_active_by_ward()
        .with(eq("Kibra".to_owned()))
        .return_once(|_| Ok(Vec::new()));

    let (status, body) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/volunteers/active/ward/Kibra"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn stats_endpoints_report_counts() {
    let mut query = MockVolunteerQuery::new();
    query.expect_count_active().return_once(|| Ok(3));
    query
        .expect_count_by_ward()
        .with(eq("Kibra".to_owned()))
        .return_once(|_| Ok(2));

    let app = actix_test::init_service(test_app(MockVolunteerCommand::new(), query)).await;
    let active: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/volunteers/stats/active-count")
            .to_request(),
    )
    .await;
    let ward: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/volunteers/stats/ward/Kibra")
            .to_request(),
    )
    .await;

    assert_eq!(active, json!({"count": 3}));
    assert_eq!(ward, json!({"ward": "Kibra", "count": 2}));
}

#[actix_web::test]
async fn list_by_status_rejects_unknown_status() {
    let mut query = MockVolunteerQuery::new();
    query.expect_list_by_status().never();

    let (status, _) = call(
        MockVolunteerCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/volunteers/status/retired"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
