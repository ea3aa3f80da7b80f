//! Tests for enrollment HTTP handlers.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    FixturePostalCodeLookup, MockEnrollmentCommand, MockEnrollmentQuery,
};
use crate::domain::{AddressId, EnrollmentId, INVALID_BODY_MESSAGE};
use crate::inbound::http::test_utils::{login_route, session_cookie, test_session_middleware};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const USER: i32 = 11;

fn test_app(
    query: MockEnrollmentQuery,
    command: MockEnrollmentCommand,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState {
        enrollments: Arc::new(command),
        enrollments_query: Arc::new(query),
        postal_codes: Arc::new(FixturePostalCodeLookup),
    };
    App::new()
        .app_data(web::Data::new(state))
        .app_data(enrollment_json_config())
        .wrap(test_session_middleware())
        .route("/test/login/{user_id}", login_route())
        .service(get_enrollment)
        .service(post_enrollment)
}

async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> Cookie<'static> {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/test/login/{USER}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
    session_cookie(&res).expect("session cookie")
}

#[fixture]
fn birthday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0)
        .single()
        .expect("valid birthday")
}

#[fixture]
fn stored_view(birthday: DateTime<Utc>) -> EnrollmentWithAddress {
    EnrollmentWithAddress {
        id: EnrollmentId::new(3),
        details: EnrollmentDetails {
            name: "Maria Souza".to_owned(),
            cpf: "12345678909".to_owned(),
            birthday,
            phone: "(11) 99999-0000".to_owned(),
        },
        address: Some(AddressSummary {
            id: AddressId::new(8),
            details: AddressDetails {
                cep: "01001000".to_owned(),
                street: "Praça da Sé".to_owned(),
                city: "São Paulo".to_owned(),
                number: "100".to_owned(),
                state: "SP".to_owned(),
                neighborhood: "Sé".to_owned(),
                address_detail: None,
            },
        }),
    }
}

fn valid_body() -> Value {
    json!({
        "name": "Maria Souza",
        "cpf": "12345678909",
        "birthday": "1990-05-17",
        "phone": "(11) 99999-0000",
        "address": {
            "cep": "01001000",
            "street": "Praça da Sé",
            "city": "São Paulo",
            "number": "100",
            "state": "SP",
            "neighborhood": "Sé",
            "addressDetail": "Apto 12"
        }
    })
}

#[rstest]
#[actix_web::test]
async fn get_returns_enrollment_without_bookkeeping(stored_view: EnrollmentWithAddress) {
    let mut query = MockEnrollmentQuery::new();
    query
        .expect_fetch_with_address()
        .withf(|user_id| user_id.get() == USER)
        .times(1)
        .return_once(move |_| Ok(stored_view));
    let app = actix_test::init_service(test_app(query, MockEnrollmentCommand::new())).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/enrollment")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["birthday"], "1990-05-17T00:00:00Z");
    assert_eq!(body["address"]["id"], 8);
    assert_eq!(body["address"]["addressDetail"], Value::Null);
    for hidden in ["userId", "createdAt", "updatedAt"] {
        assert!(body.get(hidden).is_none(), "{hidden} leaked");
        assert!(body["address"].get(hidden).is_none(), "address {hidden} leaked");
    }
    assert!(body["address"].get("enrollmentId").is_none());
}

#[rstest]
#[actix_web::test]
async fn get_omits_missing_address(mut stored_view: EnrollmentWithAddress) {
    stored_view.address = None;
    let mut query = MockEnrollmentQuery::new();
    query
        .expect_fetch_with_address()
        .return_once(move |_| Ok(stored_view));
    let app = actix_test::init_service(test_app(query, MockEnrollmentCommand::new())).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/enrollment")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert!(body.get("address").is_none(), "{body}");
}

#[rstest]
#[case::not_found(Error::not_found("enrollment not found"))]
#[case::unavailable(Error::service_unavailable("database connection error"))]
#[case::internal(Error::internal("database error"))]
#[actix_web::test]
async fn get_collapses_failures_to_no_content(#[case] failure: Error) {
    let mut query = MockEnrollmentQuery::new();
    query
        .expect_fetch_with_address()
        .return_once(move |_| Err(failure));
    let app = actix_test::init_service(test_app(query, MockEnrollmentCommand::new())).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/enrollment")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(res).await.is_empty());
}

#[rstest]
#[case::get(actix_test::TestRequest::get().uri("/enrollment"))]
#[case::post(actix_test::TestRequest::post().uri("/enrollment").set_json(valid_body()))]
#[case::post_malformed(
    actix_test::TestRequest::post()
        .uri("/enrollment")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
)]
#[case::post_wrong_content_type(
    actix_test::TestRequest::post()
        .uri("/enrollment")
        .insert_header(("content-type", "text/plain"))
        .set_payload("name=Maria")
)]
#[actix_web::test]
async fn routes_require_a_session(#[case] request: actix_test::TestRequest) {
    let mut query = MockEnrollmentQuery::new();
    query.expect_fetch_with_address().times(0);
    let mut command = MockEnrollmentCommand::new();
    command.expect_create_or_update().times(0);
    let app = actix_test::init_service(test_app(query, command)).await;

    let res = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn post_splits_body_into_enrollment_and_address(birthday: DateTime<Utc>) {
    let mut command = MockEnrollmentCommand::new();
    command
        .expect_create_or_update()
        .withf(move |request| {
            request.user_id.get() == USER
                && request.enrollment.name == "Maria Souza"
                && request.enrollment.birthday == birthday
                && request.address.cep == "01001000"
                && request.address.address_detail.as_deref() == Some("Apto 12")
        })
        .times(1)
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(MockEnrollmentQuery::new(), command)).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/enrollment")
            .cookie(cookie)
            .set_json(valid_body())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(actix_test::read_body(res).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn post_collapses_service_failure_to_bare_bad_request() {
    let mut command = MockEnrollmentCommand::new();
    command
        .expect_create_or_update()
        .times(1)
        .return_once(|_| Err(Error::invalid_data([INVALID_BODY_MESSAGE])));
    let app = actix_test::init_service(test_app(MockEnrollmentQuery::new(), command)).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/enrollment")
            .cookie(cookie)
            .set_json(valid_body())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(actix_test::read_body(res).await.is_empty());
}

fn without(pointer: &str) -> Value {
    let mut body = valid_body();
    let (parent, key) = pointer.rsplit_once('/').expect("pointer has a parent");
    body.pointer_mut(parent)
        .and_then(Value::as_object_mut)
        .expect("parent object")
        .remove(key);
    body
}

#[rstest]
#[case::name(without("/name"))]
#[case::address(without("/address"))]
#[case::cep(without("/address/cep"))]
#[case::neighborhood(without("/address/neighborhood"))]
#[case::bad_birthday({
    let mut body = valid_body();
    body["birthday"] = json!("17/05/1990");
    body
})]
#[case::wrong_type({
    let mut body = valid_body();
    body["name"] = json!(42);
    body
})]
#[actix_web::test]
async fn post_rejects_invalid_bodies_without_calling_the_service(#[case] body: Value) {
    let mut command = MockEnrollmentCommand::new();
    command.expect_create_or_update().times(0);
    let app = actix_test::init_service(test_app(MockEnrollmentQuery::new(), command)).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/enrollment")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(actix_test::read_body(res).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn post_rejects_malformed_json() {
    let mut command = MockEnrollmentCommand::new();
    command.expect_create_or_update().times(0);
    let app = actix_test::init_service(test_app(MockEnrollmentQuery::new(), command)).await;
    let cookie = login(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/enrollment")
            .cookie(cookie)
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(actix_test::read_body(res).await.is_empty());
}

