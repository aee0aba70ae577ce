use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ncf_inference_adapter::handlers::{self, AdapterState};
use ncf_inference_adapter::middleware::{RequestTracing, CORRELATION_HEADER};
use ncf_inference_adapter::HttpModelServer;

const MODEL_PATH: &str = "/v1/models/ncf:predict";

fn state_for(server: &MockServer) -> web::Data<AdapterState> {
    web::Data::new(AdapterState::new(
        Arc::new(HttpModelServer::new()),
        format!("{}{}", server.uri(), MODEL_PATH),
    ))
}

#[actix_web::test]
async fn invocations_returns_ranked_items() {
    let server = MockServer::start().await;
    let request = json!({"instances": [{"input_2": [0, 1, 0]}, {"input_2": [1, 0, 0]}]});

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": [[0.2], [0.9]]})))
        .expect(1)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .wrap(RequestTracing)
            .app_data(state_for(&server))
            .configure(handlers::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/invocations")
            .insert_header(("content-type", "application/json"))
            .insert_header(("accept", "application/json"))
            .set_payload(request.to_string())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");
    assert!(resp.headers().contains_key(CORRELATION_HEADER));

    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        r#"{"predictions":[{"item_id":0,"prediction":0.9},{"item_id":1,"prediction":0.2}]}"#
    );
}

#[actix_web::test]
async fn invocations_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_json(json!({"instances": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
        .expect(1)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(handlers::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/invocations")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"instances": []}"#)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, r#"{"predictions":[]}"#);
}

#[actix_web::test]
async fn invocations_rejects_text_plain_without_calling_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(handlers::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/invocations")
            .insert_header(("content-type", "text/plain"))
            .set_payload(r#"{"instances": []}"#)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = test::read_body_json(resp).await;
    let message: Value = serde_json::from_str(body["error"].as_str().unwrap()).unwrap();
    assert_eq!(message["error"], "unsupported content type text/plain");
}

#[actix_web::test]
async fn invocations_surfaces_model_error_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("server overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(handlers::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/invocations")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"instances": [{"input_2": [1, 0]}]}"#)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "server overloaded");
    assert_eq!(body["code"], 502);
}

#[actix_web::test]
async fn invocations_rejects_instance_without_hot_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(handlers::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/invocations")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"instances": [{"input_2": [0, 0, 0]}]}"#)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn ping_reports_healthy() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(handlers::configure),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
