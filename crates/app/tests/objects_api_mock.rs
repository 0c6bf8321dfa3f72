//! Objects scenarios against a local mock of the Objects API.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use objects_contract::run_objects_suite;
use objects_contract::scenarios::{
    self, PATCHED_NAME, PAYLOAD_NAME, UNKNOWN_ID, macbook_payload, macbook_update,
};
use pretty_assertions::assert_eq;
use probe_application::{
    HarnessConfig, Harness, ReportCollector, ScenarioContext, StepResult, Suite,
};
use probe_domain::{FailureKind, OutcomeStatus, TestOutcome};
use probe_infrastructure::{ReqwestHttpClient, SystemClock};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OBJECT_ID: &str = "ff8081819782e69e019a1b2c3d4e5f60";

fn harness(server: &MockServer) -> Arc<Harness<ReqwestHttpClient>> {
    let config = HarnessConfig::default()
        .with_base_url(server.uri())
        .with_default_timeout(5_000);
    Arc::new(Harness::new(
        Arc::new(ReqwestHttpClient::new().unwrap()),
        config,
    ))
}

async fn run<F>(server: &MockServer, name: &str, scenario: F) -> TestOutcome
where
    F: AsyncFnOnce(&mut ScenarioContext<ReqwestHttpClient>) -> StepResult<()>,
{
    let collector = ReportCollector::open(Arc::new(SystemClock::new()));
    let outcome = Suite::new(harness(server), &collector)
        .run_scenario(name, scenario)
        .await;
    let report = collector.close().unwrap();
    assert_eq!(report.outcomes, vec![outcome.clone()]);
    outcome
}

fn stored_object(name: &str) -> Value {
    json!({
        "id": OBJECT_ID,
        "name": name,
        "data": macbook_payload()["data"]
    })
}

fn not_found(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(404)
        .set_body_json(json!({"error": format!("Oject with id={id} was not found.")}))
}

async fn mount_create(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/objects"))
        .and(body_json(macbook_payload()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": OBJECT_ID,
            "name": PAYLOAD_NAME,
            "createdAt": "2026-10-17T09:12:44.123+00:00",
            "data": macbook_payload()["data"]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "name": "Google Pixel 6 Pro", "data": {"color": "Cloudy White"}},
            {"id": "2", "name": "Apple iPhone 12 Mini, 256GB, Blue", "data": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(&server, "list", scenarios::list_objects::<ReqwestHttpClient>).await;

    assert_eq!(outcome.status, OutcomeStatus::Passed);
}

#[tokio::test]
async fn test_get_unknown_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{UNKNOWN_ID}")))
        .respond_with(not_found(UNKNOWN_ID))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "get unknown",
        scenarios::get_unknown_object::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_create_then_get() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_object(PAYLOAD_NAME)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "create then get",
        scenarios::create_then_get::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_create_returns_data() {
    let server = MockServer::start().await;
    mount_create(&server).await;

    let outcome = run(
        &server,
        "create returns data",
        scenarios::create_returns_data::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_create_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/objects"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "400 Bad Request. If you are trying to create or update the data, potential issue is that you are sending incorrect body json or it is missing at all."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "create without body",
        scenarios::create_without_body::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_update_object() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    let mut updated = macbook_update();
    updated["id"] = json!(OBJECT_ID);
    updated["updatedAt"] = json!("2026-10-17T09:12:45.001+00:00");
    Mock::given(method("PUT"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .and(body_json(macbook_update()))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(&server, "update", scenarios::update_object::<ReqwestHttpClient>).await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_update_unknown_object() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/objects/{UNKNOWN_ID}")))
        .respond_with(not_found(UNKNOWN_ID))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "update unknown",
        scenarios::update_unknown_object::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_patch_then_get() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    Mock::given(method("PATCH"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .and(body_json(json!({"name": PATCHED_NAME})))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_object(PATCHED_NAME)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_object(PATCHED_NAME)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "patch then get",
        scenarios::patch_then_get::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_patch_unknown_object() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/objects/{UNKNOWN_ID}")))
        .respond_with(not_found(UNKNOWN_ID))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "patch unknown",
        scenarios::patch_unknown_object::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_delete_then_get() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_object(PAYLOAD_NAME)))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": format!("Object with id = {OBJECT_ID} has been deleted.")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(not_found(OBJECT_ID))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "delete then get",
        scenarios::delete_then_get::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_delete_unknown_object() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/objects/{UNKNOWN_ID}")))
        .respond_with(not_found(UNKNOWN_ID))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "delete unknown",
        scenarios::delete_unknown_object::<ReqwestHttpClient>,
    )
    .await;

    assert!(outcome.is_passed(), "{outcome:?}");
}

#[tokio::test]
async fn test_wrong_status_is_an_assertion_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{UNKNOWN_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": UNKNOWN_ID})))
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "get unknown",
        scenarios::get_unknown_object::<ReqwestHttpClient>,
    )
    .await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(
        failure.message.contains("Expected status = 404, got 200 OK"),
        "{}",
        failure.message
    );
}

#[tokio::test]
async fn test_create_without_id_is_an_extraction_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": PAYLOAD_NAME})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "create then get",
        scenarios::create_then_get::<ReqwestHttpClient>,
    )
    .await;

    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Extraction);
}

#[tokio::test]
async fn test_stale_name_names_the_mismatching_field() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    Mock::given(method("PATCH"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_object(PAYLOAD_NAME)))
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "patch then get",
        scenarios::patch_then_get::<ReqwestHttpClient>,
    )
    .await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("$.name"), "{}", failure.message);
}

#[tokio::test]
async fn test_create_then_get_with_wrong_data_fails() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": OBJECT_ID,
            "name": PAYLOAD_NAME,
            "data": {"year": 1999}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "create then get",
        scenarios::create_then_get::<ReqwestHttpClient>,
    )
    .await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("$.data"), "{}", failure.message);
}

#[tokio::test]
async fn test_patch_that_wipes_data_fails() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    let wiped = json!({"id": OBJECT_ID, "name": PATCHED_NAME, "data": null});
    Mock::given(method("PATCH"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(wiped.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/{OBJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(wiped))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &server,
        "patch then get",
        scenarios::patch_then_get::<ReqwestHttpClient>,
    )
    .await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("$.data"), "{}", failure.message);
}

#[tokio::test]
async fn test_full_suite_records_every_scenario() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let collector = ReportCollector::open(Arc::new(SystemClock::new()));
    let outcomes = {
        let suite = Suite::new(harness(&server), &collector);
        run_objects_suite(&suite).await
    };
    let report = collector.close().unwrap();

    assert_eq!(outcomes.len(), 11);
    assert_eq!(report.outcomes, outcomes);
    assert_eq!((report.total, report.passed, report.failed), (11, 0, 11));
    assert!(
        report
            .failures()
            .all(|o| o.failure.as_ref().is_some_and(|f| f.kind == FailureKind::Assertion))
    );
}
