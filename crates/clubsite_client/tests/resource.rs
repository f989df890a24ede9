use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use clubsite_client::{
    HttpSend, PreparedRequest, RawResponse, RequestConfig, RequestError, Resource,
    INVALID_JSON_MESSAGE,
};
use clubsite_core::{ErrorDetail, FetchStatus, Language};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

#[tokio::test]
async fn get_resource_fires_on_mount_and_returns_payload() {
    init_logging();
    let server = MockServer::start().await;
    let payload = json!({
        "count": 12,
        "results": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}, {"id": 5}],
        "next": format!("{}/api/blog/articles?page=2", server.uri()),
        "previous": null,
    });
    Mock::given(method("GET"))
        .and(path("/api/blog/articles"))
        .and(query_param("type", "VD"))
        .and(query_param("page", "1"))
        .and(header("Accept", "application/json"))
        .and(header("Accept-Language", "fa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let url = format!("{}/api/blog/articles?type=VD&page=1", server.uri());
    let resource = Resource::new(url, RequestConfig::get()).expect("client builds");

    let returned = resource.mount().await;

    assert_eq!(returned, Some(payload.clone()));
    let state = resource.state();
    assert_eq!(state.status(), FetchStatus::Success);
    assert_eq!(state.data(), Some(&payload));
    assert_eq!(state.error(), None);
}

#[tokio::test]
async fn post_resource_does_not_auto_fire() {
    init_logging();
    let resource = Resource::new(
        "http://localhost/api/auth/login/",
        RequestConfig::with_method(Method::POST),
    )
    .expect("client builds");

    assert_eq!(resource.mount().await, None);
    assert_eq!(resource.state().status(), FetchStatus::Idle);
}

#[tokio::test]
async fn validation_body_normalizes_to_first_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({"phone": "1"})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"phone": ["too short", "invalid"]})),
        )
        .mount(&server)
        .await;

    let url = format!("{}/api/auth/register", server.uri());
    let resource =
        Resource::new(url, RequestConfig::with_method(Method::POST)).expect("client builds");

    let returned = resource.invoke(Some(json!({"phone": "1"}))).await;

    assert_eq!(returned, None);
    let state = resource.state();
    assert_eq!(state.status(), FetchStatus::Failed);
    assert_eq!(
        state.error().and_then(|detail| detail.field("phone")),
        Some("too short")
    );
}

#[tokio::test]
async fn scalar_error_body_becomes_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/shop"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!("backend offline")))
        .mount(&server)
        .await;

    let url = format!("{}/api/shop", server.uri());
    let resource = Resource::new(url, RequestConfig::get()).expect("client builds");
    resource.mount().await;

    assert_eq!(
        resource.state().error(),
        Some(&ErrorDetail::Message("backend offline".to_string()))
    );
}

#[tokio::test]
async fn not_found_detail_is_recognizable_at_the_call_site() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blog/articles/999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "No Article matches the given query"})),
        )
        .mount(&server)
        .await;

    let url = format!("{}/api/blog/articles/999", server.uri());
    let resource = Resource::new(url, RequestConfig::get()).expect("client builds");
    resource.mount().await;

    assert_eq!(
        resource
            .state()
            .error()
            .and_then(|detail| detail.detail_message()),
        Some("No Article matches the given query")
    );
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blog/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/api/blog/articles", server.uri());
    let resource = Resource::new(url, RequestConfig::get()).expect("client builds");
    let returned = resource.mount().await;

    assert_eq!(returned, None);
    assert_eq!(
        resource.state().error(),
        Some(&ErrorDetail::Message(INVALID_JSON_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn network_failure_is_captured_as_generic_error() {
    init_logging();
    // Nothing is listening on this port.
    let resource = Resource::new(
        "http://127.0.0.1:9/api/blog/articles",
        RequestConfig::get(),
    )
    .expect("client builds");

    let returned = resource.mount().await;

    assert_eq!(returned, None);
    assert_eq!(resource.state().error(), Some(&ErrorDetail::generic()));
}

#[tokio::test]
async fn invalid_url_is_captured_not_thrown() {
    init_logging();
    let resource =
        Resource::new("not a url", RequestConfig::get()).expect("client builds");

    assert_eq!(resource.mount().await, None);
    assert_eq!(resource.state().status(), FetchStatus::Failed);
}

#[tokio::test]
async fn success_after_failure_clears_the_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "bad"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let url = format!("{}/flaky", server.uri());
    let resource = Resource::new(url, RequestConfig::get()).expect("client builds");

    resource.invoke(None).await;
    assert_eq!(resource.state().status(), FetchStatus::Failed);
    assert!(resource.state().error().is_some());

    resource.invoke(None).await;
    let state = resource.state();
    assert_eq!(state.status(), FetchStatus::Success);
    assert_eq!(state.error(), None);
    assert_eq!(state.data(), Some(&json!({"ok": true})));
}

#[tokio::test]
async fn accept_language_follows_configured_language() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blog/articles"))
        .and(header("Accept-Language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let url = format!("{}/api/blog/articles", server.uri());
    let resource = Resource::new(url, RequestConfig::get().language(Language::En))
        .expect("client builds");

    assert_eq!(resource.mount().await, Some(json!([])));
}

/// Transport stub whose first response is slow, letting tests overlap
/// invocations deterministically.
struct StaggeredSender {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl HttpSend for StaggeredSender {
    async fn send(&self, _request: PreparedRequest) -> Result<RawResponse, RequestError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(RawResponse {
                status: 200,
                body: Some(json!({"answer": "slow"})),
            })
        } else {
            Ok(RawResponse {
                status: 200,
                body: Some(json!({"answer": "fast"})),
            })
        }
    }
}

#[tokio::test]
async fn superseded_invocation_does_not_overwrite_fresher_state() {
    init_logging();
    let resource = Arc::new(Resource::with_sender(
        "http://localhost/api/blog/articles",
        RequestConfig::get(),
        Arc::new(StaggeredSender {
            calls: AtomicUsize::new(0),
        }),
    ));

    let slow = {
        let resource = resource.clone();
        tokio::spawn(async move { resource.invoke(None).await })
    };
    // Let the slow invocation register its generation first.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = resource.invoke(None).await;
    let slow = slow.await.expect("task joins");

    assert_eq!(fast, Some(json!({"answer": "fast"})));
    assert_eq!(slow, None);
    assert_eq!(resource.state().data(), Some(&json!({"answer": "fast"})));
}

#[tokio::test]
async fn retarget_fences_in_flight_request_and_refires() {
    init_logging();
    let resource = Arc::new(Resource::with_sender(
        "http://localhost/api/blog/articles?page=1",
        RequestConfig::get(),
        Arc::new(StaggeredSender {
            calls: AtomicUsize::new(0),
        }),
    ));

    let slow = {
        let resource = resource.clone();
        tokio::spawn(async move { resource.invoke(None).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = resource
        .retarget("http://localhost/api/blog/articles?page=2")
        .await;
    let slow = slow.await.expect("task joins");

    assert_eq!(fast, Some(json!({"answer": "fast"})));
    assert_eq!(slow, None);
    assert_eq!(resource.url(), "http://localhost/api/blog/articles?page=2");
    assert_eq!(resource.state().data(), Some(&json!({"answer": "fast"})));
}
