//! API client tests against a loopback stub: header derivation, CRUD wire
//! shapes, and the single retry-after-refresh policy.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use base64::Engine as _;
use pretty_assertions::assert_eq;

use quill_api::{ApiClient, ApiError};
use quill_auth::{AuthError, MemoryStore, SessionManager};
use quill_core::entities::{CreatePost, UpdatePost};

struct ReceivedRequest {
    method: String,
    url: String,
    body: String,
    headers: Vec<(String, String)>,
}

impl ReceivedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

fn spawn_stub<F>(responder: F) -> (String, Arc<Mutex<Vec<ReceivedRequest>>>)
where
    F: Fn(&ReceivedRequest) -> (u16, String) + Send + 'static,
{
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind stub server");
    let port = server
        .server_addr()
        .to_ip()
        .expect("loopback addr")
        .port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let received = ReceivedRequest {
                method: request.method().to_string().to_ascii_uppercase(),
                url: request.url().to_string(),
                body,
                headers: request
                    .headers()
                    .iter()
                    .map(|h| (h.field.to_string().to_ascii_lowercase(), h.value.to_string()))
                    .collect(),
            };
            let (status, payload) = responder(&received);
            log.lock().expect("request log lock").push(received);

            let response = tiny_http::Response::from_string(payload)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json")
                        .expect("static header"),
                );
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{port}"), requests)
}

fn encode_segment(json: &str) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json)
}

fn make_token(payload: &str) -> String {
    let header = encode_segment(r#"{"alg":"HS256"}"#);
    let signature = encode_segment("fake_sig");
    format!("{header}.{}.{signature}", encode_segment(payload))
}

fn post_json(uuid: &str) -> String {
    serde_json::json!({
        "id": 1,
        "uuid": uuid,
        "title": "Echo",
        "content": "Echo is nice!",
        "userID": 5,
        "user": {"id": 5, "name": "John Doe", "email": "john@example.com"},
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2023-01-01T00:00:00Z"
    })
    .to_string()
}

/// Session + client pair sharing a base URL and a pre-populated store.
fn client_with_tokens(base_url: &str, access: &str, refresh: &str) -> (ApiClient, Arc<SessionManager>) {
    let store = Arc::new(MemoryStore::with_tokens(access, refresh));
    let session = Arc::new(SessionManager::new(
        reqwest::Client::new(),
        base_url,
        store,
    ));
    let client = ApiClient::new(reqwest::Client::new(), base_url, Arc::clone(&session));
    (client, session)
}

#[tokio::test]
async fn login_then_list_carries_auth_and_domain_headers() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let login_body =
        serde_json::json!({"accessToken": access, "refreshToken": "r1", "exp": 4_102_444_800_i64})
            .to_string();
    let (base_url, requests) = spawn_stub(move |req| match req.url.as_str() {
        "/login" => (200, login_body.clone()),
        "/api/post" => (200, String::from("[]")),
        _ => (404, String::from("{}")),
    });

    let store = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionManager::new(
        reqwest::Client::new(),
        base_url.clone(),
        store,
    ));
    session.login("a@b.com", "x").await.expect("login");

    let client = ApiClient::new(reqwest::Client::new(), base_url, Arc::clone(&session));
    let posts = client.list_posts().await.expect("list");
    assert!(posts.is_empty());

    let log = requests.lock().expect("log");
    let api_request = log.iter().find(|r| r.url == "/api/post").expect("api call");
    assert_eq!(api_request.method, "GET");
    assert_eq!(api_request.header("domain"), Some("d1"));
    assert_eq!(
        api_request.header("authorization"),
        Some(format!("Bearer {access}").as_str())
    );
    assert_eq!(api_request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn retries_once_with_refreshed_token_after_401() {
    let old_access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let new_access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}],"exp":4102444800}"#);
    let refresh_body = serde_json::json!({
        "accessToken": new_access,
        "refreshToken": "r2",
        "exp": 4_102_444_800_i64
    })
    .to_string();

    let api_hits = Arc::new(Mutex::new(0usize));
    let hits = Arc::clone(&api_hits);
    let (base_url, requests) = spawn_stub(move |req| match req.url.as_str() {
        "/api/post" => {
            let mut count = hits.lock().expect("hit counter");
            *count += 1;
            if *count == 1 {
                (401, String::from("{}"))
            } else {
                (200, format!("[{}]", post_json("p1")))
            }
        }
        "/refresh" => (200, refresh_body.clone()),
        _ => (404, String::from("{}")),
    });

    let (client, session) = client_with_tokens(&base_url, &old_access, "r1");
    let posts = client.list_posts().await.expect("list after retry");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].uuid, "p1");

    assert_eq!(session.access_token().as_deref(), Some(new_access.as_str()));

    let log = requests.lock().expect("log");
    let api_requests: Vec<&ReceivedRequest> =
        log.iter().filter(|r| r.url == "/api/post").collect();
    assert_eq!(api_requests.len(), 2, "exactly one retry");
    assert_eq!(
        api_requests[1].header("authorization"),
        Some(format!("Bearer {new_access}").as_str())
    );
    assert_eq!(log.iter().filter(|r| r.url == "/refresh").count(), 1);
}

#[tokio::test]
async fn second_401_is_terminal_without_third_attempt() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let refresh_body = serde_json::json!({
        "accessToken": access.clone(),
        "refreshToken": "r2",
        "exp": 4_102_444_800_i64
    })
    .to_string();

    let (base_url, requests) = spawn_stub(move |req| match req.url.as_str() {
        "/api/post" => (401, String::from("{}")),
        "/refresh" => (200, refresh_body.clone()),
        _ => (404, String::from("{}")),
    });

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    let error = client.list_posts().await.expect_err("terminal 401");
    assert!(matches!(error, ApiError::Status(401)));

    let log = requests.lock().expect("log");
    assert_eq!(log.iter().filter(|r| r.url == "/api/post").count(), 2);
    assert_eq!(log.iter().filter(|r| r.url == "/refresh").count(), 1);
}

#[tokio::test]
async fn refresh_failure_is_terminal_and_logs_out() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let (base_url, requests) = spawn_stub(|req| match req.url.as_str() {
        "/api/post" => (401, String::from("{}")),
        "/refresh" => (500, String::from("{}")),
        "/logout" => (200, String::from("{}")),
        _ => (404, String::from("{}")),
    });

    let (client, session) = client_with_tokens(&base_url, &access, "r1");
    let error = client.list_posts().await.expect_err("refresh fails");
    assert!(matches!(error, ApiError::Auth(AuthError::BadStatus(500))));

    // Refresh failure logged the session out as a side effect.
    assert!(session.access_token().is_none());

    let log = requests.lock().expect("log");
    assert_eq!(
        log.iter().filter(|r| r.url == "/api/post").count(),
        1,
        "no retry when refresh fails"
    );
}

#[tokio::test]
async fn non_401_failures_are_not_retried() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let (base_url, requests) = spawn_stub(|_| (500, String::from("{}")));

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    let error = client.list_posts().await.expect_err("server error");
    assert!(matches!(error, ApiError::Status(500)));

    assert_eq!(requests.lock().expect("log").len(), 1);
}

#[tokio::test]
async fn create_post_sends_json_payload() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let (base_url, requests) = spawn_stub(|req| match (req.method.as_str(), req.url.as_str()) {
        ("POST", "/api/post") => (200, post_json("p-new")),
        _ => (404, String::from("{}")),
    });

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    let post = client
        .create_post(&CreatePost {
            title: "Echo".into(),
            content: "Echo is nice!".into(),
        })
        .await
        .expect("create");
    assert_eq!(post.uuid, "p-new");

    let log = requests.lock().expect("log");
    let body: serde_json::Value = serde_json::from_str(&log[0].body).expect("json body");
    assert_eq!(body["title"], "Echo");
    assert_eq!(body["content"], "Echo is nice!");
}

#[tokio::test]
async fn update_post_puts_to_resource_path() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let (base_url, requests) = spawn_stub(|req| match (req.method.as_str(), req.url.as_str()) {
        ("PUT", "/api/post/p7") => (200, post_json("p7")),
        _ => (404, String::from("{}")),
    });

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    let post = client
        .update_post(
            "p7",
            &UpdatePost {
                title: "New".into(),
                content: "Body".into(),
            },
        )
        .await
        .expect("update");
    assert_eq!(post.uuid, "p7");

    let log = requests.lock().expect("log");
    assert_eq!(log[0].method, "PUT");
    assert_eq!(log[0].url, "/api/post/p7");
}

#[tokio::test]
async fn delete_post_discards_response_body() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let (base_url, requests) = spawn_stub(|req| match (req.method.as_str(), req.url.as_str()) {
        ("DELETE", "/api/post/p9") => (200, String::from(r#"{"message":"deleted"}"#)),
        _ => (404, String::from("{}")),
    });

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    client.delete_post("p9").await.expect("delete");

    let log = requests.lock().expect("log");
    assert_eq!(log[0].method, "DELETE");
}

#[tokio::test]
async fn get_post_decodes_resource_json() {
    let access = make_token(r#"{"userid":5,"domains":[{"UUID":"d1","Name":"Main"}]}"#);
    let (base_url, _requests) = spawn_stub(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/post/p3") => (200, post_json("p3")),
        _ => (404, String::from("{}")),
    });

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    let post = client.get_post("p3").await.expect("get");
    assert_eq!(post.uuid, "p3");
    assert_eq!(post.user.map(|u| u.name), Some(String::from("John Doe")));
}

#[tokio::test]
async fn missing_domains_omit_tenant_header() {
    let access = make_token(r#"{"userid":5,"domains":[]}"#);
    let (base_url, requests) = spawn_stub(|_| (200, String::from("[]")));

    let (client, _session) = client_with_tokens(&base_url, &access, "r1");
    client.list_posts().await.expect("list");

    let log = requests.lock().expect("log");
    assert_eq!(log[0].header("domain"), None);
    assert!(log[0].header("authorization").is_some());
}
