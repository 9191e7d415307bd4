use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::config::DEFAULT_INVALID_TOKEN_CODES;
use crate::http::Method;
use crate::store::MemoryTokenStore;

// =============================================================================
// Fixtures
// =============================================================================

enum Reply {
    Respond(ApiResponse),
    Fail(SessionError),
    After(Duration, ApiResponse),
    Hang,
}

/// Transport answering from per-path reply queues and recording every request.
#[derive(Default)]
struct ScriptedTransport {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn reply(&self, path: &str, reply: Reply) {
        self.replies.borrow_mut().entry(path.to_owned()).or_default().push_back(reply);
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    fn count(&self, path: &str) -> usize {
        self.sent.borrow().iter().filter(|r| r.path == path).count()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, SessionError> {
        self.sent.borrow_mut().push(request.clone());
        let reply = self.replies.borrow_mut().get_mut(&request.path).and_then(VecDeque::pop_front);
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::After(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(SessionError::Transport(format!("no scripted reply for {}", request.path))),
        }
    }
}

struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

const VALIDATE: &str = "/auth/validate-token";
const REFRESH: &str = "/auth/refresh";

fn client(transport: &Rc<ScriptedTransport>, store: &MemoryTokenStore) -> SessionClient {
    client_with(SessionConfig::default(), transport, store)
}

fn client_with(config: SessionConfig, transport: &Rc<ScriptedTransport>, store: &MemoryTokenStore) -> SessionClient {
    SessionClient::new(config, transport.clone(), Rc::new(store.clone()), Rc::new(TokioTimer))
}

fn rejected(status: u16, code: &str) -> Reply {
    Reply::Respond(ApiResponse::new(status).with_body(format!(r#"{{"code":"{code}","message":"rejected"}}"#)))
}

fn ok() -> Reply {
    Reply::Respond(ApiResponse::new(200).with_body("{}"))
}

fn refreshed(token: &str) -> Reply {
    Reply::Respond(ApiResponse::new(200).with_header("authorization", token))
}

// =============================================================================
// ensure_session
// =============================================================================

#[tokio::test]
async fn no_token_resolves_unauthenticated_without_network() {
    let transport = Rc::new(ScriptedTransport::default());
    let store = MemoryTokenStore::default();

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn blank_token_counts_as_absent() {
    let transport = Rc::new(ScriptedTransport::default());
    let store = MemoryTokenStore::with_token("   ");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn valid_token_resolves_authenticated_and_keeps_token() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, ok());
    let store = MemoryTokenStore::with_token("good-token");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Authenticated);
    assert_eq!(store.load().as_deref(), Some("good-token"));
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].header("authorization"), Some("good-token"));
}

#[tokio::test]
async fn each_recognized_code_triggers_exactly_one_refresh() {
    for code in DEFAULT_INVALID_TOKEN_CODES {
        let transport = Rc::new(ScriptedTransport::default());
        transport.reply(VALIDATE, rejected(401, code));
        transport.reply(REFRESH, refreshed("fresh"));
        let store = MemoryTokenStore::with_token("stale");

        let status = client(&transport, &store).ensure_session().await;

        assert_eq!(status, SessionStatus::Authenticated, "code {code}");
        assert_eq!(transport.count(REFRESH), 1, "code {code}");
        assert_eq!(transport.count(VALIDATE), 1, "code {code}");
    }
}

#[tokio::test]
async fn expired_token_is_replaced_by_refreshed_token() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-002"));
    transport.reply(REFRESH, refreshed("new-token-xyz"));
    let store = MemoryTokenStore::with_token("expired-abc");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Authenticated);
    assert_eq!(store.load().as_deref(), Some("new-token-xyz"));
    let refresh = transport.sent().into_iter().find(|r| r.path == REFRESH).expect("refresh sent");
    assert_eq!(refresh.method, Method::Post);
    assert!(refresh.credentials);
}

#[tokio::test]
async fn refreshed_token_is_used_by_the_next_request() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-002"));
    transport.reply(REFRESH, refreshed("new-token-xyz"));
    transport.reply("/meetings", ok());
    let store = MemoryTokenStore::with_token("expired-abc");
    let session = client(&transport, &store);

    session.ensure_session().await;
    session.send(ApiRequest::get("/meetings")).await.expect("meetings");

    let meetings = transport.sent().into_iter().find(|r| r.path == "/meetings").expect("meetings sent");
    assert_eq!(meetings.header("authorization"), Some("new-token-xyz"));
}

#[tokio::test]
async fn refresh_failure_clears_token_and_next_check_is_offline() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-001"));
    transport.reply(REFRESH, rejected(401, "AUTH-004"));
    let store = MemoryTokenStore::with_token("stale");
    let session = client(&transport, &store);

    assert_eq!(session.ensure_session().await, SessionStatus::Unauthenticated);
    assert_eq!(store.load(), None);
    let calls = transport.sent().len();

    assert_eq!(session.ensure_session().await, SessionStatus::Unauthenticated);
    assert_eq!(transport.sent().len(), calls);
}

#[tokio::test]
async fn refresh_without_token_header_clears_token() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-003"));
    transport.reply(REFRESH, ok());
    let store = MemoryTokenStore::with_token("stale");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn refresh_network_error_clears_token() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-003"));
    transport.reply(REFRESH, Reply::Fail(SessionError::Transport("offline".to_owned())));
    let store = MemoryTokenStore::with_token("stale");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn unrecognized_code_fails_closed_without_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "USER-404"));
    let store = MemoryTokenStore::with_token("token");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(transport.count(REFRESH), 0);
    assert_eq!(store.load().as_deref(), Some("token"));
}

#[tokio::test]
async fn missing_code_fails_closed_without_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, Reply::Respond(ApiResponse::new(502).with_body("Bad Gateway")));
    let store = MemoryTokenStore::with_token("token");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(transport.count(REFRESH), 0);
}

#[tokio::test]
async fn network_error_fails_closed_without_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, Reply::Fail(SessionError::Transport("connection refused".to_owned())));
    let store = MemoryTokenStore::with_token("token");

    let status = client(&transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(transport.count(REFRESH), 0);
}

#[tokio::test(start_paused = true)]
async fn validation_past_deadline_fails_closed_without_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, Reply::Hang);
    let store = MemoryTokenStore::with_token("token");
    let config = SessionConfig { request_timeout_ms: Some(1_000), ..SessionConfig::default() };

    let status = client_with(config, &transport, &store).ensure_session().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(transport.count(REFRESH), 0);
}

#[tokio::test]
async fn custom_invalid_codes_replace_the_defaults() {
    let config = SessionConfig {
        invalid_token_codes: vec!["T1".to_owned(), "T2".to_owned(), "T3".to_owned(), "T4".to_owned()],
        ..SessionConfig::default()
    };

    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "T2"));
    transport.reply(REFRESH, refreshed("fresh"));
    let store = MemoryTokenStore::with_token("stale");
    let status = client_with(config.clone(), &transport, &store).ensure_session().await;
    assert_eq!(status, SessionStatus::Authenticated);

    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-002"));
    let store = MemoryTokenStore::with_token("stale");
    let status = client_with(config, &transport, &store).ensure_session().await;
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(transport.count(REFRESH), 0);
}

#[tokio::test(start_paused = true)]
async fn concurrent_guards_share_one_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(VALIDATE, rejected(401, "AUTH-002"));
    transport.reply(VALIDATE, rejected(401, "AUTH-002"));
    transport.reply(REFRESH, Reply::After(Duration::from_millis(50), ApiResponse::new(200).with_header("authorization", "shared")));
    let store = MemoryTokenStore::with_token("stale");
    let first = client(&transport, &store);
    let second = first.clone();

    let (a, b) = tokio::join!(first.ensure_session(), second.ensure_session());

    assert_eq!(a, SessionStatus::Authenticated);
    assert_eq!(b, SessionStatus::Authenticated);
    assert_eq!(transport.count(REFRESH), 1);
    assert_eq!(store.load().as_deref(), Some("shared"));
}

#[tokio::test]
async fn sequential_refreshes_are_not_coalesced() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(REFRESH, refreshed("one"));
    transport.reply(REFRESH, refreshed("two"));
    let store = MemoryTokenStore::default();
    let session = client(&transport, &store);

    assert_eq!(session.refresh().await.as_deref(), Ok("one"));
    assert_eq!(session.refresh().await.as_deref(), Ok("two"));
    assert_eq!(transport.count(REFRESH), 2);
}

// =============================================================================
// send (interceptor)
// =============================================================================

#[tokio::test]
async fn send_attaches_stored_token() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings", ok());
    let store = MemoryTokenStore::with_token("tok");

    client(&transport, &store).send(ApiRequest::get("/meetings")).await.expect("ok");

    assert_eq!(transport.sent()[0].header("authorization"), Some("tok"));
}

#[tokio::test]
async fn send_without_token_omits_header() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings", ok());
    let store = MemoryTokenStore::default();

    client(&transport, &store).send(ApiRequest::get("/meetings")).await.expect("ok");

    assert_eq!(transport.sent()[0].header("authorization"), None);
}

#[tokio::test]
async fn send_replays_once_with_refreshed_token() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings/7/participants", rejected(401, "AUTH-002"));
    transport.reply(REFRESH, refreshed("fresh"));
    transport.reply("/meetings/7/participants", ok());
    let store = MemoryTokenStore::with_token("stale");

    let response = client(&transport, &store)
        .send(ApiRequest::post("/meetings/7/participants"))
        .await
        .expect("replayed");

    assert_eq!(response.status, 200);
    let attempts: Vec<_> = transport.sent().into_iter().filter(|r| r.path == "/meetings/7/participants").collect();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].header("authorization"), Some("stale"));
    assert_eq!(attempts[1].header("authorization"), Some("fresh"));
    assert!(!attempts[0].retried);
    assert!(attempts[1].retried);
}

#[tokio::test]
async fn send_retries_on_400_too() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/reviews", rejected(400, "AUTH-001"));
    transport.reply(REFRESH, refreshed("fresh"));
    transport.reply("/reviews", ok());
    let store = MemoryTokenStore::with_token("stale");

    client(&transport, &store).send(ApiRequest::get("/reviews")).await.expect("replayed");

    assert_eq!(transport.count("/reviews"), 2);
    assert_eq!(transport.count(REFRESH), 1);
}

#[tokio::test]
async fn second_401_after_replay_is_final() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/users/1", rejected(401, "AUTH-002"));
    transport.reply(REFRESH, refreshed("fresh"));
    transport.reply("/users/1", rejected(401, "AUTH-002"));
    let store = MemoryTokenStore::with_token("stale");

    let err = client(&transport, &store).send(ApiRequest::get("/users/1")).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(transport.count("/users/1"), 2);
    assert_eq!(transport.count(REFRESH), 1);
}

#[tokio::test]
async fn already_retried_request_is_not_retried() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings", rejected(401, "AUTH-002"));
    let store = MemoryTokenStore::with_token("tok");
    let mut request = ApiRequest::get("/meetings");
    request.retried = true;

    let err = client(&transport, &store).send(request).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(transport.count(REFRESH), 0);
}

#[tokio::test]
async fn non_refreshable_status_surfaces_without_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings/9", rejected(404, "MEETING-404"));
    let store = MemoryTokenStore::with_token("tok");

    let err = client(&transport, &store).send(ApiRequest::get("/meetings/9")).await.unwrap_err();

    assert_eq!(err.code(), Some("MEETING-404"));
    assert_eq!(transport.count(REFRESH), 0);
    assert_eq!(store.load().as_deref(), Some("tok"));
}

#[tokio::test]
async fn refresh_failure_in_send_clears_token_and_runs_expiry_hook() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings", rejected(401, "AUTH-002"));
    transport.reply(REFRESH, rejected(401, "AUTH-004"));
    let store = MemoryTokenStore::with_token("stale");
    let expired = Rc::new(Cell::new(0));
    let hook_count = expired.clone();
    let session = client(&transport, &store).with_expiry_hook(move || hook_count.set(hook_count.get() + 1));

    let err = session.send(ApiRequest::get("/meetings")).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.code(), Some("AUTH-002"));
    assert_eq!(store.load(), None);
    assert_eq!(expired.get(), 1);
    assert_eq!(transport.count("/meetings"), 1);
}

#[tokio::test]
async fn send_json_decodes_body() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Meeting {
        id: u32,
        title: String,
    }
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/meetings/3", Reply::Respond(ApiResponse::new(200).with_body(r#"{"id":3,"title":"Hike"}"#)));
    let store = MemoryTokenStore::with_token("tok");

    let meeting: Meeting = client(&transport, &store).send_json(ApiRequest::get("/meetings/3")).await.expect("meeting");

    assert_eq!(meeting, Meeting { id: 3, title: "Hike".to_owned() });
}

#[tokio::test]
async fn send_anonymous_skips_token_and_refresh() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/users", rejected(400, "USER-EMAIL-TAKEN"));
    let store = MemoryTokenStore::with_token("tok");
    let expired = Rc::new(Cell::new(false));
    let flag = expired.clone();
    let session = client(&transport, &store).with_expiry_hook(move || flag.set(true));

    let err = session.send_anonymous(ApiRequest::post("/users")).await.unwrap_err();

    assert_eq!(err.code(), Some("USER-EMAIL-TAKEN"));
    assert_eq!(transport.sent()[0].header("authorization"), None);
    assert_eq!(transport.count(REFRESH), 0);
    assert!(!expired.get());
    assert_eq!(store.load().as_deref(), Some("tok"));
}

// =============================================================================
// login / logout
// =============================================================================

#[tokio::test]
async fn login_stores_token_from_header() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply(
        "/login",
        Reply::Respond(ApiResponse::new(200).with_header("Authorization", "issued").with_body(r#"{"id":"u1"}"#)),
    );
    let store = MemoryTokenStore::default();

    let response = client(&transport, &store)
        .login(&serde_json::json!({ "email": "a@b.c", "password": "pw" }))
        .await
        .expect("login");

    assert_eq!(store.load().as_deref(), Some("issued"));
    assert_eq!(response.json::<serde_json::Value>().expect("body")["id"], "u1");
    let sent = &transport.sent()[0];
    assert!(sent.credentials);
    assert_eq!(sent.body, Some(serde_json::json!({ "email": "a@b.c", "password": "pw" })));
}

#[tokio::test]
async fn rejected_login_is_not_refreshed() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/login", rejected(401, "LOGIN-001"));
    let store = MemoryTokenStore::default();

    let err = client(&transport, &store).login(&serde_json::json!({})).await.unwrap_err();

    assert_eq!(err.code(), Some("LOGIN-001"));
    assert_eq!(transport.count(REFRESH), 0);
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn login_without_token_header_is_an_error() {
    let transport = Rc::new(ScriptedTransport::default());
    transport.reply("/login", ok());
    let store = MemoryTokenStore::default();

    let err = client(&transport, &store).login(&serde_json::json!({})).await.unwrap_err();

    assert_eq!(err, SessionError::MissingToken);
}

#[tokio::test]
async fn logout_clears_token() {
    let transport = Rc::new(ScriptedTransport::default());
    let store = MemoryTokenStore::with_token("tok");
    let session = client(&transport, &store);

    session.logout();

    assert_eq!(session.access_token(), None);
    assert_eq!(session.ensure_session().await, SessionStatus::Unauthenticated);
    assert!(transport.sent().is_empty());
}
