//! Handler-level tests for the bookmark API.
//!
//! The router is exercised end to end with in-memory doubles standing in
//! for the repository, the identity provider, and the preview service, so
//! these cover auth, validation, the wire envelope, and pagination echo
//! without any external processes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use linkstash_api::{router, AppState};
use linkstash_core::{
    AuthProvider, AuthUser, CreateLinkRequest, Error, Link, LinkPreview, LinkRepository,
    ListLinksRequest, Page, PreviewFetcher, Result,
};

// =============================================================================
// TEST DOUBLES
// =============================================================================

/// In-memory LinkRepository mirroring the store's query semantics.
#[derive(Default)]
struct InMemoryLinkRepository {
    rows: Mutex<Vec<Link>>,
    /// Monotonic sequence so creation order is unambiguous even within
    /// one timestamp tick.
    seq: AtomicI64,
}

impl InMemoryLinkRepository {
    fn created_at_for(&self, seq: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000 + seq, 0).expect("valid timestamp")
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, user_id: Uuid, req: CreateLinkRequest) -> Result<Link> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let now = self.created_at_for(seq);
        let link = Link {
            id: Uuid::now_v7(),
            user_id,
            url: req.url,
            title: req.title,
            description: req.description,
            image: req.image,
            tags: req.tags,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.rows.lock().unwrap().push(link.clone());
        Ok(link)
    }

    async fn get(&self, user_id: Uuid, link_id: Uuid) -> Result<Option<Link>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == link_id && l.user_id == user_id && l.deleted_at.is_none())
            .cloned())
    }

    async fn list(&self, user_id: Uuid, req: ListLinksRequest) -> Result<Page> {
        let page = req.page.unwrap_or(1).max(1);
        let page_size = req.page_size.unwrap_or(20).clamp(1, 100);

        let mut matches: Vec<Link> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id && l.deleted_at.is_none())
            .filter(|l| match req.search.as_deref().filter(|s| !s.is_empty()) {
                Some(search) => {
                    let needle = search.to_lowercase();
                    l.title.to_lowercase().contains(&needle)
                        || l.description.to_lowercase().contains(&needle)
                        || l.url.to_lowercase().contains(&needle)
                }
                None => true,
            })
            .filter(|l| match req.tag.as_deref().filter(|t| !t.is_empty()) {
                Some(tag) => l.tags.iter().any(|t| t == tag),
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matches.len() as i64;
        let offset = ((page - 1) * page_size) as usize;
        let items = matches
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok(Page {
            items,
            total,
            page,
            page_size,
        })
    }

    async fn soft_delete(&self, user_id: Uuid, link_id: Uuid) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|l| l.id == link_id && l.user_id == user_id && l.deleted_at.is_none())
        {
            Some(link) => {
                link.deleted_at = Some(Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Identity double resolving fixed tokens.
struct StaticAuthProvider {
    users: HashMap<String, AuthUser>,
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn verify_token(&self, token: &str) -> Result<Option<AuthUser>> {
        Ok(self.users.get(token).cloned())
    }
}

/// Preview double: either a canned preview or a canned failure.
struct StubPreviewFetcher {
    failure: Option<(String, String)>,
}

#[async_trait]
impl PreviewFetcher for StubPreviewFetcher {
    async fn fetch_preview(&self, url: &str) -> Result<LinkPreview> {
        if let Some((fail_url, reason)) = &self.failure {
            return Err(Error::preview(fail_url.clone(), reason.clone()));
        }
        Ok(LinkPreview {
            url: url.to_string(),
            title: "Stub Title".to_string(),
            description: "Stub description".to_string(),
            image: None,
            site: "example.com".to_string(),
        })
    }
}

// =============================================================================
// HARNESS
// =============================================================================

const ALICE_TOKEN: &str = "alice-token";
const BOB_TOKEN: &str = "bob-token";

fn user(email: &str) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: email.to_string(),
        aud: "authenticated".to_string(),
        role: "authenticated".to_string(),
    }
}

struct Harness {
    app: Router,
    repo: Arc<InMemoryLinkRepository>,
    alice: AuthUser,
    bob: AuthUser,
}

fn harness() -> Harness {
    harness_with_preview(StubPreviewFetcher { failure: None })
}

fn harness_with_preview(previews: StubPreviewFetcher) -> Harness {
    let repo = Arc::new(InMemoryLinkRepository::default());
    let alice = user("alice@example.com");
    let bob = user("bob@example.com");

    let auth = StaticAuthProvider {
        users: HashMap::from([
            (ALICE_TOKEN.to_string(), alice.clone()),
            (BOB_TOKEN.to_string(), bob.clone()),
        ]),
    };

    let state = AppState::new(repo.clone(), Arc::new(auth), Arc::new(previews));
    Harness {
        app: router(state),
        repo,
        alice,
        bob,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn create_titled(h: &Harness, token: &str, title: &str, tags: &[&str]) -> serde_json::Value {
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links",
            Some(token),
            serde_json::json!({
                "url": format!("https://example.com/{}", title),
                "title": title,
                "description": format!("about {}", title),
                "tags": tags,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

// =============================================================================
// HEALTH & PREVIEW
// =============================================================================

#[tokio::test]
async fn healthz_reports_status_timestamp_uptime() {
    let h = harness();
    let (status, body) = send(&h.app, empty_request("GET", "/api/healthz", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].is_number());
}

#[tokio::test]
async fn preview_returns_metadata_without_auth() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links/preview",
            None,
            serde_json::json!({"url": "https://example.com/article"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Stub Title");
    assert_eq!(body["site"], "example.com");
    assert_eq!(body["url"], "https://example.com/article");
}

#[tokio::test]
async fn preview_rejects_malformed_url() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links/preview",
            None,
            serde_json::json!({"url": "not a url"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "Invalid URL format");
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn preview_failure_maps_to_500_with_url_and_status() {
    let h = harness_with_preview(StubPreviewFetcher {
        failure: Some((
            "https://gone.example.com".to_string(),
            "HTTP 404: Not Found".to_string(),
        )),
    });
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links/preview",
            None,
            serde_json::json!({"url": "https://gone.example.com"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("https://gone.example.com"));
    assert!(message.contains("404"));
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn create_requires_token() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links",
            None,
            serde_json::json!({"url": "https://example.com", "title": "x", "description": "", "tags": []}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "No authorization token provided");
    assert_eq!(body["statusCode"], 401);
}

#[tokio::test]
async fn create_rejects_unknown_token() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links",
            Some("forged-token"),
            serde_json::json!({"url": "https://example.com", "title": "x", "description": "", "tags": []}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn create_persists_and_returns_record() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links",
            Some(ALICE_TOKEN),
            serde_json::json!({
                "url": "https://example.com",
                "title": "Example",
                "description": "",
                "tags": ["a", "b"],
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["user_id"], h.alice.id.to_string());
    assert_eq!(body["tags"], serde_json::json!(["a", "b"]));
    assert!(body["deleted_at"].is_null());
}

#[tokio::test]
async fn create_validates_payload() {
    let h = harness();

    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links",
            Some(ALICE_TOKEN),
            serde_json::json!({"url": "https://example.com", "title": "", "description": "", "tags": []}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title is required");

    let tags: Vec<String> = (0..11).map(|i| format!("t{}", i)).collect();
    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/api/links",
            Some(ALICE_TOKEN),
            serde_json::json!({"url": "https://example.com", "title": "x", "description": "", "tags": tags}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Too many tags");
}

#[tokio::test]
async fn create_envelopes_malformed_json_body() {
    let h = harness();
    let request = Request::builder()
        .method("POST")
        .uri("/api/links")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", ALICE_TOKEN))
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&h.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["statusCode"], 400);
}

// =============================================================================
// LIST
// =============================================================================

#[tokio::test]
async fn list_defaults_and_echoes_pagination() {
    let h = harness();
    create_titled(&h, ALICE_TOKEN, "one", &[]).await;

    let (status, body) = send(&h.app, empty_request("GET", "/api/links", Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 20);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_pages_newest_first() {
    let h = harness();
    create_titled(&h, ALICE_TOKEN, "first", &[]).await;
    create_titled(&h, ALICE_TOKEN, "second", &[]).await;
    create_titled(&h, ALICE_TOKEN, "third", &[]).await;

    let (status, body) = send(
        &h.app,
        empty_request("GET", "/api/links?page=2&pageSize=1", Some(ALICE_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["pageSize"], 1);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "second");
}

#[tokio::test]
async fn list_page_past_end_is_empty_with_total() {
    let h = harness();
    create_titled(&h, ALICE_TOKEN, "only", &[]).await;

    let (status, body) = send(
        &h.app,
        empty_request("GET", "/api/links?page=9&pageSize=20", Some(ALICE_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_rejects_out_of_range_pagination() {
    let h = harness();

    let (status, _) = send(
        &h.app,
        empty_request("GET", "/api/links?page=0", Some(ALICE_TOKEN)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &h.app,
        empty_request("GET", "/api/links?pageSize=101", Some(ALICE_TOKEN)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page size must be between 1 and 100");
}

#[tokio::test]
async fn list_search_is_case_insensitive_across_fields() {
    let h = harness();
    create_titled(&h, ALICE_TOKEN, "Rust Book", &[]).await;
    create_titled(&h, ALICE_TOKEN, "unrelated", &[]).await;

    let (status, body) = send(
        &h.app,
        empty_request("GET", "/api/links?search=rUsT", Some(ALICE_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Rust Book");
}

#[tokio::test]
async fn list_tag_filter_is_exact_and_case_sensitive() {
    let h = harness();
    create_titled(&h, ALICE_TOKEN, "lower", &["reading"]).await;
    create_titled(&h, ALICE_TOKEN, "upper", &["Reading"]).await;

    let (status, body) = send(
        &h.app,
        empty_request("GET", "/api/links?tag=reading", Some(ALICE_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "lower");
}

#[tokio::test]
async fn list_is_scoped_to_the_token_owner() {
    let h = harness();
    create_titled(&h, ALICE_TOKEN, "alices", &[]).await;
    create_titled(&h, BOB_TOKEN, "bobs", &[]).await;

    let (_, body) = send(&h.app, empty_request("GET", "/api/links", Some(BOB_TOKEN))).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "bobs");
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn delete_hides_link_and_is_idempotent() {
    let h = harness();
    let created = create_titled(&h, ALICE_TOKEN, "doomed", &[]).await;
    let id = created["id"].as_str().unwrap().to_string();

    let uri = format!("/api/links/{}", id);
    let (status, _) = send(&h.app, empty_request("DELETE", &uri, Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&h.app, empty_request("GET", "/api/links", Some(ALICE_TOKEN))).await;
    assert_eq!(body["total"], 0);

    // Second delete is a no-op, still 204.
    let (status, _) = send(&h.app, empty_request("DELETE", &uri, Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_requires_token() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        empty_request("DELETE", &format!("/api/links/{}", Uuid::new_v4()), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);
}

#[tokio::test]
async fn delete_cannot_touch_another_users_link() {
    let h = harness();
    let created = create_titled(&h, ALICE_TOKEN, "private", &[]).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Bob "deletes" Alice's bookmark with its real id: silent no-op.
    let (status, _) = send(
        &h.app,
        empty_request("DELETE", &format!("/api/links/{}", id), Some(BOB_TOKEN)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&h.app, empty_request("GET", "/api/links", Some(ALICE_TOKEN))).await;
    assert_eq!(body["total"], 1);

    let link_id = Uuid::parse_str(&id).unwrap();
    assert!(h.repo.get(h.alice.id, link_id).await.unwrap().is_some());
    assert!(h.repo.get(h.bob.id, link_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_envelopes_non_uuid_id() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        empty_request("DELETE", "/api/links/not-a-uuid", Some(ALICE_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["statusCode"], 400);
}
