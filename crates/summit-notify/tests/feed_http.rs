//! Exercises the feed and poller against a local stub of the hosted backend,
//! bound on an ephemeral port.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use summit_client::{Backend, BackendConfig};
use summit_notify::{NotificationFeed, NotificationKind, spawn_poller};
use summit_session::{MemorySessionStore, SessionManager, SessionStore, StoredSession};
use summit_types::api::AuthUser;

async fn spawn_stub(app: Router) -> String {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn logged_in_session(backend: &Backend) -> Arc<SessionManager> {
    let store = MemorySessionStore::new();
    store
        .save(&StoredSession {
            access_token: "t".into(),
            refresh_token: "r".into(),
            expires_at: chrono::Utc::now().timestamp() + 3600,
            user: AuthUser {
                id: "1".into(),
                email: "ops@summit.example".into(),
                user_metadata: serde_json::Map::new(),
            },
        })
        .unwrap();

    let manager = SessionManager::new(backend.clone(), Arc::new(store));
    manager.restore().expect("session restored");
    Arc::new(manager)
}

fn logged_out_session(backend: &Backend) -> Arc<SessionManager> {
    let manager = SessionManager::new(backend.clone(), Arc::new(MemorySessionStore::new()));
    manager.restore();
    Arc::new(manager)
}

fn registration_row(id: &str, created_at: &str, reviewed: bool) -> Value {
    json!({
        "id": id,
        "full_name": "Ada Lovelace",
        "email": "ada@example.com",
        "company": null,
        "ticket_type": "standard",
        "status": "pending",
        "dietary_notes": null,
        "reviewed": reviewed,
        "created_at": created_at
    })
}

fn ticket_row(id: &str, created_at: &str, status: &str, priority: &str) -> Value {
    json!({
        "id": id,
        "subject": "Badge misprint",
        "sender_name": "Grace Hopper",
        "sender_email": "grace@example.com",
        "body": "My badge says Grance.",
        "status": status,
        "priority": priority,
        "created_at": created_at
    })
}

#[tokio::test]
async fn fetch_merges_sources_newest_first_with_unread_count() {
    let app = Router::new()
        .route(
            "/rest/v1/registrations",
            get(|| async {
                Json(vec![registration_row(
                    "7b0d2f1e-63a4-4e7a-9a51-0a6f7f8b4c11",
                    "2025-06-01T09:00:00Z",
                    false,
                )])
            }),
        )
        .route(
            "/rest/v1/support_tickets",
            get(|| async {
                Json(vec![ticket_row(
                    "0d6a3c52-2b1f-4b9f-8f3e-55a7a1c0d222",
                    "2025-06-01T11:00:00Z",
                    "open",
                    "urgent",
                )])
            }),
        );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let feed = NotificationFeed::new(backend.clone(), logged_in_session(&backend));

    feed.fetch().await;

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].kind, NotificationKind::SupportTicket);
    assert_eq!(snapshot[0].title, "Urgent: Badge misprint");
    assert_eq!(snapshot[1].kind, NotificationKind::Registration);
    assert_eq!(feed.unread_count(), 2);
}

#[tokio::test]
async fn fetch_without_session_issues_no_requests() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/rest/v1/registrations",
        get(move || {
            h.fetch_add(1, Ordering::SeqCst);
            async { Json(Vec::<Value>::new()) }
        }),
    );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let feed = NotificationFeed::new(backend.clone(), logged_out_session(&backend));

    feed.fetch().await;

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(feed.snapshot().is_empty());
}

#[tokio::test]
async fn one_failing_source_still_yields_the_other() {
    let app = Router::new()
        .route(
            "/rest/v1/registrations",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/rest/v1/support_tickets",
            get(|| async {
                Json(vec![ticket_row(
                    "0d6a3c52-2b1f-4b9f-8f3e-55a7a1c0d222",
                    "2025-06-01T11:00:00Z",
                    "open",
                    "normal",
                )])
            }),
        );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let feed = NotificationFeed::new(backend.clone(), logged_in_session(&backend));

    feed.fetch().await;

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].kind, NotificationKind::SupportTicket);
    assert_eq!(feed.unread_count(), 1);
}

#[tokio::test]
async fn both_sources_failing_keeps_previous_snapshot() {
    let broken = Arc::new(AtomicUsize::new(0));
    let b1 = broken.clone();
    let b2 = broken.clone();

    let app = Router::new()
        .route(
            "/rest/v1/registrations",
            get(move || {
                let fail = b1.load(Ordering::SeqCst) > 0;
                async move {
                    if fail {
                        Err(StatusCode::SERVICE_UNAVAILABLE)
                    } else {
                        Ok(Json(vec![registration_row(
                            "7b0d2f1e-63a4-4e7a-9a51-0a6f7f8b4c11",
                            "2025-06-01T09:00:00Z",
                            false,
                        )]))
                    }
                }
            }),
        )
        .route(
            "/rest/v1/support_tickets",
            get(move || {
                let fail = b2.load(Ordering::SeqCst) > 0;
                async move {
                    if fail {
                        Err(StatusCode::SERVICE_UNAVAILABLE)
                    } else {
                        Ok(Json(Vec::<Value>::new()))
                    }
                }
            }),
        );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let feed = NotificationFeed::new(backend.clone(), logged_in_session(&backend));

    feed.fetch().await;
    assert_eq!(feed.snapshot().len(), 1);

    // Flip the stub into outage mode; the good snapshot must survive.
    broken.store(1, Ordering::SeqCst);
    feed.fetch().await;

    assert_eq!(feed.snapshot().len(), 1);
    assert_eq!(feed.unread_count(), 1);
}

#[tokio::test]
async fn mark_all_read_is_local_only() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h1 = hits.clone();
    let h2 = hits.clone();

    let app = Router::new()
        .route(
            "/rest/v1/registrations",
            get(move || {
                h1.fetch_add(1, Ordering::SeqCst);
                async {
                    Json(vec![
                        registration_row(
                            "7b0d2f1e-63a4-4e7a-9a51-0a6f7f8b4c11",
                            "2025-06-01T09:00:00Z",
                            false,
                        ),
                        registration_row(
                            "b51a9f6c-90cb-4d35-9e0d-2f1f3a6f2b77",
                            "2025-06-01T10:00:00Z",
                            false,
                        ),
                        registration_row(
                            "d0a1e9b4-4d9c-4e58-9f7f-6f2a8c3b1e90",
                            "2025-06-01T11:00:00Z",
                            true,
                        ),
                    ])
                }
            }),
        )
        .route(
            "/rest/v1/support_tickets",
            get(move || {
                h2.fetch_add(1, Ordering::SeqCst);
                async { Json(Vec::<Value>::new()) }
            }),
        );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let feed = NotificationFeed::new(backend.clone(), logged_in_session(&backend));

    feed.fetch().await;
    assert_eq!(feed.snapshot().len(), 3);
    assert_eq!(feed.unread_count(), 2);
    let hits_after_fetch = hits.load(Ordering::SeqCst);

    feed.mark_all_read();

    assert_eq!(feed.snapshot().len(), 3);
    assert!(feed.snapshot().iter().all(|n| n.read));
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(hits.load(Ordering::SeqCst), hits_after_fetch);
}

#[tokio::test]
async fn poller_fetches_immediately_and_stops_cleanly() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();

    let app = Router::new()
        .route(
            "/rest/v1/registrations",
            get(move || {
                h.fetch_add(1, Ordering::SeqCst);
                async { Json(Vec::<Value>::new()) }
            }),
        )
        .route(
            "/rest/v1/support_tickets",
            get(|| async { Json(Vec::<Value>::new()) }),
        );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let feed = Arc::new(NotificationFeed::new(
        backend.clone(),
        logged_in_session(&backend),
    ));

    let handle = spawn_poller(feed, Duration::from_secs(30));

    // The first interval tick is immediate; give the fetch a moment to land.
    for _ in 0..50 {
        if hits.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    handle.stop().await;

    // No further ticks after teardown.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn poller_exits_once_the_session_goes_away() {
    let app = Router::new()
        .route(
            "/rest/v1/registrations",
            get(|| async { Json(Vec::<Value>::new()) }),
        )
        .route(
            "/rest/v1/support_tickets",
            get(|| async { Json(Vec::<Value>::new()) }),
        );
    let base = spawn_stub(app).await;

    let backend = Backend::new(BackendConfig::new(&base, "anon").unwrap());
    let session = logged_in_session(&backend);
    let feed = Arc::new(NotificationFeed::new(backend.clone(), session.clone()));

    let handle = spawn_poller(feed, Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(50)).await;

    session.logout();

    // The loop notices the missing session on its next tick and exits; stop()
    // then resolves promptly because the task is already gone.
    tokio::time::timeout(Duration::from_secs(1), handle.stop())
        .await
        .expect("poller exited after logout");
}
