use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use summit_client::Backend;
use summit_session::SessionManager;
use summit_types::models::{Registration, SupportTicket, TicketPriority, TicketStatus};

/// Rows fetched per source collection, most recent first.
pub const SOURCE_PAGE_SIZE: usize = 5;

/// Upper bound on the merged feed after sorting.
pub const MAX_FEED_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Registration,
    SupportTicket,
}

/// One entry in the merged feed. Derived from a source row on every poll;
/// the `read` flag is process-local and not written back anywhere.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Source-prefixed so ids stay unique across the two collections.
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub emitted_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    fn from_registration(row: &Registration) -> Self {
        Self {
            id: format!("registration-{}", row.id),
            kind: NotificationKind::Registration,
            title: "New registration".into(),
            message: format!("{} <{}>", row.full_name, row.email),
            emitted_at: row.created_at,
            read: row.reviewed,
        }
    }

    fn from_ticket(row: &SupportTicket) -> Self {
        let title = if row.priority == TicketPriority::Urgent {
            format!("Urgent: {}", row.subject)
        } else {
            row.subject.clone()
        };
        Self {
            id: format!("ticket-{}", row.id),
            kind: NotificationKind::SupportTicket,
            title,
            message: format!("{} <{}>", row.sender_name, row.sender_email),
            emitted_at: row.created_at,
            read: row.status != TicketStatus::Open,
        }
    }
}

/// Merge and order the two sources. Stable sort, so entries with equal
/// timestamps keep concatenation order (registrations first).
fn build_feed(registrations: &[Registration], tickets: &[SupportTicket]) -> Vec<Notification> {
    let mut feed: Vec<Notification> = registrations
        .iter()
        .map(Notification::from_registration)
        .chain(tickets.iter().map(Notification::from_ticket))
        .collect();

    feed.sort_by(|a, b| b.emitted_at.cmp(&a.emitted_at));
    feed.truncate(MAX_FEED_LEN);
    feed
}

#[derive(Default)]
struct FeedState {
    notifications: Vec<Notification>,
    unread: usize,
}

/// The merged feed and its refresh logic. Single writer: only `fetch()` and
/// `mark_all_read()` mutate the snapshot; consumers read copies.
pub struct NotificationFeed {
    backend: Backend,
    session: Arc<SessionManager>,
    state: RwLock<FeedState>,
}

impl NotificationFeed {
    pub fn new(backend: Backend, session: Arc<SessionManager>) -> Self {
        Self {
            backend,
            session,
            state: RwLock::new(FeedState::default()),
        }
    }

    pub(crate) fn has_session(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Refresh the feed from both source collections.
    ///
    /// Without a session token this is a logged no-op. A failed source is
    /// warn-logged and contributes nothing; if both fail the previous
    /// snapshot stays in place rather than flashing an empty inbox. On any
    /// partial or full success the snapshot is replaced wholesale, which
    /// also re-derives read-state from the rows. Never panics and never
    /// escapes an error into the polling loop.
    ///
    /// Concurrent calls are not ordered against each other: the last one to
    /// resolve wins. The data is advisory, so the race is tolerated rather
    /// than guarded.
    pub async fn fetch(&self) {
        let Some(token) = self.session.access_token() else {
            debug!("no active session, skipping notification fetch");
            return;
        };

        let registrations = self
            .backend
            .table("registrations")
            .select("*")
            .order_desc("created_at")
            .limit(SOURCE_PAGE_SIZE)
            .bearer(token.clone())
            .fetch::<Registration>();
        let tickets = self
            .backend
            .table("support_tickets")
            .select("*")
            .order_desc("created_at")
            .limit(SOURCE_PAGE_SIZE)
            .bearer(token)
            .fetch::<SupportTicket>();

        let (registrations, tickets) = tokio::join!(registrations, tickets);

        let registrations = registrations
            .inspect_err(|e| warn!("registration feed fetch failed: {e}"))
            .ok();
        let tickets = tickets
            .inspect_err(|e| warn!("support ticket feed fetch failed: {e}"))
            .ok();

        if registrations.is_none() && tickets.is_none() {
            debug!("both notification sources failed, keeping previous snapshot");
            return;
        }

        let feed = build_feed(
            &registrations.unwrap_or_default(),
            &tickets.unwrap_or_default(),
        );
        let unread = feed.iter().filter(|n| !n.read).count();

        let mut state = self.state.write();
        state.notifications = feed;
        state.unread = unread;
    }

    /// Flip every in-memory notification to read. No network write; the next
    /// successful `fetch()` re-derives read-state from the rows.
    pub fn mark_all_read(&self) {
        let mut state = self.state.write();
        for notification in &mut state.notifications {
            notification.read = true;
        }
        state.unread = 0;
    }

    /// Copy of the current feed, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.state.read().notifications.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.state.read().unread
    }
}
