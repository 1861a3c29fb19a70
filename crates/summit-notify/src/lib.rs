/// Polled notification feed for the admin back-office.
///
/// The feed merges two remote collections — fresh registrations and support
/// tickets — into one time-ordered list with an unread count. Notifications
/// are synthesized from the source rows on every poll and never persisted;
/// read-state lives in this process only and resets on the next successful
/// poll. A background poller refreshes the feed on a fixed interval while a
/// session exists and can be stopped deterministically.

pub mod feed;
pub mod poller;

pub use feed::{MAX_FEED_LEN, Notification, NotificationFeed, NotificationKind, SOURCE_PAGE_SIZE};
pub use poller::{DEFAULT_POLL_INTERVAL, PollerHandle, spawn_poller};
