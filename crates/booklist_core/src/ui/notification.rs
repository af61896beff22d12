//! Transient user notifications with explicit identity.
//!
//! # Responsibility
//! - Hold the single active notification and its expiry deadline.
//! - Let hosts expire or dismiss notifications without touching newer ones.
//!
//! # Invariants
//! - Showing a notification replaces the active one and voids its deadline.
//! - `dismiss(id)` only ever removes the notification carrying `id`.
//! - Expiry is evaluated against the injected [`Clock`], never wall time.

use log::debug;
use std::cell::Cell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default time a notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub const MSG_FILL_BOTH_FIELDS: &str = "Please fill in both the fields.";
pub const MSG_BOOK_ADDED: &str = "Book added successfully.";
pub const MSG_BOOK_REMOVED: &str = "Book removed successfully.";

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Danger,
}

impl NotificationKind {
    /// Stable label used by hosts for styling (`alert-success`, `alert-danger`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// Identity of one shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock. Clones share the same elapsed time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

#[derive(Debug)]
struct ActiveNotification {
    notification: Notification,
    expires_at: Instant,
}

/// Owner of the active notification.
#[derive(Debug)]
pub struct NotificationCenter<C: Clock = SystemClock> {
    clock: C,
    ttl: Duration,
    active: Option<ActiveNotification>,
}

impl NotificationCenter<SystemClock> {
    /// Wall-clock center with the default TTL.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, DEFAULT_NOTIFICATION_TTL)
    }
}

impl Default for NotificationCenter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NotificationCenter<C> {
    pub fn with_clock(clock: C, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            active: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shows `message`, replacing any active notification.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(Uuid::new_v4());
        let expires_at = self.clock.now() + self.ttl;
        let replaced = self.active.replace(ActiveNotification {
            notification: Notification {
                id,
                kind,
                message: message.into(),
            },
            expires_at,
        });
        if let Some(previous) = replaced {
            debug!(
                "event=notification_replace module=ui status=ok replaced={} id={id}",
                previous.notification.id
            );
        }
        id
    }

    pub fn active(&self) -> Option<&Notification> {
        self.active.as_ref().map(|active| &active.notification)
    }

    /// Time left before the active notification expires.
    pub fn remaining(&self) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|active| active.expires_at.saturating_duration_since(self.clock.now()))
    }

    /// Removes the active notification if its deadline has passed.
    pub fn expire_due(&mut self) -> Option<Notification> {
        let now = self.clock.now();
        let due = self
            .active
            .as_ref()
            .is_some_and(|active| now >= active.expires_at);
        if !due {
            return None;
        }
        self.active.take().map(|active| active.notification)
    }

    /// Removes the notification `id` if it is still the active one.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let matches = self
            .active
            .as_ref()
            .is_some_and(|active| active.notification.id == id);
        if matches {
            self.active = None;
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::{ManualClock, NotificationCenter, NotificationKind};
    use std::time::Duration;

    fn center() -> (ManualClock, NotificationCenter<ManualClock>) {
        let clock = ManualClock::new();
        let center = NotificationCenter::with_clock(clock.clone(), Duration::from_secs(3));
        (clock, center)
    }

    #[test]
    fn notification_expires_after_ttl() {
        let (clock, mut center) = center();
        let id = center.show("saved", NotificationKind::Success);

        clock.advance(Duration::from_millis(2_999));
        assert!(center.expire_due().is_none());
        assert_eq!(center.remaining(), Some(Duration::from_millis(1)));

        clock.advance(Duration::from_millis(1));
        let expired = center.expire_due().expect("notification should expire");
        assert_eq!(expired.id, id);
        assert!(center.active().is_none());
    }

    #[test]
    fn new_notification_replaces_and_restarts_deadline() {
        let (clock, mut center) = center();
        center.show("first", NotificationKind::Danger);
        clock.advance(Duration::from_secs(2));
        let second = center.show("second", NotificationKind::Success);

        clock.advance(Duration::from_secs(2));
        assert!(center.expire_due().is_none());
        assert_eq!(center.active().map(|n| n.id), Some(second));
    }

    #[test]
    fn stale_dismissal_keeps_newer_notification() {
        let (_clock, mut center) = center();
        let first = center.show("first", NotificationKind::Danger);
        let second = center.show("second", NotificationKind::Success);

        assert!(!center.dismiss(first));
        assert_eq!(center.active().map(|n| n.message.as_str()), Some("second"));
        assert!(center.dismiss(second));
        assert!(center.active().is_none());
    }

    #[test]
    fn kind_labels_match_alert_classes() {
        assert_eq!(NotificationKind::Success.as_str(), "success");
        assert_eq!(NotificationKind::Danger.as_str(), "danger");
    }
}
