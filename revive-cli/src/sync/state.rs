use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lifecycle of a page's data: `Idle -> Loading -> Ready | Error`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Persistent inline error; the page renders nothing else
    Error(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn begin_loading(&mut self) {
        *self = PageState::Loading;
    }

    /// Settle a load: the whole view or an error, never half of it
    pub fn settle(&mut self, outcome: Result<T, String>) {
        *self = match outcome {
            Ok(data) => PageState::Ready(data),
            Err(message) => PageState::Error(message),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient, auto-dismissing message shown after an action
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub kind: BannerKind,
    pub text: String,
    shown_at: Instant,
    ttl: Duration,
}

impl StatusBanner {
    pub fn new(kind: BannerKind, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

/// Holds at most one banner; a new one replaces the old
#[derive(Debug, Clone)]
pub struct StatusSlot {
    banner: Option<StatusBanner>,
    ttl: Duration,
}

impl StatusSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { banner: None, ttl }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.banner = Some(StatusBanner::new(BannerKind::Success, text, self.ttl));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.banner = Some(StatusBanner::new(BannerKind::Error, text, self.ttl));
    }

    pub fn clear(&mut self) {
        self.banner = None;
    }

    pub fn current(&mut self) -> Option<&StatusBanner> {
        self.current_at(Instant::now())
    }

    /// Visible banner as of `now`; an expired one is dropped
    pub fn current_at(&mut self, now: Instant) -> Option<&StatusBanner> {
        if self.banner.as_ref().is_some_and(|b| b.is_expired_at(now)) {
            self.banner = None;
        }
        self.banner.as_ref()
    }

    /// Last banner regardless of expiry
    pub fn last(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }
}

/// Mounted flag shared between a page and its in-flight continuations.
///
/// Continuations check it before touching page state, so nothing lands on a view that
/// has gone away.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Run `apply` only while still mounted
    pub fn guard<R>(&self, apply: impl FnOnce() -> R) -> Option<R> {
        if self.is_alive() {
            Some(apply())
        } else {
            tracing::debug!("View unmounted, dropping late result");
            None
        }
    }
}
