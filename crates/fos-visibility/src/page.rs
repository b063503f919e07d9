//! Page Visibility
//!
//! Whether the page as a whole (e.g. the tab) is visible. The signal source
//! is external and optional; without one the page counts as always visible.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback receiving the new `hidden` flag
pub type ChangeCallback = Box<dyn Fn(bool)>;

/// External page-visibility signal
pub trait VisibilitySignal {
    /// Whether the platform actually reports page visibility
    fn is_supported(&self) -> bool;

    /// Whether the page is currently hidden
    fn hidden(&self) -> bool;

    /// Register a callback for visibility transitions
    fn change(&self, callback: ChangeCallback);
}

/// Page visibility as seen by queries
///
/// Availability is decided once, at construction.
pub struct PageVisibilityTracker {
    signal: Option<Box<dyn VisibilitySignal>>,
    available: bool,
}

impl PageVisibilityTracker {
    pub fn new(signal: Option<Box<dyn VisibilitySignal>>) -> Self {
        let available = signal.as_ref().is_some_and(|s| s.is_supported());
        tracing::debug!("Page visibility signal available: {}", available);
        Self { signal, available }
    }

    /// Track an external signal
    pub fn with_signal<S: VisibilitySignal + 'static>(signal: S) -> Self {
        Self::new(Some(Box::new(signal)))
    }

    /// No signal; the page is always visible
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    #[inline]
    pub fn is_signal_available(&self) -> bool {
        self.available
    }

    pub fn is_page_visible(&self) -> bool {
        match &self.signal {
            Some(signal) if self.available => !signal.hidden(),
            _ => true,
        }
    }

    /// Subscribe to visibility transitions; no-op without a signal
    pub fn on_change(&self, callback: impl Fn(bool) + 'static) {
        match &self.signal {
            Some(signal) if self.available => signal.change(Box::new(callback)),
            _ => tracing::trace!("Ignoring page visibility subscription, no signal"),
        }
    }
}

impl Default for PageVisibilityTracker {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl fmt::Debug for PageVisibilityTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageVisibilityTracker")
            .field("available", &self.available)
            .field("visible", &self.is_page_visible())
            .finish()
    }
}

struct SignalState {
    supported: bool,
    hidden: Cell<bool>,
    listeners: RefCell<Vec<Rc<dyn Fn(bool)>>>,
}

/// Page visibility signal driven by the embedder
///
/// Clones share state, so the embedder keeps one handle to push updates
/// while a tracker holds another.
#[derive(Clone)]
pub struct ManualSignal {
    state: Rc<SignalState>,
}

impl ManualSignal {
    /// A supported signal, initially visible
    pub fn new() -> Self {
        Self::with_support(true)
    }

    /// A signal that reports itself as unsupported
    pub fn unsupported() -> Self {
        Self::with_support(false)
    }

    fn with_support(supported: bool) -> Self {
        Self {
            state: Rc::new(SignalState {
                supported,
                hidden: Cell::new(false),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Update the page state, notifying listeners on transitions
    pub fn set_hidden(&self, hidden: bool) {
        if self.state.hidden.replace(hidden) == hidden {
            return;
        }
        tracing::debug!("Page visibility changed, hidden: {}", hidden);

        // Listeners may subscribe from inside a callback
        let listeners = self.state.listeners.borrow().clone();
        for listener in listeners {
            listener(hidden);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl Default for ManualSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilitySignal for ManualSignal {
    fn is_supported(&self) -> bool {
        self.state.supported
    }

    fn hidden(&self) -> bool {
        self.state.hidden.get()
    }

    fn change(&self, callback: ChangeCallback) {
        self.state.listeners.borrow_mut().push(Rc::from(callback));
    }
}

impl fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualSignal")
            .field("supported", &self.state.supported)
            .field("hidden", &self.state.hidden.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal_always_visible() {
        let tracker = PageVisibilityTracker::unavailable();
        assert!(!tracker.is_signal_available());
        assert!(tracker.is_page_visible());

        // Subscribing is a no-op
        tracker.on_change(|_| panic!("never called"));
    }

    #[test]
    fn test_unsupported_signal_ignored() {
        let signal = ManualSignal::unsupported();
        let tracker = PageVisibilityTracker::with_signal(signal.clone());
        signal.set_hidden(true);

        assert!(!tracker.is_signal_available());
        assert!(tracker.is_page_visible());

        tracker.on_change(|_| {});
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_tracks_signal() {
        let signal = ManualSignal::new();
        let tracker = PageVisibilityTracker::with_signal(signal.clone());
        assert!(tracker.is_signal_available());
        assert!(tracker.is_page_visible());

        signal.set_hidden(true);
        assert!(!tracker.is_page_visible());

        signal.set_hidden(false);
        assert!(tracker.is_page_visible());
    }

    #[test]
    fn test_change_notifications() {
        let signal = ManualSignal::new();
        let tracker = PageVisibilityTracker::with_signal(signal.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        tracker.on_change(move |hidden| sink.borrow_mut().push(hidden));

        signal.set_hidden(true);
        signal.set_hidden(true);
        signal.set_hidden(false);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_subscribe_from_callback() {
        let signal = ManualSignal::new();
        let inner = signal.clone();
        signal.change(Box::new(move |_| inner.change(Box::new(|_| {}))));

        signal.set_hidden(true);
        assert_eq!(signal.listener_count(), 2);
    }
}
