//! Media query watcher

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};
use super::{ListenerId, MediaQueryList, Viewport};

/// Tracks whether a media query currently matches.
///
/// The change listener is registered on construction and removed on drop.
pub struct MediaQueryWatcher {
    query: String,
    state: Arc<watch::Sender<bool>>,
    subscription: Option<(Arc<dyn MediaQueryList>, ListenerId)>,
}

impl MediaQueryWatcher {
    pub fn new(query: &str, viewport: Option<&dyn Viewport>) -> Self {
        let (state, _) = watch::channel(false);
        let state = Arc::new(state);

        let Some(viewport) = viewport else {
            debug!(query = query, "No viewport available, media query defaults to false");
            return Self { query: query.to_string(), state, subscription: None };
        };

        let list = match viewport.match_media(query) {
            Ok(list) => list,
            Err(e) => {
                warn!(query = query, error = %e, "Media query could not be evaluated, defaulting to false");
                return Self { query: query.to_string(), state, subscription: None };
            }
        };

        state.send_replace(list.matches());

        let listener_state = Arc::clone(&state);
        let id = list.add_listener(Arc::new(move |matches: bool| {
            listener_state.send_if_modified(|current| {
                let changed = *current != matches;
                *current = matches;
                changed
            });
        }));

        Self {
            query: query.to_string(),
            state,
            subscription: Some((list, id)),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> bool {
        *self.state.borrow()
    }

    /// Whether a change listener is registered
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Receive match-state changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

impl Drop for MediaQueryWatcher {
    fn drop(&mut self) {
        if let Some((list, id)) = self.subscription.take() {
            list.remove_listener(id);
            debug!(query = %self.query, "Media query listener removed");
        }
    }
}

/// Watch whether the viewport is narrower than `breakpoint_px`
pub fn is_mobile(viewport: Option<&dyn Viewport>, breakpoint_px: u32) -> MediaQueryWatcher {
    let query = format!("(max-width: {}px)", breakpoint_px.saturating_sub(1));
    MediaQueryWatcher::new(&query, viewport)
}
