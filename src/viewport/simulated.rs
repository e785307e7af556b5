//! Width-driven viewport
//!
//! Evaluates `(min-width: Npx)` and `(max-width: Npx)` conditions, optionally
//! joined with `and`, against a viewport width set by the caller. Used for
//! headless diagnostics and tests.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use regex::Regex;
use crate::utils::errors::{CommunityHubError, Result};
use super::{ChangeListener, ListenerId, MediaQueryList, Viewport};

fn feature_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\(\s*(min|max)-width\s*:\s*(\d+)px\s*\)$").expect("width feature pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidthBound {
    Min(u32),
    Max(u32),
}

/// A conjunction of width bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCondition {
    bounds: Vec<WidthBound>,
}

impl MediaCondition {
    pub fn parse(query: &str) -> Result<Self> {
        let unsupported = || CommunityHubError::InvalidInput(format!("Unsupported media query: {}", query));

        let bounds = query
            .split(" and ")
            .map(|feature| -> Result<WidthBound> {
                let captures = feature_pattern().captures(feature.trim()).ok_or_else(unsupported)?;
                let px = captures[2].parse::<u32>().map_err(|_| unsupported())?;
                Ok(match &captures[1] {
                    "min" => WidthBound::Min(px),
                    _ => WidthBound::Max(px),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bounds })
    }

    pub fn matches(&self, width: u32) -> bool {
        self.bounds.iter().all(|bound| match *bound {
            WidthBound::Min(px) => width >= px,
            WidthBound::Max(px) => width <= px,
        })
    }
}

struct SimulatedQueryList {
    condition: MediaCondition,
    width: Arc<AtomicU32>,
    last: AtomicBool,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, ChangeListener)>>,
}

impl SimulatedQueryList {
    fn notify(&self) {
        let matches = self.condition.matches(self.width.load(Ordering::SeqCst));
        if self.last.swap(matches, Ordering::SeqCst) == matches {
            return;
        }

        // Invoke outside the lock so listeners may deregister themselves.
        let listeners: Vec<ChangeListener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(matches);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }
}

impl MediaQueryList for SimulatedQueryList {
    fn matches(&self) -> bool {
        self.condition.matches(self.width.load(Ordering::SeqCst))
    }

    fn add_listener(&self, listener: ChangeListener) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, listener));
        }
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

/// Viewport whose width is set explicitly
pub struct SimulatedViewport {
    width: Arc<AtomicU32>,
    lists: Mutex<Vec<Weak<SimulatedQueryList>>>,
}

impl SimulatedViewport {
    pub fn new(width: u32) -> Self {
        Self {
            width: Arc::new(AtomicU32::new(width)),
            lists: Mutex::new(Vec::new()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width.load(Ordering::SeqCst)
    }

    /// Change the width and notify every live query whose result flipped
    pub fn resize(&self, width: u32) {
        self.width.store(width, Ordering::SeqCst);

        let live: Vec<Arc<SimulatedQueryList>> = match self.lists.lock() {
            Ok(mut lists) => {
                lists.retain(|list| list.strong_count() > 0);
                lists.iter().filter_map(Weak::upgrade).collect()
            }
            Err(_) => return,
        };

        for list in live {
            list.notify();
        }
    }

    /// Listeners registered across all live queries
    pub fn listener_count(&self) -> usize {
        self.lists
            .lock()
            .map(|lists| {
                lists
                    .iter()
                    .filter_map(Weak::upgrade)
                    .map(|list| list.listener_count())
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl Viewport for SimulatedViewport {
    fn match_media(&self, query: &str) -> Result<Arc<dyn MediaQueryList>> {
        let condition = MediaCondition::parse(query)?;
        let initial = condition.matches(self.width());

        let list = Arc::new(SimulatedQueryList {
            condition,
            width: Arc::clone(&self.width),
            last: AtomicBool::new(initial),
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        });

        if let Ok(mut lists) = self.lists.lock() {
            lists.push(Arc::downgrade(&list));
        }

        Ok(list as Arc<dyn MediaQueryList>)
    }
}
