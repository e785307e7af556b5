//! Member directory
//!
//! Owns the member list shown to consumers. Mounting starts exactly one fetch
//! of all members; role and identifier lookups are issued on demand. The
//! directory carries a cancellation signal tied to its lifetime: once
//! unmounted (or dropped) no in-flight request may touch its state.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};
use crate::models::Member;
use crate::utils::errors::{CommunityHubError, Result};
use crate::utils::logging::{log_discarded_update, log_service_error};
use super::member::MemberService;

const COMPONENT: &str = "member_directory";

/// Generic error stored when the member list could not be loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load members: {message}")]
pub struct DirectoryError {
    pub message: String,
    pub recoverable: bool,
}

impl DirectoryError {
    fn from_fault(fault: &CommunityHubError) -> Self {
        Self {
            message: fault.to_string(),
            recoverable: fault.is_recoverable(),
        }
    }
}

/// Snapshot of what consumers render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryState {
    pub members: Vec<Member>,
    pub loading: bool,
    pub error: Option<DirectoryError>,
}

struct Inner {
    service: Arc<dyn MemberService>,
    state: watch::Sender<DirectoryState>,
    shutdown: watch::Sender<bool>,
    // Requests currently raising the loading flag. Only touched under the state lock.
    pending: AtomicUsize,
}

impl Inner {
    fn is_cancelled(&self) -> bool {
        *self.shutdown.borrow()
    }

    async fn cancelled(&self) {
        let mut rx = self.shutdown.subscribe();
        // The sender lives as long as `self`, so this only returns once cancelled.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Race `request` against teardown
    async fn guarded<T>(&self, request: impl Future<Output = Result<T>>) -> Result<T> {
        if self.is_cancelled() {
            return Err(CommunityHubError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(CommunityHubError::Cancelled),
            result = request => result,
        }
    }

    /// Raise the loading flag for one request. The returned guard lowers it
    /// again when settled or dropped.
    fn begin_loading(self: &Arc<Self>) -> LoadingGuard {
        let mut armed = false;
        self.state.send_if_modified(|state| {
            if self.is_cancelled() {
                return false;
            }
            self.pending.fetch_add(1, Ordering::SeqCst);
            armed = true;
            let changed = !state.loading;
            state.loading = true;
            changed
        });

        LoadingGuard {
            inner: Arc::clone(self),
            armed,
        }
    }

    /// Lower the loading flag for one request and apply `update`, unless torn down.
    fn release(&self, update: impl FnOnce(&mut DirectoryState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.is_cancelled() {
                return false;
            }
            let remaining = self.pending.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            state.loading = remaining > 0;
            update(state);
            true
        })
    }

    /// Fetch every member under an already raised loading flag
    async fn load_all(&self, loading: LoadingGuard) {
        match self.guarded(self.service.get_all_members()).await {
            Ok(members) => {
                let count = members.len();
                if loading.settle("get_all_members", |state| {
                    state.members = members;
                    state.error = None;
                }) {
                    info!(count = count, "Member list loaded");
                }
            }
            Err(CommunityHubError::Cancelled) => log_discarded_update(COMPONENT, "get_all_members"),
            Err(e) => {
                log_service_error(COMPONENT, &e.to_string(), Some("get_all_members"));
                let error = DirectoryError::from_fault(&e);
                loading.settle("get_all_members", |state| state.error = Some(error));
            }
        }
    }
}

/// One unit of the loading counter.
///
/// Released by [`settle`](Self::settle) once the request resolves, or on drop
/// when the request future is abandoned before resolving.
struct LoadingGuard {
    inner: Arc<Inner>,
    armed: bool,
}

impl LoadingGuard {
    fn settle(mut self, operation: &str, update: impl FnOnce(&mut DirectoryState)) -> bool {
        self.armed = false;
        let applied = self.inner.release(update);
        if !applied {
            log_discarded_update(COMPONENT, operation);
        }
        applied
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.armed && self.inner.release(|_| {}) {
            debug!("Abandoned request released the loading flag");
        }
    }
}

/// Lifetime-scoped access to the member roster
pub struct MemberDirectory {
    inner: Arc<Inner>,
}

impl MemberDirectory {
    /// Create the directory and start the initial fetch of all members.
    ///
    /// Must be called from within a tokio runtime. `loading` is already true
    /// when this returns.
    pub fn mount(service: Arc<dyn MemberService>) -> Self {
        let (state, _) = watch::channel(DirectoryState::default());
        let (shutdown, _) = watch::channel(false);

        let inner = Arc::new(Inner {
            service,
            state,
            shutdown,
            pending: AtomicUsize::new(0),
        });

        let loading = inner.begin_loading();
        let task = Arc::clone(&inner);
        tokio::spawn(async move {
            task.load_all(loading).await;
        });

        debug!("Member directory mounted");
        Self { inner }
    }

    pub fn state(&self) -> DirectoryState {
        self.inner.state.borrow().clone()
    }

    pub fn members(&self) -> Vec<Member> {
        self.inner.state.borrow().members.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn error(&self) -> Option<DirectoryError> {
        self.inner.state.borrow().error.clone()
    }

    /// Receive every state change; the receiver outlives the directory.
    pub fn subscribe(&self) -> watch::Receiver<DirectoryState> {
        self.inner.state.subscribe()
    }

    /// Fetch all members again
    pub async fn refresh(&self) {
        if self.inner.is_cancelled() {
            return;
        }
        let loading = self.inner.begin_loading();
        self.inner.load_all(loading).await;
    }

    /// Members holding `role`, or an empty list if the request fails.
    ///
    /// An empty result does not tell "none found" from "request failed"; use
    /// [`try_members_by_role`](Self::try_members_by_role) when that matters.
    pub async fn get_members_by_role(&self, role: &str) -> Vec<Member> {
        match self.try_members_by_role(role).await {
            Ok(members) => members,
            Err(CommunityHubError::Cancelled) => Vec::new(),
            Err(e) => {
                log_service_error(COMPONENT, &e.to_string(), Some("get_members_by_role"));
                Vec::new()
            }
        }
    }

    /// Members holding `role`; raises the loading flag while pending
    pub async fn try_members_by_role(&self, role: &str) -> Result<Vec<Member>> {
        if self.inner.is_cancelled() {
            return Err(CommunityHubError::Cancelled);
        }

        let loading = self.inner.begin_loading();
        let outcome = self.inner.guarded(self.inner.service.get_members_by_role(role)).await;
        if !matches!(outcome, Err(CommunityHubError::Cancelled)) {
            loading.settle("get_members_by_role", |_| {});
        }
        outcome
    }

    /// The member with `id`, or `None` if absent or the request fails
    pub async fn get_member_by_id(&self, id: &str) -> Option<Member> {
        match self.try_member_by_id(id).await {
            Ok(member) => member,
            Err(CommunityHubError::Cancelled) => None,
            Err(e) => {
                log_service_error(COMPONENT, &e.to_string(), Some("get_member_by_id"));
                None
            }
        }
    }

    pub async fn try_member_by_id(&self, id: &str) -> Result<Option<Member>> {
        self.inner.guarded(self.inner.service.get_member_by_id(id)).await
    }

    /// Fire the cancellation signal; later results are discarded.
    pub fn unmount(&self) {
        let shutdown = &self.inner.shutdown;
        // Flip the flag under the state lock so no update can interleave with teardown.
        self.inner.state.send_if_modified(|_| {
            shutdown.send_replace(true);
            false
        });
        debug!("Member directory unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.is_cancelled()
    }
}

impl Drop for MemberDirectory {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.unmount();
        }
    }
}
