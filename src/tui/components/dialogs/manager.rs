//! Modal state store
//!
//! The store holds at most one open dialog session together with the oneshot
//! sender that resumes its caller. Requests that arrive while a dialog is open
//! are handled according to the configured [`OverlapPolicy`].
//!
//! Every sender is consumed by value when its dialog settles, so a caller is
//! resumed at most once; `close_all` and `Drop` make sure it is resumed at
//! least once.

use super::types::{DialogButton, DialogKind, DialogRequest, DialogSession, OverlapPolicy};
use std::collections::VecDeque;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Sender half of a pending resolution
type Resolver = oneshot::Sender<bool>;

/// Open dialog plus the caller waiting on it
struct ActiveDialog {
    session: DialogSession,
    resolver: Resolver,
}

/// Request waiting for the open dialog to settle
struct QueuedDialog {
    id: u64,
    request: DialogRequest,
    resolver: Resolver,
}

/// Single-slot dialog store with a FIFO of waiting requests
pub struct ModalStore {
    active: Option<ActiveDialog>,
    queue: VecDeque<QueuedDialog>,
    policy: OverlapPolicy,
    next_id: u64,
}

impl ModalStore {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            active: None,
            queue: VecDeque::new(),
            policy,
            next_id: 1,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Register a request and return the receiver its caller awaits
    pub fn open(&mut self, request: DialogRequest) -> oneshot::Receiver<bool> {
        let (resolver, receiver) = oneshot::channel();
        let id = self.next_id;
        self.next_id += 1;

        if self.active.is_none() {
            debug!("Opening {} dialog #{}", request.kind, id);
            self.active = Some(ActiveDialog {
                session: DialogSession::new(id, request),
                resolver,
            });
            return receiver;
        }

        match self.policy {
            OverlapPolicy::Queue => {
                debug!(
                    "Queueing {} dialog #{} behind an open dialog ({} waiting)",
                    request.kind,
                    id,
                    self.queue.len()
                );
                self.queue.push_back(QueuedDialog {
                    id,
                    request,
                    resolver,
                });
            }
            OverlapPolicy::Replace => {
                if let Some(replaced) = self.active.take() {
                    warn!(
                        "Dialog #{} replaced by #{} before it settled; resolving it as dismissed",
                        replaced.session.id, id
                    );
                    Self::deliver(replaced.session.id, replaced.resolver, false);
                }
                self.active = Some(ActiveDialog {
                    session: DialogSession::new(id, request),
                    resolver,
                });
            }
        }

        receiver
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&DialogSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Number of requests waiting behind the open dialog
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Kinds waiting in the queue, oldest first
    pub fn queued_kinds(&self) -> Vec<DialogKind> {
        self.queue.iter().map(|q| q.request.kind).collect()
    }

    /// Settle the open dialog through the accept action
    pub fn accept(&mut self) -> Option<bool> {
        self.settle(true)
    }

    /// Settle the open dialog through the cancel action
    ///
    /// Dialogs without a cancel button ignore this and stay open.
    pub fn cancel(&mut self) -> Option<bool> {
        let has_cancel = self.session().map(|s| s.kind().has_cancel())?;
        if !has_cancel {
            debug!("Ignoring cancel on a dialog without a cancel action");
            return None;
        }
        self.settle(false)
    }

    /// Settle the open dialog through an overlay click or Esc
    pub fn dismiss(&mut self) -> Option<bool> {
        let outcome = self.session().map(|s| s.kind().dismiss_outcome())?;
        self.settle(outcome)
    }

    /// Settle the open dialog through its focused button
    pub fn activate_focused(&mut self) -> Option<bool> {
        let focus = self.session()?.focus;
        match focus {
            DialogButton::Accept => self.accept(),
            DialogButton::Cancel => self.cancel(),
        }
    }

    /// Move focus to a button; cancel is only reachable when the kind has one
    pub fn focus(&mut self, button: DialogButton) {
        if let Some(active) = self.active.as_mut() {
            if button == DialogButton::Cancel && !active.session.kind().has_cancel() {
                return;
            }
            active.session.focus = button;
        }
    }

    /// Toggle focus between accept and cancel
    pub fn focus_next(&mut self) {
        let next = match self.session() {
            Some(session) if session.kind().has_cancel() => match session.focus {
                DialogButton::Accept => DialogButton::Cancel,
                DialogButton::Cancel => DialogButton::Accept,
            },
            _ => return,
        };
        self.focus(next);
    }

    /// Resolve the open dialog and every queued request as dismissed
    pub fn close_all(&mut self) {
        if let Some(active) = self.active.take() {
            Self::deliver(active.session.id, active.resolver, false);
        }
        for queued in self.queue.drain(..) {
            Self::deliver(queued.id, queued.resolver, false);
        }
    }

    fn settle(&mut self, outcome: bool) -> Option<bool> {
        let active = self.active.take()?;
        debug!(
            "Dialog #{} ({}) settled with {}",
            active.session.id,
            active.session.kind(),
            outcome
        );
        Self::deliver(active.session.id, active.resolver, outcome);
        self.promote_next();
        Some(outcome)
    }

    fn promote_next(&mut self) {
        if let Some(next) = self.queue.pop_front() {
            debug!("Showing queued {} dialog #{}", next.request.kind, next.id);
            self.active = Some(ActiveDialog {
                session: DialogSession::new(next.id, next.request),
                resolver: next.resolver,
            });
        }
    }

    fn deliver(id: u64, resolver: Resolver, outcome: bool) {
        if resolver.send(outcome).is_err() {
            // The caller stopped waiting; nothing left to resume.
            debug!("Caller of dialog #{} is gone", id);
        }
    }
}

impl Default for ModalStore {
    fn default() -> Self {
        Self::new(OverlapPolicy::default())
    }
}

impl Drop for ModalStore {
    fn drop(&mut self) {
        self.close_all();
    }
}
