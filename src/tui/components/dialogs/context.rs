//! Dialog request API and provider scope
//!
//! [`ModalHandle`] is what UI code uses to ask for a dialog and await the
//! user's answer without blocking the event loop. [`ModalProvider`] owns the
//! store for one UI thread; [`use_modal`] fetches the handle of the innermost
//! provider from anywhere on that thread.
//!
//! Requests are registered when the `show_*` function is called, not when the
//! returned future is first polled, so call order is presentation order.

use super::manager::ModalStore;
use super::types::{
    DialogButton, DialogError, DialogKind, DialogRequest, DialogResult, DialogSession,
    OverlapPolicy,
};
use std::{
    cell::RefCell,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard},
    task::{Context, Poll},
};
use tokio::sync::oneshot;
use tracing::debug;

/// Future resolving to the outcome of one dialog
///
/// `true` means accepted, `false` cancelled or dismissed. If the provider goes
/// away before the dialog settles the future resolves to `false`.
pub struct PendingDialog {
    receiver: oneshot::Receiver<bool>,
}

impl Future for PendingDialog {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(false),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Cloneable handle to a dialog store
///
/// At most one dialog is visible at a time. A request made while another
/// dialog is still open does not overwrite it: with the default
/// [`OverlapPolicy::Queue`] it waits its turn, with
/// [`OverlapPolicy::Replace`] the open dialog's caller resolves as dismissed.
#[derive(Clone)]
pub struct ModalHandle {
    store: Arc<Mutex<ModalStore>>,
}

impl ModalHandle {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            store: Arc::new(Mutex::new(ModalStore::new(policy))),
        }
    }

    fn store(&self) -> MutexGuard<'_, ModalStore> {
        // A panic while holding the lock leaves the store consistent: every
        // mutation is a single assignment or queue operation.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Show any dialog and get a future for its outcome
    pub fn show(&self, request: DialogRequest) -> PendingDialog {
        let receiver = self.store().open(request);
        PendingDialog { receiver }
    }

    fn acknowledge(
        &self,
        kind: DialogKind,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = ()> + Send + 'static {
        let pending = self.show(DialogRequest::new(kind, message).with_optional_title(title));
        async move {
            pending.await;
        }
    }

    fn decide(
        &self,
        kind: DialogKind,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.show(DialogRequest::new(kind, message).with_optional_title(title))
    }

    /// Informational dialog; settles once the user acknowledges it
    pub fn show_alert(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = ()> + Send + 'static {
        self.acknowledge(DialogKind::Alert, message, title)
    }

    pub fn show_success(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = ()> + Send + 'static {
        self.acknowledge(DialogKind::Success, message, title)
    }

    pub fn show_error(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = ()> + Send + 'static {
        self.acknowledge(DialogKind::Error, message, title)
    }

    /// Accept/cancel question; `true` on accept, `false` on cancel or dismiss
    pub fn show_confirm(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.decide(DialogKind::Confirm, message, title)
    }

    /// Same contract as [`ModalHandle::show_confirm`] with the warning styling
    pub fn show_warning(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.decide(DialogKind::Warning, message, title)
    }

    /// Snapshot of the open session
    pub fn session(&self) -> Option<DialogSession> {
        self.store().session().cloned()
    }

    pub fn is_open(&self) -> bool {
        self.store().is_open()
    }

    pub fn queued(&self) -> usize {
        self.store().queued()
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.store().policy()
    }

    pub fn accept(&self) -> Option<bool> {
        self.store().accept()
    }

    pub fn cancel(&self) -> Option<bool> {
        self.store().cancel()
    }

    pub fn dismiss(&self) -> Option<bool> {
        self.store().dismiss()
    }

    pub fn activate_focused(&self) -> Option<bool> {
        self.store().activate_focused()
    }

    /// Press one of the dialog's buttons
    ///
    /// Fails with [`DialogError::NoActiveDialog`] when nothing is open and with
    /// [`DialogError::NoSuchButton`] when the open dialog lacks that button.
    pub fn press(&self, button: DialogButton) -> DialogResult<bool> {
        let mut store = self.store();
        let kind = store
            .session()
            .map(|s| s.kind())
            .ok_or(DialogError::NoActiveDialog)?;
        let settled = match button {
            DialogButton::Accept => store.accept(),
            DialogButton::Cancel if kind.has_cancel() => store.cancel(),
            DialogButton::Cancel => return Err(DialogError::NoSuchButton(button)),
        };
        settled.ok_or(DialogError::NoActiveDialog)
    }

    pub fn focus(&self, button: DialogButton) {
        self.store().focus(button)
    }

    pub fn focus_next(&self) {
        self.store().focus_next()
    }

    /// Resolve every pending dialog as dismissed
    pub fn close_all(&self) {
        self.store().close_all()
    }
}

impl Default for ModalHandle {
    fn default() -> Self {
        Self::new(OverlapPolicy::default())
    }
}

impl std::fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store();
        f.debug_struct("ModalHandle")
            .field("open", &store.session().map(|s| s.id))
            .field("queued", &store.queued())
            .field("policy", &store.policy())
            .finish()
    }
}

thread_local! {
    static PROVIDERS: RefCell<Vec<ModalHandle>> = RefCell::new(Vec::new());
}

/// Scope that makes a dialog store available to [`use_modal`]
///
/// Mount one near the root of the UI, on the UI thread. Providers nest; the
/// innermost one wins. Dropping a provider resolves all of its pending dialogs
/// as dismissed.
pub struct ModalProvider {
    handle: ModalHandle,
}

impl ModalProvider {
    pub fn mount(policy: OverlapPolicy) -> Self {
        let handle = ModalHandle::new(policy);
        PROVIDERS.with(|providers| providers.borrow_mut().push(handle.clone()));
        debug!("Mounted modal provider ({:?})", policy);
        Self { handle }
    }

    pub fn handle(&self) -> ModalHandle {
        self.handle.clone()
    }
}

impl Drop for ModalProvider {
    fn drop(&mut self) {
        PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            if let Some(index) = providers
                .iter()
                .rposition(|h| Arc::ptr_eq(&h.store, &self.handle.store))
            {
                providers.remove(index);
            }
        });
        self.handle.close_all();
        debug!("Unmounted modal provider");
    }
}

/// Non-panicking lookup; [`DialogError::NoProvider`] when nothing is mounted
pub fn try_use_modal() -> DialogResult<ModalHandle> {
    PROVIDERS.with(|providers| providers.borrow().last().cloned().ok_or(DialogError::NoProvider))
}

/// Handle of the innermost provider on this thread
///
/// # Panics
///
/// Panics when no [`ModalProvider`] is mounted on the current thread. That is
/// a composition mistake, not something to recover from at runtime.
pub fn use_modal() -> ModalHandle {
    match try_use_modal() {
        Ok(handle) => handle,
        Err(err) => panic!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_accept_resolves_true() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let answer = modal.show_confirm("Delete item?", None);
        assert!(modal.is_open());
        modal.accept();

        assert!(answer.await);
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn test_confirm_overlay_resolves_false() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let answer = modal.show_confirm("Delete item?", None);
        modal.dismiss();

        assert!(!answer.await);
    }

    #[tokio::test]
    async fn test_alert_acknowledged_then_closed() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let done = modal.show_alert("Saved", None);
        assert_eq!(modal.session().unwrap().kind(), DialogKind::Alert);
        modal.accept();
        done.await;

        assert!(modal.session().is_none());
    }

    #[tokio::test]
    async fn test_warning_resolves_both_ways() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let yes = modal.show_warning("Low disk space", None);
        modal.accept();
        assert!(yes.await);

        let no = modal.show_warning("Low disk space", Some("Disco"));
        assert_eq!(modal.session().unwrap().request.title.as_deref(), Some("Disco"));
        modal.cancel();
        assert!(!no.await);
    }

    #[tokio::test]
    async fn test_overlapping_requests_are_queued() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let first = modal.show_alert("first", None);
        let second = modal.show_error("second", None);

        assert_eq!(modal.session().unwrap().request.message, "first");
        assert_eq!(modal.queued(), 1);

        modal.accept();
        first.await;
        let session = modal.session().unwrap();
        assert_eq!(session.kind(), DialogKind::Error);
        assert_eq!(session.request.message, "second");

        modal.dismiss();
        second.await;
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn test_overlapping_requests_replace() {
        let _provider = ModalProvider::mount(OverlapPolicy::Replace);
        let modal = use_modal();

        let first = modal.show_confirm("first", None);
        let second = modal.show_error("second", None);

        assert!(!first.await);
        assert_eq!(modal.session().unwrap().request.message, "second");
        modal.accept();
        second.await;
    }

    #[tokio::test]
    async fn test_caller_suspends_in_spawned_task() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let answer = tokio::spawn(modal.show_confirm("Delete item?", None));
        tokio::task::yield_now().await;
        assert!(!answer.is_finished());

        modal.cancel();
        assert!(!answer.await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_labels_through_show() {
        let _provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let pending = modal.show(
            DialogRequest::confirm("¿Eliminar?")
                .with_confirm_label("Eliminar")
                .with_cancel_label("Volver"),
        );
        let session = modal.session().unwrap();
        assert_eq!(session.request.confirm_label.as_deref(), Some("Eliminar"));
        modal.activate_focused();
        assert!(pending.await);
    }

    #[tokio::test]
    async fn test_unmount_resolves_pending() {
        let provider = ModalProvider::mount(OverlapPolicy::Queue);
        let modal = use_modal();

        let open = modal.show_confirm("a", None);
        let waiting = modal.show_warning("b", None);
        drop(provider);

        assert!(!open.await);
        assert!(!waiting.await);
        assert_eq!(try_use_modal().unwrap_err(), DialogError::NoProvider);
    }

    #[test]
    fn test_nested_providers() {
        let outer = ModalProvider::mount(OverlapPolicy::Queue);
        {
            let inner = ModalProvider::mount(OverlapPolicy::Replace);
            assert_eq!(use_modal().policy(), OverlapPolicy::Replace);
            drop(inner);
        }
        assert_eq!(use_modal().policy(), OverlapPolicy::Queue);
        drop(outer);
        assert!(try_use_modal().is_err());
    }

    #[test]
    fn test_try_use_modal_without_provider() {
        assert_eq!(try_use_modal().unwrap_err(), DialogError::NoProvider);
    }

    #[test]
    #[should_panic(expected = "use_modal must be called inside a ModalProvider")]
    fn test_use_modal_without_provider_panics() {
        let _ = use_modal();
    }

    #[tokio::test]
    async fn test_press_reports_missing_dialog_or_button() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        assert_eq!(handle.press(DialogButton::Accept), Err(DialogError::NoActiveDialog));

        let done = handle.show_success("Guardado", None);
        assert_eq!(
            handle.press(DialogButton::Cancel),
            Err(DialogError::NoSuchButton(DialogButton::Cancel))
        );
        assert!(handle.is_open());
        assert_eq!(handle.press(DialogButton::Accept), Ok(true));
        done.await;
    }
}
