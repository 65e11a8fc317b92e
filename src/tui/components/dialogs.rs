//! Modal dialog system
//!
//! Replaces blocking native dialogs with a request API whose results are
//! awaited like futures, a single-slot store that holds the open dialog, and a
//! stateless renderer that draws whatever the store currently holds.
//!
//! Mount one [`ModalProvider`] at the root of the UI and draw one
//! [`ModalRenderer`] after everything else. Any code on the UI thread can then
//! call [`use_modal`] and await `show_confirm`, `show_error` and friends.

pub mod context;
pub mod layer;
pub mod manager;
pub mod renderer;
pub mod types;
pub mod view;

pub use context::{use_modal, ModalProvider};
pub use renderer::ModalRenderer;
pub use types::{Locale, OverlapPolicy};
pub use view::Accent;
