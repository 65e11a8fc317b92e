//! Presentation model of the open dialog
//!
//! `DialogView` is derived from the current session and nothing else, so the
//! renderer never has to remember anything between frames.

use super::types::{DialogButton, DialogKind, DialogSession, Locale};

/// Semantic accent of a dialog, mapped to theme colours by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Green,
    Red,
    Yellow,
}

/// Icon and accent for each kind
pub fn icon_for(kind: DialogKind) -> (&'static str, Accent) {
    match kind {
        DialogKind::Alert => ("ℹ", Accent::Blue),
        DialogKind::Confirm => ("?", Accent::Blue),
        DialogKind::Success => ("✔", Accent::Green),
        DialogKind::Error => ("✖", Accent::Red),
        DialogKind::Warning => ("⚠", Accent::Yellow),
    }
}

/// Everything needed to draw one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub kind: DialogKind,
    pub icon: &'static str,
    pub accent: Accent,
    pub title: String,
    pub message: String,
    pub accept_label: String,
    pub cancel_label: Option<String>,
    pub focus: DialogButton,
}

impl DialogView {
    /// Build the view for the open session; `None` when nothing is open
    pub fn from_session(session: Option<&DialogSession>, locale: Locale) -> Option<Self> {
        let session = session?;
        let request = &session.request;
        let (icon, accent) = icon_for(request.kind);

        Some(Self {
            kind: request.kind,
            icon,
            accent,
            title: request.display_title(locale),
            message: request.message.clone(),
            accept_label: request.accept_label(locale),
            cancel_label: request.cancel_label(locale),
            focus: session.focus,
        })
    }

    pub fn has_cancel(&self) -> bool {
        self.cancel_label.is_some()
    }
}
