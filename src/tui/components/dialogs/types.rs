//! Core dialog types
//!
//! This module defines the vocabulary shared by the dialog store, the request
//! API and the renderer: what kind of dialog is shown, what the caller asked
//! for, and the session that wraps an open request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a dialog
///
/// The kind selects the icon, accent colour, default title and whether a
/// cancel button is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Alert,
    Confirm,
    Success,
    Error,
    Warning,
}

impl DialogKind {
    pub const ALL: [DialogKind; 5] = [
        DialogKind::Alert,
        DialogKind::Confirm,
        DialogKind::Success,
        DialogKind::Error,
        DialogKind::Warning,
    ];

    /// Whether the dialog offers a cancel action next to accept
    pub fn has_cancel(&self) -> bool {
        matches!(self, DialogKind::Confirm | DialogKind::Warning)
    }

    /// Outcome delivered when the user dismisses the dialog (overlay click or Esc)
    ///
    /// Dialogs with a cancel button dismiss as cancel; the others only have one
    /// way out, so dismissal counts as accept.
    pub fn dismiss_outcome(&self) -> bool {
        !self.has_cancel()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Success => "success",
            DialogKind::Error => "error",
            DialogKind::Warning => "warning",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language used for default titles and button labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn default_title(&self, kind: DialogKind) -> &'static str {
        match (self, kind) {
            (Locale::Es, DialogKind::Alert) => "Información",
            (Locale::Es, DialogKind::Confirm) => "Confirmar acción",
            (Locale::Es, DialogKind::Success) => "¡Éxito!",
            (Locale::Es, DialogKind::Error) => "Error",
            (Locale::Es, DialogKind::Warning) => "Advertencia",
            (Locale::En, DialogKind::Alert) => "Information",
            (Locale::En, DialogKind::Confirm) => "Confirm action",
            (Locale::En, DialogKind::Success) => "Success!",
            (Locale::En, DialogKind::Error) => "Error",
            (Locale::En, DialogKind::Warning) => "Warning",
        }
    }

    pub fn accept_label(&self) -> &'static str {
        match self {
            Locale::Es => "Aceptar",
            Locale::En => "Accept",
        }
    }

    pub fn cancel_label(&self) -> &'static str {
        match self {
            Locale::Es => "Cancelar",
            Locale::En => "Cancel",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "es-es" | "es_es" | "spanish" => Ok(Locale::Es),
            "en" | "en-us" | "en_us" | "english" => Ok(Locale::En),
            other => Err(format!("unknown locale '{}'", other)),
        }
    }
}

/// What to do with a request made while another dialog is still open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Wait in FIFO order until the open dialog settles
    #[default]
    Queue,
    /// Replace the open dialog; its caller resolves as dismissed (`false`)
    Replace,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "queue" => Ok(OverlapPolicy::Queue),
            "replace" => Ok(OverlapPolicy::Replace),
            other => Err(format!("unknown overlap policy '{}'", other)),
        }
    }
}

/// A single request for a dialog, as made by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: Option<String>,
    pub message: String,
    pub confirm_label: Option<String>,
    pub cancel_label: Option<String>,
}

impl DialogRequest {
    pub fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            confirm_label: None,
            cancel_label: None,
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Alert, message)
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Confirm, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Warning, message)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title only when one was given
    pub fn with_optional_title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    /// Title to display: the explicit one, or the kind's default
    pub fn display_title(&self, locale: Locale) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => locale.default_title(self.kind).to_string(),
        }
    }

    pub fn accept_label(&self, locale: Locale) -> String {
        self.confirm_label
            .clone()
            .unwrap_or_else(|| locale.accept_label().to_string())
    }

    /// Cancel label, or `None` when the kind has no cancel action
    pub fn cancel_label(&self, locale: Locale) -> Option<String> {
        if !self.kind.has_cancel() {
            return None;
        }
        Some(
            self.cancel_label
                .clone()
                .unwrap_or_else(|| locale.cancel_label().to_string()),
        )
    }
}

/// One of the two actions a dialog can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogButton {
    #[default]
    Accept,
    Cancel,
}

impl DialogButton {
    /// Value delivered to the caller when this button is activated
    pub fn outcome(&self) -> bool {
        matches!(self, DialogButton::Accept)
    }
}

/// The open dialog: one request plus the focused action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSession {
    pub id: u64,
    pub request: DialogRequest,
    pub focus: DialogButton,
}

impl DialogSession {
    pub fn new(id: u64, request: DialogRequest) -> Self {
        Self {
            id,
            request,
            focus: DialogButton::Accept,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.request.kind
    }
}

/// Result type for dialog operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

/// Dialog-specific error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("use_modal must be called inside a ModalProvider")]
    NoProvider,

    #[error("No dialog is open")]
    NoActiveDialog,

    #[error("The open dialog has no {0:?} button")]
    NoSuchButton(DialogButton),
}
