use crate::config::Config;
use crate::tui::{
    components::{
        dialogs::{use_modal, ModalProvider, ModalRenderer},
        Component,
    },
    events::Event,
    keys::KeyMap,
    themes::Theme,
    utils::centered_rect_percent,
    Frame,
};
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Actions offered by the demo shell, each one opening a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    DeleteClient,
    SaveProfile,
    UploadFailed,
    InvalidateLink,
    SendEvaluation,
    TwoNotices,
}

impl DemoAction {
    pub const ALL: [DemoAction; 6] = [
        DemoAction::DeleteClient,
        DemoAction::SaveProfile,
        DemoAction::UploadFailed,
        DemoAction::InvalidateLink,
        DemoAction::SendEvaluation,
        DemoAction::TwoNotices,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DemoAction::DeleteClient => "Eliminar cliente",
            DemoAction::SaveProfile => "Guardar perfil",
            DemoAction::UploadFailed => "Subir CV",
            DemoAction::InvalidateLink => "Invalidar enlace de evaluación",
            DemoAction::SendEvaluation => "Enviar evaluación",
            DemoAction::TwoNotices => "Dos avisos seguidos",
        }
    }
}

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current application dimensions
    pub size: Rect,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Current theme for styling
    pub theme: Theme,

    /// Status message to display
    pub status_message: Option<String>,

    /// Whether the help overlay is shown
    pub show_help: bool,

    /// Index of the highlighted demo action
    pub selected: usize,

    /// Application configuration
    pub config: Config,

    /// Owns the dialog store for this thread; dropping it settles every pending dialog
    provider: ModalProvider,

    /// Drawn last, above everything else
    dialog: ModalRenderer,

    /// Event sender for internal communication
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    /// Create a new application instance and mount the dialog provider
    pub fn new(config: Config, event_sender: mpsc::UnboundedSender<Event>) -> Self {
        let provider = ModalProvider::mount(config.overlap_policy);
        let dialog = ModalRenderer::new(provider.handle(), config.locale);
        info!(
            "Dialog provider mounted (locale {:?}, overlap {:?})",
            config.locale, config.overlap_policy
        );

        Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            status_message: None,
            show_help: false,
            selected: 0,
            config,
            provider,
            dialog,
            event_sender,
        }
    }

    /// Handle incoming events, returning whether the app should exit
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                if self.key_map.should_force_quit(&key_event) {
                    self.should_quit = true;
                    return Ok(true);
                }

                // The open dialog sees input before anything else
                if self.dialog.handle_key_event(key_event).await? {
                    return Ok(false);
                }

                if self.show_help {
                    self.show_help = false;
                    return Ok(false);
                }

                if self.key_map.should_quit(&key_event) {
                    self.should_quit = true;
                } else if self.key_map.should_show_help(&key_event) {
                    self.show_help = true;
                } else if self.key_map.up.matches(&key_event) {
                    self.selected = self.selected.checked_sub(1).unwrap_or(DemoAction::ALL.len() - 1);
                } else if self.key_map.down.matches(&key_event) {
                    self.selected = (self.selected + 1) % DemoAction::ALL.len();
                } else if self.key_map.select.matches(&key_event) {
                    self.run_action(DemoAction::ALL[self.selected]);
                }
            }

            Event::Mouse(mouse_event) => {
                if self.config.mouse_enabled {
                    self.dialog.handle_mouse_event(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
            }

            Event::Tick => {}

            Event::StatusMessage(message) => {
                self.status_message = Some(message);
            }

            Event::ClearStatus => {
                self.status_message = None;
            }
        }

        Ok(self.should_quit)
    }

    /// Open the dialog for `action` and report its outcome through the status bar
    ///
    /// The request is registered immediately; awaiting happens in a spawned
    /// task so the event loop keeps drawing and feeding input to the dialog.
    pub fn run_action(&mut self, action: DemoAction) {
        debug!("Running demo action {:?}", action);
        let modal = use_modal();
        let sender = self.event_sender.clone();
        let report = move |message: &str| {
            let _ = sender.send(Event::StatusMessage(message.to_string()));
        };

        match action {
            DemoAction::DeleteClient => {
                let answer = modal.show_confirm(
                    "¿Estás seguro de eliminar este cliente? Esta acción no se puede deshacer.",
                    Some("Eliminar cliente"),
                );
                tokio::spawn(async move {
                    if answer.await {
                        report("Cliente eliminado");
                    } else {
                        report("Eliminación cancelada");
                    }
                });
            }
            DemoAction::SaveProfile => {
                let closed = modal.show_success("Perfil guardado correctamente", None);
                tokio::spawn(async move {
                    closed.await;
                    report("Perfil guardado");
                });
            }
            DemoAction::UploadFailed => {
                let closed = modal.show_error(
                    "Error al subir el archivo. El tamaño máximo es 5 MB.",
                    None,
                );
                tokio::spawn(async move {
                    closed.await;
                    report("Subida fallida");
                });
            }
            DemoAction::InvalidateLink => {
                let answer = modal.show_warning(
                    "El enlace actual dejará de funcionar y el candidato no podrá completar la evaluación.",
                    Some("Invalidar enlace"),
                );
                tokio::spawn(async move {
                    if answer.await {
                        report("Enlace invalidado");
                    } else {
                        report("El enlace sigue activo");
                    }
                });
            }
            DemoAction::SendEvaluation => {
                let closed =
                    modal.show_alert("La evaluación se enviará al candidato por correo.", None);
                tokio::spawn(async move {
                    closed.await;
                    report("Evaluación enviada");
                });
            }
            DemoAction::TwoNotices => {
                let first = modal.show_alert("Primer aviso", None);
                let second = modal.show_alert("Segundo aviso", None);
                tokio::spawn(async move {
                    first.await;
                    second.await;
                    report("Dos avisos cerrados");
                });
            }
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Action list
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        self.render_actions(frame, chunks[0]);
        self.render_status_bar(frame, chunks[1]);

        if self.show_help {
            self.render_help_overlay(frame);
        }

        let area = frame.size();
        self.dialog.render(frame, area, &self.theme);
    }

    fn render_actions(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = DemoAction::ALL
            .iter()
            .enumerate()
            .map(|(index, action)| {
                if index == self.selected {
                    Line::from(Span::styled(format!("› {}", action.label()), self.theme.selected()))
                } else {
                    Line::from(Span::styled(format!("  {}", action.label()), self.theme.text()))
                }
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" talento ")
            .border_style(self.theme.muted());

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let handle = self.provider.handle();
        let mut status_text = match self.status_message {
            Some(ref message) => message.clone(),
            None => "enter: abrir diálogo | ?: ayuda | q: salir".to_string(),
        };
        if handle.queued() > 0 {
            status_text.push_str(&format!(" | {} en cola", handle.queued()));
        }

        frame.render_widget(Paragraph::new(status_text).style(self.theme.muted()), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect_percent(60, 60, frame.size());

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title(" Ayuda ")
            .style(self.theme.dialog_surface());

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Paragraph::new(self.key_map.help_text())
                .block(help_block)
                .style(self.theme.text()),
            help_area,
        );
    }

    /// Whether a dialog is currently shown
    pub fn dialog_open(&self) -> bool {
        self.dialog.is_visible()
    }
}
