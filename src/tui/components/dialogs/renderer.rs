//! Dialog renderer
//!
//! Draws the open dialog above everything else and turns key presses and
//! clicks into accept/cancel/dismiss calls on the store. The only thing kept
//! between frames is the last drawn area, used to map mouse clicks.

use super::{
    context::ModalHandle,
    layer::{DialogHit, DialogLayout},
    types::{DialogButton, Locale},
    view::DialogView,
};
use crate::tui::{
    components::{Component, ComponentState},
    themes::Theme,
    Frame,
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, trace};

/// Stateless presenter for the dialog store
pub struct ModalRenderer {
    handle: ModalHandle,
    locale: Locale,
    state: ComponentState,
}

impl ModalRenderer {
    pub fn new(handle: ModalHandle, locale: Locale) -> Self {
        Self {
            handle,
            locale,
            state: ComponentState::new(),
        }
    }

    /// View for the current frame, if a dialog is open
    pub fn view(&self) -> Option<DialogView> {
        DialogView::from_session(self.handle.session().as_ref(), self.locale)
    }

    /// Layout of the open dialog within the last rendered area
    pub fn layout(&self) -> Option<DialogLayout> {
        self.view()
            .map(|view| DialogLayout::calculate(self.size(), &view))
    }

    fn render_button(
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        accent: Color,
        theme: &Theme,
    ) {
        if area.is_empty() {
            return;
        }
        let style = if focused {
            Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(theme.bg_subtle).fg(theme.fg_base)
        };

        let button = Paragraph::new(label.to_string())
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(if focused {
                        theme.border_focus
                    } else {
                        theme.border
                    })),
            );

        frame.render_widget(button, area);
    }
}

#[async_trait]
impl Component for ModalRenderer {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<bool> {
        let Some(session) = self.handle.session() else {
            return Ok(false);
        };
        let has_cancel = session.kind().has_cancel();

        match event.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.handle.activate_focused();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.handle.focus_next();
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.handle.accept();
            }
            KeyCode::Char('n') | KeyCode::Char('N') if has_cancel => {
                self.handle.focus(DialogButton::Cancel);
                self.handle.cancel();
            }
            KeyCode::Esc => {
                self.handle.dismiss();
            }
            _ => {}
        }

        // An open dialog is modal: nothing underneath sees the key.
        Ok(true)
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<bool> {
        let Some(layout) = self.layout() else {
            return Ok(false);
        };

        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let hit = layout.hit(event.column, event.row);
            trace!("Dialog click at ({}, {}): {:?}", event.column, event.row, hit);
            let pressed = match hit {
                DialogHit::Accept => Some(self.handle.press(DialogButton::Accept)),
                DialogHit::Cancel => Some(self.handle.press(DialogButton::Cancel)),
                DialogHit::Overlay => {
                    self.handle.dismiss();
                    None
                }
                DialogHit::Body => None,
            };
            if let Some(Err(e)) = pressed {
                debug!("Ignoring click: {}", e);
            }
        }

        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.set_size(area);

        let Some(view) = self.view() else {
            return;
        };
        let layout = DialogLayout::calculate(area, &view);
        let accent = theme.accent_color(view.accent);

        // Overlay over the whole frame, content underneath stays visible but dimmed
        frame.render_widget(Block::default().style(theme.overlay()), layout.overlay);

        frame.render_widget(Clear, layout.dialog_area);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .style(theme.dialog_surface()),
            layout.dialog_area,
        );

        let header = vec![
            Line::from(Span::styled(
                view.icon,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(view.title.clone(), theme.title())),
        ];
        if !layout.header_area.is_empty() {
            frame.render_widget(
                Paragraph::new(header).alignment(Alignment::Center),
                layout.header_area,
            );
        }

        if !layout.message_area.is_empty() {
            frame.render_widget(
                Paragraph::new(view.message.clone())
                    .style(theme.text())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                layout.message_area,
            );
        }

        if let (Some(cancel_label), Some(cancel_area)) = (&view.cancel_label, layout.cancel_button) {
            Self::render_button(
                frame,
                cancel_area,
                cancel_label,
                view.focus == DialogButton::Cancel,
                accent,
                theme,
            );
        }
        Self::render_button(
            frame,
            layout.accept_button,
            &view.accept_label,
            view.focus == DialogButton::Accept,
            accent,
            theme,
        );
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }

    fn is_visible(&self) -> bool {
        self.handle.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialogs::types::{DialogKind, DialogRequest, OverlapPolicy};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(renderer: &mut ModalRenderer) -> String {
        draw_sized(renderer, 80, 24)
    }

    fn draw_sized(renderer: &mut ModalRenderer, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                renderer.render(frame, area, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_nothing_rendered_without_session() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle, Locale::Es);

        let screen = draw(&mut renderer);
        assert!(screen.chars().all(|c| c == ' ' || c == '\n'));
        assert!(!renderer.is_visible());
    }

    #[test]
    fn test_default_and_custom_titles() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let _pending = handle.show_alert("x", None);
        let screen = draw(&mut renderer);
        assert!(screen.contains("Información"));
        assert!(screen.contains("Aceptar"));
        assert!(!screen.contains("Cancelar"));
        handle.accept();

        let _pending = handle.show_alert("x", Some("Custom"));
        let screen = draw(&mut renderer);
        assert!(screen.contains("Custom"));
        assert!(!screen.contains("Información"));
    }

    #[test]
    fn test_warning_variant_shows_both_buttons() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let _pending = handle.show_warning("Low disk space", None);
        let screen = draw(&mut renderer);
        assert!(screen.contains("⚠"));
        assert!(screen.contains("Advertencia"));
        assert!(screen.contains("Low disk space"));
        assert!(screen.contains("Aceptar"));
        assert!(screen.contains("Cancelar"));
        assert_eq!(renderer.view().unwrap().accent, crate::tui::components::dialogs::Accent::Yellow);
    }

    #[test]
    fn test_single_button_kinds_have_no_cancel() {
        for kind in [DialogKind::Alert, DialogKind::Success, DialogKind::Error] {
            let handle = ModalHandle::new(OverlapPolicy::Queue);
            let mut renderer = ModalRenderer::new(handle.clone(), Locale::En);
            let _pending = handle.show(DialogRequest::new(kind, "msg"));

            let screen = draw(&mut renderer);
            assert!(screen.contains("Accept"), "{}", kind);
            assert!(!screen.contains("Cancel"), "{}", kind);
            assert!(renderer.layout().unwrap().cancel_button.is_none());
        }
    }

    #[test]
    fn test_empty_message_still_dismissable() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let _pending = handle.show_error("", None);
        let screen = draw(&mut renderer);
        assert!(screen.contains("Error"));
        assert!(screen.contains("Aceptar"));
    }

    #[tokio::test]
    async fn test_overlay_click_on_confirm_cancels() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let answer = handle.show_confirm("Delete item?", None);
        draw(&mut renderer);
        assert!(renderer.handle_mouse_event(click(0, 0)).await.unwrap());

        assert!(!answer.await);
        let screen = draw(&mut renderer);
        assert!(!screen.contains("Delete item?"));
    }

    #[tokio::test]
    async fn test_overlay_click_on_alert_accepts() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let pending = handle.show(DialogRequest::alert("Saved"));
        draw(&mut renderer);
        renderer.handle_mouse_event(click(0, 0)).await.unwrap();
        assert!(pending.await);
    }

    #[tokio::test]
    async fn test_button_clicks() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let answer = handle.show_confirm("Delete item?", None);
        draw(&mut renderer);
        let accept = renderer.layout().unwrap().accept_button;
        renderer
            .handle_mouse_event(click(accept.x + 1, accept.y + 1))
            .await
            .unwrap();
        assert!(answer.await);

        let answer = handle.show_confirm("Delete item?", None);
        draw(&mut renderer);
        let layout = renderer.layout().unwrap();
        let body = layout.dialog_area;
        renderer.handle_mouse_event(click(body.x + 1, body.y + 1)).await.unwrap();
        assert!(handle.is_open());

        let cancel = layout.cancel_button.unwrap();
        renderer
            .handle_mouse_event(click(cancel.x + 1, cancel.y + 1))
            .await
            .unwrap();
        assert!(!answer.await);
    }

    #[tokio::test]
    async fn test_keyboard() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let answer = handle.show_warning("Low disk space", None);
        renderer.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(handle.session().unwrap().focus, DialogButton::Cancel);
        renderer.handle_key_event(key(KeyCode::Enter)).await.unwrap();
        assert!(!answer.await);

        let answer = handle.show_confirm("Delete item?", None);
        renderer.handle_key_event(key(KeyCode::Char('y'))).await.unwrap();
        assert!(answer.await);

        let answer = handle.show_confirm("Delete item?", None);
        renderer.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        assert!(!answer.await);

        let done = handle.show_success("Guardado", None);
        // 'n' means nothing on a dialog without cancel, but the key is still captured
        assert!(renderer.handle_key_event(key(KeyCode::Char('n'))).await.unwrap());
        assert!(handle.is_open());
        renderer.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        done.await;
    }

    #[test]
    fn test_focused_button_border_uses_focus_colour() {
        let theme = Theme::default();
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);
        let _pending = handle.show_confirm("Delete item?", None);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                renderer.render(frame, area, &theme);
            })
            .unwrap();

        let layout = renderer.layout().unwrap();
        let cancel = layout.cancel_button.unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(
            buffer.get(layout.accept_button.x, layout.accept_button.y).fg,
            theme.border_focus
        );
        assert_eq!(buffer.get(cancel.x, cancel.y).fg, theme.border);
    }

    #[tokio::test]
    async fn test_tiny_terminals_render_and_dismiss() {
        for (width, height) in [(2, 24), (80, 2), (1, 1), (80, 5)] {
            let handle = ModalHandle::new(OverlapPolicy::Queue);
            let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

            let answer = handle.show_confirm("Delete item?", None);
            draw_sized(&mut renderer, width, height);
            assert!(renderer.is_visible(), "{}x{}", width, height);

            renderer.handle_key_event(key(KeyCode::Esc)).await.unwrap();
            assert!(!answer.await, "{}x{}", width, height);
            assert!(!handle.is_open());
        }
    }

    #[tokio::test]
    async fn test_narrow_terminal_click_dismisses() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle.clone(), Locale::Es);

        let done = handle.show_alert("Saved", None);
        draw_sized(&mut renderer, 2, 24);
        let layout = renderer.layout().unwrap();
        assert!(layout.accept_button.is_empty());

        renderer.handle_mouse_event(click(0, 0)).await.unwrap();
        done.await;
        assert!(!handle.is_open());
    }

    #[tokio::test]
    async fn test_input_passes_through_when_closed() {
        let handle = ModalHandle::new(OverlapPolicy::Queue);
        let mut renderer = ModalRenderer::new(handle, Locale::Es);

        assert!(!renderer.handle_key_event(key(KeyCode::Enter)).await.unwrap());
        assert!(!renderer.handle_mouse_event(click(1, 1)).await.unwrap());
    }
}
