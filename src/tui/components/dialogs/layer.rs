//! Dialog geometry and hit testing
//!
//! The same layout drives drawing and mouse handling, so a click always lands
//! on what was drawn.

use super::view::DialogView;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 30;
const MAX_WIDTH: u16 = 60;
const BUTTON_WIDTH: u16 = 14;
const BUTTON_HEIGHT: u16 = 3;

/// What lies under a point of the screen while a dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogHit {
    /// Outside the dialog box
    Overlay,
    /// Inside the box but not on a button
    Body,
    Accept,
    Cancel,
}

/// Layout of an open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    /// Full area covered by the overlay
    pub overlay: Rect,
    /// Dialog box including its border
    pub dialog_area: Rect,
    /// Icon and title rows
    pub header_area: Rect,
    /// Wrapped message
    pub message_area: Rect,
    pub accept_button: Rect,
    pub cancel_button: Option<Rect>,
}

impl DialogLayout {
    pub fn calculate(available_area: Rect, view: &DialogView) -> Self {
        let width = MAX_WIDTH
            .min(available_area.width.saturating_sub(4))
            .max(MIN_WIDTH.min(available_area.width));
        let inner_width = width.saturating_sub(4).max(1);

        let message_lines = wrapped_line_count(&view.message, inner_width as usize).max(1);
        let message_lines = u16::try_from(message_lines).unwrap_or(u16::MAX);
        // border + icon + title + gap + message + gap + buttons + border
        let wanted_height = message_lines.saturating_add(5 + BUTTON_HEIGHT + 1);
        let height = wanted_height.min(available_area.height);

        let x = available_area.x + available_area.width.saturating_sub(width) / 2;
        let y = available_area.y + available_area.height.saturating_sub(height) / 2;
        let dialog_area = Rect {
            x,
            y,
            width,
            height,
        }
        .intersection(available_area);

        // Every rect below is clipped to its parent: on a tiny frame parts of
        // the dialog collapse to empty areas instead of leaving the buffer.
        let inner = Rect {
            x: dialog_area.x.saturating_add(2),
            y: dialog_area.y.saturating_add(1),
            width: inner_width,
            height: dialog_area.height.saturating_sub(2),
        }
        .intersection(dialog_area);

        let header_area = Rect {
            height: 2.min(inner.height),
            ..inner
        };

        let buttons_y = inner.bottom().saturating_sub(BUTTON_HEIGHT).max(inner.y);
        let message_top = header_area.bottom().saturating_add(1);
        let message_area = Rect {
            x: inner.x,
            y: message_top.min(buttons_y),
            width: inner.width,
            height: buttons_y.saturating_sub(message_top.saturating_add(1)),
        }
        .intersection(inner);

        // Wide enough for the longest label plus border and padding
        let longest_label = view
            .cancel_label
            .as_deref()
            .map_or(0, UnicodeWidthStr::width)
            .max(view.accept_label.width());
        let longest_label = u16::try_from(longest_label).unwrap_or(u16::MAX);
        let gap = 2;
        let room = if view.has_cancel() {
            inner.width.saturating_sub(gap) / 2
        } else {
            inner.width
        };
        let button_width = BUTTON_WIDTH
            .max(longest_label.saturating_add(4))
            .min(room)
            .max(1);
        let (accept_button, cancel_button) = if view.has_cancel() {
            let total = button_width * 2 + gap;
            let start = inner.x + inner.width.saturating_sub(total) / 2;
            let cancel = Rect::new(start, buttons_y, button_width, BUTTON_HEIGHT);
            let accept = Rect::new(start + button_width + gap, buttons_y, button_width, BUTTON_HEIGHT);
            (accept.intersection(inner), Some(cancel.intersection(inner)))
        } else {
            let start = inner.x + inner.width.saturating_sub(button_width) / 2;
            (
                Rect::new(start, buttons_y, button_width, BUTTON_HEIGHT).intersection(inner),
                None,
            )
        };

        Self {
            overlay: available_area,
            dialog_area,
            header_area,
            message_area,
            accept_button,
            cancel_button,
        }
    }

    /// Classify a point; buttons win over the body
    pub fn hit(&self, x: u16, y: u16) -> DialogHit {
        if contains(&self.accept_button, x, y) {
            return DialogHit::Accept;
        }
        if let Some(cancel) = &self.cancel_button {
            if contains(cancel, x, y) {
                return DialogHit::Cancel;
            }
        }
        if contains(&self.dialog_area, x, y) {
            DialogHit::Body
        } else {
            DialogHit::Overlay
        }
    }
}

fn contains(area: &Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Line count of `text` wrapped at `width` columns
fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.lines().map(|line| textwrap::wrap(line, width).len()).sum()
}
