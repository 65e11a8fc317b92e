use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<(KeyCode, KeyModifiers)>,
    pub help: &'static str,
    pub description: &'static str,
}

impl KeyBinding {
    pub fn new(keys: &[(KeyCode, KeyModifiers)], help: &'static str, description: &'static str) -> Self {
        Self {
            keys: keys.to_vec(),
            help,
            description,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys
            .iter()
            .any(|(code, modifiers)| *code == event.code && *modifiers == event.modifiers)
    }
}

/// Application key mappings for the demo shell
///
/// Dialog keys are handled by the dialog renderer and are not listed here.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Quit even while a dialog is open
    pub force_quit: KeyBinding,
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub select: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        Self {
            force_quit: KeyBinding::new(
                &[(KeyCode::Char('c'), KeyModifiers::CONTROL)],
                "ctrl+c",
                "quit",
            ),
            quit: KeyBinding::new(&[(KeyCode::Char('q'), none)], "q", "quit"),
            help: KeyBinding::new(
                &[(KeyCode::Char('?'), none), (KeyCode::Char('?'), KeyModifiers::SHIFT)],
                "?",
                "toggle help",
            ),
            up: KeyBinding::new(
                &[(KeyCode::Up, none), (KeyCode::Char('k'), none)],
                "↑/k",
                "previous action",
            ),
            down: KeyBinding::new(
                &[(KeyCode::Down, none), (KeyCode::Char('j'), none)],
                "↓/j",
                "next action",
            ),
            select: KeyBinding::new(&[(KeyCode::Enter, none)], "enter", "run action"),
        }
    }
}

impl KeyMap {
    pub fn should_force_quit(&self, event: &KeyEvent) -> bool {
        self.force_quit.matches(event)
    }

    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event) || self.force_quit.matches(event)
    }

    pub fn should_show_help(&self, event: &KeyEvent) -> bool {
        self.help.matches(event)
    }

    /// Help text for the shell bindings plus the dialog keys
    pub fn help_text(&self) -> String {
        let mut lines: Vec<String> = [&self.up, &self.down, &self.select, &self.help, &self.quit]
            .iter()
            .map(|binding| format!("{:<10} {}", binding.help, binding.description))
            .collect();
        lines.push(String::new());
        lines.push(format!("{:<10} {}", "enter", "activate focused button"));
        lines.push(format!("{:<10} {}", "tab/←/→", "move focus"));
        lines.push(format!("{:<10} {}", "y / n", "accept / cancel"));
        lines.push(format!("{:<10} {}", "esc", "dismiss dialog"));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_bindings() {
        let keys = KeyMap::default();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);

        assert!(keys.should_quit(&q));
        assert!(!keys.should_force_quit(&q));
        assert!(keys.should_force_quit(&ctrl_c));
        assert!(keys.should_quit(&ctrl_c));
        assert!(!keys.should_quit(&c));
    }

    #[test]
    fn test_help_text_lists_dialog_keys() {
        let help = KeyMap::default().help_text();
        assert!(help.contains("run action"));
        assert!(help.contains("dismiss dialog"));
    }
}
