//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::EngineFactory;
use crate::storage::ObjectStore;

use super::AppController;

impl<S, F> AppController<S, F>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.model.set_should_quit(true);
            return;
        }

        // Handle error message first (blocks all other interactions)
        if self.model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.model.clear_notification();
            }
            return;
        }

        if self.model.ui_state.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.model.toggle_help_popup();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true),
            KeyCode::Char('?') => self.model.toggle_help_popup(),

            KeyCode::Up | KeyCode::Char('k') => self.model.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.model.move_selection_down(),
            KeyCode::Home | KeyCode::Char('g') => self.model.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.model.select_last(),

            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate_selected(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_back(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh(),
            KeyCode::Esc => self.model.clear_notification(),

            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_track(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.previous_track(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.stop_playback(),

            KeyCode::Char(']') => self.seek_forward(),
            KeyCode::Char('[') => self.seek_backward(),
            KeyCode::Char(c @ '0'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.seek_to_tenth(digit);
                }
            }

            KeyCode::Char('+') | KeyCode::Char('=') => self.volume_up(),
            KeyCode::Char('-') => self.volume_down(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_mute(),

            KeyCode::Char('d') | KeyCode::Char('D') => self.download_selected(),
            _ => {}
        }
    }
}
