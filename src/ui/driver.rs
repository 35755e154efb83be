//! Translate terminal key events into form events

use super::focus::FocusRing;
use crate::form::{DisplayProps, FieldBinding, FormOutput, SubmitOutcome};
use crate::state::{ChangeEvent, FieldDeclarations, SubmitEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// What a key press did to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The named field received a change event
    Changed(String),
    /// Focus moved to another row
    FocusMoved,
    /// A submit was attempted
    Submitted(SubmitOutcome),
    /// The form was reset
    Reset,
    /// Nothing happened
    Ignored,
}

/// Keyboard driver for one terminal form
///
/// Works on the output of the latest render; callers re-render after every
/// handled key.
#[derive(Debug, Clone)]
pub struct TerminalDriver {
    focus: FocusRing,
    choices: HashMap<String, Vec<String>>,
}

impl TerminalDriver {
    pub fn new(declarations: &FieldDeclarations) -> Self {
        Self {
            focus: FocusRing::new(declarations),
            choices: HashMap::new(),
        }
    }

    /// Options a select field cycles through with Left/Right
    pub fn with_choices(mut self, field: impl Into<String>, choices: Vec<String>) -> Self {
        self.choices.insert(field.into(), choices);
        self
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    /// Deliver the initial focus event to the first row
    pub fn start(&self, output: &FormOutput) {
        if let Some(field) = self.active_binding(output) {
            field.focus();
        }
    }

    pub fn handle_key(&mut self, output: &FormOutput, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Ignored;
        }

        match key.code {
            KeyCode::Tab => self.move_focus(output, FocusRing::next),
            KeyCode::BackTab => self.move_focus(output, FocusRing::prev),
            KeyCode::Esc => {
                output.reset();
                KeyOutcome::Reset
            }
            KeyCode::Enter if self.focus.is_button_row_active() => output
                .submit(&SubmitEvent::new())
                .map_or(KeyOutcome::Ignored, KeyOutcome::Submitted),
            KeyCode::Enter => self.move_focus(output, FocusRing::next),
            _ => self.edit_active(output, key),
        }
    }

    fn active_binding<'a>(&self, output: &'a FormOutput) -> Option<&'a FieldBinding> {
        self.focus.active_field().and_then(|name| output.field(name))
    }

    fn move_focus(&mut self, output: &FormOutput, step: fn(&mut FocusRing)) -> KeyOutcome {
        if let Some(field) = self.active_binding(output) {
            field.blur();
        }
        step(&mut self.focus);
        if let Some(field) = self.active_binding(output) {
            field.focus();
        }
        KeyOutcome::FocusMoved
    }

    fn edit_active(&self, output: &FormOutput, key: KeyEvent) -> KeyOutcome {
        let Some(name) = self.focus.active_field() else {
            return KeyOutcome::Ignored;
        };
        let Some(field) = output.field(name) else {
            return KeyOutcome::Ignored;
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return KeyOutcome::Ignored;
        }

        let event = match (&field.props.display, key.code) {
            (DisplayProps::Checkbox { checked, .. }, KeyCode::Char(' ')) => {
                ChangeEvent::checkbox(!checked)
            }
            (DisplayProps::Text { value, .. }, KeyCode::Char(c)) => {
                let mut next = value.clone();
                next.push(c);
                ChangeEvent::input(next)
            }
            (DisplayProps::Text { value, .. }, KeyCode::Backspace) => {
                let mut next = value.clone();
                if next.pop().is_none() {
                    return KeyOutcome::Ignored;
                }
                ChangeEvent::input(next)
            }
            (DisplayProps::Select { value }, KeyCode::Left | KeyCode::Right) => {
                let Some(choice) = self.cycle_choice(name, value, key.code == KeyCode::Right)
                else {
                    return KeyOutcome::Ignored;
                };
                ChangeEvent::select(choice)
            }
            _ => return KeyOutcome::Ignored,
        };

        field.change(event);
        KeyOutcome::Changed(name.to_string())
    }

    fn cycle_choice(&self, name: &str, current: &str, forward: bool) -> Option<String> {
        let choices = self.choices.get(name).filter(|c| !c.is_empty())?;
        let next = match choices.iter().position(|c| c == current) {
            Some(index) if forward => (index + 1) % choices.len(),
            Some(0) => choices.len() - 1,
            Some(index) => index - 1,
            None if forward => 0,
            None => choices.len() - 1,
        };
        choices.get(next).cloned()
    }
}
