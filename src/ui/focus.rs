//! Keyboard focus over the rows of a terminal form

use crate::state::FieldDeclarations;

/// Active row tracker: one row per field plus a trailing submit-button row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRing {
    names: Vec<String>,
    active: usize,
}

impl FocusRing {
    pub fn new(declarations: &FieldDeclarations) -> Self {
        Self {
            names: declarations.names().map(str::to_string).collect(),
            active: 0,
        }
    }

    /// Fields plus the button row
    pub fn row_count(&self) -> usize {
        self.names.len() + 1
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, index: usize) {
        self.active = index.min(self.names.len());
    }

    /// Name of the active field, `None` on the button row
    pub fn active_field(&self) -> Option<&str> {
        self.names.get(self.active).map(String::as_str)
    }

    pub fn is_button_row_active(&self) -> bool {
        self.active == self.names.len()
    }

    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    pub fn next(&mut self) {
        let count = self.row_count();
        self.set_active((self.active + 1) % count);
    }

    pub fn prev(&mut self) {
        if self.active == 0 {
            self.set_active(self.row_count() - 1);
        } else {
            self.set_active(self.active - 1);
        }
    }
}
