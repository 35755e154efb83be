//! Events delivered by the rendering surface

use std::cell::Cell;

/// Kind of control that produced a change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    /// Text, password or checkbox input
    #[default]
    Input,
    /// Drop-down select
    Select,
}

/// A value change reported by a control
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeEvent {
    pub value: String,
    pub checked: bool,
    pub element: ElementKind,
}

impl ChangeEvent {
    /// Text or password input changed to `value`
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
            element: ElementKind::Input,
        }
    }

    /// Checkbox toggled to `checked`
    pub fn checkbox(checked: bool) -> Self {
        Self {
            value: checked.to_string(),
            checked,
            element: ElementKind::Input,
        }
    }

    /// Select changed to the option `value`
    pub fn select(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
            element: ElementKind::Select,
        }
    }
}

/// A submit request; handlers suppress the surface's default action through it
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: Cell<bool>,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
