//! Per-field bindings handed to a rendering surface
//!
//! A binding pairs the display attributes of one control with the handlers
//! that feed its events back into the form. Handlers only ever transition
//! their own field.

use super::store::StateStore;
use crate::config::FormOptions;
use crate::state::{
    ChangeEvent, FieldDeclaration, FieldDeclarations, FieldState, FieldValue, FormState, TextKind,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type ChangeHandler = Arc<dyn Fn(ChangeEvent) + Send + Sync>;
pub type FocusHandler = Arc<dyn Fn() + Send + Sync>;

/// Display attributes for one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayProps {
    Checkbox { checked: bool, value: String },
    Text { kind: TextKind, value: String },
    Select { value: String },
}

impl DisplayProps {
    fn for_field(decl: &FieldDeclaration, value: &FieldValue) -> Self {
        match decl {
            FieldDeclaration::Checkbox => Self::Checkbox {
                checked: value.is_checked(),
                value: value.display_value(),
            },
            FieldDeclaration::Text { kind, .. } => Self::Text {
                kind: *kind,
                value: value.as_text().to_string(),
            },
            FieldDeclaration::Other => Self::Text {
                kind: TextKind::Text,
                value: value.as_text().to_string(),
            },
            FieldDeclaration::Select { .. } => Self::Select {
                value: value.as_text().to_string(),
            },
        }
    }

    /// The `type` attribute for input controls; selects have none
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            Self::Checkbox { .. } => Some("checkbox"),
            Self::Text { kind, .. } => Some(kind.as_str()),
            Self::Select { .. } => None,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Checkbox { value, .. } | Self::Text { value, .. } | Self::Select { value } => {
                value
            }
        }
    }

    /// Checked flag (false for anything but a checkbox)
    pub fn checked(&self) -> bool {
        matches!(self, Self::Checkbox { checked: true, .. })
    }
}

/// Display attributes merged with event handlers
#[derive(Clone)]
pub struct InputProps {
    pub display: DisplayProps,
    pub on_change: ChangeHandler,
    /// Only present for text-like controls
    pub on_focus: Option<FocusHandler>,
    /// Only present for text-like controls
    pub on_blur: Option<FocusHandler>,
}

impl fmt::Debug for InputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProps")
            .field("display", &self.display)
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish_non_exhaustive()
    }
}

/// Render-ready view of one field
#[derive(Debug, Clone)]
pub struct FieldBinding {
    pub props: InputProps,
    pub is_valid: bool,
    pub is_focussed: bool,
    pub is_pristine: bool,
    pub is_dirty: bool,
    pub is_touched: bool,
    pub is_untouched: bool,
}

impl FieldBinding {
    /// Deliver a change event to the field
    pub fn change(&self, event: ChangeEvent) {
        (self.props.on_change)(event);
    }

    /// Deliver a focus event; a no-op for controls without focus tracking
    pub fn focus(&self) {
        if let Some(on_focus) = &self.props.on_focus {
            on_focus();
        }
    }

    /// Deliver a blur event; a no-op for controls without focus tracking
    pub fn blur(&self) {
        if let Some(on_blur) = &self.props.on_blur {
            on_blur();
        }
    }
}

/// Build the binding for every declared field
///
/// `state` supplies what is displayed; `store` is where handlers commit the
/// next state.
pub fn build_bindings(
    declarations: &Arc<FieldDeclarations>,
    state: &FormState,
    options: FormOptions,
    store: &Arc<dyn StateStore>,
) -> BTreeMap<String, FieldBinding> {
    declarations
        .iter()
        .filter_map(|(name, decl)| {
            let Some(field) = state.get(name) else {
                tracing::debug!("No state for declared field '{name}', skipping binding");
                return None;
            };
            let binding = build_binding(name, decl, field, declarations, options, store);
            Some((name.to_string(), binding))
        })
        .collect()
}

fn build_binding(
    name: &str,
    decl: &FieldDeclaration,
    field: &FieldState,
    declarations: &Arc<FieldDeclarations>,
    options: FormOptions,
    store: &Arc<dyn StateStore>,
) -> FieldBinding {
    let name: Arc<str> = Arc::from(name);

    let on_change: ChangeHandler = {
        let name = Arc::clone(&name);
        let declarations = Arc::clone(declarations);
        let store = Arc::clone(store);
        Arc::new(move |event: ChangeEvent| {
            store.update(&|current| current.with_change(&name, &declarations, &options, &event));
        })
    };

    let (on_focus, on_blur) = if decl.tracks_focus() {
        let focus: FocusHandler = {
            let name = Arc::clone(&name);
            let store = Arc::clone(store);
            Arc::new(move || {
                store.update(&|current| current.with_focus(&name));
            })
        };
        let blur: FocusHandler = {
            let name = Arc::clone(&name);
            let store = Arc::clone(store);
            Arc::new(move || {
                store.update(&|current| current.with_blur(&name));
            })
        };
        (Some(focus), Some(blur))
    } else {
        (None, None)
    };

    FieldBinding {
        props: InputProps {
            display: DisplayProps::for_field(decl, field.value()),
            on_change,
            on_focus,
            on_blur,
        },
        is_valid: field.is_valid(),
        is_focussed: field.is_focussed(),
        is_pristine: field.is_pristine(),
        is_dirty: field.is_dirty(),
        is_touched: field.is_touched(),
        is_untouched: field.is_untouched(),
    }
}
