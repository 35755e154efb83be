//! Form-level aggregates: validity, submit, reset and the submit button

use super::binding::FieldBinding;
use super::store::StateStore;
use crate::config::{FormConfig, FormOptions, ValidationMode};
use crate::state::{guard_predicate, FieldDeclarations, FormState, SubmitEvent};
use std::collections::BTreeMap;
use std::sync::Arc;

pub type ResetHandler = Arc<dyn Fn() + Send + Sync>;
pub type SubmitHandler = Arc<dyn Fn(&SubmitEvent) -> SubmitOutcome + Send + Sync>;

/// What a submit attempt ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The callback ran
    Submitted,
    /// At least one field is invalid
    Invalid,
    /// The form-level validator refused the submit
    Rejected,
}

/// True iff every field is valid; an empty form is valid
pub fn is_form_valid(fields: &BTreeMap<String, FieldBinding>) -> bool {
    fields.values().all(|field| field.is_valid)
}

/// Handler that puts the form back into its initial state
pub fn reset_handler(
    declarations: &Arc<FieldDeclarations>,
    store: &Arc<dyn StateStore>,
) -> ResetHandler {
    let declarations = Arc::clone(declarations);
    let store = Arc::clone(store);
    Arc::new(move || {
        tracing::debug!("Resetting form");
        store.update(&|_| FormState::reset(&declarations));
    })
}

/// Submit handler, present only when an `on_submit` callback is configured
pub fn submit_handler(
    declarations: &Arc<FieldDeclarations>,
    config: &FormConfig,
    options: FormOptions,
    store: &Arc<dyn StateStore>,
) -> Option<SubmitHandler> {
    config.on_submit.as_ref()?;

    let declarations = Arc::clone(declarations);
    let config = config.clone();
    let store = Arc::clone(store);
    Some(Arc::new(move |event: &SubmitEvent| {
        submit(&declarations, &config, options, &*store, event)
    }))
}

/// Run one submit attempt against the store's current snapshot
pub fn submit(
    declarations: &FieldDeclarations,
    config: &FormConfig,
    options: FormOptions,
    store: &dyn StateStore,
    event: &SubmitEvent,
) -> SubmitOutcome {
    event.prevent_default();

    let Some(on_submit) = &config.on_submit else {
        return SubmitOutcome::Invalid;
    };

    let state = match options.validation_mode {
        ValidationMode::OnSubmit => {
            // Commit revealed validity before any callback can touch the store
            let validated = store.update(&|current| current.validate_all(declarations));
            if !validated.is_valid() {
                tracing::debug!("Submit blocked: fields invalid after validation");
                return SubmitOutcome::Invalid;
            }
            validated
        }
        ValidationMode::OnChange => {
            let current = store.snapshot();
            if !current.is_valid() {
                tracing::debug!("Submit blocked: form is invalid");
                return SubmitOutcome::Invalid;
            }
            current
        }
    };

    if let Some(on_validate) = &config.on_validate {
        if !guard_predicate("form validator", || on_validate(&state)) {
            tracing::debug!("Submit blocked by form validator");
            return SubmitOutcome::Rejected;
        }
    }

    on_submit(&state);
    tracing::debug!("Form submitted with {} field(s)", state.len());

    if options.clear_after_submit {
        store.update(&|_| FormState::initialize(declarations));
    }

    SubmitOutcome::Submitted
}

/// Ready-made properties for a submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub is_disabled: bool,
    pub props: SubmitButtonProps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButtonProps {
    pub button_type: &'static str,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn new(form_is_valid: bool) -> Self {
        Self {
            is_disabled: !form_is_valid,
            props: SubmitButtonProps {
                button_type: "submit",
                disabled: !form_is_valid,
            },
        }
    }
}
