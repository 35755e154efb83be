//! The single stateful entry point for one form instance

use super::aggregator::{
    is_form_valid, reset_handler, submit_handler, ResetHandler, SubmitButton, SubmitHandler,
    SubmitOutcome,
};
use super::binding::{build_bindings, FieldBinding};
use super::store::{FormStore, StateStore};
use crate::config::{FormConfig, FormOptions};
use crate::state::{FieldDeclarations, FormState, SubmitEvent};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Create a form instance backed by an in-process [`FormStore`]
pub fn use_form(
    declarations: FieldDeclarations,
    config: FormConfig,
    options: FormOptions,
) -> FormHook {
    FormHook::new(declarations, config, options)
}

/// Owns the declarations, callbacks and state of one form
#[derive(Clone)]
pub struct FormHook {
    declarations: Arc<FieldDeclarations>,
    config: FormConfig,
    options: FormOptions,
    store: Arc<dyn StateStore>,
}

impl FormHook {
    pub fn new(declarations: FieldDeclarations, config: FormConfig, options: FormOptions) -> Self {
        let store = Arc::new(FormStore::new(FormState::initialize(&declarations)));
        Self::with_store(declarations, config, options, store)
    }

    /// Drive the form through a host-provided state primitive
    ///
    /// The store must already hold a snapshot built by
    /// [`FormState::initialize`] for the same declarations.
    pub fn with_store(
        declarations: FieldDeclarations,
        config: FormConfig,
        options: FormOptions,
        store: Arc<dyn StateStore>,
    ) -> Self {
        tracing::debug!(
            "Form created with {} field(s), {:?}",
            declarations.len(),
            options
        );
        Self {
            declarations: Arc::new(declarations),
            config,
            options,
            store,
        }
    }

    pub fn declarations(&self) -> &FieldDeclarations {
        &self.declarations
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// Latest committed state
    pub fn state(&self) -> FormState {
        self.store.snapshot()
    }

    /// Build the output contract from the latest committed state
    pub fn render(&self) -> FormOutput {
        let state = self.store.snapshot();
        let fields = build_bindings(&self.declarations, &state, self.options, &self.store);
        let is_valid = is_form_valid(&fields);

        FormOutput {
            fields,
            form: FormControls {
                is_valid,
                reset: reset_handler(&self.declarations, &self.store),
                props: FormProps {
                    on_submit: submit_handler(
                        &self.declarations,
                        &self.config,
                        self.options,
                        &self.store,
                    ),
                },
            },
            submit_button: SubmitButton::new(is_valid),
        }
    }
}

impl fmt::Debug for FormHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormHook")
            .field("declarations", &self.declarations)
            .field("config", &self.config)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Everything a rendering surface needs for one render pass
#[derive(Debug, Clone)]
pub struct FormOutput {
    pub fields: BTreeMap<String, FieldBinding>,
    pub form: FormControls,
    pub submit_button: SubmitButton,
}

impl FormOutput {
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.get(name)
    }

    /// Invoke the reset handler
    pub fn reset(&self) {
        (self.form.reset)();
    }

    /// Invoke the submit handler, if the form has one
    pub fn submit(&self, event: &SubmitEvent) -> Option<SubmitOutcome> {
        self.form.props.on_submit.as_ref().map(|on_submit| on_submit(event))
    }
}

/// Form-level aggregates
#[derive(Clone)]
pub struct FormControls {
    pub is_valid: bool,
    pub reset: ResetHandler,
    pub props: FormProps,
}

impl fmt::Debug for FormControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormControls")
            .field("is_valid", &self.is_valid)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// Properties for the form element itself
#[derive(Clone, Default)]
pub struct FormProps {
    pub on_submit: Option<SubmitHandler>,
}

impl fmt::Debug for FormProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormProps")
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}
