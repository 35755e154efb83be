//! Declarative form state
//!
//! Declare fields once, then drive them through change, focus and blur
//! events. Every transition produces a new immutable [`FormState`] snapshot;
//! [`FormHook::render`] turns the latest snapshot into per-field bindings,
//! a form-level validity flag, reset and submit handlers, and submit button
//! properties.
//!
//! ```no_run
//! use simple_form_state::{use_form, ChangeEvent, FieldDeclarations, FormConfig, FormOptions, TextValidationRules};
//!
//! let declarations = FieldDeclarations::new()
//!     .text("name", TextValidationRules::new().required())
//!     .checkbox("terms");
//! let form = use_form(
//!     declarations,
//!     FormConfig::new().on_submit(|state| println!("{state:?}")),
//!     FormOptions::default(),
//! );
//!
//! let output = form.render();
//! if let Some(name) = output.field("name") {
//!     name.change(ChangeEvent::input("Ada"));
//! }
//! assert!(form.render().form.is_valid);
//! ```
//!
//! The [`ui`] module renders a form with ratatui and maps crossterm key
//! events onto the same handlers.

pub mod config;
pub mod error;
pub mod form;
pub mod state;
pub mod ui;

pub use config::{FormConfig, FormOptions, FormValidator, SubmitCallback, ValidationMode};
pub use error::{FormError, Result};
pub use form::{
    use_form, DisplayProps, FieldBinding, FormControls, FormHook, FormOutput, FormProps,
    FormStore, InputProps, StateStore, SubmitButton, SubmitButtonProps, SubmitOutcome,
};
pub use state::{
    ChangeEvent, CustomRule, ElementKind, FieldDeclaration, FieldDeclarations, FieldState,
    FieldValue, FormState, SelectValidationRules, SubmitEvent, TextKind, TextValidationRules,
};
