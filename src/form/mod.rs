//! Binding, aggregation and orchestration on top of the form domain layer
//!
//! - `store`: the state-update primitive a form is driven through
//! - `binding`: per-field display props and event handlers
//! - `aggregator`: form validity, submit and reset
//! - `hook`: `use_form`, tying the above to one form instance

mod aggregator;
mod binding;
mod hook;
mod store;

pub use aggregator::{
    is_form_valid, reset_handler, submit, submit_handler, ResetHandler, SubmitButton,
    SubmitButtonProps, SubmitHandler, SubmitOutcome,
};
pub use binding::{build_bindings, ChangeHandler, DisplayProps, FieldBinding, FocusHandler, InputProps};
pub use hook::{use_form, FormControls, FormHook, FormOutput, FormProps};
pub use store::{FormStore, StateStore};
