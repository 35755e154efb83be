//! Form domain layer
//!
//! Field declarations, the validation engine, and the pure transition
//! functions that move a `FormState` from one snapshot to the next.

mod declarations;
mod events;
mod field;
mod form_state;
mod validation;

pub use declarations::FieldDeclarations;
pub use events::{ChangeEvent, ElementKind, SubmitEvent};
pub use field::{
    CustomRule, FieldDeclaration, FieldState, FieldValue, SelectValidationRules, TextKind,
    TextValidationRules,
};
pub use form_state::FormState;
pub use validation::{is_field_valid, is_numeric};

pub(crate) use validation::guard_predicate;
