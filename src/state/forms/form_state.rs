//! Form state and its transition functions
//!
//! `FormState` is an immutable snapshot. Every transition returns a new
//! snapshot; entries that did not change are shared with the previous one
//! through `Arc`, the changed entry is freshly allocated.

use super::declarations::FieldDeclarations;
use super::events::{ChangeEvent, ElementKind};
use super::field::{FieldDeclaration, FieldState, FieldValue};
use super::validation::is_field_valid;
use crate::config::FormOptions;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Snapshot of every declared field's state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: BTreeMap<String, Arc<FieldState>>,
}

impl FormState {
    /// Build the initial state: default values, pristine, untouched, unfocused
    pub fn initialize(declarations: &FieldDeclarations) -> Self {
        let fields = declarations
            .iter()
            .map(|(name, decl)| {
                let value = decl.default_value();
                let valid = is_field_valid(name, declarations, &value);
                (name.to_string(), Arc::new(FieldState::initial(value, valid)))
            })
            .collect();

        Self { fields }
    }

    /// Return to the initial state
    pub fn reset(declarations: &FieldDeclarations) -> Self {
        Self::initialize(declarations)
    }

    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name).map(Arc::as_ref)
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields
            .iter()
            .map(|(name, state)| (name.as_str(), state.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every field is valid (vacuously true for an empty form)
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|field| field.is_valid())
    }

    /// Whether both snapshots hold the very same allocation for `name`
    pub fn shares_field(&self, other: &FormState, name: &str) -> bool {
        match (self.fields.get(name), other.fields.get(name)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Apply a value change reported by the control bound to `name`
    ///
    /// Checkbox declarations always take the checked flag so the value stays
    /// boolean. Select changes mark the field dirty and touched at once; text
    /// changes only mark it dirty. Validity is recomputed unless the form
    /// validates on submit.
    pub fn with_change(
        &self,
        name: &str,
        declarations: &FieldDeclarations,
        options: &FormOptions,
        event: &ChangeEvent,
    ) -> Self {
        let Some(decl) = declarations.get(name) else {
            tracing::debug!("Ignoring change for undeclared field '{name}'");
            return self.clone();
        };
        let defer_validation = options.defers_validation();

        self.update_field(name, |field| match (decl, event.element) {
            (FieldDeclaration::Checkbox, _) => {
                field.set_value(FieldValue::Checked(event.checked));
                field.mark_dirty();
                field.mark_touched();
            }
            (_, ElementKind::Select) => {
                let value = FieldValue::Text(event.value.clone());
                if !defer_validation {
                    field.set_valid(is_field_valid(name, declarations, &value));
                }
                field.set_value(value);
                field.mark_dirty();
                field.mark_touched();
            }
            (_, ElementKind::Input) => {
                let value = FieldValue::Text(event.value.clone());
                if !defer_validation {
                    field.set_valid(is_field_valid(name, declarations, &value));
                }
                field.set_value(value);
                field.mark_dirty();
            }
        })
    }

    /// Mark `name` as focussed
    pub fn with_focus(&self, name: &str) -> Self {
        self.update_field(name, |field| field.set_focussed(true))
    }

    /// Mark `name` as blurred, which also makes it touched
    pub fn with_blur(&self, name: &str) -> Self {
        self.update_field(name, |field| {
            field.set_focussed(false);
            field.mark_touched();
        })
    }

    /// Recompute every field's validity against its current value
    pub fn validate_all(&self, declarations: &FieldDeclarations) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|(name, state)| {
                let valid = is_field_valid(name, declarations, state.value());
                let entry = if valid == state.is_valid() {
                    Arc::clone(state)
                } else {
                    let mut updated = FieldState::clone(state);
                    updated.set_valid(valid);
                    Arc::new(updated)
                };
                (name.clone(), entry)
            })
            .collect();

        Self { fields }
    }

    fn update_field(&self, name: &str, update: impl FnOnce(&mut FieldState)) -> Self {
        let Some(current) = self.fields.get(name) else {
            tracing::debug!("Ignoring transition for unknown field '{name}'");
            return self.clone();
        };

        let mut updated = FieldState::clone(current);
        update(&mut updated);
        tracing::trace!("Field '{name}' -> {updated:?}");

        let mut fields = self.fields.clone();
        fields.insert(name.to_string(), Arc::new(updated));
        Self { fields }
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{SelectValidationRules, TextValidationRules};
    use regex::Regex;

    fn text_form(rules: TextValidationRules) -> FieldDeclarations {
        FieldDeclarations::new().text("testField", rules)
    }

    fn mixed_form() -> FieldDeclarations {
        FieldDeclarations::new()
            .text("name", TextValidationRules::new().required())
            .password("secret", TextValidationRules::new().min_length(4))
            .checkbox("terms")
            .select("country", SelectValidationRules::new().required())
    }

    fn field<'a>(state: &'a FormState, name: &str) -> &'a FieldState {
        state.get(name).unwrap()
    }

    mod initialize {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_every_field_starts_pristine_and_untouched() {
            let state = FormState::initialize(&mixed_form());
            assert_eq!(state.len(), 4);
            for (_, field) in state.iter() {
                assert!(field.is_pristine());
                assert!(!field.is_dirty());
                assert!(field.is_untouched());
                assert!(!field.is_touched());
                assert!(!field.is_focussed());
            }
        }

        #[test]
        fn test_default_values_by_kind() {
            let state = FormState::initialize(&mixed_form());
            assert_eq!(field(&state, "terms").value(), &FieldValue::Checked(false));
            assert_eq!(field(&state, "name").value(), &FieldValue::Text(String::new()));
            assert_eq!(field(&state, "country").value(), &FieldValue::Text(String::new()));
        }

        #[test]
        fn test_validity_is_precomputed() {
            let state = FormState::initialize(&mixed_form());
            assert!(!field(&state, "name").is_valid());
            assert!(!field(&state, "secret").is_valid());
            assert!(field(&state, "terms").is_valid());
            assert!(!field(&state, "country").is_valid());
            assert!(!state.is_valid());
        }

        #[test]
        fn test_empty_declarations() {
            let state = FormState::initialize(&FieldDeclarations::new());
            assert!(state.is_empty());
            assert!(state.is_valid());
        }

        #[test]
        fn test_reset_is_idempotent() {
            let decls = mixed_form();
            let once = FormState::reset(&decls);
            let twice = FormState::reset(&decls);
            assert_eq!(once, twice);
            assert_eq!(once, FormState::initialize(&decls));
        }
    }

    mod text_changes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_change_marks_dirty_but_not_touched() {
            let decls = text_form(TextValidationRules::new());
            let state = FormState::initialize(&decls).with_change(
                "testField",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::input("dirty field"),
            );
            let f = field(&state, "testField");
            assert!(f.is_dirty());
            assert!(!f.is_pristine());
            assert!(f.is_untouched());
            assert_eq!(f.value().as_text(), "dirty field");
        }

        #[test]
        fn test_min_max_validation_follows_changes() {
            let decls = text_form(TextValidationRules::new().min_length(1).max_length(10));
            let options = FormOptions::default();
            let state = FormState::initialize(&decls);
            assert!(!field(&state, "testField").is_valid());

            let state =
                state.with_change("testField", &decls, &options, &ChangeEvent::input("correct"));
            assert!(field(&state, "testField").is_valid());

            let state = state.with_change(
                "testField",
                &decls,
                &options,
                &ChangeEvent::input("over max length text"),
            );
            assert!(!field(&state, "testField").is_valid());
        }

        #[test]
        fn test_pattern_validation_follows_changes() {
            let decls = text_form(
                TextValidationRules::new().pattern(Regex::new(r"specific [A-Z]+").unwrap()),
            );
            let options = FormOptions::default();
            let state = FormState::initialize(&decls);

            let state =
                state.with_change("testField", &decls, &options, &ChangeEvent::input("not a match"));
            assert!(!field(&state, "testField").is_valid());

            let state = state.with_change(
                "testField",
                &decls,
                &options,
                &ChangeEvent::input("specific MATCH"),
            );
            assert!(field(&state, "testField").is_valid());
        }

        #[test]
        fn test_on_submit_mode_keeps_prior_validity() {
            let decls = text_form(TextValidationRules::new().required());
            let options = FormOptions::validate_on_submit();
            let state = FormState::initialize(&decls);
            assert!(!field(&state, "testField").is_valid());

            let state = state.with_change("testField", &decls, &options, &ChangeEvent::input("ok"));
            let f = field(&state, "testField");
            assert!(!f.is_valid());
            assert!(f.is_dirty());
            assert_eq!(f.value().as_text(), "ok");
        }

        #[test]
        fn test_other_kind_behaves_as_plain_input() {
            let decls = FieldDeclarations::new().with("legacy", FieldDeclaration::Other);
            let state = FormState::initialize(&decls).with_change(
                "legacy",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::input("anything"),
            );
            let f = field(&state, "legacy");
            assert!(f.is_valid());
            assert!(f.is_dirty());
            assert!(f.is_untouched());
        }
    }

    mod checkbox_changes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_change_marks_dirty_and_touched() {
            let decls = FieldDeclarations::new().checkbox("testField");
            let state = FormState::initialize(&decls).with_change(
                "testField",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::checkbox(true),
            );
            let f = field(&state, "testField");
            assert!(f.is_touched());
            assert!(f.is_dirty());
            assert!(!f.is_untouched());
            assert!(!f.is_pristine());
            assert_eq!(f.value(), &FieldValue::Checked(true));
        }

        #[test]
        fn test_always_valid_in_every_mode() {
            let decls = FieldDeclarations::new().checkbox("testField");
            for options in [FormOptions::default(), FormOptions::validate_on_submit()] {
                let mut state = FormState::initialize(&decls);
                for checked in [true, false, true] {
                    state = state.with_change(
                        "testField",
                        &decls,
                        &options,
                        &ChangeEvent::checkbox(checked),
                    );
                    assert!(field(&state, "testField").is_valid());
                    assert!(field(&state, "testField").is_dirty());
                    assert!(field(&state, "testField").is_touched());
                }
            }
        }

        #[test]
        fn test_mismatched_element_keeps_boolean_value() {
            let decls = FieldDeclarations::new().checkbox("testField");
            let state = FormState::initialize(&decls).with_change(
                "testField",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::select("on"),
            );
            assert_eq!(field(&state, "testField").value(), &FieldValue::Checked(false));
        }
    }

    mod select_changes {
        use super::*;

        fn select_form() -> FieldDeclarations {
            FieldDeclarations::new().select("testField", SelectValidationRules::new().required())
        }

        #[test]
        fn test_required_validity() {
            let decls = select_form();
            let options = FormOptions::default();
            let state = FormState::initialize(&decls);
            assert!(!field(&state, "testField").is_valid());

            let state =
                state.with_change("testField", &decls, &options, &ChangeEvent::select("selected"));
            assert!(field(&state, "testField").is_valid());

            let state = state.with_change("testField", &decls, &options, &ChangeEvent::select(""));
            assert!(!field(&state, "testField").is_valid());
        }

        #[test]
        fn test_change_marks_dirty_and_touched() {
            let decls = select_form();
            let state = FormState::initialize(&decls).with_change(
                "testField",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::select("selected"),
            );
            let f = field(&state, "testField");
            assert!(f.is_dirty());
            assert!(f.is_touched());
            assert!(!f.is_focussed());
        }

        #[test]
        fn test_on_submit_mode_defers_validity() {
            let decls = select_form();
            let state = FormState::initialize(&decls).with_change(
                "testField",
                &decls,
                &FormOptions::validate_on_submit(),
                &ChangeEvent::select("selected"),
            );
            assert!(!field(&state, "testField").is_valid());
            assert!(field(&state, "testField").is_touched());
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn test_focus_then_blur() {
            let decls = text_form(TextValidationRules::new());
            let state = FormState::initialize(&decls);

            let focussed = state.with_focus("testField");
            assert!(field(&focussed, "testField").is_focussed());
            assert!(field(&focussed, "testField").is_untouched());

            let blurred = focussed.with_blur("testField");
            let f = field(&blurred, "testField");
            assert!(!f.is_focussed());
            assert!(f.is_touched());
            assert!(!f.is_untouched());
            assert!(f.is_pristine());
        }

        #[test]
        fn test_blur_without_focus_touches() {
            let decls = text_form(TextValidationRules::new());
            let state = FormState::initialize(&decls).with_blur("testField");
            assert!(field(&state, "testField").is_touched());
        }
    }

    mod immutability {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_transition_leaves_previous_snapshot_untouched() {
            let decls = mixed_form();
            let before = FormState::initialize(&decls);
            let after = before.with_change(
                "name",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::input("Ada"),
            );

            assert!(field(&before, "name").is_pristine());
            assert_eq!(field(&before, "name").value().as_text(), "");
            assert_eq!(field(&after, "name").value().as_text(), "Ada");
        }

        #[test]
        fn test_unchanged_entries_are_shared() {
            let decls = mixed_form();
            let before = FormState::initialize(&decls);
            let after = before.with_focus("name");

            assert!(!after.shares_field(&before, "name"));
            assert!(after.shares_field(&before, "secret"));
            assert!(after.shares_field(&before, "terms"));
            assert!(after.shares_field(&before, "country"));
        }

        #[test]
        fn test_unknown_field_is_noop() {
            let decls = mixed_form();
            let state = FormState::initialize(&decls);

            let changed = state.with_change(
                "missing",
                &decls,
                &FormOptions::default(),
                &ChangeEvent::input("x"),
            );
            assert_eq!(changed, state);
            assert_eq!(state.with_focus("missing"), state);
            assert_eq!(state.with_blur("missing"), state);
        }
    }

    mod validate_all {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reveals_deferred_validity() {
            let decls = mixed_form();
            let options = FormOptions::validate_on_submit();
            let state = FormState::initialize(&decls)
                .with_change("name", &decls, &options, &ChangeEvent::input("Ada"))
                .with_change("secret", &decls, &options, &ChangeEvent::input("hunter22"))
                .with_change("country", &decls, &options, &ChangeEvent::select("NZ"));
            assert!(!state.is_valid());

            let validated = state.validate_all(&decls);
            assert!(validated.is_valid());
        }

        #[test]
        fn test_shares_entries_whose_validity_is_unchanged() {
            let decls = mixed_form();
            let state = FormState::initialize(&decls);
            let validated = state.validate_all(&decls);

            assert_eq!(validated, state);
            for name in ["name", "secret", "terms", "country"] {
                assert!(validated.shares_field(&state, name));
            }
        }
    }

    mod serialization {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_snapshot_json() {
            let decls = FieldDeclarations::new().checkbox("terms").text("name", TextValidationRules::new());
            let state = FormState::initialize(&decls);
            let json = serde_json::to_value(&state).unwrap();

            assert_eq!(json["terms"]["value"], serde_json::json!(false));
            assert_eq!(json["name"]["value"], serde_json::json!(""));
            assert_eq!(json["name"]["isPristine"], serde_json::json!(true));
        }
    }
}
