//! Field declarations and per-field state value objects

use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for checkbox values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Checked(_) => "",
        }
    }

    /// Get the checked flag (returns false for text values)
    pub fn is_checked(&self) -> bool {
        match self {
            FieldValue::Checked(checked) => *checked,
            FieldValue::Text(_) => false,
        }
    }

    /// Get the value as it would be submitted by an HTML-like surface
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Checked(checked) => checked.to_string(),
        }
    }
}

/// Text input flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    #[default]
    Text,
    Password,
}

impl TextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
        }
    }
}

/// User supplied predicate over a text value
#[derive(Clone)]
pub struct CustomRule(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl CustomRule {
    pub fn new(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    pub(crate) fn check(&self, value: &str) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule(..)")
    }
}

/// Validation rules for text and password fields
///
/// Every rule is optional; present rules are applied in declaration order and
/// all of them must pass.
#[derive(Debug, Clone, Default)]
pub struct TextValidationRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub numeric: bool,
    pub custom: Option<CustomRule>,
}

impl TextValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn custom(mut self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.custom = Some(CustomRule::new(predicate));
        self
    }
}

/// Validation rules for select fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectValidationRules {
    pub required: bool,
    /// Accepted for compatibility with existing declarations; not enforced
    pub min_length: Option<usize>,
}

impl SelectValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Declaration of a single form field
#[derive(Debug, Clone)]
pub enum FieldDeclaration {
    Text {
        kind: TextKind,
        validation: TextValidationRules,
    },
    Checkbox,
    Select {
        validation: SelectValidationRules,
    },
    /// A field kind without rules of its own; handled as a plain text input
    Other,
}

impl FieldDeclaration {
    pub fn text(validation: TextValidationRules) -> Self {
        Self::Text {
            kind: TextKind::Text,
            validation,
        }
    }

    pub fn password(validation: TextValidationRules) -> Self {
        Self::Text {
            kind: TextKind::Password,
            validation,
        }
    }

    pub fn select(validation: SelectValidationRules) -> Self {
        Self::Select { validation }
    }

    /// Value a freshly initialized field holds
    pub fn default_value(&self) -> FieldValue {
        match self {
            Self::Checkbox => FieldValue::Checked(false),
            Self::Text { .. } | Self::Select { .. } | Self::Other => FieldValue::default(),
        }
    }

    /// Whether the rendering surface should wire focus and blur handlers
    pub fn tracks_focus(&self) -> bool {
        matches!(self, Self::Text { .. } | Self::Other)
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

/// Interaction and validity state of one field
///
/// Pristine/dirty and touched/untouched are each backed by a single flag, so
/// the paired accessors can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    value: FieldValue,
    dirty: bool,
    touched: bool,
    focussed: bool,
    valid: bool,
}

impl FieldState {
    pub(crate) fn initial(value: FieldValue, valid: bool) -> Self {
        Self {
            value,
            dirty: false,
            touched: false,
            focussed: false,
            valid,
        }
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_pristine(&self) -> bool {
        !self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_untouched(&self) -> bool {
        !self.touched
    }

    pub fn is_focussed(&self) -> bool {
        self.focussed
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub(crate) fn set_focussed(&mut self, focussed: bool) {
        self.focussed = focussed;
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }
}

impl Serialize for FieldState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldState", 7)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("isPristine", &self.is_pristine())?;
        state.serialize_field("isDirty", &self.is_dirty())?;
        state.serialize_field("isTouched", &self.is_touched())?;
        state.serialize_field("isUntouched", &self.is_untouched())?;
        state.serialize_field("isFocussed", &self.is_focussed())?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_value {
        use super::*;

        #[test]
        fn test_default_is_empty_text() {
            assert_eq!(FieldValue::default(), FieldValue::Text(String::new()));
        }

        #[test]
        fn test_accessors() {
            let text = FieldValue::Text("abc".to_string());
            let checked = FieldValue::Checked(true);
            assert_eq!(text.as_text(), "abc");
            assert!(!text.is_checked());
            assert_eq!(checked.as_text(), "");
            assert!(checked.is_checked());
        }

        #[test]
        fn test_display_value_stringifies_checkbox() {
            assert_eq!(FieldValue::Checked(false).display_value(), "false");
            assert_eq!(FieldValue::Text("x".into()).display_value(), "x");
        }

        #[test]
        fn test_serializes_untagged() {
            assert_eq!(
                serde_json::to_string(&FieldValue::Checked(true)).unwrap(),
                "true"
            );
            assert_eq!(
                serde_json::to_string(&FieldValue::Text("hi".into())).unwrap(),
                "\"hi\""
            );
        }
    }

    mod declaration {
        use super::*;

        #[test]
        fn test_default_values_by_kind() {
            assert_eq!(
                FieldDeclaration::Checkbox.default_value(),
                FieldValue::Checked(false)
            );
            assert_eq!(
                FieldDeclaration::text(TextValidationRules::new()).default_value(),
                FieldValue::Text(String::new())
            );
            assert_eq!(
                FieldDeclaration::select(SelectValidationRules::new()).default_value(),
                FieldValue::Text(String::new())
            );
            assert_eq!(
                FieldDeclaration::Other.default_value(),
                FieldValue::Text(String::new())
            );
        }

        #[test]
        fn test_focus_tracking_only_for_text_like() {
            assert!(FieldDeclaration::text(TextValidationRules::new()).tracks_focus());
            assert!(FieldDeclaration::password(TextValidationRules::new()).tracks_focus());
            assert!(FieldDeclaration::Other.tracks_focus());
            assert!(!FieldDeclaration::Checkbox.tracks_focus());
            assert!(!FieldDeclaration::select(SelectValidationRules::new()).tracks_focus());
        }

        #[test]
        fn test_text_rule_builder() {
            let rules = TextValidationRules::new()
                .required()
                .min_length(2)
                .max_length(8)
                .numeric()
                .custom(|v| v != "13");
            assert!(rules.required);
            assert_eq!(rules.min_length, Some(2));
            assert_eq!(rules.max_length, Some(8));
            assert!(rules.numeric);
            assert!(rules.custom.as_ref().is_some_and(|c| !c.check("13")));
        }

        #[test]
        fn test_custom_rule_debug_is_opaque() {
            let rule = CustomRule::new(|_| true);
            assert_eq!(format!("{rule:?}"), "CustomRule(..)");
        }
    }

    mod field_state {
        use super::*;

        #[test]
        fn test_initial_flags() {
            let state = FieldState::initial(FieldValue::default(), false);
            assert!(state.is_pristine());
            assert!(!state.is_dirty());
            assert!(state.is_untouched());
            assert!(!state.is_touched());
            assert!(!state.is_focussed());
            assert!(!state.is_valid());
        }

        #[test]
        fn test_paired_flags_stay_consistent() {
            let mut state = FieldState::initial(FieldValue::default(), true);
            state.mark_dirty();
            state.mark_touched();
            assert_eq!(state.is_pristine(), !state.is_dirty());
            assert_eq!(state.is_untouched(), !state.is_touched());
            assert!(state.is_dirty());
            assert!(state.is_touched());
        }

        #[test]
        fn test_serializes_camel_case() {
            let state = FieldState::initial(FieldValue::Checked(false), true);
            let json = serde_json::to_value(&state).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "value": false,
                    "isPristine": true,
                    "isDirty": false,
                    "isTouched": false,
                    "isUntouched": true,
                    "isFocussed": false,
                    "isValid": true
                })
            );
        }
    }
}
