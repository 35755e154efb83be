//! Field validation rules

use super::declarations::FieldDeclarations;
use super::field::{FieldDeclaration, FieldValue, SelectValidationRules, TextValidationRules};
use std::panic::{self, AssertUnwindSafe};

/// Check whether `value` satisfies the rules declared for field `name`
///
/// Checkbox values are always valid. Fields that are unknown or carry no
/// rules of their own are valid as well.
pub fn is_field_valid(name: &str, declarations: &FieldDeclarations, value: &FieldValue) -> bool {
    let text = match value {
        FieldValue::Checked(_) => return true,
        FieldValue::Text(text) => text.as_str(),
    };

    match declarations.get(name) {
        Some(FieldDeclaration::Text { validation, .. }) => text_is_valid(name, validation, text),
        Some(FieldDeclaration::Select { validation }) => select_is_valid(validation, text),
        Some(FieldDeclaration::Checkbox | FieldDeclaration::Other) | None => true,
    }
}

fn text_is_valid(name: &str, rules: &TextValidationRules, value: &str) -> bool {
    let length = value.chars().count();

    if rules.required && length == 0 {
        return false;
    }

    if rules.min_length.is_some_and(|min| length < min) {
        return false;
    }

    if rules.max_length.is_some_and(|max| length > max) {
        return false;
    }

    if rules.pattern.as_ref().is_some_and(|re| !re.is_match(value)) {
        return false;
    }

    if rules.numeric && !is_numeric(value) {
        return false;
    }

    if let Some(custom) = &rules.custom {
        let context = format!("custom rule for field '{name}'");
        if !guard_predicate(&context, || custom.check(value)) {
            return false;
        }
    }

    true
}

// Selects only honour `required`
fn select_is_valid(rules: &SelectValidationRules, value: &str) -> bool {
    !(rules.required && value.is_empty())
}

/// Number coercion used by the `numeric` rule
///
/// Blank input counts as a number (emptiness is the `required` rule's job).
/// Accepts an optional sign, decimal notation with fraction and exponent,
/// `Infinity`, and unsigned `0x`/`0o`/`0b` integer literals.
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }

    const RADIX_PREFIXES: [(&str, u32); 6] = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];

    for (prefix, radix) in RADIX_PREFIXES {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    let unsigned = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }

    unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && trimmed.parse::<f64>().is_ok()
}

/// Run a user predicate, treating a panic as a failed check
pub(crate) fn guard_predicate(context: &str, predicate: impl FnOnce() -> bool) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(predicate)) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{context} panicked; treating the value as invalid");
            false
        }
    }
}
