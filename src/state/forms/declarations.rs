//! The set of field declarations for one form
//!
//! Declarations are usually built in code, but can also be loaded from a JSON
//! object keyed by field name:
//!
//! ```json
//! {
//!   "username": { "type": "text", "validation": { "required": true, "maxLength": 20 } },
//!   "secret":   { "type": "password", "validation": { "minLength": 8 } },
//!   "country":  { "type": "select", "validation": { "required": true } },
//!   "terms":    { "type": "checkbox" }
//! }
//! ```

use super::field::{FieldDeclaration, SelectValidationRules, TextKind, TextValidationRules};
use crate::error::{FormError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Immutable mapping of field name to declaration
#[derive(Debug, Clone, Default)]
pub struct FieldDeclarations {
    fields: BTreeMap<String, FieldDeclaration>,
}

impl FieldDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a declaration
    pub fn with(mut self, name: impl Into<String>, declaration: FieldDeclaration) -> Self {
        self.fields.insert(name.into(), declaration);
        self
    }

    pub fn text(self, name: impl Into<String>, validation: TextValidationRules) -> Self {
        self.with(name, FieldDeclaration::text(validation))
    }

    pub fn password(self, name: impl Into<String>, validation: TextValidationRules) -> Self {
        self.with(name, FieldDeclaration::password(validation))
    }

    pub fn checkbox(self, name: impl Into<String>) -> Self {
        self.with(name, FieldDeclaration::Checkbox)
    }

    pub fn select(self, name: impl Into<String>, validation: SelectValidationRules) -> Self {
        self.with(name, FieldDeclaration::select(validation))
    }

    pub fn get(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate declarations in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDeclaration)> {
        self.fields.iter().map(|(name, decl)| (name.as_str(), decl))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse declarations from a JSON object keyed by field name
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawDeclaration> = serde_json::from_str(json)?;
        raw.into_iter()
            .map(|(name, decl)| {
                let decl = decl.into_declaration(&name)?;
                Ok::<_, FormError>((name, decl))
            })
            .collect()
    }

    /// Load declarations from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl<N: Into<String>> FromIterator<(N, FieldDeclaration)> for FieldDeclarations {
    fn from_iter<I: IntoIterator<Item = (N, FieldDeclaration)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, decl)| (name.into(), decl))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawDeclaration {
    Text {
        #[serde(default)]
        validation: RawTextRules,
    },
    Password {
        #[serde(default)]
        validation: RawTextRules,
    },
    Checkbox,
    Select {
        #[serde(default)]
        validation: RawSelectRules,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTextRules {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    #[serde(alias = "regexp")]
    pattern: Option<String>,
    #[serde(alias = "isNumeric")]
    numeric: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSelectRules {
    required: bool,
    min_length: Option<usize>,
}

impl RawDeclaration {
    fn into_declaration(self, name: &str) -> Result<FieldDeclaration> {
        let decl = match self {
            Self::Text { validation } => FieldDeclaration::Text {
                kind: TextKind::Text,
                validation: validation.into_rules(name)?,
            },
            Self::Password { validation } => FieldDeclaration::Text {
                kind: TextKind::Password,
                validation: validation.into_rules(name)?,
            },
            Self::Checkbox => FieldDeclaration::Checkbox,
            Self::Select { validation } => FieldDeclaration::Select {
                validation: SelectValidationRules {
                    required: validation.required,
                    min_length: validation.min_length,
                },
            },
            Self::Other => {
                tracing::debug!("Field '{name}' has an unsupported type, treating it as plain input");
                FieldDeclaration::Other
            }
        };
        Ok(decl)
    }
}

impl RawTextRules {
    fn into_rules(self, name: &str) -> Result<TextValidationRules> {
        let pattern = self
            .pattern
            .map(|p| Regex::new(&p))
            .transpose()
            .map_err(|source| FormError::InvalidPattern {
                field: name.to_string(),
                source,
            })?;

        Ok(TextValidationRules {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern,
            numeric: self.numeric,
            custom: None,
        })
    }
}
