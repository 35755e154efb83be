//! Form options and configuration loading

use crate::error::Result;
use crate::state::FormState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Called with the submitted snapshot once a submit passes every gate
pub type SubmitCallback = Arc<dyn Fn(&FormState) + Send + Sync>;

/// Form-level check run after per-field validation; `false` blocks the submit
pub type FormValidator = Arc<dyn Fn(&FormState) -> bool + Send + Sync>;

/// Callbacks for one form instance
#[derive(Clone, Default)]
pub struct FormConfig {
    pub on_submit: Option<SubmitCallback>,
    pub on_validate: Option<FormValidator>,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_submit(mut self, callback: impl Fn(&FormState) + Send + Sync + 'static) -> Self {
        self.on_submit = Some(Arc::new(callback));
        self
    }

    pub fn on_validate(
        mut self,
        validator: impl Fn(&FormState) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.on_validate = Some(Arc::new(validator));
        self
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("on_submit", &self.on_submit.is_some())
            .field("on_validate", &self.on_validate.is_some())
            .finish()
    }
}

/// When per-field validity is recomputed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// Recompute validity on every value change
    #[default]
    OnChange,
    /// Keep validity frozen until a submit is attempted
    OnSubmit,
}

/// Behavioural options for one form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Reinitialize the form after a successful submit
    pub clear_after_submit: bool,
    /// Validation timing
    pub validation_mode: ValidationMode,
}

impl FormOptions {
    /// Options that defer validation until submit
    pub fn validate_on_submit() -> Self {
        Self {
            validation_mode: ValidationMode::OnSubmit,
            ..Default::default()
        }
    }

    /// Builder-style toggle for clearing after submit
    pub fn with_clear_after_submit(mut self, clear: bool) -> Self {
        self.clear_after_submit = clear;
        self
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No form options at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save options as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub(crate) fn defers_validation(&self) -> bool {
        self.validation_mode == ValidationMode::OnSubmit
    }
}
