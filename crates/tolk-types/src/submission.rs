use garde::Validate;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::{
    error::{Rule, SubmissionErrors, ValidationError},
    forms::{is_allowed_form, Form},
};

/// One field of a request body as it arrived: missing, explicit `null`, text or anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submitted {
    #[default]
    Missing,
    Null,
    Text(String),
    /// Number, boolean, array or object.
    NotText,
}

impl Submitted {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Submitted::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Submitted::Missing)
    }
}

impl From<Option<String>> for Submitted {
    fn from(value: Option<String>) -> Self {
        value.map(Submitted::Text).unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    NotText(IgnoredAny),
}

// Only called for keys present in the body, missing ones fall back to `Default`.
impl<'de> Deserialize<'de> for Submitted {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawField>::deserialize(deserializer)? {
            None => Submitted::Null,
            Some(RawField::Text(text)) => Submitted::Text(text),
            Some(RawField::NotText(_)) => Submitted::NotText,
        })
    }
}

fn required_text(value: &Submitted, _ctx: &()) -> garde::Result {
    match value.as_text() {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(garde::Error::new(Rule::Required.code())),
    }
}

// Missing form is not checked at all, anything present (even empty or null) must be a catalog key.
fn allowed_form(form: &Submitted, _ctx: &()) -> garde::Result {
    match form {
        Submitted::Missing => Ok(()),
        Submitted::Text(f) if is_allowed_form(f) => Ok(()),
        _ => Err(garde::Error::new(Rule::In.code())),
    }
}

/// Raw submission of a message value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StoreMessageValue {
    #[garde(custom(required_text))]
    #[serde(default)]
    pub value: Submitted,
    #[garde(custom(allowed_form))]
    #[serde(default)]
    pub form: Submitted,
}

impl StoreMessageValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Submitted::Text(value.into()),
            form: Submitted::Missing,
        }
    }

    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Submitted::Text(form.into());
        self
    }

    /// Checks all fields and either returns a submission ready to be stored
    /// or every field error found.
    pub fn validate_submission(&self) -> Result<ValidMessageValue, SubmissionErrors> {
        self.validate()?;

        let value = self
            .value
            .as_text()
            .ok_or_else(|| ValidationError::new("value", Rule::Required))?
            .to_string();
        let form = if self.form.is_missing() {
            None
        } else {
            let key = self
                .form
                .as_text()
                .ok_or_else(|| ValidationError::new("form", Rule::In))?;
            Some(key.parse::<Form>()?)
        };
        Ok(ValidMessageValue { value, form })
    }
}

impl From<ValidationError> for SubmissionErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = SubmissionErrors::default();
        errors.push(error);
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidMessageValue {
    pub value: String,
    pub form: Option<Form>,
}
