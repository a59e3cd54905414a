use std::{collections::BTreeMap, fmt::Display};

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Field is absent, empty or blank.
    Required,
    /// Field value is not among the allowed values.
    In,
    /// Any other rule, carried by its garde message.
    Other(String),
}

impl Rule {
    pub fn code(&self) -> &str {
        match self {
            Rule::Required => "required",
            Rule::In => "in",
            Rule::Other(message) => message,
        }
    }

    fn from_code(code: &str) -> Self {
        match code {
            "required" => Rule::Required,
            "in" => Rule::In,
            other => Rule::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}.{}", .rule.code())]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}

/// All field errors of one rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionErrors {
    errors: Vec<ValidationError>,
}

impl SubmissionErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn has(&self, field: &str, rule: Rule) -> bool {
        self.errors.iter().any(|e| e.field == field && e.rule == rule)
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| &e.rule)
    }
}

impl Display for SubmissionErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SubmissionErrors {}

impl From<garde::Report> for SubmissionErrors {
    fn from(report: garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                ValidationError::new(path.to_string(), Rule::from_code(error.message()))
            })
            .collect();
        Self { errors }
    }
}

impl Serialize for SubmissionErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut fields: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for e in &self.errors {
            fields.entry(e.field.as_str()).or_default().push(e.rule.code());
        }
        fields.serialize(serializer)
    }
}
