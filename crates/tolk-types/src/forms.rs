use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use phf::{phf_map, phf_set};
use serde::{Deserialize, Serialize};

use crate::error::{Rule, ValidationError};

/// Plural categories, keyed by CLDR category name, with their display labels.
pub static PLURAL_FORMS: phf::Map<&'static str, &'static str> = phf_map! {
    "zero" => "Zero",
    "one" => "One",
    "two" => "Two",
    "few" => "Few",
    "many" => "Many",
    "other" => "Other",
};

pub static GENDER_FORMS: phf::Set<&'static str> = phf_set! {
    "masculine",
    "feminine",
    "neuter",
};

pub fn plural_label(key: &str) -> Option<&'static str> {
    PLURAL_FORMS.get(key).copied()
}

pub fn is_gender_form(key: &str) -> bool {
    GENDER_FORMS.contains(key)
}

pub fn is_allowed_form(key: &str) -> bool {
    PLURAL_FORMS.contains_key(key) || GENDER_FORMS.contains(key)
}

/// All keys a submitted `form` may take: plural keys together with gender forms.
pub fn allowed_forms() -> BTreeSet<&'static str> {
    PLURAL_FORMS
        .keys()
        .copied()
        .chain(GENDER_FORMS.iter().copied())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Plural,
    Gender,
}

/// Grammatical form tag, always one of the catalog keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Form(&'static str);

impl Form {
    pub fn key(&self) -> &'static str {
        self.0
    }

    pub fn kind(&self) -> FormKind {
        if is_gender_form(self.0) {
            FormKind::Gender
        } else {
            FormKind::Plural
        }
    }

    /// Human readable label, gender forms are labeled by their key.
    pub fn label(&self) -> &'static str {
        plural_label(self.0).unwrap_or(self.0)
    }
}

impl FromStr for Form {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PLURAL_FORMS
            .get_key(s)
            .or_else(|| GENDER_FORMS.get_key(s))
            .map(|key| Form(*key))
            .ok_or_else(|| ValidationError::new("form", Rule::In))
    }
}

impl AsRef<str> for Form {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Form {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Form {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
