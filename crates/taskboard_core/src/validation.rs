//! Declarative field validation.
//!
//! # Responsibility
//! - Check one raw field value against optional declared constraints.
//!
//! # Invariants
//! - An absent constraint is never checked (it does not mean zero).
//! - Length bounds apply only to text; range bounds apply only to numbers.
//! - Text length is measured in chars after trimming surrounding whitespace.

use serde::{Deserialize, Serialize};

/// Runtime kind of a raw field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            // Numbers always print as something non-empty (even NaN).
            Self::Number(_) => false,
        }
    }
}

/// Constraint set declared for one field, without its value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldRules {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }

    /// Pairs these rules with a value to check.
    pub fn bind(&self, value: FieldValue) -> Validatable {
        Validatable {
            value,
            rules: self.clone(),
        }
    }
}

/// A value plus the constraints it must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: FieldValue,
    pub rules: FieldRules,
}

/// Returns `true` iff every declared constraint applicable to the value kind holds.
///
/// NaN numbers fail any declared range bound.
pub fn validate(input: &Validatable) -> bool {
    let rules = &input.rules;
    if rules.required && input.value.is_blank() {
        return false;
    }

    match &input.value {
        FieldValue::Text(text) => {
            let length = text.trim().chars().count();
            let min_ok = rules.min_length.map_or(true, |min| length >= min);
            let max_ok = rules.max_length.map_or(true, |max| length <= max);
            min_ok && max_ok
        }
        FieldValue::Number(number) => {
            let min_ok = rules.min.map_or(true, |min| *number >= min);
            let max_ok = rules.max.map_or(true, |max| *number <= max);
            min_ok && max_ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate, FieldRules, FieldValue};

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    #[test]
    fn required_rejects_blank_text() {
        let rules = FieldRules::required();
        assert!(!validate(&rules.bind(text("   "))));
        assert!(validate(&rules.bind(text("x"))));
    }

    #[test]
    fn absent_constraints_are_not_checked() {
        let rules = FieldRules::default();
        assert!(validate(&rules.bind(text(""))));
        assert!(validate(&rules.bind(FieldValue::Number(-3.0))));
    }

    #[test]
    fn length_bounds_use_trimmed_char_count() {
        let rules = FieldRules::required().min_length(5).max_length(6);
        assert!(validate(&rules.bind(text("  héllo  "))));
        assert!(!validate(&rules.bind(text("  hey  "))));
        assert!(!validate(&rules.bind(text("toolong"))));
    }

    #[test]
    fn length_bounds_ignore_numbers_and_range_bounds_ignore_text() {
        let length_only = FieldRules::default().min_length(10);
        assert!(validate(&length_only.bind(FieldValue::Number(1.0))));

        let range_only = FieldRules::default().min(100.0);
        assert!(validate(&range_only.bind(text("short"))));
    }

    #[test]
    fn nan_fails_declared_range() {
        let rules = FieldRules::required().min(1.0);
        assert!(!validate(&rules.bind(FieldValue::Number(f64::NAN))));
        assert!(validate(&FieldRules::required().bind(FieldValue::Number(f64::NAN))));
    }
}
