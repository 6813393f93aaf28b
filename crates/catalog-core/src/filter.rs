//! Equality filters built from query parameters
//!
//! Each `field=value` pair becomes one [`Predicate`]; a record matches a
//! [`Filter`] when it satisfies all of them. Text compares ignore case,
//! everything else compares exactly.

use crate::record::{FieldValue, Record};
use crate::schema::validator::{check_float_bounds, check_integer_bounds};
use crate::schema::{FieldError, FieldKind, Schema, ValidationError};

/// Expected value of a predicate, already parsed to the field's type
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Stored lowercased
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: &'static str,
    pub expected: Expected,
}

impl Predicate {
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match (record.field(self.field), &self.expected) {
            (Some(FieldValue::Text(actual)), Expected::Text(wanted)) => {
                actual.to_lowercase() == *wanted
            }
            (Some(FieldValue::Integer(actual)), Expected::Integer(wanted)) => actual == *wanted,
            (Some(FieldValue::Float(actual)), Expected::Float(wanted)) => actual == *wanted,
            (Some(FieldValue::Bool(actual)), Expected::Bool(wanted)) => actual == *wanted,
            _ => false,
        }
    }
}

/// Conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub predicates: Vec<Predicate>,
}

impl Filter {
    /// Parse query parameters against a schema.
    ///
    /// Unknown fields, unparsable values and numeric values outside the
    /// field's declared range are rejected.
    pub fn parse(schema: &Schema, params: &[(String, String)]) -> Result<Self, ValidationError> {
        let mut predicates = Vec::with_capacity(params.len());
        let mut errors = Vec::new();

        for (name, raw) in params {
            let Some(spec) = schema.field(name) else {
                errors.push(FieldError::new(
                    name.as_str(),
                    "unknown_field",
                    format!("{} has no field named '{}'", schema.kind, name),
                ));
                continue;
            };

            match parse_expected(spec.name, &spec.kind, raw) {
                Ok(expected) => predicates.push(Predicate {
                    field: spec.name,
                    expected,
                }),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(Self { predicates })
        } else {
            Err(ValidationError::new(errors))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

fn parse_expected(field: &'static str, kind: &FieldKind, raw: &str) -> Result<Expected, FieldError> {
    let invalid = || {
        FieldError::new(
            field,
            "type",
            format!("'{}' is not a valid {}", raw, kind.type_name()),
        )
    };

    match kind {
        FieldKind::Text { .. } => Ok(Expected::Text(raw.to_lowercase())),
        FieldKind::Integer { min, max } => {
            let n: i64 = raw.trim().parse().map_err(|_| invalid())?;
            check_integer_bounds(field, n, *min, *max)?;
            Ok(Expected::Integer(n))
        }
        FieldKind::Float { min, max } => {
            let n: f64 = raw.trim().parse().map_err(|_| invalid())?;
            if !n.is_finite() {
                return Err(invalid());
            }
            check_float_bounds(field, n, *min, *max)?;
            Ok(Expected::Float(n))
        }
        FieldKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Expected::Bool(true)),
            "false" | "0" => Ok(Expected::Bool(false)),
            _ => Err(invalid()),
        },
    }
}
