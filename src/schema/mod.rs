//! Entity shapes and input validation shared by the server and the client.
//!
//! Validators take a raw, untyped JSON payload and return either a typed,
//! normalized record or a [`ValidationErrors`] list. Expected validation
//! failures never panic and never go through the store.

pub mod email;
pub mod product;
pub mod signup;

pub use email::{Email, EmailError};
pub use product::{
    validate_new_product, validate_product_patch, DashboardStats, NewProduct, Product,
    ProductFilter, ProductPatch,
};
pub use signup::{validate_new_signup, NewSignup, SignupUser};

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Path of the offending field; `None` when the payload as a whole is wrong.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Ordered list of violations, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first() {
            Some(violation) => write!(f, "{}", violation.message),
            None => write!(f, "Invalid input"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violation reported to callers.
    pub fn first(&self) -> Option<&FieldViolation> {
        self.violations.first()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl From<FieldViolation> for ValidationErrors {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

/// Name of a JSON value's type, as reported in type mismatch messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of a JSON object while collecting every violation.
pub(crate) struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(payload: &'a Value) -> Self {
        let mut errors = ValidationErrors::default();
        let object = match payload {
            Value::Object(map) => Some(map),
            other => {
                errors.push(FieldViolation::payload(format!(
                    "Expected object, received {}",
                    json_type(other)
                )));
                None
            }
        };
        Self { object, errors }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.object.and_then(|map| map.get(field))
    }

    pub(crate) fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub(crate) fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldViolation::new(field, message));
    }

    /// Required string, trimmed. Missing fields yield "Required".
    pub(crate) fn required_string(&mut self, field: &str) -> Option<String> {
        if self.object.is_none() {
            return None;
        }
        match self.get(field) {
            None => {
                self.reject(field, "Required");
                None
            }
            Some(value) => self.string_value(field, value),
        }
    }

    /// Optional string, trimmed. Absent and `null` both mean "not provided".
    pub(crate) fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.string_value(field, value),
        }
    }

    fn string_value(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.trim().to_string()),
            other => {
                self.reject(
                    field,
                    format!("Expected string, received {}", json_type(other)),
                );
                None
            }
        }
    }

    pub(crate) fn required_decimal(&mut self, field: &str) -> Option<Decimal> {
        if self.object.is_none() {
            return None;
        }
        match self.get(field) {
            None => {
                self.reject(field, "Required");
                None
            }
            Some(value) => self.decimal_value(field, value),
        }
    }

    pub(crate) fn optional_decimal(&mut self, field: &str) -> Option<Decimal> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.decimal_value(field, value),
        }
    }

    fn decimal_value(&mut self, field: &str, value: &Value) -> Option<Decimal> {
        let Value::Number(number) = value else {
            self.reject(
                field,
                format!("Expected number, received {}", json_type(value)),
            );
            return None;
        };
        let text = number.to_string();
        match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
            Ok(decimal) => Some(decimal),
            Err(_) => {
                self.reject(field, "Number is out of range");
                None
            }
        }
    }

    /// Hands back the built record, or every violation collected on the way.
    pub(crate) fn finish<T>(self, record: Option<T>) -> Result<T, ValidationErrors> {
        match record {
            Some(record) if self.errors.is_empty() => Ok(record),
            _ if self.errors.is_empty() => Err(FieldViolation::payload("Invalid input").into()),
            _ => Err(self.errors),
        }
    }
}
