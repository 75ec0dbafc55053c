use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::{Email, FieldReader, ValidationErrors};

/// Marketing-list entrant. Never updated or deleted once captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SignupUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignup {
    pub name: String,
    pub email: Email,
}

pub fn validate_new_signup(payload: &Value) -> Result<NewSignup, ValidationErrors> {
    let mut reader = FieldReader::new(payload);

    let name = reader.required_string("name").and_then(|name| {
        if name.is_empty() {
            reader.reject("name", "Name is required");
            None
        } else {
            Some(name)
        }
    });
    let email = reader
        .required_string("email")
        .and_then(|raw| match Email::parse(&raw) {
            Ok(email) => Some(email),
            Err(err) => {
                tracing::debug!("Rejected signup email: {}", err);
                reader.reject("email", "Invalid email");
                None
            }
        });

    let record = match (name, email) {
        (Some(name), Some(email)) => Some(NewSignup { name, email }),
        _ => None,
    };
    reader.finish(record)
}
