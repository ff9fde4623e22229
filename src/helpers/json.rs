use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    pub field_name: String,
    pub message: String,
}

impl FieldMessage {
    pub fn new(field_name: &str, message: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            message: message.to_string(),
        }
    }

    /// Flattens serde_valid's nested error tree into one entry per message,
    /// keyed by the camelCase path of the offending field.
    pub fn from_validation(errors: &serde_valid::validation::Errors) -> Vec<Self> {
        let mut messages = vec![];
        match serde_json::to_value(errors) {
            Ok(tree) => collect_messages(&tree, "", &mut messages),
            Err(err) => {
                tracing::error!("Failed to serialize validation errors: {:?}", err);
                messages.push(Self::new("", &errors.to_string()));
            }
        }
        messages
    }
}

fn collect_messages(tree: &Value, path: &str, messages: &mut Vec<FieldMessage>) {
    if let Some(errors) = tree.get("errors").and_then(Value::as_array) {
        for error in errors {
            let message = match error.as_str() {
                Some(message) => message.to_string(),
                None => error.to_string(),
            };
            messages.push(FieldMessage::new(path, &message));
        }
    }

    if let Some(properties) = tree.get("properties").and_then(Value::as_object) {
        for (name, nested) in properties {
            let name = to_camel_case(name);
            let nested_path = match path.is_empty() {
                true => name,
                false => format!("{}.{}", path, name),
            };
            collect_messages(nested, &nested_path, messages);
        }
    }

    if let Some(items) = tree.get("items").and_then(Value::as_object) {
        for (index, nested) in items {
            collect_messages(nested, &format!("{}[{}]", path, index), messages);
        }
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Body of every error response: `{timestamp, status, error, message, path}`,
/// plus `fieldMessages` for validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_messages: Vec<FieldMessage>,
}

impl ErrorResponse {
    pub fn build(status: StatusCode, error: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.to_string(),
            message: "".to_string(),
            path: "".to_string(),
            field_messages: vec![],
        }
    }

    pub fn set_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn set_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn set_field_messages(mut self, field_messages: Vec<FieldMessage>) -> Self {
        self.field_messages = field_messages;
        self
    }
}
