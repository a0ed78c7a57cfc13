//! Transport-neutral request bodies.
//!
//! Drafts assemble a [`Payload`]; the HTTP client turns it into either a
//! JSON body or `multipart/form-data`. Keeping the assembly here makes
//! field names and encodings testable without a server.

use serde_json::Value;

use crate::attachment::Attachment;

/// A request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Form(FormPayload),
}

/// One multipart field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Ordered multipart fields. Field names may repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    fields: Vec<(String, FormValue)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields
            .push((name.to_string(), FormValue::Text(value.into())));
        self
    }

    /// Append a file field copied from `attachment`.
    pub fn file(mut self, name: &str, attachment: &Attachment) -> Self {
        self.fields.push((
            name.to_string(),
            FormValue::File {
                file_name: attachment.file_name().to_string(),
                content_type: attachment.content_type().to_string(),
                bytes: attachment.bytes().to_vec(),
            },
        ));
        self
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<(String, FormValue)> {
        self.fields
    }

    /// All text values sent under `name`, in order.
    pub fn text_values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .filter_map(|(_, v)| match v {
                FormValue::Text(t) => Some(t.as_str()),
                FormValue::File { .. } => None,
            })
            .collect()
    }

    /// The first text value sent under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text_values(name).into_iter().next()
    }

    /// File names sent under `name`, in order.
    pub fn file_names(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .filter_map(|(_, v)| match v {
                FormValue::File { file_name, .. } => Some(file_name.as_str()),
                FormValue::Text(_) => None,
            })
            .collect()
    }
}
