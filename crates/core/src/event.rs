//! Photo-gallery events.
//!
//! An event groups captioned photos under a title, a date and an
//! [`EventType`]. The server derives `qr_code` and `permalink` on create;
//! the client never sends them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentSet;
use crate::error::CoreError;
use crate::payload::{FormPayload, Payload};
use crate::resource::{require, require_text, Draft, Resource};
use crate::types::{wire_date, RecordId};

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Kind of photographed event. Unknown server values decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Corporate,
    Birthday,
    Anniversary,
    #[serde(other)]
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Wedding,
        EventType::Corporate,
        EventType::Birthday,
        EventType::Anniversary,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Corporate => "Corporate",
            EventType::Birthday => "Birthday",
            EventType::Anniversary => "Anniversary",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown event type: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored gallery photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventImage {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEvent {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub title: String,
    pub date: String,
    pub event_type: EventType,
    #[serde(default)]
    pub images: Vec<EventImage>,
    #[serde(rename = "qr_code", default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Resource for PhotoEvent {
    const PATH: &'static str = "photos";
    const NOUN: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.title, self.event_type.as_str()]
    }
}

impl PhotoEvent {
    /// File name used when saving this event's QR code: whitespace runs
    /// in the title become `_`.
    pub fn qr_file_name(&self) -> String {
        let stem = self.title.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{stem}-QR.png")
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Form state for creating a photo event.
#[derive(Debug, Default)]
pub struct PhotoEventDraft {
    pub title: String,
    pub event_type: Option<EventType>,
    pub date: Option<NaiveDate>,
    pub images: AttachmentSet,
}

impl PhotoEventDraft {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Draft for PhotoEventDraft {
    type Record = PhotoEvent;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require("event type", &self.event_type)?;
        require("date", &self.date)?;
        if self.images.is_empty() {
            return Err(CoreError::Validation(
                "at least one image is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Multipart body: scalar fields, then one `images` file part and one
    /// `captions` text part per photo, in picking order.
    fn to_payload(&self) -> Payload {
        let mut form = FormPayload::new()
            .text("title", self.title.as_str())
            .text(
                "eventType",
                self.event_type.map(|t| t.as_str()).unwrap_or_default(),
            )
            .text("date", self.date.map(wire_date).unwrap_or_default());

        for image in self.images.iter() {
            form = form
                .file("images", &image.attachment)
                .text("captions", image.caption.as_str());
        }
        Payload::Form(form)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::attachment::{Attachment, PreviewRegistry};

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn filled_draft(registry: &PreviewRegistry) -> PhotoEventDraft {
        let mut draft = PhotoEventDraft::new();
        draft.title = "Spring Gala".to_string();
        draft.event_type = Some(EventType::Corporate);
        draft.date = NaiveDate::from_ymd_opt(2024, 4, 12);
        for name in ["a.png", "b.png"] {
            draft
                .images
                .push(Attachment::from_bytes(registry, name, PNG_HEADER.to_vec()).unwrap());
        }
        draft.images.set_caption(1, "Stage").unwrap();
        draft
    }

    #[test]
    fn decodes_server_record() {
        let json = serde_json::json!({
            "_id": "66a1",
            "title": "Spring Gala",
            "date": "2024-04-12T00:00:00.000Z",
            "eventType": "Corporate",
            "images": [{ "_id": "i1", "url": "https://cdn/a.png", "caption": "Hall" }],
            "qr_code": "https://cdn/qr.png",
            "permalink": "spring-gala",
            "createdAt": "2024-04-01T10:00:00.000Z",
            "updatedAt": "2024-04-01T10:00:00.000Z"
        });
        let event: PhotoEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.id, "66a1");
        assert_eq!(event.event_type, EventType::Corporate);
        assert_eq!(event.images[0].caption, "Hall");
        assert_eq!(event.qr_code.as_deref(), Some("https://cdn/qr.png"));
    }

    #[test]
    fn unknown_event_type_decodes_as_other() {
        let event: EventType = serde_json::from_str("\"Graduation\"").unwrap();
        assert_eq!(event, EventType::Other);
    }

    #[test]
    fn event_type_parses_case_insensitively() {
        assert_eq!("wedding".parse::<EventType>().unwrap(), EventType::Wedding);
        assert_matches!("gala".parse::<EventType>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn qr_file_name_collapses_whitespace() {
        let event: PhotoEvent = serde_json::from_value(serde_json::json!({
            "_id": "1", "title": "Spring  Gala 2024", "date": "2024-04-12", "eventType": "Other"
        }))
        .unwrap();
        assert_eq!(event.qr_file_name(), "Spring_Gala_2024-QR.png");
    }

    #[test]
    fn payload_pairs_each_image_with_its_caption() {
        let registry = PreviewRegistry::new();
        let draft = filled_draft(&registry);
        let Payload::Form(form) = draft.to_payload() else {
            panic!("expected multipart payload");
        };
        assert_eq!(form.text_value("title"), Some("Spring Gala"));
        assert_eq!(form.text_value("eventType"), Some("Corporate"));
        assert_eq!(form.text_value("date"), Some("2024-04-12"));
        assert_eq!(form.file_names("images"), vec!["a.png", "b.png"]);
        assert_eq!(form.text_values("captions"), vec!["", "Stage"]);
    }

    #[test]
    fn validation_requires_images() {
        let registry = PreviewRegistry::new();
        let mut draft = filled_draft(&registry);
        draft.images.clear();
        assert_matches!(draft.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reset_clears_fields_and_releases_previews() {
        let registry = PreviewRegistry::new();
        let mut draft = filled_draft(&registry);
        assert_eq!(registry.live(), 2);
        draft.reset();
        assert!(draft.title.is_empty());
        assert!(draft.event_type.is_none());
        assert!(draft.date.is_none());
        assert!(draft.images.is_empty());
        assert_eq!(registry.live(), 0);
    }
}
