//! Press releases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::error::CoreError;
use crate::payload::{FormPayload, Payload};
use crate::resource::{require, require_text, Activatable, Draft, Resource};
use crate::types::{wire_date, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressRelease {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Resource for PressRelease {
    const PATH: &'static str = "press";
    const NOUN: &'static str = "press release";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.title, &self.source]
    }
}

impl Activatable for PressRelease {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

// ---------------------------------------------------------------------------
// TagSet
// ---------------------------------------------------------------------------

/// Growable, insertion-ordered set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Blank and already-present tags are ignored; returns
    /// whether the set changed.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.add(tag.as_ref());
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Form state for creating a press release.
#[derive(Debug)]
pub struct PressReleaseDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    /// Rich-text (HTML) body.
    pub content: String,
    pub source: String,
    pub author: String,
    pub tags: TagSet,
    pub link: String,
    pub thumbnail: Option<Attachment>,
    pub is_active: bool,
}

impl Default for PressReleaseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: None,
            content: String::new(),
            source: String::new(),
            author: String::new(),
            tags: TagSet::new(),
            link: String::new(),
            thumbnail: None,
            is_active: true,
        }
    }
}

impl PressReleaseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a thumbnail, releasing the previous one.
    pub fn set_thumbnail(&mut self, thumbnail: Attachment) {
        self.thumbnail = Some(thumbnail);
    }
}

impl Draft for PressReleaseDraft {
    type Record = PressRelease;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require("date", &self.date)?;
        require_text("source", &self.source)?;
        require_text("author", &self.author)?;
        Ok(())
    }

    /// Multipart body. `tags` travels as one JSON-encoded array and
    /// `isActive` as `"true"`/`"false"`; the thumbnail part is omitted
    /// when none was picked.
    fn to_payload(&self) -> Payload {
        let tags = serde_json::to_string(self.tags.as_slice()).unwrap_or_else(|_| "[]".into());

        let mut form = FormPayload::new()
            .text("title", self.title.as_str())
            .text("date", self.date.map(wire_date).unwrap_or_default())
            .text("content", self.content.as_str())
            .text("source", self.source.as_str())
            .text("author", self.author.as_str())
            .text("tags", tags)
            .text("link", self.link.as_str())
            .text("isActive", self.is_active.to_string());

        if let Some(thumbnail) = &self.thumbnail {
            form = form.file("thumbnail", thumbnail);
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
    use crate::attachment::PreviewRegistry;

    fn filled_draft() -> PressReleaseDraft {
        let mut draft = PressReleaseDraft::new();
        draft.title = "Launch".to_string();
        draft.date = NaiveDate::from_ymd_opt(2024, 6, 1);
        draft.content = "<p>Hello</p>".to_string();
        draft.source = "Herald".to_string();
        draft.author = "Desk".to_string();
        draft
    }

    #[test]
    fn tag_set_ignores_blank_and_duplicate_tags() {
        let mut tags = TagSet::new();
        assert!(tags.add("launch"));
        assert!(!tags.add("launch"));
        assert!(!tags.add("   "));
        assert!(tags.add(" product "));
        assert_eq!(tags.as_slice(), ["launch", "product"]);
        assert!(tags.remove("launch"));
        assert!(!tags.remove("launch"));
    }

    #[test]
    fn tags_are_sent_as_json_array_in_order() {
        let mut draft = filled_draft();
        draft.tags = ["launch", "product"].into_iter().collect();

        let Payload::Form(form) = draft.to_payload() else {
            panic!("expected multipart payload");
        };
        let raw = form.text_value("tags").unwrap();
        let decoded: Vec<String> = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded, vec!["launch", "product"]);
    }

    #[test]
    fn boolean_flag_is_stringified_and_thumbnail_omitted() {
        let mut draft = filled_draft();
        draft.is_active = false;
        let Payload::Form(form) = draft.to_payload() else {
            panic!("expected multipart payload");
        };
        assert_eq!(form.text_value("isActive"), Some("false"));
        assert!(form.file_names("thumbnail").is_empty());
        assert_eq!(form.text_value("link"), Some(""));
    }

    #[test]
    fn replacing_thumbnail_releases_previous_preview() {
        let registry = PreviewRegistry::new();
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
        let mut draft = filled_draft();
        draft.set_thumbnail(Attachment::from_bytes(&registry, "a.png", png.clone()).unwrap());
        draft.set_thumbnail(Attachment::from_bytes(&registry, "b.png", png).unwrap());
        assert_eq!(registry.live(), 1);
        draft.reset();
        assert_eq!(registry.live(), 0);
        assert!(draft.is_active);
    }

    #[test]
    fn author_is_required() {
        let mut draft = filled_draft();
        draft.author.clear();
        assert_matches!(draft.validate(), Err(CoreError::Validation(msg)) if msg.contains("author"));
    }

    #[test]
    fn missing_is_active_defaults_to_true() {
        let press: PressRelease = serde_json::from_value(serde_json::json!({
            "_id": "p1", "title": "Launch", "date": "2024-06-01"
        }))
        .unwrap();
        assert!(press.is_active);
        assert!(press.tags.is_empty());
    }
}
