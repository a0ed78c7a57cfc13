//! Homepage slider items.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::error::CoreError;
use crate::ordering::{next_ordinal, Ordinal};
use crate::payload::{FormPayload, Payload};
use crate::resource::{require_text, Activatable, Draft, Resource};
use crate::types::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub order: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Resource for SliderItem {
    const PATH: &'static str = "sliders";
    const NOUN: &'static str = "slider";
    const ENVELOPE: Option<&'static str> = Some("slider");

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.title, &self.subtitle]
    }
}

impl Ordinal for SliderItem {
    fn ordinal(&self) -> i64 {
        self.order
    }

    fn set_ordinal(&mut self, ordinal: i64) {
        self.order = ordinal;
    }
}

impl Activatable for SliderItem {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Form state for the add/edit slider dialog.
#[derive(Debug)]
pub struct SliderDraft {
    /// Set when editing an existing slider.
    pub id: Option<RecordId>,
    pub title: String,
    pub subtitle: String,
    pub order: i64,
    pub is_active: bool,
    pub link: String,
    /// Newly picked image; `None` keeps the stored one on edit.
    pub image: Option<Attachment>,
    /// Image already stored on the server (edit only).
    pub existing_image_url: Option<String>,
}

impl Default for SliderDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            subtitle: String::new(),
            order: 1,
            is_active: true,
            link: String::new(),
            image: None,
            existing_image_url: None,
        }
    }
}

impl SliderDraft {
    /// A fresh draft placed after every existing slider.
    pub fn new_after(existing: &[SliderItem]) -> Self {
        Self {
            order: next_ordinal(existing),
            ..Self::default()
        }
    }

    /// A draft seeded from a stored slider.
    pub fn from_record(slider: &SliderItem) -> Self {
        Self {
            id: Some(slider.id.clone()),
            title: slider.title.clone(),
            subtitle: slider.subtitle.clone(),
            order: slider.order,
            is_active: slider.is_active,
            link: slider.link.clone().unwrap_or_default(),
            image: None,
            existing_image_url: Some(slider.image_url.clone()),
        }
    }

    /// Pick an image, releasing the previous one.
    pub fn set_image(&mut self, image: Attachment) {
        self.image = Some(image);
    }
}

impl Draft for SliderDraft {
    type Record = SliderItem;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        if self.order < 1 {
            return Err(CoreError::Validation(format!(
                "order must be >= 1, got {}",
                self.order
            )));
        }
        if self.id.is_none() && self.image.is_none() {
            return Err(CoreError::Validation(
                "an image is required for a new slider".to_string(),
            ));
        }
        Ok(())
    }

    fn to_payload(&self) -> Payload {
        let mut form = FormPayload::new()
            .text("title", self.title.as_str())
            .text("subtitle", self.subtitle.as_str())
            .text("order", self.order.to_string())
            .text("isActive", self.is_active.to_string());

        if !self.link.is_empty() {
            form = form.text("link", self.link.as_str());
        }
        if let Some(image) = &self.image {
            form = form.file("image", image);
        }
        Payload::Form(form)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
