//! Video catalog entries. Thumbnails and links are plain URLs; nothing
//! is uploaded.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::payload::Payload;
use crate::resource::{require, require_text, Draft, Resource};
use crate::types::{wire_date, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCategory {
    Education,
    Entertainment,
    News,
    Sports,
    Technology,
}

impl VideoCategory {
    pub const ALL: [VideoCategory; 5] = [
        VideoCategory::Education,
        VideoCategory::Entertainment,
        VideoCategory::News,
        VideoCategory::Sports,
        VideoCategory::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoCategory::Education => "education",
            VideoCategory::Entertainment => "entertainment",
            VideoCategory::News => "news",
            VideoCategory::Sports => "sports",
            VideoCategory::Technology => "technology",
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown video category: {s}")))
    }
}

/// A stored video. `category` is kept as sent by the server so a value
/// outside [`VideoCategory`] does not break the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub video_link: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub category: String,
}

impl Video {
    pub fn category(&self) -> Option<VideoCategory> {
        self.category.parse().ok()
    }
}

impl Resource for Video {
    const PATH: &'static str = "videos";
    const NOUN: &'static str = "video";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.title, &self.category]
    }
}

/// Form state for adding a video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDraft {
    pub title: String,
    pub thumbnail: String,
    pub video_link: String,
    pub publish_date: Option<NaiveDate>,
    pub category: Option<VideoCategory>,
}

impl VideoDraft {
    pub fn new() -> Self {
        Self::default()
    }
}

fn require_url(field: &str, value: &str) -> Result<(), CoreError> {
    require_text(field, value)?;
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(CoreError::Validation(format!(
            "{field} must be an http(s) URL, got {value}"
        )));
    }
    Ok(())
}

impl Draft for VideoDraft {
    type Record = Video;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_url("thumbnail", &self.thumbnail)?;
        require_url("video link", &self.video_link)?;
        require("publish date", &self.publish_date)?;
        require("category", &self.category)?;
        Ok(())
    }

    fn to_payload(&self) -> Payload {
        Payload::Json(serde_json::json!({
            "title": self.title,
            "thumbnail": self.thumbnail,
            "videoLink": self.video_link,
            "publishDate": self.publish_date.map(wire_date).unwrap_or_default(),
            "category": self.category.map(|c| c.as_str()).unwrap_or_default(),
        }))
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
