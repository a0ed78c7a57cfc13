//! Per-resource wording used by the controllers.

use herald_core::event::PhotoEvent;
use herald_core::press::PressRelease;
use herald_core::slider::SliderItem;
use herald_core::video::Video;
use herald_core::Resource;

#[derive(Debug, Clone, Copy)]
pub struct ScreenMessages {
    /// Plural noun, e.g. `events`.
    pub plural: &'static str,
    pub load_failed: &'static str,
    pub delete_prompt: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub status_failed: &'static str,
}

/// A resource with a management screen.
pub trait Screen: Resource {
    const MESSAGES: ScreenMessages;
}

impl Screen for PhotoEvent {
    const MESSAGES: ScreenMessages = ScreenMessages {
        plural: "events",
        load_failed: "Failed to load events",
        delete_prompt: "Are you sure you want to delete this event?",
        deleted: "Event deleted successfully",
        delete_failed: "Failed to delete event",
        created: "Photo event created successfully",
        create_failed: "Failed to create photo event",
        updated: "Photo event updated successfully",
        update_failed: "Failed to update photo event",
        status_failed: "Failed to update event status",
    };
}

impl Screen for PressRelease {
    const MESSAGES: ScreenMessages = ScreenMessages {
        plural: "press releases",
        load_failed: "Failed to load press releases",
        delete_prompt: "Are you sure you want to delete this press release?",
        deleted: "Press release deleted successfully",
        delete_failed: "Failed to delete press release",
        created: "Press release created successfully",
        create_failed: "Failed to save press release",
        updated: "Press release updated successfully",
        update_failed: "Failed to save press release",
        status_failed: "Failed to update press release status",
    };
}

impl Screen for SliderItem {
    const MESSAGES: ScreenMessages = ScreenMessages {
        plural: "sliders",
        load_failed: "Failed to fetch sliders",
        delete_prompt: "Are you sure you want to delete this slider?",
        deleted: "Slider deleted successfully",
        delete_failed: "Failed to delete slider",
        created: "Slider added successfully",
        create_failed: "Failed to save slider",
        updated: "Slider updated successfully",
        update_failed: "Failed to save slider",
        status_failed: "Failed to update slider status",
    };
}

impl Screen for Video {
    const MESSAGES: ScreenMessages = ScreenMessages {
        plural: "videos",
        load_failed: "Failed to load videos",
        delete_prompt: "Are you sure you want to delete this video?",
        deleted: "Video deleted successfully",
        delete_failed: "Failed to delete video",
        created: "Video added successfully!",
        create_failed: "Failed to add video. Please try again.",
        updated: "Video updated successfully",
        update_failed: "Failed to update video",
        status_failed: "Failed to update video status",
    };
}
