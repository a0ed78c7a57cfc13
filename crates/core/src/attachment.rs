//! Files picked for a draft and the lifetime of their previews.
//!
//! Every [`Attachment`] holds a [`PreviewHandle`] issued by a
//! [`PreviewRegistry`]. The handle is released when the attachment is
//! dropped, so removing an image, replacing a thumbnail or resetting a
//! draft never leaves previews behind.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::CoreError;

/// Largest file accepted as an attachment (10 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Preview registry
// ---------------------------------------------------------------------------

/// Issues preview handles and counts the ones still alive.
///
/// Cheap to clone; clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<AtomicUsize>,
    next: Arc<AtomicU64>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new preview handle for `file_name`.
    pub fn issue(&self, file_name: &str) -> PreviewHandle {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        self.live.fetch_add(1, Ordering::SeqCst);
        PreviewHandle {
            key: format!("preview://{n}/{file_name}"),
            live: Arc::clone(&self.live),
        }
    }

    /// Number of previews issued and not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A live preview. Released on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    key: String,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// An image file loaded into memory for upload.
#[derive(Debug)]
pub struct Attachment {
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
    preview: PreviewHandle,
}

impl Attachment {
    /// Build an attachment from raw bytes.
    ///
    /// The content type is sniffed from the image header; anything that
    /// is not a recognised image, is empty, or exceeds
    /// [`MAX_ATTACHMENT_BYTES`] is rejected.
    pub fn from_bytes(
        registry: &PreviewRegistry,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(CoreError::Attachment(format!("{file_name} is empty")));
        }
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(CoreError::Attachment(format!(
                "{file_name} is {} bytes, limit is {MAX_ATTACHMENT_BYTES}",
                bytes.len()
            )));
        }
        let format = image::guess_format(&bytes).map_err(|_| {
            CoreError::Attachment(format!("{file_name} is not a supported image"))
        })?;

        let preview = registry.issue(&file_name);
        Ok(Self {
            file_name,
            content_type: format.to_mime_type(),
            bytes,
            preview,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn preview_key(&self) -> &str {
        self.preview.key()
    }
}

// ---------------------------------------------------------------------------
// AttachmentSet
// ---------------------------------------------------------------------------

/// An attachment with its caption.
#[derive(Debug)]
pub struct CaptionedAttachment {
    pub attachment: Attachment,
    pub caption: String,
}

/// Ordered collection of captioned images for a gallery draft.
#[derive(Debug, Default)]
pub struct AttachmentSet {
    items: Vec<CaptionedAttachment>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image with an empty caption.
    pub fn push(&mut self, attachment: Attachment) {
        self.items.push(CaptionedAttachment {
            attachment,
            caption: String::new(),
        });
    }

    /// Remove the image at `index`, releasing its preview.
    pub fn remove(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.items.len() {
            return Err(CoreError::Validation(format!(
                "no image at position {index}"
            )));
        }
        self.items.remove(index);
        Ok(())
    }

    pub fn set_caption(&mut self, index: usize, caption: impl Into<String>) -> Result<(), CoreError> {
        let item = self.items.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!("no image at position {index}"))
        })?;
        item.caption = caption.into();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaptionedAttachment> {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn png(registry: &PreviewRegistry, name: &str) -> Attachment {
        Attachment::from_bytes(registry, name, PNG_HEADER.to_vec()).unwrap()
    }

    #[test]
    fn sniffs_png_content_type() {
        let registry = PreviewRegistry::new();
        let attachment = png(&registry, "cover.png");
        assert_eq!(attachment.content_type(), "image/png");
        assert!(attachment.preview_key().ends_with("/cover.png"));
    }

    #[test]
    fn rejects_non_image_bytes() {
        let registry = PreviewRegistry::new();
        let result = Attachment::from_bytes(&registry, "notes.txt", b"hello world".to_vec());
        assert_matches!(result, Err(CoreError::Attachment(_)));
        assert_eq!(registry.live(), 0);
    }

    #[test]
    fn rejects_empty_file() {
        let registry = PreviewRegistry::new();
        let result = Attachment::from_bytes(&registry, "empty.png", Vec::new());
        assert_matches!(result, Err(CoreError::Attachment(_)));
    }

    #[test]
    fn dropping_attachment_releases_preview() {
        let registry = PreviewRegistry::new();
        let attachment = png(&registry, "a.png");
        assert_eq!(registry.live(), 1);
        drop(attachment);
        assert_eq!(registry.live(), 0);
    }

    #[test]
    fn set_remove_and_clear_release_previews() {
        let registry = PreviewRegistry::new();
        let mut set = AttachmentSet::new();
        set.push(png(&registry, "a.png"));
        set.push(png(&registry, "b.png"));
        set.push(png(&registry, "c.png"));
        assert_eq!(registry.live(), 3);

        set.remove(1).unwrap();
        assert_eq!(registry.live(), 2);
        assert_eq!(
            set.iter().map(|i| i.attachment.file_name()).collect::<Vec<_>>(),
            vec!["a.png", "c.png"]
        );

        set.clear();
        assert_eq!(registry.live(), 0);
    }

    #[test]
    fn caption_out_of_range_is_rejected() {
        let mut set = AttachmentSet::new();
        assert_matches!(set.set_caption(0, "x"), Err(CoreError::Validation(_)));
    }
}
